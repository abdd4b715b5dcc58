/// A selection control that shows one row of a menu at a time.
pub trait SelectionWidget {
    fn selected_index(&self) -> i64;
    fn set_selected_index(&mut self, index: i64);
}

/// In-memory widget used by the CLI and in tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectState {
    index: i64,
}

impl SelectState {
    pub fn new(index: i64) -> Self {
        Self { index }
    }
}

impl SelectionWidget for SelectState {
    fn selected_index(&self) -> i64 {
        self.index
    }

    fn set_selected_index(&mut self, index: i64) {
        self.index = index;
    }
}
