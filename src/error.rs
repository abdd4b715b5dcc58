use thiserror::Error;

use crate::menu::MenuName;

/// Errors raised by the navigation menus and their loaders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NavError {
    /// A widget reported an index outside `[0, len]` for its menu.
    #[error("invalid selection index {index} for menu '{menu}' ({len} entries)")]
    InvalidSelectionIndex {
        menu: MenuName,
        index: i64,
        len: usize,
    },

    #[error("unknown menu '{0}'")]
    UnknownMenu(String),

    #[error("menu '{0}' is defined more than once")]
    DuplicateMenu(MenuName),

    /// A menu name that is not one of across, up, down0..down3 or current.
    #[error("invalid menu name '{0}'")]
    InvalidMenuName(String),

    #[error("page script line {line}: {message}")]
    Script { line: usize, message: String },
}
