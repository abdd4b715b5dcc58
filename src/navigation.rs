use std::collections::BTreeMap;

use crate::browse::BrowsingContext;
use crate::error::NavError;
use crate::menu::{Menu, MenuName, Selection, PLACEHOLDER_INDEX};
use crate::widget::SelectionWidget;

/// The dropdowns of one documentation page, keyed by name.
///
/// Built once when the page loads and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationMenuSet {
    menus: BTreeMap<MenuName, Menu>,
}

impl NavigationMenuSet {
    pub fn new<I>(menus: I) -> Result<Self, NavError>
    where
        I: IntoIterator<Item = Menu>,
    {
        let mut out = BTreeMap::new();
        for menu in menus {
            let name = menu.name();
            if let MenuName::Down(depth) = name {
                MenuName::down(depth)?;
            }
            if out.insert(name, menu).is_some() {
                return Err(NavError::DuplicateMenu(name));
            }
        }
        Ok(Self { menus: out })
    }

    pub fn menu(&self, name: MenuName) -> Option<&Menu> {
        self.menus.get(&name)
    }

    /// Menus in page order.
    pub fn menus(&self) -> impl Iterator<Item = &Menu> {
        self.menus.values()
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Routes a selection event to the named menu.
    ///
    /// The widget is reset even when the set has no such menu.
    pub fn on_select(
        &self,
        name: MenuName,
        widget: &mut dyn SelectionWidget,
        context: &mut dyn BrowsingContext,
    ) -> Result<Selection, NavError> {
        let Some(menu) = self.menus.get(&name) else {
            widget.set_selected_index(PLACEHOLDER_INDEX);
            return Err(NavError::UnknownMenu(name.to_string()));
        };
        Ok(menu.on_select(widget, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::History;
    use crate::widget::SelectState;

    fn set() -> NavigationMenuSet {
        NavigationMenuSet::new([
            Menu::new(MenuName::Current, ["atomic_norm_sq.cpp.htm#Theory"]),
            Menu::new(MenuName::Across, ["_contents.htm", "_reference.htm"]),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = NavigationMenuSet::new([
            Menu::new(MenuName::Up, ["a.htm"]),
            Menu::new(MenuName::Up, ["b.htm"]),
        ])
        .unwrap_err();
        assert_eq!(err, NavError::DuplicateMenu(MenuName::Up));
    }

    #[test]
    fn depth_past_root_is_rejected() {
        let err = NavigationMenuSet::new([Menu::new(MenuName::Down(9), ["a.htm"])]).unwrap_err();
        assert_eq!(err, NavError::InvalidMenuName("down9".to_string()));

        let ok = NavigationMenuSet::new([Menu::new(MenuName::Down(3), ["a.htm"])]).unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn menus_iterate_in_page_order() {
        let names: Vec<_> = set().menus().map(Menu::name).collect();
        assert_eq!(names, vec![MenuName::Across, MenuName::Current]);
    }

    #[test]
    fn current_anchor_is_reachable_from_row_one() {
        let menus = set();
        let mut widget = SelectState::new(1);
        let mut history = History::default();

        let outcome = menus
            .on_select(MenuName::Current, &mut widget, &mut history)
            .unwrap();

        assert!(matches!(outcome, Selection::Navigated { index: 1, .. }));
        assert_eq!(history.visited(), ["atomic_norm_sq.cpp.htm#Theory"]);
        assert_eq!(widget.selected_index(), 0);
    }

    #[test]
    fn unknown_menu_still_resets_widget() {
        let menus = set();
        let mut widget = SelectState::new(1);
        let mut history = History::default();

        let err = menus
            .on_select(MenuName::Up, &mut widget, &mut history)
            .unwrap_err();

        assert_eq!(err, NavError::UnknownMenu("up".to_string()));
        assert_eq!(widget.selected_index(), 0);
        assert!(history.visited().is_empty());
    }
}
