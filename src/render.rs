use std::fmt::Write;

use crate::menu::{Menu, MenuName, PLACEHOLDER_INDEX};
use crate::navigation::NavigationMenuSet;

/// Rows a menu presents, in displayed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSpec {
    pub name: MenuName,
    pub rows: Vec<MenuRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuRow {
    Placeholder(String),
    Entry {
        index: i64,
        title: String,
        location: String,
    },
}

impl MenuRow {
    pub fn index(&self) -> i64 {
        match self {
            Self::Placeholder(_) => PLACEHOLDER_INDEX,
            Self::Entry { index, .. } => *index,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Placeholder(title) | Self::Entry { title, .. } => title,
        }
    }
}

impl MenuSpec {
    pub fn for_menu(menu: &Menu) -> Self {
        let mut rows = Vec::with_capacity(menu.len() + 1);
        rows.push(MenuRow::Placeholder(menu.name().prompt().to_string()));
        rows.extend(
            menu.destinations()
                .iter()
                .zip(1..)
                .map(|(location, index)| MenuRow::Entry {
                    index,
                    title: label(location).to_string(),
                    location: location.clone(),
                }),
        );
        Self {
            name: menu.name(),
            rows,
        }
    }
}

/// Text shown for a destination: its fragment, or the page without extension.
pub fn label(location: &str) -> &str {
    if let Some((_, fragment)) = location.split_once('#') {
        if !fragment.is_empty() {
            return fragment;
        }
    }
    let page = location.split_once('#').map_or(location, |(page, _)| page);
    page.strip_suffix(".html")
        .or_else(|| page.strip_suffix(".htm"))
        .unwrap_or(page)
}

/// One `<select>` per menu, wired to the page's `choose_<menu>` handlers.
pub fn html(set: &NavigationMenuSet) -> String {
    let mut out = String::new();
    for menu in set.menus() {
        let spec = MenuSpec::for_menu(menu);
        let id = menu.name().script_id();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "<select onchange=\"choose_{id}(this)\">");
        for row in &spec.rows {
            let _ = writeln!(out, "<option>{}</option>", escape(row.title()));
        }
        out.push_str("</select>\n");
    }
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(label("atomic_base.htm"), "atomic_base");
        assert_eq!(label("atomic_norm_sq.cpp.htm"), "atomic_norm_sq.cpp");
        assert_eq!(
            label("atomic_norm_sq.cpp.htm#Use Atomic Function.forward"),
            "Use Atomic Function.forward"
        );
        assert_eq!(label("index.html#"), "index");
        assert_eq!(label("README"), "README");
    }

    #[test]
    fn placeholder_row_comes_first() {
        let menu = Menu::new(MenuName::Down(2), ["checkpoint.htm", "atomic_base.htm"]);
        let spec = MenuSpec::for_menu(&menu);

        assert_eq!(spec.rows.len(), 3);
        assert_eq!(spec.rows[0], MenuRow::Placeholder("down".to_string()));
        assert_eq!(spec.rows[2].index(), 2);
        assert_eq!(spec.rows[2].title(), "atomic_base");
        for row in &spec.rows[1..] {
            let MenuRow::Entry { index, location, .. } = row else {
                panic!("expected entry");
            };
            assert_eq!(menu.decode(*index).unwrap(), Some((*index - 1) as usize));
            assert_eq!(&menu.destinations()[(*index - 1) as usize], location);
        }
    }

    #[test]
    fn html_escapes_and_wires_handlers() {
        let set = NavigationMenuSet::new([Menu::new(
            MenuName::Current,
            ["page.htm#a<b>&\"c\""],
        )])
        .unwrap();

        let markup = html(&set);
        assert_eq!(
            markup,
            "<select onchange=\"choose_current0(this)\">\n\
             <option>current</option>\n\
             <option>a&lt;b&gt;&amp;&quot;c&quot;</option>\n\
             </select>\n"
        );
    }
}
