use std::{cmp::Ordering, fmt, str::FromStr};

use tracing::{debug, error};

use crate::browse::BrowsingContext;
use crate::error::NavError;
use crate::widget::SelectionWidget;

/// Displayed index of the non-navigating prompt row.
pub const PLACEHOLDER_INDEX: i64 = 0;

/// Deepest child-topic level; depth 3 is nearest the root.
pub const MAX_DOWN_DEPTH: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuName {
    /// Top-level sections shared by every page.
    Across,
    /// Parent pages, root first.
    Up,
    /// Child topics at a tree depth in `0..=MAX_DOWN_DEPTH`.
    ///
    /// Deeper values can be built directly but `NavigationMenuSet::new`
    /// rejects them.
    Down(u8),
    /// Section anchors inside the current page.
    Current,
}

impl MenuName {
    pub fn down(depth: u8) -> Result<Self, NavError> {
        if depth > MAX_DOWN_DEPTH {
            return Err(NavError::InvalidMenuName(format!("down{depth}")));
        }
        Ok(Self::Down(depth))
    }

    /// All names in page order.
    pub fn all() -> Vec<MenuName> {
        let mut names = vec![Self::Across, Self::Up];
        names.extend((0..=MAX_DOWN_DEPTH).rev().map(Self::Down));
        names.push(Self::Current);
        names
    }

    /// Name used by the generated page for `list_<id>` and `choose_<id>`.
    pub fn script_id(&self) -> String {
        match self {
            Self::Across => "across0".to_string(),
            Self::Up => "up0".to_string(),
            Self::Down(depth) => format!("down{depth}"),
            Self::Current => "current0".to_string(),
        }
    }

    /// Prompt shown in the placeholder row.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Across => "across",
            Self::Up => "up",
            Self::Down(_) => "down",
            Self::Current => "current",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Across => 0,
            Self::Up => 1,
            Self::Down(depth) => 2 + MAX_DOWN_DEPTH.saturating_sub(*depth),
            Self::Current => 3 + MAX_DOWN_DEPTH,
        }
    }
}

impl Ord for MenuName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            // Out-of-range depths share a rank; keep the order total.
            .then_with(|| match (self, other) {
                (Self::Down(a), Self::Down(b)) => b.cmp(a),
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for MenuName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MenuName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Across => f.write_str("across"),
            Self::Up => f.write_str("up"),
            Self::Down(depth) => write!(f, "down{depth}"),
            Self::Current => f.write_str("current"),
        }
    }
}

impl FromStr for MenuName {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "across" | "across0" => return Ok(Self::Across),
            "up" | "up0" => return Ok(Self::Up),
            "current" | "current0" => return Ok(Self::Current),
            _ => {}
        }

        let Some(rest) = key.strip_prefix("down") else {
            return Err(NavError::InvalidMenuName(s.to_string()));
        };
        let digits = rest.strip_prefix('-').unwrap_or(rest);
        let depth = digits
            .parse::<u8>()
            .map_err(|_| NavError::InvalidMenuName(s.to_string()))?;
        Self::down(depth).map_err(|_| NavError::InvalidMenuName(s.to_string()))
    }
}

/// What a single `on_select` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The widget was already on its prompt row.
    Placeholder,
    Navigated { index: i64, location: String },
    /// Out-of-range index; handled like the placeholder.
    Rejected { index: i64 },
}

/// A named dropdown and the ordered locations behind its rows.
///
/// Displayed row `i >= 1` maps to `destinations()[i - 1]`; row 0 is the
/// placeholder. The list cannot change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    name: MenuName,
    destinations: Vec<String>,
}

impl Menu {
    pub fn new<I, S>(name: MenuName, destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            destinations: destinations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> MenuName {
        self.name
    }

    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Maps a displayed index to a slot in `destinations`.
    ///
    /// Returns `Ok(None)` for the placeholder row.
    pub fn decode(&self, index: i64) -> Result<Option<usize>, NavError> {
        if index == PLACEHOLDER_INDEX {
            return Ok(None);
        }

        match usize::try_from(index) {
            Ok(row) if row <= self.destinations.len() => Ok(Some(row - 1)),
            _ => Err(NavError::InvalidSelectionIndex {
                menu: self.name,
                index,
                len: self.destinations.len(),
            }),
        }
    }

    /// Handles a "selection changed" event from `widget`.
    ///
    /// The widget is put back on the placeholder row before anything else, so
    /// picking the same row again navigates again.
    pub fn on_select(
        &self,
        widget: &mut dyn SelectionWidget,
        context: &mut dyn BrowsingContext,
    ) -> Selection {
        let index = widget.selected_index();
        widget.set_selected_index(PLACEHOLDER_INDEX);

        match self.decode(index) {
            Ok(None) => Selection::Placeholder,
            Ok(Some(slot)) => {
                let location = &self.destinations[slot];
                debug!(menu = %self.name, index, location = %location, "navigate");
                context.navigate(location);
                Selection::Navigated {
                    index,
                    location: location.clone(),
                }
            }
            Err(err) => {
                error!(menu = %self.name, index, "{err}");
                Selection::Rejected { index }
            }
        }
    }
}
