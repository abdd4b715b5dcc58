//! Dropdown navigation menus for generated documentation pages.
//!
//! A page carries a fixed set of menus (sibling sections, parent pages,
//! child topics at several depths, in-page anchors). Picking a row navigates
//! to the matching destination and snaps the dropdown back to its prompt row.

pub mod browse;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod navigation;
pub mod render;
pub mod script;
pub mod widget;

pub use browse::{BrowsingContext, History, SystemBrowser};
pub use error::NavError;
pub use menu::{Menu, MenuName, Selection, PLACEHOLDER_INDEX};
pub use navigation::NavigationMenuSet;
pub use widget::{SelectState, SelectionWidget};
