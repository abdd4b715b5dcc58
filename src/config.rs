use std::{collections::BTreeMap, env, fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::menu::{Menu, MenuName};
use crate::navigation::NavigationMenuSet;

const ACROSS: &[&str] = &[
    "_contents.htm",
    "_reference.htm",
    "_index.htm",
    "_search.htm",
    "_external.htm",
];

const UP: &[&str] = &[
    "cppad.htm",
    "ad.htm",
    "advalued.htm",
    "atomic.htm",
    "atomic_base.htm",
    "atomic_norm_sq.cpp.htm",
];

const DOWN3: &[&str] = &[
    "arithmetic.htm",
    "unary_standard_math.htm",
    "binary_math.htm",
    "condexp.htm",
    "discrete.htm",
    "numeric_limits.htm",
    "atomic.htm",
];

const DOWN2: &[&str] = &["checkpoint.htm", "atomic_base.htm"];

const DOWN1: &[&str] = &[
    "atomic_ctor.htm",
    "atomic_option.htm",
    "atomic_afun.htm",
    "atomic_forward.htm",
    "atomic_reverse.htm",
    "atomic_for_sparse_jac.htm",
    "atomic_rev_sparse_jac.htm",
    "atomic_for_sparse_hes.htm",
    "atomic_rev_sparse_hes.htm",
    "atomic_base_clear.htm",
    "atomic_get_started.cpp.htm",
    "atomic_norm_sq.cpp.htm",
    "atomic_reciprocal.cpp.htm",
    "atomic_set_sparsity.cpp.htm",
    "atomic_tangent.cpp.htm",
    "atomic_eigen_mat_mul.cpp.htm",
    "atomic_eigen_mat_inv.cpp.htm",
    "atomic_eigen_cholesky.cpp.htm",
    "atomic_mat_mul.cpp.htm",
];

const CURRENT: &[&str] = &[
    "atomic_norm_sq.cpp.htm#Theory",
    "atomic_norm_sq.cpp.htm#sparsity",
    "atomic_norm_sq.cpp.htm#Start Class Definition",
    "atomic_norm_sq.cpp.htm#Constructor",
    "atomic_norm_sq.cpp.htm#forward",
    "atomic_norm_sq.cpp.htm#reverse",
    "atomic_norm_sq.cpp.htm#for_sparse_jac",
    "atomic_norm_sq.cpp.htm#rev_sparse_jac",
    "atomic_norm_sq.cpp.htm#rev_sparse_hes",
    "atomic_norm_sq.cpp.htm#End Class Definition",
    "atomic_norm_sq.cpp.htm#Use Atomic Function",
    "atomic_norm_sq.cpp.htm#Use Atomic Function.Constructor",
    "atomic_norm_sq.cpp.htm#Use Atomic Function.Recording",
    "atomic_norm_sq.cpp.htm#Use Atomic Function.forward",
    "atomic_norm_sq.cpp.htm#Use Atomic Function.reverse",
    "atomic_norm_sq.cpp.htm#Use Atomic Function.for_sparse_jac",
    "atomic_norm_sq.cpp.htm#Use Atomic Function.rev_sparse_jac",
    "atomic_norm_sq.cpp.htm#Use Atomic Function.rev_sparse_hes",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Page the menus belong to, for display only.
    #[serde(default)]
    pub page: Option<String>,

    /// Directory that relative destinations are resolved against when opened.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Menu name -> destinations in displayed order.
    #[serde(default)]
    pub menus: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Menus of the `atomic_norm_sq.cpp.htm` page.
    ///
    /// `down0` has a handler on that page but no list, so it is empty here.
    pub fn builtin() -> Self {
        let menus: BTreeMap<String, Vec<String>> = [
            ("across", ACROSS),
            ("up", UP),
            ("down3", DOWN3),
            ("down2", DOWN2),
            ("down1", DOWN1),
            ("down0", &[][..]),
            ("current", CURRENT),
        ]
        .into_iter()
        .map(|(name, list)| {
            (
                name.to_string(),
                list.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect();

        Self {
            page: Some("atomic_norm_sq.cpp.htm".to_string()),
            root: None,
            menus,
        }
    }

    pub fn to_menu_set(&self) -> Result<NavigationMenuSet> {
        let mut menus = Vec::with_capacity(self.menus.len());
        for (key, destinations) in &self.menus {
            let name: MenuName = key
                .parse()
                .with_context(|| format!("config menu '{key}'"))?;
            menus.push(Menu::new(name, destinations.iter().cloned()));
        }
        NavigationMenuSet::new(menus).context("building menu set from config")
    }
}

pub fn load_optional() -> Result<Option<Config>> {
    let Some(path) = resolve_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load(&path).map(Some)
}

pub fn load(path: &Path) -> Result<Config> {
    let bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}

pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(p) = env::var("DOCNAV_CONFIG") {
        if !p.trim().is_empty() {
            return Some(PathBuf::from(p));
        }
    }

    let local = PathBuf::from("docnav.json");
    if local.exists() {
        return Some(local);
    }

    if let Some(appdata) = env::var_os("APPDATA") {
        return Some(PathBuf::from(appdata).join("docnav").join("config.json"));
    }

    if let Some(home) = env::var_os("HOME") {
        return Some(PathBuf::from(home).join(".config").join("docnav").join("config.json"));
    }

    None
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_set_has_every_page_menu() {
        let set = Config::builtin().to_menu_set().unwrap();
        assert_eq!(set.len(), 7);
        assert_eq!(set.menu(MenuName::Up).unwrap().len(), 6);
        assert_eq!(set.menu(MenuName::Down(1)).unwrap().len(), 19);
        assert!(set.menu(MenuName::Down(0)).unwrap().is_empty());
        assert_eq!(
            set.menu(MenuName::Current).unwrap().destinations()[0],
            "atomic_norm_sq.cpp.htm#Theory"
        );
    }

    #[test]
    fn loads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "root": "/srv/doc", "menus": {{ "up0": ["cppad.htm", "ad.htm"], "down-2": [] }} }}"#
        )
        .unwrap();

        let cfg = load(file.path()).unwrap();
        assert_eq!(cfg.root.as_deref(), Some(Path::new("/srv/doc")));
        assert!(cfg.page.is_none());

        let set = cfg.to_menu_set().unwrap();
        assert_eq!(
            set.menu(MenuName::Up).unwrap().destinations(),
            ["cppad.htm", "ad.htm"]
        );
        assert!(set.menu(MenuName::Down(2)).unwrap().is_empty());
    }

    #[test]
    fn aliases_of_one_menu_collide() {
        let cfg: Config =
            serde_json::from_str(r#"{ "menus": { "up": ["a.htm"], "up0": ["b.htm"] } }"#).unwrap();
        let err = cfg.to_menu_set().unwrap_err();
        assert!(format!("{err:#}").contains("more than once"));
    }

    #[test]
    fn unknown_menu_key_is_reported() {
        let cfg: Config = serde_json::from_str(r#"{ "menus": { "left": [] } }"#).unwrap();
        let err = cfg.to_menu_set().unwrap_err();
        assert!(format!("{err:#}").contains("config menu 'left'"));
    }

    #[test]
    fn malformed_json_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("parsing "));
    }
}
