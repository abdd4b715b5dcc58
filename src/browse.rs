use std::{
    env,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};
use url::Url;

/// Whatever displays a location to the user.
///
/// Navigation is fire-and-forget: implementations report their own failures.
pub trait BrowsingContext {
    fn navigate(&mut self, location: &str);
}

/// Records every navigation instead of performing it.
#[derive(Debug, Default, Clone)]
pub struct History {
    visited: Vec<String>,
}

impl History {
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn last(&self) -> Option<&str> {
        self.visited.last().map(String::as_str)
    }
}

impl BrowsingContext for History {
    fn navigate(&mut self, location: &str) {
        self.visited.push(location.to_string());
    }
}

/// Opens locations with the platform's default handler.
///
/// Relative locations (`page.htm`, `page.htm#Section`) are resolved against
/// the documentation root.
#[derive(Debug, Clone)]
pub struct SystemBrowser {
    root: PathBuf,
}

impl SystemBrowser {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, location: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(location) {
            // Single-letter schemes are Windows drive letters, not URLs.
            if url.scheme().len() > 1 {
                return Ok(url);
            }
        }

        let (path, fragment) = match location.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (location, None),
        };

        let mut file = self.root.join(path);
        if file.is_relative() {
            let cwd = env::current_dir().context("read current directory")?;
            file = cwd.join(file);
        }

        let mut url = Url::from_file_path(&file)
            .map_err(|_| anyhow!("cannot express {} as a file URL", file.display()))?;
        url.set_fragment(fragment);
        Ok(url)
    }

    fn open(&self, location: &str) -> Result<()> {
        let url = self.resolve(location)?;
        info!(url = %url, "opening");
        let mut cmd = opener_command(url.as_str());
        let status = cmd
            .status()
            .with_context(|| format!("running opener for {url}"))?;
        if !status.success() {
            return Err(anyhow!("opener failed (exit={status})"));
        }
        Ok(())
    }
}

impl BrowsingContext for SystemBrowser {
    fn navigate(&mut self, location: &str) {
        if let Err(err) = self.open(location) {
            warn!(location, "navigation failed: {err:#}");
        }
    }
}

fn opener_command(target: &str) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(target);
        cmd
    }

    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(target);
        cmd
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(target);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_keeps_order_and_duplicates() {
        let mut history = History::default();
        history.navigate("a.htm");
        history.navigate("a.htm");
        history.navigate("b.htm#x");
        assert_eq!(history.visited(), ["a.htm", "a.htm", "b.htm#x"]);
        assert_eq!(history.last(), Some("b.htm#x"));
    }

    #[test]
    fn absolute_urls_pass_through() {
        let browser = SystemBrowser::new("/docs");
        let url = browser.resolve("https://example.org/cppad.htm").unwrap();
        assert_eq!(url.as_str(), "https://example.org/cppad.htm");
    }

    #[cfg(unix)]
    #[test]
    fn relative_locations_resolve_under_root_with_fragment() {
        let browser = SystemBrowser::new("/docs/cppad");
        let url = browser
            .resolve("atomic_norm_sq.cpp.htm#Start Class Definition")
            .unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.path(), "/docs/cppad/atomic_norm_sq.cpp.htm");
        assert_eq!(url.fragment(), Some("Start%20Class%20Definition"));
    }

    #[cfg(unix)]
    #[test]
    fn plain_page_has_no_fragment() {
        let browser = SystemBrowser::new("/docs");
        let url = browser.resolve("atomic.htm").unwrap();
        assert_eq!(url.as_str(), "file:///docs/atomic.htm");
    }
}
