//! Site configuration management for `percolate.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                            |
//! |------------|----------------------------------------------------|
//! | `[site]`   | Shell document, mount element id, site root        |
//! | `[serve]`  | File server (interface, port)                      |
//! | `[tools]`  | Tool-page detection, analytics and shell scripts   |
//! | `[routes]` | Route key -> source document overrides             |
//! | `[[sections]]` | Content folder -> route section mappings       |
//!
//! A missing config file is not an error: the built-in defaults describe the
//! stock site layout.

mod error;

pub use error::ConfigError;

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::debug;
use crate::route::{RouteTable, Section};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing percolate.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Shell and mount settings
    #[serde(default)]
    pub site: SiteSection,

    /// File server settings
    #[serde(default)]
    pub serve: ServeSection,

    /// Tool-page settings
    #[serde(default)]
    pub tools: ToolsSection,

    /// Route table overrides (empty = built-in table)
    #[serde(default)]
    pub routes: BTreeMap<String, String>,

    /// Section mappings (empty = built-in sections)
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::from("."),
            site: SiteSection::default(),
            serve: ServeSection::default(),
            tools: ToolsSection::default(),
            routes: BTreeMap::new(),
            sections: Vec::new(),
        }
    }
}

/// Shell document and mount element settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Shell document path, relative to the site root
    pub shell: String,

    /// Id of the mount element that receives swapped content
    pub mount_id: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            shell: "index.html".into(),
            mount_id: "app".into(),
        }
    }
}

/// File server settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeSection {
    /// Network interface to bind
    pub interface: IpAddr,

    /// Port number to listen on
    pub port: u16,
}

impl Default for ServeSection {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8000,
        }
    }
}

/// Tool-page settings.
///
/// A source document is "tool-bearing" when its path contains the tool
/// folder; its styles and scripts are captured and re-emitted across
/// navigation instead of being stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsSection {
    /// Folder whose documents carry interactive widgets
    pub folder: String,

    /// Inline scripts containing any of these markers are dropped
    pub analytics_markers: Vec<String>,

    /// Shell-owned scripts, never re-emitted from fetched documents
    pub shell_scripts: Vec<String>,

    /// Settle delay before scrolling to a hash target, in milliseconds
    pub scroll_settle_ms: u64,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            folder: "tools".into(),
            analytics_markers: vec![
                "gtag(".into(),
                "googletagmanager".into(),
                "google-analytics".into(),
            ],
            shell_scripts: vec!["router.js".into(), "script.js".into()],
            scroll_settle_ms: 100,
        }
    }
}

impl SiteConfig {
    /// Load configuration from the given path, falling back to built-in
    /// defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            debug!("config"; "no config at `{}`, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config: Self = toml::from_str(&raw)?;

        config.config_path = path.to_path_buf();
        config.root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        config.validate()?;
        Ok(config)
    }

    /// Structural validation beyond what serde enforces.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.site.mount_id.is_empty() {
            return Err(ConfigError::Validation("site.mount_id must not be empty".into()));
        }
        if self.site.shell.is_empty() {
            return Err(ConfigError::Validation("site.shell must not be empty".into()));
        }
        for section in &self.sections {
            if section.folder.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "section folder `{}` must be a bare folder name",
                    section.folder
                )));
            }
            if !section.route.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "section route `{}` must start with `/`",
                    section.route
                )));
            }
        }
        Ok(())
    }

    /// Build the immutable route table from config, or the built-in table
    /// when no overrides are given.
    pub fn route_table(&self) -> RouteTable {
        if self.routes.is_empty() {
            let builtin = RouteTable::builtin();
            if self.sections.is_empty() {
                return builtin;
            }
            return RouteTable::new(
                builtin.iter_sorted().map(|(k, v)| (k.as_str().to_string(), v.to_string())),
                self.sections.clone(),
            );
        }

        let sections = if self.sections.is_empty() {
            RouteTable::builtin().sections().to_vec()
        } else {
            self.sections.clone()
        };
        RouteTable::new(self.routes.iter().map(|(k, v)| (k.clone(), v.clone())), sections)
    }

    /// Absolute path of the shell document.
    pub fn shell_path(&self) -> PathBuf {
        self.root.join(&self.site.shell)
    }
}

// ============================================================================
// Global handle
// ============================================================================

static CONFIG: OnceLock<Arc<SiteConfig>> = OnceLock::new();

/// Install the global configuration. Call once at startup.
pub fn init_config(config: SiteConfig) -> Arc<SiteConfig> {
    let arc = Arc::new(config);
    let _ = CONFIG.set(Arc::clone(&arc));
    arc
}

/// Get the global configuration handle.
pub fn cfg() -> Arc<SiteConfig> {
    Arc::clone(CONFIG.get().expect("config not initialized"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.site.shell, "index.html");
        assert_eq!(config.site.mount_id, "app");
        assert_eq!(config.serve.port, 8000);
        assert_eq!(config.tools.folder, "tools");
        assert_eq!(config.route_table().len(), 10);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = SiteConfig::load(Path::new("/definitely/not/here.toml")).unwrap();
        assert_eq!(config.site.mount_id, "app");
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("percolate.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[site]
mount_id = "content"

[serve]
port = 9100

[routes]
"/" = "index.html"
"/about" = "about.html"

[[sections]]
folder = "notes"
route = "/notes"
"#
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.site.mount_id, "content");
        assert_eq!(config.serve.port, 9100);
        assert_eq!(config.root, dir.path());

        let table = config.route_table();
        assert_eq!(table.len(), 2);
        assert!(table.contains("/about"));
        assert!(table.in_section("/notes/scratch"));
    }

    #[test]
    fn test_validation_rejects_bad_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("percolate.toml");
        std::fs::write(&path, "[[sections]]\nfolder = \"a/b\"\nroute = \"/a\"\n").unwrap();
        assert!(matches!(
            SiteConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }
}
