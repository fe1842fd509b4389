use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Headings deeper than this render as `<h6>`.
pub const HEADING_CAP: usize = 6;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Tag of the document root element.
    pub root_tag: String,
    /// Class applied to the document root element, if any.
    pub root_class: Option<String>,
    /// Give blockquote attribution regions a generated id so a host
    /// stylesheet can wire up collapse toggling.
    pub collapsible_attributions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_tag: "div".to_string(),
            root_class: Some("markdown".to_string()),
            collapsible_attributions: true,
        }
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn root_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.root_tag = tag.into();
        self
    }

    pub fn root_class(mut self, class: impl Into<String>) -> Self {
        self.config.root_class = Some(class.into());
        self
    }

    pub fn no_root_class(mut self) -> Self {
        self.config.root_class = None;
        self
    }

    pub fn collapsible_attributions(mut self, enabled: bool) -> Self {
        self.config.collapsible_attributions = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".cardstock.toml", "cardstock.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("cardstock").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join("cardstock")
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .cardstock.toml, cardstock.toml
/// 3) XDG: $XDG_CONFIG_HOME/cardstock/config.toml or ~/.config/cardstock/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir)
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    if let Some(p) = xdg_config_path()
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}
