//! Saved run profiles
//!
//! A profile is a JSON file holding a partial configuration, e.g.
//! `~/.config/tradingagents/profiles/volcengine.json`:
//!
//! ```json
//! {
//!   "llm_provider": "openai",
//!   "backend_url": "https://ark.cn-beijing.volces.com/api/v3",
//!   "quick_think_llm": "doubao-seed-1-6-flash-250615",
//!   "deep_think_llm": "deepseek-r1-250528"
//! }
//! ```
//!
//! Profiles are only read here; they are written by hand.

use crate::error::Result;
use crate::prompt::Prompter;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tradingagents_core::{ConfigPatch, Error, ProviderSelection};

const PROFILE_EXTENSION: &str = "json";

/// Source of named configurations
#[cfg_attr(test, mockall::automock)]
pub trait ProfileStore {
    /// Profile names, sorted
    fn list_configs(&self) -> tradingagents_core::Result<Vec<String>>;

    fn load(&self, name: &str) -> tradingagents_core::Result<ConfigPatch>;
}

/// Profiles stored as `<name>.json` in one directory
#[derive(Debug, Clone)]
pub struct DirProfileStore {
    dir: PathBuf,
}

impl DirProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> tradingagents_core::Result<PathBuf> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(Error::InvalidConfig(format!("invalid profile name {name:?}")));
        }
        Ok(self.dir.join(format!("{name}.{PROFILE_EXTENSION}")))
    }
}

impl ProfileStore for DirProfileStore {
    fn list_configs(&self) -> tradingagents_core::Result<Vec<String>> {
        if !self.dir.is_dir() {
            debug!("Profile directory {} does not exist", self.dir.display());
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_profile = path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(PROFILE_EXTENSION);
            if !is_profile {
                continue;
            }
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(name) if !name.starts_with('.') => names.push(name.to_string()),
                _ => warn!("Skipping profile with unusable name: {}", path.display()),
            }
        }

        names.sort();
        Ok(names)
    }

    fn load(&self, name: &str) -> tradingagents_core::Result<ConfigPatch> {
        let path = self.path_for(name)?;
        debug!("Loading profile {}", path.display());
        ConfigPatch::from_file(&path).map_err(|e| {
            Error::InvalidConfig(format!("profile {name:?} ({}): {e}", path.display()))
        })
    }
}

/// Let the user pick one of `names` and load it.
///
/// Backing out of the menu returns `None` so the caller can fall through to
/// the provider menu.
pub fn select_saved_config(
    prompter: &mut dyn Prompter,
    store: &dyn ProfileStore,
    names: &[String],
) -> Result<Option<ProviderSelection>> {
    let Some(index) = prompter.select("Select a saved configuration:", names, 0)? else {
        return Ok(None);
    };
    let Some(name) = names.get(index) else {
        return Ok(None);
    };

    let config = store.load(name)?;
    prompter.note(&format!("Using saved configuration: {name}"));
    Ok(Some(ProviderSelection::saved(name.clone(), config)))
}
