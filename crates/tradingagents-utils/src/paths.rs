//! Per-user directories

use std::path::PathBuf;

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "tradingagents";

/// `$XDG_CONFIG_HOME/tradingagents` or the platform equivalent
pub fn app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Where saved run profiles are looked up by default
pub fn default_profiles_dir() -> Option<PathBuf> {
    app_config_dir().map(|dir| dir.join("profiles"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_dir_is_under_app_dir() {
        if let (Some(app), Some(profiles)) = (app_config_dir(), default_profiles_dir()) {
            assert!(profiles.starts_with(&app));
            assert!(app.ends_with(APP_DIR_NAME));
        }
    }
}
