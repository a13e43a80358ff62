//! Run configuration handed to the graph engine

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LLM_PROVIDER: &str = "openai";
pub const DEFAULT_DEEP_THINK_LLM: &str = "deepseek-r1-250528";
pub const DEFAULT_QUICK_THINK_LLM: &str = "doubao-seed-1-6-flash-250615";
pub const DEFAULT_BACKEND_URL: &str = "https://ark.cn-beijing.volces.com/api/v3";

/// Environment variable overriding `results_dir`
pub const RESULTS_DIR_ENV: &str = "TRADINGAGENTS_RESULTS_DIR";
/// Environment variable overriding `data_dir`
pub const DATA_DIR_ENV: &str = "TRADINGAGENTS_DATA_DIR";

/// Configuration for one engine run
///
/// Serializes to the flat key set the engine reads:
///
/// ```json
/// {
///   "project_dir": ".",
///   "results_dir": "./results",
///   "data_dir": "./data",
///   "data_cache_dir": "./dataflows/data_cache",
///   "llm_provider": "openai",
///   "deep_think_llm": "deepseek-r1-250528",
///   "quick_think_llm": "doubao-seed-1-6-flash-250615",
///   "backend_url": "https://ark.cn-beijing.volces.com/api/v3",
///   "max_debate_rounds": 1,
///   "max_risk_discuss_rounds": 1,
///   "max_recur_limit": 1000,
///   "online_tools": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingConfig {
    pub project_dir: PathBuf,
    pub results_dir: PathBuf,
    pub data_dir: PathBuf,
    pub data_cache_dir: PathBuf,

    // LLM settings
    pub llm_provider: String,
    pub deep_think_llm: String,
    pub quick_think_llm: String,
    pub backend_url: String,

    // Debate and discussion settings
    pub max_debate_rounds: u32,
    pub max_risk_discuss_rounds: u32,
    pub max_recur_limit: u32,

    /// Let the engine call live data tools instead of cached data
    pub online_tools: bool,
}

impl Default for TradingConfig {
    fn default() -> Self {
        let project_dir = PathBuf::from(".");
        Self {
            data_cache_dir: project_dir.join("dataflows").join("data_cache"),
            project_dir,
            results_dir: PathBuf::from("./results"),
            data_dir: PathBuf::from("./data"),
            llm_provider: DEFAULT_LLM_PROVIDER.to_string(),
            deep_think_llm: DEFAULT_DEEP_THINK_LLM.to_string(),
            quick_think_llm: DEFAULT_QUICK_THINK_LLM.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            max_debate_rounds: 1,
            max_risk_discuss_rounds: 1,
            max_recur_limit: 1000,
            online_tools: true,
        }
    }
}

impl TradingConfig {
    /// Create a new configuration builder
    pub fn builder() -> TradingConfigBuilder {
        TradingConfigBuilder::default()
    }

    /// Defaults with the directory overrides from the process environment
    pub fn from_env() -> Self {
        Self::default().with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply directory overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = non_empty(RESULTS_DIR_ENV) {
            self.results_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        self
    }

    /// Overlay every field the patch sets
    pub fn with_patch(mut self, patch: &ConfigPatch) -> Self {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = &patch.$field {
                        self.$field = value.clone();
                    }
                )*
            };
        }

        overlay!(
            project_dir,
            results_dir,
            data_dir,
            data_cache_dir,
            llm_provider,
            deep_think_llm,
            quick_think_llm,
            backend_url,
            max_debate_rounds,
            max_risk_discuss_rounds,
            max_recur_limit,
            online_tools,
        );
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.llm_provider.trim().is_empty() {
            return Err(Error::InvalidConfig("llm_provider must not be empty".to_string()));
        }

        if self.quick_think_llm.trim().is_empty() {
            return Err(Error::InvalidConfig("quick_think_llm must not be empty".to_string()));
        }

        if self.deep_think_llm.trim().is_empty() {
            return Err(Error::InvalidConfig("deep_think_llm must not be empty".to_string()));
        }

        crate::input::validate_base_url(&self.backend_url)?;

        for (name, value) in [
            ("max_debate_rounds", self.max_debate_rounds),
            ("max_risk_discuss_rounds", self.max_risk_discuss_rounds),
            ("max_recur_limit", self.max_recur_limit),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be greater than 0")));
            }
        }

        Ok(())
    }
}

/// A configuration-shaped mapping where every key is optional
///
/// Used for `--config` files and saved profiles. Unknown keys are rejected so
/// that a typo does not silently fall back to a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_cache_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_think_llm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_think_llm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_debate_rounds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_risk_discuss_rounds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_recur_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_tools: Option<bool>,
}

impl ConfigPatch {
    /// Load a patch from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when no key is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Builder for TradingConfig
#[derive(Debug, Default)]
pub struct TradingConfigBuilder {
    base: Option<TradingConfig>,
    patch: ConfigPatch,
}

impl TradingConfigBuilder {
    /// Start from this configuration instead of the defaults
    pub fn base(mut self, base: TradingConfig) -> Self {
        self.base = Some(base);
        self
    }

    pub fn llm_provider(mut self, provider: impl Into<String>) -> Self {
        self.patch.llm_provider = Some(provider.into());
        self
    }

    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.patch.backend_url = Some(url.into());
        self
    }

    pub fn quick_think_llm(mut self, model: impl Into<String>) -> Self {
        self.patch.quick_think_llm = Some(model.into());
        self
    }

    pub fn deep_think_llm(mut self, model: impl Into<String>) -> Self {
        self.patch.deep_think_llm = Some(model.into());
        self
    }

    pub fn max_debate_rounds(mut self, rounds: u32) -> Self {
        self.patch.max_debate_rounds = Some(rounds);
        self
    }

    pub fn max_risk_discuss_rounds(mut self, rounds: u32) -> Self {
        self.patch.max_risk_discuss_rounds = Some(rounds);
        self
    }

    pub fn max_recur_limit(mut self, limit: u32) -> Self {
        self.patch.max_recur_limit = Some(limit);
        self
    }

    pub fn online_tools(mut self, enabled: bool) -> Self {
        self.patch.online_tools = Some(enabled);
        self
    }

    pub fn results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.patch.results_dir = Some(dir.into());
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.patch.data_dir = Some(dir.into());
        self
    }

    /// Merge a whole patch; keys set here win over earlier builder calls
    pub fn patch(mut self, patch: &ConfigPatch) -> Self {
        self.patch = ConfigPatch {
            project_dir: patch.project_dir.clone().or(self.patch.project_dir),
            results_dir: patch.results_dir.clone().or(self.patch.results_dir),
            data_dir: patch.data_dir.clone().or(self.patch.data_dir),
            data_cache_dir: patch.data_cache_dir.clone().or(self.patch.data_cache_dir),
            llm_provider: patch.llm_provider.clone().or(self.patch.llm_provider),
            deep_think_llm: patch.deep_think_llm.clone().or(self.patch.deep_think_llm),
            quick_think_llm: patch.quick_think_llm.clone().or(self.patch.quick_think_llm),
            backend_url: patch.backend_url.clone().or(self.patch.backend_url),
            max_debate_rounds: patch.max_debate_rounds.or(self.patch.max_debate_rounds),
            max_risk_discuss_rounds: patch
                .max_risk_discuss_rounds
                .or(self.patch.max_risk_discuss_rounds),
            max_recur_limit: patch.max_recur_limit.or(self.patch.max_recur_limit),
            online_tools: patch.online_tools.or(self.patch.online_tools),
        };
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<TradingConfig> {
        let config = self.base.unwrap_or_default().with_patch(&self.patch);
        config.validate()?;
        Ok(config)
    }
}
