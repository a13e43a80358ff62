//! LLM provider menu and the selection it produces

use crate::config::ConfigPatch;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a menu entry gets its endpoint and models from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSource {
    /// Keep the configured defaults
    Default,
    /// Fixed endpoint with a curated model list
    Preset(&'static str),
    /// Ask for an OpenAI-compatible endpoint and model names
    CustomOpenai,
}

/// One row of the provider menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderEntry {
    pub label: &'static str,
    pub source: ProviderSource,
}

/// Provider menu, in display order
pub const PROVIDERS: &[ProviderEntry] = &[
    ProviderEntry {
        label: "Default Config",
        source: ProviderSource::Default,
    },
    ProviderEntry {
        label: "OpenAI",
        source: ProviderSource::Preset("https://api.openai.com/v1"),
    },
    ProviderEntry {
        label: "Custom OpenAI Compatible",
        source: ProviderSource::CustomOpenai,
    },
    ProviderEntry {
        label: "Anthropic",
        source: ProviderSource::Preset("https://api.anthropic.com/"),
    },
    ProviderEntry {
        label: "Google",
        source: ProviderSource::Preset("https://generativelanguage.googleapis.com/v1"),
    },
    ProviderEntry {
        label: "Openrouter",
        source: ProviderSource::Preset("https://openrouter.ai/api/v1"),
    },
    ProviderEntry {
        label: "Ollama",
        source: ProviderSource::Preset("http://localhost:11434/v1"),
    },
];

/// Metadata tag of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Default,
    Preset,
    CustomOpenai,
    SavedConfig,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Preset => "preset",
            Self::CustomOpenai => "custom_openai",
            Self::SavedConfig => "saved_config",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The provider a run will use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderSelection {
    /// Use the configured defaults as they are
    Default,
    /// A preset from [`PROVIDERS`]
    Preset { label: String, base_url: String },
    /// An OpenAI-compatible endpoint entered by the user
    CustomOpenai {
        base_url: String,
        quick_model: String,
        deep_model: String,
    },
    /// A saved profile
    SavedConfig { name: String, config: ConfigPatch },
}

impl ProviderSelection {
    /// Build the selection for a preset or default menu entry.
    ///
    /// Returns `None` for the custom entry, which needs further prompting.
    pub fn from_entry(entry: &ProviderEntry) -> Option<Self> {
        match entry.source {
            ProviderSource::Default => Some(Self::Default),
            ProviderSource::Preset(url) => Some(Self::Preset {
                label: entry.label.to_string(),
                base_url: url.to_string(),
            }),
            ProviderSource::CustomOpenai => None,
        }
    }

    /// Look up a preset by its lowercase key, e.g. `"anthropic"`
    pub fn preset(key: &str) -> Result<Self> {
        let key = key.trim().to_ascii_lowercase();
        PROVIDERS
            .iter()
            .filter(|entry| matches!(entry.source, ProviderSource::Preset(_)))
            .find(|entry| entry.label.to_ascii_lowercase() == key)
            .and_then(Self::from_entry)
            .ok_or(Error::UnknownProvider(key))
    }

    pub fn custom_openai(
        base_url: &str,
        quick_model: impl Into<String>,
        deep_model: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::CustomOpenai {
            base_url: crate::input::validate_base_url(base_url)?,
            quick_model: quick_model.into(),
            deep_model: deep_model.into(),
        })
    }

    pub fn saved(name: impl Into<String>, config: ConfigPatch) -> Self {
        Self::SavedConfig {
            name: name.into(),
            config,
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Default => ProviderKind::Default,
            Self::Preset { .. } => ProviderKind::Preset,
            Self::CustomOpenai { .. } => ProviderKind::CustomOpenai,
            Self::SavedConfig { .. } => ProviderKind::SavedConfig,
        }
    }

    /// Display label; sentinel kinds use their tag
    pub fn label(&self) -> &str {
        match self {
            Self::Preset { label, .. } => label,
            other => other.kind().as_str(),
        }
    }

    /// Lowercase key used for model tables and `llm_provider`
    pub fn provider_key(&self) -> String {
        self.label().to_ascii_lowercase()
    }

    /// Endpoint carried by the selection, if it carries one
    pub fn base_url(&self) -> Option<&str> {
        match self {
            Self::Preset { base_url, .. } | Self::CustomOpenai { base_url, .. } => Some(base_url),
            Self::SavedConfig { config, .. } => config.backend_url.as_deref(),
            Self::Default => None,
        }
    }
}
