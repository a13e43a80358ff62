//! Curated model lists per preset provider

use crate::config::TradingConfig;
use crate::error::{Error, Result};
use crate::provider::{ProviderKind, ProviderSelection};
use std::fmt;

/// A selectable model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub description: &'static str,
    pub id: &'static str,
}

const fn option(description: &'static str, id: &'static str) -> ModelOption {
    ModelOption { description, id }
}

/// Which of the two model slots is being chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThinkingTier {
    Quick,
    Deep,
}

impl ThinkingTier {
    /// Menu title for the tier
    pub fn menu_title(self) -> &'static str {
        match self {
            Self::Quick => "Select Your [Quick-Thinking LLM Engine]:",
            Self::Deep => "Select Your [Deep-Thinking LLM Engine]:",
        }
    }

    /// Name used when the tier's model is missing
    pub fn engine_label(self) -> &'static str {
        match self {
            Self::Quick => "shallow thinking llm engine",
            Self::Deep => "deep thinking llm engine",
        }
    }
}

impl fmt::Display for ThinkingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quick => "quick-thinking",
            Self::Deep => "deep-thinking",
        })
    }
}

const QUICK_OPENAI: &[ModelOption] = &[
    option("GPT-4o-mini - Fast and efficient for quick tasks", "gpt-4o-mini"),
    option("GPT-4.1-nano - Ultra-lightweight model for basic operations", "gpt-4.1-nano"),
    option("GPT-4.1-mini - Compact model with good performance", "gpt-4.1-mini"),
    option("GPT-4o - Standard model with solid capabilities", "gpt-4o"),
];

const QUICK_ANTHROPIC: &[ModelOption] = &[
    option(
        "Claude Haiku 3.5 - Fast inference and standard capabilities",
        "claude-3-5-haiku-latest",
    ),
    option("Claude Sonnet 3.5 - Highly capable standard model", "claude-3-5-sonnet-latest"),
    option(
        "Claude Sonnet 3.7 - Exceptional hybrid reasoning and agentic capabilities",
        "claude-3-7-sonnet-latest",
    ),
    option("Claude Sonnet 4 - High performance and excellent reasoning", "claude-sonnet-4-0"),
];

const QUICK_GOOGLE: &[ModelOption] = &[
    option("Gemini 2.0 Flash-Lite - Cost efficiency and low latency", "gemini-2.0-flash-lite"),
    option("Gemini 2.0 Flash - Next generation features, speed, and thinking", "gemini-2.0-flash"),
    option(
        "Gemini 2.5 Flash - Adaptive thinking, cost efficiency",
        "gemini-2.5-flash-preview-05-20",
    ),
];

const QUICK_OPENROUTER: &[ModelOption] = &[
    option("Meta: Llama 4 Scout", "meta-llama/llama-4-scout:free"),
    option(
        "Meta: Llama 3.3 8B Instruct - A lightweight and ultra-fast variant of Llama 3.3 70B",
        "meta-llama/llama-3.3-8b-instruct:free",
    ),
    option(
        "google/gemini-2.0-flash-exp:free - Gemini Flash 2.0 offers a significantly faster time to first token",
        "google/gemini-2.0-flash-exp:free",
    ),
];

const QUICK_OLLAMA: &[ModelOption] = &[
    option("llama3.1 local", "llama3.1"),
    option("llama3.2 local", "llama3.2"),
];

const DEEP_OPENAI: &[ModelOption] = &[
    option("GPT-4.1-nano - Ultra-lightweight model for basic operations", "gpt-4.1-nano"),
    option("GPT-4.1-mini - Compact model with good performance", "gpt-4.1-mini"),
    option("GPT-4o - Standard model with solid capabilities", "gpt-4o"),
    option("o4-mini - Specialized reasoning model (compact)", "o4-mini"),
    option("o3-mini - Advanced reasoning model (lightweight)", "o3-mini"),
    option("o3 - Full advanced reasoning model", "o3"),
    option("o1 - Premier reasoning and problem-solving model", "o1"),
];

const DEEP_ANTHROPIC: &[ModelOption] = &[
    option(
        "Claude Haiku 3.5 - Fast inference and standard capabilities",
        "claude-3-5-haiku-latest",
    ),
    option("Claude Sonnet 3.5 - Highly capable standard model", "claude-3-5-sonnet-latest"),
    option(
        "Claude Sonnet 3.7 - Exceptional hybrid reasoning and agentic capabilities",
        "claude-3-7-sonnet-latest",
    ),
    option("Claude Sonnet 4 - High performance and excellent reasoning", "claude-sonnet-4-0"),
    option("Claude Opus 4 - Most powerful Anthropic model", "claude-opus-4-0"),
];

const DEEP_GOOGLE: &[ModelOption] = &[
    option("Gemini 2.0 Flash-Lite - Cost efficiency and low latency", "gemini-2.0-flash-lite"),
    option("Gemini 2.0 Flash - Next generation features, speed, and thinking", "gemini-2.0-flash"),
    option(
        "Gemini 2.5 Flash - Adaptive thinking, cost efficiency",
        "gemini-2.5-flash-preview-05-20",
    ),
    option("Gemini 2.5 Pro", "gemini-2.5-pro-preview-06-05"),
];

const DEEP_OPENROUTER: &[ModelOption] = &[
    option(
        "DeepSeek V3 - a 685B-parameter, mixture-of-experts model",
        "deepseek/deepseek-chat-v3-0324:free",
    ),
    option(
        "Deepseek - latest iteration of the flagship chat model family from the DeepSeek team.",
        "deepseek/deepseek-chat-v3-0324:free",
    ),
];

const DEEP_OLLAMA: &[ModelOption] = &[
    option("llama3.1 local", "llama3.1"),
    option("qwen3", "qwen3"),
];

/// Model list for a preset provider key and tier
pub fn model_options(provider_key: &str, tier: ThinkingTier) -> Option<&'static [ModelOption]> {
    let options = match (provider_key, tier) {
        ("openai", ThinkingTier::Quick) => QUICK_OPENAI,
        ("anthropic", ThinkingTier::Quick) => QUICK_ANTHROPIC,
        ("google", ThinkingTier::Quick) => QUICK_GOOGLE,
        ("openrouter", ThinkingTier::Quick) => QUICK_OPENROUTER,
        ("ollama", ThinkingTier::Quick) => QUICK_OLLAMA,
        ("openai", ThinkingTier::Deep) => DEEP_OPENAI,
        ("anthropic", ThinkingTier::Deep) => DEEP_ANTHROPIC,
        ("google", ThinkingTier::Deep) => DEEP_GOOGLE,
        ("openrouter", ThinkingTier::Deep) => DEEP_OPENROUTER,
        ("ollama", ThinkingTier::Deep) => DEEP_OLLAMA,
        _ => return None,
    };
    Some(options)
}

/// How the model for a tier gets decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice {
    /// Already determined by the selection; no menu is shown
    Fixed { model: String, origin: ProviderKind },
    /// The user picks from a preset list
    Choose(&'static [ModelOption]),
}

/// Decide how the model for `tier` is chosen.
///
/// Default, custom and saved selections never consult the preset tables.
pub fn model_choice(
    selection: &ProviderSelection,
    tier: ThinkingTier,
    defaults: &TradingConfig,
) -> Result<ModelChoice> {
    let default_model = || match tier {
        ThinkingTier::Quick => defaults.quick_think_llm.clone(),
        ThinkingTier::Deep => defaults.deep_think_llm.clone(),
    };
    let origin = selection.kind();

    let model = match selection {
        ProviderSelection::Default => default_model(),
        ProviderSelection::CustomOpenai {
            quick_model,
            deep_model,
            ..
        } => match tier {
            ThinkingTier::Quick => quick_model.clone(),
            ThinkingTier::Deep => deep_model.clone(),
        },
        ProviderSelection::SavedConfig { config, .. } => {
            let saved = match tier {
                ThinkingTier::Quick => config.quick_think_llm.clone(),
                ThinkingTier::Deep => config.deep_think_llm.clone(),
            };
            saved.unwrap_or_else(default_model)
        }
        ProviderSelection::Preset { .. } => {
            let key = selection.provider_key();
            return model_options(&key, tier)
                .map(ModelChoice::Choose)
                .ok_or(Error::UnknownProvider(selection.label().to_string()));
        }
    };

    Ok(ModelChoice::Fixed { model, origin })
}
