//! Turning the user's answers into a run configuration

use crate::analyst::AnalystKind;
use crate::config::TradingConfig;
use crate::depth::ResearchDepth;
use crate::error::Result;
use crate::provider::ProviderSelection;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything gathered during setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSelections {
    pub ticker: String,
    pub analysis_date: NaiveDate,
    pub analysts: Vec<AnalystKind>,
    pub research_depth: ResearchDepth,
    pub provider: ProviderSelection,
    pub quick_think_llm: String,
    pub deep_think_llm: String,
}

impl RunSelections {
    /// See [`assemble_config`]
    pub fn assemble(&self, base: &TradingConfig) -> Result<TradingConfig> {
        assemble_config(base, self)
    }
}

/// Copy the selections onto `base`.
///
/// A saved profile is overlaid first. Presets and custom endpoints replace
/// the provider and backend; custom endpoints always go through the OpenAI
/// client. The default and saved kinds keep what the base or profile names.
pub fn assemble_config(base: &TradingConfig, selections: &RunSelections) -> Result<TradingConfig> {
    let mut config = match &selections.provider {
        ProviderSelection::SavedConfig { config: patch, .. } => base.clone().with_patch(patch),
        _ => base.clone(),
    };

    let rounds = selections.research_depth.rounds();
    config.max_debate_rounds = rounds;
    config.max_risk_discuss_rounds = rounds;
    config.quick_think_llm.clone_from(&selections.quick_think_llm);
    config.deep_think_llm.clone_from(&selections.deep_think_llm);

    match &selections.provider {
        ProviderSelection::Preset { base_url, .. } => {
            config.llm_provider = selections.provider.provider_key();
            config.backend_url.clone_from(base_url);
        }
        ProviderSelection::CustomOpenai { base_url, .. } => {
            config.llm_provider = crate::config::DEFAULT_LLM_PROVIDER.to_string();
            config.backend_url.clone_from(base_url);
        }
        ProviderSelection::Default | ProviderSelection::SavedConfig { .. } => {}
    }

    debug!(
        provider = %config.llm_provider,
        kind = %selections.provider.kind(),
        rounds,
        "Assembled run configuration"
    );

    config.validate()?;
    Ok(config)
}
