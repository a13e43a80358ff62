//! Interactive setup, one prompt per step

use crate::error::{CliError, Result};
use crate::profiles::{ProfileStore, select_saved_config};
use crate::prompt::Prompter;
use chrono::{Local, NaiveDate};
use tracing::info;
use tradingagents_core::input::DATE_FORMAT;
use tradingagents_core::{
    AnalystKind, ModelChoice, PROVIDERS, ProviderKind, ProviderSelection, ProviderSource,
    ResearchDepth, RunSelections, ThinkingTier, TradingConfig, model_choice, normalize_analysts,
    normalize_ticker, parse_analysis_date, validate_base_url,
};

pub(crate) const CUSTOM_URL_DEFAULT: &str = "https://api.your-provider.com/v1";
pub(crate) const CUSTOM_QUICK_DEFAULT: &str = "gpt-4o-mini";
pub(crate) const CUSTOM_DEEP_DEFAULT: &str = "gpt-4o";

fn non_empty(hint: &'static str) -> impl Fn(&str) -> std::result::Result<(), String> {
    move |value: &str| {
        if value.trim().is_empty() {
            Err(hint.to_string())
        } else {
            Ok(())
        }
    }
}

/// Trimmed answer, or `missing` when there is none
fn required(answer: Option<String>, missing: &'static str) -> Result<String> {
    answer
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(CliError::NotProvided(missing))
}

pub fn get_ticker(prompter: &mut dyn Prompter) -> Result<String> {
    let validate = |value: &str| {
        normalize_ticker(value)
            .map(|_| ())
            .map_err(|_| "Please enter a valid ticker symbol.".to_string())
    };
    let answer = prompter.text("Enter the ticker symbol to analyze:", None, &validate)?;
    Ok(normalize_ticker(&required(answer, "ticker symbol")?)?)
}

/// Ask for the analysis date, offering today as the default
pub fn get_analysis_date(prompter: &mut dyn Prompter) -> Result<NaiveDate> {
    let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
    let validate = |value: &str| {
        parse_analysis_date(value)
            .map(|_| ())
            .map_err(|_| "Please enter a valid date in YYYY-MM-DD format.".to_string())
    };
    let answer = prompter.text("Enter the analysis date (YYYY-MM-DD):", Some(&today), &validate)?;
    Ok(parse_analysis_date(&required(answer, "date")?)?)
}

pub fn select_analysts(prompter: &mut dyn Prompter) -> Result<Vec<AnalystKind>> {
    let items: Vec<String> = AnalystKind::ALL
        .iter()
        .map(|kind| kind.display_name().to_string())
        .collect();

    let picked = prompter
        .multi_select(
            "Select Your [Analysts Team] (Space to toggle, Enter when done):",
            &items,
        )?
        .ok_or(CliError::NotSelected("analysts"))?;

    let kinds = picked
        .into_iter()
        .filter_map(|index| AnalystKind::ALL.get(index).copied());
    Ok(normalize_analysts(kinds)?)
}

pub fn select_research_depth(prompter: &mut dyn Prompter) -> Result<ResearchDepth> {
    let items: Vec<String> = ResearchDepth::ALL
        .iter()
        .map(|depth| depth.description().to_string())
        .collect();

    prompter
        .select("Select Your [Research Depth]:", &items, 0)?
        .and_then(|index| ResearchDepth::ALL.get(index).copied())
        .ok_or(CliError::NotSelected("research depth"))
}

/// Pick a provider, offering saved profiles first when any exist
pub fn select_llm_provider(
    prompter: &mut dyn Prompter,
    store: &dyn ProfileStore,
) -> Result<ProviderSelection> {
    let saved = store.list_configs()?;
    if !saved.is_empty() {
        let use_saved = prompter
            .confirm("Would you like to use a saved configuration?", false)?
            .unwrap_or(false);
        if use_saved {
            if let Some(selection) = select_saved_config(prompter, store, &saved)? {
                return Ok(selection);
            }
        }
    }

    let items: Vec<String> = PROVIDERS.iter().map(|entry| entry.label.to_string()).collect();
    let entry = prompter
        .select("Select your LLM Provider:", &items, 0)?
        .and_then(|index| PROVIDERS.get(index))
        .ok_or(CliError::NotSelected("LLM provider"))?;

    match entry.source {
        ProviderSource::Default => {
            prompter.note("Using the default configuration");
            Ok(ProviderSelection::Default)
        }
        ProviderSource::CustomOpenai => get_custom_openai_config(prompter),
        ProviderSource::Preset(url) => {
            prompter.note(&format!("You selected: {}\tURL: {url}", entry.label));
            Ok(ProviderSelection::Preset {
                label: entry.label.to_string(),
                base_url: url.to_string(),
            })
        }
    }
}

/// Ask for an OpenAI-compatible endpoint and its two model names
pub fn get_custom_openai_config(prompter: &mut dyn Prompter) -> Result<ProviderSelection> {
    prompter.note("Custom OpenAI Compatible API Configuration");

    let validate_url = |value: &str| {
        validate_base_url(value)
            .map(|_| ())
            .map_err(|_| "Please enter an http(s) base URL.".to_string())
    };
    let url = prompter.text("Enter custom API base URL:", Some(CUSTOM_URL_DEFAULT), &validate_url)?;
    let url = required(url, "URL")?;

    let validate_model = non_empty("Please enter a model name.");
    let quick = prompter.text(
        "Enter quick-thinking model name:",
        Some(CUSTOM_QUICK_DEFAULT),
        &validate_model,
    )?;
    let deep = prompter.text(
        "Enter deep-thinking model name:",
        Some(CUSTOM_DEEP_DEFAULT),
        &validate_model,
    )?;
    let quick = required(quick, "quick-thinking model name")?;
    let deep = required(deep, "deep-thinking model name")?;

    prompter.note(&format!(
        "Custom OpenAI Config:\n  URL: {url}\n  Quick Model: {quick}\n  Deep Model: {deep}"
    ));
    Ok(ProviderSelection::custom_openai(&url, quick, deep)?)
}

fn select_thinking_agent(
    prompter: &mut dyn Prompter,
    provider: &ProviderSelection,
    tier: ThinkingTier,
    defaults: &TradingConfig,
) -> Result<String> {
    match model_choice(provider, tier, defaults)? {
        ModelChoice::Fixed { model, origin } => {
            let source = match origin {
                ProviderKind::Default => "default",
                ProviderKind::CustomOpenai => "custom",
                ProviderKind::SavedConfig => "saved",
                ProviderKind::Preset => "preset",
            };
            prompter.note(&format!("Using {source} {tier} model: {model}"));
            Ok(model)
        }
        ModelChoice::Choose(options) => {
            let items: Vec<String> = options
                .iter()
                .map(|option| option.description.to_string())
                .collect();
            prompter
                .select(tier.menu_title(), &items, 0)?
                .and_then(|index| options.get(index))
                .map(|option| option.id.to_string())
                .ok_or(CliError::NotSelected(tier.engine_label()))
        }
    }
}

pub fn select_shallow_thinking_agent(
    prompter: &mut dyn Prompter,
    provider: &ProviderSelection,
    defaults: &TradingConfig,
) -> Result<String> {
    select_thinking_agent(prompter, provider, ThinkingTier::Quick, defaults)
}

pub fn select_deep_thinking_agent(
    prompter: &mut dyn Prompter,
    provider: &ProviderSelection,
    defaults: &TradingConfig,
) -> Result<String> {
    select_thinking_agent(prompter, provider, ThinkingTier::Deep, defaults)
}

/// Run every step in order
pub fn collect_selections(
    prompter: &mut dyn Prompter,
    store: &dyn ProfileStore,
    defaults: &TradingConfig,
) -> Result<RunSelections> {
    let ticker = get_ticker(prompter)?;
    let analysis_date = get_analysis_date(prompter)?;
    let analysts = select_analysts(prompter)?;
    let research_depth = select_research_depth(prompter)?;
    let provider = select_llm_provider(prompter, store)?;
    let quick_think_llm = select_shallow_thinking_agent(prompter, &provider, defaults)?;
    let deep_think_llm = select_deep_thinking_agent(prompter, &provider, defaults)?;

    info!(
        %ticker,
        %analysis_date,
        provider = provider.label(),
        kind = %provider.kind(),
        "Setup complete"
    );

    Ok(RunSelections {
        ticker,
        analysis_date,
        analysts,
        research_depth,
        provider,
        quick_think_llm,
        deep_think_llm,
    })
}
