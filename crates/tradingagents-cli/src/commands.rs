//! Subcommand handlers

use crate::engine::{DRY_RUN_DECISION, build_graph};
use crate::error::{CliError, Result};
use crate::profiles::{DirProfileStore, ProfileStore};
use crate::prompt::TerminalPrompter;
use crate::steps::{self, CUSTOM_DEEP_DEFAULT, CUSTOM_QUICK_DEFAULT};
use crate::summary;
use anyhow::Context as _;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tradingagents_core::{
    AnalystKind, ConfigPatch, GraphLaunch, ModelChoice, Propagation, ProviderSelection,
    ResearchDepth, RunSelections, ThinkingTier, TradingConfig, TradingGraph, model_choice,
    normalize_analysts, normalize_ticker, parse_analysis_date, validate_base_url,
};

/// Fallback when no per-user config directory exists
const LOCAL_PROFILES_DIR: &str = ".tradingagents/profiles";

/// Settings shared by every subcommand
#[derive(Debug)]
pub struct AppContext {
    /// Defaults, environment and `--config` merged
    pub base: TradingConfig,
    pub store: DirProfileStore,
    pub graph_cmd: Option<String>,
    pub dry_run: bool,
    pub debug: bool,
}

impl AppContext {
    pub fn load(
        config_file: Option<&Path>,
        profiles_dir: Option<PathBuf>,
        graph_cmd: Option<String>,
        dry_run: bool,
        debug: bool,
    ) -> anyhow::Result<Self> {
        let mut base = TradingConfig::from_env();
        if let Some(path) = config_file {
            let patch = ConfigPatch::from_file(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?;
            base = base.with_patch(&patch);
        }
        base.validate().context("invalid base configuration")?;

        let profiles_dir = profiles_dir
            .or_else(tradingagents_utils::default_profiles_dir)
            .unwrap_or_else(|| PathBuf::from(LOCAL_PROFILES_DIR));
        debug!("Profile directory: {}", profiles_dir.display());

        Ok(Self {
            base,
            store: DirProfileStore::new(profiles_dir),
            graph_cmd,
            dry_run,
            debug,
        })
    }

    fn launch(&self, config: TradingConfig, analysts: Vec<AnalystKind>) -> GraphLaunch {
        GraphLaunch::new(config, analysts).with_debug(self.debug)
    }
}

/// Options for a non-interactive run
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Ticker symbol, e.g. NVDA
    #[arg(long)]
    pub ticker: String,

    /// Analysis date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Comma-separated analysts [default: all]
    #[arg(long, value_delimiter = ',')]
    pub analysts: Option<Vec<AnalystKind>>,

    /// shallow, medium, deep (or 1, 3, 5)
    #[arg(long, default_value = "shallow")]
    pub depth: ResearchDepth,

    /// default, custom, or a preset: openai, anthropic, google, openrouter, ollama
    #[arg(long, default_value = "default")]
    pub provider: String,

    /// Use a saved profile instead of --provider
    #[arg(long, conflicts_with = "provider")]
    pub profile: Option<String>,

    /// Backend URL; required with --provider custom
    #[arg(long)]
    pub backend_url: Option<String>,

    #[arg(long)]
    pub quick_model: Option<String>,

    #[arg(long)]
    pub deep_model: Option<String>,

    /// Override online_tools
    #[arg(long, value_name = "BOOL")]
    pub online_tools: Option<bool>,

    /// Position returns to reflect on after the run
    #[arg(long, value_name = "RETURNS", allow_negative_numbers = true)]
    pub reflect: Option<f64>,
}

/// Interactive setup followed by a run
pub async fn analyze(ctx: &AppContext) -> Result<()> {
    let mut prompter = TerminalPrompter::new();
    let selections = steps::collect_selections(&mut prompter, &ctx.store, &ctx.base)?;
    let config = selections.assemble(&ctx.base)?;
    launch_and_report(ctx, &selections, config, None).await
}

/// Scripted run driven entirely by flags
pub async fn run(ctx: &AppContext, args: &RunArgs) -> Result<()> {
    let selections = scripted_selections(args, &ctx.store, &ctx.base)?;
    let config = apply_run_overrides(selections.assemble(&ctx.base)?, args)?;
    launch_and_report(ctx, &selections, config, args.reflect).await
}

pub fn show_config(ctx: &AppContext, as_table: bool) -> Result<()> {
    if as_table {
        println!("{}", summary::render_config(&ctx.base));
    } else {
        println!("{}", serde_json::to_string_pretty(&ctx.base)?);
    }
    Ok(())
}

pub fn list_profiles(ctx: &AppContext) -> Result<()> {
    let names = ctx.store.list_configs()?;
    if names.is_empty() {
        println!("No saved configurations in {}", ctx.store.dir().display());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

async fn launch_and_report(
    ctx: &AppContext,
    selections: &RunSelections,
    config: TradingConfig,
    reflect: Option<f64>,
) -> Result<()> {
    println!("{}", summary::render_run(selections, &config));

    let launch = ctx.launch(config, selections.analysts.clone());
    let graph = build_graph(ctx.graph_cmd.as_deref(), ctx.dry_run, launch)?;
    let result = execute(graph.as_ref(), selections, reflect).await?;

    println!("{}", render_result(&result)?);
    Ok(())
}

/// Decision line, preceded by the request JSON when nothing was run
fn render_result(result: &Propagation) -> Result<String> {
    let decision = format!("Decision: {}", result.decision);
    if result.decision == DRY_RUN_DECISION {
        let state = serde_json::to_string_pretty(&result.state)?;
        return Ok(format!("{state}\n{decision}"));
    }
    Ok(decision)
}

/// Forward pass, then optional reflection on realised returns
pub async fn execute(
    graph: &dyn TradingGraph,
    selections: &RunSelections,
    reflect: Option<f64>,
) -> Result<Propagation> {
    let result = graph
        .propagate(&selections.ticker, selections.analysis_date)
        .await?;
    info!(decision = %result.decision, "Propagation finished");

    if let Some(returns) = reflect {
        graph.reflect_and_remember(returns).await?;
    }
    Ok(result)
}

/// Build selections from `run` flags with the same checks the prompts apply
pub fn scripted_selections(
    args: &RunArgs,
    store: &dyn ProfileStore,
    base: &TradingConfig,
) -> Result<RunSelections> {
    let ticker = normalize_ticker(&args.ticker)?;
    let analysis_date = parse_analysis_date(&args.date)?;
    let analysts = normalize_analysts(
        args.analysts
            .clone()
            .unwrap_or_else(|| AnalystKind::ALL.to_vec()),
    )?;

    let provider = match (&args.profile, args.provider.trim().to_ascii_lowercase().as_str()) {
        (Some(name), _) => ProviderSelection::saved(name.clone(), store.load(name)?),
        (None, "default") => ProviderSelection::Default,
        (None, "custom" | "custom_openai") => {
            let url = args
                .backend_url
                .as_deref()
                .ok_or(CliError::NotProvided("URL"))?;
            ProviderSelection::custom_openai(
                url,
                args.quick_model.as_deref().unwrap_or(CUSTOM_QUICK_DEFAULT),
                args.deep_model.as_deref().unwrap_or(CUSTOM_DEEP_DEFAULT),
            )?
        }
        (None, key) => ProviderSelection::preset(key)?,
    };

    let quick_think_llm = resolve_model(
        &provider,
        ThinkingTier::Quick,
        base,
        args.quick_model.as_deref(),
    )?;
    let deep_think_llm =
        resolve_model(&provider, ThinkingTier::Deep, base, args.deep_model.as_deref())?;

    Ok(RunSelections {
        ticker,
        analysis_date,
        analysts,
        research_depth: args.depth,
        provider,
        quick_think_llm,
        deep_think_llm,
    })
}

/// An explicit model wins; otherwise the fixed model or the preset's first entry
fn resolve_model(
    provider: &ProviderSelection,
    tier: ThinkingTier,
    base: &TradingConfig,
    requested: Option<&str>,
) -> Result<String> {
    let choice = model_choice(provider, tier, base)?;
    if let Some(model) = requested.map(str::trim).filter(|model| !model.is_empty()) {
        return Ok(model.to_string());
    }

    match choice {
        ModelChoice::Fixed { model, .. } => Ok(model),
        ModelChoice::Choose(options) => options
            .first()
            .map(|option| option.id.to_string())
            .ok_or(CliError::NotSelected(tier.engine_label())),
    }
}

fn apply_run_overrides(mut config: TradingConfig, args: &RunArgs) -> Result<TradingConfig> {
    if let Some(url) = &args.backend_url {
        config.backend_url = validate_base_url(url)?;
    }
    if let Some(online) = args.online_tools {
        config.online_tools = online;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::MockProfileStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Graph {}

        #[async_trait]
        impl TradingGraph for Graph {
            async fn propagate(
                &self,
                ticker: &str,
                date: NaiveDate,
            ) -> tradingagents_core::Result<Propagation>;
            async fn reflect_and_remember(
                &self,
                position_returns: f64,
            ) -> tradingagents_core::Result<()>;
        }
    }

    fn run_args(provider: &str) -> RunArgs {
        RunArgs {
            ticker: "nvda".to_string(),
            date: "2025-07-04".to_string(),
            analysts: None,
            depth: ResearchDepth::Shallow,
            provider: provider.to_string(),
            profile: None,
            backend_url: None,
            quick_model: None,
            deep_model: None,
            online_tools: None,
            reflect: None,
        }
    }

    fn empty_store() -> MockProfileStore {
        let mut store = MockProfileStore::new();
        store.expect_load().never();
        store
    }

    #[test]
    fn test_scripted_default_run() {
        let base = TradingConfig::default();
        let selections = scripted_selections(&run_args("default"), &empty_store(), &base).unwrap();

        assert_eq!(selections.ticker, "NVDA");
        assert_eq!(selections.analysts, AnalystKind::ALL.to_vec());
        assert_eq!(selections.quick_think_llm, base.quick_think_llm);
        assert_eq!(selections.deep_think_llm, base.deep_think_llm);
    }

    #[test]
    fn test_scripted_preset_picks_first_model() {
        let selections = scripted_selections(
            &run_args("Anthropic"),
            &empty_store(),
            &TradingConfig::default(),
        )
        .unwrap();
        assert_eq!(selections.quick_think_llm, "claude-3-5-haiku-latest");
        assert_eq!(selections.deep_think_llm, "claude-3-5-haiku-latest");
    }

    #[test]
    fn test_scripted_explicit_models_win() {
        let mut args = run_args("openai");
        args.quick_model = Some("gpt-4.1-mini".to_string());
        args.deep_model = Some("o3".to_string());

        let selections =
            scripted_selections(&args, &empty_store(), &TradingConfig::default()).unwrap();
        assert_eq!(selections.quick_think_llm, "gpt-4.1-mini");
        assert_eq!(selections.deep_think_llm, "o3");
    }

    #[test]
    fn test_scripted_unknown_provider() {
        let err =
            scripted_selections(&run_args("mistral"), &empty_store(), &TradingConfig::default())
                .unwrap_err();
        assert_eq!(err.to_string(), "Unknown provider: mistral");
    }

    #[test]
    fn test_scripted_custom_requires_url() {
        let err =
            scripted_selections(&run_args("custom"), &empty_store(), &TradingConfig::default())
                .unwrap_err();
        assert!(matches!(err, CliError::NotProvided("URL")));

        let mut args = run_args("custom");
        args.backend_url = Some("http://localhost:8000/v1".to_string());
        let selections =
            scripted_selections(&args, &empty_store(), &TradingConfig::default()).unwrap();
        assert_eq!(selections.quick_think_llm, CUSTOM_QUICK_DEFAULT);
        assert_eq!(selections.deep_think_llm, CUSTOM_DEEP_DEFAULT);
    }

    #[test]
    fn test_scripted_rejects_bad_date() {
        let mut args = run_args("default");
        args.date = "2025-02-30".to_string();
        assert!(scripted_selections(&args, &empty_store(), &TradingConfig::default()).is_err());
    }

    #[test]
    fn test_scripted_profile() {
        let mut store = MockProfileStore::new();
        store.expect_load().withf(|name| name.to_string() == "ark").times(1).returning(|_| {
            Ok(ConfigPatch {
                quick_think_llm: Some("doubao-seed-1-6-flash-250615".to_string()),
                deep_think_llm: Some("deepseek-r1-250528".to_string()),
                ..Default::default()
            })
        });

        let mut args = run_args("default");
        args.profile = Some("ark".to_string());
        let selections = scripted_selections(&args, &store, &TradingConfig::default()).unwrap();
        assert_eq!(selections.provider.kind(), tradingagents_core::ProviderKind::SavedConfig);
        assert_eq!(selections.deep_think_llm, "deepseek-r1-250528");
    }

    #[test]
    fn test_run_overrides_match_scripted_launch() {
        // Mirrors the scripted launch: OpenAI client against a custom endpoint.
        let mut args = run_args("default");
        args.backend_url = Some("https://ark.cn-beijing.volces.com/api/v3".to_string());
        args.online_tools = Some(false);

        let base = TradingConfig::default();
        let selections = scripted_selections(&args, &empty_store(), &base).unwrap();
        let config = apply_run_overrides(selections.assemble(&base).unwrap(), &args).unwrap();

        assert_eq!(config.llm_provider, "openai");
        assert_eq!(config.max_debate_rounds, 1);
        assert!(!config.online_tools);
    }

    #[tokio::test]
    async fn test_execute_propagates_then_reflects() {
        let mut graph = MockGraph::new();
        graph
            .expect_propagate()
            .withf(|ticker, date| ticker.to_string() == "NVDA" && date.to_string() == "2025-07-04")
            .times(1)
            .returning(|_, _| {
                Ok(Propagation {
                    state: serde_json::Value::Null,
                    decision: "BUY".to_string(),
                })
            });
        graph
            .expect_reflect_and_remember()
            .with(eq(1000.0))
            .times(1)
            .returning(|_| Ok(()));

        let selections =
            scripted_selections(&run_args("default"), &empty_store(), &TradingConfig::default())
                .unwrap();
        let result = execute(&graph, &selections, Some(1000.0)).await.unwrap();
        assert_eq!(result.decision, "BUY");
    }

    #[tokio::test]
    async fn test_execute_stops_on_engine_error() {
        let mut graph = MockGraph::new();
        graph
            .expect_propagate()
            .returning(|_, _| Err(tradingagents_core::Error::Graph("boom".to_string())));
        graph.expect_reflect_and_remember().never();

        let selections =
            scripted_selections(&run_args("default"), &empty_store(), &TradingConfig::default())
                .unwrap();
        let err = execute(&graph, &selections, Some(1.0)).await.unwrap_err();
        assert_eq!(err.to_string(), "Graph engine error: boom");
    }

    #[test]
    fn test_render_result_shows_state_for_dry_runs_only() {
        let state = serde_json::json!({ "op": "propagate", "ticker": "NVDA" });
        let dry = render_result(&Propagation {
            state: state.clone(),
            decision: DRY_RUN_DECISION.to_string(),
        })
        .unwrap();
        assert!(dry.contains(r#""ticker": "NVDA""#));
        assert!(dry.ends_with("Decision: DRY-RUN"));

        let real = render_result(&Propagation {
            state,
            decision: "BUY".to_string(),
        })
        .unwrap();
        assert_eq!(real, "Decision: BUY");
    }

    #[test]
    fn test_context_loads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "max_recur_limit": 64 }"#).unwrap();

        let ctx = AppContext::load(
            Some(path.as_path()),
            Some(dir.path().to_path_buf()),
            None,
            false,
            false,
        )
        .unwrap();
        assert_eq!(ctx.base.max_recur_limit, 64);
        assert_eq!(ctx.store.dir(), dir.path());
    }

    #[test]
    fn test_context_rejects_invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "max_recur_limit": 0 }"#).unwrap();

        let err = AppContext::load(Some(path.as_path()), None, None, false, false).unwrap_err();
        assert!(err.to_string().contains("invalid base configuration"));
    }
}
