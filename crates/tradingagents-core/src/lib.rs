//! Core types for the tradingagents launcher
//!
//! This crate holds everything the interactive front-end needs that is not
//! terminal I/O:
//!
//! - [`TradingConfig`], the flat run configuration with its defaults
//! - input validation for tickers, analysis dates and endpoints
//! - the analyst roster and research depth presets
//! - the provider menu and per-provider model catalogs
//! - [`assemble_config`], which merges the answers into a configuration
//! - the [`TradingGraph`] trait the external engine is driven through
//!
//! # Example
//!
//! ```
//! use tradingagents_core::{
//!     AnalystKind, ProviderSelection, ResearchDepth, RunSelections, TradingConfig,
//!     parse_analysis_date,
//! };
//!
//! let selections = RunSelections {
//!     ticker: "NVDA".to_string(),
//!     analysis_date: parse_analysis_date("2025-07-04")?,
//!     analysts: vec![AnalystKind::Market, AnalystKind::Fundamentals],
//!     research_depth: ResearchDepth::Deep,
//!     provider: ProviderSelection::preset("openai")?,
//!     quick_think_llm: "gpt-4o-mini".to_string(),
//!     deep_think_llm: "o3".to_string(),
//! };
//!
//! let config = selections.assemble(&TradingConfig::default())?;
//! assert_eq!(config.max_debate_rounds, 5);
//! assert_eq!(config.backend_url, "https://api.openai.com/v1");
//! # Ok::<(), tradingagents_core::Error>(())
//! ```

pub mod analyst;
pub mod catalog;
pub mod config;
pub mod depth;
pub mod error;
pub mod graph;
pub mod input;
pub mod provider;
pub mod session;

pub use analyst::{AnalystKind, normalize_analysts};
pub use catalog::{ModelChoice, ModelOption, ThinkingTier, model_choice, model_options};
pub use config::{ConfigPatch, TradingConfig, TradingConfigBuilder};
pub use depth::ResearchDepth;
pub use error::{Error, Result};
pub use graph::{GraphLaunch, Propagation, TradingGraph};
pub use input::{normalize_ticker, parse_analysis_date, validate_base_url};
pub use provider::{PROVIDERS, ProviderEntry, ProviderKind, ProviderSelection, ProviderSource};
pub use session::{RunSelections, assemble_config};
