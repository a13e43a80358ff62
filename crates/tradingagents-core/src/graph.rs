//! Seam to the multi-agent graph engine
//!
//! The engine itself lives outside this workspace. The CLI only needs to
//! construct it from a [`GraphLaunch`] and drive it through [`TradingGraph`].

use crate::analyst::AnalystKind;
use crate::config::TradingConfig;
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the engine is constructed with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLaunch {
    pub config: TradingConfig,
    pub selected_analysts: Vec<AnalystKind>,
    #[serde(default)]
    pub debug: bool,
}

impl GraphLaunch {
    pub fn new(config: TradingConfig, selected_analysts: Vec<AnalystKind>) -> Self {
        Self {
            config,
            selected_analysts,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Result of a forward pass through the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Propagation {
    /// Final graph state, opaque to the CLI
    #[serde(default)]
    pub state: serde_json::Value,
    /// Processed trading decision, e.g. `BUY`
    pub decision: String,
}

/// The engine's entry points
#[async_trait]
pub trait TradingGraph: Send + Sync {
    /// Run the analyst, research and risk stages for one ticker and date
    async fn propagate(&self, ticker: &str, date: NaiveDate) -> Result<Propagation>;

    /// Feed realised position returns back into the agents' memories
    async fn reflect_and_remember(&self, position_returns: f64) -> Result<()>;
}
