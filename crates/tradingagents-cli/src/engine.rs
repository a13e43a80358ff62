//! Hand-off to the graph engine
//!
//! The engine runs out of process. [`CommandGraph`] spawns it once per call
//! and speaks line-delimited JSON over stdio:
//!
//! ```text
//! -> {"op":"propagate","ticker":"NVDA","date":"2025-07-04","launch":{...}}
//! <- {"state":{...},"decision":"BUY"}
//!
//! -> {"op":"reflect","position_returns":1000.0,"ticker":"NVDA","date":"2025-07-04",
//!     "state":{...},"launch":{...}}
//! <- (any output, or nothing)
//! ```
//!
//! The engine may log to stdout. Its output is read to the end and the last
//! line that decodes as a result wins. A reflect request carries the state of
//! the preceding propagate call.
//!
//! Without an engine command the CLI falls back to [`DryRunGraph`].

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info};
use tradingagents_core::{Error, GraphLaunch, Propagation, Result, TradingGraph};

/// Decision reported when nothing was run
pub const DRY_RUN_DECISION: &str = "DRY-RUN";

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum GraphRequest<'a> {
    Propagate {
        ticker: &'a str,
        date: NaiveDate,
        launch: &'a GraphLaunch,
    },
    Reflect {
        position_returns: f64,
        ticker: &'a str,
        date: NaiveDate,
        state: &'a serde_json::Value,
        launch: &'a GraphLaunch,
    },
}

/// The propagate call a later reflection refers to
#[derive(Debug, Clone)]
struct LastRun {
    ticker: String,
    date: NaiveDate,
    state: serde_json::Value,
}

/// Engine reached through a child process
#[derive(Debug)]
pub struct CommandGraph {
    program: String,
    args: Vec<String>,
    launch: GraphLaunch,
    last_run: Mutex<Option<LastRun>>,
}

impl CommandGraph {
    /// Split a command line on whitespace; the first word is the program
    pub fn from_command_line(command_line: &str, launch: GraphLaunch) -> Result<Self> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| Error::InvalidConfig("graph command is empty".to_string()))?;
        Ok(Self::new(program, words.collect(), launch))
    }

    pub fn new(program: impl Into<String>, args: Vec<String>, launch: GraphLaunch) -> Self {
        Self {
            program: program.into(),
            args,
            launch,
            last_run: Mutex::new(None),
        }
    }

    /// Send one request and collect the non-empty lines the engine prints
    async fn exchange(&self, request: &GraphRequest<'_>) -> Result<Vec<String>> {
        debug!("Starting graph engine: {} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Graph(format!("failed to start {}: {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Graph("failed to open engine stdin".to_string()))?;
        let mut line = serde_json::to_string(request)?;
        line.push('\n');
        stdin.write_all(line.as_bytes()).await?;
        stdin.flush().await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(Error::Graph(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl TradingGraph for CommandGraph {
    async fn propagate(&self, ticker: &str, date: NaiveDate) -> Result<Propagation> {
        info!(%ticker, %date, "Propagating through graph engine");
        let request = GraphRequest::Propagate {
            ticker,
            date,
            launch: &self.launch,
        };

        let lines = self.exchange(&request).await?;
        let result = parse_result(&lines)?;

        *self.last_run.lock().await = Some(LastRun {
            ticker: ticker.to_string(),
            date,
            state: result.state.clone(),
        });
        Ok(result)
    }

    async fn reflect_and_remember(&self, position_returns: f64) -> Result<()> {
        info!(position_returns, "Reflecting on position returns");
        let last_run = self.last_run.lock().await.clone().ok_or_else(|| {
            Error::Graph("nothing to reflect on, propagate has not run".to_string())
        })?;
        let request = GraphRequest::Reflect {
            position_returns,
            ticker: &last_run.ticker,
            date: last_run.date,
            state: &last_run.state,
            launch: &self.launch,
        };
        for line in self.exchange(&request).await? {
            debug!("Engine replied to reflect: {line}");
        }
        Ok(())
    }
}

/// The last line that decodes as a result; everything else is engine logging
fn parse_result(lines: &[String]) -> Result<Propagation> {
    let mut last_error = None;
    for line in lines.iter().rev() {
        match serde_json::from_str::<Propagation>(line) {
            Ok(result) => return Ok(result),
            Err(e) => {
                debug!("engine: {line}");
                last_error.get_or_insert(e);
            }
        }
    }

    Err(match last_error {
        Some(e) => Error::Graph(format!("unreadable engine result: {e}")),
        None => Error::Graph("engine returned no result".to_string()),
    })
}

/// Engine stand-in that runs nothing and reports what it would have sent
#[derive(Debug, Clone)]
pub struct DryRunGraph {
    launch: GraphLaunch,
}

impl DryRunGraph {
    pub fn new(launch: GraphLaunch) -> Self {
        Self { launch }
    }
}

#[async_trait]
impl TradingGraph for DryRunGraph {
    async fn propagate(&self, ticker: &str, date: NaiveDate) -> Result<Propagation> {
        info!(%ticker, %date, "Dry run, graph engine not started");
        let request = GraphRequest::Propagate {
            ticker,
            date,
            launch: &self.launch,
        };
        Ok(Propagation {
            state: serde_json::to_value(&request)?,
            decision: DRY_RUN_DECISION.to_string(),
        })
    }

    async fn reflect_and_remember(&self, position_returns: f64) -> Result<()> {
        info!(position_returns, "Dry run, skipping reflection");
        Ok(())
    }
}

/// Pick the engine for a launch
pub fn build_graph(
    command_line: Option<&str>,
    dry_run: bool,
    launch: GraphLaunch,
) -> Result<Box<dyn TradingGraph>> {
    match command_line.filter(|cmd| !cmd.trim().is_empty()) {
        Some(cmd) if !dry_run => Ok(Box::new(CommandGraph::from_command_line(cmd, launch)?)),
        _ => Ok(Box::new(DryRunGraph::new(launch))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradingagents_core::{AnalystKind, TradingConfig};

    fn launch() -> GraphLaunch {
        GraphLaunch::new(TradingConfig::default(), vec![AnalystKind::Market])
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()
    }

    fn sh(script: &str) -> CommandGraph {
        CommandGraph::new("sh", vec!["-c".to_string(), script.to_string()], launch())
    }

    #[test]
    fn test_request_wire_format() {
        let launch = launch();
        let request = GraphRequest::Propagate {
            ticker: "NVDA",
            date: date(),
            launch: &launch,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["op"], "propagate");
        assert_eq!(value["ticker"], "NVDA");
        assert_eq!(value["date"], "2025-07-04");
        assert_eq!(value["launch"]["config"]["llm_provider"], "openai");
    }

    #[test]
    fn test_from_command_line() {
        assert!(CommandGraph::from_command_line("   ", launch()).is_err());
        let graph =
            CommandGraph::from_command_line("python -m tradingagents.serve", launch()).unwrap();
        assert_eq!(graph.program, "python");
        assert_eq!(graph.args, vec!["-m", "tradingagents.serve"]);
    }

    #[tokio::test]
    async fn test_dry_run_reports_request() {
        let graph = DryRunGraph::new(launch());
        let result = graph.propagate("NVDA", date()).await.unwrap();
        assert_eq!(result.decision, DRY_RUN_DECISION);
        assert_eq!(result.state["ticker"], "NVDA");
        assert!(graph.reflect_and_remember(1000.0).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_graph_round_trip() {
        let graph = sh(r#"read line
case "$line" in
  *'"ticker":"NVDA"'*) echo '{"state":{"rounds":1},"decision":"BUY"}' ;;
  *) echo '{"decision":"SELL"}' ;;
esac"#);

        let result = graph.propagate("NVDA", date()).await.unwrap();
        assert_eq!(result.decision, "BUY");
        assert_eq!(result.state["rounds"], 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_graph_failure() {
        let graph = sh("read line; exit 3");
        let err = graph.propagate("NVDA", date()).await.unwrap_err();
        assert!(matches!(err, Error::Graph(msg) if msg.contains("exited")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_graph_garbage_output() {
        let graph = sh("read line; echo not-json");
        assert!(matches!(graph.propagate("NVDA", date()).await, Err(Error::Graph(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_graph_reads_past_logs() {
        let graph = sh(r#"read line
echo "analyst: gathering news"
echo '{"state":{"rounds":1},"decision":"HOLD"}'
sleep 0.2
echo "run finished""#);

        let result = graph.propagate("NVDA", date()).await.unwrap();
        assert_eq!(result.decision, "HOLD");
        assert_eq!(result.state["rounds"], 1);
    }

    #[test]
    fn test_parse_result_picks_last_decodable_line() {
        let lines = vec![
            r#"{"decision":"SELL"}"#.to_string(),
            "debate round 2".to_string(),
            r#"{"decision":"BUY"}"#.to_string(),
            "done".to_string(),
        ];
        assert_eq!(parse_result(&lines).unwrap().decision, "BUY");

        let err = parse_result(&["not-json".to_string()]).unwrap_err();
        assert!(err.to_string().contains("unreadable"));
        assert!(parse_result(&[]).unwrap_err().to_string().contains("no result"));
    }

    #[test]
    fn test_reflect_wire_format() {
        let launch = launch();
        let state = serde_json::json!({ "final_trade_decision": "BUY" });
        let request = GraphRequest::Reflect {
            position_returns: 1000.0,
            ticker: "NVDA",
            date: date(),
            state: &state,
            launch: &launch,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["op"], "reflect");
        assert_eq!(value["ticker"], "NVDA");
        assert_eq!(value["date"], "2025-07-04");
        assert_eq!(value["state"]["final_trade_decision"], "BUY");
    }

    #[tokio::test]
    async fn test_reflect_requires_propagation() {
        let graph = sh("read line");
        let err = graph.reflect_and_remember(1000.0).await.unwrap_err();
        assert!(matches!(err, Error::Graph(msg) if msg.contains("propagate")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reflect_sends_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("requests.log");
        let graph = sh(&format!(
            r#"read line
echo "$line" >> '{}'
echo '{{"state":{{"memo":"bullish"}},"decision":"BUY"}}'"#,
            log.display()
        ));

        graph.propagate("NVDA", date()).await.unwrap();
        graph.reflect_and_remember(-250.0).await.unwrap();

        let requests = std::fs::read_to_string(&log).unwrap();
        let reflect: serde_json::Value =
            serde_json::from_str(requests.lines().nth(1).unwrap()).unwrap();
        assert_eq!(reflect["op"], "reflect");
        assert_eq!(reflect["position_returns"], -250.0);
        assert_eq!(reflect["ticker"], "NVDA");
        assert_eq!(reflect["date"], "2025-07-04");
        assert_eq!(reflect["state"]["memo"], "bullish");
    }

    #[test]
    fn test_build_graph_falls_back_to_dry_run() {
        assert!(build_graph(None, false, launch()).is_ok());
        assert!(build_graph(Some(""), false, launch()).is_ok());
        assert!(build_graph(Some("engine"), true, launch()).is_ok());
    }
}
