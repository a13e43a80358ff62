//! Plain-table recap printed before the engine starts

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use tradingagents_core::{RunSelections, TradingConfig};

fn table(header: [&str; 2]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

/// Selections plus the settings they resolved to
pub fn render_run(selections: &RunSelections, config: &TradingConfig) -> String {
    let analysts = selections
        .analysts
        .iter()
        .map(|kind| kind.display_name())
        .collect::<Vec<_>>()
        .join(", ");

    let mut table = table(["Setting", "Value"]);
    for (name, value) in [
        ("Ticker", selections.ticker.clone()),
        ("Analysis date", selections.analysis_date.to_string()),
        ("Analysts", analysts),
        (
            "Research depth",
            format!(
                "{} ({} rounds)",
                selections.research_depth,
                selections.research_depth.rounds()
            ),
        ),
        ("Provider", format!("{} [{}]", config.llm_provider, selections.provider.kind())),
        ("Backend URL", config.backend_url.clone()),
        ("Quick-thinking model", config.quick_think_llm.clone()),
        ("Deep-thinking model", config.deep_think_llm.clone()),
        ("Online tools", config.online_tools.to_string()),
        ("Results dir", config.results_dir.display().to_string()),
    ] {
        table.add_row(vec![name.to_string(), value]);
    }
    table.to_string()
}

/// Every configuration key with its value
pub fn render_config(config: &TradingConfig) -> String {
    let mut table = table(["Key", "Value"]);
    if let Ok(serde_json::Value::Object(entries)) = serde_json::to_value(config) {
        for (key, value) in entries {
            let value = match value {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            };
            table.add_row(vec![key, value]);
        }
    }
    table.to_string()
}
