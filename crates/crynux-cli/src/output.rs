//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

pub(crate) fn render_payload(payload: &Value, format: OutputFormat) -> CliResult<()> {
    println!("{}", format_payload(payload, format)?);
    Ok(())
}

/// Render a settings document. Objects become a two-column table; anything
/// else falls back to pretty JSON.
pub(crate) fn format_payload(payload: &Value, format: OutputFormat) -> CliResult<String> {
    match (format, payload) {
        (OutputFormat::Table, Value::Object(map)) if !map.is_empty() => {
            let width = map.keys().map(String::len).max().unwrap_or(0).max(3);
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            let mut lines = vec![format!("{:<width$}  VALUE", "KEY")];
            for (key, value) in entries {
                lines.push(format!("{key:<width$}  {}", scalar_to_string(value)));
            }
            Ok(lines.join("\n"))
        }
        (OutputFormat::Table, Value::Object(_)) => Ok("(no settings)".to_string()),
        (OutputFormat::Table, Value::Null) => Ok("(empty response)".to_string()),
        _ => serde_json::to_string_pretty(payload)
            .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}"))),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
