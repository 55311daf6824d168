use anyhow::Context;
use serde_json::{Map, Value};

use crate::cli::{OutputFormat, SettingsSetArgs};
use crate::client::{AppContext, CliError, CliResult, classify_transport_error};
use crate::output::render_payload;

pub(crate) async fn handle_settings_get(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let settings = ctx
        .settings
        .fetch_settings()
        .await
        .map_err(|err| classify_transport_error(err, "settings fetch"))?;
    render_payload(&settings, format)
}

pub(crate) async fn handle_settings_set(
    ctx: &AppContext,
    args: SettingsSetArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let payload = build_payload(args)?;
    let ack = ctx
        .settings
        .update_settings(&payload)
        .await
        .map_err(|err| classify_transport_error(err, "settings update"))?;
    if format == OutputFormat::Table {
        println!("Settings updated.");
    }
    render_payload(&ack, format)
}

/// Assemble the settings document from `--file` or the `--set` entries.
/// Later `--set` entries win over earlier ones with the same key.
pub(crate) fn build_payload(args: SettingsSetArgs) -> CliResult<Value> {
    if let Some(path) = args.file {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))
            .map_err(CliError::failure)?;
        return serde_json::from_str(&raw)
            .map_err(|err| CliError::validation(format!("settings file is not valid JSON: {err}")));
    }
    if args.set.is_empty() {
        return Err(CliError::validation("no settings provided"));
    }
    Ok(Value::Object(args.set.into_iter().collect::<Map<_, _>>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use crynux_webui_api::{ReqwestTransport, WebUiConfig};
    use httpmock::prelude::*;
    use serde_json::json;
    use std::io::Write;

    fn context_for(server: &MockServer) -> Result<AppContext> {
        let config = WebUiConfig::with_base_url(format!("{}/manager/v1", server.base_url()))?;
        Ok(AppContext::with_transport(ReqwestTransport::from_config(
            &config,
        )?))
    }

    fn set_args(entries: &[(&str, Value)]) -> SettingsSetArgs {
        SettingsSetArgs {
            file: None,
            set: entries
                .iter()
                .map(|(key, value)| ((*key).to_string(), value.clone()))
                .collect(),
        }
    }

    fn into_anyhow(err: CliError) -> anyhow::Error {
        anyhow!(err.display_message())
    }

    #[tokio::test]
    async fn settings_get_fetches_document() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/manager/v1/settings");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"num_staking": 3}));
        });

        handle_settings_get(&context_for(&server)?, OutputFormat::Table)
            .await
            .map_err(into_anyhow)?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn settings_set_posts_assignments() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/manager/v1/settings")
                .json_body(json!({"num_staking": 3, "label": "node-a"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"success": true}));
        });

        let args = set_args(&[("num_staking", json!(3)), ("label", json!("node-a"))]);
        handle_settings_set(&context_for(&server)?, args, OutputFormat::Json)
            .await
            .map_err(into_anyhow)?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn settings_set_sends_file_contents_verbatim() -> Result<()> {
        let document = json!({"num_staking": 2, "nested": {"keep": [true, null]}});
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "{document}")?;

        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/manager/v1/settings")
                .json_body(document.clone());
            then.status(200).body("");
        });

        let args = SettingsSetArgs {
            file: Some(file.path().to_path_buf()),
            set: Vec::new(),
        };
        handle_settings_set(&context_for(&server)?, args, OutputFormat::Table)
            .await
            .map_err(into_anyhow)?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn rejected_update_is_a_validation_error() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/manager/v1/settings");
            then.status(400)
                .body(r#"{"detail":"Node is not stopped or initializing"}"#);
        });

        let result = handle_settings_set(
            &context_for(&server)?,
            set_args(&[("num_staking", json!(1))]),
            OutputFormat::Table,
        )
        .await;

        mock.assert();
        let Err(err) = result else {
            panic!("expected rejection");
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("Node is not stopped"));
        Ok(())
    }

    #[tokio::test]
    async fn server_failure_is_reported_once() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/manager/v1/settings");
            then.status(500);
        });

        let result = handle_settings_get(&context_for(&server)?, OutputFormat::Json).await;

        mock.assert();
        assert!(matches!(result, Err(CliError::Failure(_))));
        Ok(())
    }

    #[test]
    fn later_assignments_override_earlier_ones() -> Result<()> {
        let payload = build_payload(set_args(&[
            ("num_staking", json!(1)),
            ("num_staking", json!(5)),
        ]))
        .map_err(into_anyhow)?;
        assert_eq!(payload, json!({"num_staking": 5}));
        Ok(())
    }

    #[test]
    fn invalid_file_is_a_validation_error() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "num_staking = 3")?;
        let result = build_payload(SettingsSetArgs {
            file: Some(file.path().to_path_buf()),
            set: Vec::new(),
        });
        assert!(matches!(result, Err(CliError::Validation(_))));
        Ok(())
    }

    #[test]
    fn empty_assignments_are_a_validation_error() {
        let result = build_payload(set_args(&[]));
        let Err(err) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "no settings provided");
    }
}
