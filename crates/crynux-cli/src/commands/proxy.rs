use crynux_devproxy::{ProxyConfig, serve};
use crynux_telemetry::build_sha;

use crate::cli::ProxyArgs;
use crate::client::{CliError, CliResult};

pub(crate) async fn handle_proxy(args: ProxyArgs) -> CliResult<()> {
    let config = ProxyConfig::new(args.listen, &args.prefix, &args.target)
        .map_err(|err| CliError::validation(err.to_string()))?;
    tracing::info!(build_sha = build_sha(), "starting dev proxy");
    serve(config).await.map_err(CliError::failure)
}
