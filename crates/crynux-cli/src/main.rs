//! `crynux-webui` binary entrypoint.

#[tokio::main]
async fn main() {
    let code = crynux_cli::run().await;
    std::process::exit(code);
}
