use std::sync::Arc;

use assist_chat::client::RagClient;
use assist_chat::config::{ClientConfig, ServerConfig};
use assist_chat::server::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let server = ServerConfig::from_env();
    let client = RagClient::new(ClientConfig::from_env())?;

    run_server(server, Arc::new(client)).await
}
