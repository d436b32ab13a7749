use std::net::{IpAddr, SocketAddr};

use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::mock::{spawn_mock, MockState};

#[derive(Subcommand)]
pub enum MockCommands {
    #[command(about = "Serve the mock backend until interrupted")]
    Serve {
        #[arg(long, help = "Port to listen on (defaults to the configured mock port)")]
        port: Option<u16>,
        #[arg(long, default_value = "127.0.0.1", help = "Address to bind")]
        host: IpAddr,
        #[arg(long, help = "Answer every request with the mock error")]
        fail: bool,
    },
}

pub async fn handle(cmd: MockCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        MockCommands::Serve { port, host, fail } => {
            let port = port.unwrap_or(config().mock.port);
            let state = if fail { MockState::failing() } else { MockState::new() };
            let server = spawn_mock(state, SocketAddr::new(host, port)).await?;

            output_success(
                &output_format,
                &format!("Mock backend listening on {}", server.base_url()),
                Some(json!({ "url": server.base_url(), "failing": fail })),
            )?;

            tokio::signal::ctrl_c().await?;
            let served = server.state().requests().len();
            server.shutdown().await;
            tracing::info!("mock backend stopped after {} request(s)", served);
            Ok(())
        }
    }
}
