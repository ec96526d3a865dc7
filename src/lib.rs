pub mod error;
pub mod fetcher;
pub mod generator;
pub mod io_struct;
pub mod normalizer;
pub mod prompt;
pub mod qa_state;
pub mod server;

use qa_state::{QaConfig, QaState};
use server::startup;
use tokio::signal;

/// Build shared state and serve until the server exits or Ctrl+C arrives.
pub fn start(config: QaConfig) -> anyhow::Result<()> {
    let qa_state = QaState::new(config.clone())
        .map_err(|e| anyhow::anyhow!("Failed to build QA service: {}", e))?;

    actix_web::rt::System::new().block_on(async move {
        tokio::select! {
            res = startup(config, qa_state) => res.map_err(anyhow::Error::from),
            _ = signal::ctrl_c() => {
                log::info!("Received Ctrl+C, shutting down");
                Ok(())
            }
        }
    })
}
