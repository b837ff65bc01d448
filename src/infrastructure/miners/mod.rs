pub mod epic;
pub mod scout;
pub mod steam;

use crate::domain::entities::offer::RawOffer;
use async_trait::async_trait;

/// A source collaborator that produces raw offer records.
///
/// Miners isolate their own failures: network or parse trouble surfaces as a
/// `MinerError` for the scan report, never as a panic, and a broken source
/// degrades to zero offers for that cycle.
#[async_trait]
pub trait Miner: Send + Sync {
    /// Human-readable name of this miner.
    fn name(&self) -> &str;

    /// Fetch the source and return raw offer records.
    async fn fetch(&self) -> Result<Vec<RawOffer>, MinerError>;
}

#[derive(Debug)]
pub enum MinerError {
    /// HTTP or network error
    Network(String),
    /// Response parsing error
    Parse(String),
    /// Configuration error
    Config(String),
}

impl std::fmt::Display for MinerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MinerError::Network(msg) => write!(f, "Network error: {msg}"),
            MinerError::Parse(msg) => write!(f, "Parse error: {msg}"),
            MinerError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for MinerError {}

pub(crate) const USER_AGENT: &str = "lootradar/0.1";

/// Per-source politeness delay. Each miner owns its own pacing; there is no
/// shared rate-limit state.
pub(crate) async fn politeness_delay() {
    tokio::time::sleep(std::time::Duration::from_millis(250)).await;
}
