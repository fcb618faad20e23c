//! Error taxonomy for the executes core.
//!
//! Nothing in here is fatal to the host. Every variant maps onto a degraded
//! round: no spawn added, no scenario swap, or no spawn reassignment.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutesError {
    /// Bad input to a mutating call (unknown team or bombsite token,
    /// missing position, malformed spawn data …).
    #[error("validation failed: {0}")]
    Validation(String),

    /// No eligible scenario exists for the loaded map.
    #[error("no scenario available for the current map")]
    NoScenarioAvailable,

    /// Assignment was requested before any scenario was committed.
    #[error("no current scenario")]
    NoScenario,

    /// The spawn source could not produce spawns for a map.
    #[error("failed to load spawns for '{map}': {reason}")]
    Load { map: String, reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ExecutesError>;
