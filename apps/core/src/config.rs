use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration for the analysis engine.
///
/// All configuration is passed explicitly at construction; the engine keeps
/// no process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    /// Upper bound on the duration of a single backend classification call,
    /// in seconds. Calls exceeding it fail with a timeout error.
    #[validate(range(min = 1, max = 300))]
    pub provider_timeout_secs: u64,

    /// Maximum number of image URLs accepted in a single message request.
    #[validate(range(min = 1, max = 50))]
    pub max_images: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider_timeout_secs: 30,
            max_images: 10,
        }
    }
}
