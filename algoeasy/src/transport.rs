//! Stable judge transport construction surface for facade consumers.

use std::sync::Arc;

use reqwest::Client;

use crate::{JudgeConfig, JudgeError, JudgeHttpTransport, JudgeTransport};

pub fn build_transport_with_config(
    config: JudgeConfig,
) -> Result<Arc<dyn JudgeTransport>, JudgeError> {
    Ok(Arc::new(JudgeHttpTransport::from_config(config)?))
}

/// Reads `ALGOEASY_*` variables, falling back to defaults for absent ones.
pub fn build_transport_from_env() -> Result<Arc<dyn JudgeTransport>, JudgeError> {
    build_transport_with_config(JudgeConfig::from_env()?)
}

/// Uses a caller-owned client, for sharing a connection pool or proxy setup.
pub fn build_transport_with_client(
    client: Client,
    config: JudgeConfig,
) -> Result<Arc<dyn JudgeTransport>, JudgeError> {
    config.validate()?;
    Ok(Arc::new(JudgeHttpTransport::new(client, config)))
}
