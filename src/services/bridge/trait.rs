use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;

/// Trait for host bridges that can run in different modes
#[async_trait::async_trait]
pub trait HostBridgeTrait {
    /// Run the bridge until the host goes away
    async fn run(self: Box<Self>) -> Result<()>;
}

/// Factory function to create an appropriate host bridge based on the dry_run flag
pub fn create_host_bridge(
    config: Arc<Config>,
    dry_run: bool,
) -> Result<Box<dyn HostBridgeTrait + Send>> {
    if dry_run || config.bridge.mode == "dry_run" {
        Ok(Box::new(super::dry_run::DryRunBridge::new(config)))
    } else {
        Ok(Box::new(super::stdio::StdioBridge::new(config)?))
    }
}
