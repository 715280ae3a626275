use crate::types::Result;
use async_trait::async_trait;

/// One sequential call to a remote model service.
#[async_trait]
pub trait ModelStage: Send + Sync {
    /// Human-readable name used in logs and error messages
    fn stage_name(&self) -> String;

    /// Endpoint the stage posts to
    fn endpoint(&self) -> String;

    /// Send `input` to the service and return the reply text verbatim
    async fn run(&self, input: &str) -> Result<String>;
}
