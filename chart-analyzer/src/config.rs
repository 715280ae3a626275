use crate::types::{AnalyzerConfig, AnalyzerError, Result};
use clap::Args;
use tracing::debug;
use url::Url;

/// Command-line and environment overrides for `AnalyzerConfig`.
/// Anything left unset keeps its default.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Vision model service endpoint
    #[arg(long, env = "VISION_API_URL")]
    pub vision_endpoint: Option<String>,

    /// Prediction model service endpoint
    #[arg(long, env = "PREDICTION_API_URL")]
    pub prediction_endpoint: Option<String>,

    /// Timeout for each model call, in seconds
    #[arg(long, env = "ANALYZER_TIMEOUT_SECONDS")]
    pub timeout_seconds: Option<u64>,

    /// Address the HTTP service listens on
    #[arg(long, env = "ANALYZER_BIND_ADDR")]
    pub bind_addr: Option<String>,

    /// Directory uploaded images are written to
    #[arg(long, env = "ANALYZER_UPLOAD_DIR")]
    pub upload_dir: Option<String>,
}

impl ConfigArgs {
    pub fn into_config(self) -> Result<AnalyzerConfig> {
        let mut config = AnalyzerConfig::default();

        if let Some(endpoint) = self.vision_endpoint {
            config.vision_endpoint = endpoint;
        }
        if let Some(endpoint) = self.prediction_endpoint {
            config.prediction_endpoint = endpoint;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        if let Some(addr) = self.bind_addr {
            config.bind_addr = addr;
        }
        if let Some(dir) = self.upload_dir {
            config.upload_dir = dir;
        }

        config.validate()?;
        Ok(config)
    }
}

impl AnalyzerConfig {
    /// Reject configurations that could never serve a request.
    pub fn validate(&self) -> Result<()> {
        for endpoint in [&self.vision_endpoint, &self.prediction_endpoint] {
            let parsed = Url::parse(endpoint)
                .map_err(|e| AnalyzerError::Validation(format!("Invalid model endpoint {}: {}", endpoint, e)))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(AnalyzerError::Validation(format!(
                    "Model endpoint must be http or https: {}",
                    endpoint
                )));
            }
        }

        if self.timeout_seconds == 0 {
            return Err(AnalyzerError::Validation("Timeout must be at least one second".to_string()));
        }

        debug!(
            "Configuration ok: vision={}, prediction={}, timeout={}s",
            self.vision_endpoint, self.prediction_endpoint, self.timeout_seconds
        );
        Ok(())
    }
}
