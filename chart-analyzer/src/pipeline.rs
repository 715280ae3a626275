use crate::fetcher::StageFetcher;
use crate::normalizer::normalize_image;
use crate::stages::{PredictionStage, VisionStage};
use crate::traits::ModelStage;
use crate::types::{AnalysisResult, AnalyzerConfig, AnalyzerError, ErrorKind, PipelineOutcome, Result};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument, Span};
use uuid::Uuid;

/// Runs normalize -> vision -> prediction for one image.
///
/// Stages run strictly in order and the first failure ends the run. Every
/// error, including a panicking stage, is folded into a
/// `PipelineOutcome::Failure`; nothing escapes `run`. Dropping the future
/// returned by `run` cancels the in-flight stage and no later stage starts.
pub struct AnalysisPipeline {
    vision: Box<dyn ModelStage>,
    prediction: Box<dyn ModelStage>,
    span: Span,
}

impl AnalysisPipeline {
    pub fn new(vision: Box<dyn ModelStage>, prediction: Box<dyn ModelStage>) -> Self {
        Self {
            vision,
            prediction,
            span: info_span!("chart_pipeline"),
        }
    }

    /// Both stages over one shared HTTP client built from `config`.
    pub fn from_config(config: AnalyzerConfig) -> Result<Self> {
        PipelineBuilder::new(config).build()
    }

    /// Parent span for every run's logging.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn stage_names(&self) -> Vec<String> {
        vec![self.vision.stage_name(), self.prediction.stage_name()]
    }

    pub async fn run(&self, image: Option<&str>) -> PipelineOutcome {
        let request_id = Uuid::new_v4();
        let span = info_span!(parent: &self.span, "analysis", %request_id);
        self.run_stages(image).instrument(span).await
    }

    async fn run_stages(&self, image: Option<&str>) -> PipelineOutcome {
        info!("Analysis started, image length: {}", image.map(str::len).unwrap_or(0));

        let payload = match normalize_image(image) {
            Ok(payload) => payload,
            Err(e) => return Self::failed("Normalize", e),
        };
        info!("Base64 image prepared, length: {}", payload.len());

        let analysis_text = match self.invoke(self.vision.as_ref(), &payload).await {
            Ok(text) => text,
            Err(outcome) => return outcome,
        };

        let prediction_text = match self.invoke(self.prediction.as_ref(), &analysis_text).await {
            Ok(text) => text,
            Err(outcome) => return outcome,
        };

        info!("Analysis finished successfully");
        PipelineOutcome::Success(AnalysisResult {
            analysis_text,
            prediction_text,
        })
    }

    async fn invoke(&self, stage: &dyn ModelStage, input: &str) -> std::result::Result<String, PipelineOutcome> {
        let name = stage.stage_name();
        let stage_span = info_span!("stage", stage = %name, endpoint = %stage.endpoint());

        let result = AssertUnwindSafe(stage.run(input))
            .catch_unwind()
            .instrument(stage_span)
            .await;

        match result {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(Self::failed(&name, e)),
            Err(panic) => {
                let message = format!("{} stage failed unexpectedly: {}", name, panic_message(panic.as_ref()));
                error!(stage = %name, "Analysis failed: {}", message);
                Err(PipelineOutcome::failure(ErrorKind::Internal, message))
            }
        }
    }

    /// Single place failures are logged in full before being summarized.
    fn failed(stage: &str, error: AnalyzerError) -> PipelineOutcome {
        match &error {
            AnalyzerError::UpstreamHttp { status, body, .. } => {
                error!(stage, status, body = %body, "Analysis failed: {}", error);
            }
            _ => {
                error!(stage, kind = %error.kind(), "Analysis failed: {}", error);
            }
        }
        PipelineOutcome::failure(error.kind(), error.to_string())
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Pipeline builder; stages default to the HTTP clients described by the
/// config and can be swapped out individually.
pub struct PipelineBuilder {
    config: AnalyzerConfig,
    vision: Option<Box<dyn ModelStage>>,
    prediction: Option<Box<dyn ModelStage>>,
    span: Option<Span>,
}

impl PipelineBuilder {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            vision: None,
            prediction: None,
            span: None,
        }
    }

    pub fn vision_stage(mut self, stage: Box<dyn ModelStage>) -> Self {
        self.vision = Some(stage);
        self
    }

    pub fn prediction_stage(mut self, stage: Box<dyn ModelStage>) -> Self {
        self.prediction = Some(stage);
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn build(self) -> Result<AnalysisPipeline> {
        let fetcher = Arc::new(StageFetcher::new(&self.config)?);

        let vision: Box<dyn ModelStage> = match self.vision {
            Some(stage) => stage,
            None => Box::new(VisionStage::new(fetcher.clone(), self.config.vision_endpoint.clone())),
        };
        let prediction: Box<dyn ModelStage> = match self.prediction {
            Some(stage) => stage,
            None => Box::new(PredictionStage::new(fetcher, self.config.prediction_endpoint.clone())),
        };

        info!("Building analysis pipeline: {} -> {}", vision.stage_name(), prediction.stage_name());

        let pipeline = AnalysisPipeline::new(vision, prediction);
        Ok(match self.span {
            Some(span) => pipeline.with_span(span),
            None => pipeline,
        })
    }
}
