pub mod types;
pub mod config;
pub mod normalizer;
pub mod fetcher;
pub mod traits;
pub mod stages;
pub mod pipeline;
pub mod extractor;
pub mod report;
pub mod upload;
pub mod utils;
pub mod server;

pub use types::*;
pub use config::ConfigArgs;
pub use normalizer::normalize_image;
pub use fetcher::StageFetcher;
pub use traits::ModelStage;
pub use stages::{PredictionStage, VisionStage};
pub use pipeline::{AnalysisPipeline, PipelineBuilder};
pub use extractor::extract_indicators;
pub use report::render_report;
pub use upload::UploadStore;
pub use server::{build_router, AppState};
