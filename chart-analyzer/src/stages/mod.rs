pub mod vision;
pub mod prediction;

pub use vision::VisionStage;
pub use prediction::PredictionStage;
