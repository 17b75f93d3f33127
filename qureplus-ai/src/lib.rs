pub mod fallback;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod service;

// Re-export public APIs
pub use fallback::simulate_analysis;
pub use models::{ModelAssessment, ProviderConfig};
pub use provider::OpenAIVisionProvider;
pub use service::AnalysisService;
