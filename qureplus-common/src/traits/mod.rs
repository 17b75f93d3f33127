pub mod analysis_traits;
pub mod repository_traits;

pub use analysis_traits::ImageAnalyzer;
pub use repository_traits::LeadRepository;
