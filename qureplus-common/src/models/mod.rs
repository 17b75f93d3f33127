// File: qureplus-common/src/models/mod.rs
pub mod analysis;
pub mod form;
pub mod image;
pub mod stage;
pub mod user;

pub use analysis::{AnalysisRecord, AnalysisResult, AnalysisSource, NewAnalysis};
pub use form::{FieldErrors, UserForm};
pub use image::ImageUpload;
pub use stage::{Stage, StageTone};
pub use user::{NewUser, UserAnalysisSummary, UserDetail, UserRecord};
