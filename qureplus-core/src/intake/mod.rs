//! The three-step intake: personal information, image upload, results.

pub mod controller;
pub mod state;
pub mod store;

pub use controller::IntakeController;
pub use state::{ImagePreview, IntakeStep, IntakeView, ResultView};
pub use store::SessionStore;
