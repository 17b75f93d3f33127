pub mod config;
pub mod context;
pub mod error;
pub mod routes;
pub mod server;
pub mod site;

pub use config::Args;
pub use context::ServerContext;
pub use error::ApiError;
pub use server::{build_router, run_server};
