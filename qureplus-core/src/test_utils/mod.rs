//! In-memory stand-ins used by tests across the workspace.

pub mod analyzer;
pub mod memory;

pub use analyzer::FixedAnalyzer;
pub use memory::InMemoryLeadRepository;
