//! Supabase binding over its REST surfaces (PostgREST and Storage).
//!
//! Tables: `users`, `analysis_records`; view: `user_analysis_summary`;
//! bucket: `medical-images` by default.

pub mod client;
pub mod config;
pub mod lead_repository;
pub mod storage;

pub use client::SupabaseClient;
pub use config::SupabaseConfig;
pub use lead_repository::SupabaseLeadRepository;
