// src/lib.rs

pub mod export;
pub mod intake;
pub mod repositories;
pub mod services;
pub mod tasks;
pub mod test_utils;
pub mod validation;

pub use intake::{IntakeController, IntakeStep, IntakeView, SessionStore};
pub use qureplus_common::error::Error;
pub use repositories::supabase::{SupabaseClient, SupabaseConfig, SupabaseLeadRepository};
