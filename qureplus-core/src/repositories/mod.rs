pub mod supabase;

pub use supabase::{SupabaseClient, SupabaseConfig, SupabaseLeadRepository};
