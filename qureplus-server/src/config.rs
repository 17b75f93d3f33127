use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use qureplus_ai::ProviderConfig;
use qureplus_ai::models::DEFAULT_VISION_MODEL;
use qureplus_core::intake::store::DEFAULT_MAX_SESSIONS;
use qureplus_core::repositories::supabase::config::DEFAULT_BUCKET;
use qureplus_core::{Error, SupabaseConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "qureplus")]
#[command(author, version, about = "QurePlus - AI-assisted varicose vein screening service")]
pub struct Args {
    /// Address to which the HTTP server will bind
    #[arg(long, env = "QUREPLUS_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// Supabase project URL. Without it nothing is stored.
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: Option<String>,

    /// Storage bucket for analysed images
    #[arg(long, env = "QUREPLUS_STORAGE_BUCKET", default_value = DEFAULT_BUCKET)]
    pub storage_bucket: String,

    /// Create the storage bucket at startup if it does not exist yet
    #[arg(long, env = "QUREPLUS_ENSURE_BUCKET", default_value = "false")]
    pub ensure_bucket: bool,

    /// Vision model API key. Without it analyses are simulated.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_API_BASE")]
    pub openai_api_base: Option<String>,

    #[arg(long, env = "QUREPLUS_VISION_MODEL", default_value = DEFAULT_VISION_MODEL)]
    pub vision_model: String,

    /// Timeout for a single vision request, in seconds
    #[arg(long, env = "QUREPLUS_VISION_TIMEOUT_SECS", default_value_t = 60)]
    pub vision_timeout_secs: u64,

    /// Intake sessions idle for longer than this are dropped
    #[arg(long, env = "QUREPLUS_SESSION_IDLE_SECS", default_value_t = 1800)]
    pub session_idle_secs: u64,

    #[arg(long, env = "QUREPLUS_SWEEP_INTERVAL_SECS", default_value_t = 300)]
    pub sweep_interval_secs: u64,

    /// New intakes are refused once this many sessions are open
    #[arg(long, env = "QUREPLUS_MAX_SESSIONS", default_value_t = DEFAULT_MAX_SESSIONS)]
    pub max_sessions: usize,
}

impl Args {
    /// `None` unless both the Supabase URL and key are set.
    pub fn supabase_config(&self) -> Result<Option<SupabaseConfig>, Error> {
        Ok(SupabaseConfig::from_parts(
            self.supabase_url.as_deref(),
            self.supabase_anon_key.as_deref(),
        )?
        .map(|cfg| cfg.with_bucket(self.storage_bucket.clone())))
    }

    /// `None` when no API key is set; the analysis service then simulates.
    pub fn provider_config(&self) -> Option<ProviderConfig> {
        let key = self
            .openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())?;

        let mut cfg = ProviderConfig::new(key).with_model(self.vision_model.clone());
        if let Some(base) = self.openai_api_base.as_deref().filter(|b| !b.is_empty()) {
            cfg = cfg.with_api_base(base);
        }
        cfg.request_timeout_secs = self.vision_timeout_secs;
        Some(cfg)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}
