use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use qureplus_server::{Args, run_server};

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("qureplus=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a missing .env is fine; real environment variables still apply
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!(
        "QurePlus starting. bind={}, supabase={}, vision_key={}",
        args.bind_addr,
        args.supabase_url.is_some(),
        args.openai_api_key.is_some()
    );

    if let Err(e) = run_server(args).await {
        error!("Server error: {:?}", e);
        return Err(e.into());
    }
    info!("Main finished. Goodbye!");
    Ok(())
}
