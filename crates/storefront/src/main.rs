//! Storefront entry point.

use clap::Parser;
use storefront::{Cli, Config, LogFormat, Storefront};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so command output stays clean.
    match config.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() {
    // 1. Load .env, then configuration
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    // 2. Initialize tracing
    init_tracing(&config);

    // 3. Parse arguments and open the cart
    let cli = Cli::parse();
    let storefront = match Storefront::open(&config) {
        Ok(storefront) => storefront,
        Err(e) => {
            tracing::error!(error = %e, path = %config.cart_path.display(), "failed to open cart");
            std::process::exit(1);
        }
    };

    // 4. Run the command
    match storefront.execute(cli.command).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
