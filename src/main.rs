use emailfinder::app::{App, EXIT_FAILURE};
use emailfinder::cli::Cli;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::from_args();
    init_logging(&cli);

    let code = match App::run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(category = %e.category(), "{e}");
            if cli.error_enabled() {
                eprintln!("Error: {e}");
            }
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
