use clap::Parser;

#[derive(Parser)]
#[command(name = "ctree", about = "Coaching Tree — search football coaches")]
struct Cli {
    /// Write debug logs to /tmp/ctree-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Override the search service base URL from the config file.
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/ctree-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("ctree debug log started — tail -f /tmp/ctree-debug.log");
    }

    let mut config = ctree_core::config::Config::load()
        .unwrap_or_else(|_| ctree_core::config::Config::defaults());
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    ctree_tui::run(config).await
}
