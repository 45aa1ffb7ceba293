use anyhow::Result;
use clap::Parser;

use chatdock::app::{self, App};
use chatdock::config::WidgetOptions;
use chatdock::model::CornerPosition;

#[derive(Parser)]
#[command(name = "chatdock")]
#[command(version)]
#[command(about = "Dockable terminal chat widget for remote chatbot services", long_about = None)]
struct Cli {
    /// Bearer credential for the chatbot API
    #[arg(long, env = "CHATDOCK_API_KEY")]
    api_key: Option<String>,

    /// Corner to dock the widget to (bottom-right, bottom-left, top-right, top-left)
    #[arg(long)]
    position: Option<CornerPosition>,

    /// Accent color as a hex string, e.g. "#007bff"
    #[arg(long)]
    primary_color: Option<String>,

    /// Chatbot API endpoint override
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = WidgetOptions {
        api_key: cli.api_key,
        position: cli.position,
        primary_color: cli.primary_color,
        base_url: cli.base_url,
    }
    .merged_over(WidgetOptions::load()?);

    if options.api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
        anyhow::bail!("API key is required (pass --api-key or set CHATDOCK_API_KEY)");
    }

    let mut terminal = app::init_terminal()?;
    let result = App::new(options).run(&mut terminal).await;
    app::restore_terminal(&mut terminal)?;
    result
}
