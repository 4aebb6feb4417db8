use crate::commands::{run_outfit, run_shopping, OutfitArgs, ShoppingArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use wardrobe_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Wardrobe AI",
    about = "Run the wardrobe service or try outfit suggestions against a local catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Generate an outfit from a JSON or CSV catalog file
    Outfit(OutfitArgs),
    /// Show wardrobe gaps and curated shopping picks for a catalog file
    Shopping(ShoppingArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Outfit(args) => run_outfit(args),
        Command::Shopping(args) => run_shopping(args),
    }
}
