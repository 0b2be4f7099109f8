use anyhow::Result;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

use plotmap::config::AppConfig;
use plotmap::remote::RemoteClient;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive map of a garden community's land plots", long_about = None)]
struct Cli {
    /// TOML config file; PLOTMAP_* environment variables override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the plot table and print it as JSON
    Fetch {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Launch the interactive viewer
    #[cfg(feature = "egui")]
    View,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    match cli.command {
        Some(Command::Fetch { pretty }) => fetch(config, pretty),
        #[cfg(feature = "egui")]
        Some(Command::View) => view(config),
        #[cfg(feature = "egui")]
        None => view(config),
        #[cfg(not(feature = "egui"))]
        None => fetch(config, true),
    }
}

fn fetch(config: AppConfig, pretty: bool) -> Result<()> {
    let client = RemoteClient::new(config.remote)?;
    let plots = client.fetch_plots()?;
    let json = if pretty {
        serde_json::to_string_pretty(&plots)?
    } else {
        serde_json::to_string(&plots)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(feature = "egui")]
fn view(config: AppConfig) -> Result<()> {
    use plotmap::egui_app::PlotMapApp;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "СНТ «Участки»",
        options,
        Box::new(move |cc| Ok(Box::new(PlotMapApp::new(config.remote, &cc.egui_ctx)))),
    )
    .map_err(|err| anyhow::anyhow!("Failed to start viewer: {err}"))
}
