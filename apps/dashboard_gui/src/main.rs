use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::DashboardApp;

#[derive(Parser, Debug)]
#[command(name = "dashboard_gui", about = "Desktop client for the team dashboard")]
struct Cli {
    /// Override the configured API base URL.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let mut settings = config::load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Team Dashboard")
            .with_inner_size([1080.0, 720.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Team Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::bootstrap(cmd_tx, ui_rx, &settings)))),
    )
}
