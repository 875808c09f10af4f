use anyhow::Result;

use smartcard_reader::{gui::app::run_gui, AppConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting SmartCard Reader GUI...");
    run_gui(AppConfig::default())
}
