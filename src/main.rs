mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::WageScopeApp;
use eframe::egui;

const DATA_DIR: &str = "data";

fn main() -> eframe::Result {
    env_logger::init();

    // All four tables load before the window opens; any failure is
    // fatal, there is no partial dashboard.
    let tables = match data::loader::load_tables(Path::new(DATA_DIR)) {
        Ok(tables) => tables,
        Err(e) => {
            log::error!("failed to load wage datasets: {e}");
            eprintln!("error: {e}");
            eprintln!("hint: run `cargo run --bin generate_sample` to create the data files");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wagescope – Japan wage dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(WageScopeApp::new(tables)))),
    )
}
