// main.rs
mod audio_player;
mod fretboard;
mod gui;
mod karplus_strong;
mod music_theory;
mod scale;
mod tuner;

use eframe::egui;
use gui::gui::FretboardApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1150.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Fretboard Mode Explorer",
        options,
        Box::new(|cc| Ok(Box::new(FretboardApp::new(cc)))),
    )
}
