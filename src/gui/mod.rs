//! GUI module
//!
//! egui-based graphical user interface.

mod app;

use anyhow::Result;

/// Run the GUI application
pub fn run() -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 640.0])
            .with_min_inner_size([560.0, 480.0])
            .with_title("HashShield"),
        ..Default::default()
    };

    eframe::run_native(
        "HashShield",
        options,
        Box::new(|cc| Ok(Box::new(app::HashShieldApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
}
