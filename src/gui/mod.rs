pub mod app;
pub mod bounce;
pub mod thumbnails;

use crate::catalog::BookCatalog;
use crate::AppConfig;
use std::sync::Arc;

pub use app::BookSearchApp;

/// Entry point: launch the native window
pub fn run(config: &AppConfig, catalog: Arc<dyn BookCatalog>) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Book Search")
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    tracing::info!("window front end started");
    let config = config.clone();
    eframe::run_native(
        "booksearch",
        native_options,
        Box::new(move |cc| Ok(Box::new(BookSearchApp::new(cc, &config, catalog)))),
    )
    .map_err(|e| crate::BookSearchError::Gui(format!("window error: {}", e)))
}
