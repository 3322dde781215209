pub mod app;
pub mod bounce;
pub mod cards;
pub mod input;
pub mod ui;

use crate::catalog::BookCatalog;
use crate::AppConfig;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;

/// Entry point: take over the terminal until the user quits
pub fn run(config: &AppConfig, catalog: Arc<dyn BookCatalog>) -> crate::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("terminal front end started");
    let mut app = app::App::new(config, catalog);
    let result = app.run(&mut terminal);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
