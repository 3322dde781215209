use crate::catalog::BookCatalog;
use crate::search::{BounceLatch, EmptyStateEffects, PreviewCard, SearchState, View};
use crate::tui::bounce::BounceAnimation;
use crate::tui::cards::CardListState;
use crate::tui::input::{InputAction, InputState};
use crate::tui::ui;
use crate::worker::FetchWorker;
use crate::AppConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Which part of the page receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
}

pub struct App {
    pub search: SearchState,
    pub input: InputState,
    pub focus: Focus,
    pub cards: CardListState,

    // Empty-state bounce
    pub bounce: BounceLatch,
    pub animation: Option<BounceAnimation>,

    pub status_message: String,
    worker: FetchWorker,

    pub should_quit: bool,
}

impl App {
    /// Mount the view: state starts with the initial query, which is submitted right away.
    pub fn new(config: &AppConfig, catalog: Arc<dyn BookCatalog>) -> Self {
        let search = SearchState::new(config.initial_query.clone());
        let input = InputState::at_end(&search.query);

        let mut app = Self {
            search,
            input,
            focus: Focus::Input,
            cards: CardListState::default(),
            bounce: BounceLatch::default(),
            animation: None,
            status_message: "Ready".to_string(),
            worker: FetchWorker::new(catalog),
            should_quit: false,
        };

        let initial = config.initial_query.clone();
        app.submit(&initial);
        app
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.frame_drawn();

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Submit `raw` through the search gate and hand it to the worker.
    pub fn submit(&mut self, raw: &str) {
        if let Some(query) = self.search.begin_fetch(raw) {
            self.status_message = format!("Searching for \"{}\"...", query);
            self.worker.dispatch(query);
        }
    }

    fn submit_form(&mut self) {
        let raw = self.search.query.clone();
        self.submit(&raw);
    }

    /// Apply finished requests
    pub fn process_messages(&mut self) {
        if !self.worker.drain_into(&mut self.search) {
            return;
        }

        let total = self.search.results().len();
        self.cards.reset(total);
        let query = self.search.previous_query().unwrap_or_default();
        self.status_message = format!("{} books for \"{}\"", total, query);
    }

    /// Advance the bounce after a frame reached the screen
    pub fn frame_drawn(&mut self) {
        if let Some(animation) = self.animation.as_mut() {
            if animation.frame_drawn() {
                self.animation = None;
                self.bounce.animation_finished();
            }
        }
    }

    /// Horizontal offset of the input box for the next frame
    pub fn bounce_offset(&self) -> u16 {
        self.animation.as_ref().map(|a| a.offset()).unwrap_or(0)
    }

    /// The empty state's call to action
    pub fn activate_empty_state(&mut self) {
        let effects: EmptyStateEffects = match self.search.view() {
            View::Empty(empty) => empty.activate(&mut self.bounce),
            _ => return,
        };

        if effects.focus_input {
            self.focus = Focus::Input;
        }
        if effects.clear_query {
            self.input.clear(&mut self.search.query);
        }
        if effects.start_bounce {
            self.animation = Some(BounceAnimation::new());
        }
    }

    fn selected_link(&self) -> Option<String> {
        let index = self.cards.selected?;
        let item = self.search.results().get(index)?;
        PreviewCard::from(item).preview_link.map(str::to_string)
    }

    fn open_selected(&mut self) {
        let Some(link) = self.selected_link() else {
            self.status_message = "No preview link for this book".to_string();
            return;
        };
        match open::that_detached(&link) {
            Ok(()) => {
                info!(%link, "opened preview link");
                self.status_message = "Opened preview link".to_string();
            }
            Err(e) => {
                warn!(%link, error = %e, "failed to open preview link");
                self.status_message = format!("Could not open link: {}", e);
            }
        }
    }

    fn copy_selected(&mut self) {
        let Some(link) = self.selected_link() else {
            self.status_message = "No preview link for this book".to_string();
            return;
        };
        let copied = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(link));
        self.status_message = match copied {
            Ok(()) => "Copied preview link".to_string(),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                format!("Could not copy link: {}", e)
            }
        };
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Results => self.handle_results_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match self.input.handle_key(&mut self.search.query, key) {
            InputAction::Submit => self.submit_form(),
            InputAction::Leave => self.focus = Focus::Results,
            InputAction::Edited | InputAction::Ignored => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        let total = self.search.results().len();
        let showing_list = matches!(self.search.view(), View::Results(_));

        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('/') => {
                self.focus = Focus::Input;
            }
            KeyCode::Enter | KeyCode::Char(' ') if !showing_list => {
                self.activate_empty_state();
            }
            KeyCode::Up | KeyCode::Char('k') if showing_list => self.cards.select_prev(),
            KeyCode::Down | KeyCode::Char('j') if showing_list => self.cards.select_next(total),
            KeyCode::PageUp if showing_list => self.cards.page_up(),
            KeyCode::PageDown if showing_list => self.cards.page_down(total),
            KeyCode::Home if showing_list => self.cards.select_first(),
            KeyCode::End if showing_list => self.cards.select_last(total),
            KeyCode::Enter | KeyCode::Char('o') if showing_list => self.open_selected(),
            KeyCode::Char('y') if showing_list => self.copy_selected(),

            // Any other printable char focuses the input and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focus = Focus::Input;
                self.input.cursor_pos = self.search.query.len();
                self.input.insert(&mut self.search.query, c);
            }

            _ => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::search::state::tests::{books, ScriptedCatalog};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Block until the in-flight request has been applied
    pub(crate) fn settle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.search.is_fetching() && Instant::now() < deadline {
            app.process_messages();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!app.search.is_fetching(), "request did not finish");
    }

    pub(crate) fn app_with(
        answers: impl IntoIterator<Item = Result<Vec<crate::ResultItem>, SearchError>>,
    ) -> (App, Arc<ScriptedCatalog>) {
        let catalog = Arc::new(ScriptedCatalog::answering(answers));
        let app = App::new(&AppConfig::default(), catalog.clone());
        (app, catalog)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn mount_fetches_initial_query() {
        let (mut app, catalog) = app_with([Ok(books(3))]);
        assert!(app.search.is_fetching());
        assert_eq!(app.search.query, "React");

        settle(&mut app);

        assert_eq!(app.search.previous_query(), Some("React"));
        assert_eq!(app.search.results().len(), 3);
        assert_eq!(app.cards.selected, Some(0));
        assert_eq!(catalog.call_count(), 1);
    }

    #[test]
    fn status_bar_reports_each_completed_search() {
        let (mut app, _) = app_with([Ok(books(2)), Err(SearchError::request_failed("offline"))]);
        assert_eq!(app.status_message, "Searching for \"React\"...");
        settle(&mut app);
        assert_eq!(app.status_message, "2 books for \"React\"");

        app.submit("Dune");
        settle(&mut app);
        assert_eq!(app.status_message, "0 books for \"Dune\"");
    }

    #[test]
    fn enter_while_loading_is_dropped() {
        let (mut app, catalog) = app_with([Ok(books(1)), Ok(books(1))]);
        app.input.clear(&mut app.search.query);
        type_str(&mut app, "dune");
        app.handle_key(press(KeyCode::Enter));
        app.handle_key(press(KeyCode::Enter));

        settle(&mut app);
        assert_eq!(catalog.call_count(), 1);
        assert_eq!(app.search.previous_query(), Some("React"));
    }

    #[test]
    fn enter_submits_the_typed_query() {
        let (mut app, catalog) = app_with([Ok(books(3)), Ok(Vec::new())]);
        settle(&mut app);

        app.input.clear(&mut app.search.query);
        type_str(&mut app, "  xyzzy-nonexistent-9999 ");
        app.handle_key(press(KeyCode::Enter));
        settle(&mut app);

        assert_eq!(catalog.calls.lock()[1], "xyzzy-nonexistent-9999");
        assert!(app.search.results().is_empty());
        assert_eq!(app.cards.selected, None);
    }

    #[test]
    fn empty_state_action_after_search_clears_and_focuses() {
        let (mut app, _) = app_with([Ok(Vec::new())]);
        settle(&mut app);
        app.focus = Focus::Results;

        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.focus, Focus::Input);
        assert!(app.search.query.is_empty());
        assert!(app.bounce.is_playing());
        assert!(app.animation.is_some());
        assert!(!app.search.is_fetching());
    }

    #[test]
    fn empty_state_action_before_any_search_keeps_text() {
        let (mut app, _) = app_with([]);
        // Still loading, so put the state back to "never searched" by hand
        let mut fresh = SearchState::new("tolkien");
        std::mem::swap(&mut app.search, &mut fresh);
        app.focus = Focus::Results;

        app.activate_empty_state();

        assert_eq!(app.focus, Focus::Input);
        assert_eq!(app.search.query, "tolkien");
        assert!(app.bounce.is_playing());
    }

    #[test]
    fn repeated_activation_does_not_restart_bounce() {
        let (mut app, _) = app_with([Ok(Vec::new())]);
        settle(&mut app);

        app.activate_empty_state();
        app.frame_drawn();
        app.frame_drawn();
        let offset = app.bounce_offset();
        app.activate_empty_state();

        assert_eq!(app.bounce_offset(), offset);
        assert!(app.bounce.is_playing());
    }

    #[test]
    fn bounce_ends_when_animation_finishes() {
        let (mut app, _) = app_with([Ok(Vec::new())]);
        settle(&mut app);
        app.activate_empty_state();

        for _ in 0..64 {
            app.frame_drawn();
        }

        assert!(!app.bounce.is_playing());
        assert!(app.animation.is_none());
        app.activate_empty_state();
        assert!(app.bounce.is_playing());
    }

    #[test]
    fn failed_search_shows_empty_state_for_query() {
        let (mut app, _) = app_with([Err(SearchError::request_failed("offline"))]);
        settle(&mut app);

        match app.search.view() {
            View::Empty(empty) => assert_eq!(empty.message(), "No Books Found for \"React\""),
            other => panic!("expected empty state, got {:?}", other),
        }
    }

    #[test]
    fn list_navigation_and_refocus() {
        let (mut app, _) = app_with([Ok(books(4))]);
        settle(&mut app);

        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Results);
        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.cards.selected, Some(2));
        app.handle_key(press(KeyCode::End));
        assert_eq!(app.cards.selected, Some(3));

        app.handle_key(press(KeyCode::Char('x')));
        assert_eq!(app.focus, Focus::Input);
        assert_eq!(app.search.query, "Reactx");
    }

    #[test]
    fn esc_quits() {
        let (mut app, _) = app_with([]);
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
