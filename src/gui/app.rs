//! Book search window

use crate::catalog::BookCatalog;
use crate::gui::bounce::BounceMotion;
use crate::gui::thumbnails::ThumbnailCache;
use crate::search::{
    BounceLatch, EmptyState, EmptyStateEffects, PreviewCard, ResultItem, SearchState, View,
    HEADING, INPUT_LABEL, LOADING_TEXT,
};
use crate::worker::FetchWorker;
use crate::AppConfig;
use eframe::egui;
use std::sync::Arc;

const INPUT_ID: &str = "book-search";
const THUMBNAIL_HEIGHT: f32 = 120.0;

/// Main application state
pub struct BookSearchApp {
    /// Search state for this window
    search: SearchState,
    /// Runs catalog requests off the UI thread
    worker: FetchWorker,
    /// Cover images by URL
    thumbnails: ThumbnailCache,
    /// Empty-state bounce latch
    bounce: BounceLatch,
    /// Running bounce, if any
    motion: Option<BounceMotion>,
    /// Give the input focus on the next frame
    focus_input: bool,
    /// Status bar message
    status_message: String,
}

impl BookSearchApp {
    /// Create the app and submit the initial query
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        catalog: Arc<dyn BookCatalog>,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: &AppConfig, catalog: Arc<dyn BookCatalog>) -> Self {
        let mut app = Self {
            search: SearchState::new(config.initial_query.clone()),
            worker: FetchWorker::new(catalog),
            thumbnails: ThumbnailCache::new(&config.user_agent),
            bounce: BounceLatch::default(),
            motion: None,
            focus_input: true,
            status_message: "Ready".to_string(),
        };

        let initial = config.initial_query.clone();
        app.submit(&initial);
        app
    }

    fn submit(&mut self, raw: &str) {
        if let Some(query) = self.search.begin_fetch(raw) {
            self.status_message = format!("Searching for \"{}\"...", query);
            self.worker.dispatch(query);
        }
    }

    /// Process finished requests
    fn process_messages(&mut self) {
        if self.worker.drain_into(&mut self.search) {
            let total = self.search.results().len();
            if let Some(query) = self.search.previous_query() {
                self.status_message = format!("{} books for \"{}\"", total, query);
            }
        }
    }

    /// The empty state's call to action, at UI time `now`
    fn activate_empty_state(&mut self, now: f64) {
        let effects: EmptyStateEffects = match self.search.view() {
            View::Empty(empty) => empty.activate(&mut self.bounce),
            _ => return,
        };

        if effects.focus_input {
            self.focus_input = true;
        }
        if effects.clear_query {
            self.search.query.clear();
        }
        if effects.start_bounce {
            self.motion = Some(BounceMotion::start(now));
        }
    }

    /// Current bounce offset; reports the end of the motion to the latch
    fn bounce_offset(&mut self, now: f64) -> f32 {
        let Some(motion) = self.motion else {
            return 0.0;
        };
        match motion.sample(now) {
            Some(offset) => offset,
            None => {
                self.motion = None;
                self.bounce.animation_finished();
                0.0
            }
        }
    }

    /// Render heading, label and the search form
    fn render_search_form(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        let offset = self.bounce_offset(now);

        egui::TopBottomPanel::top("search_form").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading(HEADING);
            ui.label(INPUT_LABEL);

            let mut submitted = false;
            ui.horizontal(|ui| {
                ui.add_space(offset);
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.search.query)
                        .id(egui::Id::new(INPUT_ID))
                        .desired_width((ui.available_width() - 90.0).max(80.0)),
                );

                if self.focus_input {
                    response.request_focus();
                    self.focus_input = false;
                }

                // Enter takes focus away from a single-line field; keep typing in place
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                    response.request_focus();
                }
                if ui.button("Submit").clicked() {
                    submitted = true;
                }
            });
            ui.add_space(6.0);

            if submitted {
                let raw = self.search.query.clone();
                self.submit(&raw);
            }
        });
    }

    /// Render status bar
    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.search.is_fetching() {
                    ui.spinner();
                }
                ui.label(self.status_message.as_str());
            });
        });
    }

    fn render_card(&self, ui: &mut egui::Ui, index: usize, item: &ResultItem) {
        let card = PreviewCard::from(item);
        // Ids can repeat within one response
        ui.push_id((index, card.key), |ui| {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    if let Some(url) = card.thumbnail_url {
                        if let Some(bytes) = self.thumbnails.get(url, ui.ctx()) {
                            ui.add(
                                egui::Image::from_bytes(format!("bytes://{}", url), bytes)
                                    .max_height(THUMBNAIL_HEIGHT),
                            );
                        }
                    }
                    ui.vertical(|ui| {
                        if let Some(title) = card.title {
                            ui.label(egui::RichText::new(title).strong().size(16.0));
                        }
                        if let Some(authors) = &card.authors {
                            ui.label(authors.as_str());
                        }
                        if let Some(link) = card.preview_link {
                            ui.hyperlink_to("Preview", link);
                        }
                    });
                });
            });
        });
    }

    fn render_empty_state(&self, ui: &mut egui::Ui, empty: &EmptyState<'_>) -> bool {
        let mut clicked = false;
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(egui::RichText::new(empty.message()).strong().size(18.0));
            ui.add_space(10.0);
            if ui.button(empty.button_label()).clicked() {
                clicked = true;
            }
        });
        clicked
    }

    fn render_results_area(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut activate = false;
            match self.search.view() {
                View::Loading => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.label(LOADING_TEXT);
                    });
                }
                View::Results(items) => {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for (index, item) in items.iter().enumerate() {
                                self.render_card(ui, index, item);
                            }
                        });
                }
                View::Empty(empty) => activate = self.render_empty_state(ui, &empty),
            }
            if activate {
                self.activate_empty_state(now);
            }
        });
    }
}

impl eframe::App for BookSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        self.render_search_form(ctx);
        self.render_status_bar(ctx);
        self.render_results_area(ctx);

        // Keep polling the worker and keep the bounce moving
        if self.search.is_fetching() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
        if self.motion.is_some() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::bounce::BOUNCE_SECONDS;
    use crate::search::state::tests::{books, ScriptedCatalog};
    use std::time::{Duration, Instant};

    fn app_with(answers: Vec<Result<Vec<ResultItem>, crate::SearchError>>) -> BookSearchApp {
        let catalog = Arc::new(ScriptedCatalog::answering(answers));
        BookSearchApp::with_catalog(&AppConfig::default(), catalog)
    }

    fn settle(app: &mut BookSearchApp) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.search.is_fetching() && Instant::now() < deadline {
            app.process_messages();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!app.search.is_fetching());
    }

    #[test]
    fn window_mounts_with_initial_search() {
        let mut app = app_with(vec![Ok(books(3))]);
        assert!(app.search.is_fetching());
        settle(&mut app);
        assert_eq!(app.search.results().len(), 3);
        assert_eq!(app.status_message, "3 books for \"React\"");
    }

    #[test]
    fn activation_clears_after_a_search_and_bounces_once() {
        let mut app = app_with(vec![Ok(Vec::new())]);
        settle(&mut app);
        app.focus_input = false;

        app.activate_empty_state(1.0);
        let motion_started = app.motion.map(|m| m.sample(1.15));
        app.activate_empty_state(1.1);

        assert!(app.focus_input);
        assert!(app.search.query.is_empty());
        assert!(app.bounce.is_playing());
        // Second activation did not restart the motion
        assert_eq!(app.motion.map(|m| m.sample(1.15)), motion_started);
    }

    #[test]
    fn latch_reopens_when_motion_ends() {
        let mut app = app_with(vec![Ok(Vec::new())]);
        settle(&mut app);

        app.activate_empty_state(5.0);
        assert!(app.bounce_offset(5.0 + BOUNCE_SECONDS / 4.0) > 0.0);
        assert!(app.bounce.is_playing());

        assert_eq!(app.bounce_offset(5.0 + BOUNCE_SECONDS), 0.0);
        assert!(!app.bounce.is_playing());
        assert!(app.motion.is_none());
    }

    fn screen_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0))
    }

    fn collect_text(shape: &egui::Shape, out: &mut String) {
        match shape {
            egui::Shape::Text(text) => {
                out.push_str(text.galley.text());
                out.push('\n');
            }
            egui::Shape::Vec(shapes) => {
                for shape in shapes {
                    collect_text(shape, out);
                }
            }
            _ => {}
        }
    }

    /// Run one frame and return every piece of text it painted
    fn frame_text(ctx: &egui::Context, app: &mut BookSearchApp, input: egui::RawInput) -> String {
        let output = ctx.run(input, |ctx| {
            app.render_search_form(ctx);
            app.render_status_bar(ctx);
            app.render_results_area(ctx);
        });
        let mut text = String::new();
        for clipped in &output.shapes {
            collect_text(&clipped.shape, &mut text);
        }
        text
    }

    fn plain_input() -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(screen_rect()),
            ..Default::default()
        }
    }

    fn enter_input() -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(screen_rect()),
            events: vec![egui::Event::Key {
                key: egui::Key::Enter,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn result_area_paints_exactly_one_view() {
        let mut app = app_with(vec![Ok(books(2)), Ok(Vec::new())]);
        let ctx = egui::Context::default();

        let loading = frame_text(&ctx, &mut app, plain_input());
        assert!(loading.contains(HEADING));
        assert!(loading.contains("Loading..."));
        assert!(!loading.contains("Book 0"));
        assert!(!loading.contains("No Books Found"));

        settle(&mut app);
        let results = frame_text(&ctx, &mut app, plain_input());
        assert!(results.contains("Book 0"));
        assert!(results.contains("Book 1"));
        assert!(!results.contains("Loading..."));
        assert!(!results.contains("No Books Found"));

        app.submit("nothing");
        settle(&mut app);
        let empty = frame_text(&ctx, &mut app, plain_input());
        assert!(empty.contains("No Books Found for \"nothing\""));
        assert!(empty.contains("Search again?"));
        assert!(!empty.contains("Loading..."));
        assert!(!empty.contains("Book 0"));
    }

    #[test]
    fn enter_submits_and_keeps_the_field_focused() {
        let mut app = app_with(vec![Ok(books(1)), Ok(books(1))]);
        settle(&mut app);
        let ctx = egui::Context::default();
        let input_id = egui::Id::new(INPUT_ID);

        // First frame hands the field its initial focus
        frame_text(&ctx, &mut app, plain_input());
        assert!(ctx.memory(|m| m.has_focus(input_id)));

        app.search.query = "Dune".to_string();
        frame_text(&ctx, &mut app, enter_input());

        assert!(app.search.is_fetching());
        assert!(ctx.memory(|m| m.has_focus(input_id)));
        settle(&mut app);
        assert_eq!(app.search.previous_query(), Some("Dune"));
    }
}
