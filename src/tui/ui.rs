use crate::search::{
    EmptyState, PreviewCard, ResultItem, View, HEADING, INPUT_LABEL, LOADING_TEXT,
};
use crate::tui::app::{App, Focus};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

/// Lines a card takes in the list, separator included
const CARD_HEIGHT: u16 = 5;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Label
            Constraint::Length(3), // Search input
            Constraint::Min(3),    // Result area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(HEADING).style(Style::default().add_modifier(Modifier::BOLD)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(INPUT_LABEL).style(Style::default().fg(Color::Gray)),
        chunks[1],
    );

    let input_area = draw_search_bar(frame, app, chunks[2]);

    match app.search.view() {
        View::Loading => draw_loading(frame, chunks[3]),
        View::Results(items) => {
            app.cards.visible_cards = (chunks[3].height / CARD_HEIGHT).max(1) as usize;
            draw_cards(frame, items, app.cards.selected, app.cards.scroll_offset, app.focus, chunks[3]);
        }
        View::Empty(empty) => draw_empty_state(frame, &empty, app.focus, chunks[3]),
    }

    draw_status_bar(frame, app, chunks[4]);

    if app.focus == Focus::Input {
        // Border (1) + leading space (1)
        let max_x = input_area.x + input_area.width.saturating_sub(2);
        let cursor_x = (input_area.x + 2 + app.input.cursor_column(&app.search.query)).min(max_x);
        let cursor_y = input_area.y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

/// Draws the input box, shifted by the bounce offset. Returns where it ended up.
fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) -> Rect {
    let offset = app.bounce_offset().min(area.width.saturating_sub(10));
    let input_area = Rect::new(area.x + offset, area.y, area.width - offset, area.height);

    let border_style = if app.animation.is_some() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if app.focus == Focus::Input {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ")
        .title(Line::from(" [ Submit \u{23CE} ] ").right_aligned());

    let paragraph = Paragraph::new(format!(" {}", app.search.query))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, input_area);
    input_area
}

fn draw_loading(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(LOADING_TEXT)
        .alignment(Alignment::Center)
        .block(Block::default().padding(ratatui::widgets::Padding::top(1)));
    frame.render_widget(paragraph, area);
}

fn card_item(item: &ResultItem) -> ListItem<'_> {
    let card = PreviewCard::from(item);
    let mut lines: Vec<Line> = Vec::with_capacity(CARD_HEIGHT as usize);

    if let Some(title) = card.title {
        lines.push(Line::styled(
            title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(authors) = card.authors {
        lines.push(Line::styled(authors, Style::default().fg(Color::Gray)));
    }
    if let Some(thumbnail) = card.thumbnail_url {
        lines.push(Line::from(vec![
            Span::styled("\u{1F5BC}\u{FE0F} ", Style::default()),
            Span::styled(thumbnail, Style::default().fg(Color::DarkGray)),
        ]));
    }
    if let Some(link) = card.preview_link {
        lines.push(Line::from(vec![
            Span::raw("\u{1F517} "),
            Span::styled(
                link,
                Style::default().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    lines.push(Line::raw(""));

    ListItem::new(lines)
}

fn draw_cards(
    frame: &mut Frame,
    items: &[ResultItem],
    selected: Option<usize>,
    scroll_offset: usize,
    focus: Focus,
    area: Rect,
) {
    let list_items: Vec<ListItem> = items.iter().map(card_item).collect();

    let highlight = if focus == Focus::Results {
        Style::default().bg(Color::Rgb(60, 60, 80))
    } else {
        Style::default()
    };

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} books ", items.len())),
        )
        .highlight_style(highlight)
        .highlight_symbol("\u{25B6} ");

    let mut state = ListState::default()
        .with_offset(scroll_offset)
        .with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_empty_state(frame: &mut Frame, empty: &EmptyState, focus: Focus, area: Rect) {
    let button_style = if focus == Focus::Results {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let text = vec![
        Line::raw(""),
        Line::styled(empty.message(), Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled(format!("[ {} ]", empty.button_label()), button_style),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match (app.focus, app.search.view()) {
        (Focus::Input, _) => "Enter search \u{2022} Tab results \u{2022} Esc quit",
        (Focus::Results, View::Results(_)) => {
            "\u{2191}\u{2193} select \u{2022} o open \u{2022} y copy link \u{2022} Tab input \u{2022} Esc quit"
        }
        (Focus::Results, _) => "Enter activate \u{2022} Tab input \u{2022} Esc quit",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.status_message),
            Style::default().fg(Color::White).bg(Color::Rgb(40, 40, 50)),
        ),
        Span::styled(format!(" {}", hints), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
