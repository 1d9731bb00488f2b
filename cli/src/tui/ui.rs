use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;
use wellness_core::{
    model::rating::parse_rgb, KeyValueStore, Rating, PICKER_ROWS, WEEKDAY_HEADER,
};

use crate::tui::app::{App, InputMode};

const CELL_WIDTH: usize = 5;
const GRID_WIDTH: u16 = (CELL_WIDTH * 7) as u16 + 2;

pub fn swatch_color(color: &str) -> Color {
    parse_rgb(color)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Reset)
}

pub fn rating_color(rating: Rating) -> Color {
    let (r, g, b) = rating.rgb();
    Color::Rgb(r, g, b)
}

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    // Header
    let header = Paragraph::new(vec![Line::from(Span::styled(
        format!("Your progress · {}", app.calendar.month_title()),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(GRID_WIDTH), Constraint::Min(20)])
        .split(main_chunks[1]);

    draw_calendar(f, app, content_chunks[0]);
    draw_counters(f, app, content_chunks[1]);
    draw_footer(f, app, main_chunks[2]);

    if matches!(app.input_mode(), InputMode::Picking) {
        draw_picker(f, app, size);
    }
}

fn draw_calendar<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let mut lines = Vec::with_capacity(8);

    let header: Vec<Span> = WEEKDAY_HEADER
        .iter()
        .map(|d| {
            Span::styled(
                format!("{:^width$}", d, width = CELL_WIDTH),
                Style::default().add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    lines.push(Line::from(header));

    for (row_index, row) in app.grid.chunks(7).enumerate() {
        let spans: Vec<Span> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let index = row_index * 7 + col;
                let mut style = Style::default()
                    .bg(swatch_color(app.calendar.cell_color(cell)))
                    .fg(if cell.is_current() { Color::Black } else { Color::DarkGray });
                let text = if index == app.cursor {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    format!("[{:>2}] ", cell.day)
                } else {
                    format!(" {:>2}  ", cell.day)
                };
                Span::styled(text, style)
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let calendar = Paragraph::new(lines).block(
        Block::default()
            .title(" Calendar ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(calendar, area);
}

fn draw_counters<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let counts = app.calendar.aggregate_counts();

    let mut lines = vec![
        Line::from(Span::styled(
            "Your workout ratings:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (rating, count) in counts.buckets() {
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(rating_color(rating))),
            Span::raw(format!("{}: {}", rating.label(), count)),
        ]));
    }

    if let Some(cell) = app.cursor_cell() {
        let rating = app
            .calendar
            .rating_for(cell.day)
            .map(Rating::label)
            .unwrap_or("not rated yet");
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!("Day {}: ", cell.day), Style::default().fg(Color::Blue)),
            Span::raw(rating),
        ]));
    }

    let counters = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Summary ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(counters, area);
}

fn draw_footer<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let (text, style) = match &app.status {
        Some(status) => (status.clone(), Style::default().fg(Color::Yellow)),
        None => {
            let help = match app.input_mode() {
                InputMode::Normal => "←↓↑→/hjkl: Move | Enter: Rate | q: Quit",
                InputMode::Picking => "0-5: Pick | ←→/Tab: Select | Enter: Apply | Esc: Cancel",
            };
            (help.to_string(), Style::default().fg(Color::DarkGray))
        }
    };
    let footer = Paragraph::new(truncate(&text, usize::from(area.width)))
        .style(style)
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_picker<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let popup = centered_rect(area, 44, 9);
    f.render_widget(Clear, popup);

    let prompt = app.calendar.picker_prompt().unwrap_or_default();
    let selected = app.selected_swatch();

    let mut lines = vec![Line::from(prompt), Line::from("")];
    for row in PICKER_ROWS {
        let spans: Vec<Span> = row
            .iter()
            .flat_map(|&rating| {
                let mut style = Style::default()
                    .bg(rating_color(rating))
                    .fg(Color::Rgb(93, 74, 57))
                    .add_modifier(Modifier::BOLD);
                if rating == selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                [
                    Span::styled(format!("  {:^1}  ", rating.swatch_label()), style),
                    Span::raw("  "),
                ]
            })
            .collect();
        lines.push(Line::from(spans).alignment(Alignment::Center));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        selected.label(),
        Style::default().fg(Color::DarkGray),
    )));

    let picker = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Rate workout ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(picker, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vertical);
    rect
}

/// Cuts `text` to at most `width` terminal columns.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
