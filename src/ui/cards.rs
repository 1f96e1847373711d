//! The card grid, plus the loading and error states that replace it.
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::app::{AppState, LoadState};
use crate::model::{User, yes_no};

pub const CARD_WIDTH: u16 = 30;
/// Six content lines plus borders.
pub const CARD_HEIGHT: u16 = 8;

/// Text content of one card.
pub fn card_lines(user: &User) -> Vec<Line<'static>> {
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(value),
        ])
    };
    vec![
        Line::from(Span::styled(
            user.full_name(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        field("Username", user.username.clone()),
        field("Age", user.age.map(|a| a.to_string()).unwrap_or_default()),
        field("Marital Status", user.marital_status.to_string()),
        field("Employed", yes_no(user.is_employed).to_string()),
        field("Founder", yes_no(user.is_founder).to_string()),
    ]
}

/// Columns and rows of cards that fit in `area`, each at least 1.
pub fn grid_shape(area: Rect) -> (usize, usize) {
    let cols = (area.width / CARD_WIDTH).max(1) as usize;
    let rows = (area.height / CARD_HEIGHT).max(1) as usize;
    (cols, rows)
}

pub fn render_body(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .title(match app.active_query.is_empty() {
            true => "Users".to_string(),
            false => format!("Users matching '{}'", app.active_query),
        })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.load.clone() {
        LoadState::Loading => {
            let p = Paragraph::new("Loading users...")
                .style(Style::default().fg(app.theme.muted));
            f.render_widget(p, inner);
        }
        LoadState::Failed(msg) => {
            let p = Paragraph::new(msg)
                .wrap(Wrap { trim: false })
                .style(Style::default().fg(app.theme.error));
            f.render_widget(p, inner);
        }
        LoadState::Ready if app.visible.is_empty() => {
            let p = Paragraph::new("No users to show.")
                .style(Style::default().fg(app.theme.muted));
            f.render_widget(p, inner);
        }
        LoadState::Ready => render_cards(f, inner, app),
    }
}

fn render_cards(f: &mut Frame, area: Rect, app: &mut AppState) {
    let (cols, rows) = grid_shape(area);
    app.columns = cols;
    app.cards_per_page = cols * rows;

    let per_page = app.cards_per_page;
    let start = (app.selected_index / per_page) * per_page;
    let end = (start + per_page).min(app.visible.len());
    let card_w = area.width / cols as u16;

    for (slot, abs_index) in (start..end).enumerate() {
        let Some(record) = app.store.get(app.visible[abs_index]) else {
            continue;
        };
        let rect = Rect {
            x: area.x + (slot % cols) as u16 * card_w,
            y: area.y + (slot / cols) as u16 * CARD_HEIGHT,
            width: card_w,
            height: CARD_HEIGHT.min(area.height),
        };
        let selected = abs_index == app.selected_index;
        let border = if selected {
            Style::default().fg(app.theme.selected_border)
        } else {
            Style::default().fg(app.theme.card_border)
        };
        let card = Paragraph::new(card_lines(&record.user))
            .style(Style::default().fg(app.theme.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(if selected { BorderType::Thick } else { BorderType::Rounded })
                    .border_style(border),
            );
        f.render_widget(card, rect);
    }
}
