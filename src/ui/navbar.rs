//! Static header: app title on the left, profile label on the right.
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;

pub const TITLE: &str = "User Data";

pub fn render_navbar(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(app.theme.navbar_bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title = Paragraph::new(TITLE).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );
    let profile = Paragraph::new(format!("{} ▾", app.profile_name))
        .alignment(Alignment::Right)
        .style(Style::default().fg(app.theme.navbar_fg));
    f.render_widget(title, inner);
    f.render_widget(profile, inner);
}
