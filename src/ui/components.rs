//! Shared UI components (toolbar, status bar, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, LoadState, ModalState};

/// Search box on the left, add toggle hint on the right.
pub fn render_toolbar(f: &mut Frame, area: Rect, app: &AppState) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(22)])
        .split(area);

    let searching = app.input_mode == InputMode::Search;
    let text = if searching {
        format!("{}_", app.search_input)
    } else if app.search_input.is_empty() {
        "Search...".to_string()
    } else {
        app.search_input.clone()
    };
    let border = if searching { app.theme.selected_border } else { app.theme.border };
    let search = Paragraph::new(text)
        .style(Style::default().fg(if searching || !app.search_input.is_empty() {
            app.theme.text
        } else {
            app.theme.muted
        }))
        .block(
            Block::default()
                .title("Search (/)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(search, parts[0]);

    let add = Paragraph::new("+ Add User (n)")
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(add, parts[1]);
}

/// Render the bottom status bar with mode, counts and the latest notice.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Form => "FORM",
        InputMode::Modal => "MODAL",
    };
    let load = match app.load {
        LoadState::Loading => "loading",
        LoadState::Ready => "ready",
        LoadState::Failed(_) => "error",
    };
    let mut msg = format!(
        "mode: {mode}  data: {load}  showing:{}/{}",
        app.visible.len(),
        app.store.len()
    );
    if !app.active_query.is_empty() {
        msg.push_str(&format!("  query:'{}'", app.active_query));
    }
    if let Some(notice) = &app.notice {
        msg.push_str(&format!("  ! {notice}"));
    }
    msg.push_str("  ?: help");
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_delete_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    let ModalState::DeleteConfirm { id, selected } = state else {
        return;
    };
    let rect = centered_rect(50, 7, area);
    let who = app
        .store
        .get(*id)
        .map(|r| format!("'{}' ({})", r.user.full_name(), r.user.username))
        .unwrap_or_else(|| "this user".to_string());
    let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
    let no = if *selected == 1 { "[No]" } else { " No " };
    let body = format!("Delete {who}?\n\n  {yes}    {no}");
    let p = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Confirm delete")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Help overlay; key lists come from the active keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = 24u16.min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = vec![Line::from(Span::styled("Cards", bold))];
    for (label, action) in [
        ("Move", KeyAction::MoveDown),
        ("Search", KeyAction::StartSearch),
        ("Clear search", KeyAction::ClearSearch),
        ("Add user", KeyAction::NewUser),
        ("Edit user", KeyAction::EditSelection),
        ("Delete user", KeyAction::DeleteSelection),
        ("Page", KeyAction::PageDown),
        ("Help", KeyAction::OpenHelp),
        ("Quit", KeyAction::Quit),
    ] {
        let keys = match action {
            KeyAction::MoveDown => "arrows / h j k l".to_string(),
            KeyAction::PageDown => "PageUp / PageDown".to_string(),
            _ => app.keymap.keys_for(action).join(", "),
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {label:<14}")),
            Span::styled(keys, italic),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Search box", bold)));
    lines.push(Line::raw("  Type to edit, Enter applies, Esc cancels"));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Add / edit form", bold)));
    lines.push(Line::raw("  Tab / Up / Down move between fields"));
    lines.push(Line::raw("  Space / Left / Right toggle status, employed, founder"));
    lines.push(Line::raw("  Enter submits, Esc discards the draft"));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Changes live in memory only and are lost on exit.",
        Style::default().fg(app.theme.muted),
    )));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
