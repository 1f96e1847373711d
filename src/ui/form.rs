use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::draft::field_text;
use crate::app::{AppState, DraftField, FormMode, InputMode};

/// Side panel for the add/edit form.
pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let (title, submit) = match app.form {
        FormMode::Editing(_) => ("Edit user", "Update User"),
        _ => ("Add user", "Add User"),
    };
    let focused = app.input_mode == InputMode::Form;

    let mut lines: Vec<Line> = Vec::with_capacity(DraftField::ALL.len() + 4);
    for (idx, field) in DraftField::ALL.iter().enumerate() {
        let marker = if focused && idx == app.form_field { "▶" } else { " " };
        let value = match field {
            DraftField::MaritalStatus => format!("< {} >", field_text(&app.draft, *field)),
            DraftField::IsEmployed | DraftField::IsFounder => {
                let on = match field {
                    DraftField::IsEmployed => app.draft.is_employed,
                    _ => app.draft.is_founder,
                };
                if on { "[x]".to_string() } else { "[ ]".to_string() }
            }
            _ => {
                let mut text = field_text(&app.draft, *field);
                if focused && idx == app.form_field {
                    text.push('_');
                }
                text
            }
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{marker} {:<15}", field.label())),
            Span::styled(value, Style::default().fg(app.theme.text)),
        ]));
    }
    lines.push(Line::raw(""));
    let on_submit = focused && app.form_field == DraftField::ALL.len();
    lines.push(Line::from(Span::styled(
        format!("{} [ {} ]", if on_submit { "▶" } else { " " }, submit),
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    )));
    if let Some(notice) = &app.notice {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(app.theme.error),
        )));
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}
