use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;

use crate::app::draft::toggle_field;
use crate::app::keymap::KeyAction;
use crate::app::{AppState, DraftField, FormMode, InputMode, ModalState};
use crate::source::UserSource;
use crate::source::worker::spawn_fetch;
use crate::ui;

/// Whether the loop keeps running after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Form rows: one per field plus the submit button.
pub const FORM_ROWS: usize = DraftField::ALL.len() + 1;

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut app: AppState,
    source: Box<dyn UserSource>,
) -> Result<()> {
    let mut pending = Some(spawn_fetch(source));

    loop {
        if let Some(outcome) = pending.as_ref().and_then(|h| h.try_take()) {
            app.apply_fetch(outcome);
            pending = None;
        }

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(&mut app, key) == Flow::Quit {
                    break;
                }
            }
        }
    }
    tracing::info!(
        uptime_secs = app.started_at.elapsed().as_secs(),
        records = app.store.len(),
        "exiting"
    );
    Ok(())
}

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.input_mode {
        InputMode::Normal => handle_normal(app, key),
        InputMode::Search => {
            handle_search(app, key);
            Flow::Continue
        }
        InputMode::Form => {
            handle_form(app, key);
            Flow::Continue
        }
        InputMode::Modal => {
            handle_modal(app, key);
            Flow::Continue
        }
    }
}

fn handle_normal(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    let columns = app.columns.max(1) as isize;
    let page = app.cards_per_page.max(1) as isize;
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::Ignore => app.notice = None,
        KeyAction::OpenHelp => {
            app.modal = Some(ModalState::Help { scroll: 0 });
            app.input_mode = InputMode::Modal;
        }
        KeyAction::StartSearch => {
            app.search_input = app.active_query.clone();
            app.input_mode = InputMode::Search;
        }
        KeyAction::ClearSearch => app.search(""),
        KeyAction::NewUser => {
            let _ = app.begin_add();
        }
        KeyAction::EditSelection => {
            if let Some(id) = app.selected_id() {
                let _ = app.begin_edit(id);
            }
        }
        KeyAction::DeleteSelection => {
            if let Some(id) = app.selected_id() {
                app.modal = Some(ModalState::DeleteConfirm { id, selected: 1 });
                app.input_mode = InputMode::Modal;
            }
        }
        KeyAction::MoveUp => app.move_by(-columns),
        KeyAction::MoveDown => app.move_by(columns),
        KeyAction::MoveLeft => app.move_by(-1),
        KeyAction::MoveRight => app.move_by(1),
        KeyAction::PageUp => app.move_by(-page),
        KeyAction::PageDown => app.move_by(page),
    }
    Flow::Continue
}

fn handle_search(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_input = app.active_query.clone();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            let q = app.search_input.clone();
            app.search(&q);
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
        }
        _ => {}
    }
}

fn handle_form(app: &mut AppState, key: KeyEvent) {
    let field = DraftField::ALL.get(app.form_field).copied();
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => {
            let _ = app.add_or_update();
        }
        KeyCode::Tab | KeyCode::Down => app.form_field = (app.form_field + 1) % FORM_ROWS,
        KeyCode::BackTab | KeyCode::Up => {
            app.form_field = (app.form_field + FORM_ROWS - 1) % FORM_ROWS;
        }
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
            if field.is_some_and(|f| !f.is_text()) =>
        {
            if let Some(f) = field {
                toggle_field(&mut app.draft, f);
            }
        }
        KeyCode::Backspace => {
            if let Some(f) = field.filter(|f| f.is_text()) {
                let mut text = crate::app::draft::field_text(&app.draft, f);
                text.pop();
                let _ = app.set_draft_field(f, &text);
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(f) = field.filter(|f| f.is_text()) {
                let mut text = crate::app::draft::field_text(&app.draft, f);
                text.push(c);
                let _ = app.set_draft_field(f, &text);
            }
        }
        _ => {}
    }
}

fn handle_modal(app: &mut AppState, key: KeyEvent) {
    let Some(modal) = app.modal.clone() else {
        app.input_mode = back_mode(app);
        return;
    };
    match modal {
        ModalState::Help { scroll } => match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                app.modal = Some(ModalState::Help { scroll: scroll.saturating_add(1) });
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.modal = Some(ModalState::Help { scroll: scroll.saturating_sub(1) });
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                close_modal(app)
            }
            _ => {}
        },
        ModalState::DeleteConfirm { id, selected } => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                app.modal = Some(ModalState::DeleteConfirm { id, selected: 1 - selected.min(1) });
            }
            KeyCode::Char('y') => {
                let _ = app.delete(id);
                close_modal(app);
            }
            KeyCode::Enter => {
                if selected == 0 {
                    let _ = app.delete(id);
                }
                close_modal(app);
            }
            KeyCode::Esc | KeyCode::Char('n') => close_modal(app),
            _ => {}
        },
    }
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = back_mode(app);
}

/// Mode to return to after an overlay closes.
fn back_mode(app: &AppState) -> InputMode {
    if app.form == FormMode::Closed {
        InputMode::Normal
    } else {
        InputMode::Form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    fn press(app: &mut AppState, code: KeyCode) -> Flow {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn loaded(names: &[&str]) -> AppState {
        let mut app = AppState::default();
        let users = names
            .iter()
            .map(|n| User {
                first_name: n.to_string(),
                last_name: "Doe".into(),
                username: n.to_lowercase(),
                ..User::default()
            })
            .collect();
        app.apply_fetch(Ok(users));
        app
    }

    #[test]
    fn quit_key_stops_loop() {
        let mut app = loaded(&[]);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn search_applies_on_enter_and_esc_discards() {
        let mut app = loaded(&["Ann", "Bob"]);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "bo");
        assert_eq!(app.visible.len(), 2);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.active_query, "bo");
        assert_eq!(app.visible.len(), 1);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "zzz");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.active_query, "bo");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn typing_into_add_form_then_submit() {
        let mut app = loaded(&["Ann"]);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.form, FormMode::Adding);
        type_text(&mut app, "Eve");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Moss");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "emoss");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "29x");
        assert_eq!(app.draft.age, Some(29));
        assert!(app.notice.is_some());
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.form, FormMode::Closed);
        assert_eq!(app.input_mode, InputMode::Normal);
        let last = &app.store.records().last().unwrap().user;
        assert_eq!(last.username, "emoss");
        assert_eq!(last.marital_status, crate::model::MaritalStatus::Married);
    }

    #[test]
    fn add_key_ignored_while_loading() {
        let mut app = AppState::default();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.form, FormMode::Closed);
        assert_eq!(app.input_mode, InputMode::Normal);
        type_text(&mut app, "Eve");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.len(), 0);

        app.apply_fetch(Ok(vec![User { username: "alee".into(), ..User::default() }]));
        assert_eq!(app.store.len(), 1);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.form, FormMode::Adding);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = loaded(&["Ann", "Bob"]);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.input_mode, InputMode::Modal);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.len(), 2);

        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn grid_navigation_clamps() {
        let mut app = loaded(&["A", "B", "C", "D", "E"]);
        app.columns = 2;
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_index, 2);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_index, 4);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_index, 0);
    }
}
