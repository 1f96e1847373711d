pub mod cards;
pub mod components;
pub mod form;
pub mod navbar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::{AppState, FormMode, ModalState};

/// Width of the add/edit form panel.
const FORM_WIDTH: u16 = 46;

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    navbar::render_navbar(f, root[0], app);
    components::render_toolbar(f, root[1], app);

    if app.form == FormMode::Closed {
        cards::render_body(f, root[2], app);
    } else {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(FORM_WIDTH)])
            .split(root[2]);
        cards::render_body(f, body[0], app);
        form::render_form(f, body[1], app);
    }

    components::render_status_bar(f, root[3], app);

    if let Some(state) = app.modal.clone() {
        let area = f.area();
        match state {
            ModalState::DeleteConfirm { .. } => {
                components::render_delete_modal(f, area, app, &state)
            }
            ModalState::Help { scroll } => components::render_help_modal(f, area, app, scroll),
        }
    }
}
