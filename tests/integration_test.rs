// Integration tests for userdata-tui

use std::io::Write;
use std::time::Duration;

use ratatui::{Terminal, backend::TestBackend};
use userdata_tui::app::{AppState, LoadState};
use userdata_tui::source::worker::spawn_fetch;
use userdata_tui::source::{FileSource, HttpSource};
use userdata_tui::ui::render;

const ANN_LEE: &str = r#"[{"first_name":"Ann","last_name":"Lee","username":"alee","age":30,"marital_status":"married","is_employed":true,"is_founder":false}]"#;

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let width = buf.area.width as usize;
    buf.content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(app: &mut AppState) -> String {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).expect("create terminal");
    terminal.draw(|f| render(f, app)).expect("render frame");
    screen_text(&terminal)
}

fn fixture(json: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("temp file");
    f.write_all(json.as_bytes()).expect("write fixture");
    f
}

// 1) Fetch one record and render it as a card
#[test]
fn fetched_user_renders_as_card() {
    let file = fixture(ANN_LEE);
    let handle = spawn_fetch(Box::new(FileSource::new(file.path())));
    let outcome = handle.wait(Duration::from_secs(5)).expect("fetch outcome");

    let mut app = AppState::default();
    app.apply_fetch(outcome);
    assert_eq!(app.load, LoadState::Ready);
    assert_eq!(app.visible.len(), 1);

    let screen = draw(&mut app);
    for needle in ["Ann Lee", "alee", "30", "married", "Yes", "No", "User Data"] {
        assert!(screen.contains(needle), "missing {needle:?} in:\n{screen}");
    }
}

// 2) Search over the fetched list
#[test]
fn search_matches_and_misses() {
    let file = fixture(ANN_LEE);
    let handle = spawn_fetch(Box::new(FileSource::new(file.path())));
    let mut app = AppState::default();
    app.apply_fetch(handle.wait(Duration::from_secs(5)).expect("fetch outcome"));

    app.search("lee");
    let names: Vec<_> = app.visible_users().map(|r| r.user.full_name()).collect();
    assert_eq!(names, vec!["Ann Lee"]);

    app.search("zzz");
    assert_eq!(app.visible_users().count(), 0);
    assert!(draw(&mut app).contains("No users to show."));
}

// 3) Network failure surfaces one inline error
#[test]
fn failed_fetch_sets_error_and_keeps_view_empty() {
    let source = HttpSource::new("http://127.0.0.1:1/users", Duration::from_secs(2));
    let handle = spawn_fetch(Box::new(source));
    let outcome = handle.wait(Duration::from_secs(10)).expect("fetch outcome");

    let mut app = AppState::default();
    app.apply_fetch(outcome);
    assert!(!app.is_loading());
    let msg = app.error_message().expect("error message").to_string();
    assert!(msg.starts_with("Failed to fetch data"));
    assert!(app.visible.is_empty());
    assert!(app.modal.is_none());
    assert!(draw(&mut app).contains("Failed to fetch data"));
}

// 4) Malformed payload is the same single error kind
#[test]
fn malformed_payload_is_a_fetch_failure() {
    let file = fixture(r#"{"users": []}"#);
    let handle = spawn_fetch(Box::new(FileSource::new(file.path())));
    let mut app = AppState::default();
    app.apply_fetch(handle.wait(Duration::from_secs(5)).expect("fetch outcome"));
    assert!(matches!(app.load, LoadState::Failed(_)));
    assert_eq!(app.store.len(), 0);
}

// 5) Rendering never panics in any state
#[test]
fn render_smoke_across_states() {
    let mut app = AppState::default();
    assert!(draw(&mut app).contains("Loading users..."));

    app.apply_fetch(Ok(vec![]));
    app.begin_add().unwrap();
    let screen = draw(&mut app);
    assert!(screen.contains("Add user"));

    app.modal = Some(userdata_tui::app::ModalState::Help { scroll: 0 });
    let backend = TestBackend::new(30, 10);
    let mut terminal = Terminal::new(backend).expect("create terminal");
    terminal.draw(|f| render(f, &mut app)).expect("render tiny frame");
}

// 6) Theme and keymap config files are created and read back
#[test]
fn config_files_init_and_roundtrip() {
    use userdata_tui::app::config::config_file_path;
    use userdata_tui::app::{Keymap, Theme};

    let dir = tempfile::tempdir().expect("temp dir");
    let theme_path = config_file_path(dir.path(), "theme.conf");
    let keys_path = config_file_path(dir.path(), "keybinds.conf");

    let t = Theme::load_or_init(&theme_path);
    assert!(std::path::Path::new(&theme_path).exists());
    assert_eq!(Theme::from_file(&theme_path).expect("read theme"), t);

    let km = Keymap::load_or_init(&keys_path);
    assert!(std::path::Path::new(&keys_path).exists());
    let reread = Keymap::from_file(&keys_path).expect("read keymap");
    let quit = userdata_tui::app::keymap::KeyAction::Quit;
    assert_eq!(reread.keys_for(quit), km.keys_for(quit));
}
