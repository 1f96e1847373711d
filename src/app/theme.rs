//! Color theme, loaded from and persisted to `theme.conf` (key = value).
use ratatui::style::Color;

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub navbar_bg: Color,
    pub navbar_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub card_border: Color,
    pub selected_border: Color,
    pub error: Color,
}

/// Config keys in file order.
const KEYS: [&str; 11] = [
    "text",
    "muted",
    "title",
    "border",
    "navbar_bg",
    "navbar_fg",
    "status_bg",
    "status_fg",
    "card_border",
    "selected_border",
    "error",
];

impl Theme {
    /// Catppuccin Mocha; the default when no config exists.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),            // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),           // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),           // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),          // surface2
            navbar_bg: Color::Rgb(0x31, 0x32, 0x44),       // surface0
            navbar_fg: Color::Rgb(0xb4, 0xbe, 0xfe),       // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),       // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),       // text
            card_border: Color::Rgb(0x6c, 0x70, 0x86),     // overlay0
            selected_border: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            error: Color::Rgb(0xf3, 0x8b, 0xa8),           // red
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "navbar_bg" => &mut self.navbar_bg,
            "navbar_fg" => &mut self.navbar_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "card_border" => &mut self.card_border,
            "selected_border" => &mut self.selected_border,
            "error" => &mut self.error,
            _ => return None,
        })
    }

    /// Parse `key = color` lines over the `mocha` defaults. Unknown keys and
    /// unparsable colors are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            if let (Some(color), Some(slot)) = (parse_color(val), theme.slot(key.trim())) {
                *slot = color;
            }
        }
        theme
    }

    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn to_config_string(&self) -> String {
        let mut copy = *self;
        let mut buf = String::from(
            "# userdata-tui theme configuration\n# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n",
        );
        for key in KEYS {
            if let Some(c) = copy.slot(key) {
                buf.push_str(&format!("{} = {}\n", key, color_to_str(*c)));
            }
        }
        buf
    }

    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        std::fs::write(path, self.to_config_string())
    }

    /// Load `path`, or write the default theme there and return it.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default theme");
        }
        t
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

/// Hex ("#RRGGBB" or "RRGGBB") or "reset".
fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    match c {
        Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        Color::Reset => "reset".to_string(),
        // best-effort hex for named colors
        Color::Black => "#000000".to_string(),
        Color::Red | Color::LightRed => "#FF5555".to_string(),
        Color::Green | Color::LightGreen => "#55FF55".to_string(),
        Color::Yellow | Color::LightYellow => "#FFFF55".to_string(),
        Color::Blue | Color::LightBlue => "#5555FF".to_string(),
        Color::Magenta | Color::LightMagenta => "#FF55FF".to_string(),
        Color::Cyan | Color::LightCyan => "#55FFFF".to_string(),
        Color::Gray => "#B3B3B3".to_string(),
        Color::DarkGray => "#4D4D4D".to_string(),
        Color::White => "#FFFFFF".to_string(),
        Color::Indexed(_) => "reset".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_overrides_only_known_keys() {
        let t = Theme::parse("# c\nerror = #010203\nbogus = #FFFFFF\ntitle = nope\ntext=reset\n");
        assert_eq!(t.error, Color::Rgb(1, 2, 3));
        assert_eq!(t.title, Theme::mocha().title);
        assert_eq!(t.text, Color::Reset);
    }

    #[test]
    fn config_string_parses_back() {
        let t = Theme::mocha();
        assert_eq!(Theme::parse(&t.to_config_string()), t);
    }
}
