//! Runtime settings: command line, environment and the config directory.
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use crate::source::{DEFAULT_URL, FileSource, HttpSource, UserSource};

pub const APP_DIR: &str = "userdata-tui";

#[derive(Parser, Debug, Clone)]
#[command(name = "userdata-tui", version, about = "Browse, search and edit a list of user records")]
pub struct Args {
    /// Endpoint returning a JSON array of users.
    #[arg(long, env = "USERDATA_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Read the user list from a local JSON file instead of the network;
    /// takes precedence over `--url`.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "USERDATA_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Directory holding theme.conf and keybinds.conf.
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Directory for the log file.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    pub fn source(&self) -> Box<dyn UserSource> {
        match &self.file {
            Some(path) => Box::new(FileSource::new(path)),
            None => Box::new(HttpSource::new(
                &self.url,
                Duration::from_secs(self.timeout_secs.max(1)),
            )),
        }
    }

    /// Explicit `--config-dir`, else `<user config dir>/userdata-tui`, else
    /// the working directory.
    pub fn resolved_config_dir(&self) -> PathBuf {
        self.config_dir
            .clone()
            .or_else(|| dirs::config_dir().map(|d| d.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|d| d.join(APP_DIR)))
            .unwrap_or_else(std::env::temp_dir)
    }
}

/// Path of `name` inside `dir`, creating `dir` when missing.
pub fn config_file_path(dir: &Path, name: &str) -> String {
    if let Err(e) = std::fs::create_dir_all(dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "could not create config dir");
    }
    dir.join(name).to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_flag_selects_file_source() {
        let args = Args::parse_from(["userdata-tui", "--file", "/tmp/users.json"]);
        assert_eq!(args.source().describe(), "/tmp/users.json");
    }

    #[test]
    fn url_defaults_and_overrides() {
        let args = Args::parse_from(["userdata-tui"]);
        assert_eq!(args.url, DEFAULT_URL);
        assert_eq!(args.timeout_secs, 10);
        let args = Args::parse_from(["userdata-tui", "--url", "http://localhost:9/u"]);
        assert_eq!(args.source().describe(), "http://localhost:9/u");
    }

    #[test]
    fn config_file_path_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested");
        let p = config_file_path(&dir, "theme.conf");
        assert!(dir.is_dir());
        assert!(p.ends_with("theme.conf"));
    }
}
