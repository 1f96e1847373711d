//! Where the initial user list comes from.
//!
//! The default source is a single HTTP GET returning a JSON array. A file
//! source reads the same payload from disk.
pub mod worker;

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Context, Result, simple_error};
use crate::model::{User, parse_users};

pub const DEFAULT_URL: &str = "https://mocki.io/v1/a6a0fb6b-a84a-4934-b3f2-5c92cc77c44e";

/// A one-shot provider of the initial user list.
pub trait UserSource: Send {
    /// Short human-readable location, used in logs and error messages.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Vec<User>>;
}

pub struct HttpSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            url: url.to_string(),
            agent,
        }
    }
}

impl UserSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<User>> {
        info!(url = %self.url, "requesting user list");
        let resp = self
            .agent
            .get(&self.url)
            .set("Accept", "application/json")
            .call();

        match resp {
            Ok(r) => {
                let users: Vec<User> = r
                    .into_json()
                    .with_ctx(|| format!("decode user list from {}", self.url))?;
                debug!(count = users.len(), "response decoded");
                Ok(users)
            }
            Err(ureq::Error::Status(code, _)) => Err(simple_error(format!(
                "GET {} returned HTTP {}",
                self.url, code
            ))),
            Err(e) => Err(simple_error(format!("GET {} failed: {}", self.url, e))),
        }
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl UserSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<User>> {
        info!(path = %self.path.display(), "reading user list from file");
        let contents = std::fs::read_to_string(&self.path)
            .with_ctx(|| format!("read {}", self.path.display()))?;
        let users = parse_users(&contents)
            .with_ctx(|| format!("decode user list from {}", self.path.display()))?;
        Ok(users)
    }
}
