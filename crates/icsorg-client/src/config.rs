//! Run configuration.
//!
//! Settings come from four layers, highest precedence first:
//! 1. command-line flags
//! 2. process environment
//! 3. a dotenv-style rc file (`~/.icsorgrc` by default)
//! 4. built-in defaults
//!
//! Empty values fall through to the next layer. The process environment is
//! only read, never modified. [`Config::resolve`] is pure so every layer can
//! be tested without touching the real environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use icsorg_core::{OrgHeader, TimeWindow};

use crate::cli::Cli;
use crate::error::{ClientError, ClientResult};

/// Name of the rc file in the home directory.
pub const RC_FILE_NAME: &str = ".icsorgrc";

pub const DEFAULT_TITLE: &str = "Calendar";
pub const DEFAULT_PAST_DAYS: i64 = 7;
pub const DEFAULT_FUTURE_DAYS: i64 = 365;

const DUMP_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Key/value pairs from one configuration layer.
pub type Vars = HashMap<String, String>;

/// The resolved configuration for one run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The rc file that was consulted (it may not exist).
    pub rc_file: PathBuf,
    /// Calendar source: a path, or a URL starting with `http`.
    pub ics_file: Option<String>,
    /// Aggregate org file; empty when unset.
    pub org_file: String,
    /// Directory for per-event note files.
    pub roam_path: PathBuf,
    /// Directory for daily log files.
    pub daily_path: PathBuf,
    pub title: String,
    /// Used for attendee matching and the file header.
    pub author: String,
    /// Used for attendee matching and the file header.
    pub email: String,
    pub category: String,
    pub startup: String,
    pub filetags: String,
    pub past: i64,
    pub future: i64,
    /// `[now - past days, now + future days]`.
    pub window: TimeWindow,
}

impl Config {
    /// Returns the default rc file path.
    pub fn default_rc_file() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(RC_FILE_NAME)
    }

    /// Loads the configuration for `cli` from the real environment.
    pub fn load(cli: &Cli, now: NaiveDateTime) -> ClientResult<Self> {
        let rc_file = cli
            .config_file
            .clone()
            .unwrap_or_else(Self::default_rc_file);
        let rc = read_rc_file(&rc_file)?;
        let env: Vars = std::env::vars().collect();

        Self::resolve(cli, &env, &rc, rc_file, now)
    }

    /// Merges the given layers into a configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `PAST` or `FUTURE` is not a number
    /// or puts the window outside the representable date range.
    pub fn resolve(
        cli: &Cli,
        env: &Vars,
        rc: &Vars,
        rc_file: PathBuf,
        now: NaiveDateTime,
    ) -> ClientResult<Self> {
        let layers = Layers { env, rc };

        let past = match cli.past_days {
            Some(days) => days,
            None => layers.days("PAST", DEFAULT_PAST_DAYS)?,
        };
        let future = match cli.future_days {
            Some(days) => days,
            None => layers.days("FUTURE", DEFAULT_FUTURE_DAYS)?,
        };

        let window = TimeWindow::around(now, past, future).ok_or_else(|| {
            ClientError::config(format!(
                "PAST ({}) or FUTURE ({}) reaches outside the supported date range",
                past, future
            ))
        })?;

        let config = Self {
            rc_file,
            ics_file: layers.get(cli.input_file.as_deref(), "ICS_FILE"),
            org_file: layers
                .get(cli.output_file.as_deref(), "ORG_FILE")
                .unwrap_or_default(),
            roam_path: directory(layers.get(cli.roam_path.as_deref(), "ROAM_PATH")),
            daily_path: directory(layers.get(cli.daily_path.as_deref(), "DAILY_PATH")),
            title: layers
                .get(None, "TITLE")
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            author: layers.get(cli.author.as_deref(), "AUTHOR").unwrap_or_default(),
            email: layers.get(cli.email.as_deref(), "EMAIL").unwrap_or_default(),
            category: layers.get(None, "CATEGORY").unwrap_or_default(),
            startup: layers.get(None, "STARTUP").unwrap_or_default(),
            filetags: layers.get(None, "FILETAGS").unwrap_or_default(),
            past,
            future,
            window,
        };

        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Checks the settings needed to write output files.
    pub fn require_output(&self) -> ClientResult<()> {
        if self.org_file.is_empty() {
            return Err(ClientError::config(
                "ORG_FILE is not set (use --output-file or ORG_FILE)",
            ));
        }
        Ok(())
    }

    /// Header block for the aggregate file.
    pub fn header(&self) -> OrgHeader {
        OrgHeader {
            title: self.title.clone(),
            author: self.author.clone(),
            email: self.email.clone(),
            category: self.category.clone(),
            startup: self.startup.clone(),
            filetags: self.filetags.clone(),
            ..Default::default()
        }
    }

    /// Every setting as a `(KEY, value)` pair, in dump order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("RC_FILE", self.rc_file.display().to_string()),
            ("ICS_FILE", self.ics_file.clone().unwrap_or_default()),
            ("ORG_FILE", self.org_file.clone()),
            ("ROAM_PATH", self.roam_path.display().to_string()),
            ("DAILY_PATH", self.daily_path.display().to_string()),
            ("TITLE", self.title.clone()),
            ("AUTHOR", self.author.clone()),
            ("EMAIL", self.email.clone()),
            ("CATEGORY", self.category.clone()),
            ("STARTUP", self.startup.clone()),
            ("FILETAGS", self.filetags.clone()),
            ("PAST", self.past.to_string()),
            ("FUTURE", self.future.to_string()),
            (
                "START_DATE",
                self.window.start.format(DUMP_DATE_FORMAT).to_string(),
            ),
            ("END_DATE", self.window.end.format(DUMP_DATE_FORMAT).to_string()),
        ]
    }
}

/// The environment and rc-file layers.
struct Layers<'a> {
    env: &'a Vars,
    rc: &'a Vars,
}

impl Layers<'_> {
    /// Returns the first non-empty value of flag, environment, rc file.
    fn get(&self, flag: Option<&str>, key: &str) -> Option<String> {
        flag.map(str::to_string)
            .into_iter()
            .chain(self.env.get(key).cloned())
            .chain(self.rc.get(key).cloned())
            .find(|v| !v.trim().is_empty())
    }

    fn days(&self, key: &str, default: i64) -> ClientResult<i64> {
        match self.get(None, key) {
            Some(value) => value.trim().parse().map_err(|_| {
                ClientError::config(format!("{} must be a number of days, got '{}'", key, value))
            }),
            None => Ok(default),
        }
    }
}

/// An unset directory means the current directory.
fn directory(value: Option<String>) -> PathBuf {
    PathBuf::from(value.unwrap_or_else(|| ".".to_string()))
}

/// Reads a dotenv-style file. A missing file yields no values.
pub fn read_rc_file(path: &Path) -> ClientResult<Vars> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            debug!(path = %path.display(), "No rc file");
            return Ok(Vars::new());
        }
        Err(e) => {
            return Err(ClientError::config(format!(
                "failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };

    iter.map(|item| {
        item.map_err(|e| {
            ClientError::config(format!("failed to parse {}: {}", path.display(), e))
        })
    })
    .collect()
}
