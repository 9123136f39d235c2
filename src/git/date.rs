use crate::error::{GitError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset};
use std::fmt::Write;
use tracing::warn;

/// `YYYY-MM-DD HH:MM:SS`, the layout SQL datetime columns expect
pub const MYSQL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Legacy name for [`MYSQL_DATETIME`] in PHP `date()` notation
const LEGACY_MYSQL_NAME: &str = "Y-m-d H:i:s";

/// git's default `Date:` layout, e.g. `Mon Jan 2 15:04:05 2023 +0000`
const GIT_DEFAULT_DATE: &str = "%a %b %e %H:%M:%S %Y %z";

/// How [`GitClient::last_update_date`](crate::git::GitClient::last_update_date)
/// reports the date it finds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// Unix timestamp in seconds
    #[default]
    Timestamp,
    /// The date text exactly as git printed it
    GitDefault,
    /// A strftime template rendered in the commit's UTC offset
    Custom(String),
}

impl DateFormat {
    pub fn mysql() -> Self {
        DateFormat::Custom(MYSQL_DATETIME.to_string())
    }

    /// Reject custom templates chrono cannot render
    pub fn validate(&self) -> Result<()> {
        if let DateFormat::Custom(template) = self {
            if StrftimeItems::new(template).any(|item| matches!(item, Item::Error)) {
                return Err(GitError::InvalidDateFormat(template.clone()));
            }
        }
        Ok(())
    }
}

impl From<&str> for DateFormat {
    fn from(name: &str) -> Self {
        match name {
            "timestamp" => DateFormat::Timestamp,
            "default" => DateFormat::GitDefault,
            LEGACY_MYSQL_NAME => DateFormat::mysql(),
            template => DateFormat::Custom(template.to_string()),
        }
    }
}

/// Date of the most recent commit, in the requested [`DateFormat`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastUpdate {
    Timestamp(i64),
    Raw(String),
    Formatted(String),
}

/// Parse a date in git's default log layout
pub fn parse_git_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw.trim(), GIT_DEFAULT_DATE).ok()
}

/// Render a raw git date according to `format`.
///
/// Returns `Ok(None)` when the date itself cannot be parsed.
pub fn render(raw: &str, format: &DateFormat) -> Result<Option<LastUpdate>> {
    if let DateFormat::GitDefault = format {
        return Ok(Some(LastUpdate::Raw(raw.to_string())));
    }

    let Some(date) = parse_git_date(raw) else {
        warn!(date = raw, "unrecognised git date");
        return Ok(None);
    };

    match format {
        DateFormat::Custom(template) => {
            format.validate()?;
            let mut rendered = String::new();
            write!(rendered, "{}", date.format(template))
                .map_err(|_| GitError::InvalidDateFormat(template.clone()))?;
            Ok(Some(LastUpdate::Formatted(rendered)))
        }
        _ => Ok(Some(LastUpdate::Timestamp(date.timestamp()))),
    }
}
