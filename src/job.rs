use std::fmt::Display;

use chrono::{DateTime, TimeDelta, Utc};
use colored::{Color, ColoredString, Colorize as _};
use serde::Serialize;
use serde_json::{Map, Value};

/// A job posting as it appears in an input file: an untyped JSON object.
#[derive(Default, Debug, Clone)]
pub struct RawJob(Map<String, Value>);

impl From<Map<String, Value>> for RawJob {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Value> for RawJob {
    /// Anything other than an object carries no fields.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

impl RawJob {
    /// Returns the field if it's a non-empty string.
    fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// A normalized job posting.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct Job {
    pub title: String,
    /// How long ago the job was posted.
    pub posted: PostedAge,
    #[serde(rename = "type")]
    pub kind: String,
    pub level: String,
    pub skill: String,
    pub detail: String,
    pub link: String,
}

impl Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.title)
    }
}

impl From<&RawJob> for Job {
    fn from(raw: &RawJob) -> Self {
        Self::new(raw)
    }
}

impl Job {
    pub fn new(raw: &RawJob) -> Self {
        let field = |key, default: &str| raw.text(key).unwrap_or(default).to_string();

        Self {
            title: field("Title", "No Title"),
            posted: raw.text("Posted").map_or(PostedAge::Unknown, parse_posted),
            kind: field("Type", "No Type"),
            level: field("Level", "No Level"),
            skill: field("Skill", "No Skill"),
            detail: field("Detail", "No Details"),
            link: field("Job Page Link", "#"),
        }
    }

    /// The full description shown when a single job is opened.
    pub fn details(&self) -> String {
        format!(
            concat!(
                "Title: {}\nPosted: {} minutes ago\nType: {}\nLevel: {}\n",
                "Skill: {}\nDetail: {}\nLink: {}",
            ),
            self.title, self.posted, self.kind, self.level, self.skill, self.detail, self.link,
        )
    }

    /// `details`, plus the approximate posting time when the age is known.
    pub fn details_at(&self, now: DateTime<Utc>) -> String {
        let mut details = self.details();
        if let Some(posted_at) = self.posted_at(now) {
            details.push_str(&format!(
                "\nPosted around: {}",
                posted_at.format("%Y-%m-%d %H:%M UTC"),
            ));
        }
        details
    }

    /// Approximately when the job was posted, relative to `now`.
    pub fn posted_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let PostedAge::Minutes(minutes) = self.posted else {
            return None;
        };
        let delta = TimeDelta::try_minutes(i64::try_from(minutes).ok()?)?;
        now.checked_sub_signed(delta)
    }

    pub(crate) fn age_color(&self) -> Color {
        match self.posted {
            PostedAge::Minutes(m) if m < MINUTES_PER_DAY => Color::Cyan,
            PostedAge::Minutes(m) if m < 7 * MINUTES_PER_DAY => Color::TrueColor {
                r: 200,
                g: 150,
                b: 60,
            },
            _ => Color::Red,
        }
    }

    pub(crate) fn age_label(&self) -> ColoredString {
        let label = match self.posted {
            PostedAge::Minutes(m) if m < 60 => format!("{:>3}m ago", m),
            PostedAge::Minutes(m) if m < MINUTES_PER_DAY => format!("{:>3}h ago", m / 60),
            PostedAge::Minutes(m) => format!("{:>3}d ago", m / MINUTES_PER_DAY),
            PostedAge::Unknown => "   unknown".to_string(),
        };
        label.color(self.age_color())
    }
}

const MINUTES_PER_DAY: u64 = 60 * 24;

/// Minutes elapsed since a job was posted.
///
/// `Unknown` orders after every known age, so unparseable postings sort as
/// the oldest.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(untagged)]
pub enum PostedAge {
    Minutes(u64),
    Unknown,
}

impl Display for PostedAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostedAge::Minutes(m) => write!(f, "{}", m),
            PostedAge::Unknown => write!(f, "Infinity"),
        }
    }
}

impl PostedAge {
    pub fn minutes(self) -> Option<u64> {
        match self {
            PostedAge::Minutes(m) => Some(m),
            PostedAge::Unknown => None,
        }
    }
}

macro_rules! re {
    ($name:ident, $($e:expr),* $(,)?) => {
        static $name: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(
            || regex::Regex::new(concat!($($e),*)).unwrap(),
        );
    };
}

/// Parses strings like "3 hours ago" into minutes.
pub fn parse_posted(posted: &str) -> PostedAge {
    re!(POSTED_RE, r"(?i)([0-9]+)\s*(minutes?|hours?|days?)\s*ago");

    let Some(captures) = POSTED_RE.captures(posted) else {
        return PostedAge::Unknown;
    };
    // Only overflow can fail here.
    let value = captures[1].parse::<u64>().unwrap_or(u64::MAX);
    let unit = captures[2].to_lowercase();

    if unit.starts_with("minute") {
        PostedAge::Minutes(value)
    } else if unit.starts_with("hour") {
        PostedAge::Minutes(value.saturating_mul(60))
    } else if unit.starts_with("day") {
        PostedAge::Minutes(value.saturating_mul(MINUTES_PER_DAY))
    } else {
        PostedAge::Unknown
    }
}
