//! Typed contract with the hosted row store.
//!
//! Every table and column name the site reads or writes is declared here, next
//! to the row types that travel over the wire. Call sites never spell a table
//! name themselves: they go through [`TableRow::TABLE`] or the [`columns`]
//! constants, so the read and write shapes cannot drift apart.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A row type bound to exactly one remote table.
pub trait TableRow: Serialize + DeserializeOwned {
    /// Name of the remote table holding rows of this type.
    const TABLE: &'static str;
}

/// Remote table names.
pub mod tables {
    /// Leads for the mobile app launch notification.
    pub const APP_INTEREST: &str = "app_interest";
    /// "Call me back" requests, including lecture registrations.
    pub const CALLBACK_REQUESTS: &str = "callback_requests";
    /// Guest lectures shown in the featured strip.
    pub const SPECIAL_LECTURES: &str = "special_lectures";
}

/// Column names used in filters and ordering.
pub mod columns {
    pub const IS_FEATURED: &str = "is_featured";
    pub const IS_UPCOMING: &str = "is_upcoming";
    pub const LECTURE_DATE: &str = "lecture_date";
}

/// Platform the visitor wants to be notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Both,
}

impl Platform {
    /// All platforms in the order the form lists them.
    pub const ALL: [Platform; 3] = [Platform::Both, Platform::Ios, Platform::Android];

    /// Wire value, as stored in `platform_preference`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Both => "both",
        }
    }

    /// Human-readable option label.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS (iPhone/iPad)",
            Platform::Android => "Android",
            Platform::Both => "Both iOS & Android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "both" => Ok(Platform::Both),
            other => Err(format!("unknown platform '{other}' (expected ios, android or both)")),
        }
    }
}

/// One row of `app_interest`: a visitor asking to hear about the app launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub platform_preference: Platform,
    pub source_page: String,
}

impl TableRow for LeadRecord {
    const TABLE: &'static str = tables::APP_INTEREST;
}

/// One row of `callback_requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackRequest {
    pub full_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub source_page: String,
}

impl TableRow for CallbackRequest {
    const TABLE: &'static str = tables::CALLBACK_REQUESTS;
}

/// A guest lecture promoted on the home page. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialLecture {
    pub id: String,
    pub expert_name: String,
    pub expert_title: String,
    #[serde(rename = "expert_credentials", default, deserialize_with = "null_as_default")]
    pub credentials: String,
    #[serde(rename = "expert_image_url", default)]
    pub image_url: Option<String>,
    pub topic: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_takeaways: Vec<String>,
    #[serde(default)]
    pub lecture_date: Option<DateTime<Utc>>,
    pub duration_minutes: i32,
    pub is_upcoming: bool,
    pub is_featured: bool,
    #[serde(default)]
    pub available_online: bool,
    #[serde(default)]
    pub registration_url: Option<String>,
}

impl TableRow for SpecialLecture {
    const TABLE: &'static str = tables::SPECIAL_LECTURES;
}

/// Cards never list more takeaways than this.
pub const MAX_TAKEAWAYS: usize = 4;

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Lecture times are shown in India Standard Time.
fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

impl SpecialLecture {
    /// `14 March 2026`, or `None` when the lecture is not scheduled yet.
    pub fn date_label(&self) -> Option<String> {
        self.lecture_date
            .map(|at| at.with_timezone(&ist()).format("%-d %B %Y").to_string())
    }

    /// `06:30 PM`, or `None` when the lecture is not scheduled yet.
    pub fn time_label(&self) -> Option<String> {
        self.lecture_date
            .map(|at| at.with_timezone(&ist()).format("%I:%M %p").to_string())
    }

    /// Takeaways shown on a card.
    pub fn highlights(&self) -> &[String] {
        let end = self.key_takeaways.len().min(MAX_TAKEAWAYS);
        &self.key_takeaways[..end]
    }

    /// Source page recorded when a visitor registers interest in this lecture.
    pub fn source_page(&self) -> String {
        format!("special-lecture:{}", self.id)
    }

    /// Message attached to the callback request for this lecture.
    pub fn registration_message(&self) -> String {
        format!(
            "Express your interest in attending: \"{}\" by {}. Our team will contact you with registration details.",
            self.topic, self.expert_name
        )
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
