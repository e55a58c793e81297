//! crates/archive_core/src/domain.rs
//!
//! Defines the core data structures for the portal.
//! Articles are owned by the repository; quake and weather records are
//! immutable snapshots of the external feeds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Categories
//=========================================================================================

/// The fixed set of article categories, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    NaturalScience,
    MathLogic,
    AdvancedTechnology,
    PhilosophyOfScience,
    SocialEngineering,
    ArtEngineering,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::NaturalScience,
        Category::MathLogic,
        Category::AdvancedTechnology,
        Category::PhilosophyOfScience,
        Category::SocialEngineering,
        Category::ArtEngineering,
    ];

    /// The label shown in navigation and stored in article sources.
    pub fn label(self) -> &'static str {
        match self {
            Category::NaturalScience => "自然科学",
            Category::MathLogic => "数理・論理",
            Category::AdvancedTechnology => "先端技術",
            Category::PhilosophyOfScience => "科学哲学",
            Category::SocialEngineering => "社会工学",
            Category::ArtEngineering => "芸術工学",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s.trim())
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

//=========================================================================================
// Articles
//=========================================================================================

/// A published article. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub author: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Article {
    /// Publish date and time combined into one local timestamp.
    pub fn published_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

//=========================================================================================
// Seismic feed records
//=========================================================================================

/// One JMA earthquake report as delivered by the seismic feed.
/// Passed through as-is; every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuakeRecord {
    pub earthquake: Earthquake,
    pub points: Vec<ObservationPoint>,
    pub issue: Issue,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Earthquake {
    /// Local event time as published, e.g. `2024/01/01 16:10:00`.
    pub time: String,
    pub hypocenter: Hypocenter,
    pub max_scale: i32,
    pub domestic_tsunami: String,
}

/// `-1` depth or magnitude means the value was not determined.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hypocenter {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationPoint {
    pub pref: String,
    pub addr: String,
    pub scale: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    pub source: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: String,
}

//=========================================================================================
// Weather
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at one coordinate, from the most recent successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub coordinates: Coordinates,
    pub temperature: f64,
    pub weather_code: i32,
    pub fetched_at: DateTime<Utc>,
}

//=========================================================================================
// View state
//=========================================================================================

/// The mutually exclusive display modes of the main content region.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Home,
    Category(Category),
    ArticleDetail(String),
    QuakeDetail(QuakeRecord),
}

impl ViewState {
    /// Only the listing views carry the sidebar with the feed widgets.
    pub fn shows_feed_widgets(&self) -> bool {
        matches!(self, ViewState::Home | ViewState::Category(_))
    }
}
