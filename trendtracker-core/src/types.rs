use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Number of items requested from each platform when a scrape is triggered.
pub const SCRAPE_LIMIT_PER_PLATFORM: u32 = 15;

/// A single scraped content item as served by `GET /api/trends`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    pub platform: String,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub engagement_score: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub published_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// Accepts `2024-01-15T10:30:00`, with optional fractional seconds, or a full
/// RFC 3339 timestamp carrying an offset (converted to UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(value) => parse_timestamp(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {value}"))),
    }
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
    pub enabled: bool,
}

/// Snapshot of `GET /api/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub platforms: BTreeMap<String, PlatformSettings>,
    #[serde(default)]
    pub scheduler_enabled: Option<bool>,
    #[serde(default)]
    pub scheduler_interval: Option<u64>,
    #[serde(default)]
    pub debug: Option<bool>,
}

impl PlatformConfig {
    pub fn enabled_platforms(&self) -> Vec<String> {
        self.platforms
            .iter()
            .filter(|(_, settings)| settings.enabled)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub platforms: Vec<String>,
    pub limit_per_platform: u32,
}

impl ScrapeRequest {
    pub fn for_platforms(platforms: Vec<String>) -> Self {
        Self {
            platforms,
            limit_per_platform: SCRAPE_LIMIT_PER_PLATFORM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub message: String,
    #[serde(default)]
    pub trends_scraped: Option<u64>,
    #[serde(default)]
    pub trends_saved: Option<u64>,
    #[serde(default)]
    pub platforms_scraped: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformTestRequest {
    pub platform: String,
}

/// Body of a successful `POST /api/config/test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Body the backend sends alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
