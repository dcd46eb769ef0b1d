use serde::{Deserialize, Serialize};
use std::fmt;

/// The social networks the bot tracks. Anything else (or an empty tag)
/// is treated as "general" by the metric formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    TikTok,
    YouTube,
    Instagram,
}

impl Platform {
    /// Parses a raw platform tag as stored in the database.
    pub fn from_tag(tag: &str) -> Option<Platform> {
        match tag.trim().to_lowercase().as_str() {
            "tiktok" => Some(Platform::TikTok),
            "youtube" => Some(Platform::YouTube),
            "instagram" => Some(Platform::Instagram),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::TikTok => write!(f, "TikTok"),
            Platform::YouTube => write!(f, "YouTube"),
            Platform::Instagram => write!(f, "Instagram"),
        }
    }
}

/// Aggregate counters for one user, as cached by the collector bot.
/// Counters are unsigned: negative counts are unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: String,
    pub username: String,
    pub total_videos: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub tiktok_views: u64,
    pub tiktok_videos: u64,
    pub youtube_views: u64,
    pub youtube_videos: u64,
    pub instagram_views: u64,
    pub instagram_videos: u64,
    pub updated_at: Option<String>,
}

impl UserStats {
    pub fn platform_views(&self, platform: Platform) -> u64 {
        match platform {
            Platform::TikTok => self.tiktok_views,
            Platform::YouTube => self.youtube_views,
            Platform::Instagram => self.instagram_views,
        }
    }

    pub fn platform_videos(&self, platform: Platform) -> u64 {
        match platform {
            Platform::TikTok => self.tiktok_videos,
            Platform::YouTube => self.youtube_videos,
            Platform::Instagram => self.instagram_videos,
        }
    }
}

/// One tracked video, joined with its owner's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStats {
    pub id: i64,
    pub user_id: String,
    pub username: String,
    pub platform: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub title: Option<String>,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags_case_insensitively() {
        assert_eq!(Platform::from_tag("TikTok"), Some(Platform::TikTok));
        assert_eq!(Platform::from_tag("YOUTUBE"), Some(Platform::YouTube));
        assert_eq!(Platform::from_tag(" instagram "), Some(Platform::Instagram));
    }

    #[test]
    fn unknown_tags_parse_to_none() {
        assert_eq!(Platform::from_tag("geral"), None);
        assert_eq!(Platform::from_tag(""), None);
    }
}
