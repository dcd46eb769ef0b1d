use serde::{Deserialize, Serialize};
use std::fmt;

use trendx_shared_models::Platform;

use crate::rates::{engagement_rate, round_to};

/// Weighted performance score in [0, 100]:
/// - engagement: rate x 5, capped at 50 points (10% rate maxes it out)
/// - reach: ln(1 + views) x 3, capped at 30 points
/// - consistency: views-per-video x 0.002, capped at 20 points
///
/// The three caps already bound the sum at 100; the final clamp stays
/// anyway. No views or no videos is a defined zero.
pub fn performance_score(
    views: u64,
    likes: u64,
    comments: u64,
    shares: u64,
    videos: u64,
    platform: Option<Platform>,
) -> f64 {
    if views == 0 || videos == 0 {
        return 0.0;
    }

    let engagement_points = (engagement_rate(views, likes, comments, shares, platform) * 5.0).min(50.0);
    let reach_points = ((1.0 + views as f64).ln() * 3.0).min(30.0);
    let consistency_points = ((views as f64 / videos as f64) * 0.002).min(20.0);

    round_to(engagement_points + reach_points + consistency_points, 1).min(100.0)
}

/// Simplified per-video score: 60% engagement, 40% log-scaled reach.
pub fn video_score(
    views: u64,
    likes: u64,
    comments: u64,
    shares: u64,
    platform: Option<Platform>,
) -> f64 {
    let rate = engagement_rate(views, likes, comments, shares, platform);
    round_to(rate * 0.6 + (1.0 + views as f64).ln() * 0.4, 2)
}

/// Ordinal tier derived from the performance score. Lower bounds are
/// inclusive at 80/60/40/20; anything above zero is at least Beginner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceTier {
    Inactive,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Elite,
}

impl PerformanceTier {
    pub fn from_score(score: f64) -> PerformanceTier {
        if score >= 80.0 {
            PerformanceTier::Elite
        } else if score >= 60.0 {
            PerformanceTier::Expert
        } else if score >= 40.0 {
            PerformanceTier::Advanced
        } else if score >= 20.0 {
            PerformanceTier::Intermediate
        } else if score > 0.0 {
            PerformanceTier::Beginner
        } else {
            PerformanceTier::Inactive
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::Elite => write!(f, "Elite"),
            PerformanceTier::Expert => write!(f, "Expert"),
            PerformanceTier::Advanced => write!(f, "Advanced"),
            PerformanceTier::Intermediate => write!(f, "Intermediate"),
            PerformanceTier::Beginner => write!(f, "Beginner"),
            PerformanceTier::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Engagement-rate bucket for a single video. The top bucket is
/// open-ended: a rate above 10% is Exceptional no matter how far it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VideoGrade {
    Low,
    Regular,
    Good,
    VeryGood,
    Exceptional,
}

impl VideoGrade {
    pub fn from_engagement(rate: f64) -> VideoGrade {
        if rate <= 1.0 {
            VideoGrade::Low
        } else if rate <= 3.0 {
            VideoGrade::Regular
        } else if rate <= 6.0 {
            VideoGrade::Good
        } else if rate <= 10.0 {
            VideoGrade::VeryGood
        } else {
            VideoGrade::Exceptional
        }
    }
}

impl fmt::Display for VideoGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoGrade::Low => write!(f, "Low"),
            VideoGrade::Regular => write!(f, "Regular"),
            VideoGrade::Good => write!(f, "Good"),
            VideoGrade::VeryGood => write!(f, "Very Good"),
            VideoGrade::Exceptional => write!(f, "Exceptional"),
        }
    }
}
