pub mod format;
pub mod insights;
pub mod rank;
pub mod rates;
pub mod reports;
pub mod score;
pub mod stats;

pub use insights::user_insights;
pub use rank::{dense_ranks, RankBand};
pub use rates::{dominant_platform, engagement_rate};
pub use reports::{
    build_user_reports, build_video_reports, Overview, UserReport, VideoReport, VideoSummary,
};
pub use score::{performance_score, video_score, PerformanceTier, VideoGrade};
