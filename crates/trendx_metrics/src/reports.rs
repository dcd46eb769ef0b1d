use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use trendx_shared_models::{Platform, UserStats, VideoStats};

use crate::rank::dense_ranks;
use crate::rates::{dominant_platform, engagement_rate, round_to};
use crate::score::{performance_score, video_score, PerformanceTier, VideoGrade};
use crate::stats::{mean, median, quantile};

/// How active a user is relative to the whole loaded population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ActivityStatus {
    Inactive,
    LowActivity,
    Active,
    VeryActive,
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityStatus::Inactive => write!(f, "Inactive"),
            ActivityStatus::LowActivity => write!(f, "Low activity"),
            ActivityStatus::Active => write!(f, "Active"),
            ActivityStatus::VeryActive => write!(f, "Very active"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Consistency {
    NoData,
    Low,
    Medium,
    High,
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Consistency::NoData => write!(f, "No data"),
            Consistency::Low => write!(f, "Low"),
            Consistency::Medium => write!(f, "Medium"),
            Consistency::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum GrowthPotential {
    NoData,
    Low,
    Medium,
    High,
}

impl fmt::Display for GrowthPotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthPotential::NoData => write!(f, "No data"),
            GrowthPotential::Low => write!(f, "Low"),
            GrowthPotential::Medium => write!(f, "Medium"),
            GrowthPotential::High => write!(f, "High"),
        }
    }
}

/// A user decorated with every derived metric for one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct UserReport {
    pub stats: UserStats,
    pub interactions: u64,
    pub dominant_platform: Option<Platform>,
    pub engagement_rate: f64,
    pub performance_score: f64,
    pub tier: PerformanceTier,
    pub avg_views_per_video: f64,
    pub avg_likes_per_video: f64,
    pub avg_comments_per_video: f64,
    /// Dense ranks, 0 when the underlying metric is 0 (unranked).
    pub rank_views: u32,
    pub rank_likes: u32,
    pub rank_engagement: u32,
    pub rank_performance: u32,
    pub status: ActivityStatus,
    pub consistency: Consistency,
    pub growth_potential: GrowthPotential,
}

impl UserReport {
    pub fn is_active(&self) -> bool {
        self.stats.total_views > 0
    }

    /// Platforms the user has any views on, in the fixed display order.
    pub fn active_platforms(&self) -> Vec<Platform> {
        [
            (Platform::TikTok, self.stats.tiktok_views),
            (Platform::YouTube, self.stats.youtube_views),
            (Platform::Instagram, self.stats.instagram_views),
        ]
        .into_iter()
        .filter(|(_, views)| *views > 0)
        .map(|(platform, _)| platform)
        .collect()
    }
}

/// Mean metrics over the active subset, used for comparisons and insights.
#[derive(Debug, Clone, Copy)]
pub struct CohortAverages {
    pub active_users: usize,
    pub mean_views: f64,
    pub mean_likes: f64,
    pub mean_videos: f64,
    pub mean_engagement: f64,
    pub mean_score: f64,
}

impl CohortAverages {
    pub fn from_reports(reports: &[UserReport]) -> CohortAverages {
        let active: Vec<&UserReport> = reports.iter().filter(|r| r.is_active()).collect();
        let column = |f: fn(&UserReport) -> f64| -> Vec<f64> { active.iter().map(|r| f(r)).collect() };

        CohortAverages {
            active_users: active.len(),
            mean_views: mean(&column(|r| r.stats.total_views as f64)),
            mean_likes: mean(&column(|r| r.stats.total_likes as f64)),
            mean_videos: mean(&column(|r| r.stats.total_videos as f64)),
            mean_engagement: mean(&column(|r| r.engagement_rate)),
            mean_score: mean(&column(|r| r.performance_score)),
        }
    }
}

/// Decorates every user with derived metrics, ranks, and cohort-relative
/// labels. Quantile thresholds come from the full loaded population, the
/// same way the collector's dashboard computed them.
pub fn build_user_reports(users: &[UserStats]) -> Vec<UserReport> {
    let mut reports: Vec<UserReport> = users
        .iter()
        .map(|u| {
            let dominant = dominant_platform(u.tiktok_views, u.youtube_views, u.instagram_views);
            let rate = engagement_rate(
                u.total_views,
                u.total_likes,
                u.total_comments,
                u.total_shares,
                dominant,
            );
            let score = performance_score(
                u.total_views,
                u.total_likes,
                u.total_comments,
                u.total_shares,
                u.total_videos,
                dominant,
            );
            // Per-video averages treat an empty catalog as one video so the
            // division stays defined.
            let denominator = u.total_videos.max(1) as f64;

            UserReport {
                interactions: u.total_likes + u.total_comments + u.total_shares,
                dominant_platform: dominant,
                engagement_rate: rate,
                performance_score: score,
                tier: PerformanceTier::from_score(score),
                avg_views_per_video: round_to(u.total_views as f64 / denominator, 0),
                avg_likes_per_video: round_to(u.total_likes as f64 / denominator, 0),
                avg_comments_per_video: round_to(u.total_comments as f64 / denominator, 2),
                rank_views: 0,
                rank_likes: 0,
                rank_engagement: 0,
                rank_performance: 0,
                status: ActivityStatus::Inactive,
                consistency: Consistency::NoData,
                growth_potential: GrowthPotential::NoData,
                stats: u.clone(),
            }
        })
        .collect();

    let views: Vec<f64> = reports.iter().map(|r| r.stats.total_views as f64).collect();
    let likes: Vec<f64> = reports.iter().map(|r| r.stats.total_likes as f64).collect();
    let rates: Vec<f64> = reports.iter().map(|r| r.engagement_rate).collect();
    let scores: Vec<f64> = reports.iter().map(|r| r.performance_score).collect();
    let videos: Vec<f64> = reports.iter().map(|r| r.stats.total_videos as f64).collect();

    let rank_views = dense_ranks(&views);
    let rank_likes = dense_ranks(&likes);
    let rank_engagement = dense_ranks(&rates);
    let rank_performance = dense_ranks(&scores);

    let views_median = median(&views);
    let views_q75 = quantile(&views, 0.75);
    let rate_median = median(&rates);
    let rate_q75 = quantile(&rates, 0.75);
    let videos_median = median(&videos);

    for (i, report) in reports.iter_mut().enumerate() {
        report.rank_views = rank_views[i];
        report.rank_likes = rank_likes[i];
        report.rank_engagement = rank_engagement[i];
        report.rank_performance = rank_performance[i];

        let user_views = report.stats.total_views as f64;
        report.status = if report.stats.total_views == 0 {
            ActivityStatus::Inactive
        } else if user_views >= views_q75 {
            ActivityStatus::VeryActive
        } else if user_views >= views_median {
            ActivityStatus::Active
        } else {
            ActivityStatus::LowActivity
        };

        report.consistency = if report.stats.total_videos > 5 {
            if report.engagement_rate > rate_median {
                Consistency::High
            } else {
                Consistency::Medium
            }
        } else if report.stats.total_videos > 0 {
            Consistency::Low
        } else {
            Consistency::NoData
        };

        report.growth_potential = if report.stats.total_views == 0 {
            GrowthPotential::NoData
        } else if report.engagement_rate > rate_q75
            && (report.stats.total_videos as f64) < videos_median
        {
            GrowthPotential::High
        } else if report.engagement_rate > rate_median {
            GrowthPotential::Medium
        } else {
            GrowthPotential::Low
        };
    }

    reports
}

/// One video decorated with its derived metrics.
#[derive(Debug, Clone, Serialize)]
pub struct VideoReport {
    pub stats: VideoStats,
    pub platform: Option<Platform>,
    pub interactions: u64,
    pub engagement_rate: f64,
    pub score: f64,
    pub grade: VideoGrade,
    pub has_link: bool,
}

pub fn build_video_reports(videos: &[VideoStats]) -> Vec<VideoReport> {
    videos
        .iter()
        .map(|v| {
            let platform = Platform::from_tag(&v.platform);
            let rate = engagement_rate(v.views, v.likes, v.comments, v.shares, platform);

            VideoReport {
                platform,
                interactions: v.likes + v.comments + v.shares,
                engagement_rate: rate,
                score: video_score(v.views, v.likes, v.comments, v.shares, platform),
                grade: VideoGrade::from_engagement(rate),
                // Anything at ten characters or shorter is a placeholder,
                // not a working URL.
                has_link: v.url.as_deref().is_some_and(|u| u.trim().len() > 10),
                stats: v.clone(),
            }
        })
        .collect()
}

/// The metric a ranking table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMetric {
    Views,
    Likes,
    Engagement,
    Score,
}

impl RankingMetric {
    pub fn value(&self, report: &UserReport) -> f64 {
        match self {
            RankingMetric::Views => report.stats.total_views as f64,
            RankingMetric::Likes => report.stats.total_likes as f64,
            RankingMetric::Engagement => report.engagement_rate,
            RankingMetric::Score => report.performance_score,
        }
    }

    pub fn rank(&self, report: &UserReport) -> u32 {
        match self {
            RankingMetric::Views => report.rank_views,
            RankingMetric::Likes => report.rank_likes,
            RankingMetric::Engagement => report.rank_engagement,
            RankingMetric::Score => report.rank_performance,
        }
    }
}

impl FromStr for RankingMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "views" => Ok(RankingMetric::Views),
            "likes" => Ok(RankingMetric::Likes),
            "engagement" => Ok(RankingMetric::Engagement),
            "score" => Ok(RankingMetric::Score),
            other => Err(format!(
                "unknown metric '{other}' (expected views, likes, engagement, or score)"
            )),
        }
    }
}

/// Top `n` reports by the given metric, descending.
pub fn top_by<'a>(reports: &'a [UserReport], metric: RankingMetric, n: usize) -> Vec<&'a UserReport> {
    reports
        .iter()
        .sorted_by(|a, b| metric.value(b).total_cmp(&metric.value(a)))
        .take(n)
        .collect()
}

/// Executive summary over the whole user population.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_users: usize,
    pub active_users: usize,
    pub inactive_users: usize,
    pub activation_rate: f64,
    pub total_videos: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub mean_engagement: f64,
    pub tier_distribution: Vec<(PerformanceTier, usize)>,
    pub status_distribution: Vec<(ActivityStatus, usize)>,
}

impl Overview {
    pub fn from_reports(reports: &[UserReport]) -> Overview {
        let total_users = reports.len();
        let active_users = reports.iter().filter(|r| r.is_active()).count();
        let active_rates: Vec<f64> = reports
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.engagement_rate)
            .collect();

        // Tier distribution only covers active users; the inactive column
        // is already its own KPI.
        let tier_distribution = reports
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.tier)
            .counts()
            .into_iter()
            .sorted_by_key(|(tier, _)| std::cmp::Reverse(*tier))
            .collect();

        let status_distribution = reports
            .iter()
            .map(|r| r.status)
            .counts()
            .into_iter()
            .sorted_by_key(|(status, _)| std::cmp::Reverse(*status))
            .collect();

        Overview {
            total_users,
            active_users,
            inactive_users: total_users - active_users,
            activation_rate: if total_users == 0 {
                0.0
            } else {
                active_users as f64 / total_users as f64 * 100.0
            },
            total_videos: reports.iter().map(|r| r.stats.total_videos).sum(),
            total_views: reports.iter().map(|r| r.stats.total_views).sum(),
            total_likes: reports.iter().map(|r| r.stats.total_likes).sum(),
            mean_engagement: mean(&active_rates),
            tier_distribution,
            status_distribution,
        }
    }
}

/// Mean/median/max spread of one video metric.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Spread {
    pub mean: f64,
    pub median: f64,
    pub max: f64,
}

impl Spread {
    fn of(values: &[f64]) -> Spread {
        Spread {
            mean: mean(values),
            median: median(values),
            max: crate::stats::max(values),
        }
    }
}

/// Summary statistics over a set of video reports.
#[derive(Debug, Clone, Serialize)]
pub struct VideoSummary {
    pub total: usize,
    pub with_links: usize,
    pub link_share: f64,
    pub total_views: u64,
    pub views: Spread,
    pub likes: Spread,
    pub comments: Spread,
    pub engagement: Spread,
}

impl VideoSummary {
    pub fn from_reports(reports: &[VideoReport]) -> VideoSummary {
        let with_links = reports.iter().filter(|r| r.has_link).count();
        let column = |f: fn(&VideoReport) -> f64| -> Vec<f64> { reports.iter().map(f).collect() };

        VideoSummary {
            total: reports.len(),
            with_links,
            link_share: if reports.is_empty() {
                0.0
            } else {
                with_links as f64 / reports.len() as f64 * 100.0
            },
            total_views: reports.iter().map(|r| r.stats.views).sum(),
            views: Spread::of(&column(|r| r.stats.views as f64)),
            likes: Spread::of(&column(|r| r.stats.likes as f64)),
            comments: Spread::of(&column(|r| r.stats.comments as f64)),
            engagement: Spread::of(&column(|r| r.engagement_rate)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, videos: u64, views: u64, likes: u64) -> UserStats {
        UserStats {
            user_id: format!("id-{name}"),
            username: name.to_string(),
            total_videos: videos,
            total_views: views,
            total_likes: likes,
            total_comments: 0,
            total_shares: 0,
            tiktok_views: views,
            tiktok_videos: videos,
            youtube_views: 0,
            youtube_videos: 0,
            instagram_views: 0,
            instagram_videos: 0,
            updated_at: None,
        }
    }

    fn video(id: i64, platform: &str, views: u64, likes: u64, url: Option<&str>) -> VideoStats {
        VideoStats {
            id,
            user_id: "id-a".to_string(),
            username: "a".to_string(),
            platform: platform.to_string(),
            views,
            likes,
            comments: 0,
            shares: 0,
            title: Some(format!("video {id}")),
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn inactive_users_are_unranked_and_flagged() {
        let reports = build_user_reports(&[
            user("a", 10, 10_000, 500),
            user("b", 5, 1_000, 20),
            user("sleeper", 0, 0, 0),
        ]);

        let sleeper = &reports[2];
        assert!(!sleeper.is_active());
        assert_eq!(sleeper.rank_views, 0);
        assert_eq!(sleeper.rank_performance, 0);
        assert_eq!(sleeper.status, ActivityStatus::Inactive);
        assert_eq!(sleeper.consistency, Consistency::NoData);
        assert_eq!(sleeper.growth_potential, GrowthPotential::NoData);
        assert_eq!(sleeper.tier, PerformanceTier::Inactive);
    }

    #[test]
    fn ranks_are_dense_within_the_active_subset() {
        let reports = build_user_reports(&[
            user("a", 10, 5_000, 100),
            user("b", 10, 5_000, 80),
            user("c", 10, 1_000, 80),
            user("zero", 0, 0, 0),
        ]);

        let rank_views: Vec<u32> = reports.iter().map(|r| r.rank_views).collect();
        assert_eq!(rank_views, vec![1, 1, 2, 0]);

        let rank_likes: Vec<u32> = reports.iter().map(|r| r.rank_likes).collect();
        assert_eq!(rank_likes, vec![1, 2, 2, 0]);
    }

    #[test]
    fn dominant_platform_feeds_the_engagement_formula() {
        let mut stats = user("yt", 10, 1_000, 50);
        stats.tiktok_views = 0;
        stats.tiktok_videos = 0;
        stats.youtube_views = 1_000;
        stats.youtube_videos = 10;
        stats.total_comments = 10;
        stats.total_shares = 5;

        let reports = build_user_reports(&[stats]);
        assert_eq!(reports[0].dominant_platform, Some(Platform::YouTube));
        // Shares excluded under the YouTube formula.
        assert_eq!(reports[0].engagement_rate, 6.00);
    }

    #[test]
    fn per_video_averages_survive_an_empty_catalog() {
        let mut stats = user("odd", 0, 500, 50);
        stats.total_videos = 0;
        let reports = build_user_reports(&[stats]);
        assert_eq!(reports[0].avg_views_per_video, 500.0);
    }

    #[test]
    fn overview_counts_match_the_population() {
        let reports = build_user_reports(&[
            user("a", 10, 10_000, 500),
            user("b", 5, 1_000, 20),
            user("zero", 0, 0, 0),
        ]);
        let overview = Overview::from_reports(&reports);

        assert_eq!(overview.total_users, 3);
        assert_eq!(overview.active_users, 2);
        assert_eq!(overview.inactive_users, 1);
        assert_eq!(overview.total_views, 11_000);
        let tier_total: usize = overview.tier_distribution.iter().map(|(_, n)| n).sum();
        assert_eq!(tier_total, 2);

        // Status covers everyone, including the inactive user.
        let status_total: usize = overview.status_distribution.iter().map(|(_, n)| n).sum();
        assert_eq!(status_total, 3);
        assert!(overview
            .status_distribution
            .iter()
            .any(|(status, n)| *status == ActivityStatus::Inactive && *n == 1));
    }

    #[test]
    fn video_reports_grade_and_detect_links() {
        let reports = build_video_reports(&[
            video(1, "youtube", 1_000, 50, Some("https://youtu.be/abc123")),
            video(2, "tiktok", 1_000, 5, Some("short")),
            video(3, "unknown-net", 0, 0, None),
        ]);

        assert_eq!(reports[0].platform, Some(Platform::YouTube));
        assert_eq!(reports[0].engagement_rate, 5.0);
        assert_eq!(reports[0].grade, VideoGrade::Good);
        assert!(reports[0].has_link);

        assert_eq!(reports[1].grade, VideoGrade::Low);
        assert!(!reports[1].has_link);

        assert_eq!(reports[2].platform, None);
        assert_eq!(reports[2].engagement_rate, 0.0);
        assert!(!reports[2].has_link);
    }

    #[test]
    fn top_by_orders_descending() {
        let reports = build_user_reports(&[
            user("small", 5, 1_000, 20),
            user("big", 10, 50_000, 900),
            user("mid", 8, 9_000, 100),
        ]);

        let top = top_by(&reports, RankingMetric::Views, 2);
        assert_eq!(top[0].stats.username, "big");
        assert_eq!(top[1].stats.username, "mid");
    }

    #[test]
    fn video_summary_spreads() {
        let reports = build_video_reports(&[
            video(1, "tiktok", 100, 10, Some("https://example.com/1")),
            video(2, "tiktok", 300, 30, None),
        ]);
        let summary = VideoSummary::from_reports(&reports);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.with_links, 1);
        assert_eq!(summary.link_share, 50.0);
        assert_eq!(summary.total_views, 400);
        assert_eq!(summary.views.mean, 200.0);
        assert_eq!(summary.views.max, 300.0);
    }
}
