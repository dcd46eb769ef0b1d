use prettytable::{format, row, Table};
use trendx_metrics::format::{format_compact, format_count};
use trendx_metrics::rank::RankBand;
use trendx_metrics::reports::{Overview, RankingMetric, Spread, UserReport, VideoReport, VideoSummary};
use trendx_shared_models::Platform;

fn base_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

pub fn overview_kpis(overview: &Overview) -> Table {
    let mut table = base_table();
    table.add_row(row!["Users", overview.total_users]);
    table.add_row(row![
        "Active users",
        format!("{} ({:.1}%)", overview.active_users, overview.activation_rate)
    ]);
    table.add_row(row!["Inactive users", overview.inactive_users]);
    table.add_row(row!["Videos tracked", format_count(overview.total_videos)]);
    table.add_row(row!["Total views", format_count(overview.total_views)]);
    table.add_row(row!["Total likes", format_count(overview.total_likes)]);
    table.add_row(row![
        "Avg engagement (active)",
        format!("{:.2}%", overview.mean_engagement)
    ]);
    table
}

pub fn distribution_table<T: std::fmt::Display>(label: &str, rows: &[(T, usize)]) -> Table {
    let total: usize = rows.iter().map(|(_, count)| *count).sum();
    let mut table = base_table();
    table.add_row(row![label, "Users", "Share"]);
    for (key, count) in rows {
        let share = if total == 0 {
            0.0
        } else {
            *count as f64 / total as f64 * 100.0
        };
        table.add_row(row![key, count, format!("{share:.1}%")]);
    }
    table
}

fn metric_label(metric: RankingMetric) -> &'static str {
    match metric {
        RankingMetric::Views => "Views",
        RankingMetric::Likes => "Likes",
        RankingMetric::Engagement => "Engagement",
        RankingMetric::Score => "Score",
    }
}

fn metric_display(report: &UserReport, metric: RankingMetric) -> String {
    match metric {
        RankingMetric::Views | RankingMetric::Likes => format_compact(metric.value(report)),
        RankingMetric::Engagement => format!("{:.2}%", report.engagement_rate),
        RankingMetric::Score => format!("{:.1}", report.performance_score),
    }
}

pub fn rankings_table(entries: &[&UserReport], metric: RankingMetric) -> Table {
    let mut table = base_table();
    table.add_row(row![
        "Rank",
        "User",
        metric_label(metric),
        "Engagement",
        "Score",
        "Tier",
        "Platform"
    ]);
    for report in entries {
        let platform = report
            .dominant_platform
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row![
            metric.rank(report),
            report.stats.username,
            metric_display(report, metric),
            format!("{:.2}%", report.engagement_rate),
            format!("{:.1}", report.performance_score),
            report.tier,
            platform,
        ]);
    }
    table
}

pub fn platform_rankings_table(entries: &[&UserReport], platform: Platform) -> Table {
    let mut table = base_table();
    table.add_row(row![
        "#",
        "User",
        format!("{platform} views"),
        format!("{platform} videos"),
        "Engagement",
        "Tier"
    ]);
    for (i, report) in entries.iter().enumerate() {
        table.add_row(row![
            i + 1,
            report.stats.username,
            format_count(report.stats.platform_views(platform)),
            report.stats.platform_videos(platform),
            format!("{:.2}%", report.engagement_rate),
            report.tier,
        ]);
    }
    table
}

pub fn top_performers_table(entries: &[&UserReport]) -> Table {
    let mut table = base_table();
    table.add_row(row!["#", "User", "Score", "Tier", "Views", "Engagement"]);
    for (i, report) in entries.iter().enumerate() {
        table.add_row(row![
            i + 1,
            report.stats.username,
            format!("{:.1}", report.performance_score),
            report.tier,
            format_count(report.stats.total_views),
            format!("{:.2}%", report.engagement_rate),
        ]);
    }
    table
}

pub fn user_metrics_table(report: &UserReport) -> Table {
    let stats = &report.stats;
    let mut table = base_table();
    table.add_row(row![
        "Performance score",
        format!("{:.1} ({})", report.performance_score, report.tier)
    ]);
    table.add_row(row!["Engagement rate", format!("{:.2}%", report.engagement_rate)]);
    table.add_row(row![
        "Dominant platform",
        report
            .dominant_platform
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string())
    ]);
    table.add_row(row!["Total videos", stats.total_videos]);
    table.add_row(row!["Total views", format_count(stats.total_views)]);
    table.add_row(row!["Total likes", format_count(stats.total_likes)]);
    table.add_row(row!["Total comments", format_count(stats.total_comments)]);
    table.add_row(row!["Total shares", format_count(stats.total_shares)]);
    table.add_row(row!["Interactions", format_count(report.interactions)]);
    table.add_row(row!["Avg views/video", format_compact(report.avg_views_per_video)]);
    table.add_row(row!["Avg likes/video", format_compact(report.avg_likes_per_video)]);
    table.add_row(row![
        "Avg comments/video",
        format!("{:.2}", report.avg_comments_per_video)
    ]);
    table.add_row(row!["Activity", report.status]);
    table.add_row(row!["Consistency", report.consistency]);
    table.add_row(row!["Growth potential", report.growth_potential]);
    table.add_row(row![
        "Last updated",
        stats.updated_at.as_deref().unwrap_or("-")
    ]);
    table
}

pub fn platform_breakdown_table(report: &UserReport) -> Table {
    let mut table = base_table();
    table.add_row(row!["Platform", "Views", "Videos"]);
    for platform in [Platform::TikTok, Platform::YouTube, Platform::Instagram] {
        table.add_row(row![
            platform,
            format_count(report.stats.platform_views(platform)),
            report.stats.platform_videos(platform),
        ]);
    }
    table
}

pub fn rank_positions_table(report: &UserReport, ranked_total: usize) -> Table {
    let mut table = base_table();
    table.add_row(row!["Metric", "Rank", "Band"]);
    let rows = [
        ("Views", report.rank_views),
        ("Likes", report.rank_likes),
        ("Engagement", report.rank_engagement),
        ("Performance", report.rank_performance),
    ];
    for (label, rank) in rows {
        let band = RankBand::from_position(rank, ranked_total)
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());
        let position = if rank == 0 {
            "-".to_string()
        } else {
            format!("#{rank} of {ranked_total}")
        };
        table.add_row(row![label, position, band]);
    }
    table
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

pub fn videos_table(entries: &[&VideoReport]) -> Table {
    let mut table = base_table();
    table.add_row(row![
        "#", "Creator", "Platform", "Title", "Views", "Likes", "Engagement", "Score", "Grade",
        "Link"
    ]);
    for (i, report) in entries.iter().enumerate() {
        let platform = report
            .platform
            .map(|p| p.to_string())
            .unwrap_or_else(|| report.stats.platform.clone());
        table.add_row(row![
            i + 1,
            report.stats.username,
            platform,
            truncated(report.stats.title.as_deref().unwrap_or("-"), 40),
            format_count(report.stats.views),
            format_count(report.stats.likes),
            format!("{:.2}%", report.engagement_rate),
            format!("{:.2}", report.score),
            report.grade,
            if report.has_link { "yes" } else { "no" },
        ]);
    }
    table
}

fn spread_cells(spread: &Spread, percent: bool) -> [String; 3] {
    if percent {
        [
            format!("{:.2}%", spread.mean),
            format!("{:.2}%", spread.median),
            format!("{:.2}%", spread.max),
        ]
    } else {
        [
            format_compact(spread.mean),
            format_compact(spread.median),
            format_compact(spread.max),
        ]
    }
}

pub fn video_summary_table(summary: &VideoSummary) -> Table {
    let mut table = base_table();
    table.add_row(row!["Metric", "Mean", "Median", "Max"]);
    let rows = [
        ("Views", &summary.views, false),
        ("Likes", &summary.likes, false),
        ("Comments", &summary.comments, false),
        ("Engagement", &summary.engagement, true),
    ];
    for (label, spread, percent) in rows {
        let [mean, median, max] = spread_cells(spread, percent);
        table.add_row(row![label, mean, median, max]);
    }
    table
}
