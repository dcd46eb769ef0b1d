use crate::reports::{CohortAverages, UserReport};

/// Plain-language observations and suggestions for one user, measured
/// against the active cohort. Returns (insights, recommendations).
pub fn user_insights(
    report: &UserReport,
    cohort: &CohortAverages,
) -> (Vec<String>, Vec<String>) {
    let mut insights = Vec::new();
    let mut recommendations = Vec::new();

    if !report.is_active() {
        insights.push("Inactive user - no views recorded yet".to_string());
        recommendations.push("Start publishing on the tracked platforms".to_string());
        recommendations.push("Establish a consistent posting schedule".to_string());
        return (insights, recommendations);
    }

    let ranked = cohort.active_users as f64;
    if report.rank_views as f64 <= ranked * 0.1 {
        insights.push("Top 10% of the cohort by total views".to_string());
    } else if report.rank_views as f64 <= ranked * 0.25 {
        insights.push("Top 25% of the cohort by total views".to_string());
    }

    if report.rank_performance as f64 <= ranked * 0.1 {
        insights.push("Exceptional performance - top 10% overall".to_string());
    }

    let rate = report.engagement_rate;
    if rate > cohort.mean_engagement * 2.0 {
        insights.push("Engagement rate is double the cohort average".to_string());
        recommendations.push("Increase posting frequency to maximize reach".to_string());
    } else if rate > cohort.mean_engagement {
        insights.push("Engagement rate above the cohort average".to_string());
        recommendations.push("Review your best videos and replicate what worked".to_string());
    } else {
        insights.push("Engagement has room to improve".to_string());
        recommendations
            .push("Use stronger calls to action and reply to comments".to_string());
    }

    let videos = report.stats.total_videos;
    if videos > 100 {
        insights.push("Very active creator with a large catalog".to_string());
        if rate < cohort.mean_engagement {
            recommendations
                .push("Favor production quality over volume for the next uploads".to_string());
        }
    } else if videos < 20 {
        insights.push("Small catalog - room to grow with more content".to_string());
        recommendations.push("Establish a consistent posting schedule".to_string());
    }

    let platforms = report.active_platforms();
    if platforms.len() == 1 {
        recommendations.push(format!(
            "Consider expanding beyond {} to diversify reach",
            platforms[0]
        ));
    } else if platforms.len() >= 2 {
        insights.push(format!(
            "Good diversification: active on {} platforms",
            platforms.len()
        ));
    }

    (insights, recommendations)
}
