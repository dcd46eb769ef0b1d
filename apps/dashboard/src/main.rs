use anyhow::Context;
use chrono::Local;
use clap::Parser;
use dotenv::dotenv;
use serde_json::json;
use trendx_metrics::reports::{top_by, CohortAverages, RankingMetric};
use trendx_metrics::{
    build_user_reports, build_video_reports, user_insights, Overview, UserReport, VideoReport,
    VideoSummary,
};
use trendx_shared_models::Platform;
use trendx_store::{default_db_path, Store, VideoBatch};

mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Text dashboard over the TrendX collector database", long_about = None)]
struct Args {
    /// Database path (overrides TRENDX_DB_PATH)
    #[arg(long)]
    db: Option<String>,

    /// Show user rankings instead of the overview
    #[arg(long)]
    rankings: bool,

    /// Individual report for one user (by display name)
    #[arg(long)]
    user: Option<String>,

    /// Show the video table and summary
    #[arg(long)]
    videos: bool,

    /// Ranking metric: views, likes, engagement, or score
    #[arg(long, default_value = "views")]
    metric: String,

    /// How many rows to show
    #[arg(long, default_value = "10")]
    top: usize,

    /// Keep users with no recorded views in the rankings
    #[arg(long)]
    include_inactive: bool,

    /// Restrict to one platform (tiktok, youtube, instagram)
    #[arg(long)]
    platform: Option<String>,

    /// Minimum view count for the video table
    #[arg(long, default_value = "0")]
    min_views: u64,

    /// Only videos with a working link
    #[arg(long)]
    links_only: bool,

    /// Emit JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn parse_platform(tag: &str) -> anyhow::Result<Platform> {
    Platform::from_tag(tag).ok_or_else(|| {
        anyhow::anyhow!("unknown platform '{tag}' (expected tiktok, youtube, or instagram)")
    })
}

fn show_overview(reports: &[UserReport], db_path: &str, as_json: bool) -> anyhow::Result<()> {
    let overview = Overview::from_reports(reports);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    println!("\n===== TrendX Analytics Overview =====");
    println!(
        "Database: {} | Generated: {}",
        db_path,
        Local::now().format("%Y-%m-%d %H:%M")
    );

    render::overview_kpis(&overview).printstd();

    println!("\n===== Performance Tiers (active users) =====");
    render::distribution_table("Tier", &overview.tier_distribution).printstd();

    println!("\n===== Activity Status =====");
    render::distribution_table("Status", &overview.status_distribution).printstd();

    println!("\n===== Top Performers =====");
    let top = top_by(reports, RankingMetric::Score, 5);
    render::top_performers_table(&top).printstd();

    let inactive: Vec<&str> = reports
        .iter()
        .filter(|r| !r.is_active())
        .map(|r| r.stats.username.as_str())
        .collect();
    if !inactive.is_empty() {
        println!("\n===== Inactive Users ({}) =====", inactive.len());
        println!("{}", inactive.join(", "));
    }

    Ok(())
}

fn show_rankings(reports: &[UserReport], args: &Args) -> anyhow::Result<()> {
    if let Some(tag) = &args.platform {
        let platform = parse_platform(tag)?;
        let mut entries: Vec<&UserReport> = reports
            .iter()
            .filter(|r| args.include_inactive || r.stats.platform_views(platform) > 0)
            .collect();
        entries.sort_by(|a, b| {
            b.stats
                .platform_views(platform)
                .cmp(&a.stats.platform_views(platform))
        });
        entries.truncate(args.top);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        println!("\n===== {platform} Rankings (top {}) =====", args.top);
        render::platform_rankings_table(&entries, platform).printstd();
        return Ok(());
    }

    let metric: RankingMetric = args.metric.parse().map_err(anyhow::Error::msg)?;
    let ranked: Vec<UserReport> = reports
        .iter()
        .filter(|r| args.include_inactive || r.is_active())
        .cloned()
        .collect();
    let entries = top_by(&ranked, metric, args.top);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!(
        "\n===== User Rankings by {} (top {}) =====",
        args.metric.to_lowercase(),
        args.top
    );
    render::rankings_table(&entries, metric).printstd();
    Ok(())
}

fn show_user(reports: &[UserReport], name: &str, as_json: bool) -> anyhow::Result<()> {
    let report = reports
        .iter()
        .find(|r| r.stats.username.eq_ignore_ascii_case(name))
        .with_context(|| format!("user '{name}' not found in the database"))?;

    let cohort = CohortAverages::from_reports(reports);
    let (insights, recommendations) = user_insights(report, &cohort);

    if as_json {
        let payload = json!({
            "report": report,
            "insights": insights,
            "recommendations": recommendations,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("\n===== User Report: {} =====", report.stats.username);
    render::user_metrics_table(report).printstd();

    println!("\n===== Platform Breakdown =====");
    render::platform_breakdown_table(report).printstd();

    println!("\n===== Rank Positions =====");
    render::rank_positions_table(report, cohort.active_users).printstd();

    println!("\n===== Insights =====");
    for line in &insights {
        println!("  * {line}");
    }
    println!("\n===== Recommendations =====");
    for line in &recommendations {
        println!("  * {line}");
    }

    Ok(())
}

fn show_videos(batch: &VideoBatch, args: &Args) -> anyhow::Result<()> {
    let platform = args.platform.as_deref().map(parse_platform).transpose()?;
    let reports = build_video_reports(&batch.videos);

    let mut selected: Vec<&VideoReport> = reports
        .iter()
        .filter(|r| platform.is_none() || r.platform == platform)
        .filter(|r| r.stats.views >= args.min_views)
        .filter(|r| !args.links_only || r.has_link)
        .collect();
    selected.sort_by(|a, b| b.score.total_cmp(&a.score));

    let summary = VideoSummary::from_reports(
        &selected.iter().map(|r| (*r).clone()).collect::<Vec<_>>(),
    );
    selected.truncate(args.top);

    if args.json {
        let payload = json!({ "summary": summary, "videos": selected });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("\n===== Videos (top {} of {} matching) =====", args.top, summary.total);
    println!(
        "Tracked: {} owned / {} total in database | With links: {} ({:.1}%)",
        batch.videos.len(),
        batch.total_in_db,
        summary.with_links,
        summary.link_share
    );
    render::videos_table(&selected).printstd();

    println!("\n===== Video Summary =====");
    render::video_summary_table(&summary).printstd();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let db_path = args.db.clone().unwrap_or_else(default_db_path);
    let store =
        Store::open(&db_path).with_context(|| format!("failed to open database at {db_path}"))?;

    let users = store
        .load_user_stats()
        .context("failed to load user statistics")?;
    if users.is_empty() {
        eprintln!("No users found in {db_path}; has the collector run yet?");
        return Ok(());
    }
    let reports = build_user_reports(&users);

    if let Some(name) = &args.user {
        return show_user(&reports, name, args.json);
    }
    if args.rankings {
        return show_rankings(&reports, &args);
    }
    if args.videos {
        let batch = store.load_videos().context("failed to load videos")?;
        return show_videos(&batch, &args);
    }
    show_overview(&reports, &db_path, args.json)
}
