use trendx_shared_models::Platform;

/// Rounds half-to-even at `decimals` places, matching how the collector
/// bot stored its derived columns.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Engagement rate as a percentage, using each network's own formula.
/// - YouTube counts likes and comments only.
/// - TikTok and Instagram weigh every interaction; unknown platforms use
///   the same general formula.
///
/// Zero views is a defined zero, not an error. The rate is unbounded
/// above: more likes than views yields a rate over 100%.
pub fn engagement_rate(
    views: u64,
    likes: u64,
    comments: u64,
    shares: u64,
    platform: Option<Platform>,
) -> f64 {
    if views == 0 {
        return 0.0;
    }

    let interactions = match platform {
        Some(Platform::YouTube) => likes + comments,
        Some(Platform::TikTok) | Some(Platform::Instagram) | None => likes + comments + shares,
    };

    round_to(interactions as f64 / views as f64 * 100.0, 2)
}

/// Picks the platform contributing the most views. Ties go to the first
/// maximum in the fixed TikTok, YouTube, Instagram order; all-zero input
/// means the user has no dominant platform.
pub fn dominant_platform(
    tiktok_views: u64,
    youtube_views: u64,
    instagram_views: u64,
) -> Option<Platform> {
    let candidates = [
        (Platform::TikTok, tiktok_views),
        (Platform::YouTube, youtube_views),
        (Platform::Instagram, instagram_views),
    ];

    // Strict comparison keeps the first maximum, so ties resolve in the
    // fixed order above.
    let mut best = candidates[0];
    for candidate in candidates.into_iter().skip(1) {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }

    (best.1 > 0).then_some(best.0)
}
