use rusqlite::Row;
use trendx_shared_models::{UserStats, VideoStats};

use crate::{Store, StoreError};

/// All owned video rows, plus how many rows the table holds in total
/// (rows without an owning user are skipped by the join).
#[derive(Debug)]
pub struct VideoBatch {
    pub total_in_db: u64,
    pub videos: Vec<VideoStats>,
}

/// Counters are stored as nullable integers by the collector; NULL and
/// any stray negative value both read back as 0.
fn counter(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(idx)?;
    Ok(value.max(0) as u64)
}

impl Store {
    /// Every cached user row with a usable display name, heaviest first.
    pub fn load_user_stats(&self) -> Result<Vec<UserStats>, StoreError> {
        let mut stmt = self.connection().prepare(
            "SELECT
                CAST(user_id AS TEXT),
                discord_username,
                COALESCE(total_videos, 0),
                COALESCE(total_views, 0),
                COALESCE(total_likes, 0),
                COALESCE(total_comments, 0),
                COALESCE(total_shares, 0),
                COALESCE(tiktok_views, 0),
                COALESCE(tiktok_videos, 0),
                COALESCE(youtube_views, 0),
                COALESCE(youtube_videos, 0),
                COALESCE(instagram_views, 0),
                COALESCE(instagram_videos, 0),
                updated_at
            FROM cached_stats
            WHERE discord_username IS NOT NULL
              AND discord_username != ''
            ORDER BY total_views DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(UserStats {
                user_id: row.get(0)?,
                username: row.get(1)?,
                total_videos: counter(row, 2)?,
                total_views: counter(row, 3)?,
                total_likes: counter(row, 4)?,
                total_comments: counter(row, 5)?,
                total_shares: counter(row, 6)?,
                tiktok_views: counter(row, 7)?,
                tiktok_videos: counter(row, 8)?,
                youtube_views: counter(row, 9)?,
                youtube_videos: counter(row, 10)?,
                instagram_views: counter(row, 11)?,
                instagram_videos: counter(row, 12)?,
                updated_at: row.get(13)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Video rows joined with their owner's display name, newest first.
    /// An absent `valid_videos` table is an empty batch, not an error:
    /// older collector databases predate that table.
    pub fn load_videos(&self) -> Result<VideoBatch, StoreError> {
        if !self.table_exists("valid_videos")? {
            return Ok(VideoBatch {
                total_in_db: 0,
                videos: Vec::new(),
            });
        }

        let total_in_db: i64 = self
            .connection()
            .query_row("SELECT COUNT(*) FROM valid_videos", [], |row| row.get(0))?;

        let mut stmt = self.connection().prepare(
            "SELECT
                v.id,
                CAST(v.user_id AS TEXT),
                cs.discord_username,
                COALESCE(v.platform, ''),
                COALESCE(v.views, 0),
                COALESCE(v.likes, 0),
                COALESCE(v.comments, 0),
                COALESCE(v.shares, 0),
                v.title,
                v.url
            FROM valid_videos v
            LEFT JOIN cached_stats cs ON v.user_id = cs.user_id
            WHERE cs.discord_username IS NOT NULL
              AND cs.discord_username != ''
            ORDER BY v.id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(VideoStats {
                id: row.get(0)?,
                user_id: row.get(1)?,
                username: row.get(2)?,
                platform: row.get(3)?,
                views: counter(row, 4)?,
                likes: counter(row, 5)?,
                comments: counter(row, 6)?,
                shares: counter(row, 7)?,
                title: row.get(8)?,
                url: row.get(9)?,
            })
        })?;

        Ok(VideoBatch {
            total_in_db: total_in_db.max(0) as u64,
            videos: rows.collect::<rusqlite::Result<Vec<_>>>()?,
        })
    }

    fn table_exists(&self, name: &str) -> Result<bool, StoreError> {
        let count: i64 = self.connection().query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
