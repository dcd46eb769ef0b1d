use trendx_store::{Store, StoreError};

fn store_with_users() -> Store {
    let store = Store::open_in_memory().expect("in-memory database");
    store
        .connection()
        .execute_batch(
            "CREATE TABLE cached_stats (
                user_id TEXT,
                discord_username TEXT,
                total_videos INTEGER,
                total_views INTEGER,
                total_likes INTEGER,
                total_comments INTEGER,
                total_shares INTEGER,
                tiktok_views INTEGER,
                tiktok_videos INTEGER,
                youtube_views INTEGER,
                youtube_videos INTEGER,
                instagram_views INTEGER,
                instagram_videos INTEGER,
                updated_at TEXT
            );
            INSERT INTO cached_stats VALUES
                ('1', 'alice', 10, 5000, 300, 40, 12, 5000, 10, 0, 0, 0, 0, '2024-05-01 10:00:00'),
                ('2', 'bob', 3, 900, 50, NULL, NULL, 0, 0, 900, 3, 0, 0, NULL),
                ('3', 'carol', NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL),
                ('4', '', 5, 99999, 1, 1, 1, 0, 0, 0, 0, 99999, 5, NULL),
                ('5', NULL, 5, 88888, 1, 1, 1, 0, 0, 0, 0, 88888, 5, NULL);",
        )
        .expect("seed cached_stats");
    store
}

fn add_videos(store: &Store) {
    store
        .connection()
        .execute_batch(
            "CREATE TABLE valid_videos (
                id INTEGER PRIMARY KEY,
                user_id TEXT,
                platform TEXT,
                views INTEGER,
                likes INTEGER,
                comments INTEGER,
                shares INTEGER,
                title TEXT,
                url TEXT
            );
            INSERT INTO valid_videos VALUES
                (1, '1', 'tiktok', 1200, 80, 10, 4, 'first clip', 'https://tiktok.com/v/1'),
                (2, '1', 'tiktok', 3800, 220, 30, 8, NULL, NULL),
                (3, '2', 'youtube', 900, 50, NULL, NULL, 'bob vlog', 'https://youtu.be/xyz'),
                (4, '999', 'tiktok', 10, 1, 0, 0, 'orphan', NULL);",
        )
        .expect("seed valid_videos");
}

#[test]
fn users_come_back_heaviest_first_with_nulls_coalesced() {
    let store = store_with_users();
    let users = store.load_user_stats().expect("load users");

    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);

    let bob = &users[1];
    assert_eq!(bob.total_comments, 0);
    assert_eq!(bob.total_shares, 0);
    assert_eq!(bob.updated_at, None);

    let carol = &users[2];
    assert_eq!(carol.total_views, 0);
    assert_eq!(carol.total_videos, 0);
}

#[test]
fn unnamed_users_are_filtered_out() {
    let store = store_with_users();
    let users = store.load_user_stats().expect("load users");
    assert!(users.iter().all(|u| !u.username.is_empty()));
    assert_eq!(users.len(), 3);
}

#[test]
fn videos_join_owner_names_and_skip_orphans() {
    let store = store_with_users();
    add_videos(&store);

    let batch = store.load_videos().expect("load videos");
    assert_eq!(batch.total_in_db, 4);
    assert_eq!(batch.videos.len(), 3);

    // Newest first.
    let ids: Vec<i64> = batch.videos.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let untitled = &batch.videos[1];
    assert_eq!(untitled.username, "alice");
    assert_eq!(untitled.title, None);
    assert_eq!(untitled.url, None);

    let bob_vlog = &batch.videos[0];
    assert_eq!(bob_vlog.comments, 0);
    assert_eq!(bob_vlog.url.as_deref(), Some("https://youtu.be/xyz"));
}

#[test]
fn missing_video_table_is_an_empty_batch() {
    let store = store_with_users();
    let batch = store.load_videos().expect("load videos");
    assert_eq!(batch.total_in_db, 0);
    assert!(batch.videos.is_empty());
}

#[test]
fn opening_a_missing_file_fails_up_front() {
    let result = Store::open("/nonexistent/trendx_bot.db");
    assert!(matches!(result, Err(StoreError::DatabaseNotFound(_))));
}
