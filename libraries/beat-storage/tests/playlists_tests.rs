//! Integration tests for playlists vertical slice
//!
//! Covers:
//! - CRUD with ownership
//! - Append order, duplicate rejection and gap-free removal
//! - Adjacent swaps


use beat_core::types::{PlaylistId, TrackId};
use beat_core::BeatError;
use test_helpers::*;

#[tokio::test]
async fn test_create_rename_and_delete_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let playlist = beat_storage::playlists::create(pool, LOCAL_USER, "Chill")
        .await
        .expect("Failed to create playlist");
    assert_eq!(playlist.name, "Chill");
    assert!(playlist.track_ids.is_empty());

    let renamed = beat_storage::playlists::rename(pool, playlist.id, "Chill Out")
        .await
        .unwrap();
    assert_eq!(renamed.name, "Chill Out");

    beat_storage::playlists::delete(pool, playlist.id).await.unwrap();
    assert!(beat_storage::playlists::get_by_id(pool, playlist.id)
        .await
        .unwrap()
        .is_none());

    let err = beat_storage::playlists::delete(pool, playlist.id)
        .await
        .unwrap_err();
    assert!(matches!(err, BeatError::NotFound { .. }));
}

#[tokio::test]
async fn test_tracks_keep_append_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A").await;
    let b = create_test_track(pool, "B").await;
    let c = create_test_track(pool, "C").await;
    let playlist = create_test_playlist(pool, "Mix", &[c, a, b]).await;

    let listed = beat_storage::playlists::get_by_owner(pool, LOCAL_USER)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, playlist);
    assert_eq!(listed[0].track_ids, vec![c, a, b]);
    assert_eq!(positions(pool, playlist).await, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_duplicate_add_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A").await;
    let playlist = create_test_playlist(pool, "Mix", &[a]).await;

    let err = beat_storage::playlists::add_track(pool, playlist, a)
        .await
        .unwrap_err();
    assert!(matches!(err, BeatError::DuplicateTrack { .. }));
    assert_eq!(positions(pool, playlist).await, vec![0]);
}

#[tokio::test]
async fn test_add_unknown_track_or_playlist_is_not_found() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A").await;
    let playlist = create_test_playlist(pool, "Mix", &[]).await;

    let err = beat_storage::playlists::add_track(pool, playlist, TrackId::new(999))
        .await
        .unwrap_err();
    assert!(matches!(err, BeatError::NotFound { .. }));

    let err = beat_storage::playlists::add_track(pool, PlaylistId::new(999), a)
        .await
        .unwrap_err();
    assert!(matches!(err, BeatError::NotFound { .. }));
}

#[tokio::test]
async fn test_remove_closes_gap() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A").await;
    let b = create_test_track(pool, "B").await;
    let c = create_test_track(pool, "C").await;
    let playlist = create_test_playlist(pool, "Mix", &[a, b, c]).await;

    beat_storage::playlists::remove_track(pool, playlist, a)
        .await
        .unwrap();

    let stored = beat_storage::playlists::get_by_id(pool, playlist)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.track_ids, vec![b, c]);
    assert_eq!(positions(pool, playlist).await, vec![0, 1]);

    // Appending after a removal continues from the compacted end
    beat_storage::playlists::add_track(pool, playlist, a)
        .await
        .unwrap();
    assert_eq!(positions(pool, playlist).await, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_remove_missing_member_is_not_found() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A").await;
    let playlist = create_test_playlist(pool, "Mix", &[]).await;

    let err = beat_storage::playlists::remove_track(pool, playlist, a)
        .await
        .unwrap_err();
    assert!(matches!(err, BeatError::NotFound { .. }));
}

#[tokio::test]
async fn test_swap_exchanges_positions() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A").await;
    let b = create_test_track(pool, "B").await;
    let c = create_test_track(pool, "C").await;
    let playlist = create_test_playlist(pool, "Mix", &[a, b, c]).await;

    beat_storage::playlists::swap_tracks(pool, playlist, b, c)
        .await
        .unwrap();

    let stored = beat_storage::playlists::get_by_id(pool, playlist)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.track_ids, vec![a, c, b]);
}

#[tokio::test]
async fn test_deleting_playlist_keeps_tracks() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A").await;
    let playlist = create_test_playlist(pool, "Mix", &[a]).await;

    beat_storage::playlists::delete(pool, playlist).await.unwrap();

    assert!(beat_storage::tracks::get_by_id(pool, a).await.unwrap().is_some());
    let members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlist_tracks")
        .fetch_one(pool)
        .await
        .unwrap();
    assert_eq!(members, 0);
}
