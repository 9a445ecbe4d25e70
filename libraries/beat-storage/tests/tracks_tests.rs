//! Integration tests for tracks vertical slice


use beat_core::types::{TrackId, UpdateTrack, UserId};
use beat_core::BeatError;
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let track = beat_storage::tracks::create(pool, LOCAL_USER, new_track("Intro", "Band", 337))
        .await
        .expect("Failed to create track");

    assert_eq!(track.title, "Intro");
    assert_eq!(track.artist, "Band");
    assert_eq!(track.duration_seconds, 337);
    assert_eq!(track.owner_id, LOCAL_USER);

    let fetched = beat_storage::tracks::get_by_id(pool, track.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.path.to_str(), Some("/music/Intro.mp3"));
}

#[tokio::test]
async fn test_tracks_are_listed_per_owner_in_creation_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let other = UserId::new(2);
    beat_storage::users::ensure(pool, other).await.unwrap();

    let b = create_test_track(pool, "B").await;
    let a = create_test_track(pool, "A").await;
    beat_storage::tracks::create(pool, other, new_track("Theirs", "X", 10))
        .await
        .unwrap();

    let ids: Vec<_> = beat_storage::tracks::get_by_owner(pool, LOCAL_USER)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![b, a]);
}

#[tokio::test]
async fn test_update_rewrites_metadata_only() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let id = create_test_track(pool, "Old").await;

    let updated = beat_storage::tracks::update(
        pool,
        id,
        UpdateTrack {
            title: "New".to_string(),
            artist: "Someone".to_string(),
            genre: "Jazz".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.title, "New");
    assert_eq!(updated.genre, "Jazz");
    assert_eq!(updated.duration_seconds, 180);
    assert_eq!(updated.path.to_str(), Some("/music/Old.mp3"));
}

#[tokio::test]
async fn test_update_missing_track_is_not_found() {
    let test_db = TestDb::new().await;

    let err = beat_storage::tracks::update(test_db.pool(), TrackId::new(404), UpdateTrack::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BeatError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_cascades_and_compacts_playlists() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A").await;
    let b = create_test_track(pool, "B").await;
    let c = create_test_track(pool, "C").await;
    let playlist = create_test_playlist(pool, "Mix", &[a, b, c]).await;

    beat_storage::tracks::delete(pool, b).await.unwrap();

    let stored = beat_storage::playlists::get_by_id(pool, playlist)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.track_ids, vec![a, c]);
    assert_eq!(positions(pool, playlist).await, vec![0, 1]);
    assert!(beat_storage::tracks::get_by_id(pool, b).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_track_is_not_found() {
    let test_db = TestDb::new().await;

    let err = beat_storage::tracks::delete(test_db.pool(), TrackId::new(7))
        .await
        .unwrap_err();
    assert!(matches!(err, BeatError::NotFound { .. }));
}
