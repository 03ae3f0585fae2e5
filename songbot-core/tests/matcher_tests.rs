// File: songbot-core/tests/matcher_tests.rs

use songbot_common::models::song::NewSong;
use songbot_core::Error;
use songbot_core::services::SongService;
use songbot_core::test_utils::helpers::{create_test_repository, seed_songs};

async fn blue_catalog() -> Result<(SongService, tempfile::TempDir), Error> {
    let (repo, dir) = create_test_repository().await?;
    seed_songs(
        repo.as_ref(),
        &[
            ("Blue", Some("Joni Mitchell"), "url1"),
            ("Blue Monday", Some("New Order"), "url2"),
        ],
    )
        .await?;
    Ok((SongService::new(repo), dir))
}

#[tokio::test]
async fn test_title_by_artist_is_an_exact_lookup() -> Result<(), Error> {
    let (songs, _dir) = blue_catalog().await?;

    let song = songs.resolve("blue monday by NEW ORDER").await?.expect("exact match");
    assert_eq!(song.url, "url2");

    let song = songs.resolve("  Blue   by   Joni Mitchell ").await?.expect("exact match");
    assert_eq!(song.url, "url1");
    Ok(())
}

#[tokio::test]
async fn test_title_by_artist_matches_non_ascii_case_insensitively() -> Result<(), Error> {
    let (repo, _dir) = create_test_repository().await?;
    seed_songs(repo.as_ref(), &[("ÉTÉ", Some("MOTÖRHEAD"), "url8")]).await?;
    let songs = SongService::new(repo);

    let song = songs.resolve("ÉTÉ by MOTÖRHEAD").await?.expect("exact match");
    assert_eq!(song.url, "url8");
    let song = songs.resolve("été by motörhead").await?.expect("exact match");
    assert_eq!(song.url, "url8");
    assert_eq!(songs.resolve("Été").await?.map(|s| s.url), Some("url8".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_exact_miss_does_not_fall_back_to_fuzzy() -> Result<(), Error> {
    let (repo, _dir) = create_test_repository().await?;
    // A fuzzy search for the whole query string would find this row.
    seed_songs(repo.as_ref(), &[("Killed by Death", Some("Motorhead"), "url6")]).await?;
    let songs = SongService::new(repo);

    assert!(songs.resolve("Killed by Death").await?.is_none());
    assert!(songs.resolve("Blue by Somebody Else").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_plain_query_is_fuzzy() -> Result<(), Error> {
    let (songs, _dir) = blue_catalog().await?;

    assert_eq!(songs.resolve("MONDAY").await?.map(|s| s.url), Some("url2".to_string()));
    assert_eq!(songs.resolve("joni").await?.map(|s| s.url), Some("url1".to_string()));
    assert!(songs.resolve("zeppelin").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ambiguous_fuzzy_query_returns_lowest_id() -> Result<(), Error> {
    let (songs, _dir) = blue_catalog().await?;

    for _ in 0..3 {
        let song = songs.resolve("Blue").await?.expect("fuzzy match");
        assert_eq!(song.title, "Blue");
        assert_eq!(song.url, "url1");
    }
    Ok(())
}

#[tokio::test]
async fn test_blank_queries_match_nothing() -> Result<(), Error> {
    let (songs, _dir) = blue_catalog().await?;

    assert!(songs.resolve("").await?.is_none());
    assert!(songs.resolve("   ").await?.is_none());
    assert!(songs.suggestions("").await?.is_empty());
    // Both seeded rows contain a space.
    assert!(songs.suggestions(" ").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_suggestions_feed_back_into_resolve() -> Result<(), Error> {
    let (songs, _dir) = blue_catalog().await?;

    let suggestions = songs.suggestions("blu").await?;
    assert_eq!(suggestions, vec!["Blue by Joni Mitchell", "Blue Monday by New Order"]);

    for suggestion in &suggestions {
        let song = songs.resolve(suggestion).await?.expect("autocomplete value resolves");
        assert_eq!(&song.display_name(), suggestion);
    }
    Ok(())
}

#[tokio::test]
async fn test_read_after_write() -> Result<(), Error> {
    let (repo, _dir) = create_test_repository().await?;
    let songs = SongService::new(repo);

    let added = songs
        .add_song(NewSong::new("Heroes", Some("David Bowie"), "url5"))
        .await?;
    let found = songs.resolve("Heroes").await?.expect("just inserted");
    assert_eq!(found, added);
    Ok(())
}

#[tokio::test]
async fn test_add_song_rejects_blank_fields_without_writing() -> Result<(), Error> {
    let (repo, _dir) = create_test_repository().await?;
    let songs = SongService::new(repo);

    let err = songs.add_song(NewSong::new(" ", Some("Nobody"), "url")).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let err = songs.add_song(NewSong::new("Title", Some("Nobody"), "")).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    assert!(songs.suggestions("nobody").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_blank_artist_is_stored_as_unknown() -> Result<(), Error> {
    let (repo, _dir) = create_test_repository().await?;
    let songs = SongService::new(repo);

    let added = songs.add_song(NewSong::new("Intro", Some(""), "url7")).await?;
    assert_eq!(added.artist, None);
    assert_eq!(added.artist_or_unknown(), "Unknown");
    assert_eq!(songs.suggestions("intro").await?, vec!["Intro"]);
    Ok(())
}
