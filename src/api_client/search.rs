//! The five search operations against the YouTube Data API.
//!
//! Every operation follows the same shape: one `/search` call constrained by a
//! type filter, then one batched detail call over the comma-joined ids. Album
//! search adds a third phase that derives a popularity score per playlist from
//! its first track's view count; those sub-fetches run concurrently and fail
//! individually without aborting the search.
//!
//! Failures that already concern the API key are re-raised unchanged so the
//! user sees the specific configuration guidance; anything else is wrapped in
//! an operation-specific message.

use crate::api_client::fetch::Fetch;
use crate::api_client::models::{
    Album, Artist, ChannelListResponse, Playlist, PlaylistItemListResponse, PlaylistListResponse,
    SearchItem, SearchListResponse, SearchResultId, Song, VideoListResponse,
};
use crate::api_client::SearchError;
use futures::future::join_all;
use serde_json::from_value;

/// YouTube's category id for music videos.
const MUSIC_CATEGORY_ID: &str = "10";
const MAX_SEARCH_RESULTS: &str = "25";
const MAX_PLAYLIST_TRACKS: &str = "50";

/// Searches for songs, preserving the API's result order.
pub async fn search_songs<F: Fetch + ?Sized>(
    fetcher: &F,
    query: &str,
) -> Result<Vec<Song>, SearchError> {
    collect_songs(fetcher, query).await.map_err(|e| {
        or_operation_error(
            e,
            "Failed to search songs. Please check your API key and internet connection.",
        )
    })
}

/// Searches for artists (channels), most subscribed first.
pub async fn search_artists<F: Fetch + ?Sized>(
    fetcher: &F,
    query: &str,
) -> Result<Vec<Artist>, SearchError> {
    collect_artists(fetcher, query).await.map_err(|e| {
        or_operation_error(
            e,
            "Failed to search artists. Please check your API key and internet connection.",
        )
    })
}

/// Searches for playlists, preserving the API's result order.
pub async fn search_playlists<F: Fetch + ?Sized>(
    fetcher: &F,
    query: &str,
) -> Result<Vec<Playlist>, SearchError> {
    collect_playlists(fetcher, query).await.map_err(|e| {
        or_operation_error(
            e,
            "Failed to search playlists. Please check your API key and internet connection.",
        )
    })
}

/// Searches for albums (playlists with "album" appended to the query), most
/// viewed first.
pub async fn search_albums<F: Fetch + ?Sized>(
    fetcher: &F,
    query: &str,
) -> Result<Vec<Album>, SearchError> {
    collect_albums(fetcher, query).await.map_err(|e| {
        or_operation_error(
            e,
            "Failed to search albums. Please check your API key and internet connection.",
        )
    })
}

/// Fetches the tracks of a playlist, preserving the playlist order.
pub async fn get_playlist_tracks<F: Fetch + ?Sized>(
    fetcher: &F,
    playlist_id: &str,
) -> Result<Vec<Song>, SearchError> {
    collect_playlist_tracks(fetcher, playlist_id)
        .await
        .map_err(|e| {
            or_operation_error(
                e,
                "Failed to fetch playlist tracks. Please check your API key and internet connection.",
            )
        })
}

fn or_operation_error(error: SearchError, fallback: &str) -> SearchError {
    if error.to_string().contains("API key") {
        error
    } else {
        SearchError::OperationError {
            message: fallback.to_string(),
        }
    }
}

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn join_ids<I>(items: Vec<SearchItem>, pick: I) -> String
where
    I: Fn(SearchResultId) -> Option<String>,
{
    items
        .into_iter()
        .filter_map(|item| item.id.and_then(&pick))
        .collect::<Vec<_>>()
        .join(",")
}

async fn collect_songs<F: Fetch + ?Sized>(
    fetcher: &F,
    query: &str,
) -> Result<Vec<Song>, SearchError> {
    let search: SearchListResponse = from_value(
        fetcher
            .fetch(
                "/search",
                params(&[
                    ("part", "snippet"),
                    ("q", query),
                    ("type", "video"),
                    ("videoCategoryId", MUSIC_CATEGORY_ID),
                    ("maxResults", MAX_SEARCH_RESULTS),
                ]),
            )
            .await?,
    )?;

    let items = match search.items {
        Some(items) if !items.is_empty() => items,
        _ => return Ok(Vec::new()),
    };

    let video_ids = join_ids(items, |id| id.video_id);
    fetch_songs_by_ids(fetcher, &video_ids).await
}

async fn fetch_songs_by_ids<F: Fetch + ?Sized>(
    fetcher: &F,
    video_ids: &str,
) -> Result<Vec<Song>, SearchError> {
    let videos: VideoListResponse = from_value(
        fetcher
            .fetch(
                "/videos",
                params(&[("part", "snippet,contentDetails"), ("id", video_ids)]),
            )
            .await?,
    )?;

    Ok(videos
        .items
        .unwrap_or_default()
        .into_iter()
        .map(Song::from_video)
        .collect())
}

async fn collect_artists<F: Fetch + ?Sized>(
    fetcher: &F,
    query: &str,
) -> Result<Vec<Artist>, SearchError> {
    let search: SearchListResponse = from_value(
        fetcher
            .fetch(
                "/search",
                params(&[
                    ("part", "snippet"),
                    ("q", query),
                    ("type", "channel"),
                    ("maxResults", MAX_SEARCH_RESULTS),
                ]),
            )
            .await?,
    )?;

    let items = match search.items {
        Some(items) if !items.is_empty() => items,
        _ => return Ok(Vec::new()),
    };

    let channel_ids = join_ids(items, |id| id.channel_id);
    let channels: ChannelListResponse = from_value(
        fetcher
            .fetch(
                "/channels",
                params(&[("part", "snippet,statistics"), ("id", &channel_ids)]),
            )
            .await?,
    )?;

    let mut artists: Vec<Artist> = channels
        .items
        .unwrap_or_default()
        .into_iter()
        .map(Artist::from_channel)
        .collect();

    // Stable sort, so ties keep the API's relative order.
    artists.sort_by(|a, b| b.subscriber_count_raw.cmp(&a.subscriber_count_raw));
    Ok(artists)
}

async fn collect_playlists<F: Fetch + ?Sized>(
    fetcher: &F,
    query: &str,
) -> Result<Vec<Playlist>, SearchError> {
    let search: SearchListResponse = from_value(
        fetcher
            .fetch(
                "/search",
                params(&[
                    ("part", "snippet"),
                    ("q", query),
                    ("type", "playlist"),
                    ("maxResults", MAX_SEARCH_RESULTS),
                ]),
            )
            .await?,
    )?;

    let items = match search.items {
        Some(items) if !items.is_empty() => items,
        _ => return Ok(Vec::new()),
    };

    let playlist_ids = join_ids(items, |id| id.playlist_id);
    let playlists: PlaylistListResponse = from_value(
        fetcher
            .fetch(
                "/playlists",
                params(&[("part", "snippet,contentDetails"), ("id", &playlist_ids)]),
            )
            .await?,
    )?;

    Ok(playlists
        .items
        .unwrap_or_default()
        .into_iter()
        .map(Playlist::from_resource)
        .collect())
}

async fn collect_albums<F: Fetch + ?Sized>(
    fetcher: &F,
    query: &str,
) -> Result<Vec<Album>, SearchError> {
    let album_query = format!("{} album", query);
    let search: SearchListResponse = from_value(
        fetcher
            .fetch(
                "/search",
                params(&[
                    ("part", "snippet"),
                    ("q", &album_query),
                    ("type", "playlist"),
                    ("maxResults", MAX_SEARCH_RESULTS),
                ]),
            )
            .await?,
    )?;

    let items = match search.items {
        Some(items) if !items.is_empty() => items,
        _ => return Ok(Vec::new()),
    };

    let playlist_ids = join_ids(items, |id| id.playlist_id);
    let playlists: PlaylistListResponse = from_value(
        fetcher
            .fetch(
                "/playlists",
                params(&[("part", "snippet,contentDetails"), ("id", &playlist_ids)]),
            )
            .await?,
    )?;
    let resources = playlists.items.unwrap_or_default();

    // Concurrent popularity sub-fetches, rejoined by position. Each one
    // swallows its own failure so a single bad playlist cannot abort the
    // whole search.
    let popularity = join_all(resources.iter().map(|resource| {
        let playlist_id = resource.id.clone().unwrap_or_default();
        async move { album_popularity(fetcher, &playlist_id).await }
    }))
    .await;

    let mut albums: Vec<Album> = resources
        .into_iter()
        .zip(popularity)
        .map(|(resource, popularity)| Album::from_playlist(resource, popularity))
        .collect();

    albums.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    Ok(albums)
}

/// View count of the playlist's first track, or 0 when anything goes wrong.
async fn album_popularity<F: Fetch + ?Sized>(fetcher: &F, playlist_id: &str) -> u64 {
    fetch_album_popularity(fetcher, playlist_id)
        .await
        .unwrap_or(0)
}

async fn fetch_album_popularity<F: Fetch + ?Sized>(
    fetcher: &F,
    playlist_id: &str,
) -> Result<u64, SearchError> {
    let items: PlaylistItemListResponse = from_value(
        fetcher
            .fetch(
                "/playlistItems",
                params(&[
                    ("part", "snippet"),
                    ("playlistId", playlist_id),
                    ("maxResults", "1"),
                ]),
            )
            .await?,
    )?;

    let video_id = items
        .items
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|item| item.snippet)
        .and_then(|snippet| snippet.resource_id)
        .and_then(|resource| resource.video_id);

    let video_id = match video_id {
        Some(id) => id,
        None => return Ok(0),
    };

    let videos: VideoListResponse = from_value(
        fetcher
            .fetch(
                "/videos",
                params(&[("part", "statistics"), ("id", &video_id)]),
            )
            .await?,
    )?;

    Ok(videos
        .items
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|video| video.statistics)
        .and_then(|statistics| statistics.view_count)
        .and_then(|count| count.parse().ok())
        .unwrap_or(0))
}

async fn collect_playlist_tracks<F: Fetch + ?Sized>(
    fetcher: &F,
    playlist_id: &str,
) -> Result<Vec<Song>, SearchError> {
    let response: PlaylistItemListResponse = from_value(
        fetcher
            .fetch(
                "/playlistItems",
                params(&[
                    ("part", "snippet"),
                    ("playlistId", playlist_id),
                    ("maxResults", MAX_PLAYLIST_TRACKS),
                ]),
            )
            .await?,
    )?;

    let items = match response.items {
        Some(items) if !items.is_empty() => items,
        _ => return Ok(Vec::new()),
    };

    let video_ids = items
        .into_iter()
        .filter_map(|item| {
            item.snippet
                .and_then(|snippet| snippet.resource_id)
                .and_then(|resource| resource.video_id)
        })
        .collect::<Vec<_>>()
        .join(",");

    if video_ids.is_empty() {
        return Ok(Vec::new());
    }

    fetch_songs_by_ids(fetcher, &video_ids).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::fetch::MockFetch;
    use serde_json::{json, Value};

    fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn test_search_songs_empty_phase_one_skips_details() {
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|endpoint, _| {
                assert_eq!(endpoint, "/search");
                Ok(json!({ "items": [] }))
            });

        let songs = search_songs(&fetcher, "nothing").await.unwrap();
        assert!(songs.is_empty());
    }

    #[tokio::test]
    async fn test_search_songs_absent_items_skips_details() {
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_, _| Ok(json!({})));

        let songs = search_songs(&fetcher, "nothing").await.unwrap();
        assert!(songs.is_empty());
    }

    #[tokio::test]
    async fn test_search_songs_batches_ids_and_maps_results() {
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch()
            .times(2)
            .returning(|endpoint, request_params| match endpoint {
                "/search" => {
                    assert_eq!(param(&request_params, "type"), Some("video"));
                    assert_eq!(param(&request_params, "videoCategoryId"), Some("10"));
                    assert_eq!(param(&request_params, "maxResults"), Some("25"));
                    Ok(json!({ "items": [
                        { "id": { "videoId": "v1" } },
                        { "id": {} },
                        { "id": { "videoId": "v2" } }
                    ] }))
                }
                "/videos" => {
                    // The id-less item was filtered out before batching.
                    assert_eq!(param(&request_params, "id"), Some("v1,v2"));
                    assert_eq!(param(&request_params, "part"), Some("snippet,contentDetails"));
                    Ok(json!({ "items": [
                        {
                            "id": "v1",
                            "snippet": { "title": "First", "channelTitle": "Band" },
                            "contentDetails": { "duration": "PT3M5S" }
                        },
                        { "id": "v2" }
                    ] }))
                }
                other => panic!("unexpected endpoint {other}"),
            });

        let songs = search_songs(&fetcher, "band").await.unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title, "First");
        assert_eq!(songs[0].duration, "3:05");
        assert_eq!(songs[1].title, "Unknown Title");
        assert_eq!(songs[1].url, "https://music.youtube.com/watch?v=v2");
    }

    #[tokio::test]
    async fn test_search_artists_sorted_by_subscribers_with_stable_ties() {
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch()
            .returning(|endpoint, _| match endpoint {
                "/search" => Ok(json!({ "items": [
                    { "id": { "channelId": "a" } },
                    { "id": { "channelId": "b" } },
                    { "id": { "channelId": "c" } }
                ] })),
                "/channels" => Ok(json!({ "items": [
                    { "id": "a", "snippet": { "title": "A" },
                      "statistics": { "subscriberCount": "1000" } },
                    { "id": "b", "snippet": { "title": "B" },
                      "statistics": { "subscriberCount": "5000" } },
                    { "id": "c", "snippet": { "title": "C" },
                      "statistics": { "subscriberCount": "1000" } }
                ] })),
                other => panic!("unexpected endpoint {other}"),
            });

        let artists = search_artists(&fetcher, "letters").await.unwrap();

        let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn test_search_playlists_maps_results() {
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch()
            .returning(|endpoint, request_params| match endpoint {
                "/search" => {
                    assert_eq!(param(&request_params, "type"), Some("playlist"));
                    Ok(json!({ "items": [{ "id": { "playlistId": "p1" } }] }))
                }
                "/playlists" => {
                    assert_eq!(param(&request_params, "id"), Some("p1"));
                    Ok(json!({ "items": [
                        {
                            "id": "p1",
                            "snippet": { "title": "Morning Mix", "channelTitle": "Curator" },
                            "contentDetails": { "itemCount": 14 }
                        }
                    ] }))
                }
                other => panic!("unexpected endpoint {other}"),
            });

        let playlists = search_playlists(&fetcher, "morning").await.unwrap();

        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].title, "Morning Mix");
        assert_eq!(playlists[0].item_count, Some(14));
        assert_eq!(playlists[0].channel_title.as_deref(), Some("Curator"));
        assert_eq!(playlists[0].url, "https://music.youtube.com/playlist?list=p1");
    }

    #[tokio::test]
    async fn test_search_albums_sorts_by_popularity_and_isolates_sub_fetch_failures() {
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch()
            .returning(|endpoint, request_params| match endpoint {
                "/search" => {
                    assert_eq!(param(&request_params, "q"), Some("beatles album"));
                    Ok(json!({ "items": [
                        { "id": { "playlistId": "p1" } },
                        { "id": { "playlistId": "p2" } }
                    ] }))
                }
                "/playlists" => Ok(json!({ "items": [
                    { "id": "p1", "snippet": { "title": "Quiet LP", "channelTitle": "X" } },
                    { "id": "p2", "snippet": { "title": "Big LP", "channelTitle": "Y" } }
                ] })),
                "/playlistItems" => match param(&request_params, "playlistId") {
                    Some("p1") => Err(SearchError::ApiError {
                        message: "quota exceeded".to_string(),
                    }),
                    Some("p2") => Ok(json!({ "items": [
                        { "snippet": { "resourceId": { "videoId": "v9" } } }
                    ] })),
                    other => panic!("unexpected playlistId {other:?}"),
                },
                "/videos" => {
                    assert_eq!(param(&request_params, "id"), Some("v9"));
                    Ok(json!({ "items": [{ "id": "v9", "statistics": { "viewCount": "123" } }] }))
                }
                other => panic!("unexpected endpoint {other}"),
            });

        let albums = search_albums(&fetcher, "beatles").await.unwrap();

        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].title, "Big LP");
        assert_eq!(albums[0].popularity, 123);
        assert_eq!(albums[1].title, "Quiet LP");
        assert_eq!(albums[1].popularity, 0);
    }

    #[tokio::test]
    async fn test_get_playlist_tracks_short_circuits_without_video_ids() {
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|endpoint, request_params| {
                assert_eq!(endpoint, "/playlistItems");
                assert_eq!(param(&request_params, "maxResults"), Some("50"));
                Ok(json!({ "items": [{ "snippet": {} }, {}] }))
            });

        let songs = get_playlist_tracks(&fetcher, "p1").await.unwrap();
        assert!(songs.is_empty());
    }

    #[tokio::test]
    async fn test_get_playlist_tracks_maps_in_playlist_order() {
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch()
            .returning(|endpoint, request_params| match endpoint {
                "/playlistItems" => {
                    assert_eq!(param(&request_params, "playlistId"), Some("p7"));
                    Ok(json!({ "items": [
                        { "snippet": { "resourceId": { "videoId": "v1" } } },
                        { "snippet": { "resourceId": { "videoId": "v2" } } }
                    ] }))
                }
                "/videos" => {
                    assert_eq!(param(&request_params, "id"), Some("v1,v2"));
                    Ok(json!({ "items": [
                        { "id": "v1", "snippet": { "title": "One" } },
                        { "id": "v2", "snippet": { "title": "Two" } }
                    ] }))
                }
                other => panic!("unexpected endpoint {other}"),
            });

        let songs = get_playlist_tracks(&fetcher, "p7").await.unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title, "One");
        assert_eq!(songs[1].title, "Two");
    }

    #[tokio::test]
    async fn test_missing_api_key_passes_through_every_operation() {
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch()
            .returning(|_, _| Err(SearchError::MissingApiKey));
        let expected = SearchError::MissingApiKey.to_string();

        assert_eq!(
            search_songs(&fetcher, "q").await.unwrap_err().to_string(),
            expected
        );
        assert_eq!(
            search_artists(&fetcher, "q").await.unwrap_err().to_string(),
            expected
        );
        assert_eq!(
            search_playlists(&fetcher, "q").await.unwrap_err().to_string(),
            expected
        );
        assert_eq!(
            search_albums(&fetcher, "q").await.unwrap_err().to_string(),
            expected
        );
        assert_eq!(
            get_playlist_tracks(&fetcher, "p").await.unwrap_err().to_string(),
            expected
        );
    }

    #[tokio::test]
    async fn test_upstream_api_key_message_is_preserved_verbatim() {
        let mut fetcher = MockFetch::new();
        fetcher.expect_fetch().returning(|_, _| {
            Err(SearchError::ApiError {
                message: "API key not valid. Please pass a valid API key.".to_string(),
            })
        });

        let error = search_songs(&fetcher, "q").await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "API key not valid. Please pass a valid API key."
        );
    }

    #[tokio::test]
    async fn test_generic_failures_wrap_into_operation_messages() {
        let mut fetcher = MockFetch::new();
        fetcher.expect_fetch().returning(|_, _| {
            Err(SearchError::ApiError {
                message: "quota exceeded".to_string(),
            })
        });

        let error = search_artists(&fetcher, "q").await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "Failed to search artists. Please check your API key and internet connection."
        );

        let error = get_playlist_tracks(&fetcher, "p").await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "Failed to fetch playlist tracks. Please check your API key and internet connection."
        );
    }

    #[tokio::test]
    async fn test_malformed_detail_payload_wraps_into_operation_message() {
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch()
            .returning(|endpoint, _| match endpoint {
                "/search" => Ok(json!({ "items": [{ "id": { "playlistId": "p1" } }] })),
                "/playlists" => Ok(Value::String("not an object".to_string())),
                other => panic!("unexpected endpoint {other}"),
            });

        let error = search_playlists(&fetcher, "q").await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "Failed to search playlists. Please check your API key and internet connection."
        );
    }
}
