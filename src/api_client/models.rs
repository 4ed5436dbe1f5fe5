//! Record types returned by the search operations, together with the
//! wire-format structures they are normalized from.
//!
//! The YouTube Data API omits nested fields freely, so every wire field that
//! may be absent is an `Option` and every record constructor supplies an
//! explicit fallback. The presentation side never sees a missing value.

use crate::foundation::utils::{format_duration, format_subscriber_count};
use serde::Deserialize;

/// A playable track, built from a `/videos` resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub thumbnail: String,
    pub duration: String,
    pub url: String,
}

/// A channel treated as an artist, built from a `/channels` resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub url: String,
    pub subscriber_count: Option<String>,
    /// Raw count used as the sort key, never displayed.
    pub subscriber_count_raw: u64,
    pub description: Option<String>,
    pub video_count: Option<String>,
}

/// A playlist, built from a `/playlists` resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub url: String,
    pub item_count: Option<u64>,
    pub channel_title: Option<String>,
}

/// An album-like playlist, built from a `/playlists` resource plus a
/// popularity score derived from its first track's view count.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub thumbnail: String,
    pub url: String,
    pub item_count: u64,
    /// Proxy view count used as the sort key, never displayed.
    pub popularity: u64,
}

#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    pub items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: Option<SearchResultId>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResultId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    #[serde(rename = "playlistId")]
    pub playlist_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    pub items: Option<Vec<VideoResource>>,
}

#[derive(Debug, Deserialize)]
pub struct VideoResource {
    pub id: Option<String>,
    pub snippet: Option<VideoSnippet>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<VideoContentDetails>,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    pub title: Option<String>,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
pub struct VideoContentDetails {
    pub duration: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnails {
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    pub items: Option<Vec<ChannelResource>>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelResource {
    pub id: Option<String>,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSnippet {
    pub title: Option<String>,
    pub thumbnails: Option<Thumbnails>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelStatistics {
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistListResponse {
    pub items: Option<Vec<PlaylistResource>>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistResource {
    pub id: Option<String>,
    pub snippet: Option<PlaylistSnippet>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<PlaylistContentDetails>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistSnippet {
    pub title: Option<String>,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistContentDetails {
    #[serde(rename = "itemCount")]
    pub item_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemListResponse {
    pub items: Option<Vec<PlaylistItemResource>>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemResource {
    pub snippet: Option<PlaylistItemSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemSnippet {
    #[serde(rename = "resourceId")]
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

fn medium_thumbnail_url(thumbnails: Option<Thumbnails>) -> String {
    thumbnails
        .and_then(|t| t.medium)
        .and_then(|m| m.url)
        .unwrap_or_default()
}

impl Song {
    pub fn from_video(video: VideoResource) -> Self {
        let id = video.id.unwrap_or_default();
        let snippet = video.snippet;
        let (title, artist, thumbnails) = match snippet {
            Some(s) => (s.title, s.channel_title, s.thumbnails),
            None => (None, None, None),
        };
        let raw_duration = video
            .content_details
            .and_then(|d| d.duration)
            .unwrap_or_default();

        Self {
            url: format!("https://music.youtube.com/watch?v={}", id),
            title: title.unwrap_or_else(|| "Unknown Title".to_string()),
            artist: artist.unwrap_or_else(|| "Unknown Artist".to_string()),
            thumbnail: medium_thumbnail_url(thumbnails),
            duration: format_duration(&raw_duration),
            id,
        }
    }
}

impl Artist {
    pub fn from_channel(channel: ChannelResource) -> Self {
        let id = channel.id.unwrap_or_default();
        let (name, thumbnails, description) = match channel.snippet {
            Some(s) => (s.title, s.thumbnails, s.description),
            None => (None, None, None),
        };
        let (subscriber_count, video_count) = match channel.statistics {
            Some(s) => (s.subscriber_count, s.video_count),
            None => (None, None),
        };
        let subscriber_count_raw = subscriber_count
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or(0);

        Self {
            url: format!("https://music.youtube.com/channel/{}", id),
            name: name.unwrap_or_else(|| "Unknown Artist".to_string()),
            thumbnail: medium_thumbnail_url(thumbnails),
            subscriber_count: subscriber_count
                .map(|_| format_subscriber_count(subscriber_count_raw)),
            subscriber_count_raw,
            description,
            video_count: Some(video_count.unwrap_or_else(|| "0".to_string())),
            id,
        }
    }
}

impl Playlist {
    pub fn from_resource(playlist: PlaylistResource) -> Self {
        let id = playlist.id.unwrap_or_default();
        let (title, channel_title, thumbnails) = match playlist.snippet {
            Some(s) => (s.title, s.channel_title, s.thumbnails),
            None => (None, None, None),
        };

        Self {
            url: format!("https://music.youtube.com/playlist?list={}", id),
            title: title.unwrap_or_else(|| "Unknown Playlist".to_string()),
            thumbnail: medium_thumbnail_url(thumbnails),
            // An absent and a zero item count both map to None.
            item_count: playlist
                .content_details
                .and_then(|d| d.item_count)
                .filter(|&count| count > 0),
            channel_title,
            id,
        }
    }
}

impl Album {
    pub fn from_playlist(playlist: PlaylistResource, popularity: u64) -> Self {
        let id = playlist.id.unwrap_or_default();
        let (title, channel_title, thumbnails) = match playlist.snippet {
            Some(s) => (s.title, s.channel_title, s.thumbnails),
            None => (None, None, None),
        };

        Self {
            url: format!("https://music.youtube.com/playlist?list={}", id),
            title: title.unwrap_or_else(|| "Unknown Album".to_string()),
            artist: channel_title.unwrap_or_else(|| "Unknown Artist".to_string()),
            thumbnail: medium_thumbnail_url(thumbnails),
            item_count: playlist
                .content_details
                .and_then(|d| d.item_count)
                .unwrap_or(0),
            popularity,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_song_falls_back_on_missing_fields() {
        let video: VideoResource = serde_json::from_value(json!({ "id": "v1" })).unwrap();
        let song = Song::from_video(video);

        assert_eq!(song.id, "v1");
        assert_eq!(song.title, "Unknown Title");
        assert_eq!(song.artist, "Unknown Artist");
        assert_eq!(song.thumbnail, "");
        assert_eq!(song.duration, "");
        assert_eq!(song.url, "https://music.youtube.com/watch?v=v1");
    }

    #[test]
    fn test_song_maps_populated_resource() {
        let video: VideoResource = serde_json::from_value(json!({
            "id": "v2",
            "snippet": {
                "title": "Paranoid",
                "channelTitle": "Black Sabbath",
                "thumbnails": { "medium": { "url": "https://img/v2.jpg" } }
            },
            "contentDetails": { "duration": "PT2M48S" }
        }))
        .unwrap();
        let song = Song::from_video(video);

        assert_eq!(song.title, "Paranoid");
        assert_eq!(song.artist, "Black Sabbath");
        assert_eq!(song.thumbnail, "https://img/v2.jpg");
        assert_eq!(song.duration, "2:48");
    }

    #[test]
    fn test_artist_subscriber_fields() {
        let channel: ChannelResource = serde_json::from_value(json!({
            "id": "c1",
            "snippet": { "title": "Some Band", "description": "A band." },
            "statistics": { "subscriberCount": "2500", "videoCount": "12" }
        }))
        .unwrap();
        let artist = Artist::from_channel(channel);

        assert_eq!(artist.subscriber_count.as_deref(), Some("2.5K subscribers"));
        assert_eq!(artist.subscriber_count_raw, 2500);
        assert_eq!(artist.video_count.as_deref(), Some("12"));
        assert_eq!(artist.description.as_deref(), Some("A band."));
    }

    #[test]
    fn test_artist_without_statistics() {
        let channel: ChannelResource =
            serde_json::from_value(json!({ "id": "c2", "snippet": { "title": "Quiet Band" } }))
                .unwrap();
        let artist = Artist::from_channel(channel);

        assert_eq!(artist.subscriber_count, None);
        assert_eq!(artist.subscriber_count_raw, 0);
        assert_eq!(artist.video_count.as_deref(), Some("0"));
    }

    #[test]
    fn test_playlist_zero_item_count_is_none() {
        let playlist: PlaylistResource = serde_json::from_value(json!({
            "id": "p1",
            "snippet": { "title": "Mix" },
            "contentDetails": { "itemCount": 0 }
        }))
        .unwrap();

        assert_eq!(Playlist::from_resource(playlist).item_count, None);
    }

    #[test]
    fn test_album_missing_item_count_is_zero() {
        let playlist: PlaylistResource =
            serde_json::from_value(json!({ "id": "p2", "snippet": { "title": "LP" } })).unwrap();
        let album = Album::from_playlist(playlist, 77);

        assert_eq!(album.item_count, 0);
        assert_eq!(album.popularity, 77);
        assert_eq!(album.title, "LP");
        assert_eq!(album.artist, "Unknown Artist");
    }
}
