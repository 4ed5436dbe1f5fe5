pub mod api_client;
pub mod configuration;
pub mod dispatch;
pub mod foundation;
pub mod startup;

pub use api_client::{
    get_playlist_tracks, search_albums, search_artists, search_playlists, search_songs, Album,
    Artist, Fetch, Playlist, SearchError, Song, YouTubeClient,
};
pub use configuration::*;
pub use dispatch::{SearchKind, SearchOutcome, SearchSession};
