mod fetch;
mod models;
mod search;
mod search_error;

pub use fetch::{Fetch, YouTubeClient};
#[cfg(test)]
pub use fetch::MockFetch;
pub use models::{Album, Artist, Playlist, Song};
pub use search::{
    get_playlist_tracks, search_albums, search_artists, search_playlists, search_songs,
};
pub use search_error::SearchError;
