//! Debounced query handling for interactive search.
//!
//! Keystrokes are funneled through a trailing-edge debouncer, and every
//! dispatched search carries a session ticket so that a stale response can
//! never overwrite a fresher one. In-flight requests are not cancelled; their
//! results are simply discarded at apply time.

mod debounce;
mod session;

pub use debounce::{debounce, DEBOUNCE_DELAY};
pub use session::SearchSession;

use crate::api_client::{
    search_albums, search_artists, search_playlists, search_songs, Album, Artist, Fetch, Playlist,
    SearchError, Song,
};
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Songs,
    Artists,
    Playlists,
    Albums,
}

impl SearchKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "songs" => Some(Self::Songs),
            "artists" => Some(Self::Artists),
            "playlists" => Some(Self::Playlists),
            "albums" => Some(Self::Albums),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Songs => "songs",
            Self::Artists => "artists",
            Self::Playlists => "playlists",
            Self::Albums => "albums",
        }
    }
}

#[derive(Debug)]
pub enum SearchOutcome {
    Songs(Vec<Song>),
    Artists(Vec<Artist>),
    Playlists(Vec<Playlist>),
    Albums(Vec<Album>),
}

/// Empty and whitespace-only input never reaches the network.
pub fn should_dispatch(query: &str) -> bool {
    !query.trim().is_empty()
}

pub async fn run_search<F: Fetch + ?Sized>(
    fetcher: &F,
    kind: SearchKind,
    query: &str,
) -> Result<SearchOutcome, SearchError> {
    match kind {
        SearchKind::Songs => Ok(SearchOutcome::Songs(search_songs(fetcher, query).await?)),
        SearchKind::Artists => Ok(SearchOutcome::Artists(search_artists(fetcher, query).await?)),
        SearchKind::Playlists => Ok(SearchOutcome::Playlists(
            search_playlists(fetcher, query).await?,
        )),
        SearchKind::Albums => Ok(SearchOutcome::Albums(search_albums(fetcher, query).await?)),
    }
}

/// Consumes debounced queries, runs one search per query, and applies each
/// result through the session so only the freshest one is rendered.
///
/// The debouncer flushes its pending query right before closing the channel,
/// so searches spawned here may still be in flight when the loop ends; they
/// are awaited before returning so the final query's result is not lost.
pub async fn run_query_loop<F, R>(
    fetcher: Arc<F>,
    kind: SearchKind,
    mut queries: Receiver<String>,
    session: Arc<SearchSession>,
    render: R,
) where
    F: Fetch + 'static,
    R: Fn(Result<SearchOutcome, SearchError>) + Send + Clone + 'static,
{
    let mut searches = JoinSet::new();

    while let Some(query) = queries.recv().await {
        if !should_dispatch(&query) {
            continue;
        }

        let ticket = session.begin();
        let fetcher = Arc::clone(&fetcher);
        let session = Arc::clone(&session);
        let render = render.clone();

        searches.spawn(async move {
            let result = run_search(fetcher.as_ref(), kind, &query).await;
            session.apply_if_latest(ticket, || render(result));
        });
    }

    while searches.join_next().await.is_some() {}
}
