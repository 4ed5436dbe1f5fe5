/// # The Main Entry Point of the Search CLI
///
/// This module drives the application: it loads the configuration, builds the
/// API client, runs the requested operation and renders the results.
///
/// # Steps:
/// 1. Checks that the configuration file exists
/// 2. Loads the configuration
/// 3. Builds the YouTube client
/// 4. Runs the one-shot command, or the interactive debounced loop
/// 5. Renders the resulting records to the terminal
///
use crate::api_client::{get_playlist_tracks, Album, Artist, Playlist, Song, YouTubeClient};
use crate::configuration::{self, ConfigFolder};
use crate::dispatch::{self, SearchKind, SearchOutcome, SearchSession, DEBOUNCE_DELAY};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub enum Operation {
    Search(SearchKind, String),
    Tracks(String),
    Interactive(SearchKind),
}

pub async fn run(
    cfg_folder: ConfigFolder,
    operation: Operation,
) -> Result<(), Box<dyn std::error::Error>> {
    if !cfg_folder.config_dir.exists() || !cfg_folder.config_file.exists() {
        eprintln!(
            "\x1b[1m\x1b[31mConfiguration folder or config.yaml not found. Please run 'tunesearch config' first.\x1b[0m"
        );
        return Ok(());
    }

    let config_file = cfg_folder
        .config_file
        .to_str()
        .ok_or_else(|| "Failed to convert the configuration path to a string".to_string())?;
    let config = configuration::get_configuration(config_file)
        .map_err(|_| "Unable to parse configuration file")?;

    let client = YouTubeClient::new(config.api_settings);

    match operation {
        Operation::Search(kind, query) => run_search_command(&client, kind, &query).await,
        Operation::Tracks(playlist_id) => run_tracks_command(&client, &playlist_id).await,
        Operation::Interactive(kind) => run_interactive(client, kind).await,
    }
}

async fn run_search_command(
    client: &YouTubeClient,
    kind: SearchKind,
    query: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if !dispatch::should_dispatch(query) {
        eprintln!("\x1b[33mNothing to search for. Please give a non-empty query.\x1b[0m");
        return Ok(());
    }

    println!(
        "\x1b[1m\x1b[34mSearching {} for '{}'...\x1b[0m",
        kind.name(),
        query.trim()
    );

    match dispatch::run_search(client, kind, query).await {
        Ok(outcome) => render_outcome(&outcome),
        Err(e) => eprintln!("\x1b[31m{}\x1b[0m", e),
    }

    Ok(())
}

async fn run_tracks_command(
    client: &YouTubeClient,
    playlist_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "\x1b[1m\x1b[34mFetching tracks of playlist '{}'...\x1b[0m",
        playlist_id
    );

    match get_playlist_tracks(client, playlist_id).await {
        Ok(songs) => render_songs(&songs),
        Err(e) => eprintln!("\x1b[31m{}\x1b[0m", e),
    }

    Ok(())
}

/// Reads queries from stdin, debounces them, and applies only the freshest
/// result. A superseded search is not cancelled; its outcome just fails the
/// session's apply-time check and is dropped.
async fn run_interactive(
    client: YouTubeClient,
    kind: SearchKind,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "\x1b[1m\x1b[34mInteractive {} search. Type a query and press enter; Ctrl-D quits.\x1b[0m",
        kind.name()
    );

    let client = Arc::new(client);
    let session = Arc::new(SearchSession::new());

    let (input_tx, input_rx) = mpsc::channel(16);
    let (debounced_tx, debounced_rx) = mpsc::channel(16);
    tokio::spawn(dispatch::debounce(input_rx, debounced_tx, DEBOUNCE_DELAY));

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if input_tx.send(line).await.is_err() {
                break;
            }
        }
        // input_tx drops here, which flushes and stops the debouncer
    });

    dispatch::run_query_loop(client, kind, debounced_rx, session, |result| match result {
        Ok(outcome) => render_outcome(&outcome),
        Err(e) => eprintln!("\x1b[31m{}\x1b[0m", e),
    })
    .await;

    Ok(())
}

fn render_outcome(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Songs(songs) => render_songs(songs),
        SearchOutcome::Artists(artists) => render_artists(artists),
        SearchOutcome::Playlists(playlists) => render_playlists(playlists),
        SearchOutcome::Albums(albums) => render_albums(albums),
    }
}

fn render_songs(songs: &[Song]) {
    if songs.is_empty() {
        println!("\x1b[33mNo songs found. Try a different search term.\x1b[0m");
        return;
    }

    for (index, song) in songs.iter().enumerate() {
        let duration = if song.duration.is_empty() {
            String::new()
        } else {
            format!(" ({})", song.duration)
        };
        println!(
            "{:2}. \x1b[1m{}\x1b[0m by {}{}",
            index + 1,
            song.title,
            song.artist,
            duration
        );
        println!("    \x1b[34m{}\x1b[0m", song.url);
    }
}

fn render_artists(artists: &[Artist]) {
    if artists.is_empty() {
        println!("\x1b[33mNo artists found. Try a different search term.\x1b[0m");
        return;
    }

    for (index, artist) in artists.iter().enumerate() {
        match &artist.subscriber_count {
            Some(subscribers) => println!(
                "{:2}. \x1b[1m{}\x1b[0m ({})",
                index + 1,
                artist.name,
                subscribers
            ),
            None => println!("{:2}. \x1b[1m{}\x1b[0m", index + 1, artist.name),
        }
        println!("    \x1b[34m{}\x1b[0m", artist.url);
    }
}

fn render_playlists(playlists: &[Playlist]) {
    if playlists.is_empty() {
        println!("\x1b[33mNo playlists found. Try a different search term.\x1b[0m");
        return;
    }

    for (index, playlist) in playlists.iter().enumerate() {
        let by_line = match &playlist.channel_title {
            Some(channel) => format!(" by {}", channel),
            None => String::new(),
        };
        let items = match playlist.item_count {
            Some(count) => format!(" ({} items)", count),
            None => String::new(),
        };
        println!(
            "{:2}. \x1b[1m{}\x1b[0m{}{}",
            index + 1,
            playlist.title,
            by_line,
            items
        );
        println!("    \x1b[34m{}\x1b[0m", playlist.url);
    }
}

fn render_albums(albums: &[Album]) {
    if albums.is_empty() {
        println!("\x1b[33mNo albums found. Try a different search term.\x1b[0m");
        return;
    }

    for (index, album) in albums.iter().enumerate() {
        println!(
            "{:2}. \x1b[1m{}\x1b[0m by {} ({} items)",
            index + 1,
            album.title,
            album.artist,
            album.item_count
        );
        println!("    \x1b[34m{}\x1b[0m", album.url);
    }
}
