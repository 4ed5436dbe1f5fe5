use clap::{Arg, ArgMatches, Command};
use tunesearch::configuration::{create_config, ConfigFolder};
use tunesearch::dispatch::SearchKind;
use tunesearch::startup::{run, Operation};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Command::new("tunesearch")
        .about("🎵 Search YouTube Music from your terminal 🎵")
        .subcommand(
            Command::new("songs")
                .about("🎧 Search for songs")
                .arg(query_arg()),
        )
        .subcommand(
            Command::new("artists")
                .about("🎤 Search for artists")
                .arg(query_arg()),
        )
        .subcommand(
            Command::new("playlists")
                .about("📻 Search for playlists")
                .arg(query_arg()),
        )
        .subcommand(
            Command::new("albums")
                .about("💿 Search for albums, most popular first")
                .arg(query_arg()),
        )
        .subcommand(
            Command::new("tracks")
                .about("🎼 List the tracks of a playlist")
                .arg(Arg::new("playlist-id").required(true)),
        )
        .subcommand(
            Command::new("interactive")
                .about("⌨️  Search as you type, with debounced input")
                .arg(
                    Arg::new("kind")
                        .value_parser(["songs", "artists", "playlists", "albums"])
                        .default_value("songs"),
                ),
        )
        .subcommand(
            Command::new("config").about("🛠️ Create or update configuration file for tunesearch"),
        )
        .get_matches();

    let cfg_folder = ConfigFolder::new();

    match args.subcommand() {
        Some(("songs", sub)) => {
            run(cfg_folder, Operation::Search(SearchKind::Songs, query_value(sub))).await
        }
        Some(("artists", sub)) => {
            run(cfg_folder, Operation::Search(SearchKind::Artists, query_value(sub))).await
        }
        Some(("playlists", sub)) => {
            run(
                cfg_folder,
                Operation::Search(SearchKind::Playlists, query_value(sub)),
            )
            .await
        }
        Some(("albums", sub)) => {
            run(cfg_folder, Operation::Search(SearchKind::Albums, query_value(sub))).await
        }
        Some(("tracks", sub)) => {
            let playlist_id = sub
                .get_one::<String>("playlist-id")
                .cloned()
                .unwrap_or_default();
            run(cfg_folder, Operation::Tracks(playlist_id)).await
        }
        Some(("interactive", sub)) => {
            let kind = sub
                .get_one::<String>("kind")
                .and_then(|name| SearchKind::from_name(name))
                .unwrap_or(SearchKind::Songs);
            run(cfg_folder, Operation::Interactive(kind)).await
        }
        Some(("config", _)) => {
            println!("\x1b[1m\x1b[34mConfiguring tunesearch...\x1b[0m");
            create_config(cfg_folder)
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn query_arg() -> Arg {
    Arg::new("query").required(true).num_args(1..)
}

fn query_value(matches: &ArgMatches) -> String {
    matches
        .get_many::<String>("query")
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn print_usage() {
    println!("\x1b[1m\x1b[31mInvalid command!\x1b[0m\n");
    println!("📖 Available Commands:");
    println!("  \x1b[1m\x1b[32mtunesearch songs <query>\x1b[0m       - 🎧 Search for songs");
    println!("  \x1b[1m\x1b[32mtunesearch artists <query>\x1b[0m     - 🎤 Search for artists");
    println!("  \x1b[1m\x1b[32mtunesearch playlists <query>\x1b[0m   - 📻 Search for playlists");
    println!("  \x1b[1m\x1b[32mtunesearch albums <query>\x1b[0m      - 💿 Search for albums");
    println!("  \x1b[1m\x1b[32mtunesearch tracks <playlist-id>\x1b[0m - 🎼 List playlist tracks");
    println!("  \x1b[1m\x1b[32mtunesearch interactive [kind]\x1b[0m  - ⌨️  Search as you type");
    println!("  \x1b[1m\x1b[32mtunesearch config\x1b[0m              - 🛠️  Create or update configuration file");
    println!("\x1b[33mSet up your YouTube API key with 'tunesearch config' before searching!\x1b[0m\n");
}
