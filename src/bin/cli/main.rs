use std::{env, fs, process::exit};

use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use reedline::Signal;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod command_parser;
mod prompt;
mod repl;

use tomefind::{
    authors::resolve_authors,
    catalog::{self, OpenLibraryClient},
    config::Config,
    display::*,
    error::ResolutionError,
    favourites::{Favourites, FavouritesStore, FileStorage},
    resolver::resolve_detail,
    traits::DisplayTerminal,
    types::{
        author::AuthorRecord, detail::ResolvedDetail, favourite::FavouriteEntry,
        key::CatalogKey,
    },
};

struct App {
    config:     Config,
    client:     OpenLibraryClient,
    favourites: Favourites<FileStorage>,
}

impl App {
    fn notice(&self, s: &str) {
        println!("{}", self.config.output_notice.format_str(s));
    }

    fn error(&self, s: &str) {
        println!("{}", self.config.output_error.format_str(s));
    }

    /// Prints the not-found or error state itself and returns `None` then.
    async fn load_detail(&self, id: &str) -> Option<(ResolvedDetail, Vec<AuthorRecord>)> {
        match resolve_detail(&self.client, id).await {
            Ok(detail) => {
                let authors = resolve_authors(&self.client, &detail.record).await;
                Some((detail, authors))
            }
            Err(ResolutionError::NotFound { .. }) => {
                self.notice(BOOK_NOT_FOUND);
                None
            }
            Err(e) => {
                warn!("Resolving {id} failed: {e}");
                self.error(BOOK_LOAD_FAILED);
                None
            }
        }
    }

    /// Stored key for user input that may be a full key or a bare id.
    fn favourite_key(&self, input: &str) -> String {
        let id = CatalogKey::from(input).id().to_string();
        self.favourites
            .list()
            .into_iter()
            .map(|entry| entry.key)
            .find(|key| key == input || CatalogKey::from(key.as_str()).id() == id)
            .unwrap_or_else(|| input.to_string())
    }
}

fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| anyhow!("Missing argument {name}"))
}

async fn handle_command(command: Vec<String>, app: &mut App) -> Result<()> {
    let matches = command_parser::arg_parser().try_get_matches_from(command)?;
    match matches.subcommand() {
        Some(("search", _matches)) => {
            let query = _matches
                .get_many::<String>("query")
                .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            match catalog::search(&app.client, &query).await {
                Ok(results) if results.is_empty() => app.notice(NO_RESULTS),
                Ok(results) => {
                    for result in results {
                        print!("{}", result.fmt_to_string(&app.config)?);
                    }
                }
                Err(e) => app.error(&e.to_string()),
            }
        }
        Some(("show", _matches)) => {
            let id = required(_matches, "id")?;
            if let Some((detail, authors)) = app.load_detail(id).await {
                let view = DetailView {
                    detail:  &detail,
                    authors: &authors,
                };
                print!("{}", view.fmt_to_string(&app.config)?);
                if app.favourites.contains(detail.canonical_key.as_str()) {
                    app.notice("In your favourites.");
                }
            }
        }
        Some(("author", _matches)) => {
            let id = required(_matches, "id")?;
            match catalog::fetch_author(&app.client, id).await {
                Ok(author) => print!("{}", author.fmt_to_string(&app.config)?),
                Err(e) => {
                    warn!("Fetching author {id} failed: {e}");
                    app.error(AUTHOR_LOAD_FAILED);
                }
            }
        }
        Some(("favourites", _matches)) => match _matches.subcommand() {
            Some(("list", _)) => {
                let favourites = app.favourites.list();
                if favourites.is_empty() {
                    app.notice(NO_FAVOURITES);
                }
                for entry in favourites {
                    print!("{}", entry.fmt_to_string(&app.config)?);
                }
            }
            Some(("add", _matches)) => {
                let id = required(_matches, "id")?;
                if let Some((detail, authors)) = app.load_detail(id).await {
                    let entry = FavouriteEntry::from_detail(&detail, &authors);
                    if app.favourites.contains(&entry.key) {
                        app.notice(&format!("{} is already a favourite.", entry.title));
                    } else {
                        let title = entry.title.clone();
                        app.favourites.add(entry)?;
                        app.notice(&format!("Added {title} to your favourites."));
                    }
                }
            }
            Some(("remove", _matches)) => {
                let key = app.favourite_key(required(_matches, "key")?);
                app.favourites.remove(&key)?;
                app.notice(&format!("Removed {key}."));
            }
            Some(("check", _matches)) => {
                let key = app.favourite_key(required(_matches, "key")?);
                if app.favourites.contains(&key) {
                    app.notice(&format!("{key} is a favourite."));
                } else {
                    app.notice(&format!("{key} is not a favourite."));
                }
            }
            Some((name, _matches)) => unimplemented!("{}", name),
            None => unreachable!("subcommand required"),
        },
        Some(("config", _matches)) => {
            println!("{}", Config::default_as_string()?);
        }
        Some(("exit", _matches)) => {
            exit(0);
        }
        Some((name, _matches)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let args_parsed = command_parser::arg_parser_cli().get_matches_from(env::args_os().skip(1));

    let config = Config::read_config()?;
    let data_dir = config.data_dir()?;
    let mut app = App {
        client: OpenLibraryClient::new(config.api_base_url.clone())?,
        favourites: Favourites::new(FileStorage::new(&data_dir)),
        config,
    };

    if let Some(("repl", _)) = args_parsed.subcommand() {
        fs::create_dir_all(&data_dir)?;
        let mut repl = repl::Repl::new(
            command_parser::generate_completions(),
            data_dir.join("history.txt"),
        )?;
        loop {
            match repl.read_line() {
                Ok(Signal::Success(buffer)) => {
                    let Some(command) = shlex::split(&buffer) else {
                        app.error("Invalid command");
                        continue;
                    };
                    if command.is_empty() {
                        continue;
                    }
                    if let Err(e) = handle_command(command, &mut app).await {
                        app.error(&e.to_string());
                    }
                }
                Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                    println!("\nAborted!");
                    break;
                }
                Ok(signal) => {
                    println!("Event: {:?}", signal);
                }
                Err(e) => {
                    app.error(&e.to_string());
                    break;
                }
            }
        }
    } else {
        let args = env::args_os()
            .skip(1)
            .map(|x| {
                x.into_string()
                    .map_err(|_| anyhow!("Invalid unicode in arguments"))
            })
            .collect::<Result<Vec<String>>>()?;
        handle_command(args, &mut app).await?;
    }

    Ok(())
}
