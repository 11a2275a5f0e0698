use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;

mod commands;
mod context;
mod logging;
mod output;

use commands::home::WindowArg;

#[derive(Parser)]
#[command(name = "cinelog")]
#[command(about = "cinelog - browse the movie catalog and keep reviews, favorites and a watchlist on this device")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the landing sections: popular, top rated, trending and upcoming
    Home {
        /// Trending window
        #[arg(long, value_enum, default_value = "week")]
        window: WindowArg,
    },
    /// Search the catalog by title
    Search {
        query: String,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one movie: details, trailer, cast, reviews and recommendations
    Movie {
        /// Catalog movie id
        id: u64,
    },
    /// Manage reviews stored on this device
    Review {
        #[command(subcommand)]
        cmd: ReviewCommands,
    },
    /// Manage the favorites collection
    Favorites {
        #[command(subcommand)]
        cmd: CollectionCommands,
    },
    /// Manage the watchlist collection
    Watchlist {
        #[command(subcommand)]
        cmd: CollectionCommands,
    },
    /// Show or edit the local profile
    Profile {
        #[command(subcommand)]
        cmd: Option<ProfileCommands>,
    },
    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ReviewCommands {
    /// List reviews, optionally for one movie
    List {
        /// Only reviews for this movie id
        #[arg(long)]
        movie: Option<String>,
    },
    /// List reviews written under the saved profile name
    Mine,
    /// Write a review for a movie
    Add {
        /// Catalog movie id
        movie_id: String,

        /// Star rating, 1 to 5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        /// Review body
        #[arg(long, default_value = "")]
        text: String,

        /// Display name (defaults to the saved profile name)
        #[arg(long)]
        author: Option<String>,

        /// Inline-encoded image to attach
        #[arg(long)]
        photo: Option<String>,
    },
    /// Edit an existing review in place
    Edit {
        /// Review id
        id: String,

        /// Move the review to another movie id
        #[arg(long)]
        movie: Option<String>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        author: Option<String>,
    },
    /// Delete a review by id
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Interactively review and delete entries; the listing refreshes after
    /// every change
    Manage,
}

#[derive(Subcommand)]
enum CollectionCommands {
    /// List the collection
    List,
    /// Add a movie by catalog id (title and poster are cached at add time)
    Add {
        movie_id: u64,
    },
    /// Remove a movie by catalog id
    Remove {
        movie_id: u64,
    },
    /// Empty the collection
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the profile: name, my reviews, first favorites
    Show,
    /// Set the display name used for "my reviews"
    SetName {
        name: String,
    },
    /// Store an inline-encoded avatar image
    SetPhoto {
        data: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the token)
    Show {
        /// Show the token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Save the catalog API token to the config file
    SetToken {
        token: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = context::AppContext::init().map_err(|e| eyre!("{}", e))?;

    match cli.command {
        Commands::Home { window } => commands::home::run_home(window, &ctx, &output).await,
        Commands::Search { query, page } => commands::search::run_search(&query, page, &ctx, &output).await,
        Commands::Movie { id } => commands::movie::run_movie(id, &ctx, &output).await,
        Commands::Review { cmd } => match cmd {
            ReviewCommands::List { movie } => commands::review::run_list(movie.as_deref(), &ctx, &output),
            ReviewCommands::Mine => commands::review::run_mine(&ctx, &output),
            ReviewCommands::Add {
                movie_id,
                rating,
                text,
                author,
                photo,
            } => commands::review::run_add(movie_id, rating, text, author, photo, &ctx, &output),
            ReviewCommands::Edit {
                id,
                movie,
                rating,
                text,
                author,
            } => commands::review::run_edit(&id, movie, rating, text, author, &ctx, &output),
            ReviewCommands::Delete { id, yes } => commands::review::run_delete(&id, yes, &ctx, &output),
            ReviewCommands::Manage => commands::review::run_manage(&ctx, &output),
        },
        Commands::Favorites { cmd } => match cmd {
            CollectionCommands::List => commands::favorites::run_list(&ctx, &output),
            CollectionCommands::Add { movie_id } => {
                commands::favorites::run_add(movie_id, &ctx, &output).await
            }
            CollectionCommands::Remove { movie_id } => {
                commands::favorites::run_remove(movie_id, &ctx, &output)
            }
            CollectionCommands::Clear { yes } => commands::favorites::run_clear(yes, &ctx, &output),
        },
        Commands::Watchlist { cmd } => match cmd {
            CollectionCommands::List => commands::watchlist::run_list(&ctx, &output),
            CollectionCommands::Add { movie_id } => {
                commands::watchlist::run_add(movie_id, &ctx, &output).await
            }
            CollectionCommands::Remove { movie_id } => {
                commands::watchlist::run_remove(movie_id, &ctx, &output)
            }
            CollectionCommands::Clear { yes } => commands::watchlist::run_clear(yes, &ctx, &output),
        },
        Commands::Profile { cmd } => {
            let cmd = cmd.unwrap_or(ProfileCommands::Show);
            match cmd {
                ProfileCommands::Show => commands::profile::run_show(&ctx, &output),
                ProfileCommands::SetName { name } => commands::profile::run_set_name(&name, &ctx, &output),
                ProfileCommands::SetPhoto { data } => commands::profile::run_set_photo(&data, &ctx, &output),
            }
        }
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show { full } => commands::config::run_show(full, &ctx, &output),
            ConfigCommands::SetToken { token } => commands::config::run_set_token(&token, &ctx, &output),
        },
    }
}
