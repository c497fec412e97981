//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use marquee_catalog::CatalogClient;
use marquee_catalog::config::{ENV_API_KEY, ENV_BASE_URL, ENV_IMAGE_BASE_URL, ENV_LANGUAGE};
use marquee_models::{ImageSize, MovieCategory, MovieId};
use marquee_ui::core::auth::AuthState;

use crate::client::{AppContext, CliDependencies, CliResult, init_tracing};
use crate::commands::catalog::{
    handle_genres, handle_image_url, handle_list, handle_movie, handle_reload, handle_search,
};
use crate::commands::session::{handle_browse, handle_sign_in, handle_sign_out, handle_status};
use crate::commands::theme::{handle_theme_show, handle_theme_sync, handle_theme_toggle};
use crate::commands::wishlist::{handle_wishlist_list, handle_wishlist_toggle};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STATE_FILE: &str = "marquee-state.json";

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    init_tracing();
    let cli = Cli::parse();
    let command = command_label(&cli.command);

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            let exit_code = err.exit_code();
            tracing::debug!(command, exit_code, "command failed");
            eprintln!("error: {}", err.display_message());
            exit_code
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let deps = CliDependencies::from_cli(&cli)?;
    let config = if deps.config.api_key.is_some() {
        deps.config
    } else {
        let session_key = AuthState::initialize(&deps.store)
            .session()
            .cached_api_key
            .clone();
        deps.config.with_api_key(session_key)
    };
    let ctx = AppContext {
        catalog: CatalogClient::new(deps.http, config),
        store: deps.store,
        output: cli.output,
    };

    match cli.command {
        Command::SignIn(args) => handle_sign_in(&ctx, args).await,
        Command::SignOut => handle_sign_out(&ctx),
        Command::Status => handle_status(&ctx),
        Command::Browse(args) => handle_browse(&ctx, &args),
        Command::List(args) => handle_list(&ctx, args).await,
        Command::Search(args) => handle_search(&ctx, &args).await,
        Command::Movie(args) => handle_movie(&ctx, args.id).await,
        Command::Genres => handle_genres(&ctx).await,
        Command::Reload => handle_reload(&ctx).await,
        Command::Wishlist(WishlistCommand::Toggle(args)) => handle_wishlist_toggle(&ctx, args.id),
        Command::Wishlist(WishlistCommand::List) => handle_wishlist_list(&ctx).await,
        Command::ImageUrl(args) => handle_image_url(&ctx, &args),
        Command::Theme(ThemeCommand::Toggle) => handle_theme_toggle(&ctx),
        Command::Theme(ThemeCommand::Show) => handle_theme_show(&ctx),
        Command::Theme(ThemeCommand::Sync(args)) => handle_theme_sync(&ctx, args.prefers_dark),
    }
}

#[derive(Parser)]
#[command(name = "marquee", about = "Browse the movie catalog from the terminal")]
pub(crate) struct Cli {
    #[arg(long, global = true, env = ENV_BASE_URL)]
    pub(crate) api_url: Option<String>,
    #[arg(long, global = true, env = ENV_IMAGE_BASE_URL)]
    pub(crate) image_url: Option<String>,
    #[arg(long, global = true, env = ENV_API_KEY)]
    pub(crate) api_key: Option<String>,
    #[arg(long, global = true, env = ENV_LANGUAGE)]
    pub(crate) language: Option<String>,
    #[arg(
        long,
        global = true,
        env = "MARQUEE_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "MARQUEE_STATE_FILE",
        default_value = DEFAULT_STATE_FILE
    )]
    pub(crate) state_file: PathBuf,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Validate an API key and persist the session.
    SignIn(SignInArgs),
    /// Clear every stored credential.
    SignOut,
    /// Show the session and the guard decision for each route.
    Status,
    /// Check whether a route is reachable with the current session.
    Browse(BrowseArgs),
    /// List one page of a category.
    List(ListArgs),
    /// Search titles.
    Search(SearchArgs),
    /// Show one movie with its trailer.
    Movie(MovieArgs),
    /// List genres.
    Genres,
    /// Reload every category and pick a featured movie.
    Reload,
    #[command(subcommand)]
    Wishlist(WishlistCommand),
    /// Resolve an artwork path to a full URL.
    ImageUrl(ImageUrlArgs),
    #[command(subcommand)]
    Theme(ThemeCommand),
}

#[derive(Args)]
pub(crate) struct SignInArgs {
    #[arg(long)]
    pub(crate) user: String,
    #[arg(long)]
    pub(crate) key: String,
    #[arg(long)]
    pub(crate) token: Option<String>,
}

#[derive(Args)]
pub(crate) struct BrowseArgs {
    #[arg(help = "Route name: home, popular, search, signin, or wishlist")]
    pub(crate) route: String,
}

#[derive(Args)]
pub(crate) struct ListArgs {
    #[arg(value_enum)]
    pub(crate) category: CategoryArg,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
}

#[derive(Args)]
pub(crate) struct SearchArgs {
    pub(crate) query: String,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
}

#[derive(Args)]
pub(crate) struct MovieArgs {
    pub(crate) id: MovieId,
}

#[derive(Subcommand)]
pub(crate) enum WishlistCommand {
    /// Add or remove a movie.
    Toggle(WishlistToggleArgs),
    /// Reload the catalog and show wishlisted movies.
    List,
}

#[derive(Args)]
pub(crate) struct WishlistToggleArgs {
    pub(crate) id: MovieId,
}

#[derive(Args)]
pub(crate) struct ImageUrlArgs {
    pub(crate) path: String,
    #[arg(long, default_value = "original", value_parser = parse_image_size)]
    pub(crate) size: ImageSize,
}

#[derive(Subcommand)]
pub(crate) enum ThemeCommand {
    /// Flip between light and dark.
    Toggle,
    /// Print the current mode.
    Show,
    /// Follow a system colour-scheme preference.
    Sync(ThemeSyncArgs),
}

#[derive(Args)]
pub(crate) struct ThemeSyncArgs {
    #[arg(long, action = ArgAction::Set)]
    pub(crate) prefers_dark: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum CategoryArg {
    Popular,
    NowPlaying,
    TopRated,
    Upcoming,
}

impl From<CategoryArg> for MovieCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Popular => Self::Popular,
            CategoryArg::NowPlaying => Self::NowPlaying,
            CategoryArg::TopRated => Self::TopRated,
            CategoryArg::Upcoming => Self::Upcoming,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

fn parse_image_size(value: &str) -> Result<ImageSize, String> {
    value.parse().map_err(|err| format!("{err}"))
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::SignIn(_) => "sign_in",
        Command::SignOut => "sign_out",
        Command::Status => "status",
        Command::Browse(_) => "browse",
        Command::List(_) => "list",
        Command::Search(_) => "search",
        Command::Movie(_) => "movie",
        Command::Genres => "genres",
        Command::Reload => "reload",
        Command::Wishlist(_) => "wishlist",
        Command::ImageUrl(_) => "image_url",
        Command::Theme(_) => "theme",
    }
}
