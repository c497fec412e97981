//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use marquee_models::{Genre, Movie, MoviePage};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Movie detail enriched with resolved artwork, genre names, and trailer.
#[derive(Debug, Serialize)]
pub(crate) struct MovieReport {
    pub(crate) movie: Movie,
    pub(crate) poster_url: String,
    pub(crate) genres: Vec<String>,
    pub(crate) trailer_url: Option<String>,
}

/// Session snapshot plus the guard verdict for every route.
#[derive(Debug, Serialize)]
pub(crate) struct SessionReport {
    pub(crate) authenticated: bool,
    pub(crate) identity: Option<String>,
    pub(crate) api_key: Option<String>,
    pub(crate) external_token: bool,
    pub(crate) routes: Vec<RouteAccess>,
}

/// Guard verdict for one route.
#[derive(Debug, Serialize)]
pub(crate) struct RouteAccess {
    pub(crate) route: &'static str,
    pub(crate) allowed: bool,
}

/// Bucket sizes after a full reload.
#[derive(Debug, Serialize)]
pub(crate) struct ReloadReport {
    pub(crate) popular: usize,
    pub(crate) now_playing: usize,
    pub(crate) top_rated: usize,
    pub(crate) upcoming: usize,
    pub(crate) genres: usize,
    pub(crate) featured: Option<Movie>,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

pub(crate) fn render_movies(movies: &[Movie], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(movies)?,
        OutputFormat::Table => print_movie_rows(movies),
    }
    Ok(())
}

pub(crate) fn render_page(page: &MoviePage, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(page)?,
        OutputFormat::Table => {
            print_movie_rows(&page.results);
            println!(
                "page {} of {} ({} results)",
                page.page, page.total_pages, page.total_results
            );
        }
    }
    Ok(())
}

fn print_movie_rows(movies: &[Movie]) {
    println!("{:<10} {:>6} {:<10} TITLE", "ID", "RATING", "RELEASED");
    for movie in movies {
        println!(
            "{:<10} {:>6.1} {:<10} {}",
            movie.id,
            movie.vote_average,
            display_or_dash(&movie.release_date),
            movie.title
        );
    }
}

pub(crate) fn render_movie(report: &MovieReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(report)?,
        OutputFormat::Table => {
            let movie = &report.movie;
            println!("id: {}", movie.id);
            println!("title: {}", movie.title);
            println!("released: {}", display_or_dash(&movie.release_date));
            println!("rating: {:.1}", movie.vote_average);
            println!("language: {}", display_or_dash(&movie.original_language));
            if !report.genres.is_empty() {
                println!("genres: {}", report.genres.join(", "));
            }
            println!("poster: {}", report.poster_url);
            if let Some(trailer) = &report.trailer_url {
                println!("trailer: {trailer}");
            }
            if !movie.overview.is_empty() {
                println!();
                println!("{}", movie.overview);
            }
        }
    }
    Ok(())
}

pub(crate) fn render_genres(genres: &[Genre], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(genres)?,
        OutputFormat::Table => {
            println!("{:<8} NAME", "ID");
            for genre in genres {
                println!("{:<8} {}", genre.id, genre.name);
            }
        }
    }
    Ok(())
}

pub(crate) fn render_session(report: &SessionReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(report)?,
        OutputFormat::Table => {
            println!("authenticated: {}", report.authenticated);
            println!("identity: {}", report.identity.as_deref().unwrap_or("-"));
            println!("api key: {}", report.api_key.as_deref().unwrap_or("-"));
            println!("external token: {}", if report.external_token { "yes" } else { "no" });
            println!("routes:");
            for access in &report.routes {
                let verdict = if access.allowed { "allow" } else { "redirect to SignIn" };
                println!("  {:<10} {verdict}", access.route);
            }
        }
    }
    Ok(())
}

pub(crate) fn render_reload(report: &ReloadReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(report)?,
        OutputFormat::Table => {
            println!("popular: {}", report.popular);
            println!("now playing: {}", report.now_playing);
            println!("top rated: {}", report.top_rated);
            println!("upcoming: {}", report.upcoming);
            println!("genres: {}", report.genres);
            match &report.featured {
                Some(movie) => println!("featured: {} ({})", movie.title, movie.id),
                None => println!("featured: -"),
            }
        }
    }
    Ok(())
}

/// Keep the first and last two characters of a secret.
pub(crate) fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 4))
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}
