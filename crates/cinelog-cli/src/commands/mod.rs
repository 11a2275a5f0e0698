pub mod config;
pub mod favorites;
pub mod home;
pub mod movie;
pub mod profile;
pub mod review;
pub mod search;
pub mod watchlist;

use crate::output::Output;
use cinelog_catalog::MovieSummary;
use cinelog_models::SavedMovie;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a catalog fetch is in flight, human mode only.
pub fn fetch_spinner(output: &Output, msg: &str) -> Option<ProgressBar> {
    if !output.is_human() || output.is_quiet() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}

pub fn movie_table(movies: &[MovieSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "Title", "Year", "Rating"]);
    for movie in movies {
        table.add_row(vec![
            movie.id.to_string(),
            movie.title.clone(),
            movie.release_year().unwrap_or("-").to_string(),
            format!("{:.1}", movie.vote_average),
        ]);
    }
    table
}

pub fn saved_table(entries: &[SavedMovie]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "Title", "Added"]);
    for entry in entries {
        table.add_row(vec![
            entry.id.clone(),
            entry.title.clone(),
            entry.added_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    table
}
