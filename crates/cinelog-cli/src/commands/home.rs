use crate::commands::{fetch_spinner, finish_spinner, movie_table};
use crate::context::AppContext;
use crate::output::Output;
use cinelog_catalog::{CatalogError, MovieSummary, Page, TrendingWindow};
use clap::ValueEnum;
use color_eyre::eyre::eyre;
use serde_json::json;
use tracing::warn;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WindowArg {
    Day,
    Week,
}

impl From<WindowArg> for TrendingWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Day => TrendingWindow::Day,
            WindowArg::Week => TrendingWindow::Week,
        }
    }
}

/// The landing screen: four independently fetched sections. A section that
/// fails to load renders as unavailable without taking the others down.
pub async fn run_home(window: WindowArg, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    let catalog = ctx.catalog().map_err(|e| eyre!("{}", e))?;

    let spinner = fetch_spinner(output, "Fetching catalog sections...");
    let (popular, top_rated, trending, upcoming) = tokio::join!(
        catalog.popular(1),
        catalog.top_rated(1),
        catalog.trending(window.into()),
        catalog.upcoming(1),
    );
    finish_spinner(spinner);

    render_section(output, "Popular", popular);
    render_section(output, "Top rated", top_rated);
    render_section(output, "Trending", trending);
    render_section(output, "Upcoming", upcoming);

    Ok(())
}

fn render_section(output: &Output, title: &str, result: Result<Page<MovieSummary>, CatalogError>) {
    match result {
        Ok(page) => {
            if output.is_human() {
                output.info(format!("\n{}", title));
                output.info(movie_table(&page.results).to_string());
            } else {
                output.json(&json!({"section": title, "results": page.results}));
            }
        }
        Err(e) => {
            warn!("Failed to fetch {} section: {}", title, e);
            output.warn(format!("{} section unavailable", title));
        }
    }
}
