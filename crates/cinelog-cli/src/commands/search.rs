use crate::commands::{fetch_spinner, finish_spinner, movie_table};
use crate::context::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use serde_json::json;
use tracing::warn;

pub async fn run_search(query: &str, page: u32, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    let catalog = ctx.catalog().map_err(|e| eyre!("{}", e))?;

    let spinner = fetch_spinner(output, "Searching...");
    let result = catalog.search(query, page).await;
    finish_spinner(spinner);

    match result {
        Ok(found) => {
            if found.results.is_empty() {
                output.info(format!("No results for \"{}\"", query));
                return Ok(());
            }
            if output.is_human() {
                output.info(format!(
                    "Results for \"{}\" (page {}/{})",
                    query, found.page, found.total_pages
                ));
                output.info(movie_table(&found.results).to_string());
            } else {
                output.json(&json!({
                    "query": query,
                    "page": found.page,
                    "total_pages": found.total_pages,
                    "results": found.results,
                }));
            }
        }
        Err(e) => {
            warn!("Search failed: {}", e);
            output.error(format!("Search failed: {}", e));
        }
    }

    Ok(())
}
