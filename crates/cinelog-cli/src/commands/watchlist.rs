use crate::commands::{fetch_spinner, finish_spinner, saved_table};
use crate::context::AppContext;
use crate::output::Output;
use cinelog_models::MovieRef;
use color_eyre::eyre::eyre;
use dialoguer::Confirm;
use serde_json::json;
use tracing::warn;

pub fn run_list(ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    let watchlist = ctx.watchlist().get_all();
    if !output.is_human() {
        output.json(&json!({"watchlist": watchlist}));
        return Ok(());
    }
    if watchlist.is_empty() {
        output.info("The watchlist is empty.");
    } else {
        output.info(saved_table(&watchlist).to_string());
    }
    Ok(())
}

pub async fn run_add(movie_id: u64, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    let store = ctx.watchlist();
    let id = movie_id.to_string();
    if store.contains(&id) {
        output.info(format!("Movie {} is already on the watchlist", movie_id));
        return Ok(());
    }

    let catalog = ctx.catalog().map_err(|e| eyre!("{}", e))?;
    let spinner = fetch_spinner(output, "Fetching movie...");
    let result = catalog.movie_details(movie_id).await;
    finish_spinner(spinner);

    match result {
        Ok(details) => {
            store.add(MovieRef::new(id, details.title.clone()).with_poster(details.poster_path));
            output.success(format!("Added \"{}\" to the watchlist", details.title));
        }
        Err(e) => {
            warn!("Failed to fetch movie {}: {}", movie_id, e);
            output.error(format!("Could not fetch movie {}; nothing added", movie_id));
        }
    }
    Ok(())
}

pub fn run_remove(movie_id: u64, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    ctx.watchlist().remove(&movie_id.to_string());
    output.success(format!("Removed movie {} from the watchlist", movie_id));
    Ok(())
}

pub fn run_clear(yes: bool, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    if !yes && output.is_human() {
        let confirmed = Confirm::new()
            .with_prompt("Remove everything from the watchlist?")
            .default(false)
            .interact()
            .map_err(|e| eyre!("{}", e))?;
        if !confirmed {
            output.info("Aborted.");
            return Ok(());
        }
    }
    ctx.watchlist().clear();
    output.success("Watchlist cleared");
    Ok(())
}
