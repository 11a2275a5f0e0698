use crate::commands::{fetch_spinner, finish_spinner};
use crate::context::AppContext;
use crate::output::Output;
use cinelog_models::Review;
use color_eyre::eyre::eyre;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::warn;

/// The detail view: catalog metadata plus this device's state for the movie.
/// Reviews come from the persisted per-movie mirror, the detail view's read
/// path.
pub async fn run_movie(id: u64, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    let catalog = ctx.catalog().map_err(|e| eyre!("{}", e))?;

    let spinner = fetch_spinner(output, "Fetching movie...");
    let result = catalog.movie_details(id).await;
    finish_spinner(spinner);

    let details = match result {
        Ok(details) => details,
        Err(e) => {
            warn!("Failed to fetch movie {}: {}", id, e);
            output.error("Could not load the movie.");
            return Ok(());
        }
    };

    let movie_id = id.to_string();
    let reviews = ctx.reviews().mirror(&movie_id);
    let in_favorites = ctx.favorites().contains(&movie_id);
    let in_watchlist = ctx.watchlist().contains(&movie_id);

    if !output.is_human() {
        output.json(&json!({
            "movie": details,
            "reviews": reviews,
            "in_favorites": in_favorites,
            "in_watchlist": in_watchlist,
        }));
        return Ok(());
    }

    let year = details.release_year().unwrap_or("-");
    output.info(format!("{} ({})", details.title.bold(), year));
    output.info(format!(
        "⭐ {:.1}  •  {} min",
        details.vote_average,
        details.runtime.map_or("?".to_string(), |r| r.to_string())
    ));

    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        output.info(names.join(", "));
    }

    if let Some(poster) = catalog.poster_url(details.poster_path.as_deref()) {
        output.info(format!("Poster: {}", poster));
    }

    if !details.overview.is_empty() {
        output.info(format!("\n{}", details.overview));
    }

    if let Some(trailer) = details.trailer() {
        output.info(format!(
            "\nTrailer: https://www.youtube.com/watch?v={}",
            trailer.key
        ));
    }

    let cast = details.cast();
    if !cast.is_empty() {
        output.info("\nCast:");
        for member in cast.iter().take(8) {
            match member.character.as_deref() {
                Some(character) if !character.is_empty() => {
                    output.info(format!("  {} as {}", member.name, character))
                }
                _ => output.info(format!("  {}", member.name)),
            }
        }
    }

    output.info(format!(
        "\nFavorites: {}  •  Watchlist: {}",
        if in_favorites { "yes" } else { "no" },
        if in_watchlist { "yes" } else { "no" }
    ));

    if reviews.is_empty() {
        output.info("\nNo reviews for this movie yet.");
    } else {
        output.info(format!("\nReviews ({}):", reviews.len()));
        for review in &reviews {
            render_review(output, review);
        }
    }

    let recommendations = details.recommendations();
    if !recommendations.is_empty() {
        output.info("\nYou might also like:");
        for movie in recommendations.iter().take(6) {
            output.info(format!("  {} ({})", movie.title, movie.id));
        }
    }

    Ok(())
}

pub fn render_review(output: &Output, review: &Review) {
    let stars = "★".repeat(review.rating as usize);
    output.info(format!(
        "  [{}] {} {} • {}",
        review.id,
        review.display_author(),
        stars.yellow(),
        review.date
    ));
    if !review.text.is_empty() {
        output.info(format!("      {}", review.text));
    }
}
