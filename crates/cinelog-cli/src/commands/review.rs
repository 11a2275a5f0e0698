use crate::commands::movie::render_review;
use crate::context::AppContext;
use crate::output::Output;
use cinelog_models::{Review, ReviewDraft};
use cinelog_store::Topic;
use color_eyre::eyre::eyre;
use dialoguer::{Confirm, Select};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn run_list(movie: Option<&str>, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    let store = ctx.reviews();
    let reviews = match movie {
        Some(movie_id) => store.get_by_movie(movie_id),
        None => store.get_all(),
    };
    render_listing(&reviews, output);
    Ok(())
}

pub fn run_mine(ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    let Some(name) = ctx.profile().user_name() else {
        output.warn("No profile name set; use `cinelog profile set-name` first.");
        return Ok(());
    };
    let mine: Vec<Review> = ctx
        .reviews()
        .get_all()
        .into_iter()
        .filter(|r| r.author.as_deref() == Some(name.as_str()))
        .collect();
    render_listing(&mine, output);
    Ok(())
}

pub fn run_add(
    movie_id: String,
    rating: u8,
    text: String,
    author: Option<String>,
    photo: Option<String>,
    ctx: &AppContext,
    output: &Output,
) -> color_eyre::Result<()> {
    let saved = ctx.reviews().save(ReviewDraft {
        id: None,
        movie_id,
        author,
        text,
        rating,
        photo_base64: photo,
    });
    output.success(format!("Saved review {} for movie {}", saved.id, saved.movie_id));
    Ok(())
}

pub fn run_edit(
    id: &str,
    movie: Option<String>,
    rating: Option<u8>,
    text: Option<String>,
    author: Option<String>,
    ctx: &AppContext,
    output: &Output,
) -> color_eyre::Result<()> {
    let store = ctx.reviews();
    let Some(existing) = store.get_by_id(id) else {
        output.error(format!("Review {} not found", id));
        return Ok(());
    };

    let saved = store.save(ReviewDraft {
        id: Some(existing.id),
        movie_id: movie.unwrap_or(existing.movie_id),
        author: author.or(existing.author),
        text: text.unwrap_or(existing.text),
        rating: rating.unwrap_or(existing.rating),
        photo_base64: existing.photo_base64,
    });
    output.success(format!("Updated review {}", saved.id));
    Ok(())
}

pub fn run_delete(id: &str, yes: bool, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    let store = ctx.reviews();
    if store.get_by_id(id).is_none() {
        output.warn(format!("Review {} not found", id));
        return Ok(());
    }

    if !yes && output.is_human() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete review {}?", id))
            .default(false)
            .interact()
            .map_err(|e| eyre!("{}", e))?;
        if !confirmed {
            output.info("Aborted.");
            return Ok(());
        }
    }

    store.delete(id);
    output.success(format!("Deleted review {}", id));
    Ok(())
}

/// Interactive manager. The listing is re-read through a bus subscription
/// after every delete rather than maintained by hand; the subscription is
/// released when the command returns.
pub fn run_manage(ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    if !output.is_human() {
        output.error("review manage is interactive and only works with --output human");
        return Ok(());
    }
    let store = ctx.reviews();

    let dirty = Arc::new(AtomicBool::new(true));
    let dirty_in_cb = Arc::clone(&dirty);
    let _subscription = ctx.bus.subscribe(Topic::Reviews, move || {
        dirty_in_cb.store(true, Ordering::SeqCst);
    });

    let mut reviews: Vec<Review> = Vec::new();
    loop {
        if dirty.swap(false, Ordering::SeqCst) {
            reviews = store.get_all();
        }
        if reviews.is_empty() {
            output.info("No reviews stored.");
            break;
        }

        let mut labels: Vec<String> = reviews
            .iter()
            .map(|r| {
                format!(
                    "movie {} • {}★ by {} ({})",
                    r.movie_id,
                    r.rating,
                    r.display_author(),
                    r.date
                )
            })
            .collect();
        labels.push("Done".to_string());

        let choice = Select::new()
            .with_prompt("Delete which review?")
            .items(&labels)
            .default(labels.len() - 1)
            .interact()
            .map_err(|e| eyre!("{}", e))?;

        if choice == reviews.len() {
            break;
        }

        let target = &reviews[choice];
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete review {}?", target.id))
            .default(false)
            .interact()
            .map_err(|e| eyre!("{}", e))?;
        if confirmed {
            store.delete(&target.id);
        }
    }

    Ok(())
}

fn render_listing(reviews: &[Review], output: &Output) {
    if !output.is_human() {
        output.json(&json!({"reviews": reviews}));
        return;
    }
    if reviews.is_empty() {
        output.info("No reviews.");
        return;
    }
    for review in reviews {
        output.info(format!("movie {}", review.movie_id));
        render_review(output, review);
    }
}
