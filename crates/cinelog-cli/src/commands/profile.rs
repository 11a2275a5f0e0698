use crate::commands::movie::render_review;
use crate::context::AppContext;
use crate::output::Output;
use cinelog_models::Review;
use serde_json::json;

/// The profile view: saved name, reviews written under it, and a peek at the
/// favorites collection.
pub fn run_show(ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    let profile = ctx.profile();
    let name = profile.user_name();

    let mine: Vec<Review> = match name.as_deref() {
        Some(name) => ctx
            .reviews()
            .get_all()
            .into_iter()
            .filter(|r| r.author.as_deref() == Some(name))
            .collect(),
        None => Vec::new(),
    };
    let favorites = ctx.favorites().get_all();
    let first_favorites = &favorites[..favorites.len().min(5)];

    if !output.is_human() {
        output.json(&json!({
            "name": name,
            "has_avatar": profile.avatar().is_some(),
            "reviews": mine,
            "favorites": first_favorites,
        }));
        return Ok(());
    }

    output.info(format!("Name: {}", name.as_deref().unwrap_or("(not set)")));
    output.info(format!(
        "Avatar: {}",
        if profile.avatar().is_some() { "set" } else { "not set" }
    ));

    output.info("\nMy reviews:");
    if mine.is_empty() {
        output.info("  None yet.");
    } else {
        for review in &mine {
            render_review(output, review);
        }
    }

    output.info("\nMy favorites:");
    if first_favorites.is_empty() {
        output.info("  None yet.");
    } else {
        for favorite in first_favorites {
            output.info(format!("  {} ({})", favorite.title, favorite.id));
        }
    }

    Ok(())
}

pub fn run_set_name(name: &str, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    if name.trim().is_empty() {
        output.error("The name cannot be blank");
        return Ok(());
    }
    ctx.profile().set_user_name(name.trim());
    output.success(format!("Profile name set to {}", name.trim()));
    Ok(())
}

pub fn run_set_photo(data: &str, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    ctx.profile().set_avatar(data);
    output.success("Profile photo saved");
    Ok(())
}
