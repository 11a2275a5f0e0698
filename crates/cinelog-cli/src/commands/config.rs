use crate::context::AppContext;
use crate::output::Output;
use cinelog_config::Config;
use color_eyre::eyre::eyre;
use serde_json::json;

fn mask(token: &str) -> String {
    if token.len() <= 8 {
        "****".to_string()
    } else {
        format!("{}…{}", &token[..4], &token[token.len() - 4..])
    }
}

pub fn run_show(full: bool, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    let catalog = &ctx.config.catalog;
    let token = match catalog.resolved_token() {
        Some(token) if full => token,
        Some(token) => mask(&token),
        None => "(not set)".to_string(),
    };

    if !output.is_human() {
        output.json(&json!({
            "config_file": ctx.paths.config_file(),
            "collections_dir": ctx.paths.collections_dir(),
            "catalog": {
                "token": token,
                "base_url": catalog.base_url,
                "image_base_url": catalog.image_base_url,
                "poster_size": catalog.poster_size,
                "language": catalog.language,
            },
        }));
        return Ok(());
    }

    output.info(format!("Config file:     {}", ctx.paths.config_file().display()));
    output.info(format!("Collections dir: {}", ctx.paths.collections_dir().display()));
    output.info(format!("Catalog token:   {}", token));
    output.info(format!("Base URL:        {}", catalog.base_url));
    output.info(format!("Image base URL:  {}", catalog.image_base_url));
    output.info(format!("Poster size:     {}", catalog.poster_size));
    output.info(format!("Language:        {}", catalog.language));
    Ok(())
}

pub fn run_set_token(token: &str, ctx: &AppContext, output: &Output) -> color_eyre::Result<()> {
    if token.trim().is_empty() {
        output.error("The token cannot be blank");
        return Ok(());
    }

    let path = ctx.paths.config_file();
    let mut config = Config::load_or_default(&path).map_err(|e| eyre!("{}", e))?;
    config.catalog.token = token.trim().to_string();
    config.save_to_file(&path).map_err(|e| eyre!("{}", e))?;

    output.success("Catalog token saved");
    Ok(())
}
