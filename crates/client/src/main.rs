//! `mapview`: render a scene file as a text map.
use std::path::Path;

use anyhow::{Context, Result};
use map_client::{AsciiCanvas, ClientConfig, setup_logging, summary};
use map_content::{SceneLoader, SettingsLoader};
use map_runtime::{RenderSession, RuntimeConfig};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = setup_logging(config.session_id.as_deref(), config.log_stderr)?;

    let scene = SceneLoader::load(&config.scene_path)?;
    let settings_path = config
        .scene_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("settings.toml");
    let settings = SettingsLoader::load_or_default(&settings_path)?;
    let runtime_config = RuntimeConfig::from_settings(settings).with_env();

    let zone = scene.zone.clone();
    let tokens: Vec<_> = scene.tokens.iter().map(|token| token.cell).collect();

    let mut session = RenderSession::from_scene(scene, runtime_config)
        .with_context(|| format!("Failed to start session for {}", config.scene_path.display()))?;

    let view = config.view();
    let frame = session.render(&view);
    tracing::info!(
        target: "mapview",
        frame = frame.frame,
        templates = frame.templates.len(),
        "Rendered {} for {}",
        config.scene_path.display(),
        view.role
    );

    let mut canvas = AsciiCanvas::new(zone.grid.cell_size, zone.width, zone.height);
    canvas.paint_frame(&frame, tokens);

    if !zone.name.is_empty() {
        println!("{}", zone.name);
    }
    print!("{}", canvas);
    println!("{}", summary(&frame));

    Ok(())
}
