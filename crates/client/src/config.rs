//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use map_core::{TokenId, ViewContext, ViewerRole};

/// What to load and who is looking.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub scene_path: PathBuf,
    pub viewer: ViewerRole,
    pub view_tokens: Vec<TokenId>,
    /// Mirror logs to stderr in addition to the log file.
    pub log_stderr: bool,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scene_path: PathBuf::from("data/scenes/crypt.ron"),
            viewer: ViewerRole::GameMaster,
            view_tokens: Vec::new(),
            log_stderr: false,
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MAP_SCENE_PATH` - Scene file to load (default: data/scenes/crypt.ron)
    /// - `MAP_VIEWER` - `gm` or `player` (default: gm)
    /// - `MAP_VIEW_TOKENS` - Comma-separated token ids the player sees through
    /// - `MAP_LOG_STDERR` - Also log to stderr (default: false)
    /// - `MAP_SESSION_ID` - Log directory name (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("MAP_SCENE_PATH") {
            config.scene_path = PathBuf::from(path);
        }
        if let Some(viewer) = env::var("MAP_VIEWER").ok().and_then(|v| parse_viewer(&v)) {
            config.viewer = viewer;
        }
        if let Ok(tokens) = env::var("MAP_VIEW_TOKENS") {
            config.view_tokens = parse_tokens(&tokens);
        }
        if let Some(stderr) = read_env_bool("MAP_LOG_STDERR") {
            config.log_stderr = stderr;
        }
        config.session_id = env::var("MAP_SESSION_ID").ok().filter(|id| !id.is_empty());

        config
    }

    pub fn view(&self) -> ViewContext {
        match self.viewer {
            ViewerRole::GameMaster => ViewContext::gm(),
            ViewerRole::Player => ViewContext::player(self.view_tokens.iter().copied()),
        }
    }
}

fn parse_viewer(value: &str) -> Option<ViewerRole> {
    match value.trim().to_lowercase().as_str() {
        "gm" => Some(ViewerRole::GameMaster),
        other => other.parse().ok(),
    }
}

/// Unparsable entries are dropped.
fn parse_tokens(value: &str) -> Vec<TokenId> {
    value
        .split(',')
        .filter_map(|id| id.trim().parse().ok().map(TokenId))
        .collect()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
