use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;
use tracing::warn;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css` as a static string.
pub fn main_css() -> &'static str {
    MAIN_CSS
        .get_or_init(|| load_text("/assets/main.css"))
        .as_str()
}

fn load_text(path: &str) -> String {
    let Some(asset) = load_asset(path) else {
        warn!(path, "embedded asset missing");
        return String::new();
    };
    String::from_utf8_lossy(asset.as_ref()).into_owned()
}

fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    EmbeddedAssets::get(&canonical_asset_path(path)).map(|file| file.data)
}

fn canonical_asset_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if let Some(rest) = trimmed.strip_prefix("assets/") {
        rest.to_string()
    } else {
        trimmed.to_string()
    }
}
