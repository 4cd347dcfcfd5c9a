// Skin — optional user stylesheet named by the INI `skin` key

use std::path::{Path, PathBuf};

use gtk4::gdk;

use crate::config::{keys, ConfigFile};
use crate::paths::{self, PathKind};

pub const SKIN_ROOT: [&str; 2] = ["theme", "skin"];
pub const STYLESHEET: &str = "skin.css";

/// Stylesheet for `skin` under the first root that has one.
pub fn stylesheet_in(roots: &[PathBuf], skin: &str) -> Option<PathBuf> {
    let skin = skin.trim();
    if skin.is_empty() {
        return None;
    }
    let [theme, folder] = SKIN_ROOT;
    paths::locate_in(roots, PathKind::File, &[theme, folder, skin, STYLESHEET])
}

/// Load the configured skin on the default display, if any.
pub fn apply(config: &ConfigFile) {
    let skin = match config.value(keys::SKIN) {
        Ok(Some(skin)) => skin,
        Ok(None) => return,
        Err(e) => {
            tracing::warn!("{e}");
            return;
        }
    };
    let Some(path) = stylesheet_in(&paths::resource_roots(), &skin) else {
        tracing::debug!("no stylesheet for skin {skin}");
        return;
    };
    load(&path);
}

fn load(path: &Path) {
    let Some(display) = gdk::Display::default() else {
        tracing::warn!("no display to apply {} to", path.display());
        return;
    };
    let provider = gtk4::CssProvider::new();
    provider.load_from_path(path);
    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
    tracing::info!("skin loaded from {}", path.display());
}
