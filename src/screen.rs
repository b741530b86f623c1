//! Screen size resolution.

use mediawall_config::ScreenConfig;
use mediawall_core::ScreenSize;
use screenshots::Screen;
use tracing::{debug, warn};

/// Screen size for the wall: configured dimensions win, then the primary
/// display, then 1920x1080.
pub(crate) fn resolve(config: &ScreenConfig) -> ScreenSize {
    let detected = match (config.width, config.height) {
        (Some(_), Some(_)) => None,
        _ => detect_primary(),
    };
    merge(config, detected)
}

fn merge(config: &ScreenConfig, detected: Option<ScreenSize>) -> ScreenSize {
    let base = detected.unwrap_or_else(|| {
        if config.width.is_none() || config.height.is_none() {
            warn!("Could not detect screen size, assuming 1920x1080");
        }
        ScreenSize::default()
    });

    ScreenSize::new(
        config.width.unwrap_or(base.width),
        config.height.unwrap_or(base.height),
    )
}

fn detect_primary() -> Option<ScreenSize> {
    let screens = match Screen::all() {
        Ok(screens) => screens,
        Err(e) => {
            debug!("Screen enumeration failed: {}", e);
            return None;
        }
    };

    let primary = screens
        .iter()
        .find(|s| s.display_info.is_primary)
        .or_else(|| screens.first())?;

    let info = &primary.display_info;
    debug!("Primary display {}x{}", info.width, info.height);
    Some(ScreenSize::new(info.width, info.height))
}
