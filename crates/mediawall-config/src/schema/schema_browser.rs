//! Browser launch and streaming app configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::mediawall_home;

/// Browser process configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Explicit Chrome/Chromium executable. Detected when unset.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    /// DevTools port of slot 0; slot `i` listens on `base_debug_port + i`.
    #[serde(default = "default_base_debug_port")]
    pub base_debug_port: u16,

    /// Root for per-slot profile directories.
    #[serde(default)]
    pub profile_root: Option<String>,

    /// Chrome user-data directory to copy cookies and storage from.
    ///
    /// This is the directory holding `Local State` and `Default/`
    /// (e.g. `~/.config/google-chrome`), not the `Default` profile itself.
    #[serde(default)]
    pub source_profile: Option<String>,

    #[serde(default)]
    pub headless: bool,

    /// Additional command-line switches passed to every window.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_base_debug_port() -> u16 {
    9310
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            base_debug_port: default_base_debug_port(),
            profile_root: None,
            source_profile: None,
            headless: false,
            extra_args: Vec::new(),
        }
    }
}

impl BrowserConfig {
    /// Get the profile root, defaulting to `~/.mediawall/profiles`.
    pub fn profile_root_dir(&self) -> PathBuf {
        match &self.profile_root {
            Some(root) => PathBuf::from(shellexpand::tilde(root).as_ref()),
            None => mediawall_home().join("profiles"),
        }
    }

    /// Get the expanded source profile path, if configured.
    pub fn source_profile_dir(&self) -> Option<PathBuf> {
        self.source_profile
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
    }

    /// DevTools port for a slot.
    pub fn debug_port(&self, slot: usize) -> u16 {
        self.base_debug_port.saturating_add(slot as u16)
    }
}

/// The streaming web app driven by search-and-select automation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAppConfig {
    /// Landing page loaded when a window is first created.
    #[serde(default = "default_home_url")]
    pub home_url: String,

    /// Page the search protocol starts from.
    #[serde(default = "default_entry_url")]
    pub entry_url: String,

    #[serde(default = "default_search_input_selector")]
    pub search_input_selector: String,

    /// Matches result rows; the first match is used.
    #[serde(default = "default_result_selector")]
    pub result_selector: String,

    /// Play control, looked up only inside the first result row.
    #[serde(default = "default_play_selector")]
    pub play_selector: String,
}

fn default_home_url() -> String {
    "https://app.plex.tv/desktop/#!/".to_string()
}

fn default_entry_url() -> String {
    "https://app.plex.tv/desktop/#!/".to_string()
}

fn default_search_input_selector() -> String {
    "#quickSearchInput".to_string()
}

fn default_result_selector() -> String {
    "[data-testid=\"quickSearchResult\"]".to_string()
}

fn default_play_selector() -> String {
    "button[data-testid=\"playButton\"], button[aria-label=\"Play\"]".to_string()
}

impl Default for SearchAppConfig {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
            entry_url: default_entry_url(),
            search_input_selector: default_search_input_selector(),
            result_selector: default_result_selector(),
            play_selector: default_play_selector(),
        }
    }
}
