//! Wall layout, timing and preset configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Window-chrome compensation applied by the geometry planner.
///
/// These values are tuned for one desktop environment's invisible window
/// borders; adjust them when windows leave gaps or overlap too much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Expansion applied to edges on the outer screen boundary.
    #[serde(default = "default_outer_margin")]
    pub outer_margin: u32,

    /// Expansion applied to edges on an inner seam between windows.
    #[serde(default = "default_seam_margin")]
    pub seam_margin: u32,

    /// Extra negative shift for left/top edges on the screen boundary.
    #[serde(default = "default_border_offset")]
    pub border_offset: u32,
}

fn default_outer_margin() -> u32 {
    8
}

fn default_seam_margin() -> u32 {
    2
}

fn default_border_offset() -> u32 {
    7
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            outer_margin: default_outer_margin(),
            seam_margin: default_seam_margin(),
            border_offset: default_border_offset(),
        }
    }
}

/// Settle delays and bounded waits, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Pause after resetting a window to about:blank.
    #[serde(default = "default_blank_settle_ms")]
    pub blank_settle_ms: u64,

    /// Pause for the streaming app shell to boot.
    #[serde(default = "default_app_boot_ms")]
    pub app_boot_ms: u64,

    /// Pause for search results to render after typing.
    #[serde(default = "default_results_settle_ms")]
    pub results_settle_ms: u64,

    /// Bound on waiting for the first search result to become clickable.
    #[serde(default = "default_result_timeout_ms")]
    pub result_timeout_ms: u64,

    /// Bound on waiting for other elements (search input).
    #[serde(default = "default_element_timeout_ms")]
    pub element_timeout_ms: u64,

    /// Poll interval for condition waits.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Bound on a browser process exposing its DevTools endpoint.
    #[serde(default = "default_launch_timeout_ms")]
    pub launch_timeout_ms: u64,

    /// Pause between consecutive window launches.
    #[serde(default = "default_launch_stagger_ms")]
    pub launch_stagger_ms: u64,
}

fn default_blank_settle_ms() -> u64 {
    500
}

fn default_app_boot_ms() -> u64 {
    5_000
}

fn default_results_settle_ms() -> u64 {
    3_000
}

fn default_result_timeout_ms() -> u64 {
    10_000
}

fn default_element_timeout_ms() -> u64 {
    10_000
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_launch_timeout_ms() -> u64 {
    15_000
}

fn default_launch_stagger_ms() -> u64 {
    1_000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            blank_settle_ms: default_blank_settle_ms(),
            app_boot_ms: default_app_boot_ms(),
            results_settle_ms: default_results_settle_ms(),
            result_timeout_ms: default_result_timeout_ms(),
            element_timeout_ms: default_element_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            launch_timeout_ms: default_launch_timeout_ms(),
            launch_stagger_ms: default_launch_stagger_ms(),
        }
    }
}

impl TimingConfig {
    /// Timings with every delay collapsed to a few milliseconds.
    #[cfg(any(test, feature = "test-util"))]
    pub fn immediate() -> Self {
        Self {
            blank_settle_ms: 0,
            app_boot_ms: 0,
            results_settle_ms: 0,
            result_timeout_ms: 50,
            element_timeout_ms: 50,
            poll_interval_ms: 5,
            launch_timeout_ms: 50,
            launch_stagger_ms: 0,
        }
    }

    pub fn blank_settle(&self) -> Duration {
        Duration::from_millis(self.blank_settle_ms)
    }

    pub fn app_boot(&self) -> Duration {
        Duration::from_millis(self.app_boot_ms)
    }

    pub fn results_settle(&self) -> Duration {
        Duration::from_millis(self.results_settle_ms)
    }

    pub fn result_timeout(&self) -> Duration {
        Duration::from_millis(self.result_timeout_ms)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn launch_timeout(&self) -> Duration {
        Duration::from_millis(self.launch_timeout_ms)
    }

    pub fn launch_stagger(&self) -> Duration {
        Duration::from_millis(self.launch_stagger_ms)
    }
}

/// How a preset item reaches its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetItemKind {
    DirectUrl,
    SearchableMedia,
}

/// One entry of a configured preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetItemConfig {
    pub kind: PresetItemKind,
    pub query: String,
}

/// A configured preset. Must hold exactly four items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetConfig {
    #[serde(default)]
    pub items: Vec<PresetItemConfig>,
}
