//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, PresetItemKind};

/// Number of windows on the wall; every preset must fill all of them.
pub const WALL_SLOTS: usize = 4;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_screen(config, &mut result);
        Self::validate_timing(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_search_app(config, &mut result);
        Self::validate_presets(config, &mut result);

        Ok(result)
    }

    fn validate_screen(config: &Config, result: &mut ValidationResult) {
        if config.screen.width == Some(0) || config.screen.height == Some(0) {
            result.add_error(ValidationError::new(
                "screen",
                "Screen width and height must be greater than 0",
            ));
        }

        if config.screen.width.is_some() != config.screen.height.is_some() {
            result.add_warning(ValidationWarning::new(
                "screen",
                "Only one screen dimension is set, the other will be detected",
            ));
        }
    }

    fn validate_timing(config: &Config, result: &mut ValidationResult) {
        let timing = &config.timing;
        let bounded = [
            ("timing.result_timeout_ms", timing.result_timeout_ms),
            ("timing.element_timeout_ms", timing.element_timeout_ms),
            ("timing.poll_interval_ms", timing.poll_interval_ms),
            ("timing.launch_timeout_ms", timing.launch_timeout_ms),
        ];
        for (path, value) in bounded {
            if value == 0 {
                result.add_error(ValidationError::new(path, "must be greater than 0"));
            }
        }

        if timing.poll_interval_ms > timing.result_timeout_ms {
            result.add_warning(ValidationWarning::new(
                "timing.poll_interval_ms",
                "Poll interval exceeds the result timeout; waits will poll at most once",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let base = config.browser.base_debug_port;
        if base == 0 || base.checked_add((WALL_SLOTS - 1) as u16).is_none() {
            result.add_error(ValidationError::new(
                "browser.base_debug_port",
                format!("Port range {}..{} is not usable", base, base as u32 + WALL_SLOTS as u32),
            ));
        }

        if let Some(ref path) = config.browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {:?}", path),
                ));
            }
        }

        if let Some(source) = config.browser.source_profile_dir() {
            if !source.is_dir() {
                result.add_warning(ValidationWarning::new(
                    "browser.source_profile",
                    format!("Source profile does not exist, windows start signed out: {:?}", source),
                ));
            } else if !source.join("Default").is_dir() || !source.join("Local State").is_file() {
                result.add_warning(ValidationWarning::new(
                    "browser.source_profile",
                    format!(
                        "{:?} is not a Chrome user-data directory (expected `Default/` and `Local State`)",
                        source
                    ),
                ));
            }
        }
    }

    fn validate_search_app(config: &Config, result: &mut ValidationResult) {
        let app = &config.search_app;
        for (path, value) in [
            ("search_app.home_url", &app.home_url),
            ("search_app.entry_url", &app.entry_url),
        ] {
            if url::Url::parse(value).is_err() {
                result.add_error(ValidationError::new(path, format!("Invalid URL: {}", value)));
            }
        }

        for (path, value) in [
            ("search_app.search_input_selector", &app.search_input_selector),
            ("search_app.result_selector", &app.result_selector),
            ("search_app.play_selector", &app.play_selector),
        ] {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Selector cannot be empty"));
            }
        }
    }

    fn validate_presets(config: &Config, result: &mut ValidationResult) {
        for (name, preset) in &config.presets {
            let path = format!("presets.{}", name);

            if name.trim().is_empty() {
                result.add_error(ValidationError::new(&path, "Preset name cannot be empty"));
            }

            if preset.items.len() != WALL_SLOTS {
                result.add_error(ValidationError::new(
                    &path,
                    format!(
                        "Preset must have exactly {} items, found {}",
                        WALL_SLOTS,
                        preset.items.len()
                    ),
                ));
            }

            for (i, item) in preset.items.iter().enumerate() {
                let item_path = format!("{}.items[{}]", path, i);
                if item.query.trim().is_empty() {
                    result.add_error(ValidationError::new(&item_path, "Query cannot be empty"));
                } else if item.kind == PresetItemKind::DirectUrl
                    && url::Url::parse(&item.query).is_err()
                {
                    result.add_error(ValidationError::new(
                        &item_path,
                        format!("Direct URL item is not a valid URL: {}", item.query),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
