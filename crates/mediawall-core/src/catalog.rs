//! Preset catalog: named playlists of exactly four content items.

use std::collections::BTreeMap;

use mediawall_config::{PresetConfig, PresetItemKind, WALL_SLOTS};
use serde::{Deserialize, Serialize};

use crate::error::WallError;

/// How a window reaches its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Load the query as a URL.
    DirectUrl,
    /// Search for the query inside the streaming app and select the first hit.
    SearchableMedia,
}

impl From<PresetItemKind> for ContentKind {
    fn from(kind: PresetItemKind) -> Self {
        match kind {
            PresetItemKind::DirectUrl => ContentKind::DirectUrl,
            PresetItemKind::SearchableMedia => ContentKind::SearchableMedia,
        }
    }
}

/// One window's worth of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub query: String,
}

impl ContentItem {
    pub fn direct_url(url: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::DirectUrl,
            query: url.into(),
        }
    }

    pub fn searchable(query: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::SearchableMedia,
            query: query.into(),
        }
    }
}

/// A named, ordered set of exactly [`WALL_SLOTS`] content items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    name: String,
    items: [ContentItem; WALL_SLOTS],
}

impl Preset {
    /// Build a preset, rejecting anything that does not fill every slot.
    pub fn new(name: impl Into<String>, items: Vec<ContentItem>) -> Result<Self, WallError> {
        let name = name.into();
        let invalid = |reason: String| WallError::InvalidPreset {
            name: name.clone(),
            reason,
        };

        if name.trim().is_empty() {
            return Err(invalid("name cannot be empty".to_string()));
        }

        for (slot, item) in items.iter().enumerate() {
            if item.query.trim().is_empty() {
                return Err(invalid(format!("item {} has an empty query", slot)));
            }
            if item.kind == ContentKind::DirectUrl && url::Url::parse(&item.query).is_err() {
                return Err(invalid(format!("item {} is not a valid URL: {}", slot, item.query)));
            }
        }

        let count = items.len();
        let items: [ContentItem; WALL_SLOTS] = items.try_into().map_err(|_| {
            invalid(format!("expected {} items, found {}", WALL_SLOTS, count))
        })?;

        Ok(Self { name, items })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[ContentItem; WALL_SLOTS] {
        &self.items
    }

    pub fn item(&self, slot: usize) -> Option<&ContentItem> {
        self.items.get(slot)
    }
}

/// Static lookup from preset name to preset.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in presets.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for preset in builtin_presets() {
            catalog.insert(preset);
        }
        catalog
    }

    /// Built-in presets followed by configured ones.
    ///
    /// A configured preset with a built-in name replaces it in place.
    pub fn from_config(presets: &BTreeMap<String, PresetConfig>) -> Result<Self, WallError> {
        let mut catalog = Self::builtin();
        for (name, config) in presets {
            let items = config
                .items
                .iter()
                .map(|item| ContentItem {
                    kind: item.kind.into(),
                    query: item.query.clone(),
                })
                .collect();
            catalog.insert(Preset::new(name.clone(), items)?);
        }
        Ok(catalog)
    }

    /// Add a preset, replacing any preset with the same name.
    pub fn insert(&mut self, preset: Preset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    /// Look up a preset by name.
    pub fn resolve(&self, name: &str) -> Result<&Preset, WallError> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| WallError::PresetNotFound(name.to_string()))
    }

    /// Preset names in catalog order.
    pub fn list_names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

fn builtin_presets() -> Vec<Preset> {
    let definitions: [(&str, [ContentItem; WALL_SLOTS]); 3] = [
        (
            "default",
            [
                ContentItem::direct_url("https://www.google.com"),
                ContentItem::direct_url("https://www.youtube.com"),
                ContentItem::direct_url("https://www.github.com"),
                ContentItem::direct_url("https://www.stackoverflow.com"),
            ],
        ),
        (
            "alternate",
            [
                ContentItem::direct_url("https://www.reddit.com"),
                ContentItem::direct_url("https://www.twitter.com"),
                ContentItem::direct_url("https://www.linkedin.com"),
                ContentItem::direct_url("https://www.netflix.com"),
            ],
        ),
        (
            "christmas",
            [
                ContentItem::searchable("Home Alone"),
                ContentItem::searchable("Elf"),
                ContentItem::searchable("The Polar Express"),
                ContentItem::searchable("A Christmas Story"),
            ],
        ),
    ];

    definitions
        .into_iter()
        .map(|(name, items)| Preset {
            name: name.to_string(),
            items,
        })
        .collect()
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
