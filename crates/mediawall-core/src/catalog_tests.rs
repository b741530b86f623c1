use super::*;
use mediawall_config::PresetItemConfig;

fn config_items(kind: PresetItemKind, queries: &[&str]) -> PresetConfig {
    PresetConfig {
        items: queries
            .iter()
            .map(|q| PresetItemConfig {
                kind,
                query: q.to_string(),
            })
            .collect(),
    }
}

#[test]
fn test_builtin_names_in_order() {
    let catalog = PresetCatalog::builtin();
    assert_eq!(catalog.list_names(), vec!["default", "alternate", "christmas"]);
}

#[test]
fn test_every_listed_name_resolves_to_four_items() {
    let catalog = PresetCatalog::builtin();
    for name in catalog.list_names() {
        let preset = catalog.resolve(name).unwrap();
        assert_eq!(preset.items().len(), 4);
        assert_eq!(preset.name(), name);
    }
}

#[test]
fn test_unknown_name_not_found() {
    let catalog = PresetCatalog::builtin();
    for name in ["", "Default", "easter", "christmas "] {
        let err = catalog.resolve(name).unwrap_err();
        assert!(matches!(err, WallError::PresetNotFound(ref n) if n == name));
    }
}

#[test]
fn test_default_is_all_direct_urls() {
    let catalog = PresetCatalog::builtin();
    let preset = catalog.resolve("default").unwrap();
    assert!(preset.items().iter().all(|i| i.kind == ContentKind::DirectUrl));
    assert_eq!(preset.items()[0].query, "https://www.google.com");
}

#[test]
fn test_christmas_is_all_searchable() {
    let catalog = PresetCatalog::builtin();
    let preset = catalog.resolve("christmas").unwrap();
    assert!(preset.items().iter().all(|i| i.kind == ContentKind::SearchableMedia));
}

#[test]
fn test_preset_rejects_wrong_length() {
    let items = vec![ContentItem::searchable("Elf"); 3];
    let err = Preset::new("short", items).unwrap_err();
    assert!(matches!(err, WallError::InvalidPreset { .. }));
    assert!(err.to_string().contains("expected 4 items, found 3"));

    let items = vec![ContentItem::searchable("Elf"); 5];
    assert!(Preset::new("long", items).is_err());
}

#[test]
fn test_preset_rejects_bad_url() {
    let items = vec![
        ContentItem::direct_url("https://example.com"),
        ContentItem::direct_url("example"),
        ContentItem::direct_url("https://example.com"),
        ContentItem::direct_url("https://example.com"),
    ];
    let err = Preset::new("typo", items).unwrap_err();
    assert!(err.to_string().contains("item 1"));
}

#[test]
fn test_preset_rejects_empty_query() {
    let mut items = vec![ContentItem::searchable("Elf"); 4];
    items[2].query = "  ".to_string();
    assert!(Preset::new("blank", items).is_err());
}

#[test]
fn test_from_config_appends_and_replaces() {
    let mut presets = BTreeMap::new();
    presets.insert(
        "movies".to_string(),
        config_items(PresetItemKind::SearchableMedia, &["Heat", "Ronin", "Drive", "Thief"]),
    );
    presets.insert(
        "default".to_string(),
        config_items(
            PresetItemKind::DirectUrl,
            &[
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
                "https://example.com/d",
            ],
        ),
    );

    let catalog = PresetCatalog::from_config(&presets).unwrap();
    assert_eq!(
        catalog.list_names(),
        vec!["default", "alternate", "christmas", "movies"]
    );
    let default = catalog.resolve("default").unwrap();
    assert_eq!(default.items()[3].query, "https://example.com/d");
    let movies = catalog.resolve("movies").unwrap();
    assert_eq!(movies.items()[0].kind, ContentKind::SearchableMedia);
}

#[test]
fn test_from_config_rejects_invalid_preset() {
    let mut presets = BTreeMap::new();
    presets.insert(
        "broken".to_string(),
        config_items(PresetItemKind::SearchableMedia, &["one", "two"]),
    );
    let err = PresetCatalog::from_config(&presets).unwrap_err();
    assert!(matches!(err, WallError::InvalidPreset { ref name, .. } if name == "broken"));
}
