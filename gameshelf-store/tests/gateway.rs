use std::fs;

use gameshelf_core::*;
use gameshelf_store::{Format, StoreError, load_into, save_from};
use tempfile::TempDir;

fn populated_context() -> CatalogContext {
    let mut ctx = CatalogContext::with_rules(ValidationRules::with_max_release_year(2025));
    ctx.game_service()
        .add(Game::new("Portal 2").with_year(2011).with_price(9.99))
        .unwrap();
    ctx.dlc_service()
        .add(Dlc::new("Perpetual Testing", "Portal 2"))
        .unwrap();
    ctx.user_service()
        .add(User::new("Chell", "chell@gmail.com"))
        .unwrap();
    ctx.user_service()
        .acquire("chell@gmail.com", MediaKind::Game, "Portal 2");
    ctx
}

#[test]
fn missing_file_leaves_context_empty() {
    let tmp = TempDir::new().unwrap();
    let mut ctx = CatalogContext::new();

    let loaded = load_into(&mut ctx, &tmp.path().join("absent.txt"), Format::Text).unwrap();
    assert!(!loaded);
    assert!(ctx.is_empty());
}

#[test]
fn save_then_load_in_both_formats() {
    let tmp = TempDir::new().unwrap();
    let ctx = populated_context();

    for (name, format) in [("shelf.txt", Format::Text), ("shelf.json", Format::Json)] {
        let path = tmp.path().join(name);
        save_from(&ctx, &path, format).unwrap();

        let mut restored = CatalogContext::new();
        assert!(load_into(&mut restored, &path, format).unwrap());
        assert_eq!(restored.snapshot(), ctx.snapshot(), "format {format}");
    }
}

#[test]
fn save_replaces_previous_contents() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data").join("shelf.txt");
    let mut ctx = populated_context();

    save_from(&ctx, &path, Format::Text).unwrap();
    ctx.game_service().remove("Portal 2");
    save_from(&ctx, &path, Format::Text).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("GAME;Portal 2"));
    assert!(contents.contains("DLC;Perpetual Testing"));
    assert!(!tmp.path().join("data").join("shelf.txt.tmp").exists());
}

#[test]
fn unreadable_file_is_an_error_and_context_is_untouched() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("shelf.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let mut ctx = CatalogContext::new();
    let result = load_into(&mut ctx, &path, Format::Json);
    assert!(matches!(result, Err(StoreError::Malformed(_))));
    assert!(ctx.is_empty());
}

#[test]
fn loaded_dlc_links_survive() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("shelf.txt");
    save_from(&populated_context(), &path, Format::Text).unwrap();

    let mut ctx = CatalogContext::new();
    load_into(&mut ctx, &path, Format::Text).unwrap();

    let portal = ctx.games().find("portal 2").unwrap();
    assert_eq!(portal.dlc_titles, vec!["Perpetual Testing"]);
    assert!(ctx.dlc_service().dangling().is_empty());
}
