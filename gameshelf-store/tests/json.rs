use gameshelf_core::*;
use gameshelf_store::{JsonStore, SnapshotStore};

fn sample_snapshot() -> Snapshot {
    let mut ctx = CatalogContext::with_rules(ValidationRules::with_max_release_year(2025));
    ctx.game_service()
        .add(Game::new("Hades").with_year(2020).with_price(24.99).with_genre("Roguelike"))
        .unwrap();
    ctx.dlc_service()
        .add(Dlc::new("Hades Soundtrack Pack", "Hades").with_price(4.99))
        .unwrap();
    ctx.user_service()
        .add(User::new("Zagreus", "zag@gmail.com"))
        .unwrap();
    ctx.user_service()
        .acquire("zag@gmail.com", MediaKind::Game, "Hades");
    ctx.user_service()
        .acquire("zag@gmail.com", MediaKind::Dlc, "Hades Soundtrack Pack");
    ctx.snapshot()
}

#[test]
fn encode_tags_library_media_by_type() {
    let contents = JsonStore.encode(&sample_snapshot()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&contents).unwrap();

    assert_eq!(doc["games"][0]["title"], "Hades");
    assert_eq!(doc["games"][0]["dlc_titles"][0], "Hades Soundtrack Pack");
    assert_eq!(doc["dlcs"][0]["base_game_title"], "Hades");
    assert_eq!(doc["users"][0]["library"][0]["type"], "Game");
    assert_eq!(doc["users"][0]["library"][1]["type"], "DLC");
}

#[test]
fn decode_restores_encoded_snapshot() {
    let snapshot = sample_snapshot();
    let contents = JsonStore.encode(&snapshot).unwrap();
    assert_eq!(JsonStore.decode(&contents).unwrap(), snapshot);
}

#[test]
fn malformed_elements_are_skipped() {
    let contents = r#"{
        "games": [
            { "title": "Hades", "release_year": 2020, "price": 24.99 },
            { "title": 42 },
            { "release_year": 1999 },
            { "title": "HADES" }
        ],
        "dlcs": "not a list",
        "users": [
            {
                "name": "Zagreus",
                "email": "zag@gmail.com",
                "library": [
                    { "type": "Game", "title": "Hades", "rating": 9.0 },
                    { "type": "Soundtrack", "title": "Good Riddance" },
                    { "title": "No Type" }
                ]
            },
            { "name": "Nameless" }
        ]
    }"#;
    let snapshot = JsonStore.decode(contents).unwrap();

    assert_eq!(snapshot.games.len(), 1);
    assert_eq!(snapshot.games[0].info.price, 24.99);
    assert!(snapshot.dlcs.is_empty());
    assert_eq!(snapshot.users.len(), 1);
    assert_eq!(snapshot.users[0].library.len(), 1);
    assert_eq!(snapshot.users[0].library[0].info().rating, 9.0);
}

#[test]
fn elements_that_break_field_rules_are_skipped() {
    let contents = r#"{
        "games": [
            { "title": "Bad", "release_year": 1, "price": -1, "rating": 99 },
            { "title": "  Hades ", "release_year": 2020, "genres": [" Roguelike ", " "] }
        ],
        "dlcs": [
            { "title": "Tomorrow's Pack", "base_game_title": "Hades", "release_year": 3000 }
        ],
        "users": [
            { "name": "Zagreus", "email": "zag@example.com" },
            {
                "name": "Megaera",
                "email": "meg@gmail.com",
                "library": [
                    { "type": "Game", "title": "Hades", "rating": 10.5 },
                    { "type": "DLC", "title": "Extras", "price": -3 }
                ]
            }
        ]
    }"#;
    let snapshot = JsonStore.decode(contents).unwrap();

    assert_eq!(snapshot.games.len(), 1);
    assert_eq!(snapshot.games[0].info.title, "Hades");
    assert_eq!(snapshot.games[0].info.genres, vec!["Roguelike"]);
    assert!(snapshot.dlcs.is_empty());
    assert_eq!(snapshot.users.len(), 1);
    assert_eq!(snapshot.users[0].email, "meg@gmail.com");
    assert!(snapshot.users[0].library.is_empty());
}

#[test]
fn missing_sections_default_to_empty() {
    assert!(JsonStore.decode("{}").unwrap().is_empty());
}

#[test]
fn non_object_document_is_an_error() {
    assert!(JsonStore.decode("[]").is_err());
    assert!(JsonStore.decode("not json").is_err());
}
