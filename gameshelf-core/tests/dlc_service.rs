use gameshelf_core::*;

fn context_with_base_game() -> CatalogContext {
    let mut ctx = CatalogContext::with_rules(ValidationRules::with_max_release_year(2025));
    ctx.game_service()
        .add(Game::new("The Witcher 3").with_year(2015))
        .unwrap();
    ctx
}

#[test]
fn add_links_to_existing_base_game() {
    let mut ctx = context_with_base_game();
    let stored = ctx
        .dlc_service()
        .add(Dlc::new(" Blood and Wine ", " the witcher 3 ").with_expansion(true))
        .unwrap();
    assert!(stored);

    let dlc = ctx.dlcs().find("blood and wine").unwrap();
    assert_eq!(dlc.info.title, "Blood and Wine");
    assert_eq!(dlc.base_game_title, "the witcher 3");
    assert!(dlc.expansion);

    let game = ctx.games().find("The Witcher 3").unwrap();
    assert_eq!(game.dlc_titles, vec!["Blood and Wine"]);
}

#[test]
fn add_with_unknown_base_is_stored_unlinked() {
    let mut ctx = context_with_base_game();
    assert!(ctx
        .dlc_service()
        .add(Dlc::new("Iceborne", "Monster Hunter World"))
        .unwrap());

    assert!(ctx.dlcs().exists("Iceborne"));
    assert!(ctx.games().find("The Witcher 3").unwrap().dlc_titles.is_empty());
}

#[test]
fn duplicate_dlc_does_not_link_twice() {
    let mut ctx = context_with_base_game();
    let mut dlcs = ctx.dlc_service();
    assert!(dlcs.add(Dlc::new("Hearts of Stone", "The Witcher 3")).unwrap());
    assert!(!dlcs.add(Dlc::new("HEARTS OF STONE", "The Witcher 3")).unwrap());

    assert_eq!(
        ctx.games().find("The Witcher 3").unwrap().dlc_titles,
        vec!["Hearts of Stone"]
    );
}

#[test]
fn add_validates_before_storing() {
    let mut ctx = context_with_base_game();
    let mut dlcs = ctx.dlc_service();

    assert_eq!(
        dlcs.add(Dlc::new("", "The Witcher 3")),
        Err(ValidationError::BlankTitle)
    );
    assert!(dlcs
        .add(Dlc::new("Too Late", "The Witcher 3").with_year(2026))
        .is_err());
    assert!(dlcs
        .add(Dlc::new("Paid Me", "The Witcher 3").with_price(-0.5))
        .is_err());
    assert!(dlcs.list().is_empty());
    assert!(ctx.games().find("The Witcher 3").unwrap().dlc_titles.is_empty());
}

#[test]
fn remove_detaches_from_base_and_libraries() {
    let mut ctx = context_with_base_game();
    ctx.dlc_service()
        .add(Dlc::new("Hearts of Stone", "The Witcher 3"))
        .unwrap();
    ctx.dlc_service()
        .add(Dlc::new("Blood and Wine", "The Witcher 3"))
        .unwrap();
    ctx.user_service()
        .add(User::new("Geralt", "geralt@gmail.com"))
        .unwrap();
    ctx.user_service()
        .acquire("geralt@gmail.com", MediaKind::Dlc, "Hearts of Stone");

    assert!(ctx.dlc_service().remove("hearts of stone"));
    assert!(!ctx.dlc_service().remove("Hearts of Stone"));

    assert_eq!(
        ctx.games().find("The Witcher 3").unwrap().dlc_titles,
        vec!["Blood and Wine"]
    );
    assert!(ctx
        .user_service()
        .find_library_media("geralt@gmail.com", "Hearts of Stone")
        .is_none());
}

#[test]
fn shared_edits_apply_to_dlcs() {
    let mut ctx = context_with_base_game();
    let mut dlcs = ctx.dlc_service();
    dlcs.add(Dlc::new("Hearts of Stone", "The Witcher 3")).unwrap();

    assert_eq!(dlcs.edit_year("Hearts of Stone", 2015), Ok(true));
    assert_eq!(dlcs.edit_price("Hearts of Stone", 9.99), Ok(true));
    assert!(dlcs.add_genre("Hearts of Stone", "RPG"));
    assert!(dlcs.add_platform("Hearts of Stone", "PC"));
    assert_eq!(dlcs.edit_price("Missing", 1.0), Ok(false));

    let dlc = dlcs.find("Hearts of Stone").unwrap();
    assert_eq!(dlc.info.release_year, 2015);
    assert_eq!(dlc.info.price, 9.99);
    assert_eq!(dlc.info.genres, vec!["RPG"]);
    assert_eq!(dlc.info.platforms, vec!["PC"]);
}

#[test]
fn dangling_lists_dlcs_without_base_game() {
    let mut ctx = context_with_base_game();
    ctx.dlc_service()
        .add(Dlc::new("Hearts of Stone", "The Witcher 3"))
        .unwrap();
    ctx.dlc_service()
        .add(Dlc::new("Orphan Pack", "Cancelled Game"))
        .unwrap();
    ctx.dlc_service().add(Dlc::new("Standalone", "")).unwrap();

    let dangling = ctx.dlc_service().dangling();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].info.title, "Orphan Pack");
}
