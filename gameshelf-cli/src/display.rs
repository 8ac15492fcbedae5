//! Text rendering for catalog entities, shared by the one-shot commands and the shell.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_core::media::{display_list, display_price, display_year};
use gameshelf_core::{Dlc, Game, Media, MediaInfo, User};

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn title_line(info: &MediaInfo) -> String {
    format!(
        "{} ({})",
        info.title.if_supports_color(Stdout, |t| t.bold()),
        display_year(info.release_year),
    )
}

fn info_lines(info: &MediaInfo) -> Vec<String> {
    vec![
        format!("  Year:      {}", display_year(info.release_year)),
        format!("  Price:     {}", display_price(info.price)),
        format!("  Rating:    {:.1}", info.rating),
        format!("  Genres:    {}", display_list(&info.genres)),
        format!("  Platforms: {}", display_list(&info.platforms)),
    ]
}

pub(crate) fn game_summary(game: &Game) -> String {
    format!("{} - {}", title_line(&game.info), display_price(game.info.price))
}

pub(crate) fn game_details(game: &Game) -> Vec<String> {
    let mut lines = vec![title_line(&game.info)];
    lines.extend(info_lines(&game.info));
    lines.push(format!(
        "  Developer: {}",
        if game.developer.is_empty() { "N/A" } else { game.developer.as_str() }
    ));
    lines.push(format!("  Multiplayer: {}", yes_no(game.multiplayer)));
    lines.push(format!("  DLCs:      {}", display_list(&game.dlc_titles)));
    lines
}

pub(crate) fn dlc_summary(dlc: &Dlc) -> String {
    format!(
        "{} - {} (for {})",
        title_line(&dlc.info),
        display_price(dlc.info.price),
        base_title(dlc),
    )
}

pub(crate) fn dlc_details(dlc: &Dlc) -> Vec<String> {
    let mut lines = vec![title_line(&dlc.info)];
    lines.extend(info_lines(&dlc.info));
    lines.push(format!("  Base game: {}", base_title(dlc)));
    lines.push(format!("  Expansion: {}", yes_no(dlc.expansion)));
    lines
}

fn base_title(dlc: &Dlc) -> &str {
    if dlc.base_game_title.is_empty() {
        "N/A"
    } else {
        &dlc.base_game_title
    }
}

pub(crate) fn user_summary(user: &User) -> String {
    format!(
        "{} <{}> - {} owned",
        user.name.if_supports_color(Stdout, |t| t.bold()),
        user.email.if_supports_color(Stdout, |t| t.cyan()),
        user.library.len(),
    )
}

pub(crate) fn user_details(user: &User) -> Vec<String> {
    let mut lines = vec![
        format!("{}", user.name.if_supports_color(Stdout, |t| t.bold())),
        format!("  Email:   {}", user.email),
    ];
    if user.library.is_empty() {
        lines.push("  Library: empty".to_string());
    } else {
        lines.push("  Library:".to_string());
        lines.extend(user.library.iter().map(|m| format!("    {}", media_summary(m))));
    }
    lines
}

pub(crate) fn media_summary(media: &Media) -> String {
    format!(
        "[{}] {} - rating {:.1}",
        media.kind().if_supports_color(Stdout, |t| t.dimmed()),
        title_line(media.info()),
        media.info().rating,
    )
}

pub(crate) fn media_details(media: &Media) -> Vec<String> {
    match media {
        Media::Game(game) => game_details(game),
        Media::Dlc(dlc) => dlc_details(dlc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_details_fill_blanks() {
        let lines = game_details(&Game::new("Tetris"));
        assert!(lines[0].contains("Tetris"));
        assert!(lines.contains(&"  Year:      N/A".to_string()));
        assert!(lines.contains(&"  Price:     Free".to_string()));
        assert!(lines.contains(&"  Developer: N/A".to_string()));
        assert!(lines.contains(&"  DLCs:      N/A".to_string()));
    }

    #[test]
    fn test_dlc_summary_names_base() {
        let dlc = Dlc::new("Perpetual Testing", "Portal 2").with_price(4.99);
        let summary = dlc_summary(&dlc);
        assert!(summary.contains("$ 4.99"));
        assert!(summary.ends_with("(for Portal 2)"));
    }

    #[test]
    fn test_user_details_lists_library() {
        let mut user = User::new("Ada", "ada@gmail.com");
        assert!(user_details(&user).contains(&"  Library: empty".to_string()));

        user.library.push(Game::new("Portal 2").with_rating(7.5).into());
        let lines = user_details(&user);
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains("rating 7.5"));
    }
}
