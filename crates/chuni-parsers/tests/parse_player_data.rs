use std::path::PathBuf;

use chuni_parsers::{decode_rating_icons, parse_player_profile_html, ProfileLookup};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn parse_home_fixture() {
    let html = std::fs::read_to_string(fixture_path("home.html")).unwrap();
    let ProfileLookup::Found(summary) = parse_player_profile_html(&html).unwrap() else {
        panic!("profile should be present");
    };

    assert_eq!(summary.name, "ＰＬＡＹＥＲ");
    assert_eq!(summary.level_label, "Lv.52");
    assert_eq!(summary.team_name, "CRYSTAL");
    assert_eq!(summary.last_play_date, "2024/05/01 21:34");
    assert_eq!(summary.title, "Welcome to CHUNITHM");
    assert_eq!(summary.overpower, "31234.56 (12.34%)");
    assert_eq!(
        summary.title_plate_url,
        "https://chunithm-net-eng.com/mobile/images/honor_bg_gold.png"
    );
    assert!(summary.character_icon_url.ends_with("chara0_0.png"));
    assert_eq!(summary.rating_icons.len(), 5);
    assert_eq!(decode_rating_icons(&summary.rating_icons), Some(16.52));
    assert_eq!(summary.player_rating, Some(16.52));
}

#[test]
fn missing_team_name_defaults_to_empty() {
    let html = std::fs::read_to_string(fixture_path("home.html")).unwrap();
    let html = html.replace(r#"<div class="player_team_name">CRYSTAL</div>"#, "");

    let lookup = parse_player_profile_html(&html).unwrap();
    let summaries = lookup.into_vec();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].team_name, "");
}

#[test]
fn absent_profile_is_not_found_rather_than_error() {
    let html = std::fs::read_to_string(fixture_path("home_logged_out.html")).unwrap();
    let lookup = parse_player_profile_html(&html).unwrap();

    assert_eq!(lookup, ProfileLookup::NotFound);
    assert!(lookup.into_vec().is_empty());
}

#[test]
fn undecodable_rating_icons_leave_player_rating_empty() {
    let html = std::fs::read_to_string(fixture_path("home.html")).unwrap();
    let html = html.replace("rating_rainbow_comma.png", "rating_rainbow_star.png");

    let ProfileLookup::Found(summary) = parse_player_profile_html(&html).unwrap() else {
        panic!("profile should be present");
    };
    assert_eq!(summary.rating_icons.len(), 5);
    assert_eq!(summary.player_rating, None);
}

#[test]
fn present_profile_missing_required_field_is_malformed() {
    let html = std::fs::read_to_string(fixture_path("home.html")).unwrap();
    let html = html.replace("player_overpower_text", "player_overpower_gone");

    let err = parse_player_profile_html(&html).unwrap_err();
    assert_eq!(err.field, "overpower");
}
