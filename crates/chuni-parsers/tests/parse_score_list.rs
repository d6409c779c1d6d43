use std::path::PathBuf;

use chuni_parsers::{parse_score_sections, parse_scores_html, MalformedPolicy};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

#[test]
fn parse_best_fixture_in_document_order() {
    let html = read_fixture("rating_detail_best.html");
    let records = parse_scores_html(&html, MalformedPolicy::Abort).unwrap();

    assert_eq!(records.len(), 3);
    let titles = records.iter().map(|r| r.title.as_str()).collect::<Vec<_>>();
    assert_eq!(titles, ["Garakuta Doll Play", "Blue Noise", "Aleph-0"]);

    assert_eq!(records[0].score, 1_007_500);
    assert_eq!(records[0].diff, 3);
    assert_eq!(records[0].song_id, "180");
    assert_eq!(records[1].score, 960_000);
    assert_eq!(records[2].score, 1_010_000);
    assert_eq!(records[2].diff, 4);
}

#[test]
fn synthetic_sections_round_trip() {
    let sections = (0..12u32)
        .map(|i| {
            format!(
                r#"<div class="musiclist_box">
                    <div class="music_title">Song {i}</div>
                    <div class="play_musicdata_highscore"><span class="text_b">1,00{i:01},000</span></div>
                    <input type="hidden" name="diff" value="{diff}">
                    <input type="hidden" name="idx" value="{i}">
                </div>"#,
                i = i % 10,
                diff = i % 5,
            )
        })
        .collect::<String>();
    let html = format!("<html><body>{sections}</body></html>");

    let records = parse_scores_html(&html, MalformedPolicy::Abort).unwrap();

    assert_eq!(records.len(), 12);
    for (n, record) in records.iter().enumerate() {
        let i = (n % 10) as u32;
        assert_eq!(record.title, format!("Song {i}"));
        assert_eq!(record.score, 1_000_000 + i * 1_000);
        assert_eq!(record.diff, (n % 5) as u8);
    }
}

#[test]
fn empty_page_yields_no_records() {
    let records = parse_scores_html("<html><body></body></html>", MalformedPolicy::Abort).unwrap();
    assert!(records.is_empty());
}

#[test]
fn malformed_section_is_reported_in_place() {
    let html = read_fixture("rating_detail_malformed.html");
    let outcomes = parse_score_sections(&html);

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_ok());
    let err = outcomes[1].as_ref().unwrap_err();
    assert_eq!(err.section, 1);
    assert_eq!(err.field, "score");
    assert!(outcomes[2].is_ok());
}

#[test]
fn skip_policy_drops_only_the_malformed_section() {
    let html = read_fixture("rating_detail_malformed.html");
    let records = parse_scores_html(&html, MalformedPolicy::Skip).unwrap();

    let titles = records.iter().map(|r| r.title.as_str()).collect::<Vec<_>>();
    assert_eq!(titles, ["Garakuta Doll Play", "Blue Noise"]);
}

#[test]
fn abort_policy_fails_the_page() {
    let html = read_fixture("rating_detail_malformed.html");
    let err = parse_scores_html(&html, MalformedPolicy::Abort).unwrap_err();
    assert_eq!(err.section, 1);
    assert!(err.to_string().contains("score"));
}

#[test]
fn out_of_range_difficulty_is_malformed() {
    let html = r#"<div class="musiclist_box">
        <div class="music_title">X</div>
        <div class="play_musicdata_highscore"><span class="text_b">1,000,000</span></div>
        <input type="hidden" name="diff" value="7">
        <input type="hidden" name="idx" value="1">
    </div>"#;
    let err = parse_scores_html(html, MalformedPolicy::Abort).unwrap_err();
    assert_eq!(err.field, "diff");
}
