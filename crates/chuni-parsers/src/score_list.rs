use scraper::{ElementRef, Html, Selector};
use strum::{Display, EnumString};

use models::{Difficulty, RawScoreRecord};

use crate::MalformedRecordError;

const SECTION: &str = "music box";

/// What to do with a `.musiclist_box` that lacks one of its required fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MalformedPolicy {
    /// Log the section and keep going.
    #[default]
    Skip,
    /// Fail the whole page on the first bad section.
    Abort,
}

struct SectionSelectors {
    title: Selector,
    score: Selector,
    diff: Selector,
    idx: Selector,
}

impl SectionSelectors {
    fn new() -> Self {
        Self {
            title: Selector::parse(".music_title").unwrap(),
            score: Selector::parse(".play_musicdata_highscore .text_b").unwrap(),
            diff: Selector::parse(r#"input[name="diff"]"#).unwrap(),
            idx: Selector::parse(r#"input[name="idx"]"#).unwrap(),
        }
    }
}

/// Parses every `.musiclist_box` of a rating detail page, one outcome per
/// section in document order.
pub fn parse_score_sections(html: &str) -> Vec<Result<RawScoreRecord, MalformedRecordError>> {
    let document = Html::parse_document(html);

    let box_selector = Selector::parse(".musiclist_box").unwrap();
    let selectors = SectionSelectors::new();

    document
        .select(&box_selector)
        .enumerate()
        .map(|(section, entry)| parse_section(section, &entry, &selectors))
        .collect()
}

fn parse_section(
    section: usize,
    entry: &ElementRef<'_>,
    selectors: &SectionSelectors,
) -> Result<RawScoreRecord, MalformedRecordError> {
    let title = entry
        .select(&selectors.title)
        .next()
        .map(|e| collect_text(&e).trim().to_string())
        .ok_or_else(|| MalformedRecordError::missing(SECTION, section, "title"))?;

    let score_text = entry
        .select(&selectors.score)
        .next()
        .map(|e| collect_text(&e))
        .ok_or_else(|| MalformedRecordError::missing(SECTION, section, "score"))?;
    let score = parse_grouped_score(&score_text)
        .ok_or_else(|| MalformedRecordError::invalid(SECTION, section, "score", &score_text))?;

    let diff_text = input_value(entry, &selectors.diff)
        .ok_or_else(|| MalformedRecordError::missing(SECTION, section, "diff"))?;
    let diff = diff_text
        .parse::<u8>()
        .ok()
        .and_then(Difficulty::from_u8)
        .ok_or_else(|| MalformedRecordError::invalid(SECTION, section, "diff", &diff_text))?;

    let song_id = input_value(entry, &selectors.idx)
        .ok_or_else(|| MalformedRecordError::missing(SECTION, section, "idx"))?;

    Ok(RawScoreRecord {
        title,
        score,
        diff: diff.as_u8(),
        song_id,
    })
}

/// Parses a rating detail page and folds malformed sections according to `policy`.
pub fn parse_scores_html(
    html: &str,
    policy: MalformedPolicy,
) -> Result<Vec<RawScoreRecord>, MalformedRecordError> {
    let mut records = Vec::new();
    for outcome in parse_score_sections(html) {
        match (outcome, policy) {
            (Ok(record), _) => records.push(record),
            (Err(e), MalformedPolicy::Abort) => return Err(e),
            (Err(e), MalformedPolicy::Skip) => {
                tracing::warn!("skipping section: {e}");
            }
        }
    }
    Ok(records)
}

fn collect_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join("")
}

fn input_value(entry: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    entry
        .select(selector)
        .next()
        .and_then(|e| e.value().attr("value"))
        .map(|s| s.trim().to_string())
}

/// "1,007,500" -> 1007500
fn parse_grouped_score(text: &str) -> Option<u32> {
    let digits = text.trim().replace(',', "");
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_score_strips_separators() {
        assert_eq!(parse_grouped_score("1,007,500"), Some(1_007_500));
        assert_eq!(parse_grouped_score(" 998,120\n"), Some(998_120));
        assert_eq!(parse_grouped_score("0"), Some(0));
        assert_eq!(parse_grouped_score(""), None);
        assert_eq!(parse_grouped_score("1.007.500"), None);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("skip".parse::<MalformedPolicy>().ok(), Some(MalformedPolicy::Skip));
        assert_eq!("ABORT".parse::<MalformedPolicy>().ok(), Some(MalformedPolicy::Abort));
        assert!("ignore".parse::<MalformedPolicy>().is_err());
        assert_eq!(MalformedPolicy::default(), MalformedPolicy::Skip);
        assert_eq!(MalformedPolicy::Abort.to_string(), "abort");
    }
}
