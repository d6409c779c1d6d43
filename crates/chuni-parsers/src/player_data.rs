use scraper::{ElementRef, Html, Selector};

use models::PlayerSummary;

use crate::MalformedRecordError;

const SECTION: &str = "player profile";

/// Outcome of looking for `.box_playerprofile` on the home page.
///
/// `NotFound` is not an error: the caller decides whether a report without a
/// profile is still worth producing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLookup {
    Found(PlayerSummary),
    NotFound,
}

impl ProfileLookup {
    /// Zero or one summaries, the shape the renderer expects.
    pub fn into_vec(self) -> Vec<PlayerSummary> {
        match self {
            Self::Found(summary) => vec![summary],
            Self::NotFound => Vec::new(),
        }
    }
}

pub fn parse_player_profile_html(html: &str) -> Result<ProfileLookup, MalformedRecordError> {
    let document = Html::parse_document(html);

    let profile_selector = Selector::parse(".box_playerprofile").unwrap();
    let Some(profile) = document.select(&profile_selector).next() else {
        return Ok(ProfileLookup::NotFound);
    };

    let rating_icon_selector = Selector::parse(".player_rating_num_block img").unwrap();
    let chara_selector = Selector::parse(".player_chara img").unwrap();
    let plate_selector = Selector::parse(".player_honor_short").unwrap();

    let name = required_text(&profile, ".player_name_in", "name")?;
    let level_label = required_text(&profile, ".player_lv", "level")?;
    let rating_icons = profile
        .select(&rating_icon_selector)
        .filter_map(|img| img.value().attr("src"))
        .map(|src| src.to_string())
        .collect::<Vec<_>>();
    let player_rating = decode_rating_icons(&rating_icons);
    if player_rating.is_none() {
        tracing::warn!("rating icons did not decode: {:?}", rating_icons);
    }
    let team_name = optional_text(&profile, ".player_team_name").unwrap_or_default();
    let last_play_date = required_text(&profile, ".player_lastplaydate_text", "last play date")?;
    let title = required_text(&profile, ".player_honor_text", "title")?;
    let character_icon_url = profile
        .select(&chara_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| src.to_string())
        .ok_or_else(|| MalformedRecordError::missing(SECTION, 0, "character icon"))?;
    let overpower = required_text(&profile, ".player_overpower_text", "overpower")?;

    let plate_style = profile
        .select(&plate_selector)
        .next()
        .map(|e| e.value().attr("style").unwrap_or_default().to_string())
        .ok_or_else(|| MalformedRecordError::missing(SECTION, 0, "title plate"))?;
    let title_plate_url = background_image_url(&plate_style)
        .ok_or_else(|| MalformedRecordError::invalid(SECTION, 0, "title plate", &plate_style))?;

    Ok(ProfileLookup::Found(PlayerSummary {
        name,
        level_label,
        rating_icons,
        player_rating,
        team_name,
        last_play_date,
        title,
        title_plate_url,
        character_icon_url,
        overpower,
    }))
}

/// Reads the player rating spelled out by the digit icons, e.g.
/// `rating_rainbow_1.png, rating_rainbow_6.png, rating_rainbow_comma.png, ...`.
pub fn decode_rating_icons(icons: &[String]) -> Option<f64> {
    if icons.is_empty() {
        return None;
    }
    let mut text = String::with_capacity(icons.len());
    for src in icons {
        let file = src.rsplit('/').next()?;
        let file = file.split('?').next().unwrap_or(file);
        let stem = file.strip_suffix(".png")?;
        match stem.rsplit('_').next()? {
            "comma" => text.push('.'),
            digit if digit.len() == 1 && digit.chars().all(|c| c.is_ascii_digit()) => {
                text.push_str(digit)
            }
            _ => return None,
        }
    }
    text.parse::<f64>().ok()
}

fn required_text(
    profile: &ElementRef<'_>,
    selector: &str,
    field: &'static str,
) -> Result<String, MalformedRecordError> {
    optional_text(profile, selector).ok_or_else(|| MalformedRecordError::missing(SECTION, 0, field))
}

fn optional_text(profile: &ElementRef<'_>, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    profile
        .select(&selector)
        .next()
        .map(|e| e.text().collect::<Vec<_>>().join("").trim().to_string())
}

/// `background-image: url("https://...")` -> `https://...`
fn background_image_url(style: &str) -> Option<String> {
    let value = style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .find(|(prop, _)| prop.trim().eq_ignore_ascii_case("background-image"))
        .map(|(_, value)| value.trim())?;
    let inner = value.strip_prefix("url(")?.strip_suffix(')')?.trim();
    let url = inner.trim_matches(|c| c == '"' || c == '\'');
    if url.is_empty() {
        return None;
    }
    Some(url.to_string())
}
