pub mod error;
pub mod player_data;
pub mod score_list;

pub use error::MalformedRecordError;
pub use player_data::{decode_rating_icons, parse_player_profile_html, ProfileLookup};
pub use score_list::{parse_score_sections, parse_scores_html, MalformedPolicy};
