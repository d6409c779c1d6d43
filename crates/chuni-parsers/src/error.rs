use thiserror::Error;

/// A scraped section (or the profile block) is missing a field it must carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {context} #{section}: {field} {reason}")]
pub struct MalformedRecordError {
    pub context: &'static str,
    pub section: usize,
    pub field: &'static str,
    pub reason: String,
}

impl MalformedRecordError {
    pub(crate) fn missing(context: &'static str, section: usize, field: &'static str) -> Self {
        Self {
            context,
            section,
            field,
            reason: "not found".to_string(),
        }
    }

    pub(crate) fn invalid(
        context: &'static str,
        section: usize,
        field: &'static str,
        value: &str,
    ) -> Self {
        Self {
            context,
            section,
            field,
            reason: format!("has invalid value {value:?}"),
        }
    }
}
