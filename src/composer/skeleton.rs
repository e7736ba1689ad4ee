use tracing::warn;

use crate::core::CardError;

pub const SHARED_MARKER: &str = "%COMMON_JS%";
pub const SIDE_MARKER: &str = "%TEMPLATE_JS%";

/// Layout text with the shared and side-specific insertion points located.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    text: String,
    shared_at: usize,
    side_at: usize,
}

impl Skeleton {
    pub fn parse(text: impl Into<String>) -> Result<Self, CardError> {
        let text = text.into();
        let shared_at = locate(&text, SHARED_MARKER)?;
        let side_at = locate(&text, SIDE_MARKER)?;

        let shared_end = shared_at + SHARED_MARKER.len();
        let side_end = side_at + SIDE_MARKER.len();
        if shared_at < side_end && side_at < shared_end {
            return Err(CardError::OverlappingMarkers);
        }

        Ok(Self { text, shared_at, side_at })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Splices both replacements in at the recorded offsets.
    ///
    /// Replacement text is never scanned, so a marker inside a snippet stays literal.
    pub fn fill(&self, shared: &str, side: &str) -> String {
        let mut spans = [
            (self.shared_at, SHARED_MARKER.len(), shared),
            (self.side_at, SIDE_MARKER.len(), side),
        ];
        spans.sort_by_key(|(at, _, _)| *at);

        let marker_len = SHARED_MARKER.len() + SIDE_MARKER.len();
        let mut out = String::with_capacity(self.text.len() - marker_len + shared.len() + side.len());
        let mut cursor = 0;
        for (at, len, replacement) in spans {
            out.push_str(&self.text[cursor..at]);
            out.push_str(replacement);
            cursor = at + len;
        }
        out.push_str(&self.text[cursor..]);
        out
    }
}

/// First occurrence wins; later ones stay in the layout as literal text.
fn locate(text: &str, marker: &'static str) -> Result<usize, CardError> {
    let mut found = text.match_indices(marker).map(|(at, _)| at);
    let at = found.next().ok_or(CardError::MissingMarker(marker))?;
    let repeats = found.count();
    if repeats > 0 {
        warn!("{} appears {} more time(s); only the first is replaced", marker, repeats);
    }
    Ok(at)
}
