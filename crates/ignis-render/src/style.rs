//! Dashboard palette and fixed visual encodings.

use ignis_core::Classification;

pub const ACCENT: &str = "#c9302c";
pub const CENTRAL_NODE: &str = "#2cc4c9";
pub const CRITICAL: &str = "#ff4d4d";
pub const IMPORTANT: &str = "#ffae42";
pub const SECONDARY: &str = "#4caf50";
pub const UNCLASSIFIED: &str = "#999";
pub const LINK: &str = "#b95757";
pub const LABEL: &str = "#fff";
pub const OUTSTANDING_BAR: &str = "#08a7cf";
pub const GRID: &str = "#555";
pub const TOOLTIP_BACKGROUND: &str = "#222";

pub fn classification_color(classification: Option<Classification>) -> &'static str {
    match classification {
        Some(Classification::Critical) => CRITICAL,
        Some(Classification::Important) => IMPORTANT,
        Some(Classification::Secondary) => SECONDARY,
        None => UNCLASSIFIED,
    }
}

/// Last four characters of an identifier, used as a compact node or bar label.
pub fn short_label(id: &str) -> String {
    let count = id.chars().count();
    id.chars().skip(count.saturating_sub(4)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_label_handles_short_and_multibyte_ids() {
        assert_eq!(short_label("CNPJ_00017"), "0017");
        assert_eq!(short_label("ab"), "ab");
        assert_eq!(short_label("çãéíóú"), "éíóú");
    }
}
