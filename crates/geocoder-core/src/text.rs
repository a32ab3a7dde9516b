// crates/geocoder-core/src/text.rs

/// Fold text for matching: transliterate to ASCII, then lowercase.
///
/// `"Zürich"` and `"ZURICH"` both fold to `"zurich"`.
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding_ignores_accents_and_case() {
        assert_eq!(fold_key("Zürich"), "zurich");
        assert_eq!(fold_key("São Paulo"), "sao paulo");
        assert_eq!(fold_key("Kraków"), fold_key("KRAKOW"));
        assert_ne!(fold_key("Wien"), fold_key("Vienna"));
    }
}
