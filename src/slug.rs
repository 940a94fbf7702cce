//! File names for written outbounds

/// Maximum file stem length, in characters.
pub const MAX_LEN: usize = 80;

/// Stem used when nothing of the tag survives.
pub const FALLBACK: &str = "outbound";

/// Turn a tag into a file stem.
///
/// Percent-decodes, trims, removes spaces, then keeps only ASCII digits and letters,
/// Cyrillic letters (`А-я`, `Ё`, `ё`), `.`, `_` and `-`. Other characters are dropped,
/// not replaced. The result is cut to `max_len` characters.
pub fn slugify(name: &str, max_len: usize) -> String {
    let decoded = String::from_utf8_lossy(&urlencoding::decode_binary(name.as_bytes())).into_owned();
    let safe: String = decoded.trim().chars().filter(|c| is_allowed(*c)).collect();
    let stem = if safe.is_empty() { FALLBACK } else { safe.as_str() };
    stem.chars().take(max_len).collect()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '.' | '_' | '-' | 'А'..='я' | 'Ё' | 'ё')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_safe_characters() {
        assert_eq!(slugify("My Node_1.de-2", MAX_LEN), "MyNode_1.de-2");
    }

    #[test]
    fn drops_everything_else() {
        assert_eq!(slugify("🇩🇪 Berlin | #1 / fast", MAX_LEN), "Berlin1fast");
    }

    #[test]
    fn cyrillic_letters_survive() {
        assert_eq!(slugify("Сервер Ёлка", MAX_LEN), "СерверЁлка");
    }

    #[test]
    fn percent_encoded_tags_are_decoded() {
        assert_eq!(slugify("%D0%A3%D0%B7%D0%B5%D0%BB%201", MAX_LEN), "Узел1");
    }

    #[test]
    fn empty_result_falls_back() {
        assert_eq!(slugify("  ", MAX_LEN), "outbound");
        assert_eq!(slugify("★★★", MAX_LEN), "outbound");
    }

    #[test]
    fn truncates_by_characters() {
        let long = "ж".repeat(100);
        let slug = slugify(&long, MAX_LEN);
        assert_eq!(slug.chars().count(), 80);
        assert_eq!(slugify("abcdef", 3), "abc");
    }
}
