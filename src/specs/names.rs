//! Word-building helpers shared by the solid name rules.

/// Adjective for a regular polygon with `n` sides.
#[must_use]
pub fn polygon_prefix(n: usize) -> String {
    match n {
        2 => "digonal".into(),
        3 => "triangular".into(),
        4 => "square".into(),
        5 => "pentagonal".into(),
        6 => "hexagonal".into(),
        8 => "octagonal".into(),
        10 => "decagonal".into(),
        _ => format!("{n}-gonal"),
    }
}

/// `word`, `biword` or `triword` for counts one to three; empty for zero.
#[must_use]
pub fn count_prefix(count: u8, word: &str) -> String {
    match count {
        0 => String::new(),
        1 => word.to_string(),
        2 => format!("bi{word}"),
        3 => format!("tri{word}"),
        n => format!("{n}-{word}"),
    }
}

/// Joins the non-empty words with single spaces.
#[must_use]
pub fn word_join<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(AsRef::as_ref)
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes() {
        assert_eq!(polygon_prefix(10), "decagonal");
        assert_eq!(polygon_prefix(7), "7-gonal");
        assert_eq!(count_prefix(0, "gyrate"), "");
        assert_eq!(count_prefix(2, "augmented"), "biaugmented");
        assert_eq!(count_prefix(3, "diminished"), "tridiminished");
    }

    #[test]
    fn join_skips_empty_words() {
        assert_eq!(word_join(&["", "elongated", "", "square pyramid"]), "elongated square pyramid");
        assert_eq!(word_join::<&str>(&[]), "");
    }
}
