//! String utilities for the domain layer.

/// Turn an identifier slug into a human-readable title.
///
/// Both `-` and `_` are treated as word separators and every word gets an
/// uppercase first letter, so `ai-safety-engineer` becomes
/// `Ai Safety Engineer` and `security_team` becomes `Security Team`.
pub fn title_case_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join identifiers with `", "` for human-readable messages.
pub fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_hyphenated() {
        assert_eq!(title_case_slug("ai-safety-engineer"), "Ai Safety Engineer");
        assert_eq!(title_case_slug("ciso"), "Ciso");
    }

    #[test]
    fn test_title_case_underscored() {
        assert_eq!(title_case_slug("security_team"), "Security Team");
        assert_eq!(title_case_slug("AI_ML_group"), "Ai Ml Group");
    }

    #[test]
    fn test_title_case_collapses_repeated_separators() {
        assert_eq!(title_case_slug("--product--lead-"), "Product Lead");
        assert_eq!(title_case_slug(""), "");
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&["a", "b"]), "a, b");
        assert_eq!(join_ids::<&str>(&[]), "");
    }
}
