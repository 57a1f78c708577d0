/// Normalize free text for matching: lowercase, nothing else.
///
/// Locations and requirements are compared case-insensitively but otherwise
/// verbatim; trimming or accent folding would change scores for existing data.
#[inline]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Split requirement text into lowercase whitespace-delimited tokens.
///
/// Punctuation is kept attached to tokens ("cooking," stays "cooking,").
/// Overlap counting uses substring containment, which is lenient enough that
/// trailing punctuation rarely matters, and stripping it would silently shift
/// historical scores.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Build the combined candidate text a job's requirement tokens are matched
/// against: self description and stated preference, space-joined, lowercased.
pub fn candidate_text(job_description: &str, job_preference: &str) -> String {
    normalize(&format!("{} {}", job_description, job_preference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("Thane West"), "thane west");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_tokenize_splits_on_any_whitespace() {
        assert_eq!(
            tokenize("cooking  cleaning\tand\nhousehold work"),
            vec!["cooking", "cleaning", "and", "household", "work"]
        );
    }

    #[test]
    fn test_tokenize_drops_empty_tokens() {
        assert_eq!(tokenize("   "), Vec::<String>::new());
        assert_eq!(tokenize(""), Vec::<String>::new());
        assert_eq!(tokenize("  driving "), vec!["driving"]);
    }

    #[test]
    fn test_tokenize_keeps_punctuation() {
        assert_eq!(
            tokenize("cleaning, cooking, and household work"),
            vec!["cleaning,", "cooking,", "and", "household", "work"]
        );
    }

    #[test]
    fn test_candidate_text_joins_with_space() {
        assert_eq!(
            candidate_text("Experienced in cooking", "Cook"),
            "experienced in cooking cook"
        );
        assert_eq!(candidate_text("", ""), " ");
    }
}
