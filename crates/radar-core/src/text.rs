//! Small string helpers shared by the adapters.

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

pub fn truncate_list<T>(mut items: Vec<T>, max: usize) -> Vec<T> {
    items.truncate(max);
    items
}

/// The first keyword (in list order) that occurs in `text`, ignoring case.
pub fn first_matching_keyword<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .find(|kw| !kw.is_empty() && haystack.contains(&kw.to_lowercase()))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn collapses_newlines_and_indentation() {
        assert_eq!(
            collapse_whitespace("  Agents that\n      collaborate\twith humans "),
            "Agents that collaborate with humans"
        );
    }

    #[test]
    fn truncates_by_chars_not_bytes() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn keyword_match_ignores_case() {
        let keywords = kws(&["Agentic", "human-AI"]);
        assert_eq!(
            first_matching_keyword("New AGENTIC workflows", &keywords),
            Some("Agentic")
        );
        assert_eq!(
            first_matching_keyword("a Human-ai study", &keywords),
            Some("human-AI")
        );
        assert_eq!(first_matching_keyword("compiler news", &keywords), None);
    }

    #[test]
    fn first_match_follows_list_order() {
        let keywords = kws(&["agent", "agentic"]);
        assert_eq!(
            first_matching_keyword("agentic systems", &keywords),
            Some("agent")
        );
        assert_eq!(first_matching_keyword("nothing here", &keywords), None);
    }

    #[test]
    fn empty_keywords_never_match() {
        assert_eq!(first_matching_keyword("anything", &kws(&[""])), None);
        assert_eq!(first_matching_keyword("anything", &[]), None);
    }
}
