/// Whether an icon name matches a search query.
///
/// Case-insensitive substring match; an empty query matches everything.
pub fn matches(query: &str, name: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible<'a>(query: &str, names: &[&'a str]) -> Vec<&'a str> {
        names.iter().copied().filter(|name| matches(query, name)).collect()
    }

    #[test]
    fn test_empty_query_matches_all() {
        let names = ["arrow", "star", "Home"];
        assert_eq!(visible("", &names), vec!["arrow", "star", "Home"]);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let names = ["ArrowLeft", "arrow-right", "star"];
        assert_eq!(visible("ARROW", &names), vec!["ArrowLeft", "arrow-right"]);
        assert_eq!(visible("left", &names), vec!["ArrowLeft"]);
        assert!(visible("circle", &names).is_empty());
    }

    #[test]
    fn test_filter_idempotent() {
        let names = ["alpha", "beta", "alphabet"];
        let once = visible("alp", &names);
        let twice = visible("alp", &once);
        assert_eq!(once, twice);
    }
}
