/// Case-insensitive substring match of `needle` against any present field.
///
/// An empty needle matches every row.
pub fn matches_search(needle: Option<&str>, fields: &[Option<&str>]) -> bool {
    let needle = match needle {
        Some(n) if !n.is_empty() => n.to_lowercase(),
        _ => return true,
    };
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_needle_matches_everything() {
        assert!(matches_search(None, &[None]));
        assert!(matches_search(Some(""), &[Some("anything")]));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let fields = [Some("AA:BB:CC:DD:EE:FF"), None, Some("Jane's Laptop")];
        assert!(matches_search(Some("bb:cc"), &fields));
        assert!(matches_search(Some("LAPTOP"), &fields));
        assert!(!matches_search(Some("phone"), &fields));
    }

    #[test]
    fn test_missing_fields_never_match() {
        assert!(!matches_search(Some("x"), &[None, None]));
    }
}
