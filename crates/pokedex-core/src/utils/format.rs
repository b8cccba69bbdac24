/// Join elemental type names for display.
/// A single name comes back verbatim; several are joined with ", " in order.
pub fn join_type_names<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (i, name) in names.into_iter().enumerate() {
        if i > 0 {
            joined.push_str(", ");
        }
        joined.push_str(name.as_ref());
    }
    joined
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Case-insensitive substring match.
/// `needle` is expected to be lowercased already.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Format a value measured in tenths (decimetres, hectograms) as a decimal
pub fn format_tenths(value: u32, unit: &str) -> String {
    format!("{}.{} {}", value / 10, value % 10, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_type_names_single() {
        assert_eq!(join_type_names(["fire"]), "fire");
    }

    #[test]
    fn test_join_type_names_multiple_preserves_order() {
        assert_eq!(join_type_names(["fire", "ground"]), "fire, ground");
        assert_eq!(join_type_names(["grass", "poison", "bug"]), "grass, poison, bug");
    }

    #[test]
    fn test_join_type_names_empty() {
        assert_eq!(join_type_names(Vec::<String>::new()), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bulbasaur"), "Bulbasaur");
        assert_eq!(capitalize("Mew"), "Mew");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Bulbasaur", "bulba"));
        assert!(!contains_ignore_case("ivysaur", "bulba"));
    }

    #[test]
    fn test_format_tenths() {
        assert_eq!(format_tenths(7, "m"), "0.7 m");
        assert_eq!(format_tenths(69, "kg"), "6.9 kg");
        assert_eq!(format_tenths(1000, "kg"), "100.0 kg");
    }
}
