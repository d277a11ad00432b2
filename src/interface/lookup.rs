use strsim::jaro_winkler;

/// Minimum Jaro-Winkler score for a fuzzy match.
pub const FUZZY_THRESHOLD: f64 = 0.7;

/// Resolve user input to one of `candidates`.
///
/// Case-insensitive exact match first, then the best fuzzy match above
/// [`FUZZY_THRESHOLD`].
pub fn resolve_name<'a, S: AsRef<str>>(input: &str, candidates: &'a [S]) -> Option<&'a str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(exact) = candidates
        .iter()
        .find(|c| c.as_ref().to_lowercase() == needle)
    {
        return Some(exact.as_ref());
    }

    candidates
        .iter()
        .map(|c| (c.as_ref(), jaro_winkler(&c.as_ref().to_lowercase(), &needle)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, _)| name)
}

/// Split a `NAME[xN]` pin spec into name and count (default 1).
pub fn parse_pin_spec(spec: &str) -> (String, u32) {
    let spec = spec.trim();
    if let Some((name, count)) = spec.rsplit_once(['x', 'X']) {
        if let Ok(n) = count.trim().parse::<u32>() {
            let name = name.trim();
            if !name.is_empty() && n > 0 {
                return (name.to_string(), n);
            }
        }
    }
    (spec.to_string(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_case_insensitive() {
        let names = vec!["Big Mac", "McChicken"];
        assert_eq!(resolve_name("big mac", &names), Some("Big Mac"));
    }

    #[test]
    fn test_fuzzy_match() {
        let names = vec!["Big Mac", "McChicken", "French Fries"];
        assert_eq!(resolve_name("mcchiken", &names), Some("McChicken"));
        assert_eq!(resolve_name("zzzz", &names), None);
        assert_eq!(resolve_name("  ", &names), None);
    }

    #[test]
    fn test_parse_pin_spec() {
        assert_eq!(parse_pin_spec("Fries x2"), ("Fries".to_string(), 2));
        assert_eq!(parse_pin_spec("Fries"), ("Fries".to_string(), 1));
        assert_eq!(parse_pin_spec("Big Mac X3"), ("Big Mac".to_string(), 3));
        assert_eq!(parse_pin_spec("Box"), ("Box".to_string(), 1));
    }
}
