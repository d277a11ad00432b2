use std::collections::HashSet;

use crate::combo::pins::PinRegistry;
use crate::models::MenuItem;

/// Build the display list: one card per pinned name in pin order, then the
/// remaining fetched items in fetch order.
///
/// A pinned card shows the fetched copy of the item when the batch has one,
/// otherwise the copy stored with the pin. No name appears twice.
pub fn merge_display_list(fetched: &[MenuItem], pins: &PinRegistry) -> Vec<MenuItem> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(pins.len() + fetched.len());

    for entry in pins.entries() {
        if !seen.insert(entry.item.name.as_str()) {
            continue;
        }
        let card = fetched
            .iter()
            .find(|f| f.is_same_item(&entry.item))
            .unwrap_or(&entry.item);
        out.push(card.clone());
    }

    for item in fetched {
        if seen.insert(item.name.as_str()) {
            out.push(item.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, cal: f64) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            calories: cal,
            protein: 0.0,
            fat: 0.0,
            carbs: 0.0,
            category: "mains".to_string(),
        }
    }

    fn names(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_pins_first_then_fetched() {
        let fetched = vec![item("A", 1.0), item("B", 2.0), item("C", 3.0)];
        let mut pins = PinRegistry::new();
        pins.pin(item("B", 2.0));
        pins.pin(item("D", 4.0));

        let merged = merge_display_list(&fetched, &pins);
        assert_eq!(names(&merged), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_prefers_fetched_values() {
        let fetched = vec![item("B", 250.0)];
        let mut pins = PinRegistry::new();
        pins.pin(item("B", 200.0));

        let merged = merge_display_list(&fetched, &pins);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].calories, 250.0);
    }

    #[test]
    fn test_expanded_pins_in_batch_collapse() {
        let mut pins = PinRegistry::new();
        pins.pin(item("A", 1.0));
        pins.set_count("A", 3);
        let mut fetched = pins.expanded();
        fetched.push(item("B", 2.0));

        let merged = merge_display_list(&fetched, &pins);
        assert_eq!(names(&merged), vec!["A", "B"]);
    }

    #[test]
    fn test_duplicate_fetched_names_collapse() {
        let fetched = vec![item("A", 1.0), item("B", 2.0), item("A", 9.0)];
        let merged = merge_display_list(&fetched, &PinRegistry::new());
        assert_eq!(names(&merged), vec!["A", "B"]);
        assert_eq!(merged[0].calories, 1.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge_display_list(&[], &PinRegistry::new()).is_empty());
    }
}
