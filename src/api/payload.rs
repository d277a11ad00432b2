use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::models::MenuItem;

/// Category the service assigns when an item has none.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Loosely-typed item as it may arrive on the wire.
#[derive(Debug, Deserialize)]
struct RawMenuItem {
    name: Option<String>,
    calories: Option<f64>,
    protein: Option<f64>,
    fat: Option<f64>,
    carbs: Option<f64>,
    category: Option<String>,
}

impl RawMenuItem {
    fn validate(self) -> Option<MenuItem> {
        let item = MenuItem {
            name: self.name.filter(|n| !n.trim().is_empty())?,
            calories: self.calories?,
            protein: self.protein?,
            fat: self.fat?,
            carbs: self.carbs?,
            category: self
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
        };
        item.is_valid().then_some(item)
    }
}

/// Validate a menu-item list response.
///
/// A non-array body (the service answers `"no items"` on an empty match)
/// is an empty list. Malformed elements are dropped.
pub fn parse_menu_items(body: Value) -> Vec<MenuItem> {
    let Value::Array(elements) = body else {
        return Vec::new();
    };

    elements
        .into_iter()
        .filter_map(|element| {
            let parsed = RawMenuItem::deserialize(&element)
                .ok()
                .and_then(RawMenuItem::validate);
            if parsed.is_none() {
                warn!(payload = %element, "dropping malformed menu item");
            }
            parsed
        })
        .collect()
}

/// Validate a list of names. Non-string elements are dropped.
pub fn parse_string_list(body: Value) -> Vec<String> {
    let Value::Array(elements) = body else {
        return Vec::new();
    };

    elements
        .into_iter()
        .filter_map(|element| match element {
            Value::String(s) => Some(s),
            other => {
                warn!(payload = %other, "dropping non-string list entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_items_string_is_empty() {
        assert!(parse_menu_items(json!("no items")).is_empty());
        assert!(parse_menu_items(json!({"error": "boom"})).is_empty());
    }

    #[test]
    fn test_valid_items_kept_in_order() {
        let body = json!([
            {"name": "Burger", "calories": 500, "protein": 25, "carbs": 40, "fat": 22, "category": "mains"},
            {"name": "Fries", "calories": 320, "protein": 4, "carbs": 43, "fat": 15, "category": "sides"}
        ]);
        let items = parse_menu_items(body);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Burger");
        assert_eq!(items[1].fat, 15.0);
    }

    #[test]
    fn test_malformed_items_dropped() {
        let body = json!([
            {"name": "NoMacros", "calories": 100},
            {"name": "Negative", "calories": -1, "protein": 0, "carbs": 0, "fat": 0},
            {"name": "Stringy", "calories": "100", "protein": 0, "carbs": 0, "fat": 0},
            {"calories": 100, "protein": 0, "carbs": 0, "fat": 0},
            42,
            {"name": "Good", "calories": 100, "protein": 1, "carbs": 2, "fat": 3}
        ]);
        let items = parse_menu_items(body);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Good");
    }

    #[test]
    fn test_missing_category_defaults() {
        let body = json!([
            {"name": "Shake", "calories": 600, "protein": 12, "carbs": 90, "fat": 18, "category": null}
        ]);
        let items = parse_menu_items(body);
        assert_eq!(items[0].category, UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_string_list() {
        let body = json!(["diner", 7, "taqueria", null]);
        assert_eq!(parse_string_list(body), vec!["diner", "taqueria"]);
        assert!(parse_string_list(json!("oops")).is_empty());
    }
}
