use crate::api::query::format_number;
use crate::combo::{MacroBudget, MacroTotals, PinRegistry};
use crate::models::{Macro, MenuItem};
use crate::session::{ComboSession, Mode};

/// Print the merged display list, marking pinned cards with their count.
pub fn display_items(items: &[MenuItem], pins: &PinRegistry, has_fetched: bool) {
    if items.is_empty() {
        if has_fetched {
            println!("no items found");
        }
        return;
    }

    println!();
    let max_name_len = name_column_width(items);

    for (i, item) in items.iter().enumerate() {
        let pin_tag = pins
            .get(&item.name)
            .map(|e| format!("  [pinned x{}]", e.count))
            .unwrap_or_default();

        println!(
            "{:>3}. {:<width$} - {:>5} cal | P {:>4} g | C {:>4} g | F {:>4} g  ({}){}",
            i + 1,
            item.name,
            format_number(item.calories),
            format_number(item.protein),
            format_number(item.carbs),
            format_number(item.fat),
            item.category,
            pin_tag,
            width = max_name_len
        );
    }
    println!();
}

/// Widest name in characters.
fn name_column_width(items: &[MenuItem]) -> usize {
    items
        .iter()
        .map(|i| i.name.chars().count())
        .max()
        .unwrap_or(10)
}

/// Print the "combo totals" panel.
pub fn display_totals(totals: &MacroTotals) {
    println!("--- Combo totals ---");
    for m in Macro::ALL {
        println!("  {:<8} {} {}", m.name(), format_number(totals.get(m)), m.unit());
    }
}

/// Print the "remaining macros" panel. Nothing is printed when it is empty.
pub fn display_remaining(remaining: &MacroBudget) {
    if remaining.is_empty() {
        return;
    }
    println!("--- Remaining macros ---");
    for (m, value) in remaining.iter() {
        println!("  {:<8} {} {}", m.name(), format_number(value), m.unit());
    }
}

/// Print a simple list of names.
pub fn display_names(names: &[String], title: &str) {
    if names.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!("=== {} ({}) ===", title, names.len());
    for name in names {
        println!("  {}", name);
    }
}

/// Print the session's filters on one line.
pub fn display_filters(session: &ComboSession) {
    let filters = session.filters();
    let mode = match session.mode() {
        Mode::Browse => "browse",
        Mode::Combo => "combo",
    };

    let ranges: Vec<String> = filters
        .active_ranges()
        .into_iter()
        .map(|(m, r)| {
            let min = r.min.map(format_number).unwrap_or_else(|| "-".to_string());
            let max = r.max.map(format_number).unwrap_or_else(|| "-".to_string());
            format!("{} {}..{}", m, min, max)
        })
        .collect();

    println!(
        "[{}] {} | macros: {} | categories: {}",
        mode,
        filters.restaurant.as_deref().unwrap_or("(no restaurant)"),
        if ranges.is_empty() {
            "none".to_string()
        } else {
            ranges.join(", ")
        },
        filters.selected_categories().len()
    );
}

/// Print everything the session currently shows.
pub fn display_session(session: &ComboSession) {
    display_filters(session);
    display_items(&session.display_list(), session.pins(), session.has_fetched());

    if session.mode() == Mode::Combo && !session.pins().is_empty() {
        display_totals(&session.current_macros());
        display_remaining(session.remaining_macros());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            calories: 0.0,
            protein: 0.0,
            fat: 0.0,
            carbs: 0.0,
            category: "mains".to_string(),
        }
    }

    #[test]
    fn test_name_width_counts_chars() {
        let items = vec![item("Crème brûlée"), item("Fries")];
        assert_eq!(name_column_width(&items), 12);
        assert_eq!(name_column_width(&[]), 10);
    }
}
