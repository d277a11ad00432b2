use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::api::query::format_number;
use crate::error::{NycError, Result};
use crate::models::{Macro, MenuItem};
use crate::session::Mode;

/// One step of the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetItems,
    ToggleCombo,
    EditMacros,
    EditCategories,
    Pin,
    SetPinCount,
    Unpin,
    ChangeRestaurant,
    Quit,
}

impl Action {
    fn label(self, mode: Mode) -> &'static str {
        match self {
            Action::GetItems => match mode {
                Mode::Browse => "Get items",
                Mode::Combo => "Get combo",
            },
            Action::ToggleCombo => match mode {
                Mode::Browse => "Turn combo mode on",
                Mode::Combo => "Turn combo mode off",
            },
            Action::EditMacros => "Edit macro filters",
            Action::EditCategories => "Edit categories",
            Action::Pin => "Pin an item",
            Action::SetPinCount => "Set pin count",
            Action::Unpin => "Remove a pin",
            Action::ChangeRestaurant => "Change restaurant",
            Action::Quit => "Quit",
        }
    }

    /// Actions offered in a mode. Pin editing only exists in combo mode.
    pub fn available(mode: Mode) -> Vec<Action> {
        let mut actions = vec![
            Action::GetItems,
            Action::ToggleCombo,
            Action::EditMacros,
            Action::EditCategories,
        ];
        if mode == Mode::Combo {
            actions.extend([Action::Pin, Action::SetPinCount, Action::Unpin]);
        }
        actions.extend([Action::ChangeRestaurant, Action::Quit]);
        actions
    }
}

pub fn prompt_action(mode: Mode) -> Result<Action> {
    let actions = Action::available(mode);
    let labels: Vec<&str> = actions.iter().map(|a| a.label(mode)).collect();

    let selection = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(actions[selection])
}

/// Pick a restaurant. `None` if the list is empty.
pub fn prompt_restaurant(restaurants: &[String]) -> Result<Option<String>> {
    if restaurants.is_empty() {
        return Ok(None);
    }

    let selection = Select::new()
        .with_prompt("Choose a restaurant")
        .items(restaurants)
        .default(0)
        .interact()?;

    Ok(Some(restaurants[selection].clone()))
}

pub fn prompt_macro(active: impl Fn(Macro) -> bool) -> Result<Macro> {
    let labels: Vec<String> = Macro::ALL
        .iter()
        .map(|&m| {
            let marker = if active(m) { "[x]" } else { "[ ]" };
            format!("{} {}", marker, m)
        })
        .collect();

    let selection = Select::new()
        .with_prompt("Which macro?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Macro::ALL[selection])
}

/// Ask for an optional bound. Empty input unsets it.
pub fn prompt_bound(label: &str, current: Option<f64>) -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt(format!("{} (empty for none)", label))
        .with_initial_text(current.map(format_number).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    parse_bound(&input)
}

/// Parse a bound typed by the user. Empty means unset.
pub fn parse_bound(input: &str) -> Result<Option<f64>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| NycError::InvalidInput(format!("Invalid number: {}", input)))
}

/// Multi-select over the restaurant's categories.
pub fn prompt_categories(all: &[String], selected: &[String]) -> Result<Vec<String>> {
    let defaults: Vec<bool> = all.iter().map(|c| selected.contains(c)).collect();

    let chosen = MultiSelect::new()
        .with_prompt("Include categories (space to toggle)")
        .items(all)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| all[i].clone()).collect())
}

/// Pick one item from a list. `None` if the list is empty.
pub fn prompt_item(items: &[MenuItem], prompt: &str) -> Result<Option<MenuItem>> {
    if items.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = items
        .iter()
        .map(|i| format!("{} ({} cal)", i.name, format_number(i.calories)))
        .collect();

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Some(items[selection].clone()))
}

pub fn prompt_count(current: u32) -> Result<i64> {
    let input: String = Input::new()
        .with_prompt("New count (0 removes)")
        .default(current.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| NycError::InvalidInput("Invalid number".to_string()))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound("").unwrap(), None);
        assert_eq!(parse_bound(" 800 ").unwrap(), Some(800.0));
        assert!(parse_bound("lots").is_err());
    }

    #[test]
    fn test_pin_actions_only_in_combo() {
        assert!(!Action::available(Mode::Browse).contains(&Action::Pin));
        assert!(Action::available(Mode::Combo).contains(&Action::Pin));
        assert_eq!(Action::available(Mode::Combo).last(), Some(&Action::Quit));
    }
}
