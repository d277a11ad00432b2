use std::collections::{BTreeMap, BTreeSet};

use crate::error::{NycError, Result};
use crate::models::Macro;

/// Optional lower and upper bound for one macro.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacroRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// The user's current menu filters.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub restaurant: Option<String>,
    active: BTreeSet<Macro>,
    ranges: BTreeMap<Macro, MacroRange>,
    /// Selected categories, in the order the service listed them.
    categories: Vec<String>,
}

fn check_bound(m: Macro, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(NycError::InvalidInput(format!(
            "{} bound must be a non-negative number, got {}",
            m, v
        ))),
        other => Ok(other),
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Macros the user filters on.
    pub fn active_macros(&self) -> &BTreeSet<Macro> {
        &self.active
    }

    pub fn is_active(&self, m: Macro) -> bool {
        self.active.contains(&m)
    }

    /// Add a macro to the active set.
    pub fn activate_macro(&mut self, m: Macro) {
        self.active.insert(m);
    }

    /// Flip a macro in or out of the active set. Returns the new state.
    pub fn toggle_macro(&mut self, m: Macro) -> bool {
        if self.active.remove(&m) {
            false
        } else {
            self.active.insert(m);
            true
        }
    }

    /// Bounds for a macro, whether or not it is active.
    pub fn range(&self, m: Macro) -> MacroRange {
        self.ranges.get(&m).copied().unwrap_or_default()
    }

    pub fn set_min(&mut self, m: Macro, min: Option<f64>) -> Result<()> {
        let min = check_bound(m, min)?;
        self.ranges.entry(m).or_default().min = min;
        Ok(())
    }

    pub fn set_max(&mut self, m: Macro, max: Option<f64>) -> Result<()> {
        let max = check_bound(m, max)?;
        self.ranges.entry(m).or_default().max = max;
        Ok(())
    }

    /// Macros with a user-supplied maximum. Unset maxima are absent.
    pub fn maxima(&self) -> BTreeMap<Macro, f64> {
        self.ranges
            .iter()
            .filter_map(|(m, r)| r.max.map(|v| (*m, v)))
            .collect()
    }

    /// Bounds that go out with an item fetch: active macros only.
    pub fn active_ranges(&self) -> Vec<(Macro, MacroRange)> {
        self.active.iter().map(|&m| (m, self.range(m))).collect()
    }

    pub fn selected_categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_category_selected(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Replace the selection, keeping first occurrences only.
    pub fn select_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.clear();
        for c in categories {
            let c = c.into();
            if !self.is_category_selected(&c) {
                self.categories.push(c);
            }
        }
    }

    /// Flip one category. Returns whether it is now selected.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        if let Some(pos) = self.categories.iter().position(|c| c == category) {
            self.categories.remove(pos);
            false
        } else {
            self.categories.push(category.to_string());
            true
        }
    }
}
