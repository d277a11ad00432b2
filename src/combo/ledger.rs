use std::collections::{BTreeMap, BTreeSet};

use crate::combo::pins::PinnedEntry;
use crate::models::Macro;

/// Macro totals consumed by a set of pins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl MacroTotals {
    pub fn get(&self, m: Macro) -> f64 {
        match m {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
            Macro::Carbs => self.carbs,
        }
    }

    fn add(&mut self, m: Macro, amount: f64) {
        match m {
            Macro::Calories => self.calories += amount,
            Macro::Protein => self.protein += amount,
            Macro::Fat => self.fat += amount,
            Macro::Carbs => self.carbs += amount,
        }
    }
}

/// Per-macro allowance left after the pins.
///
/// Partial: a missing macro is unconstrained, not zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacroBudget(BTreeMap<Macro, f64>);

impl MacroBudget {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, m: Macro) -> Option<f64> {
        self.0.get(&m).copied()
    }

    pub fn contains(&self, m: Macro) -> bool {
        self.0.contains_key(&m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Macro, f64)> + '_ {
        self.0.iter().map(|(m, v)| (*m, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Macro, f64)> for MacroBudget {
    fn from_iter<I: IntoIterator<Item = (Macro, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Sum `item[macro] * count` over all pins. No pins gives all zeros.
pub fn current_macros(pins: &[PinnedEntry]) -> MacroTotals {
    let mut totals = MacroTotals::default();
    for entry in pins {
        let qty = entry.count as f64;
        for m in Macro::ALL {
            totals.add(m, entry.item.get(m) * qty);
        }
    }
    totals
}

/// Remaining budget for each active macro: `max(0, maximum - used)`.
///
/// An active macro with no maximum counts as a maximum of 0. Inactive
/// macros never appear in the result.
pub fn remaining_budget(
    active: &BTreeSet<Macro>,
    pins: &[PinnedEntry],
    maxima: &BTreeMap<Macro, f64>,
) -> MacroBudget {
    let used = current_macros(pins);
    active
        .iter()
        .map(|&m| {
            let maximum = maxima.get(&m).copied().unwrap_or(0.0);
            (m, (maximum - used.get(m)).max(0.0))
        })
        .collect()
}
