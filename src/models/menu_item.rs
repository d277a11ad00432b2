use std::fmt;

/// One of the four tracked macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Macro {
    Calories,
    Protein,
    Fat,
    Carbs,
}

impl Macro {
    pub const ALL: [Macro; 4] = [Macro::Calories, Macro::Protein, Macro::Fat, Macro::Carbs];

    /// Display and payload name.
    pub fn name(self) -> &'static str {
        match self {
            Macro::Calories => "calories",
            Macro::Protein => "protein",
            Macro::Fat => "fat",
            Macro::Carbs => "carbs",
        }
    }

    /// Query parameter prefix understood by the menu service (`calorieMax`, `fatMin`, ...).
    pub fn param_prefix(self) -> &'static str {
        match self {
            Macro::Calories => "calorie",
            Macro::Protein => "protein",
            Macro::Fat => "fat",
            Macro::Carbs => "carbs",
        }
    }

    /// Unit shown next to values.
    pub fn unit(self) -> &'static str {
        match self {
            Macro::Calories => "kcal",
            _ => "g",
        }
    }

    /// Parse a macro name, case-insensitive. Accepts the singular "calorie".
    pub fn parse(s: &str) -> Option<Macro> {
        match s.trim().to_lowercase().as_str() {
            "calories" | "calorie" | "cal" => Some(Macro::Calories),
            "protein" => Some(Macro::Protein),
            "fat" | "fats" => Some(Macro::Fat),
            "carbs" | "carb" => Some(Macro::Carbs),
            _ => None,
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A menu item as returned by the menu service.
///
/// Identity is the `name`; the service has no separate id.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub category: String,
}

impl MenuItem {
    /// Value of a single macro.
    #[inline]
    pub fn get(&self, m: Macro) -> f64 {
        match m {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
            Macro::Carbs => self.carbs,
        }
    }

    /// True if both records refer to the same menu item.
    #[inline]
    pub fn is_same_item(&self, other: &MenuItem) -> bool {
        self.name == other.name
    }

    /// All macros non-negative and finite.
    pub fn is_valid(&self) -> bool {
        Macro::ALL
            .iter()
            .all(|&m| self.get(m).is_finite() && self.get(m) >= 0.0)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}]: {} cal, P:{} F:{} C:{}",
            self.name, self.category, self.calories, self.protein, self.fat, self.carbs
        )
    }
}
