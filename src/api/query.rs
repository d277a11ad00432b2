use crate::combo::MacroBudget;
use crate::models::{Macro, MacroRange};

/// Ordered `(key, value)` query pairs.
///
/// Multi-valued fields repeat their key; unset or empty scalars are left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar, skipping empty strings.
    pub fn push_str(&mut self, key: &str, value: Option<&str>) {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.0.push((key.to_string(), v.to_string()));
        }
    }

    pub fn push_number(&mut self, key: &str, value: Option<f64>) {
        if let Some(v) = value {
            self.0.push((key.to_string(), format_number(v)));
        }
    }

    /// One pair per value, all under the same key.
    pub fn push_repeated<S: AsRef<str>>(&mut self, key: &str, values: &[S]) {
        for v in values {
            self.push_str(key, Some(v.as_ref()));
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Integral values print without a fractional part.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

fn min_key(m: Macro) -> String {
    format!("{}Min", m.param_prefix())
}

fn max_key(m: Macro) -> String {
    format!("{}Max", m.param_prefix())
}

/// Plain item fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemQuery {
    pub restaurant: Option<String>,
    pub categories: Vec<String>,
    pub ranges: Vec<(Macro, MacroRange)>,
    pub count: usize,
}

impl ItemQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_str("restaurant", self.restaurant.as_deref());
        params.push_repeated("categories", &self.categories);
        for (m, range) in &self.ranges {
            params.push_number(&min_key(*m), range.min);
            params.push_number(&max_key(*m), range.max);
        }
        params.push_number("count", Some(self.count as f64));
        params
    }
}

/// Budget-constrained combo fetch. Only maxima are sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboQuery {
    pub restaurant: Option<String>,
    pub categories: Vec<String>,
    pub budget: MacroBudget,
    pub count: usize,
}

impl ComboQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_str("restaurant", self.restaurant.as_deref());
        params.push_repeated("categories", &self.categories);
        for (m, remaining) in self.budget.iter() {
            params.push_number(&max_key(m), Some(remaining));
        }
        params.push_number("count", Some(self.count as f64));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_repeat_key() {
        let query = ItemQuery {
            restaurant: Some("diner".to_string()),
            categories: vec!["burgers".to_string(), "sides".to_string()],
            ranges: vec![],
            count: 20,
        };
        let params = query.to_params();
        assert_eq!(params.get_all("categories"), vec!["burgers", "sides"]);
        assert_eq!(params.get_all("restaurant"), vec!["diner"]);
        assert_eq!(params.get_all("count"), vec!["20"]);
    }

    #[test]
    fn test_unset_fields_omitted() {
        let query = ItemQuery {
            restaurant: Some(String::new()),
            categories: vec![],
            ranges: vec![(
                Macro::Calories,
                MacroRange {
                    min: None,
                    max: Some(800.0),
                },
            )],
            count: 5,
        };
        let params = query.to_params();
        let keys: Vec<&str> = params.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["calorieMax", "count"]);
        assert_eq!(params.get_all("calorieMax"), vec!["800"]);
    }

    #[test]
    fn test_combo_sends_max_only() {
        let budget: MacroBudget = [(Macro::Calories, 300.0), (Macro::Protein, 12.5)]
            .into_iter()
            .collect();
        let query = ComboQuery {
            restaurant: Some("diner".to_string()),
            categories: vec!["burgers".to_string()],
            budget,
            count: 3,
        };
        let params = query.to_params();
        assert_eq!(params.get_all("calorieMax"), vec!["300"]);
        assert_eq!(params.get_all("proteinMax"), vec!["12.5"]);
        assert!(params.get_all("calorieMin").is_empty());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(1000.0), "1000");
        assert_eq!(format_number(2.25), "2.25");
    }
}
