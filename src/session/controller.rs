use tracing::{debug, error, warn};

use crate::api::{ComboQuery, ItemQuery, MenuApi};
use crate::combo::{
    current_macros, merge_display_list, remaining_budget, MacroBudget, MacroTotals, PinRegistry,
};
use crate::config::Settings;
use crate::error::{NycError, Result};
use crate::models::{FilterState, Macro, MenuItem};

/// Browse shows filter matches; Combo enables pins and budgeted fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browse,
    Combo,
}

/// The request a ticket was issued for.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Items(ItemQuery),
    Combo(ComboQuery),
}

/// Handle for one issued fetch. Only the most recently issued ticket may
/// change session state when it completes.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    seq: u64,
    request: FetchRequest,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &FetchRequest {
        &self.request
    }
}

/// Owns all menu/combo state for one user session.
#[derive(Debug)]
pub struct ComboSession {
    filters: FilterState,
    pins: PinRegistry,
    mode: Mode,
    restaurants: Vec<String>,
    categories: Vec<String>,
    fetched: Vec<MenuItem>,
    has_fetched: bool,
    /// Remaining-macros panel. Empty outside combo mode or with no pins.
    remaining: MacroBudget,
    latest_seq: u64,
    item_count: usize,
    combo_count: usize,
}

impl ComboSession {
    pub fn new(settings: &Settings) -> Self {
        Self::with_counts(settings.item_count, settings.combo_count)
    }

    pub fn with_counts(item_count: usize, combo_count: usize) -> Self {
        Self {
            filters: FilterState::new(),
            pins: PinRegistry::new(),
            mode: Mode::Browse,
            restaurants: Vec::new(),
            categories: Vec::new(),
            fetched: Vec::new(),
            has_fetched: false,
            remaining: MacroBudget::empty(),
            latest_seq: 0,
            item_count,
            combo_count,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    pub fn restaurants(&self) -> &[String] {
        &self.restaurants
    }

    /// Categories offered for the current restaurant.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn fetched_items(&self) -> &[MenuItem] {
        &self.fetched
    }

    /// False until a fetch has completed, successfully or not.
    pub fn has_fetched(&self) -> bool {
        self.has_fetched
    }

    pub fn remaining_macros(&self) -> &MacroBudget {
        &self.remaining
    }

    /// Totals of the pinned items.
    pub fn current_macros(&self) -> MacroTotals {
        current_macros(self.pins.entries())
    }

    /// Pinned cards first, then the rest of the latest batch.
    pub fn display_list(&self) -> Vec<MenuItem> {
        merge_display_list(&self.fetched, &self.pins)
    }

    /// Re-derive the remaining-macros panel from pins and filters.
    pub fn recompute_remaining(&mut self) -> &MacroBudget {
        self.remaining = if self.mode == Mode::Combo && !self.pins.is_empty() {
            self.fresh_budget()
        } else {
            MacroBudget::empty()
        };
        &self.remaining
    }

    fn fresh_budget(&self) -> MacroBudget {
        remaining_budget(
            self.filters.active_macros(),
            self.pins.entries(),
            &self.filters.maxima(),
        )
    }

    // Mode

    pub fn set_combo_mode(&mut self, enabled: bool) {
        let leaving_combo = self.mode == Mode::Combo && !enabled;
        self.mode = if enabled { Mode::Combo } else { Mode::Browse };
        if !enabled {
            self.pins.clear();
        }
        if leaving_combo {
            // drop any combo fetch still in flight
            self.latest_seq += 1;
        }
        self.recompute_remaining();
    }

    pub fn toggle_combo_mode(&mut self) -> Mode {
        self.set_combo_mode(self.mode == Mode::Browse);
        self.mode
    }

    // Restaurant and filters

    /// Switch restaurant. Everything derived from the old one is dropped,
    /// including any fetch still in flight.
    pub fn set_restaurant(&mut self, restaurant: &str) {
        self.filters.restaurant = Some(restaurant.to_string()).filter(|r| !r.is_empty());
        self.filters.select_categories(Vec::<String>::new());
        self.categories.clear();
        self.pins.clear();
        self.fetched.clear();
        self.has_fetched = false;
        self.latest_seq += 1;
        self.recompute_remaining();
    }

    pub fn toggle_macro(&mut self, m: Macro) -> bool {
        let active = self.filters.toggle_macro(m);
        self.recompute_remaining();
        active
    }

    pub fn activate_macro(&mut self, m: Macro) {
        self.filters.activate_macro(m);
        self.recompute_remaining();
    }

    pub fn set_min(&mut self, m: Macro, min: Option<f64>) -> Result<()> {
        self.filters.set_min(m, min)?;
        self.recompute_remaining();
        Ok(())
    }

    pub fn set_max(&mut self, m: Macro, max: Option<f64>) -> Result<()> {
        self.filters.set_max(m, max)?;
        self.recompute_remaining();
        Ok(())
    }

    pub fn toggle_category(&mut self, category: &str) -> bool {
        self.filters.toggle_category(category)
    }

    pub fn select_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.select_categories(categories);
    }

    // Pins

    /// Pin an item (or bump its count). Combo mode only.
    pub fn pin(&mut self, item: MenuItem) -> Result<u32> {
        if self.mode != Mode::Combo {
            return Err(NycError::PinningDisabled);
        }
        debug!(item = %item.debug_string(), "pinning");
        let count = self.pins.pin(item);
        self.recompute_remaining();
        Ok(count)
    }

    pub fn set_pin_count(&mut self, name: &str, count: i64) {
        self.pins.set_count(name, count);
        self.recompute_remaining();
    }

    pub fn unpin(&mut self, name: &str) -> bool {
        let removed = self.pins.unpin(name).is_some();
        self.recompute_remaining();
        removed
    }

    // Lists

    pub async fn load_restaurants<A: MenuApi + ?Sized>(&mut self, api: &A) -> &[String] {
        self.restaurants = match api.restaurants().await {
            Ok(list) => list,
            Err(e) => {
                error!(error = %e, "error fetching restaurants");
                Vec::new()
            }
        };
        &self.restaurants
    }

    /// Load categories for the current restaurant and select all of them.
    pub async fn load_categories<A: MenuApi + ?Sized>(&mut self, api: &A) -> &[String] {
        let Some(restaurant) = self.filters.restaurant.clone() else {
            return &self.categories;
        };

        self.categories = match api.categories(&restaurant).await {
            Ok(list) => list,
            Err(e) => {
                error!(error = %e, %restaurant, "error fetching categories");
                Vec::new()
            }
        };
        self.filters.select_categories(self.categories.clone());
        &self.categories
    }

    // Fetching

    fn next_seq(&mut self) -> u64 {
        self.latest_seq += 1;
        self.latest_seq
    }

    /// Issue a plain item fetch carrying the full filter state.
    pub fn begin_items_fetch(&mut self) -> FetchTicket {
        let query = ItemQuery {
            restaurant: self.filters.restaurant.clone(),
            categories: self.filters.selected_categories().to_vec(),
            ranges: self.filters.active_ranges(),
            count: self.item_count,
        };
        let seq = self.next_seq();
        debug!(seq, ?query, "issuing item fetch");
        FetchTicket {
            seq,
            request: FetchRequest::Items(query),
        }
    }

    /// Issue a combo fetch against a budget computed right now.
    pub fn begin_combo_fetch(&mut self) -> FetchTicket {
        let query = ComboQuery {
            restaurant: self.filters.restaurant.clone(),
            categories: self.filters.selected_categories().to_vec(),
            budget: self.fresh_budget(),
            count: self.combo_count,
        };
        let seq = self.next_seq();
        debug!(seq, ?query, "issuing combo fetch");
        FetchTicket {
            seq,
            request: FetchRequest::Combo(query),
        }
    }

    /// Apply a fetch outcome. Returns false, changing nothing, if a newer
    /// fetch has been issued since this ticket.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, outcome: Result<Vec<MenuItem>>) -> bool {
        if ticket.seq != self.latest_seq {
            warn!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale fetch response"
            );
            return false;
        }

        match (ticket.request, outcome) {
            (FetchRequest::Items(_), Ok(items)) => {
                debug!(seq = ticket.seq, count = items.len(), "applied item fetch");
                self.fetched = items;
            }
            (FetchRequest::Combo(query), Ok(items)) => {
                debug!(seq = ticket.seq, count = items.len(), "applied combo fetch");
                let mut combined = self.pins.expanded();
                combined.extend(items);
                self.fetched = combined;
                // Pins or filters edited while in flight make the request's budget stale.
                if self.mode == Mode::Combo && self.fresh_budget() == query.budget {
                    self.remaining = query.budget;
                } else {
                    self.recompute_remaining();
                }
            }
            (_, Err(e)) => {
                error!(seq = ticket.seq, error = %e, "error fetching menu");
                self.fetched = Vec::new();
            }
        }
        self.has_fetched = true;
        true
    }

    async fn run_fetch<A: MenuApi + ?Sized>(&mut self, api: &A, ticket: FetchTicket) -> bool {
        let outcome = match ticket.request() {
            FetchRequest::Items(query) => api.items(query).await,
            FetchRequest::Combo(query) => api.combo(query).await,
        };
        self.complete_fetch(ticket, outcome)
    }

    pub async fn request_items<A: MenuApi + ?Sized>(&mut self, api: &A) -> bool {
        let ticket = self.begin_items_fetch();
        self.run_fetch(api, ticket).await
    }

    pub async fn request_combo<A: MenuApi + ?Sized>(&mut self, api: &A) -> bool {
        let ticket = self.begin_combo_fetch();
        self.run_fetch(api, ticket).await
    }

    /// The fetch that matches the current mode.
    pub async fn fetch<A: MenuApi + ?Sized>(&mut self, api: &A) -> bool {
        match self.mode {
            Mode::Browse => self.request_items(api).await,
            Mode::Combo => self.request_combo(api).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, cal: f64) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            calories: cal,
            protein: 10.0,
            fat: 5.0,
            carbs: 20.0,
            category: "mains".to_string(),
        }
    }

    fn combo_session() -> ComboSession {
        let mut session = ComboSession::with_counts(20, 3);
        session.set_restaurant("diner");
        session.set_combo_mode(true);
        session
    }

    #[test]
    fn test_pin_requires_combo_mode() {
        let mut session = ComboSession::with_counts(20, 3);
        assert!(matches!(
            session.pin(item("A", 500.0)),
            Err(NycError::PinningDisabled)
        ));
        assert!(session.pins().is_empty());
    }

    #[test]
    fn test_panel_tracks_pins_and_filters() {
        let mut session = combo_session();
        session.activate_macro(Macro::Calories);
        session.set_max(Macro::Calories, Some(1200.0)).unwrap();
        assert!(session.remaining_macros().is_empty());

        session.pin(item("A", 500.0)).unwrap();
        assert_eq!(session.remaining_macros().get(Macro::Calories), Some(700.0));

        session.set_max(Macro::Calories, Some(2000.0)).unwrap();
        assert_eq!(session.remaining_macros().get(Macro::Calories), Some(1500.0));

        session.toggle_macro(Macro::Calories);
        assert!(session.remaining_macros().is_empty());

        session.toggle_macro(Macro::Calories);
        session.unpin("A");
        assert!(session.remaining_macros().is_empty());
    }

    #[test]
    fn test_leaving_combo_clears_pins_and_panel() {
        let mut session = combo_session();
        session.activate_macro(Macro::Protein);
        session.set_max(Macro::Protein, Some(100.0)).unwrap();
        session.pin(item("A", 500.0)).unwrap();
        session.pin(item("B", 300.0)).unwrap();
        assert!(!session.remaining_macros().is_empty());

        assert_eq!(session.toggle_combo_mode(), Mode::Browse);
        assert!(session.pins().is_empty());
        assert!(session.remaining_macros().is_empty());
    }

    #[test]
    fn test_stale_ticket_discarded() {
        let mut session = ComboSession::with_counts(20, 3);
        session.set_restaurant("diner");

        let first = session.begin_items_fetch();
        let second = session.begin_items_fetch();
        assert!(second.seq() > first.seq());

        assert!(session.complete_fetch(second, Ok(vec![item("New", 1.0)])));
        assert!(!session.complete_fetch(first, Ok(vec![item("Old", 1.0)])));
        assert_eq!(session.fetched_items()[0].name, "New");
    }

    #[test]
    fn test_stale_failure_does_not_clear() {
        let mut session = ComboSession::with_counts(20, 3);
        let first = session.begin_items_fetch();
        let second = session.begin_items_fetch();
        assert!(session.complete_fetch(second, Ok(vec![item("Kept", 1.0)])));
        assert!(!session.complete_fetch(first, Err(NycError::InvalidInput("down".into()))));
        assert_eq!(session.fetched_items().len(), 1);
    }

    #[test]
    fn test_restaurant_switch_fences_in_flight() {
        let mut session = ComboSession::with_counts(20, 3);
        session.set_restaurant("diner");
        let ticket = session.begin_items_fetch();
        session.set_restaurant("taqueria");
        assert!(!session.complete_fetch(ticket, Ok(vec![item("A", 1.0)])));
        assert!(!session.has_fetched());
    }

    #[test]
    fn test_combo_off_fences_in_flight_combo() {
        let mut session = combo_session();
        session.activate_macro(Macro::Calories);
        session.set_max(Macro::Calories, Some(800.0)).unwrap();
        session.pin(item("A", 500.0)).unwrap();
        let ticket = session.begin_combo_fetch();

        session.set_combo_mode(false);
        assert!(!session.complete_fetch(ticket, Ok(vec![item("S", 100.0)])));
        assert_eq!(session.mode(), Mode::Browse);
        assert!(session.remaining_macros().is_empty());
        assert!(session.fetched_items().is_empty());
    }

    #[test]
    fn test_unpin_during_combo_fetch_keeps_panel_fresh() {
        let mut session = combo_session();
        session.activate_macro(Macro::Calories);
        session.set_max(Macro::Calories, Some(800.0)).unwrap();
        session.pin(item("A", 500.0)).unwrap();
        let ticket = session.begin_combo_fetch();

        session.unpin("A");
        assert!(session.complete_fetch(ticket, Ok(vec![item("S", 100.0)])));
        assert!(session.pins().is_empty());
        assert!(session.remaining_macros().is_empty());
    }

    #[test]
    fn test_pin_count_change_during_combo_fetch_recomputes() {
        let mut session = combo_session();
        session.activate_macro(Macro::Calories);
        session.set_max(Macro::Calories, Some(1200.0)).unwrap();
        session.pin(item("A", 500.0)).unwrap();
        let ticket = session.begin_combo_fetch();

        session.set_pin_count("A", 2);
        assert!(session.complete_fetch(ticket, Ok(vec![item("S", 100.0)])));
        assert_eq!(session.remaining_macros().get(Macro::Calories), Some(200.0));
    }

    #[test]
    fn test_failure_sets_has_fetched() {
        let mut session = ComboSession::with_counts(20, 3);
        let ticket = session.begin_items_fetch();
        assert!(session.complete_fetch(ticket, Err(NycError::InvalidInput("down".into()))));
        assert!(session.has_fetched());
        assert!(session.fetched_items().is_empty());
    }
}
