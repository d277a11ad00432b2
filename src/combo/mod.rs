pub mod ledger;
pub mod merge;
pub mod pins;

pub use ledger::{current_macros, remaining_budget, MacroBudget, MacroTotals};
pub use merge::merge_display_list;
pub use pins::{PinRegistry, PinnedEntry};
