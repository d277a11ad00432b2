pub mod filter;
pub mod menu_item;

pub use filter::{FilterState, MacroRange};
pub use menu_item::{Macro, MenuItem};
