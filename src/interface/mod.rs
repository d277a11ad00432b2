pub mod lookup;
pub mod prompts;
pub mod render;

pub use lookup::{parse_pin_spec, resolve_name};
pub use prompts::{
    parse_bound, prompt_action, prompt_bound, prompt_categories, prompt_count, prompt_item,
    prompt_macro, prompt_restaurant, prompt_yes_no, Action,
};
pub use render::{display_items, display_names, display_remaining, display_session, display_totals};
