use clap::{Args, Parser, Subcommand};

use crate::models::Macro;

/// Name Your Calories — filter restaurant menus by macros and build combos that fit a budget.
#[derive(Parser, Debug)]
#[command(name = "name_your_calories")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Menu service base URL (overrides the config file).
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List restaurants known to the menu service.
    Restaurants,

    /// List categories for a restaurant.
    Categories {
        /// Restaurant name.
        restaurant: String,
    },

    /// Fetch menu items matching the filters.
    Browse(MenuArgs),

    /// Pin items and fill the remaining macro budget with suggestions.
    Combo {
        #[command(flatten)]
        menu: MenuArgs,

        /// Item to pin, optionally with a count: "Fries x2". Repeatable.
        #[arg(long = "pin", value_name = "NAME[xN]")]
        pins: Vec<String>,
    },

    /// Interactive session (default).
    Interactive,
}

impl Default for Command {
    fn default() -> Self {
        Command::Interactive
    }
}

/// Filters shared by `browse` and `combo`.
#[derive(Args, Debug, Clone)]
pub struct MenuArgs {
    /// Restaurant name.
    #[arg(short, long)]
    pub restaurant: String,

    /// Category to include. Repeatable; all categories when omitted.
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Lower bound, e.g. "protein=20". Repeatable.
    #[arg(long = "min", value_name = "MACRO=VALUE", value_parser = parse_macro_bound)]
    pub mins: Vec<(Macro, f64)>,

    /// Upper bound, e.g. "calories=800". Repeatable.
    #[arg(long = "max", value_name = "MACRO=VALUE", value_parser = parse_macro_bound)]
    pub maxes: Vec<(Macro, f64)>,

    /// Filter on a macro without giving a bound. Repeatable.
    #[arg(long = "filter", value_name = "MACRO", value_parser = parse_macro)]
    pub filters: Vec<Macro>,
}

fn parse_macro(s: &str) -> Result<Macro, String> {
    Macro::parse(s).ok_or_else(|| {
        format!(
            "unknown macro '{}' (expected calories, protein, fat or carbs)",
            s
        )
    })
}

/// Parse `MACRO=VALUE`.
pub fn parse_macro_bound(s: &str) -> Result<(Macro, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected MACRO=VALUE, got '{}'", s))?;
    let m = parse_macro(name)?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{}'", value))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} bound must be non-negative", m));
    }
    Ok((m, value))
}
