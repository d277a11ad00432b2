use clap::Parser;
use tracing::{info, warn};

use name_your_calories_rs::api::{HttpMenuApi, ItemQuery, MenuApi};
use name_your_calories_rs::cli::{Cli, Command, MenuArgs};
use name_your_calories_rs::config::Settings;
use name_your_calories_rs::error::{NycError, Result};
use name_your_calories_rs::interface::{
    display_names, display_session, parse_pin_spec, prompt_action, prompt_bound,
    prompt_categories, prompt_count, prompt_item, prompt_macro, prompt_restaurant, prompt_yes_no,
    resolve_name, Action,
};
use name_your_calories_rs::logging;
use name_your_calories_rs::models::MenuItem;
use name_your_calories_rs::session::{ComboSession, Mode};

/// Count hint when loading a restaurant's full menu to resolve pin names.
const CATALOG_COUNT: usize = 500;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut settings = Settings::new()?;
    if let Some(url) = cli.server_url {
        settings.server_url = url;
        settings.validate()?;
    }
    info!(server_url = %settings.server_url, "configuration loaded");

    let api = HttpMenuApi::new(&settings)?;
    let mut session = ComboSession::new(&settings);

    match cli.command.unwrap_or_default() {
        Command::Restaurants => cmd_restaurants(&api, &mut session).await,
        Command::Categories { restaurant } => cmd_categories(&api, &mut session, &restaurant).await,
        Command::Browse(menu) => cmd_browse(&api, &mut session, &menu).await,
        Command::Combo { menu, pins } => cmd_combo(&api, &mut session, &menu, &pins).await,
        Command::Interactive => cmd_interactive(&api, &mut session).await,
    }
}

/// List restaurants.
async fn cmd_restaurants(api: &HttpMenuApi, session: &mut ComboSession) -> Result<()> {
    let restaurants = session.load_restaurants(api).await;
    display_names(restaurants, "Restaurants");
    Ok(())
}

/// List categories for one restaurant.
async fn cmd_categories(
    api: &HttpMenuApi,
    session: &mut ComboSession,
    restaurant: &str,
) -> Result<()> {
    select_restaurant(api, session, restaurant).await;
    let categories = session.load_categories(api).await;
    display_names(categories, "Categories");
    Ok(())
}

/// One filtered item fetch.
async fn cmd_browse(api: &HttpMenuApi, session: &mut ComboSession, menu: &MenuArgs) -> Result<()> {
    apply_menu_args(api, session, menu).await?;
    session.request_items(api).await;
    display_session(session);
    Ok(())
}

/// Pin the named items, then fetch a combo for the remaining budget.
async fn cmd_combo(
    api: &HttpMenuApi,
    session: &mut ComboSession,
    menu: &MenuArgs,
    pin_specs: &[String],
) -> Result<()> {
    apply_menu_args(api, session, menu).await?;
    session.set_combo_mode(true);

    if !pin_specs.is_empty() {
        let catalog = load_catalog(api, session).await;
        let names: Vec<&str> = catalog.iter().map(|i| i.name.as_str()).collect();

        for spec in pin_specs {
            let (wanted, count) = parse_pin_spec(spec);
            let name = resolve_name(&wanted, &names)
                .ok_or_else(|| NycError::ItemNotFound(wanted.clone()))?;
            let item = catalog
                .iter()
                .find(|i| i.name == name)
                .cloned()
                .ok_or_else(|| NycError::ItemNotFound(name.to_string()))?;

            session.pin(item)?;
            session.set_pin_count(name, i64::from(count));
            println!("Pinned: {} x{}", name, count);
        }
    }

    session.request_combo(api).await;
    display_session(session);
    Ok(())
}

/// Interactive loop over the session operations.
async fn cmd_interactive(api: &HttpMenuApi, session: &mut ComboSession) -> Result<()> {
    println!("welcome to Name Your Calories!");
    println!();

    if !choose_restaurant(api, session).await? {
        println!("No restaurants available.");
        return Ok(());
    }

    loop {
        display_session(session);

        match prompt_action(session.mode())? {
            Action::GetItems => {
                session.fetch(api).await;
            }
            Action::ToggleCombo => {
                let mode = session.toggle_combo_mode();
                println!(
                    "Combo mode {}.",
                    if mode == Mode::Combo { "on" } else { "off" }
                );
            }
            Action::EditMacros => {
                let m = prompt_macro(|m| session.filters().is_active(m))?;
                let active = session.toggle_macro(m);
                if active {
                    let range = session.filters().range(m);
                    let min = prompt_bound(&format!("min {}", m), range.min)?;
                    let max = prompt_bound(&format!("max {}", m), range.max)?;
                    session.set_min(m, min)?;
                    session.set_max(m, max)?;
                }
            }
            Action::EditCategories => {
                let all = session.categories().to_vec();
                let chosen = prompt_categories(&all, session.filters().selected_categories())?;
                session.select_categories(chosen);
            }
            Action::Pin => {
                let candidates = session.display_list();
                if let Some(item) = prompt_item(&candidates, "Pin which item?")? {
                    let count = session.pin(item.clone())?;
                    println!("Pinned: {} x{}", item.name, count);
                } else {
                    println!("Nothing to pin yet. Get a combo first.");
                }
            }
            Action::SetPinCount => {
                let pinned: Vec<MenuItem> =
                    session.pins().entries().iter().map(|e| e.item.clone()).collect();
                if let Some(item) = prompt_item(&pinned, "Change which pin?")? {
                    let current = session.pins().get(&item.name).map_or(1, |e| e.count);
                    let count = prompt_count(current)?;
                    session.set_pin_count(&item.name, count);
                }
            }
            Action::Unpin => {
                let pinned: Vec<MenuItem> =
                    session.pins().entries().iter().map(|e| e.item.clone()).collect();
                if let Some(item) = prompt_item(&pinned, "Remove which pin?")? {
                    session.unpin(&item.name);
                }
            }
            Action::ChangeRestaurant => {
                if session.mode() == Mode::Combo
                    && !session.pins().is_empty()
                    && !prompt_yes_no("Changing restaurant drops your pins. Continue?", false)?
                {
                    continue;
                }
                choose_restaurant(api, session).await?;
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

async fn choose_restaurant(api: &HttpMenuApi, session: &mut ComboSession) -> Result<bool> {
    let restaurants = session.load_restaurants(api).await.to_vec();
    let Some(restaurant) = prompt_restaurant(&restaurants)? else {
        return Ok(false);
    };
    session.set_restaurant(&restaurant);
    session.load_categories(api).await;
    Ok(true)
}

/// Resolve a typed restaurant name against the service's list and select it.
async fn select_restaurant(api: &HttpMenuApi, session: &mut ComboSession, input: &str) {
    let restaurants = session.load_restaurants(api).await.to_vec();
    let restaurant = match resolve_name(input, &restaurants) {
        Some(name) => name.to_string(),
        None => {
            warn!(restaurant = %input, "restaurant not in service list, using as typed");
            input.to_string()
        }
    };
    session.set_restaurant(&restaurant);
}

async fn apply_menu_args(
    api: &HttpMenuApi,
    session: &mut ComboSession,
    menu: &MenuArgs,
) -> Result<()> {
    select_restaurant(api, session, &menu.restaurant).await;
    let categories = session.load_categories(api).await.to_vec();

    if !menu.categories.is_empty() {
        let mut chosen = Vec::new();
        for wanted in &menu.categories {
            match resolve_name(wanted, &categories) {
                Some(name) => chosen.push(name.to_string()),
                None => warn!(category = %wanted, "unknown category, skipping"),
            }
        }
        session.select_categories(chosen);
    }

    for m in &menu.filters {
        session.activate_macro(*m);
    }
    for (m, min) in &menu.mins {
        session.activate_macro(*m);
        session.set_min(*m, Some(*min))?;
    }
    for (m, max) in &menu.maxes {
        session.activate_macro(*m);
        session.set_max(*m, Some(*max))?;
    }
    Ok(())
}

/// Every item on the restaurant's menu in the selected categories, unfiltered by macros.
async fn load_catalog(api: &HttpMenuApi, session: &ComboSession) -> Vec<MenuItem> {
    let query = ItemQuery {
        restaurant: session.filters().restaurant.clone(),
        categories: session.filters().selected_categories().to_vec(),
        ranges: Vec::new(),
        count: CATALOG_COUNT,
    };
    match api.items(&query).await {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "could not load menu to resolve pins");
            Vec::new()
        }
    }
}
