// storefront_app/src/commands/mod.rs

// Declare command modules
pub mod cart_commands;
pub mod checkout_commands;
pub mod product_commands;

use crate::errors::{AppError, Result as AppResult};
use crate::state::AppState;
use std::str::FromStr;
use storefront::Decimal;

pub const USAGE: &str = "\
usage: storefront_app <command> [args]

  products                 list the catalog
  search <query>           search name, description and category
  category <name>          list one category
  categories               list categories
  show <product-id>        show one product
  add <product-id> [qty]   add to cart (qty defaults to 1)
  set <item-id> <qty>      set a cart line's quantity; 0 or less removes it
  remove <item-id>         remove a cart line
  cart                     show the cart and its totals
  clear                    empty the cart
  checkout                 place a mock order";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Products,
  Search(String),
  Category(String),
  Categories,
  Show(u64),
  Add { product_id: u64, quantity: u32 },
  Set { item_id: u64, quantity: i64 },
  Remove(u64),
  Cart,
  Clear,
  Checkout,
}

impl Command {
  pub fn parse(args: &[String]) -> AppResult<Self> {
    let (name, rest) = match args.split_first() {
      Some((name, rest)) => (name.as_str(), rest),
      None => return Err(AppError::Usage("missing command".to_string())),
    };

    let command = match name {
      "products" => Command::Products,
      "search" => Command::Search(rest.join(" ")),
      "category" => Command::Category(required(rest, 0, "category name")?.to_string()),
      "categories" => Command::Categories,
      "show" => Command::Show(number(rest, 0, "product id")?),
      "add" => Command::Add {
        product_id: number(rest, 0, "product id")?,
        quantity: match rest.get(1) {
          Some(_) => number(rest, 1, "quantity")?,
          None => 1,
        },
      },
      "set" => Command::Set {
        item_id: number(rest, 0, "item id")?,
        quantity: number(rest, 1, "quantity")?,
      },
      "remove" => Command::Remove(number(rest, 0, "item id")?),
      "cart" => Command::Cart,
      "clear" => Command::Clear,
      "checkout" => Command::Checkout,
      other => return Err(AppError::Usage(format!("unknown command '{}'", other))),
    };
    Ok(command)
  }
}

#[tracing::instrument(name = "command::dispatch", skip(state))]
pub async fn dispatch(state: &AppState, command: Command) -> AppResult<()> {
  match command {
    Command::Products => product_commands::list_products(state),
    Command::Search(query) => product_commands::search(state, &query),
    Command::Category(name) => product_commands::by_category(state, &name),
    Command::Categories => product_commands::categories(state),
    Command::Show(id) => product_commands::show(state, id).await,
    Command::Add { product_id, quantity } => cart_commands::add(state, product_id, quantity).await,
    Command::Set { item_id, quantity } => cart_commands::set_quantity(state, item_id, quantity).await,
    Command::Remove(item_id) => cart_commands::remove(state, item_id).await,
    Command::Cart => cart_commands::show_cart(state),
    Command::Clear => cart_commands::clear(state).await,
    Command::Checkout => checkout_commands::checkout(state).await,
  }
}

fn required<'a>(args: &'a [String], index: usize, what: &str) -> AppResult<&'a str> {
  args
    .get(index)
    .map(String::as_str)
    .ok_or_else(|| AppError::Usage(format!("missing {}", what)))
}

fn number<T: FromStr>(args: &[String], index: usize, what: &str) -> AppResult<T> {
  let raw = required(args, index, what)?;
  raw
    .parse::<T>()
    .map_err(|_| AppError::Usage(format!("invalid {} '{}'", what, raw)))
}

pub(crate) fn money(amount: Decimal) -> String {
  format!("${:.2}", amount)
}
