//! # Terminal Shell
//!
//! Line-oriented front-end over the command layer. One line in, one
//! command out.
//!
//! ## Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  > menu                       list categories and their products        │
//! │  > add burger 2 +bacon -- no pickles                                    │
//! │  > mode pickup                                                          │
//! │  > discount 2.50                                                        │
//! │  > cart                                                                 │
//! │    #1  2 x Classic Burger    $12.50   $25.00                            │
//! │        + bacon                                                          │
//! │        note: no pickles                                                 │
//! │    ...                                                                  │
//! │  > checkout                   prompts for name, phone, address, notes   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing is separate from execution so it can be tested without I/O.

use std::fmt::Write as _;
use std::io;

use storefront_core::{FulfillmentMode, LineId, Money};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{debug, info};

use crate::commands::cart::{self as cart_cmd, AddToCartRequest, CartResponse};
use crate::commands::catalog as catalog_cmd;
use crate::commands::checkout::checkout;
use crate::error::ApiError;
use crate::submission::CheckoutDetails;
use crate::App;

const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  menu [category]                 list categories, or one category's products
  search <text>                   search product names and descriptions
  add <product> [qty] [+extra]... [-- note]
                                  add a product (use _ for spaces in extras)
  qty <line> <n>                  set a line's quantity
  inc <line> | dec <line>         step a line's quantity
  rm <line>                       remove a line
  mode delivery|pickup|dinein     choose fulfillment
  discount <amount>               manual discount, e.g. 2.50 (0 clears)
  cart                            show the cart
  clear                           empty the cart
  checkout                        place the order
  help                            this text
  quit                            leave
";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Menu(Option<String>),
    Search(String),
    Add(AddToCartRequest),
    Quantity { line: LineId, quantity: i64 },
    Increment(LineId),
    Decrement(LineId),
    Remove(LineId),
    Mode(String),
    Discount(Money),
    Cart,
    Clear,
    Checkout,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command '{0}', type 'help'")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not an amount")]
    NotAnAmount(String),
}

impl ShellCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<ShellCommand>, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "menu" => ShellCommand::Menu(Some(rest.to_string()).filter(|c| !c.is_empty())),
            "search" => ShellCommand::Search(rest.to_string()),
            "add" => ShellCommand::Add(parse_add(rest)?),
            "qty" => {
                let mut args = rest.split_whitespace();
                match (args.next(), args.next(), args.next()) {
                    (Some(line), Some(quantity), None) => ShellCommand::Quantity {
                        line: parse_line_id(line)?,
                        quantity: parse_number(quantity)?,
                    },
                    _ => return Err(ParseError::Usage("qty <line> <n>")),
                }
            }
            "inc" => ShellCommand::Increment(single_line_arg(rest, "inc <line>")?),
            "dec" => ShellCommand::Decrement(single_line_arg(rest, "dec <line>")?),
            "rm" => ShellCommand::Remove(single_line_arg(rest, "rm <line>")?),
            "mode" if !rest.is_empty() => ShellCommand::Mode(rest.to_string()),
            "mode" => return Err(ParseError::Usage("mode delivery|pickup|dinein")),
            "discount" if !rest.is_empty() => ShellCommand::Discount(parse_amount(rest)?),
            "discount" => return Err(ParseError::Usage("discount <amount>")),
            "cart" => ShellCommand::Cart,
            "clear" => ShellCommand::Clear,
            "checkout" => ShellCommand::Checkout,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// `<product> [qty] [+extra]... [-- note]`
fn parse_add(args: &str) -> Result<AddToCartRequest, ParseError> {
    const USAGE: &str = "add <product> [qty] [+extra]... [-- note]";

    let (args, note) = match args.split_once("--") {
        Some((args, note)) => (args, Some(note.trim().to_string()).filter(|n| !n.is_empty())),
        None => (args, None),
    };

    let mut tokens = args.split_whitespace();
    let product_id = tokens.next().ok_or(ParseError::Usage(USAGE))?;

    let mut request = AddToCartRequest::new(product_id);
    request.note = note;

    for token in tokens {
        if let Some(extra) = token.strip_prefix('+') {
            request.extras.push(extra.replace('_', " "));
        } else if request.quantity.is_none() && request.extras.is_empty() {
            request.quantity = Some(parse_number(token)?);
        } else {
            return Err(ParseError::Usage(USAGE));
        }
    }

    Ok(request)
}

fn single_line_arg(args: &str, usage: &'static str) -> Result<LineId, ParseError> {
    let mut tokens = args.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(line), None) => parse_line_id(line),
        _ => Err(ParseError::Usage(usage)),
    }
}

/// Accepts `3` or `#3`.
fn parse_line_id(token: &str) -> Result<LineId, ParseError> {
    let digits = token.strip_prefix('#').unwrap_or(token);
    digits
        .parse()
        .map(LineId::from_raw)
        .map_err(|_| ParseError::NotANumber(token.to_string()))
}

fn parse_number(token: &str) -> Result<i64, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::NotANumber(token.to_string()))
}

/// Parses `5`, `5.5` or `5.50` as major units with up to two decimals.
/// A leading `-` is accepted so the cart can report the rejection.
fn parse_amount(token: &str) -> Result<Money, ParseError> {
    let invalid = || ParseError::NotAnAmount(token.to_string());

    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);

    let (major, minor) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if major.is_empty() || minor.len() > 2 {
        return Err(invalid());
    }
    if !major.bytes().chain(minor.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let major: i64 = major.parse().map_err(|_| invalid())?;
    let minor: i64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => minor.parse().map_err(|_| invalid())?,
    };

    let cents = major
        .checked_mul(100)
        .and_then(|c| c.checked_add(minor))
        .ok_or_else(invalid)?;

    Ok(Money::from_cents(if negative { -cents } else { cents }))
}

// =============================================================================
// Execution
// =============================================================================

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs the shell until `quit` or end of input.
pub async fn run<R, W>(app: &App, input: R, mut output: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    let banner = format!(
        "Welcome to {}. Type 'help' for commands.\n",
        app.config.store_name
    );
    write_out(&mut output, &banner).await?;

    loop {
        write_out(&mut output, PROMPT).await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                write_out(&mut output, &format!("{}\n", err)).await?;
                continue;
            }
        };

        debug!(?command, "Shell command");
        if execute(app, command, &mut lines, &mut output).await? == Flow::Quit {
            break;
        }
    }

    info!("Shell session ended");
    Ok(())
}

async fn execute<R, W>(
    app: &App,
    command: ShellCommand,
    lines: &mut Lines<R>,
    output: &mut W,
) -> io::Result<Flow>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let catalog = app.catalog.as_ref();
    let cart = &app.cart;

    let text = match command {
        ShellCommand::Menu(category) => render_result(menu(app, category.as_deref()).await),
        ShellCommand::Search(query) => render_result(
            catalog_cmd::search_products(catalog, &query)
                .await
                .map(|hits| render_products(app, &hits)),
        ),
        ShellCommand::Add(request) => {
            render_cart_result(app, cart_cmd::add_to_cart(catalog, cart, request).await)
        }
        ShellCommand::Quantity { line, quantity } => {
            render_cart_result(app, cart_cmd::update_cart_line(cart, line, quantity))
        }
        ShellCommand::Increment(line) => {
            render_cart_result(app, cart_cmd::increment_line(cart, line))
        }
        ShellCommand::Decrement(line) => {
            render_cart_result(app, cart_cmd::decrement_line(cart, line))
        }
        ShellCommand::Remove(line) => {
            render_cart_result(app, cart_cmd::remove_from_cart(cart, line))
        }
        ShellCommand::Mode(mode) => {
            render_cart_result(app, cart_cmd::set_fulfillment_mode(cart, &mode))
        }
        ShellCommand::Discount(amount) => {
            render_cart_result(app, cart_cmd::set_discount(cart, amount.cents()))
        }
        ShellCommand::Cart => render_cart(app, &cart_cmd::get_cart(cart)),
        ShellCommand::Clear => render_cart(app, &cart_cmd::clear_cart(cart)),
        ShellCommand::Checkout => match checkout_flow(app, lines, output).await? {
            Some(text) => text,
            None => {
                write_out(output, "\nCheckout cancelled.\n").await?;
                return Ok(Flow::Quit);
            }
        },
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => {
            write_out(output, "Bye.\n").await?;
            return Ok(Flow::Quit);
        }
    };

    write_out(output, &text).await?;
    Ok(Flow::Continue)
}

async fn menu(app: &App, category: Option<&str>) -> Result<String, ApiError> {
    let catalog = app.catalog.as_ref();

    if let Some(category) = category {
        let products = catalog_cmd::list_products(catalog, category).await?;
        return Ok(render_products(app, &products));
    }

    let mut out = String::new();
    for category in catalog_cmd::list_categories(catalog).await? {
        let products = catalog_cmd::list_products(catalog, &category.id).await?;
        let _ = writeln!(out, "{} ({})", category.name, category.id);
        out.push_str(&render_products(app, &products));
    }
    Ok(out)
}

/// Prompts for the checkout form, then places the order.
///
/// Returns `None` when input ends mid-form.
async fn checkout_flow<R, W>(
    app: &App,
    lines: &mut Lines<R>,
    output: &mut W,
) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if app.cart.with_cart(|c| c.is_empty()) {
        return Ok(Some("Cart is empty\n".to_string()));
    }

    let mode = app.cart.with_cart(|c| c.fulfillment_mode());

    let Some(name) = prompt(lines, output, "Name: ").await? else {
        return Ok(None);
    };
    let Some(phone) = prompt(lines, output, "Phone: ").await? else {
        return Ok(None);
    };
    let address = if mode == FulfillmentMode::Delivery {
        let Some(address) = prompt(lines, output, "Delivery address: ").await? else {
            return Ok(None);
        };
        Some(address)
    } else {
        None
    };
    let Some(notes) = prompt(lines, output, "Notes (optional): ").await? else {
        return Ok(None);
    };

    write_out(output, "Placing order...\n").await?;

    let details = CheckoutDetails {
        name,
        phone,
        address,
        notes: Some(notes),
    };

    let text = match checkout(&app.cart, app.submitter.as_ref(), details).await {
        Ok(response) => format!(
            "Order {} placed: {} for {}. Ready in about {} minutes.\n",
            response.reference,
            app.config.format_currency(response.total),
            response.fulfillment_mode,
            response.estimated_minutes
        ),
        Err(err) => format!("{}\n", err.message),
    };

    Ok(Some(text))
}

async fn prompt<R, W>(
    lines: &mut Lines<R>,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_out(output, label).await?;
    lines.next_line().await
}

async fn write_out<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}

// =============================================================================
// Rendering
// =============================================================================

fn render_result(result: Result<String, ApiError>) -> String {
    result.unwrap_or_else(|err| format!("{}\n", err.message))
}

fn render_cart_result(app: &App, result: Result<CartResponse, ApiError>) -> String {
    match result {
        Ok(response) => render_cart(app, &response),
        Err(err) => format!("{}\n", err.message),
    }
}

fn render_products(app: &App, products: &[crate::catalog::CatalogProduct]) -> String {
    if products.is_empty() {
        return "  (nothing found)\n".to_string();
    }

    let mut out = String::new();
    for product in products {
        let _ = write!(
            out,
            "  {:<12} {:<24} {:>9}",
            product.id,
            product.name,
            app.config.format_currency(product.unit_price)
        );
        if let Some(original) = product.discount.as_ref().and_then(|d| d.original_price) {
            let _ = write!(out, "  (was {})", app.config.format_currency(original));
        }
        if !product.available_extras.is_empty() {
            let _ = write!(out, "  extras: {}", product.available_extras.join(", "));
        }
        out.push('\n');
    }
    out
}

/// Renders the cart with its pricing block.
pub fn render_cart(app: &App, cart: &CartResponse) -> String {
    let money = |amount: Money| app.config.format_currency(amount);
    let pricing = &cart.pricing;

    let mut out = String::new();
    let _ = writeln!(out, "Cart ({})", cart.fulfillment_mode);

    if cart.lines.is_empty() {
        out.push_str("  (empty)\n");
    }
    for line in &cart.lines {
        let _ = writeln!(
            out,
            "  {:<4} {} x {:<20} {:>9} {:>10}",
            line.id.to_string(),
            line.quantity,
            line.product.name,
            money(line.product.unit_price),
            money(line.line_total())
        );
        for extra in &line.selected_extras {
            let _ = writeln!(out, "       + {}", extra);
        }
        if let Some(note) = &line.note {
            let _ = writeln!(out, "       note: {}", note);
        }
    }

    let _ = writeln!(out, "  Items:    {}", pricing.item_count);
    let _ = writeln!(out, "  Subtotal: {}", money(pricing.subtotal));
    if cart.fulfillment_mode.charges_delivery_fee() {
        let _ = writeln!(out, "  Delivery: {}", money(pricing.delivery_fee));
    }
    if !pricing.discount.is_zero() {
        let _ = writeln!(out, "  Discount: -{}", money(pricing.discount));
    }
    let _ = writeln!(out, "  Total:    {}", money(pricing.total));
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::BufReader;

    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::state::StoreConfig;
    use crate::submission::SimulatedSubmitter;

    fn app() -> App {
        App::new(
            StoreConfig::default(),
            Arc::new(InMemoryCatalog::demo()),
            Arc::new(SimulatedSubmitter::new(Duration::ZERO)),
        )
    }

    async fn session(app: &App, input: &str) -> String {
        let mut output = Vec::new();
        run(app, BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(ShellCommand::parse("   "), Ok(None));
        assert_eq!(ShellCommand::parse("CART"), Ok(Some(ShellCommand::Cart)));
        assert_eq!(ShellCommand::parse("exit"), Ok(Some(ShellCommand::Quit)));
        assert_eq!(ShellCommand::parse("menu"), Ok(Some(ShellCommand::Menu(None))));
        assert_eq!(
            ShellCommand::parse("menu drinks"),
            Ok(Some(ShellCommand::Menu(Some("drinks".to_string()))))
        );
        assert_eq!(
            ShellCommand::parse("search extra cheese"),
            Ok(Some(ShellCommand::Search("extra cheese".to_string())))
        );
        assert_eq!(
            ShellCommand::parse("dance"),
            Err(ParseError::Unknown("dance".to_string()))
        );
    }

    #[test]
    fn test_parse_add() {
        let parsed = ShellCommand::parse("add burger 2 +bacon +extra_cheese -- no pickles");
        let Ok(Some(ShellCommand::Add(request))) = parsed else {
            panic!("expected add, got {:?}", parsed);
        };
        assert_eq!(request.product_id, "burger");
        assert_eq!(request.quantity, Some(2));
        assert_eq!(request.extras, vec!["bacon", "extra cheese"]);
        assert_eq!(request.note.as_deref(), Some("no pickles"));

        let parsed = ShellCommand::parse("add cola");
        assert_eq!(parsed, Ok(Some(ShellCommand::Add(AddToCartRequest::new("cola")))));

        assert!(matches!(ShellCommand::parse("add"), Err(ParseError::Usage(_))));
        assert_eq!(
            ShellCommand::parse("add cola two"),
            Err(ParseError::NotANumber("two".to_string()))
        );
    }

    #[test]
    fn test_parse_line_commands() {
        assert_eq!(
            ShellCommand::parse("qty #2 5"),
            Ok(Some(ShellCommand::Quantity {
                line: LineId::from_raw(2),
                quantity: 5
            }))
        );
        assert_eq!(
            ShellCommand::parse("qty 2 0"),
            Ok(Some(ShellCommand::Quantity {
                line: LineId::from_raw(2),
                quantity: 0
            }))
        );
        assert_eq!(
            ShellCommand::parse("rm 7"),
            Ok(Some(ShellCommand::Remove(LineId::from_raw(7))))
        );
        assert!(matches!(ShellCommand::parse("inc"), Err(ParseError::Usage(_))));
        assert!(matches!(ShellCommand::parse("dec 1 2"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!(parse_amount("5"), Ok(Money::from_cents(500)));
        assert_eq!(parse_amount("5.5"), Ok(Money::from_cents(550)));
        assert_eq!(parse_amount("$2.05"), Ok(Money::from_cents(205)));
        assert_eq!(parse_amount("-1.00"), Ok(Money::from_cents(-100)));
        assert!(parse_amount("1.234").is_err());
        assert!(parse_amount(".5").is_err());
        assert!(parse_amount("lots").is_err());
    }

    #[tokio::test]
    async fn test_session_builds_cart_with_negative_total() {
        let app = app();
        let output = session(&app, "add salad\nmode pickup\ndiscount 10\ncart\nquit\n").await;

        assert!(output.starts_with("Welcome to Storefront Dev Kitchen."));
        assert!(output.contains("Cart (pickup)"));
        assert!(output.contains("Subtotal: $5.00"));
        assert!(output.contains("Discount: -$10.00"));
        assert!(output.contains("Total:    -$5.00"));
        assert!(output.ends_with("Bye.\n"));
    }

    #[tokio::test]
    async fn test_session_reports_errors_and_keeps_going() {
        let app = app();
        let output = session(&app, "add sushi\nqty 1 3\nfly\nadd cola\n").await;

        assert!(output.contains("Product not found: sushi"));
        assert!(output.contains("Cart line not found: #1"));
        assert!(output.contains("Unknown command 'fly'"));
        assert_eq!(app.cart.with_cart(|c| c.len()), 1);
    }

    #[tokio::test]
    async fn test_session_checkout_delivery() {
        let app = app();
        let input = "add pizza\ncheckout\nAda\n555-0100\n12 Analytical Way\n\nquit\n";
        let output = session(&app, input).await;

        assert!(output.contains("Delivery address: "));
        assert!(output.contains("placed: $30.00 for delivery"));
        assert!(app.cart.with_cart(|c| c.is_empty()));
    }

    #[tokio::test]
    async fn test_session_checkout_validation_keeps_cart() {
        let app = app();
        let input = "add pizza\nmode dinein\ncheckout\n\n555-0100\n\nquit\n";
        let output = session(&app, input).await;

        assert!(!output.contains("Delivery address: "));
        assert!(output.contains("name is required"));
        assert_eq!(app.cart.with_cart(|c| c.len()), 1);
    }

    #[tokio::test]
    async fn test_checkout_cancelled_at_end_of_input() {
        let app = app();
        let output = session(&app, "add cola\ncheckout\nAda\n").await;

        assert!(output.contains("Checkout cancelled."));
        assert_eq!(app.cart.with_cart(|c| c.len()), 1);
    }

    #[tokio::test]
    async fn test_menu_lists_every_category() {
        let app = app();
        let output = session(&app, "menu\nmenu desserts\n").await;

        assert!(output.contains("Mains (mains)"));
        assert!(output.contains("Drinks (drinks)"));
        assert!(output.contains("(was $5.50)"));
        assert!(output.contains("Category not found: desserts"));
    }
}
