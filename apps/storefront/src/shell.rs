//! # Interactive Shell
//!
//! Reads one command per line, runs it against the [`StorefrontState`],
//! and prints the result.
//!
//! ## Session Example
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Welcome to Yetta Bakery. Type `help` for commands.                     │
//! │  yetta> add seasonal-pie                                                │
//! │  Added Seasonal Fruit Pie (x1).                                         │
//! │  yetta> topping fresh-fruit                                             │
//! │  Fresh Fruit added. Cake price: Ksh. 40.00                              │
//! │  yetta> add-cake                                                        │
//! │  Custom Cake Creation added to cart.                                    │
//! │  yetta> checkout mpesa 254712345678                                     │
//! │  ℹ An Mpesa Express prompt was sent to 254712345678. ...                │
//! │  yetta> confirm                                                         │
//! │  ✓ Order placed successfully! Status: Paid                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each line is split on whitespace and parsed by clap, so `-h` works on
//! every command (`checkout -h`).

use std::io::{self, BufRead, Write};

use clap::{CommandFactory, Parser, Subcommand};
use tracing::debug;
use yetta_core::{CheckoutForm, CheckoutPhase, Favorite, Notice, NoticeKind, Order};

use crate::commands::builder::BuilderResponse;
use crate::commands::cart::CartResponse;
use crate::commands::checkout::CheckoutResponse;
use crate::commands::{account, auth, builder, cart, checkout};
use crate::error::ApiError;
use crate::menu;
use crate::state::StorefrontState;

const PROMPT: &str = "yetta> ";

// =============================================================================
// Line Grammar
// =============================================================================

/// One shell line.
#[derive(Debug, Parser)]
#[command(
    name = "yetta",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Show today's specials
    Menu,
    /// Add a specials item to the cart
    Add { item_id: String },
    /// Remove a cart line completely
    Remove { item_id: String },
    /// Empty the cart
    Clear,
    /// Show the cart
    Cart,
    /// Show the custom cake builder
    Builder,
    /// Pick a cake option: size, base, frosting, filling, or topping
    Select { category: String, option_id: String },
    /// Add or remove a cake topping
    Topping { topping_id: String },
    /// Put the custom cake in the cart
    AddCake,
    /// Pay for the cart
    Checkout {
        #[command(subcommand)]
        method: PayWith,
    },
    /// Confirm the pending Mpesa Express payment
    Confirm,
    /// Show the checkout status
    Status,
    /// Log in with email and password
    Login { email: String, password: String },
    /// Create an account: signup <email> <password> <name...>
    Signup {
        email: String,
        password: String,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Log in with a Google ID-token credential
    Google { credential: String },
    /// Email a password reset link
    ForgotPassword { email: String },
    /// Set a new password with the emailed token
    ResetPassword {
        token: String,
        password: String,
        confirmation: String,
    },
    /// Log out (the cart is kept)
    Logout,
    /// Show who is logged in
    Whoami,
    /// Show order history, newest first
    Orders,
    /// List favorites
    Favorites,
    /// Favorite a specials item or cart line
    Favorite { item_id: String },
    /// Remove a favorite
    Unfavorite { item_id: String },
    /// Show this help
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum PayWith {
    /// Mpesa Express: a PIN prompt is sent to the phone
    Mpesa { phone_number: Option<String> },
    /// Bank transfer
    Bank { bank_account: Option<String> },
}

impl From<PayWith> for CheckoutForm {
    fn from(method: PayWith) -> Self {
        match method {
            PayWith::Mpesa { phone_number } => CheckoutForm::mpesa(phone_number.unwrap_or_default()),
            PayWith::Bank { bank_account } => CheckoutForm::bank(bank_account.unwrap_or_default()),
        }
    }
}

/// Parses one line. `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

// =============================================================================
// Loop
// =============================================================================

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs the shell until `quit` or end of input.
pub async fn run<R: BufRead, W: Write>(state: &StorefrontState, mut input: R, mut out: W) -> io::Result<()> {
    writeln!(
        out,
        "Welcome to {}. Type `help` for commands.",
        state.config.store_name
    )?;
    if let Some(user) = state.auth.user() {
        writeln!(out, "Logged in as {} <{}>.", user.name, user.email)?;
    }

    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                write!(out, "{}", e.render())?;
                continue;
            }
        };

        if execute(state, command, &mut out).await? == Flow::Quit {
            break;
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

/// Runs one command and prints its outcome.
pub async fn execute<W: Write>(state: &StorefrontState, command: ShellCommand, out: &mut W) -> io::Result<Flow> {
    debug!(?command, "Shell command");

    let result: Result<(), ApiError> = match command {
        ShellCommand::Menu => {
            write_menu(state, out)?;
            Ok(())
        }
        ShellCommand::Add { item_id } => match cart::add_to_cart(state, &item_id) {
            Ok(cart) => {
                if let Some(line) = cart.lines.iter().find(|l| l.id == item_id) {
                    writeln!(out, "Added {} (x{}).", line.title, line.quantity)?;
                }
                Ok(())
            }
            Err(e) => Err(e),
        },
        ShellCommand::Remove { item_id } => match cart::remove_from_cart(state, &item_id) {
            Ok(cart) => write_cart(state, &cart, out).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::Clear => {
            cart::clear_cart(state);
            writeln!(out, "Cart cleared.")?;
            Ok(())
        }
        ShellCommand::Cart => {
            write_cart(state, &cart::get_cart(state), out)?;
            Ok(())
        }
        ShellCommand::Builder => {
            write_builder(state, &builder::get_builder(state), out)?;
            Ok(())
        }
        ShellCommand::Select { category, option_id } => {
            match builder::select_option(state, &category, &option_id) {
                Ok(view) => {
                    writeln!(out, "{}", view.description)?;
                    writeln!(out, "Cake price: {}", state.config.format_currency(view.price))?;
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        ShellCommand::Topping { topping_id } => match builder::toggle_topping(state, &topping_id) {
            Ok((selected, view)) => {
                let label = view
                    .spec
                    .toppings
                    .iter()
                    .find(|t| t.id == topping_id)
                    .map(|t| t.label.clone())
                    .unwrap_or_else(|| topping_id.clone());
                let verb = if selected { "added" } else { "removed" };
                writeln!(
                    out,
                    "{} {}. Cake price: {}",
                    label,
                    verb,
                    state.config.format_currency(view.price)
                )?;
                Ok(())
            }
            Err(e) => Err(e),
        },
        ShellCommand::AddCake => {
            let added = builder::add_custom_cake(state);
            writeln!(out, "{} added to cart.", added.line.title)?;
            if let Some(description) = &added.line.description {
                writeln!(out, "  {}", description)?;
            }
            Ok(())
        }
        ShellCommand::Checkout { method } => match checkout::checkout(state, method.into()).await {
            Ok(response) => write_checkout(&response, out).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::Confirm => match checkout::confirm_payment(state) {
            Ok(response) => write_checkout(&response, out).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::Status => {
            write_checkout(&checkout::checkout_status(state), out)?;
            Ok(())
        }
        ShellCommand::Login { email, password } => match auth::login(state, &email, &password).await {
            Ok(session) => writeln!(out, "{}", session.message).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::Signup {
            email,
            password,
            name,
        } => match auth::signup(state, &name.join(" "), &email, &password).await {
            Ok(session) => writeln!(out, "{}", session.message).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::Google { credential } => match auth::google_login(state, &credential).await {
            Ok(session) => writeln!(out, "{}", session.message).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::ForgotPassword { email } => match auth::forgot_password(state, &email).await {
            Ok(message) => writeln!(out, "{}", message).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::ResetPassword {
            token,
            password,
            confirmation,
        } => match auth::reset_password(state, &token, &password, &confirmation).await {
            Ok(message) => writeln!(out, "{}", message).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::Logout => {
            writeln!(out, "{}", auth::logout(state))?;
            Ok(())
        }
        ShellCommand::Whoami => {
            let me = auth::whoami(state);
            match me.user {
                Some(user) => {
                    writeln!(out, "{} <{}>", user.name, user.email)?;
                    if let Some(expires_at) = me.expires_at {
                        writeln!(out, "Session valid until {}", expires_at.format("%Y-%m-%d %H:%M UTC"))?;
                    }
                }
                None => writeln!(out, "Not logged in.")?,
            }
            writeln!(out, "API: {}", me.api_url)?;
            Ok(())
        }
        ShellCommand::Orders => match account::fetch_orders(state).await {
            Ok(orders) => write_orders(state, &orders, out).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::Favorites => match account::fetch_favorites(state).await {
            Ok(favorites) => write_favorites(state, &favorites, out).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::Favorite { item_id } => match account::add_favorite(state, &item_id).await {
            Ok(favorite) => writeln!(out, "Added {} to favorites.", favorite.item_title).map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::Unfavorite { item_id } => match account::remove_favorite(state, &item_id).await {
            Ok(()) => writeln!(out, "Removed from favorites.").map_err(Into::into),
            Err(e) => Err(e),
        },
        ShellCommand::Help => {
            write!(out, "{}", ShellLine::command().render_help())?;
            Ok(())
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    };

    if let Err(e) = result {
        writeln!(out, "✗ {}", e.message)?;
    }
    Ok(Flow::Continue)
}

// =============================================================================
// Rendering
// =============================================================================

fn write_menu<W: Write>(state: &StorefrontState, out: &mut W) -> io::Result<()> {
    writeln!(out, "Today's specials:")?;
    for item in menu::specials() {
        writeln!(
            out,
            "  {:<16} {:<24} {}",
            item.id,
            item.title,
            state.config.format_currency(item.price.unwrap_or_default())
        )?;
    }
    writeln!(
        out,
        "  {:<16} {:<24} from {}",
        "builder",
        yetta_core::configurator::CUSTOM_CAKE_TITLE,
        state.config.format_currency(menu::CUSTOM_CAKE_FROM_PRICE)
    )
}

fn write_cart<W: Write>(state: &StorefrontState, cart: &CartResponse, out: &mut W) -> io::Result<()> {
    if cart.lines.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    for line in &cart.lines {
        writeln!(
            out,
            "  {:>3} x {:<24} {:>14}  [{}]",
            line.quantity,
            line.title,
            state.config.format_currency(line.line_total()),
            line.id
        )?;
        if line.is_custom {
            if let Some(description) = &line.description {
                writeln!(out, "        {}", description)?;
            }
        }
    }
    writeln!(
        out,
        "  {} item(s), total {}",
        cart.summary.item_count,
        state.config.format_currency(cart.summary.total)
    )
}

fn write_builder<W: Write>(state: &StorefrontState, view: &BuilderResponse, out: &mut W) -> io::Result<()> {
    for category in &view.categories {
        writeln!(out, "{}:", category.category)?;
        for option in &category.options {
            let mark = if category.selected.contains(&option.id) { "*" } else { " " };
            writeln!(
                out,
                "  {} {:<20} {:<28} +{}",
                mark,
                option.id,
                option.label,
                state.config.format_currency(option.price)
            )?;
        }
    }
    writeln!(out, "{}", view.description)?;
    writeln!(out, "Cake price: {}", state.config.format_currency(view.price))
}

fn write_notice<W: Write>(notice: &Notice, out: &mut W) -> io::Result<()> {
    let mark = match notice.kind {
        NoticeKind::Error => "✗",
        NoticeKind::Success => "✓",
        NoticeKind::Info => "ℹ",
    };
    writeln!(out, "{} {}", mark, notice.text)
}

fn write_checkout<W: Write>(response: &CheckoutResponse, out: &mut W) -> io::Result<()> {
    if let Some(notice) = &response.notice {
        return write_notice(notice, out);
    }

    let phase = match &response.phase {
        CheckoutPhase::Idle => "No checkout in progress.".to_string(),
        CheckoutPhase::Validating => "Checking your order...".to_string(),
        CheckoutPhase::Submitting { payment_method, .. } => {
            format!("Submitting {} payment...", payment_method)
        }
        CheckoutPhase::AwaitingConfirmation { phone_number, .. } => {
            format!("Waiting for Mpesa Express confirmation from {}.", phone_number)
        }
        CheckoutPhase::Completed { status } => format!("Order placed. Status: {}", status),
        CheckoutPhase::Failed { message } => message.clone(),
    };
    writeln!(out, "{}", phase)
}

fn write_orders<W: Write>(state: &StorefrontState, orders: &[Order], out: &mut W) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "You have no orders yet.");
    }

    for order in orders {
        writeln!(
            out,
            "{}  {:<18} {:>14}  ({})",
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.status,
            state.config.format_currency(order.total_money()),
            order.payment_method
        )?;
        for item in &order.items {
            writeln!(out, "    {} x {}", item.quantity, item.title)?;
        }
    }
    Ok(())
}

fn write_favorites<W: Write>(state: &StorefrontState, favorites: &[Favorite], out: &mut W) -> io::Result<()> {
    if favorites.is_empty() {
        return writeln!(out, "No favorites yet.");
    }

    for favorite in favorites {
        writeln!(
            out,
            "  {:<24} {:>14}  [{}]",
            favorite.item_title,
            state
                .config
                .format_currency(yetta_core::Money::from_major_f64(favorite.item_price)),
            favorite.item_id
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::offline_state;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(
            parse_line("add seasonal-pie").unwrap(),
            Some(ShellCommand::Add {
                item_id: "seasonal-pie".to_string()
            })
        );
        assert_eq!(parse_line("add-cake").unwrap(), Some(ShellCommand::AddCake));
        assert_eq!(parse_line("exit").unwrap(), Some(ShellCommand::Quit));
        assert_eq!(
            parse_line("checkout mpesa 254712345678").unwrap(),
            Some(ShellCommand::Checkout {
                method: PayWith::Mpesa {
                    phone_number: Some("254712345678".to_string())
                }
            })
        );
        assert_eq!(
            parse_line("signup amina@example.com s3cret! Amina Wanjiku").unwrap(),
            Some(ShellCommand::Signup {
                email: "amina@example.com".to_string(),
                password: "s3cret!".to_string(),
                name: vec!["Amina".to_string(), "Wanjiku".to_string()],
            })
        );
        assert!(parse_line("forgot-password").is_err());
        assert!(parse_line("teleport").is_err());
    }

    #[test]
    fn test_pay_with_into_form() {
        let form = CheckoutForm::from(PayWith::Bank { bank_account: None });
        assert_eq!(form.bank_account, "");
        assert_eq!(form.payment_method, yetta_core::PaymentMethod::Bank);
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let state = offline_state();
        let script = "\
add seasonal-pie
add seasonal-pie
topping sprinkles
topping fresh-fruit
add-cake
cart
checkout mpesa
bogus
quit
add party-platter
";
        let mut out = Vec::new();
        run(&state, script.as_bytes(), &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Welcome to Yetta Bakery."));
        assert!(out.contains("Added Seasonal Fruit Pie (x2)."));
        assert!(out.contains("Fresh Fruit added. Cake price: Ksh. 42.00"));
        assert!(out.contains("Custom Cake Creation added to cart."));
        assert!(out.contains("3 item(s), total Ksh. 92.00"));
        assert!(out.contains("✗ Please log in to complete your purchase."));
        assert!(out.contains("Goodbye!"));

        // Nothing after `quit` runs.
        assert!(state.cart.line("party-platter").is_none());
    }

    #[tokio::test]
    async fn test_help_lists_commands() {
        let state = offline_state();
        let mut out = Vec::new();
        execute(&state, ShellCommand::Help, &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();

        for name in ["add-cake", "checkout", "forgot-password", "unfavorite", "whoami"] {
            assert!(out.contains(name), "help is missing {}", name);
        }
    }
}
