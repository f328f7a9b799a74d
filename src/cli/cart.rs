//! `timehouse cart`

use clap::Subcommand;
use tabled::{Table, Tabled, settings::Style};

use timehouse::{cart::CartLineItem, products::ProductId, session::Session};

#[derive(Debug, Subcommand)]
pub(crate) enum CartCommand {
    /// Show line items and totals
    Show,

    /// Add one unit of a product
    Add {
        /// Product identifier
        id: String,
    },

    /// Remove a product's line
    Remove {
        /// Product identifier
        id: String,
    },

    /// Set a product's quantity (clamped to 1..=10)
    Set {
        /// Product identifier
        id: String,

        /// Requested quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove every line
    Clear,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Watch")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u8,
    #[tabled(rename = "Line total")]
    total: String,
}

impl From<&CartLineItem> for LineRow {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id().to_string(),
            name: line.product().display_name(),
            quantity: line.quantity().get(),
            total: line
                .line_total()
                .map_or_else(|error| error.to_string(), |total| total.to_string()),
        }
    }
}

pub(super) fn run(command: CartCommand, session: &mut Session) -> Result<(), String> {
    match command {
        CartCommand::Show => {}
        CartCommand::Add { id } => session
            .add_to_cart(&ProductId::new(id))
            .map_err(|error| error.to_string())?,
        CartCommand::Remove { id } => session.cart_mut().remove_item(&ProductId::new(id)),
        CartCommand::Set { id, quantity } => session
            .cart_mut()
            .update_quantity(&ProductId::new(id), quantity),
        CartCommand::Clear => session.cart_mut().clear_cart(),
    }

    show(session)
}

#[expect(clippy::print_stdout, reason = "CLI output")]
fn show(session: &Session) -> Result<(), String> {
    let cart = session.cart();

    let Some(summary) = cart.summary().map_err(|error| error.to_string())? else {
        println!("cart is empty");

        return Ok(());
    };

    let rows: Vec<LineRow> = cart.items().iter().map(LineRow::from).collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    println!("subtotal: {}", summary.subtotal);
    println!("shipping: {}", summary.shipping);
    println!("total:    {}", summary.total);

    Ok(())
}
