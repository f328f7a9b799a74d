//! `timehouse catalog`

use tabled::{Table, Tabled, settings::Style};

use timehouse::{products::Product, session::Session};

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Watch")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
}

impl From<&Product> for CatalogRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.display_name(),
            category: format!("{:?}", product.category),
            price: product.price.formatted.clone(),
        }
    }
}

pub(super) fn run(session: &Session) -> Result<(), String> {
    let catalog = session.catalog();
    let rows: Vec<CatalogRow> = catalog.iter().map(CatalogRow::from).collect();

    #[expect(clippy::print_stdout, reason = "CLI output")]
    {
        println!("{}", Table::new(rows).with(Style::rounded()));
        println!(
            "catalog v{}, loaded {}",
            catalog.version(),
            catalog.last_updated()
        );
    }

    Ok(())
}
