use crate::catalog::Catalog;
use crate::model::{Aggregates, Availability, ProductRecord};

/// One card per product, in catalog order.
pub fn render_catalog(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "No products yet. Use `add <name> <price>`.\n".to_string();
    }
    let mut out = String::new();
    for record in catalog {
        render_card(&mut out, record);
    }
    out
}

fn render_card(out: &mut String, record: &ProductRecord) {
    let marker = match record.availability() {
        Availability::InStock => "",
        Availability::OutOfStock => "  [OUT OF STOCK]",
    };
    out.push_str(&format!(
        "{}{}\n  Sales: {} | Revenue: £{}\n  Stock: {} | Price: £{}\n",
        record.name, marker, record.sales, record.revenue, record.stock, record.price
    ));
}

/// The stats bar.
pub fn render_stats(aggregates: &Aggregates) -> String {
    format!(
        "Cart: £{} | Products Sold: {} | Revenue: £{}",
        aggregates.cart_total, aggregates.units_sold, aggregates.total_revenue
    )
}
