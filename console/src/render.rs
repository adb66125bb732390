//! Terminal rendering of the product table.

use inventory_core::ProductRow;
use tabled::{builder::Builder, settings::Style};

const HEADER: [&str; 6] = ["#", "Name", "Price", "Quantity", "Creation Time", "Actions"];

pub fn product_table(rows: &[ProductRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(HEADER);

    for row in rows {
        let action = if row.delete_enabled { "delete" } else { "deleting" };
        builder.push_record([
            row.id.to_string(),
            row.name.clone(),
            row.price.to_string(),
            row.quantity.to_string(),
            row.creation_time.clone(),
            action.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}
