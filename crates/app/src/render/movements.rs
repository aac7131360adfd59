//! Movement history.

use std::io;

use tabled::builder::Builder;

use crate::{
    domain::movements::models::{Movement, MovementStats},
    render::{NO_MOVEMENTS, RenderError, finish_table, money, or_na},
};

fn stock(level: Option<i64>) -> String {
    level.map_or_else(|| "N/A".to_string(), |level| level.to_string())
}

pub fn write_movements(
    mut out: impl io::Write,
    movements: &[Movement],
) -> Result<(), RenderError> {
    let stats = MovementStats::from_movements(movements);

    writeln!(
        out,
        "Total: {}  Entries: {}  Exits: {}  Adjustments: {}",
        stats.total, stats.entries, stats.exits, stats.adjustments
    )?;

    if movements.is_empty() {
        writeln!(out, "{NO_MOVEMENTS}")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record([
        "Date", "Product", "Type", "Qty", "Previous", "New", "Reason", "Reference", "Total cost",
    ]);

    for movement in movements {
        builder.push_record([
            or_na(movement.timestamp.as_deref()),
            or_na(
                movement
                    .product_name
                    .as_deref()
                    .or(movement.product_id.as_deref()),
            ),
            movement.kind_label().to_string(),
            movement.quantity.to_string(),
            stock(movement.previous_stock),
            stock(movement.new_stock),
            or_na(movement.reason.as_deref()),
            movement.reference.clone().unwrap_or_default(),
            money(movement.total_cost),
        ]);
    }

    writeln!(out, "{}", finish_table(builder, &[3, 4, 5, 8]))?;

    Ok(())
}
