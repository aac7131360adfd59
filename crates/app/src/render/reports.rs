//! Report output.

use std::io;

use serde_json::Value;
use tabled::builder::Builder;

use crate::{
    domain::reports::models::{InventoryStatus, ReportTable},
    render::{NO_REPORT_DATA, RenderError, finish_table, money},
};

pub fn write_inventory_status(
    mut out: impl io::Write,
    status: &InventoryStatus,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Total products".to_string(), status.total_products.to_string()]);
    builder.push_record(["Low stock".to_string(), status.low_stock_products.to_string()]);
    builder.push_record(["Total value".to_string(), money(status.total_value)]);
    builder.push_record([
        "Movements this month".to_string(),
        status.monthly_movements.to_string(),
    ]);

    writeln!(out, "{}", finish_table(builder, &[1]))?;

    Ok(())
}

pub fn write_report_table(mut out: impl io::Write, table: &ReportTable) -> Result<(), RenderError> {
    if table.is_empty() {
        writeln!(out, "{NO_REPORT_DATA}")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(table.headers.iter().cloned());

    for row in &table.rows {
        builder.push_record(row.iter().cloned());
    }

    writeln!(out, "{}", finish_table(builder, &[]))?;

    Ok(())
}

/// A generated report: JSON pretty printed, text formats verbatim.
pub fn write_report(mut out: impl io::Write, report: &Value) -> Result<(), RenderError> {
    match report {
        Value::String(text) => write!(out, "{text}")?,
        other => writeln!(out, "{}", serde_json::to_string_pretty(other)?)?,
    }

    Ok(())
}
