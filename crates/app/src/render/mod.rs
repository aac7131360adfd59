//! Terminal rendering.

use std::{fmt, io};

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

mod movements;
mod products;
mod reports;
mod session;

pub use movements::*;
pub use products::*;
pub use reports::*;
pub use session::*;

/// Shown instead of an empty product table.
pub const NO_PRODUCTS: &str = "No products available";

/// Shown instead of an empty movement table.
pub const NO_MOVEMENTS: &str = "No movements available";

/// Shown instead of an empty low-stock table.
pub const NO_LOW_STOCK: &str = "All products have adequate stock";

/// Shown instead of an empty report table.
pub const NO_REPORT_DATA: &str = "No data to display";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome shown to the user after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

pub fn write_alert(
    mut out: impl io::Write,
    kind: AlertKind,
    message: &str,
) -> Result<(), RenderError> {
    writeln!(out, "{kind}: {message}")?;

    Ok(())
}

/// Amount in the inventory's currency, always with two decimals.
#[must_use]
pub fn money(amount: Decimal) -> String {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);

    Money::from_decimal(amount, iso::MXN).to_string()
}

/// Table with the house style; `numeric` columns are right aligned.
fn finish_table(builder: Builder, numeric: &[usize]) -> Table {
    let mut table = builder.build();

    table.with(Style::modern_rounded());

    for &column in numeric {
        table.modify(Columns::new(column..=column), Alignment::right());
    }

    table
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or("N/A").to_string()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn alerts_are_labelled() -> TestResult {
        let mut out = Vec::new();

        write_alert(&mut out, AlertKind::Success, "Product created")?;

        assert_eq!(String::from_utf8(out)?, "success: Product created\n");

        Ok(())
    }

    #[test]
    fn money_uses_two_decimals() {
        let formatted = money(Decimal::new(5055, 1));

        assert!(formatted.contains("505.50"), "{formatted}");
    }
}
