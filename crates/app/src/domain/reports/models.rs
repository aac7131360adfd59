//! Report Models

use std::fmt;

use clap::ValueEnum;
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::{
    api::loose::{decimal, integer},
    domain::reports::errors::ReportsServiceError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
    Pdf,
}

impl ReportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date range and shape of a generated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub start: Date,
    pub end: Date,
    pub format: ReportFormat,
    pub report_type: String,
}

impl ReportQuery {
    pub fn validate(&self) -> Result<(), ReportsServiceError> {
        if self.start > self.end {
            return Err(ReportsServiceError::Invalid(
                "start date must not be after end date",
            ));
        }

        if self.report_type.trim().is_empty() {
            return Err(ReportsServiceError::Invalid("report type is required"));
        }

        // The type ends up in the default download file name.
        if self.report_type.contains(['/', '\\']) || self.report_type.contains("..") {
            return Err(ReportsServiceError::Invalid(
                "report type must not contain path separators",
            ));
        }

        Ok(())
    }

    /// Query string pairs, in the order the API documents them.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("startDate", self.start.to_string()),
            ("endDate", self.end.to_string()),
            ("format", self.format.to_string()),
            ("type", self.report_type.clone()),
        ]
    }

    /// Name a downloaded report is saved under.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "report-{}-{}-{}.{}",
            self.report_type, self.start, self.end, self.format
        )
    }
}

/// Headline inventory figures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryStatus {
    pub total_products: i64,
    pub low_stock_products: i64,
    pub total_value: Decimal,
    pub monthly_movements: i64,
}

impl InventoryStatus {
    /// Missing figures read as zero.
    #[must_use]
    pub fn from_value(record: &Value) -> Self {
        Self {
            total_products: integer(record, &["total_products"]),
            low_stock_products: integer(record, &["low_stock_products"]),
            total_value: decimal(record, &["total_value"]),
            monthly_movements: integer(record, &["monthly_movements"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomReportFilters {
    pub category: String,
    pub min_value: String,
    pub max_value: String,
}

/// Body for `POST /api/reports/custom`. Unset dates are sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomReportRequest {
    pub fields: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub filters: CustomReportFilters,
}

impl CustomReportRequest {
    #[must_use]
    pub fn new(
        fields: Vec<String>,
        start: Option<Date>,
        end: Option<Date>,
        filters: CustomReportFilters,
    ) -> Self {
        let date = |value: Option<Date>| value.map(|date| date.to_string()).unwrap_or_default();

        Self {
            fields,
            start_date: date(start),
            end_date: date(end),
            filters,
        }
    }

    pub fn validate(&self) -> Result<(), ReportsServiceError> {
        if self.fields.iter().all(|field| field.trim().is_empty()) {
            return Err(ReportsServiceError::Invalid(
                "select at least one field for the report",
            ));
        }

        Ok(())
    }
}

/// Tabular report rows; headers come from the first row's keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Build the table from the `data` array of a custom report.
    #[must_use]
    pub fn from_value(report: &Value) -> Self {
        let Some(rows) = report.get("data").and_then(Value::as_array) else {
            return Self::default();
        };

        let Some(first) = rows.first().and_then(Value::as_object) else {
            return Self::default();
        };

        let headers: Vec<String> = first.keys().cloned().collect();

        let rows = rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|header| row.get(header).map(cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cell text; falsy values render blank.
fn cell(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) if number.as_i64() == Some(0) || number.as_u64() == Some(0) => {
            String::new()
        }
        other => other.to_string(),
    }
}
