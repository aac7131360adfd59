//! Movement Models

use std::fmt;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    api::loose::{decimal, integer, text},
    domain::movements::errors::MovementsServiceError,
};

/// Kind of stock movement, using the API's wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Stock in.
    Entrada,

    /// Stock out.
    Salida,

    /// Manual correction.
    Ajuste,
}

impl MovementType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entrada => "ENTRADA",
            Self::Salida => "SALIDA",
            Self::Ajuste => "AJUSTE",
        }
    }

    /// Parse a wire value. Matching is exact.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        [Self::Entrada, Self::Salida, Self::Ajuste]
            .into_iter()
            .find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movement as read from the API. Stock levels are computed server side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Movement {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    /// Raw type label; unknown labels are kept for display.
    pub kind: Option<String>,
    pub quantity: i64,
    pub reason: Option<String>,
    pub reference: Option<String>,
    pub unit_cost: Decimal,
    pub total_cost: Decimal,
    pub notes: Option<String>,
    pub previous_stock: Option<i64>,
    pub new_stock: Option<i64>,
    pub timestamp: Option<String>,
}

impl Movement {
    #[must_use]
    pub fn from_value(record: &Value) -> Self {
        let non_zero = |value: i64| Some(value).filter(|value| *value != 0);

        Self {
            product_id: text(record, &["product_Id", "productId"]),
            product_name: text(record, &["productName"]),
            kind: text(record, &["type"]),
            quantity: integer(record, &["quantity"]),
            reason: text(record, &["reason"]),
            reference: text(record, &["reference"]),
            unit_cost: decimal(record, &["unitCost"]),
            total_cost: decimal(record, &["totalCost"]),
            notes: text(record, &["notes"]),
            previous_stock: non_zero(integer(record, &["previousStock"])),
            new_stock: non_zero(integer(record, &["newStock"])),
            timestamp: text(record, &["timestamp", "createdAt"]),
        }
    }

    #[must_use]
    pub fn movement_type(&self) -> Option<MovementType> {
        self.kind.as_deref().and_then(MovementType::from_wire)
    }

    /// Type label, `N/A` when absent.
    #[must_use]
    pub fn kind_label(&self) -> &str {
        self.kind.as_deref().unwrap_or("N/A")
    }
}

/// Counts per movement type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementStats {
    pub total: usize,
    pub entries: usize,
    pub exits: usize,
    pub adjustments: usize,
}

impl MovementStats {
    #[must_use]
    pub fn from_movements(movements: &[Movement]) -> Self {
        let count = |kind: MovementType| {
            movements
                .iter()
                .filter(|movement| movement.movement_type() == Some(kind))
                .count()
        };

        Self {
            total: movements.len(),
            entries: count(MovementType::Entrada),
            exits: count(MovementType::Salida),
            adjustments: count(MovementType::Ajuste),
        }
    }
}

/// Movement entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMovement {
    pub product_id: String,
    pub kind: Option<MovementType>,
    pub quantity: i64,
    pub reason: String,
    pub reference: String,
    pub unit_cost: Decimal,
    pub notes: String,
}

impl NewMovement {
    /// Validate and build the wire body.
    pub fn into_payload(self) -> Result<MovementPayload, MovementsServiceError> {
        if self.product_id.trim().is_empty() {
            return Err(MovementsServiceError::Invalid("product id is required"));
        }

        let Some(kind) = self.kind else {
            return Err(MovementsServiceError::Invalid("movement type is required"));
        };

        if self.quantity <= 0 {
            return Err(MovementsServiceError::Invalid("quantity must be greater than 0"));
        }

        if self.reason.trim().is_empty() {
            return Err(MovementsServiceError::Invalid("reason is required"));
        }

        let non_empty = |value: String| Some(value).filter(|value| !value.is_empty());

        Ok(MovementPayload {
            product_id: self.product_id,
            kind,
            quantity: self.quantity,
            reason: self.reason,
            reference: non_empty(self.reference),
            unit_cost: Some(self.unit_cost).filter(|cost| *cost > Decimal::ZERO),
            notes: non_empty(self.notes),
        })
    }
}

/// Wire body for `POST /movements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementPayload {
    #[serde(rename = "product_Id")]
    pub product_id: String,

    #[serde(rename = "type")]
    pub kind: MovementType,

    pub quantity: i64,

    pub reason: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub unit_cost: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn valid() -> NewMovement {
        NewMovement {
            product_id: "p-1".to_string(),
            kind: Some(MovementType::Entrada),
            quantity: 5,
            reason: "restock".to_string(),
            ..NewMovement::default()
        }
    }

    #[test]
    fn reads_movement_fields() {
        let movement = Movement::from_value(&json!({
            "productId": "p-1",
            "productName": "Desk",
            "type": "SALIDA",
            "quantity": 2,
            "previousStock": 10,
            "newStock": 8,
            "createdAt": "2024-05-01T10:00:00Z",
        }));

        assert_eq!(movement.product_id.as_deref(), Some("p-1"));
        assert_eq!(movement.movement_type(), Some(MovementType::Salida));
        assert_eq!(movement.previous_stock, Some(10));
        assert_eq!(movement.new_stock, Some(8));
        assert_eq!(movement.timestamp.as_deref(), Some("2024-05-01T10:00:00Z"));
    }

    #[test]
    fn unknown_type_is_kept_as_label() {
        let movement = Movement::from_value(&json!({ "type": "TRANSFER" }));

        assert_eq!(movement.kind_label(), "TRANSFER");
        assert_eq!(movement.movement_type(), None);
        assert_eq!(Movement::default().kind_label(), "N/A");
    }

    #[test]
    fn stats_count_each_type() {
        let movements: Vec<_> = ["ENTRADA", "ENTRADA", "SALIDA", "AJUSTE", "entrada"]
            .iter()
            .map(|kind| Movement::from_value(&json!({ "type": kind })))
            .collect();

        assert_eq!(
            MovementStats::from_movements(&movements),
            MovementStats {
                total: 5,
                entries: 2,
                exits: 1,
                adjustments: 1,
            }
        );
    }

    #[test]
    fn validation_rejects_each_missing_field() {
        let cases = [
            (NewMovement { product_id: " ".to_string(), ..valid() }, "product id is required"),
            (NewMovement { kind: None, ..valid() }, "movement type is required"),
            (NewMovement { quantity: 0, ..valid() }, "quantity must be greater than 0"),
            (NewMovement { reason: String::new(), ..valid() }, "reason is required"),
        ];

        for (movement, expected) in cases {
            match movement.into_payload() {
                Err(MovementsServiceError::Invalid(message)) => assert_eq!(message, expected),
                other => panic!("expected {expected:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn payload_omits_empty_optionals() -> TestResult {
        let payload = serde_json::to_value(valid().into_payload()?)?;

        assert_eq!(
            payload,
            json!({
                "product_Id": "p-1",
                "type": "ENTRADA",
                "quantity": 5,
                "reason": "restock",
            })
        );

        Ok(())
    }

    #[test]
    fn payload_keeps_positive_unit_cost_and_notes() -> TestResult {
        let movement = NewMovement {
            reference: "PO-7".to_string(),
            unit_cost: Decimal::new(125, 1),
            notes: "dock 2".to_string(),
            ..valid()
        };

        let payload = serde_json::to_value(movement.into_payload()?)?;

        assert_eq!(payload["reference"], "PO-7");
        assert_eq!(payload["unitCost"], json!(12.5));
        assert_eq!(payload["notes"], "dock 2");

        Ok(())
    }
}
