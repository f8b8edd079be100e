//! CSV sales data loader.
//!
//! Parses sales transaction CSV files into `SalesRow` structs.
//! Expected CSV columns:
//!   Item Name, Qty, Price, Amount Price Item, Invoice Number
//!
//! Numeric values that fail to parse are coerced to NaN so the cleaning
//! stage can drop them; structural CSV errors and missing headers abort.

use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::error::{PipelineError, PipelineResult};

/// Column headers the upload must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Item Name",
    "Qty",
    "Price",
    "Amount Price Item",
    "Invoice Number",
];

/// One sales transaction line.
///
/// Numeric fields hold NaN when the source value was absent or not a
/// number; such rows never survive the positivity filter.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesRow {
    #[serde(rename = "Item Name")]
    pub item_name: String,
    #[serde(rename = "Qty", deserialize_with = "coerce_f64")]
    pub qty: f64,
    #[serde(rename = "Price", deserialize_with = "coerce_f64")]
    pub price: f64,
    #[serde(rename = "Amount Price Item", deserialize_with = "coerce_f64")]
    pub amount: f64,
    #[serde(rename = "Invoice Number")]
    pub invoice_number: String,
}

impl SalesRow {
    /// True when every key field is present and positive.
    /// NaN comparisons are false, so coerced values fail this check.
    pub fn is_clean(&self) -> bool {
        !self.item_name.trim().is_empty()
            && self.qty > 0.0
            && self.price > 0.0
            && self.amount > 0.0
    }
}

/// Deserialize a numeric cell, coercing blanks and junk to NaN.
fn coerce_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN))
}

/// Load sales rows from a CSV reader.
///
/// Validates that every required column is present before parsing any
/// rows; the error names each missing column so the user can fix the
/// file in one pass.
pub fn load_sales<R: Read>(reader: R) -> PipelineResult<Vec<SalesRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == **required))
        .map(|s| s.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: SalesRow = result?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Item Name,Qty,Price,Amount Price Item,Invoice Number\n";

    #[test]
    fn parses_well_formed_rows() {
        let csv = format!("{}Hammer,2,15000,30000,INV-001\n", HEADER);
        let rows = load_sales(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_name, "Hammer");
        assert_eq!(rows[0].qty, 2.0);
        assert_eq!(rows[0].amount, 30000.0);
        assert!(rows[0].is_clean());
    }

    #[test]
    fn missing_columns_are_reported_by_name() {
        let csv = "Item Name,Qty,Invoice Number\nHammer,2,INV-001\n";
        let err = load_sales(csv.as_bytes()).unwrap_err();
        match err {
            PipelineError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["Price", "Amount Price Item"]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn junk_numerics_are_coerced_not_fatal() {
        let csv = format!("{}Hammer,abc,15000,30000,INV-001\n", HEADER);
        let rows = load_sales(csv.as_bytes()).unwrap();
        assert!(rows[0].qty.is_nan());
        assert!(!rows[0].is_clean());
    }

    #[test]
    fn blank_numerics_are_coerced_to_nan() {
        let csv = format!("{}Hammer,,15000,30000,INV-001\n", HEADER);
        let rows = load_sales(csv.as_bytes()).unwrap();
        assert!(rows[0].qty.is_nan());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "Item Name,Qty,Price,Amount Price Item,Invoice Number,Store\n\
                   Hammer,2,15000,30000,INV-001,Depok\n";
        let rows = load_sales(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn ragged_rows_abort() {
        let csv = format!("{}Hammer,2,15000\n", HEADER);
        assert!(matches!(
            load_sales(csv.as_bytes()),
            Err(PipelineError::Csv(_))
        ));
    }

    #[test]
    fn values_are_trimmed() {
        let csv = format!("{} Hammer , 2 , 15000 , 30000 , INV-001 \n", HEADER);
        let rows = load_sales(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].item_name, "Hammer");
        assert_eq!(rows[0].qty, 2.0);
    }
}
