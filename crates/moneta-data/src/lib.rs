//! Currency dataset for the moneta lookup service.
//!
//! This crate owns everything about the data the service serves:
//! the [`Currency`] record, the startup [`load`] of the dataset file,
//! and the [`find`] matcher that queries scan against.
//!
//! The table produced by [`load`] is immutable for the life of the
//! process. Sessions share it behind an `Arc` and read it without any
//! locking — that is safe precisely because nothing ever writes to it
//! after startup.

mod error;
mod loader;

pub use error::DataError;
pub use loader::load;

use serde::{Deserialize, Serialize};

/// One ISO currency record.
///
/// Field names are renamed to PascalCase on the wire (`Name`, `Code`,
/// `Number`, `Country`) to match the JSON protocol. `number` stays a
/// `String` — numeric codes like `"008"` keep their leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Currency {
    /// Currency name, e.g. "US Dollar".
    pub name: String,
    /// Three-letter ISO 4217 code, e.g. "USD".
    pub code: String,
    /// Three-digit ISO 4217 numeric code, e.g. "840".
    pub number: String,
    /// Issuing country or region.
    pub country: String,
}

/// Scans `table` for records matching `query`.
///
/// Pure and synchronous — an in-memory scan with no I/O, so session
/// handlers call it inline without suspending. Matching is a
/// case-insensitive substring test against name, code, and country.
/// The wildcard `*` matches every record. An empty result is a valid
/// outcome, not an error. Table order is preserved.
pub fn find(table: &[Currency], query: &str) -> Vec<Currency> {
    if query == "*" {
        return table.to_vec();
    }
    let needle = query.to_lowercase();
    table
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle)
                || c.code.to_lowercase().contains(&needle)
                || c.country.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<Currency> {
        vec![
            Currency {
                name: "US Dollar".into(),
                code: "USD".into(),
                number: "840".into(),
                country: "United States".into(),
            },
            Currency {
                name: "Euro".into(),
                code: "EUR".into(),
                number: "978".into(),
                country: "France".into(),
            },
            Currency {
                name: "Colon".into(),
                code: "CRC".into(),
                number: "188".into(),
                country: "Costa Rica".into(),
            },
        ]
    }

    #[test]
    fn test_find_by_code_case_insensitive() {
        let result = find(&table(), "usd");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "US Dollar");
    }

    #[test]
    fn test_find_by_country_substring() {
        let result = find(&table(), "Costa");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].code, "CRC");
    }

    #[test]
    fn test_find_wildcard_matches_everything() {
        let result = find(&table(), "*");
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_find_no_match_is_empty_not_error() {
        let result = find(&table(), "zzz");
        assert!(result.is_empty());
    }

    #[test]
    fn test_find_preserves_table_order() {
        // "r" appears in Dollar, Euro/France, and Costa Rica.
        let result = find(&table(), "r");
        let codes: Vec<_> = result.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["USD", "EUR", "CRC"]);
    }

    #[test]
    fn test_currency_wire_field_names_are_pascal_case() {
        let c = &table()[0];
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["Name"], "US Dollar");
        assert_eq!(json["Code"], "USD");
        assert_eq!(json["Number"], "840");
        assert_eq!(json["Country"], "United States");
    }
}
