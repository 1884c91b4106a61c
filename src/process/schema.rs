use crate::error::{CleanError, Result};
use arrow::datatypes::Schema;
use serde::Serialize;

/// Accepted names for the price column, in priority order.
pub const PRICE_ALIASES: &[&str] = &["price", "unit_price", "sale_price"];

/// Accepted names for the quantity column, in priority order.
pub const QUANTITY_ALIASES: &[&str] = &["quantity", "qty", "units_sold"];

/// The price and quantity columns as they are actually named in one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesColumns {
    pub price: String,
    pub quantity: String,
}

impl SalesColumns {
    /// Column positions of the resolved pair in `schema`.
    ///
    /// A handle resolved against a different schema fails the same way an
    /// unresolvable table does.
    pub fn indices(&self, schema: &Schema) -> Result<(usize, usize)> {
        let price = schema
            .index_of(&self.price)
            .map_err(|_| missing("price", PRICE_ALIASES))?;
        let quantity = schema
            .index_of(&self.quantity)
            .map_err(|_| missing("quantity", QUANTITY_ALIASES))?;
        Ok((price, quantity))
    }
}

fn missing(field: &'static str, tried: &'static [&'static str]) -> CleanError {
    CleanError::Schema { field, tried }
}

fn first_match(schema: &Schema, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find(|alias| schema.fields().iter().any(|f| f.name().as_str() == **alias))
        .map(|alias| alias.to_string())
}

/// Resolve the price and quantity columns against the alias lists.
pub fn resolve_sales_columns(schema: &Schema) -> Result<SalesColumns> {
    let price =
        first_match(schema, PRICE_ALIASES).ok_or_else(|| missing("price", PRICE_ALIASES))?;
    let quantity = first_match(schema, QUANTITY_ALIASES)
        .ok_or_else(|| missing("quantity", QUANTITY_ALIASES))?;
    Ok(SalesColumns { price, quantity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{DataType, Field};

    fn schema_of(names: &[&str]) -> Schema {
        Schema::new(
            names
                .iter()
                .map(|n| Field::new(*n, DataType::Utf8, true))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_resolves_first_alias_in_priority_order() {
        let schema = schema_of(&["sale_price", "units_sold", "unit_price", "qty"]);
        let cols = resolve_sales_columns(&schema).unwrap();
        assert_eq!(cols.price, "unit_price");
        assert_eq!(cols.quantity, "qty");
    }

    #[test]
    fn test_missing_price_alias() {
        let schema = schema_of(&["product", "quantity"]);
        match resolve_sales_columns(&schema) {
            Err(CleanError::Schema { field, tried }) => {
                assert_eq!(field, "price");
                assert_eq!(tried, PRICE_ALIASES);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_quantity_alias() {
        let schema = schema_of(&["price", "amount"]);
        let err = resolve_sales_columns(&schema).unwrap_err();
        assert!(matches!(err, CleanError::Schema { field: "quantity", .. }));
    }

    #[test]
    fn test_indices_against_foreign_schema() {
        let cols = resolve_sales_columns(&schema_of(&["price", "qty"])).unwrap();
        assert_eq!(cols.indices(&schema_of(&["id", "qty", "price"])).unwrap(), (2, 1));
        let err = cols.indices(&schema_of(&["sale_price", "qty"])).unwrap_err();
        assert!(matches!(err, CleanError::Schema { field: "price", .. }));
    }

    #[test]
    fn test_aliases_are_case_sensitive() {
        // resolution runs after normalization, so raw headers never match
        let schema = schema_of(&["Price", "Quantity"]);
        assert!(resolve_sales_columns(&schema).is_err());
    }
}
