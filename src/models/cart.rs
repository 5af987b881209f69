use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::catalog::Catalog;
use super::melon::Melon;
use super::price::Price;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Melon in cart is not in the catalog: {id}")]
    NotFound { id: String },
    #[error("Cart quantity or total overflowed")]
    Overflow,
    #[error("Stored cart line for {id} has quantity 0")]
    ZeroQuantity { id: String },
    #[error("Stored cart lists {id} more than once")]
    DuplicateLine { id: String },
}

/// One stored cart line. Quantity is always at least 1.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub melon_id: String,
    pub quantity: u32,
}

/// Melon id to quantity, in the order melons were first added.
///
/// Deserializing rejects zero quantities and repeated ids.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(try_from = "StoredCart")]
pub struct Cart {
    lines: Vec<CartLine>,
}

#[derive(Deserialize)]
struct StoredCart {
    lines: Vec<CartLine>,
}

impl TryFrom<StoredCart> for Cart {
    type Error = CartError;

    fn try_from(stored: StoredCart) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(stored.lines.len());
        for line in &stored.lines {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity {
                    id: line.melon_id.clone(),
                });
            }
            if !seen.insert(line.melon_id.as_str()) {
                return Err(CartError::DuplicateLine {
                    id: line.melon_id.clone(),
                });
            }
        }
        Ok(Self {
            lines: stored.lines,
        })
    }
}

/// A rendered cart row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CartEntry {
    pub melon: Melon,
    pub quantity: u32,
    pub line_total: Price,
}

impl CartEntry {
    pub fn unit_price(&self) -> Price {
        self.melon.price
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct CartSummary {
    pub entries: Vec<CartEntry>,
    pub total: Price,
    pub total_quantity: u64,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the quantity for `melon_id`, starting at 1. Returns the new quantity.
    ///
    /// The id is not checked against any catalog here; `render` reports stale ids.
    pub fn add(&mut self, melon_id: &str) -> Result<u32, CartError> {
        match self.lines.iter_mut().find(|line| line.melon_id == melon_id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(1).ok_or(CartError::Overflow)?;
                Ok(line.quantity)
            }
            None => {
                self.lines.push(CartLine {
                    melon_id: melon_id.to_string(),
                    quantity: 1,
                });
                Ok(1)
            }
        }
    }

    /// Quantity stored for `melon_id`, 0 when absent.
    pub fn quantity(&self, melon_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.melon_id == melon_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Join quantities against the catalog. The first unknown id fails the whole render.
    pub fn render(&self, catalog: &Catalog) -> Result<CartSummary, CartError> {
        let mut summary = CartSummary::default();

        for line in &self.lines {
            let melon = catalog
                .get_by_id(&line.melon_id)
                .map_err(|_| CartError::NotFound {
                    id: line.melon_id.clone(),
                })?;

            let line_total = melon
                .price
                .checked_mul(line.quantity)
                .ok_or(CartError::Overflow)?;
            summary.total = summary
                .total
                .checked_add(line_total)
                .ok_or(CartError::Overflow)?;
            summary.total_quantity += u64::from(line.quantity);

            summary.entries.push(CartEntry {
                melon: melon.clone(),
                quantity: line.quantity,
                line_total,
            });
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Melon::new("m1", "musk", "Musk Melon", Price::from_cents(500)),
            Melon::new("m2", "hdew", "Honeydew", Price::from_cents(350)),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_cart_renders_empty() {
        let summary = Cart::new().render(&catalog()).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total, Price::ZERO);
        assert_eq!(summary.total_quantity, 0);
    }

    #[test]
    fn test_repeated_add_counts_quantity() {
        let mut cart = Cart::new();
        cart.add("m2").unwrap();
        for expected in 1..=5 {
            assert_eq!(cart.add("m1").unwrap(), expected);
        }
        assert_eq!(cart.quantity("m1"), 5);
        assert_eq!(cart.quantity("m2"), 1);
        assert_eq!(cart.quantity("m3"), 0);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_render_musk_and_honeydew() {
        let mut cart = Cart::new();
        cart.add("m1").unwrap();
        cart.add("m1").unwrap();
        cart.add("m2").unwrap();

        let summary = cart.render(&catalog()).unwrap();
        let rows: Vec<_> = summary
            .entries
            .iter()
            .map(|e| (e.melon.id.as_str(), e.quantity, e.line_total))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("m1", 2, Price::from_cents(1000)),
                ("m2", 1, Price::from_cents(350)),
            ]
        );
        assert_eq!(summary.total, Price::from_cents(1350));
        assert_eq!(summary.total_quantity, 3);
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let mut cart = Cart::new();
        for id in ["m2", "m1", "m2", "m2", "m1", "m2"] {
            cart.add(id).unwrap();
        }
        let summary = cart.render(&catalog()).unwrap();
        let sum = summary
            .entries
            .iter()
            .map(|e| e.unit_price().cents() * u64::from(e.quantity))
            .sum::<u64>();
        assert_eq!(summary.total.cents(), sum);
        assert_eq!(summary.entries[0].melon.id, "m2");
    }

    #[test]
    fn test_add_past_u32_max_overflows() {
        let json = format!(r#"{{"lines":[{{"melon_id":"m1","quantity":{}}}]}}"#, u32::MAX);
        let mut cart: Cart = serde_json::from_str(&json).unwrap();

        assert!(matches!(cart.add("m1"), Err(CartError::Overflow)));
        assert_eq!(cart.quantity("m1"), u32::MAX);
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"{"lines":[{"melon_id":"m1","quantity":0}]}"#;
        let err = serde_json::from_str::<Cart>(json).unwrap_err();
        assert!(err.to_string().contains("quantity 0"));
    }

    #[test]
    fn test_deserialize_rejects_repeated_id() {
        let json = r#"{"lines":[{"melon_id":"m2","quantity":1},{"melon_id":"m2","quantity":2}]}"#;
        let err = serde_json::from_str::<Cart>(json).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_serialized_cart_reads_back() {
        let mut cart = Cart::new();
        cart.add("m1").unwrap();
        cart.add("m1").unwrap();
        cart.add("m2").unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_render_fails_on_unknown_id() {
        let mut cart = Cart::new();
        cart.add("m1").unwrap();
        cart.add("bogus").unwrap();

        let err = cart.render(&catalog()).unwrap_err();
        assert!(matches!(err, CartError::NotFound { ref id } if id == "bogus"));
    }
}
