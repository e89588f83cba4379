//! Order workflow: drafts, frozen line-item snapshots, and the transaction
//! store contract.
//!
//! A transaction owns its line items as embedded values, not foreign-key
//! references, so later catalog edits never rewrite history. The stores own
//! the atomic check-then-decrement; this module owns validation and the
//! monetary arithmetic.

use crate::error::{Error, Result};
use crate::types::{Money, PaymentMethod, ProductId, TransactionId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One requested line in an order draft: which product, how many.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product to sell
    pub product_id: ProductId,
    /// Units requested (must be at least 1)
    pub quantity: u32,
}

/// A validated order submission, ready for the store's unit of work.
#[derive(Clone, Debug, Deserialize)]
pub struct OrderDraft {
    /// Requested lines (non-empty)
    pub items: Vec<OrderItem>,
    /// How the order is paid (defaults to cash)
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Tax amount added on top of the subtotal
    #[serde(default)]
    pub tax: Money,
    /// Discount subtracted from the total
    #[serde(default)]
    pub discount: Money,
}

impl OrderDraft {
    /// Check the draft's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the draft has no lines, any line
    /// has a zero quantity, or tax/discount are negative.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(Error::validation("items must not be empty"));
        }
        if self.items.iter().any(|item| item.quantity == 0) {
            return Err(Error::validation("item quantity must be at least 1"));
        }
        if self.tax.is_negative() {
            return Err(Error::validation("tax must not be negative"));
        }
        if self.discount.is_negative() {
            return Err(Error::validation("discount must not be negative"));
        }
        Ok(())
    }
}

/// A line item frozen at order time.
///
/// Copies the product's name and price so the transaction stays immutable
/// when the catalog changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier (traceability only, not a live reference)
    pub product_id: ProductId,
    /// Product name at time of purchase
    pub name: String,
    /// Unit price at time of purchase
    pub unit_price: Money,
    /// Units sold
    pub quantity: u32,
    /// `unit_price * quantity`
    pub subtotal: Money,
}

impl LineItem {
    /// Freeze a line from the resolved product data.
    #[must_use]
    pub fn new(product_id: ProductId, name: String, unit_price: Money, quantity: u32) -> Self {
        Self {
            product_id,
            name,
            unit_price,
            quantity,
            subtotal: unit_price.times(quantity),
        }
    }
}

/// Compute the grand total: `sum(line.subtotal) + tax - discount`.
#[must_use]
pub fn order_total(lines: &[LineItem], tax: Money, discount: Money) -> Money {
    let subtotal: Money = lines.iter().map(|line| line.subtotal).sum();
    subtotal + tax - discount
}

/// An immutable, persisted order.
///
/// Created once, atomically; never updated or deleted through the public
/// contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction identifier
    pub id: TransactionId,
    /// Owning user (non-owning reference)
    pub user_id: UserId,
    /// Frozen line-item snapshot
    pub items: Vec<LineItem>,
    /// Grand total (`sum(subtotal) + tax - discount`)
    pub total: Money,
    /// Tax amount
    pub tax: Money,
    /// Discount amount
    pub discount: Money,
    /// Payment method
    pub payment_method: PaymentMethod,
    /// When the order was recorded
    pub created_at: DateTime<Utc>,
}

/// Atomic order recording and owner-scoped reads.
///
/// Implementations must make the stock check and decrement for every line
/// one unit of work: concurrent orders against the same product can never
/// both pass the check, and a failure anywhere rolls back every decrement.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Run the order workflow and persist one transaction.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the draft is malformed
    /// - [`Error::NotFound`] if a referenced product is absent
    /// - [`Error::InsufficientStock`] if any line exceeds current stock
    /// - [`Error::Storage`] on backend failure
    ///
    /// On any error no stock decrement survives.
    async fn place_order(&self, user_id: UserId, draft: OrderDraft) -> Result<Transaction>;

    /// Fetch one transaction, enforcing ownership.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if absent and [`Error::Forbidden`] if
    /// `caller` does not own it.
    async fn transaction(&self, caller: UserId, id: TransactionId) -> Result<Transaction>;

    /// List the caller's own transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] on backend failure.
    async fn transactions_for(&self, caller: UserId) -> Result<Vec<Transaction>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft(items: Vec<OrderItem>) -> OrderDraft {
        OrderDraft {
            items,
            payment_method: PaymentMethod::Cash,
            tax: Money::ZERO,
            discount: Money::ZERO,
        }
    }

    #[test]
    fn line_item_freezes_subtotal() {
        let line = LineItem::new(
            ProductId::new(),
            "French Fries".to_string(),
            Money::from_minor(25_000),
            3,
        );
        assert_eq!(line.subtotal, Money::from_minor(75_000));
    }

    #[test]
    fn order_total_matches_worked_example() {
        // stock=10, price=25000, quantity=3, tax=5000, discount=2000
        let lines = vec![LineItem::new(
            ProductId::new(),
            "French Fries".to_string(),
            Money::from_minor(25_000),
            3,
        )];
        let total = order_total(&lines, Money::from_minor(5_000), Money::from_minor(2_000));
        assert_eq!(total, Money::from_minor(78_000));
    }

    #[test]
    fn empty_draft_is_rejected() {
        let err = draft(vec![]).validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let d = draft(vec![OrderItem {
            product_id: ProductId::new(),
            quantity: 0,
        }]);
        assert!(d.validate().is_err());
    }

    #[test]
    fn negative_tax_and_discount_are_rejected() {
        let mut d = draft(vec![OrderItem {
            product_id: ProductId::new(),
            quantity: 1,
        }]);
        d.tax = Money::from_minor(-1);
        assert!(d.validate().is_err());
        d.tax = Money::ZERO;
        d.discount = Money::from_minor(-1);
        assert!(d.validate().is_err());
    }

    #[test]
    fn draft_deserializes_with_defaults() {
        let d: OrderDraft = serde_json::from_str(
            r#"{"items":[{"product_id":"00000000-0000-0000-0000-000000000001","quantity":2}]}"#,
        )
        .unwrap();
        assert_eq!(d.payment_method, PaymentMethod::Cash);
        assert_eq!(d.tax, Money::ZERO);
        assert_eq!(d.discount, Money::ZERO);
    }

    proptest! {
        #[test]
        fn total_equals_sum_of_subtotals_plus_tax_minus_discount(
            prices in proptest::collection::vec(0i64..1_000_000, 1..8),
            quantities in proptest::collection::vec(1u32..100, 8),
            tax in 0i64..100_000,
            discount in 0i64..100_000,
        ) {
            let lines: Vec<LineItem> = prices
                .iter()
                .zip(&quantities)
                .map(|(&price, &qty)| {
                    LineItem::new(
                        ProductId::new(),
                        "p".to_string(),
                        Money::from_minor(price),
                        qty,
                    )
                })
                .collect();

            let expected: i64 = lines
                .iter()
                .map(|l| l.unit_price.minor() * i64::from(l.quantity))
                .sum::<i64>()
                + tax
                - discount;

            let total = order_total(&lines, Money::from_minor(tax), Money::from_minor(discount));
            prop_assert_eq!(total.minor(), expected);

            // Per-line invariant
            for line in &lines {
                prop_assert_eq!(
                    line.subtotal.minor(),
                    line.unit_price.minor() * i64::from(line.quantity)
                );
            }
        }
    }
}
