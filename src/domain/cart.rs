//! The cart state machine.
//!
//! [`CartState`] is the only place line items are mutated. Every operation
//! leaves the cart in a state where:
//!
//! - `total` equals the sum of `price * quantity` over the items,
//! - no two items share an id,
//! - every quantity is at least 1,
//! - no price is negative.
//!
//! Inputs that would break one of these rules degrade to a no-op (or, for a
//! quantity below 1, to a removal). Nothing here returns an error; the
//! [`Outcome`] of each call exists so callers can log what happened.

use serde::{Deserialize, Serialize};

use super::{LineItem, Product};

/// Why an operation left the cart untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No line item with the requested id.
    NotFound,
    /// Negative, NaN or infinite price.
    InvalidPrice,
}

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new line item was appended.
    Added,
    /// An existing line item's quantity was bumped.
    Merged { quantity: u32 },
    /// A quantity or price was replaced.
    Updated,
    Removed,
    Cleared,
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }
}

/// Immutable view of the cart handed out to renderers and checkout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub total: f64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all line items.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Sum of `price * quantity` over `items`, folded in order from `0.0`.
pub fn compute_total(items: &[LineItem]) -> f64 {
    items.iter().fold(0.0, |sum, item| sum + item.line_total())
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

/// Ordered line items plus their cached total.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    items: Vec<LineItem>,
    total: f64,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn recompute_total(&mut self) {
        self.total = compute_total(&self.items);
    }

    /// Adds one unit of `product`.
    ///
    /// A product already in the cart keeps the name and price it was first
    /// added with; only its quantity grows.
    pub fn add_item(&mut self, product: &Product) -> Outcome {
        let outcome = match self.position(&product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
                Outcome::Merged {
                    quantity: item.quantity,
                }
            }
            None if !is_valid_price(product.price) => Outcome::Skipped(SkipReason::InvalidPrice),
            None => {
                self.items.push(LineItem::from_product(product));
                Outcome::Added
            }
        };
        self.recompute_total();
        outcome
    }

    /// Replaces the quantity of `id`. Anything below 1 removes the item.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> Outcome {
        if quantity < 1 {
            return self.remove_item(id);
        }
        let outcome = match self.position(id) {
            Some(index) => {
                self.items[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                Outcome::Updated
            }
            None => Outcome::Skipped(SkipReason::NotFound),
        };
        self.recompute_total();
        outcome
    }

    /// Replaces the unit price of `id`. Invalid prices are ignored.
    pub fn set_price(&mut self, id: &str, price: f64) -> Outcome {
        let outcome = if !is_valid_price(price) {
            Outcome::Skipped(SkipReason::InvalidPrice)
        } else {
            match self.position(id) {
                Some(index) => {
                    self.items[index].price = price;
                    Outcome::Updated
                }
                None => Outcome::Skipped(SkipReason::NotFound),
            }
        };
        self.recompute_total();
        outcome
    }

    pub fn remove_item(&mut self, id: &str) -> Outcome {
        let outcome = match self.position(id) {
            Some(index) => {
                self.items.remove(index);
                Outcome::Removed
            }
            None => Outcome::Skipped(SkipReason::NotFound),
        };
        self.recompute_total();
        outcome
    }

    pub fn clear(&mut self) -> Outcome {
        self.items.clear();
        self.total = 0.0;
        Outcome::Cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn product(id: &str, name: &str, price: f64) -> Product {
        Product::new(id, name, price)
    }

    fn cart_with(products: &[Product]) -> CartState {
        let mut cart = CartState::new();
        for p in products {
            cart.add_item(p);
        }
        cart
    }

    #[test]
    fn test_add_merge_reprice_and_zero_quantity() {
        let a = product("1", "A", 10.0);
        let mut cart = CartState::new();

        assert_eq!(cart.add_item(&a), Outcome::Added);
        assert_eq!(
            cart.snapshot(),
            CartSnapshot {
                items: vec![LineItem {
                    id: "1".into(),
                    name: "A".into(),
                    price: 10.0,
                    quantity: 1
                }],
                total: 10.0,
            }
        );

        assert_eq!(cart.add_item(&a), Outcome::Merged { quantity: 2 });
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total(), 20.0);

        assert_eq!(cart.set_price("1", 15.0), Outcome::Updated);
        assert_eq!(cart.total(), 30.0);

        assert_eq!(cart.set_quantity("1", 0), Outcome::Removed);
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_remove_keeps_remaining_items() {
        let mut cart = cart_with(&[product("1", "A", 10.0), product("2", "B", 5.0)]);
        assert_eq!(cart.total(), 15.0);

        assert_eq!(cart.remove_item("1"), Outcome::Removed);
        let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
        assert_eq!(cart.total(), 5.0);
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let mut cart = cart_with(&[
            product("a", "A", 1.0),
            product("b", "B", 2.0),
            product("c", "C", 3.0),
            product("d", "D", 4.0),
        ]);
        cart.remove_item("b");
        let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_merge_updates_in_place() {
        let mut cart = cart_with(&[product("a", "A", 1.0), product("b", "B", 2.0)]);
        cart.add_item(&product("a", "A", 1.0));
        let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_first_price_wins_on_repeat_add() {
        let mut cart = cart_with(&[product("1", "Coffee", 3.0)]);
        cart.add_item(&product("1", "Coffee (large)", 4.5));

        let item = &cart.items()[0];
        assert_eq!(item.name, "Coffee");
        assert_eq!(item.price, 3.0);
        assert_eq!(item.quantity, 2);
        assert_eq!(cart.total(), 6.0);
    }

    #[test]
    fn test_quantity_floor_removes_item() {
        for q in [0, -1, -42, i64::MIN] {
            let mut cart = cart_with(&[product("1", "A", 10.0), product("2", "B", 5.0)]);
            cart.set_quantity("1", q);
            assert!(cart.snapshot().get("1").is_none(), "quantity {q} should remove");
            assert_eq!(cart.total(), 5.0);
        }
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let mut cart = cart_with(&[product("1", "A", 2.5)]);
        cart.set_quantity("1", 4);
        cart.set_quantity("1", 3);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total(), 7.5);
    }

    #[test]
    fn test_set_quantity_saturates_large_values() {
        let mut cart = cart_with(&[product("1", "A", 0.0)]);
        cart.set_quantity("1", i64::MAX);
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_price_floor_keeps_existing_price() {
        let mut cart = cart_with(&[product("1", "A", 10.0)]);
        assert_eq!(
            cart.set_price("1", -5.0),
            Outcome::Skipped(SkipReason::InvalidPrice)
        );
        assert_eq!(cart.items()[0].price, 10.0);
        assert_eq!(cart.total(), 10.0);
    }

    #[test]
    fn test_non_finite_prices_are_ignored() {
        let mut cart = cart_with(&[product("1", "A", 10.0)]);
        cart.set_price("1", f64::NAN);
        cart.set_price("1", f64::INFINITY);
        assert_eq!(cart.items()[0].price, 10.0);
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let mut cart = cart_with(&[product("1", "A", 10.0)]);
        assert_eq!(cart.set_price("1", 0.0), Outcome::Updated);
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_add_rejects_negative_catalog_price() {
        let mut cart = CartState::new();
        assert_eq!(
            cart.add_item(&product("1", "Broken", -1.0)),
            Outcome::Skipped(SkipReason::InvalidPrice)
        );
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_unknown_id_is_a_no_op() {
        let mut cart = cart_with(&[product("1", "A", 10.0), product("2", "B", 5.0)]);
        let before = cart.snapshot();
        let before_json = serde_json::to_string(&before).unwrap();

        assert_eq!(cart.remove_item("x"), Outcome::Skipped(SkipReason::NotFound));
        assert_eq!(cart.set_quantity("x", 3), Outcome::Skipped(SkipReason::NotFound));
        assert_eq!(cart.set_price("x", 10.0), Outcome::Skipped(SkipReason::NotFound));

        assert_eq!(cart.snapshot(), before);
        assert_eq!(serde_json::to_string(&cart.snapshot()).unwrap(), before_json);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = cart_with(&[product("1", "A", 10.0)]);
        for _ in 0..2 {
            assert_eq!(cart.clear(), Outcome::Cleared);
            assert_eq!(cart.snapshot(), CartSnapshot { items: vec![], total: 0.0 });
        }
    }

    #[test]
    fn test_snapshot_helpers() {
        let mut cart = cart_with(&[product("1", "A", 10.0), product("2", "B", 5.0)]);
        cart.set_quantity("2", 3);
        let snapshot = cart.snapshot();
        assert_eq!(snapshot.item_count(), 4);
        assert_eq!(snapshot.get("2").map(LineItem::line_total), Some(15.0));
        assert!(!snapshot.is_empty());
        assert!(CartSnapshot::default().is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, f64),
        SetQuantity(usize, i64),
        SetPrice(usize, f64),
        Remove(usize),
        Clear,
    }

    const IDS: [&str; 4] = ["p0", "p1", "p2", "p3"];

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..IDS.len(), 0.0..500.0f64).prop_map(|(i, p)| Op::Add(i, p)),
            2 => (0..IDS.len(), -3i64..20).prop_map(|(i, q)| Op::SetQuantity(i, q)),
            2 => (0..IDS.len(), -50.0..500.0f64).prop_map(|(i, p)| Op::SetPrice(i, p)),
            1 => (0..IDS.len()).prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }

    fn apply(cart: &mut CartState, op: &Op) -> Outcome {
        match *op {
            Op::Add(i, price) => cart.add_item(&Product::new(IDS[i], IDS[i], price)),
            Op::SetQuantity(i, q) => cart.set_quantity(IDS[i], q),
            Op::SetPrice(i, p) => cart.set_price(IDS[i], p),
            Op::Remove(i) => cart.remove_item(IDS[i]),
            Op::Clear => cart.clear(),
        }
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut cart = CartState::new();
            for op in &ops {
                apply(&mut cart, op);

                let expected: f64 = cart
                    .items()
                    .iter()
                    .fold(0.0, |sum, item| sum + item.price * f64::from(item.quantity));
                prop_assert_eq!(cart.total(), expected);

                let mut seen = HashSet::new();
                for item in cart.items() {
                    prop_assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
                    prop_assert!(item.quantity >= 1);
                    prop_assert!(item.price >= 0.0);
                }
            }
        }

        #[test]
        fn prop_repeated_adds_never_duplicate(picks in prop::collection::vec(0..IDS.len(), 0..64)) {
            let mut cart = CartState::new();
            for &i in &picks {
                cart.add_item(&Product::new(IDS[i], IDS[i], 1.0));
            }
            let distinct: HashSet<_> = picks.iter().collect();
            prop_assert_eq!(cart.items().len(), distinct.len());
            let units: u64 = cart.snapshot().item_count();
            prop_assert_eq!(units, picks.len() as u64);
        }

        #[test]
        fn prop_negative_price_never_changes_snapshot(
            ops in prop::collection::vec(op_strategy(), 0..32),
            target in 0..IDS.len(),
            price in -1000.0..-0.001f64,
        ) {
            let mut cart = CartState::new();
            for op in &ops {
                apply(&mut cart, op);
            }
            let before = cart.snapshot();
            prop_assert!(cart.set_price(IDS[target], price).is_skipped());
            prop_assert_eq!(cart.snapshot(), before);
        }
    }
}
