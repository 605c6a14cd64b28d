// tests/cart_tests.rs

use mesa_core::{Cart, ProductSnapshot};
use rust_decimal::Decimal;

fn snapshot(id: i64, name: &str, price_cents: i64) -> ProductSnapshot {
  ProductSnapshot {
    product_id: id,
    name: name.to_string(),
    price: Decimal::new(price_cents, 2),
    image_url: None,
  }
}

#[test]
fn test_add_new_product_starts_at_quantity_one() {
  let mut cart = Cart::new();
  cart.add(snapshot(1, "Kung Pao Chicken", 800));

  assert_eq!(cart.len(), 1);
  assert_eq!(cart.entries()[0].quantity, 1);
  assert_eq!(cart.total(), Decimal::new(800, 2));
}

#[test]
fn test_add_existing_product_increments_without_duplicating() {
  let mut cart = Cart::new();
  cart.add(snapshot(1, "Kung Pao Chicken", 800));
  cart.add(snapshot(1, "Kung Pao Chicken", 800));
  cart.add(snapshot(1, "Kung Pao Chicken", 800));

  assert_eq!(cart.len(), 1, "re-adding must never create a duplicate entry");
  assert_eq!(cart.entries()[0].quantity, 3);
}

#[test]
fn test_add_keeps_price_snapshot_from_first_add() {
  let mut cart = Cart::new();
  cart.add(snapshot(1, "Mapo Tofu", 700));
  // Catalog price changed between clicks; the entry keeps its snapshot.
  cart.add(snapshot(1, "Mapo Tofu", 900));

  assert_eq!(cart.entries()[0].price, Decimal::new(700, 2));
  assert_eq!(cart.total(), Decimal::new(1400, 2));
}

#[test]
fn test_remove_and_re_add_picks_up_new_price() {
  let mut cart = Cart::new();
  cart.add(snapshot(1, "Mapo Tofu", 700));
  cart.remove(1);
  cart.add(snapshot(1, "Mapo Tofu", 900));

  assert_eq!(cart.entries()[0].price, Decimal::new(900, 2));
}

#[test]
fn test_increase_and_decrease_adjust_by_one() {
  let mut cart = Cart::new();
  cart.add(snapshot(2, "Soy Milk", 100));

  cart.increase(2);
  cart.increase(2);
  assert_eq!(cart.entries()[0].quantity, 3);

  cart.decrease(2);
  assert_eq!(cart.entries()[0].quantity, 2);
}

#[test]
fn test_decrease_floors_at_one() {
  let mut cart = Cart::new();
  cart.add(snapshot(2, "Soy Milk", 100));

  cart.decrease(2);
  cart.decrease(2);

  assert_eq!(cart.len(), 1, "decrease must never auto-remove an entry");
  assert_eq!(cart.entries()[0].quantity, 1);
}

#[test]
fn test_adjustments_on_unknown_id_are_no_ops() {
  let mut cart = Cart::new();
  cart.add(snapshot(1, "Chow Mein", 650));

  cart.increase(99);
  cart.decrease(99);
  cart.remove(99);

  assert_eq!(cart.len(), 1);
  assert_eq!(cart.entries()[0].quantity, 1);
}

#[test]
fn test_remove_deletes_entry_regardless_of_quantity() {
  let mut cart = Cart::new();
  cart.add(snapshot(1, "Chow Mein", 650));
  cart.increase(1);
  cart.increase(1);

  cart.remove(1);

  assert!(cart.is_empty());
  assert_eq!(cart.total(), Decimal::ZERO);
}

#[test]
fn test_total_is_sum_of_price_times_quantity() {
  // The worked example: 8.00 x 2 + 1.50 x 1 = 17.50.
  let mut cart = Cart::new();
  cart.add(snapshot(1, "Kung Pao Chicken", 800));
  cart.increase(1);
  cart.add(snapshot(2, "Pear Juice", 150));

  assert_eq!(cart.total(), Decimal::new(1750, 2));
}

#[test]
fn test_total_recomputes_identically_after_any_sequence() {
  let mut cart = Cart::new();
  cart.add(snapshot(1, "Kung Pao Chicken", 800));
  cart.add(snapshot(2, "Pear Juice", 150));
  cart.add(snapshot(3, "Hot Pot", 1500));
  cart.increase(1);
  cart.increase(3);
  cart.decrease(3);
  cart.remove(2);
  cart.decrease(1);

  let expected: Decimal = cart
    .entries()
    .iter()
    .map(|e| e.price * Decimal::from(e.quantity))
    .sum();
  assert_eq!(cart.total(), expected);
  // And again: total() is a pure read.
  assert_eq!(cart.total(), expected);
}

#[test]
fn test_clear_empties_the_cart() {
  let mut cart = Cart::new();
  cart.add(snapshot(1, "Dim Sum Platter", 1000));
  cart.add(snapshot(2, "Haw Flakes", 50));

  cart.clear();

  assert!(cart.is_empty());
  assert_eq!(cart.total(), Decimal::ZERO);
}

#[test]
fn test_cart_round_trips_through_serde() {
  let mut cart = Cart::new();
  cart.add(ProductSnapshot {
    product_id: 7,
    name: "Bubble Milk Tea".to_string(),
    price: Decimal::new(300, 2),
    image_url: Some("http://cdn.example.com/tea.jpg".to_string()),
  });
  cart.increase(7);

  let json = serde_json::to_string(&cart).unwrap();
  let restored: Cart = serde_json::from_str(&json).unwrap();

  assert_eq!(restored, cart);
  assert_eq!(restored.total(), Decimal::new(600, 2));
}
