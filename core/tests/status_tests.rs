// tests/status_tests.rs

use mesa_core::OrderStatus;
use std::str::FromStr;

#[test]
fn test_every_status_round_trips_through_its_name() {
  for status in OrderStatus::ALL {
    assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
  }
}

#[test]
fn test_unrecognized_names_are_rejected() {
  for bad in ["shipped", "Pending", "done", ""] {
    assert!(OrderStatus::from_str(bad).is_err(), "'{bad}' must not parse");
  }
}

#[test]
fn test_serde_uses_lowercase_names() {
  let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
  assert_eq!(json, "\"preparing\"");

  let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
  assert_eq!(status, OrderStatus::Cancelled);
}

#[test]
fn test_new_orders_start_pending() {
  assert_eq!(OrderStatus::initial(), OrderStatus::Pending);
}

#[test]
fn test_kitchen_filter_excludes_only_completed() {
  let statuses = [
    OrderStatus::Pending,
    OrderStatus::Preparing,
    OrderStatus::Completed,
    OrderStatus::Cancelled,
  ];

  let active: Vec<OrderStatus> = statuses.into_iter().filter(OrderStatus::is_active).collect();

  assert_eq!(
    active,
    vec![OrderStatus::Pending, OrderStatus::Preparing, OrderStatus::Cancelled]
  );
}
