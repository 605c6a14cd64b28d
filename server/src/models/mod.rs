// server/src/models/mod.rs

//! Database rows and the JSON shapes they are served as.

pub mod order;
pub mod product;

pub use order::{Order, OrderItemResponse, OrderResponse};
pub use product::{Product, ProductResponse};
