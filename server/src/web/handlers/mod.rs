// server/src/web/handlers/mod.rs

// Declare handler modules
pub mod image_handlers;
pub mod order_handlers;
pub mod product_handlers;
