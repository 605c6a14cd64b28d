// server/src/services/seed.rs

//! Demo menu seeding, enabled with `SEED_DB=true`. Populates an empty
//! catalog only; an existing catalog is never touched.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::errors::Result;

/// (name, description, price in cents)
const MENU: [(&str, &str, i64); 18] = [
  (
    "Kung Pao Chicken",
    "Stir-fried chicken with peanuts, chili peppers, and vegetables in a savory-sweet sauce.",
    800,
  ),
  (
    "Sweet and Sour Pork",
    "Crispy pork chunks coated in a tangy sauce with pineapple and bell peppers.",
    900,
  ),
  ("Mapo Tofu", "Silken tofu in a spicy Sichuan pepper sauce with minced meat.", 700),
  (
    "Peking Duck",
    "Roasted duck with crispy skin, served with pancakes, scallions, and hoisin sauce.",
    2000,
  ),
  ("Chow Mein", "Stir-fried noodles with vegetables and meat or tofu.", 650),
  (
    "Hot Pot",
    "DIY meal with meats, veggies, and noodles cooked in a simmering broth.",
    1500,
  ),
  ("Dim Sum Platter", "Assorted bite-sized dumplings, buns, and rolls.", 1000),
  (
    "Beef and Broccoli",
    "Tender beef slices stir-fried with broccoli in a garlic soy sauce.",
    800,
  ),
  ("Egg Fried Rice", "Classic rice stir-fried with egg, scallions, and soy sauce.", 500),
  (
    "Sichuan Spicy Noodles",
    "Noodles in a fiery chili oil sauce with garlic and sesame.",
    600,
  ),
  (
    "Soy Milk",
    "Smooth, slightly sweet drink made from soybeans. Often served warm.",
    100,
  ),
  ("Pear Juice", "Refreshing and subtly sweet juice made from Asian pears.", 150),
  ("Bubble Milk Tea", "Sweet milk tea with chewy tapioca pearls.", 300),
  (
    "White Rabbit Candy",
    "Iconic creamy milk-flavored candy wrapped in edible rice paper.",
    100,
  ),
  ("Haw Flakes", "Thin sweet-sour discs made from hawthorn fruit.", 50),
  (
    "Salt-Baked Chicken Eggs",
    "Richly flavored eggs baked in hot salt crystals.",
    150,
  ),
  ("Mimi Shrimp Strips", "Crunchy strips with a savory shrimp taste.", 150),
  ("Dried Mango Slices", "Sweet and tangy dried fruit snack.", 250),
];

pub async fn seed_menu(pool: &PgPool) -> Result<()> {
  let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
    .fetch_one(pool)
    .await?;
  if existing > 0 {
    info!(existing, "Catalog already populated; skipping seed");
    return Ok(());
  }

  for (name, description, price_cents) in MENU {
    sqlx::query("INSERT INTO products (name, description, price, is_available) VALUES ($1, $2, $3, TRUE)")
      .bind(name)
      .bind(description)
      .bind(Decimal::new(price_cents, 2))
      .execute(pool)
      .await?;
  }

  info!(items = MENU.len(), "Seeded demo menu");
  Ok(())
}
