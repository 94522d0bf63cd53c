// storefront/src/catalog/seed.rs

use crate::models::Product;
use rust_decimal::Decimal;

fn product(id: u64, name: &str, cents: i64, photo: u32, description: &str, category: &str, stock: u32) -> Product {
  Product {
    id,
    name: name.to_string(),
    price: Decimal::new(cents, 2),
    image: format!(
      "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=500"
    ),
    description: description.to_string(),
    category: category.to_string(),
    stock,
  }
}

/// Products written to an empty catalog on first load.
pub fn reference_products() -> Vec<Product> {
  vec![
    product(
      1,
      "Wireless Bluetooth Headphones",
      7999,
      3945683,
      "Premium wireless headphones with noise cancellation and 30-hour battery life.",
      "Electronics",
      15,
    ),
    product(
      2,
      "Smart Fitness Watch",
      19999,
      437037,
      "Track your fitness goals with this advanced smartwatch featuring GPS and heart rate monitoring.",
      "Electronics",
      8,
    ),
    product(
      3,
      "Organic Cotton T-Shirt",
      2999,
      1020370,
      "Comfortable and sustainable organic cotton t-shirt in various colors.",
      "Clothing",
      25,
    ),
    product(
      4,
      "Portable Coffee Maker",
      8999,
      1251175,
      "Brew perfect coffee anywhere with this compact and efficient portable coffee maker.",
      "Kitchen",
      12,
    ),
    product(
      5,
      "Yoga Mat Premium",
      4999,
      4056723,
      "Non-slip premium yoga mat with extra cushioning for comfort during workouts.",
      "Sports",
      18,
    ),
    product(
      6,
      "Wireless Charging Pad",
      3499,
      4195342,
      "Fast wireless charging pad compatible with all Qi-enabled devices.",
      "Electronics",
      22,
    ),
  ]
}
