mod price;
mod quantity;

pub use price::Price;
pub use quantity::Quantity;
