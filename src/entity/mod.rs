pub mod orders;
pub mod products;

pub use orders::Entity as Orders;
pub use products::Entity as Products;
