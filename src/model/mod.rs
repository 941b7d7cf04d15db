//! Domain types: the [`Product`] entity, its [`ProductId`] codec and [`Price`].

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::*;
pub use product::*;
