// Coin allow-list and validated query parameters
pub mod coin;
pub mod query;

pub use coin::{Coin, UnknownCoin, VsCurrency};
pub use query::{PriceQuery, QueryError};
