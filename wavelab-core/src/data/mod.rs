//! Price sources: CoinGecko over HTTP and a deterministic synthetic walk.

pub mod canonicalize;
pub mod circuit_breaker;
pub mod coingecko;
pub mod provider;
pub mod synthetic;

pub use canonicalize::canonicalize;
pub use circuit_breaker::CircuitBreaker;
pub use coingecko::CoinGeckoSource;
pub use provider::{DataError, PriceSource};
pub use synthetic::SyntheticSource;
