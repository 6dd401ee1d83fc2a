pub mod headlines;
pub mod quotes;
pub mod tickers;

pub use headlines::{HeadlineTemplate, HEADLINE_TEMPLATES};
pub use quotes::{base_prices, BasePrices};
pub use tickers::{lookup_alias, TICKER_ALIASES};
