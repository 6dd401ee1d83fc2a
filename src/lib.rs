pub mod catalog;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::{load_config, AppConfig, DataSource};
pub use errors::{Result, StockAnalysisError};
pub use models::{
    AnalysisReport, MarketSentiment, MarketSnapshot, NewsItem, NewsSentiment, PriceDelta, Quote,
    SentimentResult, TickerMatch,
};
pub use services::{gather, AnalysisPipeline, DecisionService, MarketDataCollector, TickerResolver};
