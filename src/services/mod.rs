pub mod collector;
pub mod decision;
pub mod orchestrator;
pub mod resolver;

pub use collector::MarketDataCollector;
pub use decision::DecisionService;
pub use orchestrator::{gather, AnalysisPipeline};
pub use resolver::TickerResolver;
