use chrono::Utc;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::task::JoinError;
use tokio::time::error::Elapsed;

use crate::config::AppConfig;
use crate::errors::{Result, StockAnalysisError};
use crate::models::{AnalysisReport, MarketSnapshot, NewsItem, PriceDelta, Quote, TickerMatch};
use crate::services::{DecisionService, MarketDataCollector, TickerResolver};

/// Пайплайн одного запроса: тикер -> параллельный сбор данных -> синтез.
/// Фатальна только ошибка распознавания тикера.
pub struct AnalysisPipeline {
    resolver: TickerResolver,
    collector: MarketDataCollector,
    decision: DecisionService,
    stage_deadline: Duration,
}

impl AnalysisPipeline {
    pub fn new(config: AppConfig) -> Result<Self> {
        let stage_deadline = config.stage_deadline();
        Ok(AnalysisPipeline {
            resolver: TickerResolver::new()?,
            collector: MarketDataCollector::new(config)?,
            decision: DecisionService::new(),
            stage_deadline,
        })
    }

    pub async fn run(&self, query: &str) -> Result<AnalysisReport> {
        tracing::info!("Начинаем анализ запроса: {}", query);

        let ticker = self.resolver.resolve(query)?;
        let snapshot = self.collect(&ticker.symbol).await;

        tracing::info!(
            "Собрано для {}: {} новостей, цена: {}, изменение: {}",
            ticker.symbol,
            snapshot.news.len(),
            snapshot.quote.is_some(),
            snapshot.price_change.is_some()
        );

        Ok(self.assemble(query, ticker, snapshot))
    }

    async fn collect(&self, symbol: &str) -> MarketSnapshot {
        let news_task = {
            let collector = self.collector.clone();
            let symbol = symbol.to_string();
            async move { collector.fetch_news(&symbol).await }
        };

        let price_task = {
            let collector = self.collector.clone();
            let symbol = symbol.to_string();
            async move { collector.fetch_quote(&symbol).await }
        };

        let change_task = {
            let collector = self.collector.clone();
            let symbol = symbol.to_string();
            async move { collector.fetch_price_change(&symbol).await }
        };

        gather(news_task, price_task, change_task, self.stage_deadline).await
    }

    fn assemble(&self, query: &str, ticker: TickerMatch, snapshot: MarketSnapshot) -> AnalysisReport {
        let sentiment = self
            .decision
            .synthesize_snapshot(&ticker.symbol, &ticker.company_name, &snapshot);

        AnalysisReport {
            query: query.to_string(),
            ticker: ticker.symbol,
            company_name: ticker.company_name,
            current_price: snapshot.quote,
            price_change: snapshot.price_change,
            news: snapshot.news,
            analysis: sentiment.narrative().to_string(),
            sentiment: sentiment.label(),
            confidence: sentiment.confidence(),
            timestamp: Utc::now(),
        }
    }
}

/// Запускает три фетчера одновременно и ждёт завершения всех.
/// Ошибка, таймаут или паника одного не отменяет остальные: его результат
/// просто считается отсутствующим.
pub async fn gather<N, P, C>(news: N, quote: P, price_change: C, timeout: Duration) -> MarketSnapshot
where
    N: Future<Output = Result<Vec<NewsItem>>> + Send + 'static,
    P: Future<Output = Result<Quote>> + Send + 'static,
    C: Future<Output = Result<PriceDelta>> + Send + 'static,
{
    let news_task = tokio::spawn(timed(timeout, news));
    let price_task = tokio::spawn(timed(timeout, quote));
    let change_task = tokio::spawn(timed(timeout, price_change));

    let (news, quote, price_change) = tokio::join!(news_task, price_task, change_task);

    MarketSnapshot {
        news: settle("news", timeout, news).unwrap_or_default(),
        quote: settle("price", timeout, quote),
        price_change: settle("price_change", timeout, price_change),
    }
}

type Timed<T> = (std::result::Result<Result<T>, Elapsed>, Duration);

async fn timed<F, T>(timeout: Duration, fetch: F) -> Timed<T>
where
    F: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let outcome = tokio::time::timeout(timeout, fetch).await;
    (outcome, started.elapsed())
}

fn settle<T>(
    agent: &'static str,
    limit: Duration,
    outcome: std::result::Result<Timed<T>, JoinError>,
) -> Option<T> {
    let flattened = outcome
        .map_err(StockAnalysisError::from)
        .and_then(|(within_deadline, elapsed)| {
            tracing::debug!("Агент {} отработал за {:?}", agent, elapsed);
            within_deadline.map_err(|_| StockAnalysisError::Timeout { agent, limit })
        })
        .and_then(|fetched| fetched);

    match flattened {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Агент {} не вернул данные: {}", agent, e);
            None
        }
    }
}
