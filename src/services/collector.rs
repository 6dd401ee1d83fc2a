use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveDateTime, Utc};
use rand::Rng;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;

use crate::catalog::{base_prices, HEADLINE_TEMPLATES};
use crate::config::{AppConfig, DataSource};
use crate::errors::{Result, StockAnalysisError};
use crate::models::{round_cents, NewsItem, NewsSentiment, PriceDelta, Quote};

const SYNTHETIC_NEWS_COUNT: usize = 4;
const DAILY_TIMEFRAME: &str = "1D";

/// Три фетчера рыночных данных: новости, текущая цена и изменение цены.
/// Ошибки живого источника заменяются синтетическими данными той же формы.
#[derive(Clone)]
pub struct MarketDataCollector {
    client: Client,
    source: DataSource,
    config: AppConfig,
}

impl MarketDataCollector {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.fetch_timeout())
            .build()?;

        Ok(MarketDataCollector {
            client,
            source: config.data_source(),
            config,
        })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub async fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsItem>> {
        if let DataSource::Live { api_key } = &self.source {
            match self.collect_news_from_provider(symbol, api_key).await {
                Ok(news) => return Ok(news),
                Err(e) if self.config.synthetic_fallback => {
                    tracing::warn!("Новости для {} недоступны: {}, используем шаблоны", symbol, e);
                }
                Err(e) => return Err(e),
            }
        }

        self.simulate_network_delay().await;
        let news = synthetic_news(symbol, self.config.news_limit(), Utc::now());
        tracing::info!("Сгенерировано {} новостей для {}", news.len(), symbol);
        Ok(news)
    }

    pub async fn fetch_quote(&self, symbol: &str) -> Result<Quote> {
        if let DataSource::Live { api_key } = &self.source {
            match self.collect_quote_from_provider(symbol, api_key).await {
                Ok(quote) => return Ok(quote),
                Err(e) if self.config.synthetic_fallback => {
                    tracing::warn!("Котировка {} недоступна: {}, генерируем цену", symbol, e);
                }
                Err(e) => return Err(e),
            }
        }

        self.simulate_network_delay().await;
        let quote = synthetic_quote(symbol);
        tracing::info!("Синтетическая цена {}: ${:.2}", symbol, quote.price);
        Ok(quote)
    }

    pub async fn fetch_price_change(&self, symbol: &str) -> Result<PriceDelta> {
        if let DataSource::Live { api_key } = &self.source {
            match self.collect_price_change_from_provider(symbol, api_key).await {
                Ok(delta) => return Ok(delta),
                Err(e) if self.config.synthetic_fallback => {
                    tracing::warn!("История цен {} недоступна: {}, генерируем изменение", symbol, e);
                }
                Err(e) => return Err(e),
            }
        }

        self.simulate_network_delay().await;
        let delta = synthetic_price_change(symbol);
        tracing::info!(
            "Синтетическое изменение цены {}: {:.2}%",
            symbol,
            delta.change_percent()
        );
        Ok(delta)
    }

    async fn collect_news_from_provider(&self, symbol: &str, api_key: &str) -> Result<Vec<NewsItem>> {
        let limit = self.config.news_limit();
        let params = format!(
            "tickers={}&limit={}",
            urlencoding::encode(symbol),
            limit.max(10)
        );
        let json = self.query_provider("NEWS_SENTIMENT", &params, api_key).await?;
        let news = parse_news_feed(symbol, &json, limit)?;

        tracing::info!("Получено {} новостей для {}", news.len(), symbol);
        Ok(news)
    }

    async fn collect_quote_from_provider(&self, symbol: &str, api_key: &str) -> Result<Quote> {
        let params = format!("symbol={}", urlencoding::encode(symbol));
        let json = self.query_provider("GLOBAL_QUOTE", &params, api_key).await?;
        let quote = parse_global_quote(symbol, &json)?;

        tracing::info!("Текущая цена {}: ${:.2}", symbol, quote.price);
        Ok(quote)
    }

    async fn collect_price_change_from_provider(&self, symbol: &str, api_key: &str) -> Result<PriceDelta> {
        let params = format!("symbol={}", urlencoding::encode(symbol));
        let json = self.query_provider("TIME_SERIES_DAILY", &params, api_key).await?;
        let delta = parse_daily_series(symbol, &json)?;

        tracing::info!("Изменение цены {}: {:.2}%", symbol, delta.change_percent());
        Ok(delta)
    }

    async fn query_provider(&self, function: &str, params: &str, api_key: &str) -> Result<Value> {
        let url = format!(
            "{}?function={}&{}&apikey={}",
            self.config.alpha_vantage_url, function, params, api_key
        );
        tracing::debug!("Запрос {} к {}", function, self.config.alpha_vantage_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Неизвестная ошибка".to_string());
            return Err(StockAnalysisError::ApiError(format!(
                "Alpha Vantage error: {} - {}",
                status, error_text
            )));
        }

        let json: Value = response.json().await?;
        check_provider_errors(&json)?;
        Ok(json)
    }

    async fn simulate_network_delay(&self) {
        if self.config.simulate_latency {
            let millis = rand::thread_rng().gen_range(400..1200);
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

fn check_provider_errors(json: &Value) -> Result<()> {
    if let Some(message) = json["Error Message"].as_str() {
        return Err(StockAnalysisError::ApiError(message.to_string()));
    }

    for key in ["Note", "Information"] {
        if let Some(message) = json[key].as_str() {
            return Err(StockAnalysisError::RateLimited(message.to_string()));
        }
    }

    Ok(())
}

fn parse_decimal(value: &Value) -> Option<f64> {
    match value {
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    }
}

fn parse_global_quote(symbol: &str, json: &Value) -> Result<Quote> {
    let price = json["Global Quote"]
        .get("05. price")
        .and_then(parse_decimal)
        .ok_or_else(|| {
            StockAnalysisError::InvalidDataFormat("Отсутствует поле Global Quote.05. price".to_string())
        })?;

    Ok(Quote {
        symbol: symbol.to_string(),
        price: round_cents(price),
        currency: "USD".to_string(),
        timestamp: Utc::now(),
    })
}

fn parse_daily_series(symbol: &str, json: &Value) -> Result<PriceDelta> {
    let series = json["Time Series (Daily)"].as_object().ok_or_else(|| {
        StockAnalysisError::InvalidDataFormat("Отсутствует поле Time Series (Daily)".to_string())
    })?;

    let mut closes = Vec::with_capacity(series.len());
    for (date, bar) in series {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
        let close = bar.get("4. close").and_then(parse_decimal).ok_or_else(|| {
            StockAnalysisError::InvalidDataFormat(format!("Некорректная цена закрытия за {}", date))
        })?;
        closes.push((date, close));
    }

    // Свежие даты первыми
    closes.sort_by(|a, b| b.0.cmp(&a.0));

    match closes.as_slice() {
        [(_, current), (_, previous), ..] => {
            Ok(PriceDelta::new(symbol, *current, *previous, DAILY_TIMEFRAME))
        }
        _ => Err(StockAnalysisError::InsufficientData(format!(
            "Для {} нужно минимум две цены закрытия, получено {}",
            symbol,
            closes.len()
        ))),
    }
}

fn parse_published_at(raw: &str) -> Result<DateTime<Utc>> {
    match NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S") {
        Ok(naive) => Ok(naive.and_utc()),
        Err(_) => Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc)),
    }
}

fn parse_news_feed(symbol: &str, json: &Value, limit: usize) -> Result<Vec<NewsItem>> {
    let feed = json["feed"].as_array().ok_or_else(|| {
        StockAnalysisError::InvalidDataFormat("Отсутствует поле feed".to_string())
    })?;

    let mut news: Vec<NewsItem> = feed
        .iter()
        .map(|article| {
            let sentiment = article["ticker_sentiment"]
                .as_array()
                .and_then(|entries| {
                    entries
                        .iter()
                        .find(|entry| entry["ticker"].as_str() == Some(symbol))
                })
                .and_then(|entry| parse_decimal(&entry["ticker_sentiment_score"]))
                .map(NewsSentiment::from_provider_score)
                .unwrap_or(NewsSentiment::Neutral);

            let published_at = article["time_published"]
                .as_str()
                .and_then(|raw| match parse_published_at(raw) {
                    Ok(at) => Some(at),
                    Err(e) => {
                        tracing::debug!("Некорректная дата публикации {}: {}", raw, e);
                        None
                    }
                })
                .unwrap_or_else(Utc::now);

            NewsItem {
                title: text_or(&article["title"], "News Article"),
                summary: text_or(&article["summary"], "No summary available"),
                url: text_or(&article["url"], "#"),
                source: text_or(&article["source"], "Unknown Source"),
                published_at,
                sentiment,
            }
        })
        .collect();

    news.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    news.truncate(limit);
    Ok(news)
}

fn text_or(value: &Value, default: &str) -> String {
    value
        .as_str()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

fn synthetic_quote(symbol: &str) -> Quote {
    let mut rng = rand::thread_rng();
    let base = base_prices(symbol)
        .map(|prices| prices.current)
        .unwrap_or_else(|| rng.gen_range(50.0..250.0));
    let price = base * (1.0 + rng.gen_range(-0.02..0.02));

    Quote {
        symbol: symbol.to_string(),
        price: round_cents(price),
        currency: "USD".to_string(),
        timestamp: Utc::now(),
    }
}

fn synthetic_price_change(symbol: &str) -> PriceDelta {
    let mut rng = rand::thread_rng();
    let (current, previous) = match base_prices(symbol) {
        Some(prices) => (prices.current, prices.previous),
        None => (rng.gen_range(50.0..250.0), rng.gen_range(50.0..250.0)),
    };

    let current = current * (1.0 + rng.gen_range(-0.025..0.025));
    let previous = previous * (1.0 + rng.gen_range(-0.015..0.015));

    PriceDelta::new(symbol, current, previous, DAILY_TIMEFRAME)
}

fn synthetic_news(symbol: &str, limit: usize, now: DateTime<Utc>) -> Vec<NewsItem> {
    HEADLINE_TEMPLATES
        .iter()
        .take(SYNTHETIC_NEWS_COUNT.min(limit))
        .enumerate()
        .map(|(index, template)| NewsItem {
            title: template.render_title(symbol),
            summary: template.render_summary(symbol),
            url: format!(
                "https://example.com/news/{}-{}",
                symbol.to_lowercase(),
                index + 1
            ),
            source: template.source.to_string(),
            published_at: now - ChronoDuration::hours(template.hours_ago),
            sentiment: template.sentiment,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_error_payloads_are_recoverable_errors() {
        let err = check_provider_errors(&json!({"Error Message": "Invalid API call"})).unwrap_err();
        assert!(matches!(err, StockAnalysisError::ApiError(_)));

        let err = check_provider_errors(&json!({"Note": "5 calls per minute"})).unwrap_err();
        assert!(matches!(err, StockAnalysisError::RateLimited(_)));

        let err = check_provider_errors(&json!({"Information": "rate limit"})).unwrap_err();
        assert!(matches!(err, StockAnalysisError::RateLimited(_)));

        assert!(check_provider_errors(&json!({"Global Quote": {}})).is_ok());
    }

    #[test]
    fn global_quote_reads_string_price() {
        let json = json!({"Global Quote": {"01. symbol": "IBM", "05. price": "182.4560"}});
        let quote = parse_global_quote("IBM", &json).unwrap();
        assert_eq!(quote.price, 182.46);
        assert_eq!(quote.currency, "USD");

        assert!(parse_global_quote("IBM", &json!({"Global Quote": {}})).is_err());
    }

    #[test]
    fn daily_series_uses_two_latest_closes() {
        let json = json!({"Time Series (Daily)": {
            "2024-03-01": {"4. close": "100.00"},
            "2024-03-05": {"4. close": "110.00"},
            "2024-03-04": {"4. close": "105.00"}
        }});
        let delta = parse_daily_series("IBM", &json).unwrap();
        assert_eq!(delta.current_price(), 110.0);
        assert_eq!(delta.previous_price(), 105.0);
        assert_eq!(delta.change(), 5.0);
        assert_eq!(delta.change_percent(), 4.76);
        assert_eq!(delta.timeframe(), "1D");
    }

    #[test]
    fn daily_series_needs_two_points() {
        let json = json!({"Time Series (Daily)": {"2024-03-05": {"4. close": "110.00"}}});
        let err = parse_daily_series("IBM", &json).unwrap_err();
        assert!(matches!(err, StockAnalysisError::InsufficientData(_)));
    }

    #[test]
    fn news_feed_maps_scores_and_orders_by_recency() {
        let json = json!({"feed": [
            {
                "title": "Older",
                "time_published": "20240301T090000",
                "ticker_sentiment": [{"ticker": "IBM", "ticker_sentiment_score": "0.15"}]
            },
            {
                "title": "Newest",
                "summary": "s",
                "url": "https://news/1",
                "source": "Wire",
                "time_published": "20240303T090000",
                "ticker_sentiment": [
                    {"ticker": "AAPL", "ticker_sentiment_score": "-0.9"},
                    {"ticker": "IBM", "ticker_sentiment_score": "0.4"}
                ]
            },
            {
                "title": "Middle",
                "time_published": "20240302T090000",
                "ticker_sentiment": [{"ticker": "IBM", "ticker_sentiment_score": "-0.16"}]
            }
        ]});

        let news = parse_news_feed("IBM", &json, 10).unwrap();
        let titles: Vec<_> = news.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Older"]);
        assert_eq!(news[0].sentiment, NewsSentiment::Positive);
        assert_eq!(news[1].sentiment, NewsSentiment::Negative);
        // ровно 0.15 ещё нейтрально
        assert_eq!(news[2].sentiment, NewsSentiment::Neutral);
        assert_eq!(news[2].summary, "No summary available");
        assert_eq!(news[2].url, "#");
        assert_eq!(news[2].source, "Unknown Source");

        let limited = parse_news_feed("IBM", &json, 2).unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn news_feed_without_feed_field_is_malformed() {
        assert!(parse_news_feed("IBM", &json!({"items": 0}), 5).is_err());
    }

    #[test]
    fn synthetic_quote_stays_near_base_price() {
        for _ in 0..50 {
            let quote = synthetic_quote("AAPL");
            assert!(quote.price >= 181.54 && quote.price <= 188.96, "{}", quote.price);
        }
    }

    #[test]
    fn synthetic_news_follows_editorial_order() {
        let now = Utc::now();
        let news = synthetic_news("TSLA", 10, now);
        assert_eq!(news.len(), 4);
        assert_eq!(news[0].title, "TSLA Reports Strong Q4 Earnings, Beats Analyst Expectations");
        assert_eq!(news[0].url, "https://example.com/news/tsla-1");
        assert_eq!(news[0].published_at, now - ChronoDuration::hours(2));
        let sentiments: Vec<_> = news.iter().map(|n| n.sentiment).collect();
        assert_eq!(
            sentiments,
            vec![
                NewsSentiment::Positive,
                NewsSentiment::Neutral,
                NewsSentiment::Negative,
                NewsSentiment::Positive,
            ]
        );
        assert!(news.windows(2).all(|w| w[0].published_at > w[1].published_at));

        assert_eq!(synthetic_news("TSLA", 2, now).len(), 2);
    }
}
