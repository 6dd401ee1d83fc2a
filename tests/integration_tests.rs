use stock_query_analyzer::*;
use tokio_test::{assert_err, assert_ok};

fn synthetic_config() -> AppConfig {
    AppConfig::default()
}

// Живой источник на закрытом порту, без подмены синтетикой
fn unreachable_live_config() -> AppConfig {
    AppConfig {
        alpha_vantage_url: "http://127.0.0.1:9/query".to_string(),
        alpha_vantage_api_key: Some("test_key".to_string()),
        fetch_timeout_secs: Some(2),
        synthetic_fallback: false,
        ..AppConfig::default()
    }
}

fn article(sentiment: NewsSentiment) -> NewsItem {
    NewsItem {
        title: "Headline".to_string(),
        summary: "Summary".to_string(),
        url: "https://example.com".to_string(),
        source: "Wire".to_string(),
        published_at: chrono::Utc::now(),
        sentiment,
    }
}

#[test]
fn test_known_company_name_resolves() {
    let resolver = TickerResolver::new().unwrap();

    let ticker = resolver.resolve("Why did Tesla stock drop today?").unwrap();
    assert_eq!(
        ticker,
        TickerMatch {
            symbol: "TSLA".to_string(),
            company_name: "Tesla Inc".to_string(),
        }
    );

    let ticker = resolver.resolve("Apple stock price analysis").unwrap();
    assert_eq!(ticker.symbol, "AAPL");
    assert_eq!(ticker.company_name, "Apple Inc");
}

#[test]
fn test_unknown_uppercase_symbol_gets_placeholder_name() {
    let resolver = TickerResolver::new().unwrap();

    let ticker = resolver.resolve("XYZQ stock").unwrap();
    assert_eq!(ticker.symbol, "XYZQ");
    assert_eq!(ticker.company_name, "XYZQ Corporation");
}

#[test]
fn test_unresolvable_query_echoes_text() {
    let resolver = TickerResolver::new().unwrap();

    let err = assert_err!(resolver.resolve("hello world"));
    assert!(matches!(err, StockAnalysisError::TickerNotFound { .. }));
    let message = err.to_string();
    assert!(message.contains("\"hello world\""));
    assert!(message.contains("company name or stock symbol"));
}

#[test]
fn test_label_boundaries() {
    assert_eq!(MarketSentiment::from_scores(0.4, 0.0), MarketSentiment::Neutral);
    assert_eq!(MarketSentiment::from_scores(0.4000002, 0.0), MarketSentiment::Bullish);
    assert_eq!(MarketSentiment::from_scores(-0.4, 0.0), MarketSentiment::Neutral);
    assert_eq!(MarketSentiment::from_scores(-0.4000002, 0.0), MarketSentiment::Bearish);
    assert_eq!(MarketSentiment::from_scores(0.2, 0.2), MarketSentiment::Neutral);
    assert_eq!(MarketSentiment::from_scores(1.0, -1.0), MarketSentiment::Neutral);
}

#[test]
fn test_momentum_clamps_to_unit_range() {
    let decision = DecisionService::new();

    let up = PriceDelta::new("T", 112.0, 100.0, "1D");
    assert_eq!(up.change_percent(), 12.0);
    assert_eq!(decision.momentum_score(Some(&up)), 1.0);

    let down = PriceDelta::new("T", 70.0, 100.0, "1D");
    assert_eq!(down.change_percent(), -30.0);
    assert_eq!(decision.momentum_score(Some(&down)), -1.0);
}

#[test]
fn test_news_score_stays_in_range() {
    let decision = DecisionService::new();
    let mixes = [
        vec![],
        vec![NewsSentiment::Positive],
        vec![NewsSentiment::Negative; 3],
        vec![NewsSentiment::Positive, NewsSentiment::Neutral, NewsSentiment::Negative],
        vec![NewsSentiment::Neutral; 10],
    ];

    for mix in mixes {
        let news: Vec<_> = mix.iter().map(|s| article(*s)).collect();
        let expected = if news.is_empty() {
            0.0
        } else {
            mix.iter().map(|s| s.score()).sum::<f64>() / mix.len() as f64
        };
        let score = decision.news_sentiment_score(&news);
        assert_eq!(score, expected);
        assert!((-1.0..=1.0).contains(&score));
    }
}

#[test]
fn test_confidence_always_clamped() {
    let decision = DecisionService::new();
    let quote = Quote {
        symbol: "T".to_string(),
        price: 10.0,
        currency: "USD".to_string(),
        timestamp: chrono::Utc::now(),
    };
    let deltas = [
        None,
        Some(PriceDelta::new("T", 130.0, 100.0, "1D")),
        Some(PriceDelta::new("T", 60.0, 100.0, "1D")),
    ];

    for count in [0usize, 1, 3, 10] {
        for sentiment in [NewsSentiment::Positive, NewsSentiment::Negative, NewsSentiment::Neutral] {
            let news: Vec<_> = (0..count).map(|_| article(sentiment)).collect();
            for quote in [None, Some(&quote)] {
                for delta in &deltas {
                    let result = decision.synthesize("T", "Test Inc", &news, quote, delta.as_ref());
                    assert!(
                        (0.1..=0.95).contains(&result.confidence()),
                        "confidence {} out of range",
                        result.confidence()
                    );
                }
            }
        }
    }
}

#[tokio::test]
async fn test_synthetic_price_change_is_consistent() {
    let collector = MarketDataCollector::new(synthetic_config()).unwrap();
    assert_eq!(collector.source(), &DataSource::Synthetic);

    for symbol in ["AAPL", "TSLA", "UNKNOWN"] {
        let delta = assert_ok!(collector.fetch_price_change(symbol).await);
        let recomputed = delta.change() / delta.previous_price() * 100.0;
        assert!(
            (recomputed - delta.change_percent()).abs() <= 0.01,
            "{}: {} vs {}",
            symbol,
            recomputed,
            delta.change_percent()
        );
        assert_eq!(
            delta.change(),
            ((delta.current_price() - delta.previous_price()) * 100.0).round() / 100.0
        );
        assert_eq!(delta.timeframe(), "1D");
    }
}

#[tokio::test]
async fn test_live_failure_without_fallback_surfaces_error() {
    let collector = MarketDataCollector::new(unreachable_live_config()).unwrap();

    assert_err!(collector.fetch_quote("AAPL").await);
    assert_err!(collector.fetch_news("AAPL").await);
    assert_err!(collector.fetch_price_change("AAPL").await);
}

#[tokio::test]
async fn test_live_failure_falls_back_to_synthetic() {
    let config = AppConfig {
        synthetic_fallback: true,
        ..unreachable_live_config()
    };
    let collector = MarketDataCollector::new(config).unwrap();

    let quote = assert_ok!(collector.fetch_quote("AAPL").await);
    assert_eq!(quote.currency, "USD");
    let news = assert_ok!(collector.fetch_news("AAPL").await);
    assert_eq!(news.len(), 4);
}

#[tokio::test]
async fn test_hanging_provider_still_falls_back_inside_pipeline() {
    // Провайдер принимает соединения, но никогда не отвечает
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = AppConfig {
        alpha_vantage_url: format!("http://{}/query", addr),
        fetch_timeout_secs: Some(1),
        synthetic_fallback: true,
        ..unreachable_live_config()
    };
    assert!(config.stage_deadline() > config.fetch_timeout());

    let pipeline = AnalysisPipeline::new(config).unwrap();
    let report = pipeline.run("AAPL stock").await.unwrap();

    assert_eq!(report.ticker, "AAPL");
    assert_eq!(report.news.len(), 4);
    assert!(report.current_price.is_some());
    assert!(report.price_change.is_some());
}

#[tokio::test]
async fn test_end_to_end_with_synthetic_data() {
    let pipeline = AnalysisPipeline::new(synthetic_config()).unwrap();
    let report = pipeline.run("Apple stock price analysis").await.unwrap();

    assert_eq!(report.query, "Apple stock price analysis");
    assert_eq!(report.ticker, "AAPL");
    assert_eq!(report.company_name, "Apple Inc");
    assert!(!report.analysis.is_empty());
    assert!(report.analysis.starts_with("Analysis for Apple Inc (AAPL):"));
    assert!((0.1..=0.95).contains(&report.confidence));
    assert!(report.news.len() <= 10);
    assert!(report.current_price.is_some());
    assert!(report.price_change.is_some());

    let json = serde_json::to_value(&report).unwrap();
    assert!(["bullish", "bearish", "neutral"].contains(&json["sentiment"].as_str().unwrap()));
    assert_eq!(json["news"][0]["sentiment"], "positive");
}

#[tokio::test]
async fn test_end_to_end_all_fetchers_failing() {
    let pipeline = AnalysisPipeline::new(unreachable_live_config()).unwrap();
    let report = pipeline.run("Why did Tesla stock drop today?").await.unwrap();

    assert_eq!(report.ticker, "TSLA");
    assert!(report.news.is_empty());
    assert!(report.current_price.is_none());
    assert!(report.price_change.is_none());
    assert_eq!(report.sentiment, MarketSentiment::Neutral);
    assert_eq!(report.confidence, 0.5);
}

#[tokio::test]
async fn test_resolution_failure_aborts_pipeline() {
    let pipeline = AnalysisPipeline::new(synthetic_config()).unwrap();
    let err = assert_err!(pipeline.run("hello world").await);
    assert!(matches!(err, StockAnalysisError::TickerNotFound { ref query } if query == "hello world"));
}

#[test]
fn test_config_validation() {
    let mut config = AppConfig::default();

    // Валидная конфигурация должна проходить
    assert!(config.validate().is_ok());
    assert_eq!(config.data_source(), DataSource::Synthetic);

    config.alpha_vantage_api_key = Some("   ".to_string());
    assert_eq!(config.data_source(), DataSource::Synthetic);

    config.alpha_vantage_api_key = Some("key".to_string());
    assert_eq!(
        config.data_source(),
        DataSource::Live {
            api_key: "key".to_string()
        }
    );

    // Неверное количество новостей
    config.news_limit = Some(0);
    assert!(config.validate().is_err());
    config.news_limit = Some(11);
    assert!(config.validate().is_err());
    config.news_limit = Some(10);
    assert!(config.validate().is_ok());

    // Неверный таймаут
    config.fetch_timeout_secs = Some(0);
    assert!(config.validate().is_err());
    config.fetch_timeout_secs = Some(500);
    assert!(config.validate().is_err());
    config.fetch_timeout_secs = Some(5);

    config.alpha_vantage_url = String::new();
    assert!(config.validate().is_err());
}
