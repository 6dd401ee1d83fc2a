use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMatch {
    pub symbol: String,
    pub company_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsSentiment {
    Positive,
    Negative,
    Neutral,
}

impl NewsSentiment {
    /// Порог +-0.15 для оценки провайдера
    pub fn from_provider_score(score: f64) -> Self {
        if score > 0.15 {
            NewsSentiment::Positive
        } else if score < -0.15 {
            NewsSentiment::Negative
        } else {
            NewsSentiment::Neutral
        }
    }

    pub fn score(self) -> f64 {
        match self {
            NewsSentiment::Positive => 1.0,
            NewsSentiment::Negative => -1.0,
            NewsSentiment::Neutral => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub sentiment: NewsSentiment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub currency: String,
    pub timestamp: DateTime<Utc>,
}

/// Изменение цены за период. `change` и `change_percent` всегда выводятся из цен.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceDelta {
    symbol: String,
    current_price: f64,
    previous_price: f64,
    change: f64,
    change_percent: f64,
    timeframe: String,
}

impl PriceDelta {
    /// Цены округляются до центов, изменение считается уже по округлённым значениям.
    pub fn new(
        symbol: impl Into<String>,
        current_price: f64,
        previous_price: f64,
        timeframe: impl Into<String>,
    ) -> Self {
        let current_price = round_cents(current_price);
        let previous_price = round_cents(previous_price);
        let change = round_cents(current_price - previous_price);
        let change_percent = if previous_price != 0.0 {
            round_cents((current_price - previous_price) / previous_price * 100.0)
        } else {
            0.0
        };

        PriceDelta {
            symbol: symbol.into(),
            current_price,
            previous_price,
            change,
            change_percent,
            timeframe: timeframe.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn previous_price(&self) -> f64 {
        self.previous_price
    }

    pub fn change(&self) -> f64 {
        self.change
    }

    pub fn change_percent(&self) -> f64 {
        self.change_percent
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketSentiment {
    pub fn from_scores(news_score: f64, momentum_score: f64) -> Self {
        match (news_score + momentum_score) / 2.0 {
            x if x > 0.2 => MarketSentiment::Bullish,
            x if x < -0.2 => MarketSentiment::Bearish,
            _ => MarketSentiment::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarketSentiment::Bullish => "bullish",
            MarketSentiment::Bearish => "bearish",
            MarketSentiment::Neutral => "neutral",
        }
    }
}

pub const MIN_CONFIDENCE: f64 = 0.1;
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Итог синтеза. Метка выводится из двух оценок, уверенность зажата в [0.1, 0.95].
#[derive(Debug, Clone, Serialize)]
pub struct SentimentResult {
    narrative: String,
    label: MarketSentiment,
    confidence: f64,
}

impl SentimentResult {
    pub fn new(narrative: String, news_score: f64, momentum_score: f64, confidence: f64) -> Self {
        SentimentResult {
            narrative,
            label: MarketSentiment::from_scores(news_score, momentum_score),
            confidence: confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
        }
    }

    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    pub fn label(&self) -> MarketSentiment {
        self.label
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// То, что удалось собрать фетчерам. Отсутствующие данные уже заменены на пустые.
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    pub news: Vec<NewsItem>,
    pub quote: Option<Quote>,
    pub price_change: Option<PriceDelta>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub query: String,
    pub ticker: String,
    pub company_name: String,
    pub current_price: Option<Quote>,
    pub price_change: Option<PriceDelta>,
    pub news: Vec<NewsItem>,
    pub analysis: String,
    pub sentiment: MarketSentiment,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
