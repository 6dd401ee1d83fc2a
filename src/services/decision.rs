use std::fmt::Write;

use crate::models::{MarketSnapshot, NewsItem, NewsSentiment, PriceDelta, Quote, SentimentResult};

const BASE_CONFIDENCE: f64 = 0.5;
const DATA_BONUS: f64 = 0.1;

/// Синтезирует текстовый анализ, метку и уверенность из того, что собрали фетчеры.
/// Работает с любыми частичными данными и никогда не падает.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecisionService;

impl DecisionService {
    pub fn new() -> Self {
        DecisionService
    }

    pub fn synthesize(
        &self,
        ticker: &str,
        company_name: &str,
        news: &[NewsItem],
        quote: Option<&Quote>,
        price_change: Option<&PriceDelta>,
    ) -> SentimentResult {
        let news_score = self.news_sentiment_score(news);
        let momentum_score = self.momentum_score(price_change);

        let narrative = self.compose_narrative(
            ticker,
            company_name,
            news,
            quote,
            price_change,
            news_score,
            momentum_score,
        );
        let confidence =
            self.calculate_confidence(news, quote, price_change, news_score, momentum_score);

        let result = SentimentResult::new(narrative, news_score, momentum_score, confidence);
        tracing::info!(
            "Анализ {} готов: {} (уверенность {:.2})",
            ticker,
            result.label().as_str(),
            result.confidence()
        );
        result
    }

    pub fn synthesize_snapshot(
        &self,
        ticker: &str,
        company_name: &str,
        snapshot: &MarketSnapshot,
    ) -> SentimentResult {
        self.synthesize(
            ticker,
            company_name,
            &snapshot.news,
            snapshot.quote.as_ref(),
            snapshot.price_change.as_ref(),
        )
    }

    /// Среднее по статьям: +1 / 0 / -1, для пустого списка 0
    pub fn news_sentiment_score(&self, news: &[NewsItem]) -> f64 {
        if news.is_empty() {
            return 0.0;
        }

        news.iter().map(|item| item.sentiment.score()).sum::<f64>() / news.len() as f64
    }

    /// Процент изменения / 10, зажатый в [-1, 1]
    pub fn momentum_score(&self, price_change: Option<&PriceDelta>) -> f64 {
        price_change
            .map(|delta| (delta.change_percent() / 10.0).clamp(-1.0, 1.0))
            .unwrap_or(0.0)
    }

    fn calculate_confidence(
        &self,
        news: &[NewsItem],
        quote: Option<&Quote>,
        price_change: Option<&PriceDelta>,
        news_score: f64,
        momentum_score: f64,
    ) -> f64 {
        let mut confidence = BASE_CONFIDENCE;

        if quote.is_some() {
            confidence += DATA_BONUS;
        }
        if price_change.is_some() {
            confidence += DATA_BONUS;
        }
        if !news.is_empty() {
            confidence += DATA_BONUS;
        }
        if news.len() >= 3 {
            confidence += DATA_BONUS;
        }

        if sign(news_score) == sign(momentum_score) && news_score.abs() > 0.1 {
            confidence += DATA_BONUS;
        }

        confidence += news_score.abs() * 0.1;
        confidence += momentum_score.abs() * 0.1;

        confidence
    }

    #[allow(clippy::too_many_arguments)]
    fn compose_narrative(
        &self,
        ticker: &str,
        company_name: &str,
        news: &[NewsItem],
        quote: Option<&Quote>,
        price_change: Option<&PriceDelta>,
        news_score: f64,
        momentum_score: f64,
    ) -> String {
        let company = if company_name.is_empty() { ticker } else { company_name };
        let mut text = format!("Analysis for {} ({}):\n\n", company, ticker);

        // Запись в String не может вернуть ошибку
        if quote.is_some() || price_change.is_some() {
            if let Some(quote) = quote {
                let _ = writeln!(text, "Current price: ${:.2}", quote.price);
            }
            if let Some(delta) = price_change {
                let direction = if delta.change() >= 0.0 { "increased" } else { "decreased" };
                let magnitude = if delta.change_percent().abs() > 5.0 {
                    "significantly"
                } else {
                    "moderately"
                };
                let _ = writeln!(
                    text,
                    "The stock has {} {} by {:.2}% ({}${:.2}) in the last trading period.",
                    magnitude,
                    direction,
                    delta.change_percent().abs(),
                    if delta.change() >= 0.0 { "+" } else { "-" },
                    delta.change().abs()
                );
            }
            text.push('\n');
        }

        if !news.is_empty() {
            text.push_str("Recent news impact:\n");
            let count = |sentiment: NewsSentiment| news.iter().filter(|n| n.sentiment == sentiment).count();

            let positive = count(NewsSentiment::Positive);
            let negative = count(NewsSentiment::Negative);
            let neutral = count(NewsSentiment::Neutral);

            if positive > 0 {
                let _ = writeln!(text, "- {} positive news item(s) supporting bullish sentiment", positive);
            }
            if negative > 0 {
                let _ = writeln!(text, "- {} negative news item(s) creating bearish pressure", negative);
            }
            if neutral > 0 {
                let _ = writeln!(text, "- {} neutral news item(s) providing market context", neutral);
            }
            text.push('\n');
        }

        text.push_str(match news_score {
            x if x > 0.3 => "News sentiment is predominantly positive, suggesting investor optimism.\n",
            x if x < -0.3 => "News sentiment is predominantly negative, indicating investor concerns.\n",
            _ => "News sentiment is balanced, showing mixed market opinions.\n",
        });

        text.push_str(match momentum_score {
            x if x > 0.1 => "Price momentum is positive, indicating upward market pressure.\n",
            x if x < -0.1 => "Price momentum is negative, showing downward market pressure.\n",
            _ => "Price momentum is neutral, suggesting market equilibrium.\n",
        });

        let mut insights = Vec::new();
        if momentum_score.abs() > 0.2 {
            if sign(momentum_score) == sign(news_score) {
                insights.push(
                    "Price movement aligns with news sentiment, reinforcing the current trend.".to_string(),
                );
            } else {
                insights.push(
                    "Price movement diverges from news sentiment, suggesting potential market inefficiency."
                        .to_string(),
                );
            }
        }
        if let Some(latest) = news.first() {
            insights.push(format!("Most recent development: \"{}\"", latest.title));
        }

        if !insights.is_empty() {
            text.push_str("\nKey insights:\n");
            for insight in insights {
                let _ = writeln!(text, "- {}", insight);
            }
        }

        text
    }
}

// Знак с нулём: 0.0 не считается ни положительным, ни отрицательным
fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
