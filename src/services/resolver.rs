use regex::Regex;

use crate::catalog::{lookup_alias, TICKER_ALIASES};
use crate::errors::{Result, StockAnalysisError};
use crate::models::TickerMatch;

const STOCK_TERMS: &[&str] = &["stock", "share", "shares", "equity", "ticker", "symbol"];

const PRICE_ACTION_WORDS: &[&str] = &[
    "drop", "dropped", "fall", "fell", "rise", "rose", "up", "down", "increase",
    "decrease", "gain", "loss", "surge", "plunge", "rally", "crash",
];

// Составные названия вроде "bank of america" -> "bankofamerica"
const MAX_COMPOUND_WORDS: usize = 3;

struct KnownName {
    pattern: Regex,
    symbol: &'static str,
    company_name: &'static str,
}

/// Распознаёт тикер в свободном тексте. Стратегии идут строго по приоритету:
/// известное название, затем шаблон тикера, затем контекстный поиск.
pub struct TickerResolver {
    known_names: Vec<KnownName>,
    ticker_patterns: Vec<Regex>,
    symbol_shape: Regex,
    punctuation: Regex,
    whitespace: Regex,
}

impl TickerResolver {
    pub fn new() -> Result<Self> {
        let mut aliases: Vec<_> = TICKER_ALIASES.iter().collect();
        // Длинные ключи первыми, чтобы "alphabet" не перебивался более коротким
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let known_names = aliases
            .into_iter()
            .map(|&(key, symbol, company_name)| {
                Ok(KnownName {
                    pattern: Regex::new(&format!(r"\b{}\b", regex::escape(key)))?,
                    symbol,
                    company_name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let ticker_patterns = vec![
            // AAPL, BRK.A
            Regex::new(r"\b([A-Z]{1,5}(?:\.[A-Z])?)\b")?,
            // $AAPL, $tsla
            Regex::new(r"\$([A-Za-z]{1,5}(?:\.[A-Za-z])?)\b")?,
            // XYZ stock, XYZshares
            Regex::new(r"\b([A-Z]{2,5})\s*(?i:stock|shares?|ticker)")?,
        ];

        Ok(TickerResolver {
            known_names,
            ticker_patterns,
            symbol_shape: Regex::new(r"^[A-Z]{1,5}(?:\.[A-Z])?$")?,
            punctuation: Regex::new(r"[^\w\s]")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    pub fn resolve(&self, query: &str) -> Result<TickerMatch> {
        tracing::debug!("Распознаём тикер в запросе: {}", query);
        let cleaned = self.clean_query(query);

        let resolved = self
            .match_known_name(&cleaned)
            .or_else(|| self.extract_symbol(query))
            .or_else(|| self.match_context(query, &cleaned));

        match resolved {
            Some(ticker) => {
                tracing::info!("Найден тикер {} ({})", ticker.symbol, ticker.company_name);
                Ok(ticker)
            }
            None => {
                tracing::warn!("Не удалось распознать тикер: {}", query);
                Err(StockAnalysisError::TickerNotFound {
                    query: query.to_string(),
                })
            }
        }
    }

    fn clean_query(&self, query: &str) -> String {
        let lowered = query.to_lowercase();
        let cleaned = self.punctuation.replace_all(lowered.trim(), " ");
        let cleaned = self.whitespace.replace_all(&cleaned, " ");
        cleaned.trim().to_string()
    }

    fn match_known_name(&self, cleaned: &str) -> Option<TickerMatch> {
        self.known_names
            .iter()
            .find(|known| known.pattern.is_match(cleaned))
            .map(|known| {
                tracing::debug!("Совпадение по названию: {}", known.symbol);
                TickerMatch {
                    symbol: known.symbol.to_string(),
                    company_name: known.company_name.to_string(),
                }
            })
    }

    fn extract_symbol(&self, query: &str) -> Option<TickerMatch> {
        let normalized = self.whitespace.replace_all(query.trim(), " ");

        for pattern in &self.ticker_patterns {
            let Some(captures) = pattern.captures(&normalized) else {
                continue;
            };
            let symbol = captures[1].to_uppercase();
            if !self.symbol_shape.is_match(&symbol) {
                continue;
            }

            tracing::debug!("Тикер извлечён по шаблону: {}", symbol);
            let company_name = lookup_alias(&symbol.to_lowercase())
                .map(|(_, name)| name.to_string())
                .unwrap_or_else(|| format!("{} Corporation", symbol));

            return Some(TickerMatch {
                symbol,
                company_name,
            });
        }

        None
    }

    fn match_context(&self, query: &str, cleaned: &str) -> Option<TickerMatch> {
        let lowered = query.to_lowercase();
        let has_context = STOCK_TERMS
            .iter()
            .chain(PRICE_ACTION_WORDS)
            .any(|term| lowered.contains(term));
        if !has_context {
            return None;
        }

        let words: Vec<&str> = cleaned.split_whitespace().collect();
        for start in 0..words.len() {
            let single = words[start];
            let mut candidates = Vec::with_capacity(MAX_COMPOUND_WORDS);
            if single.len() > 2 {
                candidates.push(single.to_string());
            }
            for width in 2..=MAX_COMPOUND_WORDS {
                if start + width <= words.len() {
                    candidates.push(words[start..start + width].concat());
                }
            }

            for candidate in candidates {
                if let Some((symbol, company_name)) = lookup_alias(&candidate) {
                    tracing::debug!("Контекстное совпадение: {} -> {}", candidate, symbol);
                    return Some(TickerMatch {
                        symbol: symbol.to_string(),
                        company_name: company_name.to_string(),
                    });
                }
            }
        }

        None
    }
}
