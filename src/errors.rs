// errors.rs
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum StockAnalysisError {
    #[error("Could not identify stock ticker from query: \"{query}\". Please try including the company name or stock symbol.")]
    TickerNotFound { query: String },

    #[error("Ошибка HTTP запроса: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Ошибка парсинга даты: {0}")]
    DateError(#[from] chrono::ParseError),

    #[error("Ошибка regex: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Ошибка выполнения задачи: {0}")]
    TaskError(#[from] JoinError),

    #[error("API вернул ошибку: {0}")]
    ApiError(String),

    #[error("Превышен лимит запросов к API: {0}")]
    RateLimited(String),

    #[error("Некорректный формат данных: {0}")]
    InvalidDataFormat(String),

    #[error("Недостаточно данных: {0}")]
    InsufficientData(String),

    #[error("Агент {agent} не ответил за {limit:?}")]
    Timeout { agent: &'static str, limit: Duration },
}

// Определяем псевдоним Result с фиксированным типом ошибки
pub type Result<T> = std::result::Result<T, StockAnalysisError>;
