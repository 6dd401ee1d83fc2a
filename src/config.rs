use anyhow::Result;
use config::Config;
use std::env;
use std::time::Duration;

pub const DEFAULT_ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_NEWS_LIMIT: usize = 5;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

// Запас сверх таймаута HTTP клиента, чтобы фетчер успел подменить данные
// синтетикой (эмуляция задержки занимает до 1.2 с)
const FALLBACK_GRACE: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, serde::Deserialize)]
pub struct AppConfig {
    pub alpha_vantage_url: String,
    pub alpha_vantage_api_key: Option<String>,
    pub news_limit: Option<usize>,
    pub fetch_timeout_secs: Option<u64>,
    pub synthetic_fallback: bool,
    pub simulate_latency: bool,
    pub json_logs: bool,
}

/// Откуда фетчеры берут данные. Решается один раз при сборке пайплайна.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Live { api_key: String },
    Synthetic,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            alpha_vantage_url: DEFAULT_ALPHA_VANTAGE_URL.to_string(),
            alpha_vantage_api_key: None,
            news_limit: None,
            fetch_timeout_secs: None,
            synthetic_fallback: true,
            simulate_latency: false,
            json_logs: false,
        }
    }
}

impl AppConfig {
    /// Валидация конфигурации
    pub fn validate(&self) -> Result<()> {
        if self.alpha_vantage_url.trim().is_empty() {
            return Err(anyhow::anyhow!("alpha_vantage_url cannot be empty"));
        }

        if let Some(news_limit) = self.news_limit {
            if news_limit == 0 || news_limit > 10 {
                return Err(anyhow::anyhow!("news_limit must be between 1 and 10"));
            }
        }

        if let Some(timeout) = self.fetch_timeout_secs {
            if timeout == 0 || timeout > 120 {
                return Err(anyhow::anyhow!("fetch_timeout_secs must be between 1 and 120"));
            }
        }

        Ok(())
    }

    pub fn data_source(&self) -> DataSource {
        match self.alpha_vantage_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => DataSource::Live {
                api_key: key.to_string(),
            },
            _ => DataSource::Synthetic,
        }
    }

    pub fn news_limit(&self) -> usize {
        self.news_limit.unwrap_or(DEFAULT_NEWS_LIMIT)
    }

    /// Таймаут одного HTTP запроса к провайдеру.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    /// Дедлайн фетчера в оркестраторе. Всегда длиннее таймаута клиента.
    pub fn stage_deadline(&self) -> Duration {
        self.fetch_timeout() + FALLBACK_GRACE
    }
}

pub fn load_config() -> Result<AppConfig> {
    // Загружаем .env файл
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .set_default("alpha_vantage_url", DEFAULT_ALPHA_VANTAGE_URL)?
        .set_default("synthetic_fallback", true)?
        .set_default("simulate_latency", false)?
        .set_default("json_logs", false)?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("STOCK_ANALYZER"))
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // Ключ не обязателен: без него работаем на синтетических данных
    if let Ok(key) = env::var("ALPHA_VANTAGE_API_KEY") {
        config.alpha_vantage_api_key = Some(key);
    }

    config.validate()?;

    Ok(config)
}
