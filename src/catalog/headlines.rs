use crate::models::NewsSentiment;

pub struct HeadlineTemplate {
    pub title: &'static str,
    pub summary: &'static str,
    pub source: &'static str,
    pub sentiment: NewsSentiment,
    pub hours_ago: i64,
}

impl HeadlineTemplate {
    pub fn render_title(&self, symbol: &str) -> String {
        self.title.replace("{ticker}", symbol)
    }

    pub fn render_summary(&self, symbol: &str) -> String {
        self.summary.replace("{ticker}", symbol)
    }
}

// Порядок фиксированный: от свежих к старым
pub const HEADLINE_TEMPLATES: &[HeadlineTemplate] = &[
    HeadlineTemplate {
        title: "{ticker} Reports Strong Q4 Earnings, Beats Analyst Expectations",
        summary: "{ticker} announced quarterly earnings that exceeded Wall Street expectations, driving positive investor sentiment and stock price momentum. The company showed robust revenue growth and improved profit margins.",
        source: "Financial Times",
        sentiment: NewsSentiment::Positive,
        hours_ago: 2,
    },
    HeadlineTemplate {
        title: "Market Volatility Affects {ticker} Trading Volume",
        summary: "Recent market uncertainties have led to increased trading volume for {ticker}, with analysts watching for trend reversals. The broader market conditions continue to influence stock performance.",
        source: "Reuters",
        sentiment: NewsSentiment::Neutral,
        hours_ago: 6,
    },
    HeadlineTemplate {
        title: "Regulatory Concerns Impact {ticker} Stock Performance",
        summary: "New regulatory developments in the sector have created headwinds for {ticker}, causing some investors to reassess positions. Industry experts suggest monitoring upcoming policy announcements.",
        source: "Bloomberg",
        sentiment: NewsSentiment::Negative,
        hours_ago: 12,
    },
    HeadlineTemplate {
        title: "{ticker} Announces Strategic Partnership Initiative",
        summary: "{ticker} has entered into a strategic partnership that could enhance its market position and drive future growth. The collaboration aims to leverage synergies and expand market reach.",
        source: "MarketWatch",
        sentiment: NewsSentiment::Positive,
        hours_ago: 18,
    },
    HeadlineTemplate {
        title: "Analyst Upgrades {ticker} Price Target Following Recent Performance",
        summary: "Several Wall Street analysts have raised their price targets for {ticker} citing strong fundamentals and positive business outlook. The upgrade reflects confidence in the company's strategic direction.",
        source: "CNBC",
        sentiment: NewsSentiment::Positive,
        hours_ago: 24,
    },
    HeadlineTemplate {
        title: "Supply Chain Challenges May Impact {ticker} Operations",
        summary: "Industry-wide supply chain disruptions could affect {ticker}'s production schedules and delivery timelines. Management is implementing contingency plans to minimize operational impact.",
        source: "Wall Street Journal",
        sentiment: NewsSentiment::Negative,
        hours_ago: 30,
    },
];
