/// Известные названия компаний и тикеры: ключ в нижнем регистре -> (тикер, название)
pub const TICKER_ALIASES: &[(&str, &str, &str)] = &[
    // Tech
    ("tesla", "TSLA", "Tesla Inc"),
    ("apple", "AAPL", "Apple Inc"),
    ("microsoft", "MSFT", "Microsoft Corporation"),
    ("google", "GOOGL", "Alphabet Inc"),
    ("alphabet", "GOOGL", "Alphabet Inc"),
    ("amazon", "AMZN", "Amazon.com Inc"),
    ("meta", "META", "Meta Platforms Inc"),
    ("facebook", "META", "Meta Platforms Inc"),
    ("nvidia", "NVDA", "NVIDIA Corporation"),
    ("palantir", "PLTR", "Palantir Technologies Inc"),
    ("netflix", "NFLX", "Netflix Inc"),
    ("amd", "AMD", "Advanced Micro Devices Inc"),
    ("intel", "INTC", "Intel Corporation"),
    ("salesforce", "CRM", "Salesforce Inc"),
    ("adobe", "ADBE", "Adobe Inc"),
    ("oracle", "ORCL", "Oracle Corporation"),
    ("uber", "UBER", "Uber Technologies Inc"),
    ("lyft", "LYFT", "Lyft Inc"),
    ("airbnb", "ABNB", "Airbnb Inc"),
    ("zoom", "ZM", "Zoom Video Communications Inc"),
    ("slack", "WORK", "Slack Technologies Inc"),
    ("spotify", "SPOT", "Spotify Technology SA"),
    ("twitter", "TWTR", "Twitter Inc"),
    ("snap", "SNAP", "Snap Inc"),
    ("snapchat", "SNAP", "Snap Inc"),
    ("pinterest", "PINS", "Pinterest Inc"),
    ("square", "SQ", "Square Inc"),
    ("paypal", "PYPL", "PayPal Holdings Inc"),
    ("mastercard", "MA", "Mastercard Inc"),
    ("visa", "V", "Visa Inc"),
    // Finance
    ("jpmorgan", "JPM", "JPMorgan Chase & Co"),
    ("goldman", "GS", "Goldman Sachs Group Inc"),
    ("berkshire", "BRK.A", "Berkshire Hathaway Inc"),
    ("bankofamerica", "BAC", "Bank of America Corp"),
    ("wellsfargo", "WFC", "Wells Fargo & Co"),
    ("citigroup", "C", "Citigroup Inc"),
    ("americanexpress", "AXP", "American Express Co"),
    // Healthcare & Pharma
    ("johnson", "JNJ", "Johnson & Johnson"),
    ("pfizer", "PFE", "Pfizer Inc"),
    ("moderna", "MRNA", "Moderna Inc"),
    ("abbvie", "ABBV", "AbbVie Inc"),
    ("merck", "MRK", "Merck & Co Inc"),
    // Retail & Consumer
    ("walmart", "WMT", "Walmart Inc"),
    ("target", "TGT", "Target Corp"),
    ("homedepot", "HD", "Home Depot Inc"),
    ("costco", "COST", "Costco Wholesale Corp"),
    ("starbucks", "SBUX", "Starbucks Corp"),
    ("mcdonalds", "MCD", "McDonalds Corp"),
    ("nike", "NKE", "Nike Inc"),
    ("coca", "KO", "Coca-Cola Co"),
    ("cocacola", "KO", "Coca-Cola Co"),
    ("pepsi", "PEP", "PepsiCo Inc"),
    // Energy & Utilities
    ("exxon", "XOM", "Exxon Mobil Corp"),
    ("chevron", "CVX", "Chevron Corp"),
    ("shell", "SHEL", "Shell PLC"),
    // Direct tickers
    ("tsla", "TSLA", "Tesla Inc"),
    ("aapl", "AAPL", "Apple Inc"),
    ("msft", "MSFT", "Microsoft Corporation"),
    ("googl", "GOOGL", "Alphabet Inc"),
    ("goog", "GOOGL", "Alphabet Inc"),
    ("amzn", "AMZN", "Amazon.com Inc"),
    ("nvda", "NVDA", "NVIDIA Corporation"),
    ("pltr", "PLTR", "Palantir Technologies Inc"),
    ("nflx", "NFLX", "Netflix Inc"),
    ("intc", "INTC", "Intel Corporation"),
    ("crm", "CRM", "Salesforce Inc"),
    ("adbe", "ADBE", "Adobe Inc"),
    ("orcl", "ORCL", "Oracle Corporation"),
    ("jpm", "JPM", "JPMorgan Chase & Co"),
    ("gs", "GS", "Goldman Sachs Group Inc"),
    ("jnj", "JNJ", "Johnson & Johnson"),
    ("pfe", "PFE", "Pfizer Inc"),
    ("wmt", "WMT", "Walmart Inc"),
    ("ko", "KO", "Coca-Cola Co"),
    ("dis", "DIS", "Walt Disney Co"),
    ("ba", "BA", "Boeing Co"),
    ("cat", "CAT", "Caterpillar Inc"),
    ("ge", "GE", "General Electric Co"),
    ("ibm", "IBM", "International Business Machines Corp"),
];

/// Точный поиск по ключу (ожидается нижний регистр)
pub fn lookup_alias(key: &str) -> Option<(&'static str, &'static str)> {
    TICKER_ALIASES
        .iter()
        .find(|(alias, _, _)| *alias == key)
        .map(|(_, symbol, name)| (*symbol, *name))
}
