use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stock_query_analyzer::{load_config, AnalysisPipeline, AnalysisReport};

#[derive(Parser, Debug)]
#[command(name = "stock_query_analyzer")]
#[command(about = "Answers a free-text question about a stock", long_about = None)]
struct Args {
    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Question, e.g. "Why did Tesla stock drop today?"
    #[arg(required = true, trailing_var_arg = true)]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config()?;

    // Логи в stderr, stdout остаётся под отчёт
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stock_query_analyzer=info,warn"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.json_logs {
        registry
            .with(fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer))
            .init();
    }

    let query = args.query.join(" ");
    let pipeline = AnalysisPipeline::new(config)?;
    let report = pipeline.run(&query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("{} ({})", report.company_name, report.ticker);
    println!(
        "Sentiment: {} | Confidence: {:.0}%",
        report.sentiment.as_str(),
        report.confidence * 100.0
    );

    if let Some(quote) = &report.current_price {
        println!("Price: ${:.2} {}", quote.price, quote.currency);
    }
    if let Some(delta) = &report.price_change {
        println!(
            "Change ({}): {:+.2} ({:+.2}%) from ${:.2}",
            delta.timeframe(),
            delta.change(),
            delta.change_percent(),
            delta.previous_price()
        );
    }

    println!();
    println!("{}", report.analysis);

    if !report.news.is_empty() {
        println!("News:");
        for item in &report.news {
            println!(
                "  [{:?}] {} ({}, {})",
                item.sentiment,
                item.title,
                item.source,
                item.published_at.format("%Y-%m-%d %H:%M UTC")
            );
            println!("    {}", item.url);
        }
    }

    println!();
    println!("Generated at {}", report.timestamp.to_rfc3339());
}
