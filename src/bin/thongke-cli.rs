use clap::Parser;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use hotich_stats_proxy::AggregateResult;

#[derive(Parser)]
#[command(name = "thongke-cli")]
#[command(about = "Query a running civil-registry stats proxy", long_about = None)]
struct Cli {
    /// Base URL of the proxy.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Bearer token for the upstream registry portal ("Bearer " prefix
    /// added when missing).
    #[arg(short, long)]
    token: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let auth_value = if cli.token.starts_with("Bearer ") {
        cli.token.clone()
    } else {
        format!("Bearer {}", cli.token)
    };

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&auth_value)?);

    let res = client
        .get(format!(
            "{}/api/hotich/thongke",
            cli.url.trim_end_matches('/')
        ))
        .headers(headers)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let result: AggregateResult = res.json().await?;

    let total: u64 = result.totals.values().sum();
    for (label, count) in &result.totals {
        println!("{count:>10}  {label}");
    }
    println!("{total:>10}  (tổng cộng)");

    if result.unauthorized {
        eprintln!("Warning: upstream rejected the token; totals are incomplete");
        std::process::exit(2);
    }

    Ok(())
}
