use clap::Parser;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "tmdb-cli")]
#[command(about = "Query TMDB through a running tmdb-proxy", long_about = None)]
struct Cli {
    /// Proxy route URL.
    #[arg(short, long, default_value = "http://localhost:8080/api/tmdb")]
    url: String,

    /// TMDB path below /3, e.g. `movie/550` or `search/movie`.
    endpoint: String,

    /// Raw query fragment, e.g. `query=matrix&page=2`.
    #[arg(short, long)]
    params: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client.post(&cli.url).json(&request_body(&cli)).send().await?;
    print_response(res).await
}

/// The proxy request body: `params` is only sent when given.
fn request_body(cli: &Cli) -> Value {
    let mut body = json!({ "endpoint": cli.endpoint });
    if let Some(params) = &cli.params {
        body["params"] = Value::String(params.clone());
    }
    body
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Error: proxy returned status {}", status);
        eprintln!("{}", rendered);
    }
    Ok(())
}
