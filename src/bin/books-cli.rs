use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "books-cli")]
#[command(about = "Management CLI for the book inventory service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8574")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// List books matching the filters, sorted by title
    Books(FilterArgs),
    /// Count books matching the filters
    Total(FilterArgs),
    /// Show a single book
    Get {
        id: u64,
    },
    /// Show the level of a log stream (request or books)
    GetLevel {
        name: String,
    },
    /// Change the level of a log stream
    SetLevel {
        name: String,
        /// ERROR, INFO or DEBUG
        level: String,
    },
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    price_bigger_than: Option<i64>,
    #[arg(long)]
    price_less_than: Option<i64>,
    #[arg(long)]
    year_bigger_than: Option<i64>,
    #[arg(long)]
    year_less_than: Option<i64>,
    /// Comma-separated genre tags, e.g. NOVEL,MANGA
    #[arg(long)]
    genres: Option<String>,
}

impl FilterArgs {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(author) = &self.author {
            query.push(("author", author.clone()));
        }
        if let Some(v) = self.price_bigger_than {
            query.push(("price-bigger-than", v.to_string()));
        }
        if let Some(v) = self.price_less_than {
            query.push(("price-less-than", v.to_string()));
        }
        if let Some(v) = self.year_bigger_than {
            query.push(("year-bigger-than", v.to_string()));
        }
        if let Some(v) = self.year_less_than {
            query.push(("year-less-than", v.to_string()));
        }
        if let Some(genres) = &self.genres {
            query.push(("genres", genres.clone()));
        }
        query
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/books/health", cli.url)).send().await?,
        Commands::Books(filters) => {
            client
                .get(format!("{}/books", cli.url))
                .query(&filters.query())
                .send()
                .await?
        }
        Commands::Total(filters) => {
            client
                .get(format!("{}/books/total", cli.url))
                .query(&filters.query())
                .send()
                .await?
        }
        Commands::Get { id } => {
            client
                .get(format!("{}/book", cli.url))
                .query(&[("id", id)])
                .send()
                .await?
        }
        Commands::GetLevel { name } => {
            client
                .get(format!("{}/logs/level", cli.url))
                .query(&[("logger-name", name)])
                .send()
                .await?
        }
        Commands::SetLevel { name, level } => {
            client
                .put(format!("{}/logs/level", cli.url))
                .query(&[("logger-name", name), ("logger-level", level)])
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
