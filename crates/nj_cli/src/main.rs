use anyhow::anyhow;
use chrono::{TimeZone, Utc};
use clap::Parser;
use nj_catalog::MemoryCatalog;
use nj_core::{Article, Catalog};
use nj_journal::{SessionRegistry, Status};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Personal news reading journal", long_about = None)]
struct Cli {
    /// Session to open the journal under
    #[arg(long, default_value = "reader")]
    user: String,
    /// Print results as JSON instead of plain lines
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Seed an in-memory catalog and walk a journal through its paces
    Demo,
    /// List the seeded catalog
    Catalog,
}

fn sample_articles() -> anyhow::Result<Vec<Article>> {
    let mk = |id: u64, author: &str, title: &str, content: &str| -> anyhow::Result<Article> {
        let published = Utc
            .with_ymd_and_hms(2024, 5, id as u32, 8, 0, 0)
            .single()
            .ok_or_else(|| anyhow!("bad sample timestamp for article {}", id))?;
        Ok(Article::new(
            id,
            "The Morning Wire",
            author,
            title,
            format!("https://example.com/wire/{}", id),
            content,
            published,
        )?)
    };
    Ok(vec![
        mk(
            1,
            "Ada Calder",
            "Ferry line reopens after a decade",
            "The harbour ferry made its first crossing in ten years on Monday, \
             carrying commuters past the half-finished bridge that was meant \
             to replace it.",
        )?,
        mk(
            2,
            "Ben Ostrowski",
            "City council votes on night buses",
            "A late amendment extends the pilot to the northern suburbs, with \
             a review scheduled for the autumn session.",
        )?,
        mk(
            3,
            "Carla Mendes",
            "Allotment waiting lists hit record",
            "Demand for garden plots has tripled since the pandemic, and the \
             parks department is now eyeing two disused rail yards.",
        )?,
        mk(
            4,
            "Ben Ostrowski",
            "Night bus pilot: first week in numbers",
            "Ridership beat projections on every line except the coastal \
             loop, where roadworks cut the service short.",
        )?,
    ])
}

async fn run_demo(
    registry: &SessionRegistry,
    catalog: &MemoryCatalog,
    user: &str,
    json: bool,
) -> anyhow::Result<()> {
    let service = registry.open(user).await?;
    info!(user, "journal session opened");

    for id in [1, 2, 3] {
        let response = service.add_article_by_id(id).await;
        if response.status != Status::Success {
            return Err(anyhow!(
                "failed to add article {}: {:?}",
                id,
                response.error_kind
            ));
        }
        info!(
            id,
            article_number = response.article_number,
            "added from catalog"
        );
    }
    let published = Utc
        .with_ymd_and_hms(2024, 5, 4, 8, 0, 0)
        .single()
        .ok_or_else(|| anyhow!("bad timestamp"))?;
    let by_key = service
        .add_article_by_key(
            "Ben Ostrowski",
            "Night bus pilot: first week in numbers",
            published,
        )
        .await;
    if by_key.status != Status::Success {
        return Err(anyhow!("compound-key add failed: {:?}", by_key.error_kind));
    }

    // Reshuffle: latest bus story first, the ferry piece to the back.
    service.move_to_front(4).await;
    service.move_to_end(2).await;
    service.swap(2, 3).await;

    let read = service.read_current().await;
    if let Some(article) = &read.article {
        info!(title = %article.title, cursor = read.cursor, "read");
    }

    let rest = service.read_rest_of_journal().await;
    info!(
        count = rest.articles.len(),
        cursor = rest.cursor,
        "read the rest"
    );

    let stats = service.stats().await;
    service.rewind().await;
    let listing = service.list().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        for entry in &listing.entries {
            let reads = catalog.read_count(entry.article.id).await?;
            println!(
                "{:>2}. {} by {} ({} reads)",
                entry.article_number, entry.article.title, entry.article.author, reads
            );
        }
        println!(
            "{} articles, about {}s of reading",
            stats.length, stats.duration_secs
        );
    }
    Ok(())
}

async fn run_catalog(catalog: &MemoryCatalog, json: bool) -> anyhow::Result<()> {
    let articles = catalog.list_all().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
    } else {
        for article in &articles {
            println!("{:>3} {} by {}", article.id, article.title, article.author);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();

    let catalog = Arc::new(MemoryCatalog::new());
    catalog.seed(sample_articles()?).await?;
    info!("📰 seeded in-memory catalog");

    match cli.command {
        Commands::Demo => {
            let registry = SessionRegistry::new(catalog.clone());
            run_demo(&registry, &catalog, &cli.user, cli.json).await
        }
        Commands::Catalog => run_catalog(&catalog, cli.json).await,
    }
}
