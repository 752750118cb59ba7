//! Trendfeed CLI
//!
//! Command-line interface for searches, migrations, and configuration.

use clap::{Parser, Subcommand};
use console::style;
use secrecy::ExposeSecret;
use trendfeed::config::{config_path, save_config, validate_config, Config, StorageBackendType};
use trendfeed::core::{SearchRequest, SearchResponse, DEFAULT_LIMIT};
use trendfeed::database::{init_pool, migrations, PgTrendingCache};
use trendfeed::trending::TrendingService;
use trendfeed::{Error, Result, VERSION};

#[derive(Parser)]
#[command(
    name = "trendfeed",
    version = VERSION,
    about = "Trendfeed - trending LinkedIn posts ranked by engagement",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,

    /// Search trending posts
    Search {
        /// Search query
        query: String,
        /// Page size
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
        /// Page offset
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
        /// Minimum total reactions
        #[arg(short, long, default_value_t = 0)]
        min_engagement: u64,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Remove expired cache entries
    Purge,

    /// Check configuration and cache store health
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (secrets omitted)
    Show,
    /// Report configuration problems
    Validate,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    trendfeed::logging::init("trendfeed", &config.log);

    match cli.command {
        Commands::Migrate => run_migrations(&config).await,
        Commands::Search {
            query,
            limit,
            offset,
            min_engagement,
            json,
        } => {
            let request = SearchRequest::new(query)
                .with_limit(limit)
                .with_offset(offset)
                .with_min_engagement(min_engagement);
            search(&config, &request, json).await
        }
        Commands::Purge => purge(&config).await,
        Commands::Status => check_status(&config).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => show_config(&config),
            ConfigAction::Validate => validate(&config),
            ConfigAction::Init { force } => init_config(force),
        },
    }
}

async fn run_migrations(config: &Config) -> Result<()> {
    let pg_config = config.storage.postgres.as_ref().ok_or_else(|| {
        Error::Config(
            "PostgreSQL not configured. Set storage.postgres in config.json or DATABASE_URL env var."
                .to_string(),
        )
    })?;

    println!("{} Running migrations...", style("→").cyan());
    let pool = init_pool(pg_config).await?;
    migrations::run(&pool).await?;
    println!("{} Migrations complete", style("✓").green());
    Ok(())
}

async fn search(config: &Config, request: &SearchRequest, json: bool) -> Result<()> {
    let service = TrendingService::from_config(config).await?;
    let response = service.search(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&request.query, &response);
    }
    Ok(())
}

fn print_response(query: &str, response: &SearchResponse) {
    let source = if response.cached { "cache" } else { "upstream" };
    println!(
        "\n{} {} ({} of {} results, from {})",
        style("Trending:").cyan().bold(),
        style(query).bold(),
        response.posts.len(),
        response.total_results,
        source
    );

    if let Some(ref warning) = response.warning {
        println!("{} {}", style("!").yellow(), style(warning).yellow());
    }

    for (i, post) in response.posts.iter().enumerate() {
        let preview: String = post.content.chars().take(100).collect();
        println!(
            "\n{:>3}. {} {} [{}]",
            i + 1,
            style(&post.author.name).bold(),
            style(format!("{} reactions", post.engagement.total_reactions)).green(),
            post.post_type
        );
        println!("     {}", preview.replace('\n', " "));
        if !post.post_url.is_empty() {
            println!("     {}", style(&post.post_url).dim());
        }
    }

    if let Some(ref summary) = response.engagement_summary {
        let tags: Vec<String> = summary
            .top_hashtags(5)
            .into_iter()
            .map(|(tag, count)| format!("#{} ({})", tag, count))
            .collect();
        println!(
            "\n{} {} posts, avg {} reactions, {} comments",
            style("Summary:").cyan(),
            summary.total_posts,
            summary.avg_total_reactions,
            summary.avg_comments
        );
        if !tags.is_empty() {
            println!("   Top hashtags: {}", tags.join(", "));
        }
    }
    println!();
}

async fn purge(config: &Config) -> Result<()> {
    let service = TrendingService::from_config(config).await?;
    let purged = service.purge_expired().await?;
    println!("{} Removed {} expired entries", style("✓").green(), purged);
    Ok(())
}

async fn check_status(config: &Config) -> Result<()> {
    println!("\n{}", style("Trendfeed status").cyan().bold());

    let has_key = config
        .search_api
        .api_key
        .as_ref()
        .is_some_and(|k| !k.expose_secret().is_empty());
    if has_key {
        println!("   {} Search API key configured ({})", style("✓").green(), config.search_api.host);
    } else {
        println!("   {} Search API key missing (set RAPIDAPI_KEY)", style("✗").red());
    }

    print!("   {} Cache store ({})... ", style("○").dim(), config.storage.backend);
    match TrendingService::from_config(config).await {
        Ok(service) if service.store_healthy().await => println!("{}", style("✓ Ready").green()),
        Ok(_) => println!("{}", style("✗ Unhealthy").red()),
        Err(e) => println!("{} {}", style("✗").red(), e),
    }

    match (config.storage.backend, config.storage.postgres.as_ref()) {
        (StorageBackendType::Postgres, Some(pg_config)) => {
            let entries = match init_pool(pg_config).await {
                Ok(pool) => PgTrendingCache::new(pool).count().await,
                Err(e) => Err(e),
            };
            match entries {
                Ok(count) => println!("   {} {} cached result sets", style("ℹ").blue(), count),
                Err(e) => println!("   {} Could not count cache entries: {}", style("✗").red(), e),
            }
        }
        (StorageBackendType::Memory, _) => {
            println!("   {} In-process cache is empty on every CLI run", style("ℹ").blue());
        }
        _ => {}
    }
    println!();
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    println!("{}", style(format!("# {}", config_path().display())).dim());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn validate(config: &Config) -> Result<()> {
    let result = validate_config(config);

    for issue in &result.errors {
        println!("{} {}", style("error:").red().bold(), issue);
    }
    for issue in &result.warnings {
        println!("{} {}", style("warning:").yellow().bold(), issue);
    }

    if result.valid {
        println!("{} Configuration is valid", style("✓").green());
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{} configuration error(s)",
            result.errors.len()
        )))
    }
}

fn init_config(force: bool) -> Result<()> {
    let path = config_path();
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }

    save_config(&Config::default(), &path)?;
    println!("{} Wrote {}", style("✓").green(), path.display());
    Ok(())
}
