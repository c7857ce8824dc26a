mod echo;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use cocktails_core::{
    Catalog, CocktailCard, DEFAULT_OUTPUT, Document, Fetch, FetchConfig, FilterMode, HttpFetcher, PlacesConfig,
    ScrapeConfig, extract_categories, extract_infobox, fetch_file, fetch_stdin, map_view, read_popularity_file,
    scrape_catalog, search_bars, top_drinks, write_csv_file, year_bounds,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use url::Url;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_ORIGIN: &str = "https://en.wikipedia.org";

/// Scrape Wikipedia's list of cocktails and explore the resulting dataset
#[derive(Parser, Debug)]
#[command(name = "cocktails")]
#[command(version)]
#[command(about = "Scrape and explore Wikipedia's list of cocktails", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the listing and every cocktail page into a CSV file
    Scrape {
        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Site origin that article paths are resolved against
        #[arg(long, value_name = "URL", default_value = DEFAULT_ORIGIN)]
        origin: String,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "10", value_name = "SECS")]
        timeout: u64,

        /// Custom User-Agent for HTTP requests
        #[arg(long, value_name = "UA")]
        user_agent: Option<String>,
    },

    /// Print the categories of a listing page as JSON
    Categories {
        /// URL to fetch, local HTML file, or "-" for stdin
        #[arg(value_name = "INPUT")]
        input: String,

        /// Site origin that article paths are resolved against
        #[arg(long, value_name = "URL", default_value = DEFAULT_ORIGIN)]
        origin: String,
    },

    /// Print the infobox fields of a cocktail page as JSON
    Infobox {
        /// URL to fetch, local HTML file, or "-" for stdin
        #[arg(value_name = "INPUT")]
        input: String,

        /// Site origin that relative image sources are resolved against
        #[arg(long, value_name = "URL", default_value = DEFAULT_ORIGIN)]
        origin: String,
    },

    /// Show one cocktail from a scraped dataset
    Show {
        /// Scraped dataset
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
        data: PathBuf,

        /// Browse by alcohol base or by mixer
        #[arg(short, long, value_enum, default_value_t = Mode::Alcohol)]
        mode: Mode,

        /// Category (default: first category)
        #[arg(short, long)]
        category: Option<String>,

        /// Cocktail name (default: first cocktail of the category)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Count cocktails per alcohol-base category
    Counts {
        /// Scraped dataset
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
        data: PathBuf,
    },

    /// Rank drinks by visitors over a year range
    Popular {
        /// Popularity CSV with name, year and visitors columns
        #[arg(short, long, value_name = "FILE", default_value = "cocktail_popularity.csv")]
        data: PathBuf,

        /// First year (default: earliest in the data)
        #[arg(long, value_name = "YEAR")]
        from: Option<i32>,

        /// Last year (default: latest in the data)
        #[arg(long, value_name = "YEAR")]
        to: Option<i32>,

        /// Number of drinks to show
        #[arg(long, default_value = "10", value_name = "NUM")]
        top: usize,
    },

    /// Find bars serving a cocktail in a city
    Bars {
        /// Cocktail name
        #[arg(long)]
        cocktail: String,

        /// City to search in
        #[arg(long)]
        city: String,

        /// Places API key
        #[arg(long, env = "PLACES_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Text-search endpoint
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Maximum number of results kept from the response
        #[arg(long, default_value = "20", value_name = "NUM")]
        max_results: usize,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "10", value_name = "SECS")]
        timeout: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Alcohol,
    Mixer,
}

impl From<Mode> for FilterMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Alcohol => FilterMode::AlcoholBase,
            Mode::Mixer => FilterMode::Mixer,
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{level},html5ever=error,selectors=error,hyper=warn,reqwest=info"))
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Reads a page from a URL, a local file, or stdin (`-`).
async fn read_input(input: &str, verbose: bool) -> anyhow::Result<String> {
    let html = if input == "-" {
        fetch_stdin().context("Failed to read from stdin")?
    } else if input.starts_with("http://") || input.starts_with("https://") {
        if verbose {
            echo::print_step(1, 2, &format!("Fetching from {}", input.bright_white().underline()));
        }
        let fetcher = HttpFetcher::new(&FetchConfig::default()).context("Failed to build HTTP client")?;
        fetcher.fetch(input).await.context("Failed to fetch URL")?
    } else {
        fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?
    };

    tracing::debug!(input, bytes = html.len(), "Input read");
    if verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
    }
    Ok(html)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let verbose = cli.verbose;

    match cli.command {
        Command::Scrape { output, origin, timeout, user_agent } => {
            let mut builder = ScrapeConfig::builder().origin(origin).timeout(timeout);
            if let Some(user_agent) = user_agent {
                builder = builder.user_agent(user_agent);
            }
            let config = builder.build();
            config.validate().context("Invalid scrape configuration")?;

            let fetcher = HttpFetcher::new(&config.fetch).context("Failed to build HTTP client")?;

            echo::print_step(1, 2, &format!("Scraping {}", config.listing_url().bright_white()));
            let rows = scrape_catalog(&fetcher, &config)
                .await
                .context("Failed to scrape cocktail listing")?;

            echo::print_step(2, 2, "Writing dataset");
            write_csv_file(&rows, &output).with_context(|| format!("Failed to write to file: {}", output.display()))?;
            echo::print_success(&format!("{} cocktails written to {}", rows.len(), output.display().bright_white()));
        }

        Command::Categories { input, origin } => {
            let html = read_input(&input, verbose).await?;
            let categories = extract_categories(&Document::parse(&html), &origin);
            if verbose {
                echo::print_info(&format!("{} categories found", categories.len()));
            }
            print_json(&categories)?;
        }

        Command::Infobox { input, origin } => {
            let html = read_input(&input, verbose).await?;
            let doc = match Url::parse(&input) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => Document::parse_with_url(&html, url),
                _ => Document::parse(&html),
            };
            let record = extract_infobox(&doc, &origin);
            if record.is_none() {
                echo::print_warning("No infobox found");
            }
            print_json(&record)?;
        }

        Command::Show { data, mode, category, name } => {
            let catalog =
                Catalog::load(&data).with_context(|| format!("Failed to load dataset: {}", data.display()))?;
            let mode = FilterMode::from(mode);

            echo::print_info(&format!("Selected Cocktail ({mode})"));
            match catalog.select(mode, category.as_deref(), name.as_deref()) {
                Some(row) => echo::print_card(&CocktailCard::new(row)),
                None => echo::print_warning("No cocktail selected."),
            }
        }

        Command::Counts { data } => {
            let catalog =
                Catalog::load(&data).with_context(|| format!("Failed to load dataset: {}", data.display()))?;
            for count in catalog.category_counts() {
                println!("{}\t{}", count.category, count.count);
            }
        }

        Command::Popular { data, from, to, top } => {
            let records = read_popularity_file(&data)
                .with_context(|| format!("Failed to load popularity data: {}", data.display()))?;
            let Some((min_year, max_year)) = year_bounds(&records) else {
                bail!("No popularity records in {}", data.display());
            };

            let start = from.unwrap_or(min_year);
            let end = to.unwrap_or(max_year);
            if start > end {
                bail!("Invalid year range: {start} is after {end}");
            }

            let totals = top_drinks(&records, start, end, top);
            echo::print_info(&format!("Showing top {top} cocktails between {start} and {end}"));
            echo::print_totals(&format!("Top {top} Cocktails ({start}-{end})"), &totals);
        }

        Command::Bars { cocktail, city, api_key, endpoint, max_results, timeout } => {
            let mut config = PlacesConfig::new(api_key);
            config.max_results = max_results;
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }

            let fetcher = HttpFetcher::new(&FetchConfig { timeout, ..Default::default() })
                .context("Failed to build HTTP client")?;
            let search = search_bars(&fetcher, &cocktail, &city, &config)
                .await
                .context("Bar search failed")?;

            if search.is_empty() {
                echo::print_info("No results found.");
                return Ok(());
            }

            let top10 = search.top(10);
            echo::print_places("Top 10 Bars", &top10);
            echo::print_places("Top 5 Bars", &search.top(5));
            if let Some(view) = map_view(top10.iter().copied()) {
                echo::print_map(&view);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    if let Err(e) = run(cli).await {
        echo::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
