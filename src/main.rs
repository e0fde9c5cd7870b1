//! Hearts fixtures and results CLI
//!
//! Scrapes the club's fixtures-and-results page and exports the season as CSV.

use clap::{Parser, Subcommand};
use hearts::{Config, Result};

#[derive(Parser)]
#[command(name = "hearts")]
#[command(about = "Scrape Heart of Midlothian fixtures and results", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "hearts.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the fixtures page and export the season CSV
    Scrape,
    /// Run the pipeline on a saved page snapshot instead of the network
    Parse {
        /// Path to a saved HTML snapshot
        file: String,
    },
    /// Summarize a previously exported season CSV
    Show,
    /// Initialize a default config file
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Scrape => commands::scrape(&config),
        Commands::Parse { file } => commands::parse(&config, &file),
        Commands::Show => commands::show(&config),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use hearts::data::scrapers::heartsfc::{HeartsFcScraper, RawFixture};
    use hearts::data::{export, transform};
    use hearts::Outcome;

    pub fn scrape(config: &Config) -> Result<()> {
        println!("Connecting to {}...", config.scrape.url);

        let scraper = HeartsFcScraper::new(&config.scrape.url)
            .with_snapshot(&config.scrape.snapshot_path);
        let raw = scraper.fetch_all()?;
        println!("Extracted {} fixtures", raw.len());

        transform_and_write(config, raw)
    }

    pub fn parse(config: &Config, file: &str) -> Result<()> {
        println!("Parsing saved page {}...", file);

        let scraper = HeartsFcScraper::new(&config.scrape.url);
        let raw = scraper.parse_file(file)?;
        println!("Extracted {} fixtures", raw.len());

        transform_and_write(config, raw)
    }

    fn transform_and_write(config: &Config, raw: Vec<RawFixture>) -> Result<()> {
        println!("Transforming records...");
        let today = chrono::Local::now().date_naive();
        let fixtures = transform::transform(raw, &config.club.name, today)?;

        println!("Writing {}...", config.output.csv_path);
        export::write_csv(&fixtures, &config.output.csv_path)?;

        println!("Done. {} matches exported.", fixtures.len());
        Ok(())
    }

    pub fn show(config: &Config) -> Result<()> {
        let fixtures = export::read_csv(&config.output.csv_path)?;

        println!("Season from {}", config.output.csv_path);
        println!("──────────────────────────────────────────────");

        let mut tally = (0usize, 0usize, 0usize, 0usize);
        for (i, f) in fixtures.iter().enumerate() {
            let score = match f.score {
                hearts::Score::Played { home, away } => format!("{}-{}", home, away),
                hearts::Score::NotYetPlayed => "TBD".to_string(),
            };
            println!(
                "  {:>2}. {} ({}) {} v {}  {}  [{}]",
                i + 1,
                f.date,
                f.venue_role,
                f.home_team,
                f.away_team,
                score,
                f.outcome
            );
            match f.outcome {
                Outcome::Win => tally.0 += 1,
                Outcome::Loss => tally.1 += 1,
                Outcome::Draw => tally.2 += 1,
                Outcome::NotYetPlayed => tally.3 += 1,
            }
        }

        println!("──────────────────────────────────────────────");
        println!(
            "  {} matches: {}W {}L {}D, {} to play",
            fixtures.len(),
            tally.0,
            tally.1,
            tally.2,
            tally.3
        );

        Ok(())
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Edit {} to point at a different season page if needed", config_path);
        println!("  2. Run 'hearts scrape' to fetch and export the season");
        println!("  3. Run 'hearts show' to summarize the exported CSV");

        Ok(())
    }
}
