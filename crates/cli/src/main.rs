use clap::{Parser, Subcommand};
use playreviews_core::locale::Locale;
use playreviews_core::normalize;
use playreviews_core::scrape::{self, extract};
use playreviews_core::table::Table;
use std::path::{Path, PathBuf};

#[cfg(feature = "chrome")]
use playreviews_core::driver::ChromeDriver;
#[cfg(feature = "chrome")]
use playreviews_core::scrape::{ScrapeConfig, Session};
#[cfg(feature = "chrome")]
use std::time::Duration;

#[derive(Parser)]
#[command(name = "playreviews", about = "Scrape Google Play review listings into a typed table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a headless browser against the listing page and write <app-id>.json
    #[cfg(feature = "chrome")]
    Scrape {
        /// Application identifier, e.g. com.example.app
        app_id: String,

        /// Directory the output file is written to
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Settle pause after each scroll or show-more click, in milliseconds
        #[arg(long, default_value_t = 1500)]
        settle_ms: u64,

        /// Upper bound on expansion passes
        #[arg(long, default_value_t = 200)]
        max_passes: usize,
    },
    /// Extract and normalize reviews from a saved listing page (offline)
    Extract {
        /// The HTML file to read (use - for stdin)
        file: String,

        /// Directory the output file is written to
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        #[cfg(feature = "chrome")]
        Commands::Scrape {
            app_id,
            out,
            settle_ms,
            max_passes,
        } => run_scrape(&app_id, &out, settle_ms, max_passes),
        Commands::Extract { file, out } => run_extract(&file, &out),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "chrome")]
fn run_scrape(
    app_id: &str,
    out: &Path,
    settle_ms: u64,
    max_passes: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScrapeConfig {
        settle: Duration::from_millis(settle_ms),
        max_passes,
    };

    let driver = ChromeDriver::launch()?;
    let mut session = Session::with_config(driver, config);

    session.open(app_id)?;
    let passes = session.expand_all()?;
    eprintln!("expansion settled after {} scroll passes", passes);

    let raws = session.collect()?;
    eprintln!("collected {} review elements", raws.len());

    let rows = normalize::normalize_all(raws, &Locale::pt_br())?;
    write_table(&rows, out, app_id)
}

fn run_extract(file: &str, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (html, stem) = if file == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        (buf, "reviews".to_string())
    } else {
        let stem = Path::new(file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "reviews".to_string());
        (std::fs::read_to_string(file)?, stem)
    };

    let page = playreviews_core::dom::parse_html(&html);
    let raws = extract::extract_from_page(&page, scrape::REVIEW_SELECTOR)?;
    eprintln!("collected {} review elements", raws.len());

    let rows = normalize::normalize_all(raws, &Locale::pt_br())?;
    write_table(&rows, out, &stem)
}

fn write_table(
    rows: &[normalize::NormalizedReview],
    out: &Path,
    stem: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut table = Table::from_reviews(rows);
    table.shrink();

    let path = out.join(format!("{}.json", stem));
    let file = std::fs::File::create(&path)?;
    table.write_json(std::io::BufWriter::new(file))?;
    println!("{} rows -> {}", table.num_rows(), path.display());
    Ok(())
}
