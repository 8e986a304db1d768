use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::str::FromStr;

use voyage_tester::config::RunConfig;
use voyage_tester::driver::Engine;
use voyage_tester::{report, runner};

#[derive(Parser)]
#[command(name = "voyage-tester")]
#[command(author = "Voyage QA")]
#[command(version = "0.2.1")]
#[command(about = "Web automation test runner for the travel-portal booking suite", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the booking-portal test scenario
    Run {
        /// Browser engine (chrome, chromium, firefox)
        #[arg(short, long, default_value = "chrome")]
        browser: String,

        /// Workbook holding the test data
        #[arg(long)]
        data: Option<PathBuf>,

        /// Worksheet name
        #[arg(long)]
        sheet: Option<String>,

        /// Output directory for reports and artifacts
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Optional YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Run the browser without a visible window
        #[arg(long, default_value = "false")]
        headless: bool,

        /// Explicit-wait timeout in milliseconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Generate an HTML report from persisted results
    Report {
        /// Path to a results JSON file
        results: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "report.html")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            browser,
            data,
            sheet,
            output,
            config,
            headless,
            timeout,
        } => {
            let mut cfg = RunConfig::load(config.as_deref())?;
            if let Some(d) = data {
                cfg.data_file = d;
            }
            if let Some(s) = sheet {
                cfg.data_sheet = s;
            }
            if let Some(o) = output {
                cfg.output_dir = o;
            }
            if let Some(t) = timeout {
                cfg.wait_timeout_ms = t;
            }
            if headless {
                cfg.headless = true;
            }

            let engine = Engine::from_str(&browser)?;

            println!(
                "{} Running booking-portal scenario",
                "▶".green().bold()
            );
            println!("  Engine: {}", engine.to_string().cyan());
            println!("  Data: {}", cfg.data_file.display());
            println!("  Output: {}", cfg.output_dir.display());

            let summary = runner::run(engine, &cfg).await?;
            if summary.failed > 0 {
                println!("{} Test run failed", "✗".red().bold());
                std::process::exit(1);
            }
            println!("{} Test run passed", "✓".green().bold());
            Ok(())
        }

        Commands::Report { results, output } => {
            report::regenerate(&results, &output)?;
            println!("HTML report saved to: {}", output.display());
            Ok(())
        }
    }
}
