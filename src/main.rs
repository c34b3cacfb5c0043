use clap::{Parser, Subcommand};
use fluxo::cli;
use fluxo::error::FluxoResult;
use fluxo::insight::{DEFAULT_API_URL, DEFAULT_MODEL};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fluxo")]
#[command(about = "Cash-flow spreadsheet analysis: extraction, reports, AI insights")]
#[command(long_about = "Fluxo - Monthly cash-flow analysis from Excel workbooks

Reads the first sheet of an .xlsx/.xls workbook laid out with RECEITAS,
DESPESAS and (optionally) OUTROS rows against month columns (JAN/2025 ...),
and turns it into an ordered monthly series with a derived balance:

  Saldo = Receitas - Despesas + Outros

COMMANDS:
  extract  - Month series as JSON
  analyze  - Summary report, optionally with AI insights
  insights - AI-generated narrative analysis only

EXAMPLES:
  fluxo extract fluxo-2025.xlsx -o series.json
  fluxo analyze fluxo-2025.xlsx
  fluxo analyze fluxo-2025.xlsx --insights
  FLUXO_API_KEY=... fluxo insights fluxo-2025.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Extract the monthly series from a workbook.

Locates the RECEITAS/DESPESAS (and optional OUTROS) rows and the month
header columns in the first sheet, coerces the currency cells to numbers
and prints one record per month:

  [{ \"month\": \"JAN/2025\", \"revenue\": 1000.0, \"expense\": 500.0,
     \"other\": 0.0, \"balance\": 500.0 }, ...]

Without --output the JSON goes to stdout and nothing else is printed,
so the result can be piped.")]
    /// Extract the month series as JSON
    Extract {
        /// Path to the workbook (.xlsx or .xls)
        file: PathBuf,

        /// Write JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show read/extraction progress
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Analyze a workbook: totals, net flow and the per-month table.

With --insights the extracted series is also forwarded to the insight
gateway and the narrative analysis is printed after the report. The
gateway needs an API key (FLUXO_API_KEY or --api-key).")]
    /// Summary report, optionally with AI insights
    Analyze {
        /// Path to the workbook (.xlsx or .xls)
        file: PathBuf,

        /// Also generate AI insights for the series
        #[arg(long)]
        insights: bool,

        /// Show read/extraction progress
        #[arg(short, long)]
        verbose: bool,

        /// Insight gateway API key
        #[arg(long, env = "FLUXO_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Insight gateway base URL
        #[arg(long, env = "FLUXO_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Model requested from the gateway
        #[arg(long, env = "FLUXO_MODEL", default_value = DEFAULT_MODEL)]
        model: String,
    },

    /// AI-generated narrative analysis only
    Insights {
        /// Path to the workbook (.xlsx or .xls)
        file: PathBuf,

        /// Insight gateway API key
        #[arg(long, env = "FLUXO_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Insight gateway base URL
        #[arg(long, env = "FLUXO_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Model requested from the gateway
        #[arg(long, env = "FLUXO_MODEL", default_value = DEFAULT_MODEL)]
        model: String,
    },
}

#[tokio::main]
async fn main() -> FluxoResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            output,
            verbose,
        } => cli::extract(file, output, verbose).await,

        Commands::Analyze {
            file,
            insights,
            verbose,
            api_key,
            api_url,
            model,
        } => cli::analyze(file, insights, verbose, api_key, api_url, model).await,

        Commands::Insights {
            file,
            api_key,
            api_url,
            model,
        } => cli::insights(file, api_key, api_url, model).await,
    }
}
