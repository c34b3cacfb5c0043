use crate::error::{FluxoError, FluxoResult};
use crate::insight::InsightClient;
use crate::types::CashflowRecord;
use crate::{excel, extract, report};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Workbook extensions the decode layer accepts.
const ACCEPTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// Workbook intake ceiling, checked before any decode work.
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Execute the analyze command: summary report, optionally with insights.
pub async fn analyze(
    file: PathBuf,
    with_insights: bool,
    verbose: bool,
    api_key: Option<String>,
    api_url: String,
    model: String,
) -> FluxoResult<()> {
    println!("{}", "💰 Fluxo - Cash-flow analysis".bold().green());
    println!("   File: {}\n", file.display());

    let records = load_records(&file, verbose).await?;
    println!(
        "{}",
        format!("✅ {} months of data processed\n", records.len()).green()
    );

    let summary = report::summarize(&records);
    report::print_report(&records, &summary);

    if with_insights {
        let client = insight_client(api_key, api_url, model)?;
        println!("\n{}", "🤖 Generating insights...".cyan());
        let narrative = client.analyze(&records, &display_name(&file)).await?;
        print_narrative(&narrative);
    }

    Ok(())
}

/// Execute the extract command: month series as pretty JSON.
pub async fn extract(file: PathBuf, output: Option<PathBuf>, verbose: bool) -> FluxoResult<()> {
    let records = load_records(&file, verbose).await?;
    let json = serde_json::to_string_pretty(&records)?;

    match output {
        Some(path) => {
            fs::write(&path, json)?;
            println!(
                "{}",
                format!("✅ Wrote {} records to {}", records.len(), path.display()).green()
            );
        }
        // Bare JSON on stdout so the output can be piped.
        None => println!("{json}"),
    }

    Ok(())
}

/// Execute the insights command: narrative analysis only.
pub async fn insights(
    file: PathBuf,
    api_key: Option<String>,
    api_url: String,
    model: String,
) -> FluxoResult<()> {
    println!("{}", "💰 Fluxo - AI insights".bold().green());
    println!("   File: {}\n", file.display());

    let records = load_records(&file, false).await?;
    let client = insight_client(api_key, api_url, model)?;

    println!("{}", "🤖 Generating insights...".cyan());
    let narrative = client.analyze(&records, &display_name(&file)).await?;
    print_narrative(&narrative);

    Ok(())
}

/// Validate, read and extract a workbook into the month series.
async fn load_records(file: &Path, verbose: bool) -> FluxoResult<Vec<CashflowRecord>> {
    validate_input(file)?;

    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }
    let grid = excel::load_grid(file).await?;
    if verbose {
        println!("   {} rows in first sheet", grid.row_count());
    }

    extract::extract(&grid)
}

fn validate_input(path: &Path) -> FluxoResult<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match extension.as_deref() {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext) => {}
        _ => {
            return Err(FluxoError::InvalidFile(format!(
                "unsupported file type '{}' (expected .xlsx or .xls)",
                path.display()
            )))
        }
    }

    let metadata = fs::metadata(path)?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(FluxoError::InvalidFile(
            "file exceeds the 10MB size limit".to_string(),
        ));
    }

    Ok(())
}

fn insight_client(
    api_key: Option<String>,
    api_url: String,
    model: String,
) -> FluxoResult<InsightClient> {
    let api_key = api_key.ok_or_else(|| {
        FluxoError::Insight("no API key configured (set FLUXO_API_KEY or pass --api-key)".to_string())
    })?;
    Ok(InsightClient::new(api_url, api_key, model))
}

fn print_narrative(narrative: &str) {
    println!("\n{}", "💡 AI Insights".bold().cyan());
    println!("{narrative}");
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
