use crate::config::CrawlConfig;
use crate::state::StatsSnapshot;
use crate::Result;
use serde::Serialize;
use std::path::Path;

/// File name of the report written to the output root
pub const REPORT_FILE_NAME: &str = "final_report.json";

/// The complete end-of-run report
#[derive(Debug, Clone, Serialize)]
pub struct FinalReport {
    pub summary: ReportSummary,
    pub failed_urls: Vec<String>,
    pub config: ReportConfig,
}

/// Aggregate counters and rates for the run
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_pages_found: u64,
    pub successful_pages: u64,
    pub failed_pages: u64,
    pub page_success_rate: String,
    pub total_files: u64,
    pub successful_files: u64,
    pub failed_files: u64,
    pub file_success_rate: String,
    pub duration_seconds: f64,
}

/// The configuration echo included in the report
#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    pub url: String,
    pub output: String,
    pub workers: usize,
    pub depth: u32,
}

/// Formats `successes / total` as "NN.N%", guarding against empty runs.
fn success_rate(successes: u64, total: u64) -> String {
    let rate = successes as f64 / total.max(1) as f64 * 100.0;
    format!("{:.1}%", rate)
}

/// Builds the final report from a stats snapshot and the run configuration.
pub fn build_report(snapshot: &StatsSnapshot, config: &CrawlConfig) -> FinalReport {
    FinalReport {
        summary: ReportSummary {
            total_pages_found: snapshot.total_pages,
            successful_pages: snapshot.successful_pages,
            failed_pages: snapshot.failed_pages,
            page_success_rate: success_rate(snapshot.successful_pages, snapshot.total_pages),
            total_files: snapshot.total_files,
            successful_files: snapshot.successful_files,
            failed_files: snapshot.failed_files,
            file_success_rate: success_rate(snapshot.successful_files, snapshot.total_files),
            duration_seconds: snapshot.duration_seconds(),
        },
        failed_urls: snapshot.failed_urls.clone(),
        config: ReportConfig {
            url: config.seed_url.to_string(),
            output: config.output_dir.display().to_string(),
            workers: config.workers,
            depth: config.max_depth,
        },
    }
}

/// Writes the report as pretty-printed JSON into the output root.
pub async fn write_report(report: &FinalReport, output_dir: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::create_dir_all(output_dir).await?;
    tokio::fs::write(output_dir.join(REPORT_FILE_NAME), json).await?;
    Ok(())
}

/// Prints the end-of-run summary to stdout.
pub fn print_report(report: &FinalReport) {
    let summary = &report.summary;

    println!("\n=== Crawl Complete ===");
    println!(
        "Pages: {}/{} ({})",
        summary.successful_pages, summary.total_pages_found, summary.page_success_rate
    );
    println!(
        "Files: {}/{} ({})",
        summary.successful_files, summary.total_files, summary.file_success_rate
    );
    println!(
        "Time: {}m {}s",
        (summary.duration_seconds as u64) / 60,
        (summary.duration_seconds as u64) % 60
    );

    if !report.failed_urls.is_empty() {
        println!("Failed pages ({}):", report.failed_urls.len());
        for url in &report.failed_urls {
            println!("  - {}", url);
        }
    }

    println!(
        "Report saved to: {}/{}",
        report.config.output, REPORT_FILE_NAME
    );
}
