//! Score command handler

use matric_pulse::config::Config;
use matric_pulse::core::assistant::UniversityMatchRequest;
use matric_pulse::core::catalog::is_recognized_subject;
use matric_pulse::core::input::{load_subject_file, parse_subject_arg};
use matric_pulse::core::models::SubjectEntry;
use matric_pulse::core::report::{reporter_for, ReportContext, ReportFormat};
use matric_pulse::{debug, info, verbose, warn};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Options collected from the `score` subcommand
#[derive(Debug, Clone)]
pub struct ScoreOptions {
    /// `NAME=PERCENT` arguments
    pub subject_args: Vec<String>,
    /// Optional CSV file with subject marks
    pub file: Option<PathBuf>,
    /// Report format
    pub format: ReportFormat,
    /// Explicit output path
    pub output: Option<PathBuf>,
    /// Save a copy under the reports directory
    pub save: bool,
    /// Print the university-matching prompt
    pub match_prompt: bool,
}

/// Run the score command.
///
/// # Errors
/// Returns a printable message when input cannot be read or a report cannot be written.
pub fn run(options: &ScoreOptions, config: &Config) -> Result<(), String> {
    let entries = collect_entries(options)?;
    if entries.is_empty() {
        return Err("✗ No subjects given. Use -s \"Name=NN\" or -f FILE.".to_string());
    }

    for entry in &entries {
        if !entry.name.is_empty() && !is_recognized_subject(&entry.name) {
            info!("'{}' is not a catalog subject; scoring it as entered", entry.name);
        }
    }

    let rules = config.scoring.to_rules();
    debug!("Scoring {} subject(s) with {rules:?}", entries.len());
    let result = rules.compute(&entries);
    verbose!(
        "✓ Scored {} of {} subject(s): APS {}",
        result.breakdown.len(),
        entries.len(),
        result.total_score
    );

    let ctx = ReportContext::new(&result, &rules);

    if let Some(output) = &options.output {
        write_report(&ctx, options.format, output)?;
        println!("✓ Report written to: {}", output.display());
    } else {
        let rendered = reporter_for(options.format)
            .render(&ctx)
            .map_err(|e| format!("✗ Failed to render report: {e}"))?;
        print!("{rendered}");
    }

    if options.save {
        let path = save_report(&ctx, options.format, config)?;
        println!("✓ Report saved: {}", path.display());
    }

    if options.match_prompt {
        println!();
        println!("{}", UniversityMatchRequest::from_result(&result).prompt());
    }

    Ok(())
}

/// Read subjects from the file first, then from `-s` arguments, keeping their order
fn collect_entries(options: &ScoreOptions) -> Result<Vec<SubjectEntry>, String> {
    let mut entries = match &options.file {
        Some(path) => load_subject_file(path).map_err(|e| format!("✗ {e}"))?,
        None => Vec::new(),
    };

    for arg in &options.subject_args {
        let entry = parse_subject_arg(arg).map_err(|e| format!("✗ Invalid subject '{arg}': {e}"))?;
        entries.push(entry);
    }

    Ok(entries)
}

fn write_report(ctx: &ReportContext, format: ReportFormat, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("✗ Failed to create {}: {e}", parent.display()))?;
        }
    }
    reporter_for(format).generate(ctx, path).map_err(|e| {
        warn!("Report write failed for {}: {e}", path.display());
        format!("✗ Failed to write report to {}: {e}", path.display())
    })
}

fn save_report(ctx: &ReportContext, format: ReportFormat, config: &Config) -> Result<PathBuf, String> {
    if config.paths.reports_dir.is_empty() {
        return Err("✗ No reports directory configured (set `reports_dir`).".to_string());
    }
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    let path = PathBuf::from(&config.paths.reports_dir)
        .join(report_file_name(ctx.result.total_score, stamp, format));
    write_report(ctx, format, &path)?;
    Ok(path)
}

fn report_file_name(total_score: u32, stamp: u64, format: ReportFormat) -> String {
    format!("aps_{total_score}_{stamp}.{}", format.extension())
}
