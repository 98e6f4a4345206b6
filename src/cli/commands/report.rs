//! Report command handler
//!
//! Generates records reports (Markdown or HTML) from a seed file.

use super::open_seed;
use nu_records::config::Config;
use nu_records::core::report::{ReportContext, ReportFormat};
use nu_records::{error, info};
use std::path::{Path, PathBuf};

/// Run the report command. Returns `false` on failure.
///
/// # Arguments
/// * `seed` - Seed file (or bare name in the seeds directory)
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown, html)
/// * `config` - Configuration containing the reports directory and time format
pub fn run(seed: &Path, output_file: Option<&Path>, format_str: &str, config: &Config) -> bool {
    match generate_report(seed, output_file, format_str, config) {
        Ok(path) => {
            println!("✓ Report generated: {}", path.display());
            true
        }
        Err(err) => {
            error!("Report generation failed for {}: {err}", seed.display());
            eprintln!("{err}");
            false
        }
    }
}

/// Default report location: `<reports_dir>/<seed stem>_report.<ext>`
pub fn default_output_path(seed: &Path, reports_dir: &Path, format: ReportFormat) -> PathBuf {
    let stem = seed
        .file_stem()
        .map_or_else(|| "records".to_string(), |s| s.to_string_lossy().to_string());
    reports_dir.join(format!("{stem}_report.{}", format.extension()))
}

fn generate_report(
    seed: &Path,
    output_file: Option<&Path>,
    format_str: &str,
    config: &Config,
) -> Result<PathBuf, String> {
    let format: ReportFormat = format_str.parse().map_err(|e| format!("✗ {e}"))?;

    let registry =
        open_seed(seed, config).map_err(|e| format!("✗ Failed to load {}: {e}", seed.display()))?;
    info!("Seed loaded for report: {}", seed.display());

    let output = output_file.map_or_else(
        || default_output_path(seed, Path::new(&config.paths.reports_dir), format),
        Path::to_path_buf,
    );

    let title = seed
        .file_stem()
        .map_or_else(|| "Academic Records".to_string(), |s| format!("Academic Records: {}", s.to_string_lossy()));
    let ctx = ReportContext::from_registry(&registry, &title, config.time_format());

    format
        .generator()
        .generate(&ctx, &output)
        .map_err(|e| format!("✗ Failed to write {}: {e}", output.display()))?;
    info!("{format} report written to {}", output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(
            Path::new("seeds/demo.toml"),
            Path::new("/tmp/reports"),
            ReportFormat::Markdown,
        );
        assert_eq!(path, PathBuf::from("/tmp/reports/demo_report.md"));
    }

    #[test]
    fn test_unknown_format_fails() {
        let config = Config::default();
        assert!(!run(Path::new("demo.toml"), None, "pdf", &config));
    }
}
