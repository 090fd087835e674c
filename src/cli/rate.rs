//! Rate command - score layout files

use crate::config::{normalize_heuristic_name, RatingConfig};
use crate::models::{Layout, RatingResponse};
use crate::raters::HeuristicRegistry;
use crate::reporters::{self, OutputFormat};
use crate::scoring::{consistency, Aggregator};
use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Resolved flags for one `rate` invocation
#[derive(Debug)]
pub(super) struct RateOptions {
    pub format: String,
    pub output: Option<PathBuf>,
    pub heuristics: Vec<String>,
    pub strict: bool,
    pub explain: bool,
    pub fail_under: Option<u8>,
}

/// Outcome for a single input file
struct FileResult {
    path: PathBuf,
    result: Result<RatingResponse>,
}

/// One line of batch JSON output
#[derive(Serialize)]
struct BatchLine<'a> {
    file: String,
    #[serde(flatten)]
    response: Option<&'a RatingResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Closing line of batch JSON output
#[derive(Serialize)]
struct ConsistencyLine {
    consistency: u8,
    layouts: usize,
}

/// Run the rate command
pub(super) fn run(files: &[PathBuf], config: &RatingConfig, options: RateOptions) -> Result<()> {
    let format = OutputFormat::from_str(&options.format)?;
    let aggregator = build_aggregator(config, &options)?;
    debug!(
        "Rating {} file(s) with heuristics: {}",
        files.len(),
        aggregator.heuristics().join(", ")
    );

    let results = rate_files(&aggregator, files);

    let output = render(&results, format, options.explain.then_some(&aggregator))?;
    write_output(&output, options.output.as_deref(), format)?;

    let failed: Vec<&FileResult> = results.iter().filter(|r| r.result.is_err()).collect();
    for file in &failed {
        if let Err(e) = &file.result {
            eprintln!(
                "{} {}: {:#}",
                style("error:").red().bold(),
                file.path.display(),
                e
            );
        }
    }

    check_fail_under(options.fail_under, &results)?;

    if !failed.is_empty() {
        anyhow::bail!("{} of {} layout(s) could not be rated", failed.len(), results.len());
    }
    Ok(())
}

/// Build the aggregator from config, letting `--heuristic` flags override the list
fn build_aggregator(config: &RatingConfig, options: &RateOptions) -> Result<Aggregator> {
    let mut config = config.clone();
    if !options.heuristics.is_empty() {
        config.heuristics = options
            .heuristics
            .iter()
            .map(|h| normalize_heuristic_name(h))
            .collect();
    }
    config.strict_bounds = options.strict;

    config
        .aggregator(HeuristicRegistry::default())
        .context("Invalid heuristic configuration")
}

/// Parse every file, then rate the parsed layouts in parallel.
///
/// Results keep input order. A file that fails to load or rate only
/// fails its own entry.
fn rate_files(aggregator: &Aggregator, files: &[PathBuf]) -> Vec<FileResult> {
    let loaded: Vec<Result<Layout>> = files.iter().map(|p| load_layout(p)).collect();

    let layouts: Vec<Layout> = loaded
        .iter()
        .filter_map(|l| l.as_ref().ok().cloned())
        .collect();
    let mut rated = aggregator.rate_batch(&layouts).into_iter();

    let results: Vec<FileResult> = files
        .iter()
        .zip(loaded)
        .map(|(path, layout)| {
            let result = match layout {
                Ok(_) => match rated.next() {
                    Some(r) => r.with_context(|| format!("Failed to rate {}", path.display())),
                    None => Err(anyhow::anyhow!("No rating produced for {}", path.display())),
                },
                Err(e) => Err(e),
            };
            FileResult {
                path: path.clone(),
                result,
            }
        })
        .collect();

    info!(
        "Rated {} of {} layout(s)",
        results.iter().filter(|r| r.result.is_ok()).count(),
        results.len()
    );
    results
}

fn load_layout(path: &Path) -> Result<Layout> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read layout from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    Layout::from_json(&content).with_context(|| format!("Invalid layout {}", path.display()))
}

/// Render all results in one output document
fn render(
    results: &[FileResult],
    format: OutputFormat,
    explain: Option<&Aggregator>,
) -> Result<String> {
    // A single successful layout renders exactly as the reporter does
    if let [FileResult {
        result: Ok(response),
        ..
    }] = results
    {
        let mut out = reporters::report_with_format(response, format)?;
        append_explanation(&mut out, response, format, explain);
        return Ok(out);
    }

    let rated: Vec<RatingResponse> = results
        .iter()
        .filter_map(|f| f.result.as_ref().ok().cloned())
        .collect();
    let consistency = consistency(&rated);
    info!(
        "Consistency across {} rated layout(s): {}",
        rated.len(),
        consistency
    );

    match format {
        OutputFormat::Json => {
            let mut out = render_json_lines(results)?;
            out.push('\n');
            out.push_str(&serde_json::to_string(&ConsistencyLine {
                consistency,
                layouts: rated.len(),
            })?);
            Ok(out)
        }
        OutputFormat::Text | OutputFormat::Markdown => {
            let mut out = String::new();
            for file in results {
                let Ok(response) = &file.result else { continue };
                let heading = match format {
                    OutputFormat::Markdown => format!("<!-- {} -->\n", file.path.display()),
                    _ => format!("\n{}\n", style(file.path.display()).cyan().bold()),
                };
                out.push_str(&heading);
                out.push_str(&reporters::report_with_format(response, format)?);
                append_explanation(&mut out, response, format, explain);
            }
            out.push_str(&consistency_footer(consistency, rated.len(), format));
            Ok(out)
        }
    }
}

fn consistency_footer(score: u8, layouts: usize, format: OutputFormat) -> String {
    match format {
        OutputFormat::Markdown => format!(
            "## Consistency\n\n**{}/100** across {} rated layouts\n",
            score, layouts
        ),
        _ => format!(
            "\n{} {}/100 across {} rated layouts\n",
            style("Consistency:").bold(),
            score,
            layouts
        ),
    }
}

/// Compact JSON, one line per input file, failures included
fn render_json_lines(results: &[FileResult]) -> Result<String> {
    let mut lines = Vec::with_capacity(results.len());
    for file in results {
        let line = match &file.result {
            Ok(response) => BatchLine {
                file: file.path.display().to_string(),
                response: Some(response),
                error: None,
            },
            Err(e) => BatchLine {
                file: file.path.display().to_string(),
                response: None,
                error: Some(format!("{:#}", e)),
            },
        };
        lines.push(serde_json::to_string(&line)?);
    }
    Ok(lines.join("\n"))
}

fn append_explanation(
    out: &mut String,
    response: &RatingResponse,
    format: OutputFormat,
    explain: Option<&Aggregator>,
) {
    let Some(aggregator) = explain else { return };
    let explanation = aggregator.explain(response);
    // Keep JSON on stdout parseable
    if format == OutputFormat::Json {
        eprintln!("{}", explanation);
    } else {
        out.push('\n');
        out.push_str(&explanation);
        out.push('\n');
    }
}

/// Target file for `-o`; a directory gets `report.<ext>` inside it
fn output_path(path: &Path, format: OutputFormat) -> PathBuf {
    if path.is_dir() {
        path.join(format!("report.{}", reporters::file_extension(format)))
    } else {
        path.to_path_buf()
    }
}

fn write_output(output: &str, path: Option<&Path>, format: OutputFormat) -> Result<()> {
    match path {
        Some(p) => {
            let out_path = output_path(p, format);
            std::fs::write(&out_path, output)
                .with_context(|| format!("Failed to write report to {}", out_path.display()))?;
            eprintln!("Report written to: {}", style(out_path.display()).cyan());
        }
        None => println!("{}", output),
    }
    Ok(())
}

/// Exit with code 1 when any rated layout scores below the threshold
fn check_fail_under(threshold: Option<u8>, results: &[FileResult]) -> Result<()> {
    let Some(threshold) = threshold else {
        return Ok(());
    };
    let below: Vec<String> = results
        .iter()
        .filter_map(|f| match &f.result {
            Ok(r) if r.score < threshold => Some(format!("{} ({})", f.path.display(), r.score)),
            _ => None,
        })
        .collect();
    if !below.is_empty() {
        anyhow::bail!(
            "Failing due to --fail-under={}: {}",
            threshold,
            below.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = r#"{
        "canvas": {"width": 1000, "height": 1000},
        "items": [
            {"x": 0.05, "y": 0.05, "width": 0.4, "height": 0.2},
            {"x": 0.55, "y": 0.05, "width": 0.4, "height": 0.2},
            {"x": 0.05, "y": 0.7, "width": 0.9, "height": 0.2}
        ]
    }"#;

    fn options() -> RateOptions {
        RateOptions {
            format: "json".to_string(),
            output: None,
            heuristics: vec![],
            strict: false,
            explain: false,
            fail_under: None,
        }
    }

    #[test]
    fn test_rate_files_keeps_order_and_isolates_failures() {
        let dir = tempfile::tempdir().expect("temp dir");
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, LAYOUT).expect("write layout");
        std::fs::write(&bad, r#"{"canvas": {"width": 10, "height": 10}}"#).expect("write layout");
        let missing = dir.path().join("missing.json");

        let aggregator = Aggregator::with_defaults();
        let results = rate_files(&aggregator, &[bad.clone(), good.clone(), missing, good]);

        assert_eq!(results.len(), 4);
        assert!(results[0].result.is_err());
        assert!(results[1].result.is_ok());
        assert!(results[2].result.is_err());
        assert!(results[3].result.is_ok());
        assert_eq!(results[0].path, bad);
    }

    #[test]
    fn test_heuristic_flags_override_config() {
        let mut opts = options();
        opts.heuristics = vec!["HarmonyRater".into(), "balance".into()];
        let aggregator = build_aggregator(&RatingConfig::default(), &opts).expect("aggregator");
        assert_eq!(aggregator.heuristics(), ["harmony", "balance"]);
    }

    #[test]
    fn test_unknown_heuristic_flag_is_an_error() {
        let mut opts = options();
        opts.heuristics = vec!["contrast".into()];
        let err = build_aggregator(&RatingConfig::default(), &opts).unwrap_err();
        assert!(format!("{:#}", err).contains("contrast"));
    }

    #[test]
    fn test_json_lines_for_batch() {
        let dir = tempfile::tempdir().expect("temp dir");
        let good = dir.path().join("good.json");
        std::fs::write(&good, LAYOUT).expect("write layout");
        let missing = dir.path().join("missing.json");

        let results = rate_files(&Aggregator::with_defaults(), &[good, missing]);
        let out = render(&results, OutputFormat::Json, None).expect("render");
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).expect("JSON line"))
            .collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0]["score"].is_u64());
        assert_eq!(lines[0]["metrics"].as_array().map(Vec::len), Some(4));
        assert!(lines[1]["error"].is_string());
        assert!(lines[1].get("score").is_none());
        // Only one layout was rated, so there is nothing to compare
        assert_eq!(lines[2]["consistency"], 0);
        assert_eq!(lines[2]["layouts"], 1);
    }

    #[test]
    fn test_batch_text_ends_with_consistency() {
        console::set_colors_enabled(false);
        let dir = tempfile::tempdir().expect("temp dir");
        let good = dir.path().join("good.json");
        std::fs::write(&good, LAYOUT).expect("write layout");

        let results = rate_files(&Aggregator::with_defaults(), &[good.clone(), good]);
        let text = render(&results, OutputFormat::Text, None).expect("render text");
        assert!(text.contains("Consistency: 100/100 across 2 rated layouts"));

        let md = render(&results, OutputFormat::Markdown, None).expect("render markdown");
        assert!(md.contains("## Consistency\n\n**100/100** across 2 rated layouts"));
    }

    #[test]
    fn test_output_into_directory_uses_format_extension() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert_eq!(
            output_path(dir.path(), OutputFormat::Markdown),
            dir.path().join("report.md")
        );
        let file = dir.path().join("custom.txt");
        assert_eq!(output_path(&file, OutputFormat::Json), file);

        write_output("{}", Some(dir.path()), OutputFormat::Json).expect("write report");
        let written = std::fs::read_to_string(dir.path().join("report.json")).expect("read report");
        assert_eq!(written, "{}");
    }

    #[test]
    fn test_single_layout_renders_plain_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let good = dir.path().join("good.json");
        std::fs::write(&good, LAYOUT).expect("write layout");

        let results = rate_files(&Aggregator::with_defaults(), &[good]);
        let out = render(&results, OutputFormat::Json, None).expect("render");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("pretty JSON");
        assert!(parsed.get("file").is_none());
        assert_eq!(parsed["metrics"][0]["section"], "balance");
    }

    #[test]
    fn test_fail_under() {
        let results = vec![FileResult {
            path: PathBuf::from("a.json"),
            result: Ok(RatingResponse {
                score: 55,
                groups: vec![],
            }),
        }];
        assert!(check_fail_under(None, &results).is_ok());
        assert!(check_fail_under(Some(55), &results).is_ok());
        let err = check_fail_under(Some(56), &results).unwrap_err();
        assert!(err.to_string().contains("a.json (55)"));
    }
}
