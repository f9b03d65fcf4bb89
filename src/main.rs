//! patterndoc: extract @pattern documentation from stylesheets and scripts.
//!
//! Two modes:
//!
//! - **stdin mode**: `patterndoc < button.css`
//! - **file mode**: `patterndoc -o docs/patterns -f json src/components/*.css`

use anyhow::{Context, Result};
use clap::Parser;
use patterndoc::model::Pattern;
use patterndoc::parser::{self, merge, SUPPORTED_EXTENSIONS};
use patterndoc::render;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "patterndoc",
    about = "Extract @pattern documentation from block comments in source files"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Filter patterns by meta. Prefix with ! to exclude.
    /// Can be specified multiple times. E.g. --filter '!deprecated' --filter category=Forms
    #[arg(long)]
    filter: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// stdin mode: read from stdin, render every pattern to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let mut patterns = parser::parse(&input);
    filter_patterns(&mut patterns, &cli.filter);
    let renderer = render::create_renderer(&cli.format)?;
    print!("{}", renderer.render(&patterns)?);
    Ok(())
}

/// file mode: process multiple files, merge by module name, write to output directory.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    // Fail on a bad format before touching the filesystem
    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let input_files = expand_globs(&cli.files)?;

    let mut parsed: Vec<(String, Vec<Pattern>)> = Vec::new();
    for path in &input_files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        match parser::parse_file(path, &content) {
            Ok(patterns) => {
                debug!(file = %path.display(), count = patterns.len(), "parsed");
                parsed.push((path.to_string_lossy().to_string(), patterns));
            }
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
            }
        }
    }

    for (name, mut patterns) in merge::merge(parsed) {
        filter_patterns(&mut patterns, &cli.filter);
        // Skip modules with no documented patterns
        if patterns.is_empty() {
            continue;
        }

        let out_path = output_dir.join(format!("{}.{}", name, ext));
        fs::write(&out_path, renderer.render(&patterns)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for supported extensions (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Filter patterns by --filter expressions; all must match.
///
/// `deprecated` selects patterns with @deprecated, `key=value` compares a
/// @meta entry, and a bare `key` requires the entry to exist. A leading `!`
/// inverts the expression.
fn filter_patterns(patterns: &mut Vec<Pattern>, filters: &[String]) {
    patterns.retain(|pattern| filters.iter().all(|f| matches_filter(pattern, f)));
}

fn matches_filter(pattern: &Pattern, filter: &str) -> bool {
    let (negate, expr) = match filter.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, filter),
    };
    let hit = match expr.split_once('=') {
        _ if expr == "deprecated" => pattern.meta.is_deprecated(),
        Some((key, value)) => pattern.meta.get(key.trim()) == Some(value.trim()),
        None => pattern.meta.get(expr).is_some(),
    };
    hit != negate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(name: &str, meta: &[(&str, &str)], deprecated: bool) -> Pattern {
        let mut p = Pattern {
            name: name.to_string(),
            ..Default::default()
        };
        for (k, v) in meta {
            p.meta.entries.insert(k.to_string(), v.to_string());
        }
        if deprecated {
            p.meta.deprecated = Some("gone".to_string());
        }
        p
    }

    fn names(patterns: &[Pattern]) -> Vec<&str> {
        patterns.iter().map(|p| p.name.as_str()).collect()
    }

    fn sample() -> Vec<Pattern> {
        vec![
            pattern("Button", &[("category", "Forms")], false),
            pattern("OldButton", &[("category", "Forms")], true),
            pattern("Card", &[("category", "Layout"), ("beta", "")], false),
        ]
    }

    #[test]
    fn no_filters_keeps_all() {
        let mut patterns = sample();
        filter_patterns(&mut patterns, &[]);
        assert_eq!(patterns.len(), 3);
    }

    #[test]
    fn exclude_deprecated() {
        let mut patterns = sample();
        filter_patterns(&mut patterns, &["!deprecated".to_string()]);
        assert_eq!(names(&patterns), vec!["Button", "Card"]);
    }

    #[test]
    fn only_deprecated() {
        let mut patterns = sample();
        filter_patterns(&mut patterns, &["deprecated".to_string()]);
        assert_eq!(names(&patterns), vec!["OldButton"]);
    }

    #[test]
    fn meta_value_filters_combine() {
        let mut patterns = sample();
        filter_patterns(
            &mut patterns,
            &["category=Forms".to_string(), "!deprecated".to_string()],
        );
        assert_eq!(names(&patterns), vec!["Button"]);
    }

    #[test]
    fn meta_key_presence() {
        let mut patterns = sample();
        filter_patterns(&mut patterns, &["beta".to_string()]);
        assert_eq!(names(&patterns), vec!["Card"]);

        let mut patterns = sample();
        filter_patterns(&mut patterns, &["!category=Layout".to_string()]);
        assert_eq!(names(&patterns), vec!["Button", "OldButton"]);
    }

    #[test]
    fn supported_extensions() {
        assert!(has_supported_extension(Path::new("a/button.css")));
        assert!(has_supported_extension(Path::new("card.tsx")));
        assert!(!has_supported_extension(Path::new("README.md")));
        assert!(!has_supported_extension(Path::new("Makefile")));
    }
}
