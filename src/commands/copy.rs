//! Copy pipeline result files matching glob patterns.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use walkdir::WalkDir;

use crate::cli::{CopyOpts, GlobalOpts};
use crate::logging::Logger;
use crate::resources::{self, copy::CopyResource};

/// Run the copy command.
///
/// Finds files under the source directory matching the configured patterns,
/// asks for confirmation, and copies each match into a target subdirectory
/// named after the file's immediate parent folder.
///
/// # Errors
///
/// Returns an error if no patterns are given, a pattern is invalid, the
/// source tree cannot be walked, or a copy fails.
pub fn run(global: &GlobalOpts, opts: &CopyOpts, log: &Logger) -> Result<()> {
    let mut rules = Vec::new();
    if let Some(file) = &opts.rules_file {
        rules.extend(read_rules(file)?);
    }
    rules.extend(opts.rules.iter().cloned());
    if rules.is_empty() {
        anyhow::bail!("no file patterns given; use --rules or --rules-file");
    }

    let patterns = compile_patterns(&rules)?;

    log.stage("Scanning for matching files");
    let matches = find_matches(&opts.src_dir, &patterns)?;
    if matches.is_empty() {
        log.info("no files matched the given patterns");
        return Ok(());
    }

    log.info(&format!("{} file(s) will be copied:", matches.len()));
    for path in &matches {
        log.info(&format!("  {}", path.display()));
    }

    if !global.dry_run && !opts.yes && !confirm()? {
        log.info("operation cancelled");
        return Ok(());
    }

    let copies: Vec<CopyResource> = matches
        .iter()
        .map(|path| {
            let parent = path.parent().and_then(Path::file_name).unwrap_or_default();
            let name = path.file_name().unwrap_or_default();
            CopyResource::new(path.clone(), opts.target_dir.join(parent).join(name))
        })
        .collect();

    log.stage("Copying files");
    let stats = resources::process(log, global.dry_run, "copy", &copies)?;
    log.info(&stats.summary(global.dry_run));
    Ok(())
}

/// Read patterns from a rules file, one per line, skipping blank lines.
fn read_rules(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading rules file {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Compile the rule strings into glob patterns.
fn compile_patterns(rules: &[String]) -> Result<Vec<glob::Pattern>> {
    rules
        .iter()
        .map(|rule| {
            glob::Pattern::new(rule).with_context(|| format!("invalid file pattern '{rule}'"))
        })
        .collect()
}

/// Recursively find files under `src_dir` matching any of `patterns`.
///
/// Patterns containing a path separator are matched against the path
/// relative to `src_dir`; plain patterns are matched against the file name.
fn find_matches(src_dir: &Path, patterns: &[glob::Pattern]) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    for entry in WalkDir::new(src_dir) {
        let entry = entry.with_context(|| format!("walking {}", src_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let relative = entry
            .path()
            .strip_prefix(src_dir)
            .unwrap_or_else(|_| entry.path());
        if patterns.iter().any(|pattern| {
            if pattern.as_str().contains('/') {
                pattern.matches_path(relative)
            } else {
                pattern.matches(&name)
            }
        }) {
            matches.push(entry.into_path());
        }
    }
    matches.sort();
    Ok(matches)
}

/// Ask the user to confirm the copy on stdin.
fn confirm() -> Result<bool> {
    use std::io::Write as _;

    print!("Do you want to proceed? [y/N]: ");
    std::io::stdout().flush().ok();
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("reading confirmation from stdin")?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn read_rules_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.txt");
        std::fs::write(&path, "*_peaks*\n\n  \n*.bigWig\n").unwrap();

        let rules = read_rules(&path).unwrap();
        assert_eq!(rules, vec!["*_peaks*", "*.bigWig"]);
    }

    #[test]
    fn read_rules_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_rules(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.to_string().contains("rules file"));
    }

    #[test]
    fn compile_patterns_rejects_invalid() {
        let err = compile_patterns(&["[".to_string()]).unwrap_err();
        assert!(err.to_string().contains("invalid file pattern"));
    }

    #[test]
    fn find_matches_by_file_name_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sample1/macs2")).unwrap();
        std::fs::write(dir.path().join("sample1/macs2/s1_peaks.narrowPeak"), b"").unwrap();
        std::fs::write(dir.path().join("top_peaks.txt"), b"").unwrap();
        std::fs::write(dir.path().join("sample1/ignore.bam"), b"").unwrap();

        let patterns = compile_patterns(&["*_peaks*".to_string()]).unwrap();
        let matches = find_matches(dir.path(), &patterns).unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn find_matches_with_path_pattern() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("macs2")).unwrap();
        std::fs::create_dir_all(dir.path().join("other")).unwrap();
        std::fs::write(dir.path().join("macs2/a.txt"), b"").unwrap();
        std::fs::write(dir.path().join("other/a.txt"), b"").unwrap();

        let patterns = compile_patterns(&["macs2/*.txt".to_string()]).unwrap();
        let matches = find_matches(dir.path(), &patterns).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].ends_with("macs2/a.txt"));
    }

    #[test]
    fn find_matches_empty_when_nothing_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.bam"), b"").unwrap();

        let patterns = compile_patterns(&["*.bigWig".to_string()]).unwrap();
        assert!(find_matches(dir.path(), &patterns).unwrap().is_empty());
    }
}
