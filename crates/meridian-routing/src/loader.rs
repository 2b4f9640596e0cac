//! Dial-plan file loading
//!
//! Populates digit trees from semicolon-separated dial-plan files at
//! cache-load time. Single-key rows are `prefix;result[,result...]`;
//! fixed-line rows are `a_prefix;b_prefix;result[,result...]`. Lines that
//! are blank or start with `#` are skipped. A structurally malformed row
//! fails the whole load: a partially applied dial plan must never be
//! published to the lookup threads. [`load_from_config`] loads everything
//! the routing configuration names in one call.

use crate::{DigitTree, FixedLineDigitTree};
use meridian_core::config::RoutingConfig;
use meridian_core::{AppError, AppResult};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load every tree named by the routing configuration
///
/// Loads the single-key dial plan from `dial_plan_path`, the fixed-line
/// plan from `fixed_line_plan_path` when one is configured, and registers
/// `default_destination` as the empty-prefix root payload. The configured
/// default is applied after the file rows, so it wins over any root payload
/// the file itself supplies.
pub fn load_from_config(
    config: &RoutingConfig,
) -> AppResult<(DigitTree, Option<FixedLineDigitTree>)> {
    let mut tree = load_dial_plan(&config.dial_plan_path)?;
    if let Some(destination) = config.default_destination.as_deref() {
        tree.add_prefix("", vec![destination.to_string()])?;
        info!(destination, "catch-all destination registered");
    }

    let fixed_line = match config.fixed_line_plan_path.as_deref() {
        Some(path) => Some(load_fixed_line_plan(path)?),
        None => None,
    };

    Ok((tree, fixed_line))
}

/// Split a dial-plan row into its semicolon-separated columns
fn columns(line: &str, line_no: usize, expected: usize) -> AppResult<Vec<&str>> {
    let cols: Vec<&str> = line.split(';').map(str::trim).collect();
    if cols.len() != expected {
        return Err(AppError::DialPlan {
            line: line_no,
            reason: format!("expected {} columns, found {}", expected, cols.len()),
        });
    }
    Ok(cols)
}

/// Parse the comma-separated result column
fn parse_results(col: &str, line_no: usize) -> AppResult<Vec<String>> {
    let results: Vec<String> = col
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if results.is_empty() {
        return Err(AppError::DialPlan {
            line: line_no,
            reason: "empty result column".to_string(),
        });
    }
    Ok(results)
}

/// Load a single-key dial plan into a fresh [`DigitTree`]
///
/// Re-registered prefixes overwrite the earlier row (last row wins) and
/// are logged at warn level, since they usually indicate a bad rate-table
/// export.
pub fn load_dial_plan(path: impl AsRef<Path>) -> AppResult<DigitTree> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let mut tree = DigitTree::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut rows = 0usize;

    for (i, line) in contents.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cols = columns(line, line_no, 2)?;
        let prefix = cols[0];
        let results = parse_results(cols[1], line_no)?;

        if !seen.insert(prefix.to_string()) {
            warn!(line = line_no, prefix, "duplicate prefix, last row wins");
        }

        debug!(line = line_no, prefix, results = results.len(), "dial plan row");
        tree.add_prefix(prefix, results)?;
        rows += 1;
    }

    info!(
        path = %path.display(),
        rows,
        nodes = tree.node_count(),
        "dial plan loaded"
    );
    Ok(tree)
}

/// Load a two-key dial plan into a fresh [`FixedLineDigitTree`]
pub fn load_fixed_line_plan(path: impl AsRef<Path>) -> AppResult<FixedLineDigitTree> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let mut tree = FixedLineDigitTree::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut rows = 0usize;

    for (i, line) in contents.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cols = columns(line, line_no, 3)?;
        let a_prefix = cols[0];
        let b_prefix = cols[1];
        let results = parse_results(cols[2], line_no)?;

        if !seen.insert(a_prefix.to_string()) {
            warn!(
                line = line_no,
                a_prefix, "duplicate A-prefix, last row wins"
            );
        }

        debug!(
            line = line_no,
            a_prefix,
            b_prefix,
            results = results.len(),
            "fixed-line dial plan row"
        );
        tree.add_prefix(a_prefix, b_prefix, results)?;
        rows += 1;
    }

    info!(
        path = %path.display(),
        rows,
        nodes = tree.node_count(),
        "fixed-line dial plan loaded"
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_plan(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_dial_plan() {
        let path = write_plan(
            "meridian_dial_plan_basic.csv",
            "# intl routing\n\
             1;NANP\n\
             44;UK,United Kingdom\n\
             \n\
             4420;UK-London\n",
        );

        let tree = load_dial_plan(&path).unwrap();
        assert_eq!(tree.best_match("14155550100").unwrap(), Some("NANP"));
        assert_eq!(tree.best_match("44207946000").unwrap(), Some("UK-London"));
        assert_eq!(tree.best_match("4413").unwrap(), Some("UK"));
    }

    #[test]
    fn test_malformed_row_fails_load() {
        let path = write_plan(
            "meridian_dial_plan_malformed.csv",
            "44;UK\nthis row has no separator\n",
        );

        let err = load_dial_plan(&path).unwrap_err();
        assert!(matches!(err, AppError::DialPlan { line: 2, .. }));
    }

    #[test]
    fn test_empty_result_column_fails_load() {
        let path = write_plan("meridian_dial_plan_empty.csv", "44; \n");

        assert!(matches!(
            load_dial_plan(&path).unwrap_err(),
            AppError::DialPlan { line: 1, .. }
        ));
    }

    #[test]
    fn test_duplicate_prefix_last_row_wins() {
        let path = write_plan(
            "meridian_dial_plan_dup.csv",
            "44;Old\n44;New\n",
        );

        let tree = load_dial_plan(&path).unwrap();
        assert_eq!(tree.best_match("44123").unwrap(), Some("New"));
    }

    #[test]
    fn test_load_fixed_line_plan() {
        let path = write_plan(
            "meridian_fixed_line_plan.csv",
            "44;020;London\n4413;0131;Edinburgh\n",
        );

        let tree = load_fixed_line_plan(&path).unwrap();
        assert_eq!(
            tree.best_match("44161", "02079460000").unwrap(),
            Some("London")
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_dial_plan("/nonexistent/dial_plan.csv").unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_load_from_config_registers_default() {
        let path = write_plan("meridian_config_plan.csv", "44;UK\n");

        let config = RoutingConfig {
            dial_plan_path: path.to_string_lossy().into_owned(),
            fixed_line_plan_path: None,
            default_destination: Some("CATCH-ALL".to_string()),
        };

        let (tree, fixed_line) = load_from_config(&config).unwrap();
        assert!(fixed_line.is_none());
        assert_eq!(tree.best_match("44123").unwrap(), Some("UK"));
        // No registered prefix matches, so the configured default applies
        assert_eq!(tree.best_match("99123").unwrap(), Some("CATCH-ALL"));
    }

    #[test]
    fn test_configured_default_wins_over_file_root_row() {
        let path = write_plan(
            "meridian_config_plan_root.csv",
            ";FROM-FILE\n44;UK\n",
        );

        let config = RoutingConfig {
            dial_plan_path: path.to_string_lossy().into_owned(),
            fixed_line_plan_path: None,
            default_destination: Some("FROM-CONFIG".to_string()),
        };

        let (tree, _) = load_from_config(&config).unwrap();
        assert_eq!(tree.best_match("99").unwrap(), Some("FROM-CONFIG"));
    }

    #[test]
    fn test_load_from_config_with_fixed_line_plan() {
        let dial = write_plan("meridian_config_dial.csv", "44;UK\n");
        let fixed = write_plan("meridian_config_fixed.csv", "44;020;London\n");

        let config = RoutingConfig {
            dial_plan_path: dial.to_string_lossy().into_owned(),
            fixed_line_plan_path: Some(fixed.to_string_lossy().into_owned()),
            default_destination: None,
        };

        let (tree, fixed_line) = load_from_config(&config).unwrap();
        assert_eq!(tree.best_match("4420").unwrap(), Some("UK"));
        assert_eq!(
            fixed_line
                .unwrap()
                .best_match("44999", "02079460000")
                .unwrap(),
            Some("London")
        );

        // Without a configured default, a miss stays a miss
        assert_eq!(tree.best_match("99").unwrap(), None);
    }
}
