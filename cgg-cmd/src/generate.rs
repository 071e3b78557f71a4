//! Pattern generation commands.

use crate::input::load_counts;
use cgg_pattern::calendar::YearSeries;
use cgg_pattern::contribution::YearCounts;
use cgg_pattern::export::{instructions, measure, pattern_filename, transcript};
use cgg_pattern::grid::{compose, YearGrid};
use cgg_pattern::pattern::{stack, Pattern};
use cgg_pattern::PatternError;
use log::info;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Arguments of the `pattern` subcommand.
#[derive(Debug, Clone)]
pub struct PatternRequest {
    pub input: PathBuf,
    pub years: Vec<i32>,
    pub username: String,
    pub theme: String,
    pub output_dir: PathBuf,
    pub json: Option<PathBuf>,
}

/// Compose every requested year on the blocking pool, then stack them.
///
/// Years share no data, so each one is normalized and laid out on its own
/// task; the stacker restores newest-first order after the join.
pub async fn compose_concurrently(
    requested: &[i32],
    mut counts_by_year: BTreeMap<i32, YearCounts>,
) -> anyhow::Result<Pattern> {
    if requested.is_empty() {
        return Err(PatternError::EmptyYearSet.into());
    }
    let unique: BTreeSet<i32> = requested.iter().copied().collect();
    let mut tasks = Vec::with_capacity(unique.len());
    for year in unique {
        let counts = counts_by_year.remove(&year).unwrap_or_default();
        tasks.push(tokio::task::spawn_blocking(
            move || -> cgg_pattern::Result<YearGrid> {
                let series = YearSeries::from_counts(year, &counts)?;
                Ok(compose(&series))
            },
        ));
    }
    let mut grids = HashMap::with_capacity(tasks.len());
    for task in tasks {
        let grid = task.await??;
        grids.insert(grid.year(), grid);
    }
    Ok(stack(requested, grids)?)
}

async fn load_pattern(input: &Path, years: &[i32]) -> anyhow::Result<Pattern> {
    let counts = load_counts(input).await?;
    let pattern = compose_concurrently(years, counts).await?;
    info!(
        "Composed {:?} with {} contributions",
        pattern.years(),
        pattern.total_count()
    );
    Ok(pattern)
}

/// Write the instructions document (and optionally the pattern JSON).
///
/// Returns the path of the instructions file.
pub async fn run_pattern(request: &PatternRequest) -> anyhow::Result<PathBuf> {
    let pattern = load_pattern(&request.input, &request.years).await?;
    let document = instructions(&pattern, &request.username, &request.theme)?;
    let path = request
        .output_dir
        .join(pattern_filename(&request.username, &pattern));
    tokio::fs::write(&path, document).await?;
    info!("Instructions written to {}", path.display());

    if let Some(json_path) = &request.json {
        let body = serde_json::to_string(&pattern)?;
        tokio::fs::write(json_path, body).await?;
        info!("Pattern JSON written to {}", json_path.display());
    }
    Ok(path)
}

pub async fn run_transcript(input: &Path, years: &[i32]) -> anyhow::Result<String> {
    let pattern = load_pattern(input, years).await?;
    Ok(transcript(&pattern)?)
}

/// Human-readable measurement summary, one line per figure.
pub async fn run_stats(input: &Path, years: &[i32]) -> anyhow::Result<Vec<String>> {
    let pattern = load_pattern(input, years).await?;
    let stats = measure(&pattern)?;
    let mut lines = vec![
        format!("Years: {:?}", pattern.years()),
        format!("Total commits: {}", pattern.total_count()),
        format!(
            "Pattern size: {} × {} squares",
            stats.width_squares, stats.height_squares
        ),
        format!(
            "Finished size: ~{:.0}\" × {:.0}\"",
            stats.finished_width_inches, stats.finished_height_inches
        ),
        format!("Total squares: {}", stats.total_squares),
        format!("Data squares: {}", stats.data_squares),
        format!("Border squares: {}", stats.border_squares),
    ];
    lines.extend(
        stats
            .level_counts
            .iter()
            .enumerate()
            .map(|(level, count)| format!("Level {level}: {count} squares")),
    );
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgg_pattern::export::decode_transcript;
    use cgg_pattern::grid::BORDER_SQUARES;

    fn write_input(dir: &Path) -> PathBuf {
        let path = dir.join("contributions.csv");
        std::fs::write(
            &path,
            "date,count\n2022-03-01,2\n2023-07-04,7\n2023-07-05,11\n",
        )
        .unwrap();
        path
    }

    #[tokio::test]
    async fn test_compose_concurrently_orders_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let counts = load_counts(&write_input(dir.path())).await.unwrap();
        let pattern = compose_concurrently(&[2022, 2023], counts).await.unwrap();
        assert_eq!(pattern.years(), [2023, 2022]);
        assert_eq!(pattern.total_count(), 20);
        for grid in pattern.year_grids() {
            assert_eq!(grid.border_square_count(), BORDER_SQUARES);
        }
    }

    #[tokio::test]
    async fn test_compose_concurrently_empty_years() {
        let err = compose_concurrently(&[], BTreeMap::new()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PatternError>(),
            Some(PatternError::EmptyYearSet)
        ));
    }

    #[tokio::test]
    async fn test_run_pattern_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("pattern.json");
        let request = PatternRequest {
            input: write_input(dir.path()),
            years: vec![2023, 2022],
            username: "octocat".to_string(),
            theme: "ultraviolet".to_string(),
            output_dir: dir.path().to_path_buf(),
            json: Some(json_path.clone()),
        };
        let written = run_pattern(&request).await.unwrap();
        assert_eq!(
            written.file_name().unwrap(),
            "octocat-github-graphghan-2023-2022.txt"
        );
        let document = std::fs::read_to_string(&written).unwrap();
        assert!(document.contains("Cream (#f8f9fa)"));
        assert!(document.contains("- Total commits represented: 20"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(json["years"], serde_json::json!([2023, 2022]));
        assert_eq!(json["total_count"], 20);
    }

    #[tokio::test]
    async fn test_run_transcript_lists_newest_year_first() {
        let dir = tempfile::tempdir().unwrap();
        let text = run_transcript(&write_input(dir.path()), &[2022, 2023])
            .await
            .unwrap();
        let decoded = decode_transcript(&text).unwrap();
        assert_eq!(decoded.len(), 2);
        // 2023-07-04 is a Tuesday in week 26: rows 6-7, columns 54-55
        assert_eq!(decoded[0][6][54].value(), 3);
        assert_eq!(decoded[1][6][54].value(), 0);
    }

    #[tokio::test]
    async fn test_run_stats() {
        let dir = tempfile::tempdir().unwrap();
        let lines = run_stats(&write_input(dir.path()), &[2023]).await.unwrap();
        assert!(lines.contains(&"Pattern size: 110 × 18 squares".to_string()));
        assert!(lines.contains(&"Border squares: 496".to_string()));
        assert!(lines.contains(&"Level 3: 4 squares".to_string()));
    }
}
