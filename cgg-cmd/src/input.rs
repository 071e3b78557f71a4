//! Loading contribution exports from disk.

use cgg_pattern::contribution::{
    group_by_year, parse_daily_counts_csv, parse_daily_counts_json, YearCounts,
};
use log::info;
use std::collections::BTreeMap;
use std::path::Path;

/// Read a contribution export and split it by year.
///
/// Files ending in `.json` are parsed as a JSON object, everything else as
/// `date,count` CSV.
pub async fn load_counts(path: &Path) -> anyhow::Result<BTreeMap<i32, YearCounts>> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let daily_counts = if is_json {
        parse_daily_counts_json(&body)?
    } else {
        parse_daily_counts_csv(&body)?
    };
    info!(
        "Loaded {} daily counts from {}",
        daily_counts.len(),
        path.display()
    );
    Ok(group_by_year(daily_counts))
}
