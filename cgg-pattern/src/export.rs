//! Printable artifacts derived from a composed [`Pattern`].
//!
//! Everything here reads only the pattern; raw supplier counts are never
//! consulted again. Output is deterministic for a given pattern, username and
//! theme.

use crate::error::{PatternError, Result};
use crate::grid::{
    YearGrid, BORDER_WIDTH, DATA_COLS, DATA_ROWS, GRID_COLS, GRID_ROWS, SQUARES_PER_DAY,
};
use crate::level::Level;
use crate::pattern::Pattern;
use crate::theme::ThemeId;
use serde::Serialize;

/// Finished inches per C2C square (worsted weight yarn, size H/8 hook).
pub const INCHES_PER_SQUARE: f64 = 3.0;

/// One decoded year: `levels[row][col]`.
pub type LevelGrid = Vec<Vec<Level>>;

fn ensure_years(pattern: &Pattern) -> Result<()> {
    if pattern.is_empty() {
        return Err(PatternError::EmptyPattern);
    }
    Ok(())
}

fn grid_rows_text(grid: &YearGrid, out: &mut String) {
    for row in grid.rows() {
        out.extend(row.iter().map(|square| square.level.indicator()));
        out.push('\n');
    }
}

/// One character per square, one line per grid row, years in pattern order.
pub fn transcript(pattern: &Pattern) -> Result<String> {
    ensure_years(pattern)?;
    let mut out = String::with_capacity(pattern.year_grids().len() * GRID_ROWS * (GRID_COLS + 1));
    for grid in pattern.year_grids() {
        grid_rows_text(grid, &mut out);
    }
    Ok(out)
}

/// Parse a transcript back into per-year level grids by character position.
pub fn decode_transcript(text: &str) -> Result<Vec<LevelGrid>> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return Err(PatternError::EmptyPattern);
    }
    if lines.len() % GRID_ROWS != 0 {
        return Err(PatternError::MalformedTranscript {
            line: lines.len(),
            reason: format!("{} lines is not a multiple of {GRID_ROWS}", lines.len()),
        });
    }
    let mut rows = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let row = line
            .chars()
            .map(|c| {
                Level::from_indicator(c).ok_or_else(|| PatternError::MalformedTranscript {
                    line: index + 1,
                    reason: format!("unknown symbol {c:?}"),
                })
            })
            .collect::<Result<Vec<Level>>>()?;
        if row.len() != GRID_COLS {
            return Err(PatternError::MalformedTranscript {
                line: index + 1,
                reason: format!("expected {GRID_COLS} squares, found {}", row.len()),
            });
        }
        rows.push(row);
    }
    Ok(rows.chunks(GRID_ROWS).map(|chunk| chunk.to_vec()).collect())
}

/// Square counts and finished-size estimate for a whole pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurements {
    pub year_count: usize,
    pub total_squares: usize,
    pub data_squares: usize,
    pub border_squares: usize,
    /// Stacked width in squares.
    pub width_squares: usize,
    /// Stacked height in squares; adjacent year frames abut.
    pub height_squares: usize,
    pub finished_width_inches: f64,
    pub finished_height_inches: f64,
    /// Squares per color role, indexed by level value (index 5 is border).
    pub level_counts: [usize; 6],
}

pub fn measure(pattern: &Pattern) -> Result<Measurements> {
    ensure_years(pattern)?;
    let year_count = pattern.year_grids().len();
    let mut level_counts = [0usize; 6];
    let mut total_squares = 0;
    for grid in pattern.year_grids() {
        total_squares += grid.rows_len() * grid.cols_len();
        for (total, count) in level_counts.iter_mut().zip(grid.level_counts()) {
            *total += count;
        }
    }
    let border_squares = level_counts[Level::BORDER.index()];
    let width_squares = GRID_COLS;
    let height_squares = GRID_ROWS * year_count;
    Ok(Measurements {
        year_count,
        total_squares,
        data_squares: total_squares - border_squares,
        border_squares,
        width_squares,
        height_squares,
        finished_width_inches: width_squares as f64 * INCHES_PER_SQUARE,
        finished_height_inches: height_squares as f64 * INCHES_PER_SQUARE,
        level_counts,
    })
}

fn joined_years(years: &[i32], separator: &str) -> String {
    years
        .iter()
        .map(|year| year.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Suggested filename: `<username>-github-graphghan-<years>.txt`.
///
/// `username` is copied verbatim; making it filesystem-safe is the caller's job.
pub fn pattern_filename(username: &str, pattern: &Pattern) -> String {
    format!(
        "{username}-github-graphghan-{}.txt",
        joined_years(pattern.years(), "-")
    )
}

const C2C_TECHNIQUE: &[&str] = &[
    "### Corner-to-Corner Technique",
    "",
    "Follow the pattern starting in the bottom left corner and working diagonally to the top right corner",
    "",
    "R1 - ch 6, dc in 4th ch from hook, dc in next 2 ch, turn",
    "R2 - ch 6, dc in 4th ch from hook, dc in next 2 ch, slst in top of 3 ch loop in previous row, ch 3, 3dcs in the chain spaces, turn",
    "R3 - ch 6, dc in 4th ch from hook, dc in next 2 ch, slst in top of 3 ch loop in previous row, ch 3, 3dcs in the chain spaces, slst in top of 3 ch loop in previous row, ch 3, 3dcs in the chain spaces, turn",
    "Continue in this pattern through increasing rows until you reach the full width of the pattern",
    "This blanket will not be a perfect square. Once you reach the full width, continue working in the established pattern but skip the final square.",
    "Decreasing rows:",
    "When you begin decreasing, turn and slst into the 3 dcs you just made AND into the top of the ch 3 loop. Ch 3, 3dcs into the ch space, slst into the top of ch 3 loop.",
    "",
    "When switching colors, change on the second half of the last double crochet of the previous square",
];

const EDGING: &[&str] = &[
    "Feel free to add an additional border around the entire blanket, such as:",
    "",
    "R1: Join yarn in the middle of an edge, ch 1, sc into same st and each st around, working a cluster of 3 sc at each corner, slst into first sc to finish round.",
    "",
    "R2: Ch 2, dc into same st and each st around, working a cluster of 3 dc at each corner, slst into first dc to finish round.",
    "",
    "R3: Ch 1, sc into same st and each st around, working a cluster of 3 sc at each corner, slst into first sc to finish round. Bind off.",
];

/// Compose the downloadable materials and instructions document.
///
/// An unrecognized `theme_key` selects the default theme.
pub fn instructions(pattern: &Pattern, username: &str, theme_key: &str) -> Result<String> {
    let grid_text = transcript(pattern)?;
    let stats = measure(pattern)?;
    let theme = ThemeId::from_key(theme_key);
    let colors = theme.colors();
    let years = joined_years(pattern.years(), ", ");
    let newest = pattern.years().first().copied().unwrap_or_default();
    let oldest = pattern.years().last().copied().unwrap_or_default();
    let separation = 2 * BORDER_WIDTH;

    let mut lines: Vec<String> = vec![
        format!("# {username}'s GitHub Graphghan Pattern"),
        String::new(),
        "## Materials Needed".to_string(),
        format!("- Worsted weight yarn in {} colors:", colors.len()),
    ];
    lines.extend(colors.iter().map(|color| {
        format!(
            "  • {} ({}) - {} [{} squares]",
            color.name,
            color.hex,
            color.description,
            stats.level_counts[color.level.index()]
        )
    }));
    lines.extend([
        "- Size H/8 (5.0mm) crochet hook".to_string(),
        "- Yarn needle for sewing".to_string(),
        "- Scissors".to_string(),
        String::new(),
        "## Finished Size".to_string(),
        format!(
            "Approximately {:.0}\" × {:.0}\" ({} × {} squares, including {BORDER_WIDTH}-square wide borders)",
            stats.finished_width_inches,
            stats.finished_height_inches,
            stats.width_squares,
            stats.height_squares
        ),
        String::new(),
        "## Pattern Notes".to_string(),
        "- This is a corner-to-corner (C2C) crochet pattern".to_string(),
        format!(
            "- Each day of {username}'s GitHub activity is a block of {SQUARES_PER_DAY} × {SQUARES_PER_DAY} squares"
        ),
        format!("- Years are stacked vertically, newest ({newest}) at top, oldest ({oldest}) at bottom"),
        format!("- Pattern covers: {years}"),
        format!("- Total commits represented: {}", pattern.total_count()),
        format!("- All borders are {BORDER_WIDTH} squares wide"),
        String::new(),
        "## Abbreviations (US terms):".to_string(),
        "- ch - chain".to_string(),
        "- dc - double crochet".to_string(),
        "- sc - single crochet".to_string(),
        "- slst - slip stitch".to_string(),
        String::new(),
        "## Instructions".to_string(),
        String::new(),
    ]);
    lines.extend(C2C_TECHNIQUE.iter().map(|line| line.to_string()));
    lines.extend([String::new(), "### Pattern Structure".to_string()]);
    lines.extend(pattern.year_grids().iter().map(|grid| {
        format!(
            "- {}: {DATA_COLS} × {DATA_ROWS} squares ({} commits)",
            grid.year(),
            grid.total_count()
        )
    }));
    lines.extend([
        String::new(),
        "### Color Guide".to_string(),
        "- Follow the attached grid pattern".to_string(),
        "- Each cell = 1 C2C square".to_string(),
        "- Change colors as indicated in the pattern".to_string(),
        format!(
            "- Years are separated by {separation}-square tall {} border sections",
            theme.key()
        ),
        format!(
            "- Total pattern size: {} × {} squares (including borders)",
            stats.width_squares, stats.height_squares
        ),
        String::new(),
        "### Pattern Grid (Printable)".to_string(),
        "Each symbol represents a yarn color:".to_string(),
        colors
            .iter()
            .map(|color| format!("{} = {}", color.indicator(), color.name))
            .collect::<Vec<_>>()
            .join(", "),
        String::new(),
        "Each row below is one row of squares, top to bottom. Print this section in a monospace font (such as Courier or Consolas) or view it in a code editor.".to_string(),
        String::new(),
    ]);
    lines.push(grid_text.trim_end_matches('\n').to_string());
    lines.extend([
        String::new(),
        format!("### Border ({} Mode)", theme.mode_label()),
        format!(
            "All borders are {BORDER_WIDTH} squares wide using {} yarn:",
            theme.border_yarn()
        ),
        format!("- Top border: {BORDER_WIDTH} squares tall"),
        format!("- Bottom border: {BORDER_WIDTH} squares tall"),
        format!("- Left border: {BORDER_WIDTH} squares wide"),
        format!("- Right border: {BORDER_WIDTH} squares wide"),
        format!(
            "- Between years: {separation} squares total ({BORDER_WIDTH} squares above and below each year section)"
        ),
        String::new(),
    ]);
    lines.extend(EDGING.iter().map(|line| line.to_string()));
    lines.extend([
        String::new(),
        "### Finishing".to_string(),
        "1. Weave in all ends securely".to_string(),
        "2. Block if desired for crisp edges".to_string(),
        "3. Enjoy your personalized commit graph blanket!".to_string(),
        String::new(),
        "## Pattern Statistics".to_string(),
        format!("- Total squares: {}", stats.total_squares),
        format!("- Data squares: {}", stats.data_squares),
        format!("- Border squares: {}", stats.border_squares),
        format!("- Years stacked: {}", stats.year_count),
        format!("- Years included: {years}"),
        format!("- Created from {username}'s GitHub activity"),
        String::new(),
        "Generated by Commit Graphghan Generator".to_string(),
    ]);
    Ok(lines.join("\n") + "\n")
}
