use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::TIME_OF_POSSESSION;
use crate::matcher::{MIN_TEAM_ROW_CELLS, StatTable, TableRow, TeamMatcher, find_team_rows, parse_tables};

/// Rank cell text used by the source for "tied with the row above".
pub const TIE_PLACEHOLDER: &str = "-";

/// Reported by `count_ranked_teams` when a table carries no explicit rank.
const FALLBACK_TABLE_SIZE: u32 = 125;

static PLAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.?\d*$").expect("valid number pattern"));
static LEADING_DOT_FRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.\d+$").expect("valid fraction pattern"));
static SIGNED_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]\d+\.?\d*$").expect("valid signed pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub value: String,
    pub rank: u32,
    /// Rank as displayed: the cell's digits, or the resolved number for ties.
    pub rank_text: String,
}

impl Extraction {
    pub fn rank_label(&self, field_size: u32) -> String {
        format_rank(&self.rank_text, field_size)
    }
}

pub fn format_rank(rank: &str, field_size: u32) -> String {
    format!("({rank}/{field_size})")
}

/// Headline value of a row: the rightmost non-rank cell that looks like a stat.
///
/// Cells are tried right to left and the first cell accepted by any pattern wins,
/// even when an earlier cell would be the better fit (a `mm:ss` possession time
/// loses to a plain decimal column on its right).
pub fn extract_value<'a>(row: &'a TableRow, category: &str) -> Option<&'a str> {
    row.cells
        .iter()
        .skip(1)
        .rev()
        .map(String::as_str)
        .find(|cell| is_stat_value(cell, category))
}

fn is_stat_value(cell: &str, category: &str) -> bool {
    PLAIN_NUMBER.is_match(cell)
        || (cell.contains(':') && category == TIME_OF_POSSESSION)
        || LEADING_DOT_FRACTION.is_match(cell)
        || SIGNED_NUMBER.is_match(cell)
}

/// Digits of a rank cell such as `"12"` or `"T-12"`. Zero is not a rank.
pub fn parse_rank_cell(text: &str) -> Option<u32> {
    rank_digits(text).parse::<u32>().ok().filter(|rank| *rank > 0)
}

/// The digits of a rank cell, leading zeros kept.
pub fn rank_digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

fn explicit_rank(text: &str) -> Option<u32> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse::<u32>().ok()
}

/// Effective rank of a tied row: one past the nearest explicit rank above it, or
/// `1` when the tie block opens the table. `None` if `row_index` is not a row of
/// `table`.
pub fn resolve_tied_rank(table: &StatTable, row_index: usize) -> Option<u32> {
    if row_index >= table.rows.len() {
        return None;
    }
    let base = table.rows[..row_index]
        .iter()
        .rev()
        .filter_map(TableRow::rank_cell)
        .find_map(explicit_rank);
    match base {
        Some(base) => Some(base.saturating_add(1)),
        None => Some(1),
    }
}

/// Consecutive tie-placeholder rows starting at `row_index`.
pub fn count_tied_teams(table: &StatTable, row_index: usize) -> usize {
    table
        .rows
        .iter()
        .skip(row_index)
        .filter_map(TableRow::rank_cell)
        .take_while(|rank| *rank == TIE_PLACEHOLDER)
        .count()
}

/// Highest explicit rank among team rows.
pub fn count_ranked_teams(table: &StatTable) -> u32 {
    table
        .rows
        .iter()
        .filter(|row| row.cells.len() >= MIN_TEAM_ROW_CELLS)
        .filter_map(|row| row.rank_cell().and_then(explicit_rank))
        .max()
        .unwrap_or(FALLBACK_TABLE_SIZE)
}

/// Rank and value of one matched row, or `None` (with a log line) when either is
/// missing.
pub fn extract_row(
    table: &StatTable,
    row_index: usize,
    category: &str,
    team: &str,
) -> Option<Extraction> {
    let row = table.rows.get(row_index)?;
    info!("Found row for {team}: {:?}", row.cells);

    let rank_text = row.rank_cell().unwrap_or_default();
    let (rank, shown) = if rank_text == TIE_PLACEHOLDER {
        let Some(rank) = resolve_tied_rank(table, row_index) else {
            warn!("Could not determine tied rank for {team}");
            return None;
        };
        info!(
            "Found tied rank for {team}: {rank} (tied with {} teams)",
            count_tied_teams(table, row_index)
        );
        (rank, rank.to_string())
    } else {
        let Some(rank) = parse_rank_cell(rank_text) else {
            warn!("Could not parse rank: {rank_text:?}");
            return None;
        };
        (rank, rank_digits(rank_text))
    };

    let Some(value) = extract_value(row, category) else {
        warn!("Could not extract rank ({rank}) or stat value (none) for {team}");
        return None;
    };

    Some(Extraction {
        value: value.to_string(),
        rank,
        rank_text: shown,
    })
}

/// First matching row on the page that yields both a rank and a value.
pub fn find_team_in_rankings(
    markup: &str,
    matcher: &TeamMatcher,
    category: &str,
    field_size: u32,
) -> Option<Extraction> {
    let tables = parse_tables(markup);
    for (t_idx, r_idx) in find_team_rows(&tables, matcher) {
        let table = &tables[t_idx];
        let Some(found) = extract_row(table, r_idx, category, matcher.team()) else {
            continue;
        };
        debug!(
            "{category}: table {t_idx} lists {} ranked teams, reporting against {field_size}",
            count_ranked_teams(table)
        );
        if found.rank > field_size {
            warn!(
                "{category}: rank {} for {} exceeds field size {field_size}",
                found.rank,
                matcher.team()
            );
        }
        info!(
            "Found {}: {} {}",
            matcher.team(),
            found.value,
            found.rank_label(field_size)
        );
        return Some(found);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> StatTable {
        StatTable::from_rows(rows.iter().map(|cells| TableRow::new(*cells)).collect())
    }

    #[test]
    fn rank_cell_strips_decoration() {
        assert_eq!(parse_rank_cell("12"), Some(12));
        assert_eq!(parse_rank_cell("T-7"), Some(7));
        assert_eq!(parse_rank_cell("--"), None);
        assert_eq!(parse_rank_cell("0"), None);
    }

    #[test]
    fn rank_label_keeps_cell_digits() {
        let t = table(&[&["07", "Team", "30.1"]]);
        let found = extract_row(&t, 0, "Scoring Offense", "Team").expect("row");
        assert_eq!(found.rank, 7);
        assert_eq!(found.rank_label(119), "(07/119)");
        assert_eq!(rank_digits("T-07"), "07");
    }

    #[test]
    fn value_patterns_cover_each_stat_format() {
        let cat = "Scoring Offense";
        assert_eq!(extract_value(&TableRow::new(&["1", "Team", "9", "44"]), cat), Some("44"));
        assert_eq!(extract_value(&TableRow::new(&["1", "Team", ".417"]), cat), Some(".417"));
        assert_eq!(extract_value(&TableRow::new(&["1", "Team", "+1.2"]), cat), Some("+1.2"));
        assert_eq!(extract_value(&TableRow::new(&["1", "Team", "-0.5"]), cat), Some("-0.5"));
        assert_eq!(extract_value(&TableRow::new(&["1", "Team", "n/a"]), cat), None);
    }

    #[test]
    fn colon_value_only_counts_for_time_of_possession() {
        let row = TableRow::new(&["4", "Team", "31:24"]);
        assert_eq!(extract_value(&row, TIME_OF_POSSESSION), Some("31:24"));
        assert_eq!(extract_value(&row, "Total Offense"), None);
    }

    #[test]
    fn rank_cell_is_never_a_value() {
        let row = TableRow::new(&["7", "Team", "Conf"]);
        assert_eq!(extract_value(&row, "Total Offense"), None);
    }

    #[test]
    fn tie_count_stops_at_next_explicit_rank() {
        let t = table(&[
            &["1", "A", "10"],
            &["-", "B", "9"],
            &["-", "C", "9"],
            &["4", "D", "8"],
        ]);
        assert_eq!(count_tied_teams(&t, 1), 2);
        assert_eq!(count_tied_teams(&t, 2), 1);
        assert_eq!(count_tied_teams(&t, 3), 0);
    }

    #[test]
    fn resolve_rejects_row_outside_table() {
        let t = table(&[&["1", "A", "10"]]);
        assert_eq!(resolve_tied_rank(&t, 5), None);
    }

    #[test]
    fn ranked_team_count_falls_back_when_no_ranks() {
        let t = table(&[&["Rank", "Team", "Avg"], &["-", "A", "10"]]);
        assert_eq!(count_ranked_teams(&t), 125);
        let t = table(&[&["1", "A", "10"], &["2", "B", "9"], &["x"]]);
        assert_eq!(count_ranked_teams(&t), 2);
    }
}
