use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("valid table selector"));
static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("valid row selector"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td, th").expect("valid cell selector"));

/// Rows with fewer cells than this are headers or spacers, never team rows.
pub const MIN_TEAM_ROW_CELLS: usize = 3;

// Known short forms used by ncaa.com tables.
const TEAM_ALIASES: &[(&str, &[&str])] = &[
    (
        "Bethune-Cookman",
        &["Bethune Cookman", "Bethune-Cookman", "BCU"],
    ),
    (
        "Alabama A&M",
        &["Alabama A&M", "Alabama AM", "AAMU", "Ala. A&M"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new<S: AsRef<str>>(cells: &[S]) -> Self {
        Self {
            cells: cells.iter().map(|c| c.as_ref().trim().to_string()).collect(),
        }
    }

    pub fn rank_cell(&self) -> Option<&str> {
        self.cells.first().map(String::as_str)
    }

    /// Cell texts joined by single spaces.
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatTable {
    pub rows: Vec<TableRow>,
}

impl StatTable {
    pub fn from_rows(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }
}

/// Every `<table>` in the document, in document order. Each `<tr>` keeps all its
/// `td`/`th` descendants so row indices line up with the markup.
pub fn parse_tables(markup: &str) -> Vec<StatTable> {
    let document = Html::parse_document(markup);
    document
        .select(&TABLE_SELECTOR)
        .map(|table| StatTable {
            rows: table.select(&ROW_SELECTOR).map(parse_row).collect(),
        })
        .collect()
}

fn parse_row(row: ElementRef<'_>) -> TableRow {
    let cells = row
        .select(&CELL_SELECTOR)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect();
    TableRow { cells }
}

/// Name variants for a team: the predefined aliases when known, otherwise the
/// name itself plus hyphen and ampersand normalizations.
pub fn team_aliases(team: &str) -> Vec<String> {
    if let Some((_, aliases)) = TEAM_ALIASES.iter().find(|(name, _)| *name == team) {
        return aliases.iter().map(|a| (*a).to_string()).collect();
    }
    vec![
        team.to_string(),
        team.replace('-', " "),
        team.replace('&', "and"),
    ]
}

#[derive(Debug, Clone)]
pub struct TeamMatcher {
    team: String,
    variants: Vec<String>,
    tokens: Vec<String>,
}

impl TeamMatcher {
    pub fn new(team: &str) -> Self {
        let variants = team_aliases(team)
            .into_iter()
            .map(|v| v.to_lowercase())
            .collect();
        let lower = team.to_lowercase();
        let tokens: Vec<String> = lower.split_whitespace().map(str::to_string).collect();
        Self {
            team: team.to_string(),
            variants,
            tokens,
        }
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    /// Any alias as a substring, or, for multi-word names, every word somewhere in
    /// the row. The word check is loose: "Grambling State" also accepts a row that
    /// merely mentions another "State" next to "Grambling".
    pub fn matches(&self, row_text: &str) -> bool {
        let row_lower = row_text.to_lowercase();
        if self.variants.iter().any(|v| row_lower.contains(v.as_str())) {
            return true;
        }
        self.tokens.len() > 1 && self.tokens.iter().all(|t| row_lower.contains(t.as_str()))
    }
}

/// `(table index, row index)` of every candidate row matching the team, in table
/// then row order.
pub fn find_team_rows<'a>(
    tables: &'a [StatTable],
    matcher: &'a TeamMatcher,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    tables.iter().enumerate().flat_map(move |(t_idx, table)| {
        table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.cells.len() >= MIN_TEAM_ROW_CELLS)
            .filter(move |(_, row)| matcher.matches(&row.text()))
            .map(move |(r_idx, _)| (t_idx, r_idx))
    })
}
