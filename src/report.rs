use std::fmt::Write;

use crate::model::{CategoryResult, TeamReport};

const NOT_AVAILABLE: &str = "N/A";

/// `"<value> <rank>"`, or `N/A` for a missing category.
pub fn format_stat_display(result: Option<&CategoryResult>) -> String {
    match result {
        Some(CategoryResult::Found { value, rank }) => format!("{value} {rank}"),
        Some(CategoryResult::NotFound) | None => NOT_AVAILABLE.to_string(),
    }
}

pub fn team_stats_text(report: &TeamReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - FCS NATIONAL RANKINGS", report.team.to_uppercase());
    let _ = writeln!(out, "{}", "=".repeat(70));
    for entry in &report.entries {
        let _ = writeln!(
            out,
            "{:<35} {}",
            entry.category,
            format_stat_display(Some(&entry.result))
        );
    }
    out
}

/// Side-by-side table over `categories`; a category missing from either report
/// shows as `N/A`.
pub fn comparison_text<'a>(
    categories: impl IntoIterator<Item = &'a str>,
    team1: &TeamReport,
    team2: &TeamReport,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} vs {} - FCS COMPARISON",
        team1.team.to_uppercase(),
        team2.team.to_uppercase()
    );
    let _ = writeln!(out, "{}", "=".repeat(90));
    let _ = writeln!(out, "{:<35} {:<25} {}", "Statistic", team1.team, team2.team);
    let _ = writeln!(out, "{}", "-".repeat(90));
    for category in categories {
        let _ = writeln!(
            out,
            "{:<35} {:<25} {}",
            category,
            format_stat_display(team1.get(category)),
            format_stat_display(team2.get(category))
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(team: &str, rows: &[(&str, Option<(&str, &str)>)]) -> TeamReport {
        let mut r = TeamReport::new(team);
        for (cat, found) in rows {
            let result = match found {
                Some((value, rank)) => CategoryResult::Found {
                    value: value.to_string(),
                    rank: rank.to_string(),
                },
                None => CategoryResult::NotFound,
            };
            r.push(cat, result);
        }
        r
    }

    #[test]
    fn team_text_pads_category_column() {
        let r = report(
            "Bethune-Cookman",
            &[
                ("Scoring Offense", Some(("24.5", "(40/119)"))),
                ("Turnover Margin", None),
            ],
        );
        let text = team_stats_text(&r);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "BETHUNE-COOKMAN - FCS NATIONAL RANKINGS");
        assert_eq!(lines[2], format!("{:<35} 24.5 (40/119)", "Scoring Offense"));
        assert_eq!(lines[3], format!("{:<35} N/A", "Turnover Margin"));
    }

    #[test]
    fn comparison_fills_missing_categories() {
        let a = report("A", &[("Scoring Offense", Some(("30", "(5/119)")))]);
        let b = report("B", &[]);
        let text = comparison_text(["Scoring Offense"], &a, &b);
        let last = text.lines().last().unwrap();
        assert_eq!(last, format!("{:<35} {:<25} N/A", "Scoring Offense", "30 (5/119)"));
    }
}
