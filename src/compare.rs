use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::Aggregator;
use crate::fetch::PageSource;
use crate::model::TeamReport;
use crate::render::{create_comparison_image, default_image_filename};
use crate::report::comparison_text;

#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub output_dir: PathBuf,
    pub font_path: Option<PathBuf>,
    /// Footer date; `None` leaves the footer blank.
    pub generated_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub team1: TeamReport,
    pub team2: TeamReport,
    #[serde(skip)]
    pub text: String,
    pub image_path: Option<PathBuf>,
}

/// Aggregates both teams, builds the side-by-side text and, when `image` is
/// given, writes the comparison graphic under its default file name.
pub fn compare_teams<P: PageSource>(
    aggregator: &Aggregator<P>,
    team1: &str,
    team2: &str,
    image: Option<&ImageOptions>,
) -> Result<Comparison> {
    let (report1, report2) = aggregator.aggregate_two(team1, team2);
    let catalog = aggregator.catalog();
    let text = comparison_text(catalog.names(), &report1, &report2);

    let image_path = match image {
        Some(opts) => {
            let path = opts.output_dir.join(default_image_filename(team1, team2));
            Some(create_comparison_image(
                catalog.names(),
                &report1,
                &report2,
                opts.generated_on,
                &path,
                opts.font_path.as_deref(),
            )?)
        }
        None => None,
    };

    Ok(Comparison {
        team1: report1,
        team2: report2,
        text,
        image_path,
    })
}

/// Pretty JSON dump of a report or comparison.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
