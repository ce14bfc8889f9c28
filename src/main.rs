use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use fcs_stats::aggregate::Aggregator;
use fcs_stats::catalog::Catalog;
use fcs_stats::compare::{ImageOptions, compare_teams, write_json};
use fcs_stats::config::ScrapeConfig;
use fcs_stats::fetch::HttpPageSource;
use fcs_stats::report::team_stats_text;

#[derive(Parser)]
#[command(name = "fcs_stats")]
#[command(about = "FCS football national stat rankings, side by side", long_about = None)]
struct Cli {
    /// First team, as listed on ncaa.com (e.g. "Bethune-Cookman")
    team1: String,

    /// Second team; omit to print a single team's rankings
    team2: Option<String>,

    /// Skip the comparison image
    #[arg(long)]
    no_image: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = ScrapeConfig::from_env();
    let pages = HttpPageSource::new(cfg.request_timeout)?;
    let aggregator = Aggregator::new(pages, Catalog::fcs(&cfg.base_url), &cfg);

    let Some(team2) = cli.team2.as_deref() else {
        let report = aggregator.aggregate_all(&cli.team1);
        println!("\n{}", team_stats_text(&report));
        if let Some(path) = cfg.report_json.as_deref() {
            write_json(&report, path)?;
        }
        return Ok(());
    };

    println!("Comparing {} vs {} - FCS NATIONAL RANKINGS", cli.team1, team2);
    let image = (!cli.no_image).then(|| ImageOptions {
        output_dir: cfg.output_dir.clone(),
        font_path: cfg.font_path.clone(),
        generated_on: Some(Local::now().date_naive()),
    });
    let comparison = compare_teams(&aggregator, &cli.team1, team2, image.as_ref())
        .context("comparison failed")?;

    println!("\n{}", comparison.text);
    if let Some(path) = comparison.image_path.as_deref() {
        println!("FCS comparison chart saved as: {}", path.display());
    }
    if let Some(path) = cfg.report_json.as_deref() {
        write_json(&comparison, path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_takes_teams_and_image_switch_only() {
        let cli = Cli::try_parse_from(["fcs_stats", "Bethune-Cookman", "Alabama A&M", "--no-image"])
            .expect("teams and --no-image parse");
        assert_eq!(cli.team1, "Bethune-Cookman");
        assert_eq!(cli.team2.as_deref(), Some("Alabama A&M"));
        assert!(cli.no_image);

        assert!(Cli::try_parse_from(["fcs_stats", "Bethune-Cookman", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["fcs_stats", "Bethune-Cookman", "-v"]).is_err());
    }
}
