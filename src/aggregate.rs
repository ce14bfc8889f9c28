use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::extract::{Extraction, find_team_in_rankings};
use crate::fetch::PageSource;
use crate::matcher::TeamMatcher;
use crate::model::{CategoryResult, TeamReport};

/// Drives fetch, match and extraction over the whole catalog, one request at a
/// time.
pub struct Aggregator<P> {
    pages: P,
    catalog: Catalog,
    field_size: u32,
    throttle: Duration,
}

impl<P: PageSource> Aggregator<P> {
    pub fn new(pages: P, catalog: Catalog, cfg: &ScrapeConfig) -> Self {
        Self {
            pages,
            catalog,
            field_size: cfg.field_size,
            throttle: cfg.throttle,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn field_size(&self) -> u32 {
        self.field_size
    }

    /// Value and rank of `team` in one category, trying each page variant until a
    /// row yields both. A transport failure abandons the remaining pages.
    pub fn scrape_stat_ranking(&self, category: &str, team: &str) -> Result<Extraction, ScrapeError> {
        let Some(stat) = self.catalog.get(category) else {
            warn!("No URL exists: {category}");
            return Err(ScrapeError::UnknownCategory(category.to_string()));
        };
        info!("Scraping {category} from {}", stat.url);

        let matcher = TeamMatcher::new(team);
        for url in stat.page_urls() {
            match self.pages.fetch_page(&url) {
                Ok(markup) => {
                    if let Some(found) =
                        find_team_in_rankings(&markup, &matcher, category, self.field_size)
                    {
                        return Ok(found);
                    }
                    debug!("{team} not on {url}");
                }
                Err(ScrapeError::Status { status, .. }) => {
                    debug!("{url} returned http {status}, trying next page");
                }
                Err(err) => return Err(err),
            }
            self.pause();
        }

        Err(ScrapeError::NotFound {
            team: team.to_string(),
            category: category.to_string(),
        })
    }

    pub fn scrape_category(&self, category: &str, team: &str) -> CategoryResult {
        match self.scrape_stat_ranking(category, team) {
            Ok(found) => CategoryResult::Found {
                rank: found.rank_label(self.field_size),
                value: found.value,
            },
            Err(err @ ScrapeError::NotFound { .. }) => {
                info!("{err}");
                CategoryResult::NotFound
            }
            Err(ScrapeError::UnknownCategory(_)) => CategoryResult::NotFound,
            Err(err) => {
                warn!("Error scraping {category} for {team}: {err}");
                CategoryResult::NotFound
            }
        }
    }

    /// One entry per catalog category, in catalog order, whatever fails.
    pub fn aggregate_all(&self, team: &str) -> TeamReport {
        info!("Scraping all FCS stats for {team}");
        let mut report = TeamReport::new(team);
        for category in self.catalog.names() {
            let result = self.scrape_category(category, team);
            report.push(category, result);
            self.pause();
        }
        info!(
            "{team}: found {}/{} categories",
            report.found_count(),
            report.len()
        );
        report
    }

    /// Full aggregation for `team1`, then for `team2`.
    pub fn aggregate_two(&self, team1: &str, team2: &str) -> (TeamReport, TeamReport) {
        let first = self.aggregate_all(team1);
        let second = self.aggregate_all(team2);
        (first, second)
    }

    fn pause(&self) {
        if !self.throttle.is_zero() {
            thread::sleep(self.throttle);
        }
    }
}
