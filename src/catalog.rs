pub const DEFAULT_BASE_URL: &str = "https://www.ncaa.com/stats/football/Fcs/current/team";

pub const TIME_OF_POSSESSION: &str = "Time of Possession";

// (name, ncaa.com stat id), in report order.
const FCS_CATEGORIES: &[(&str, u32)] = &[
    ("Scoring Offense", 27),
    ("Total Offense", 21),
    ("Rushing Offense", 23),
    ("Passing Offense", 25),
    (TIME_OF_POSSESSION, 705),
    ("Third Down Conversions", 699),
    ("Red Zone Offense", 703),
    ("Sacks Allowed", 468),
    ("Scoring Defense", 28),
    ("Total Defense", 22),
    ("Rushing Defense", 24),
    ("Passing Yards Allowed", 695),
    ("Third Down Conversions Defense", 701),
    ("Red Zone Defense", 704),
    ("Sacks Per Game", 466),
    ("Turnover Margin", 29),
    ("Fewest Penalties Per Game", 697),
    ("Fewest Penalty Yards Per Game", 698),
];

/// Page suffixes tried in order when the team is not on the first page.
pub const PAGE_SUFFIXES: &[&str] = &["", "/p2", "/p3", "/p4"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCategory {
    pub name: String,
    pub url: String,
}

impl StatCategory {
    /// Ordered fetch attempts: the base URL followed by its paginated variants.
    pub fn page_urls(&self) -> Vec<String> {
        PAGE_SUFFIXES
            .iter()
            .map(|suffix| format!("{}{}", self.url, suffix))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<StatCategory>,
}

impl Catalog {
    pub fn fcs(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let categories = FCS_CATEGORIES
            .iter()
            .map(|(name, id)| StatCategory {
                name: (*name).to_string(),
                url: format!("{base}/{id}"),
            })
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> &[StatCategory] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&StatCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::fcs(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fcs_catalog_has_eighteen_categories_in_order() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 18);
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names[0], "Scoring Offense");
        assert_eq!(names[4], TIME_OF_POSSESSION);
        assert_eq!(names[17], "Fewest Penalty Yards Per Game");
    }

    #[test]
    fn page_urls_follow_suffix_order() {
        let catalog = Catalog::fcs("http://stats.test/team/");
        let cat = catalog.get("Turnover Margin").expect("category");
        assert_eq!(
            cat.page_urls(),
            vec![
                "http://stats.test/team/29",
                "http://stats.test/team/29/p2",
                "http://stats.test/team/29/p3",
                "http://stats.test/team/29/p4",
            ]
        );
    }
}
