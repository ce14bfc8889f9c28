use serde::Serialize;

/// Outcome of looking a team up in one statistical category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryResult {
    Found { value: String, rank: String },
    NotFound,
}

impl CategoryResult {
    pub fn is_found(&self) -> bool {
        matches!(self, CategoryResult::Found { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub category: String,
    pub result: CategoryResult,
}

/// Per-team results keyed by category name, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamReport {
    pub team: String,
    pub entries: Vec<CategoryEntry>,
}

impl TeamReport {
    pub fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, category: &str, result: CategoryResult) {
        self.entries.push(CategoryEntry {
            category: category.to_string(),
            result,
        });
    }

    pub fn get(&self, category: &str) -> Option<&CategoryResult> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| &e.result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_found()).count()
    }
}
