//! Book categories. Read-only: fetched from the backend, never written.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::book::NOT_AVAILABLE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Result of resolving a book's `categoryId`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRef<'a> {
    Found(&'a Category),
    Missing,
}

impl<'a> CategoryRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            CategoryRef::Found(c) if !c.name.is_empty() => &c.name,
            _ => NOT_AVAILABLE,
        }
    }

    pub fn description(&self) -> &'a str {
        match self {
            CategoryRef::Found(c) if !c.description.is_empty() => &c.description,
            _ => NOT_AVAILABLE,
        }
    }
}

/// Categories keyed by id, keeping the backend's order for dropdowns
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    ordered: Vec<Category>,
    by_id: HashMap<String, usize>,
}

impl CategoryIndex {
    pub fn new(categories: Vec<Category>) -> Self {
        let mut by_id = HashMap::with_capacity(categories.len());
        for (pos, category) in categories.iter().enumerate() {
            // First occurrence wins on duplicate ids
            by_id.entry(category.id.clone()).or_insert(pos);
        }
        Self {
            ordered: categories,
            by_id,
        }
    }

    pub fn resolve(&self, id: &str) -> CategoryRef<'_> {
        match self.by_id.get(id) {
            Some(&pos) => CategoryRef::Found(&self.ordered[pos]),
            None => CategoryRef::Missing,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.ordered.iter()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
