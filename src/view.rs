// Per-screen view state: search text, filters, sort and page

use crate::filter::{Filter, FilterChoice};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

static NO_FILTER: FilterChoice = FilterChoice::All;

/// Sort direction for the active sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Orient an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Active sort key and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Ephemeral selections of one list screen
///
/// Every setter that changes search, a filter, or the sort resets the page to 1.
/// `set_page` touches nothing but the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    search: String,
    filters: BTreeMap<String, FilterChoice>,
    sort: Option<SortSpec>,
    page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Empty search, no filters, no sort, page 1
    pub fn new() -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
        }
    }

    /// Start with `field` as the sort key
    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec::new(field, direction));
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.search {
            self.search = text;
            self.page = 1;
        }
    }

    /// Current choice for `field`; `All` when never set
    pub fn filter(&self, field: &str) -> &FilterChoice {
        self.filters.get(field).unwrap_or(&NO_FILTER)
    }

    pub fn set_filter(&mut self, field: impl Into<String>, choice: FilterChoice) {
        let field = field.into();
        if self.filter(&field) == &choice {
            return;
        }
        if choice.is_all() {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, choice);
        }
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.page = 1;
        }
    }

    /// True when any filter dimension is constrained
    pub fn has_active_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Equality filters for every constrained dimension
    pub fn active_filters(&self) -> Vec<Filter> {
        self.filters
            .iter()
            .filter_map(|(field, choice)| match choice {
                FilterChoice::All => None,
                FilterChoice::Is(value) => Some(Filter::equals(field.clone(), value.clone())),
            })
            .collect()
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Select a sort key the way a sort dropdown does
    ///
    /// Re-selecting the active key flips its direction; a new key starts at
    /// `default_direction`.
    pub fn select_sort(&mut self, field: &str, default_direction: SortDirection) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.field == field => SortSpec::new(field, current.direction.flip()),
            _ => SortSpec::new(field, default_direction),
        });
        self.page = 1;
    }

    /// `select_sort` using the record type's default direction for `field`
    pub fn select_sort_for<R: Record>(&mut self, field: &str) {
        self.select_sort(field, R::default_direction(field));
    }

    /// Requested page; the pipeline clamps it into range
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}
