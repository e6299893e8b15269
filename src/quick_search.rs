// Quick search: merged "jump to" results and the keyboard-driven overlay
//
// Results are recomputed from scratch on every query change and never stored.

use crate::models::Property;
use crate::seed;
use serde::Serialize;
use tracing::debug;

/// Default cap on merged results
pub const DEFAULT_RESULT_LIMIT: usize = 12;

/// What a quick-search row points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// Synthetic row echoing the raw query
    Query,
    Person,
    Record,
    Section,
}

/// One row of the quick-search list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub kind: ResultKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Navigation target handed to the `Navigator`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Initial shown in place of a picture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl SearchResult {
    pub fn section(id: &str, label: &str, href: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: ResultKind::Section,
            label: label.to_string(),
            subtitle: None,
            href: Some(href.to_string()),
            avatar: None,
        }
    }

    pub fn person(id: &str, label: &str, subtitle: &str, href: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: ResultKind::Person,
            label: label.to_string(),
            subtitle: Some(subtitle.to_string()),
            href: Some(href.to_string()),
            avatar: label.chars().next().map(|c| c.to_uppercase().collect()),
        }
    }

    fn query(text: &str) -> Self {
        Self {
            id: "query".to_string(),
            kind: ResultKind::Query,
            label: text.to_string(),
            subtitle: None,
            href: None,
            avatar: None,
        }
    }

    /// Case-insensitive substring match on label or subtitle
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self
                .subtitle
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }
}

/// Records that can appear in quick search
pub trait Searchable {
    fn to_search_result(&self) -> SearchResult;
}

impl Searchable for Property {
    fn to_search_result(&self) -> SearchResult {
        SearchResult {
            id: self.id.to_string(),
            kind: ResultKind::Record,
            label: self.data.title.clone(),
            subtitle: Some(self.data.location()),
            href: Some(self.href()),
            avatar: None,
        }
    }
}

/// Source lists merged by `search_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Sections,
    People,
    Records,
}

/// Order in which matches from each source are concatenated
pub const DEFAULT_PRECEDENCE: [Source; 3] = [Source::Sections, Source::People, Source::Records];

/// Curated sections and people, merged with live records at query time
#[derive(Debug, Clone)]
pub struct QuickSearchIndex {
    sections: Vec<SearchResult>,
    people: Vec<SearchResult>,
    precedence: [Source; 3],
    limit: usize,
}

impl Default for QuickSearchIndex {
    fn default() -> Self {
        Self::new(seed::sections(), seed::agents())
    }
}

impl QuickSearchIndex {
    pub fn new(sections: Vec<SearchResult>, people: Vec<SearchResult>) -> Self {
        Self {
            sections,
            people,
            precedence: DEFAULT_PRECEDENCE,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_precedence(mut self, precedence: [Source; 3]) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Matches from every source in precedence order, truncated to the limit
    ///
    /// A blank query matches nothing.
    pub fn search_all<R: Searchable>(&self, query: &str, records: &[R]) -> Vec<SearchResult> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        for source in self.precedence {
            if results.len() >= self.limit {
                break;
            }
            match source {
                Source::Sections => results.extend(self.sections.iter().filter(|r| r.matches(&needle)).cloned()),
                Source::People => results.extend(self.people.iter().filter(|r| r.matches(&needle)).cloned()),
                Source::Records => results.extend(
                    records
                        .iter()
                        .map(Searchable::to_search_result)
                        .filter(|r| r.matches(&needle)),
                ),
            }
        }

        results.truncate(self.limit);
        debug!(query, count = results.len(), "Quick search");
        results
    }
}

// ============================================================================
// Overlay
// ============================================================================

/// Routing capability the overlay hands targets to
pub trait Navigator {
    fn navigate(&mut self, target: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Outcome of feeding input to the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    /// Nothing happened (closed overlay, query row activated, row without a target)
    Ignored,
    /// Highlight moved to this row
    Moved(usize),
    /// Navigated to the target and closed
    Navigated(String),
    /// Closed without navigating
    Closed,
}

/// Keyboard-navigable result list
///
/// Row 0 is the synthetic query row whenever the query is non-blank; results
/// follow. The highlight wraps at both ends and returns to 0 on every query change.
#[derive(Debug, Clone, Default)]
pub struct SearchOverlay {
    open: bool,
    query: String,
    rows: Vec<SearchResult>,
    selected: usize,
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with `initial_query` and the highlight on the first row
    pub fn open<R: Searchable>(&mut self, index: &QuickSearchIndex, initial_query: &str, records: &[R]) {
        self.open = true;
        self.update(index, initial_query, records);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query text and recompute the rows
    pub fn set_query<R: Searchable>(&mut self, index: &QuickSearchIndex, query: &str, records: &[R]) {
        if query != self.query {
            self.update(index, query, records);
        }
    }

    fn update<R: Searchable>(&mut self, index: &QuickSearchIndex, query: &str, records: &[R]) {
        self.query = query.to_string();
        self.rows.clear();

        let trimmed = query.trim();
        if !trimmed.is_empty() {
            self.rows.push(SearchResult::query(trimmed));
        }
        self.rows.extend(index.search_all(query, records));
        self.selected = 0;
    }

    /// Every displayed row, query row included
    pub fn rows(&self) -> &[SearchResult] {
        &self.rows
    }

    /// Displayed rows minus the synthetic query row
    pub fn results(&self) -> &[SearchResult] {
        match self.rows.first() {
            Some(first) if first.kind == ResultKind::Query => &self.rows[1..],
            _ => &self.rows,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&SearchResult> {
        self.rows.get(self.selected)
    }

    pub fn handle_key(&mut self, key: OverlayKey, navigator: &mut dyn Navigator) -> OverlayEvent {
        if !self.open {
            return OverlayEvent::Ignored;
        }

        let count = self.rows.len();
        match key {
            OverlayKey::Escape => {
                self.close();
                OverlayEvent::Closed
            }
            OverlayKey::ArrowDown => {
                self.selected = if self.selected + 1 < count { self.selected + 1 } else { 0 };
                OverlayEvent::Moved(self.selected)
            }
            OverlayKey::ArrowUp => {
                self.selected = if self.selected > 0 {
                    self.selected - 1
                } else {
                    count.saturating_sub(1)
                };
                OverlayEvent::Moved(self.selected)
            }
            OverlayKey::Enter => match self.selected_row() {
                Some(row) if row.kind != ResultKind::Query => match row.href.clone() {
                    Some(target) => self.go(target, navigator),
                    None => OverlayEvent::Ignored,
                },
                _ => OverlayEvent::Ignored,
            },
        }
    }

    /// Pointer activation of `row`
    ///
    /// Clicking the query row does nothing. Any other row navigates when it has a
    /// target and closes the overlay either way.
    pub fn click(&mut self, row: usize, navigator: &mut dyn Navigator) -> OverlayEvent {
        if !self.open {
            return OverlayEvent::Ignored;
        }
        match self.rows.get(row) {
            None => OverlayEvent::Ignored,
            Some(r) if r.kind == ResultKind::Query => OverlayEvent::Ignored,
            Some(r) => match r.href.clone() {
                Some(target) => self.go(target, navigator),
                None => {
                    self.close();
                    OverlayEvent::Closed
                }
            },
        }
    }

    /// Hover moves the highlight without wrapping
    pub fn hover(&mut self, row: usize) {
        if row < self.rows.len() {
            self.selected = row;
        }
    }

    fn go(&mut self, target: String, navigator: &mut dyn Navigator) -> OverlayEvent {
        navigator.navigate(&target);
        self.close();
        OverlayEvent::Navigated(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Vec<String>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, target: &str) {
            self.visited.push(target.to_string());
        }
    }

    fn oak_grove() -> Vec<Property> {
        let mut props = seed::properties();
        props.truncate(1);
        props[0].data.title = "Oak Grove Estates".to_string();
        props
    }

    #[test]
    fn test_blank_query_yields_nothing() {
        let index = QuickSearchIndex::default();
        let props = seed::properties();
        assert!(index.search_all("", &props).is_empty());
        assert!(index.search_all("   \t", &props).is_empty());
    }

    #[test]
    fn test_record_match() {
        let index = QuickSearchIndex::default();
        let results = index.search_all("oak", &oak_grove());
        assert!(
            results
                .iter()
                .any(|r| r.label == "Oak Grove Estates" && r.kind == ResultKind::Record)
        );
        assert_eq!(results[0].href.as_deref(), Some("/dashboard/properties/03483"));
    }

    #[test]
    fn test_results_contain_query() {
        let index = QuickSearchIndex::default();
        let props = seed::properties();
        for query in ["a", "CLA", "new york", "dash", "usa", " Lodge "] {
            let needle = query.trim().to_lowercase();
            for r in index.search_all(query, &props) {
                assert!(r.matches(&needle), "{query:?} returned {r:?}");
            }
        }
    }

    #[test]
    fn test_cap_at_limit() {
        let index = QuickSearchIndex::default();
        let props = seed::properties();
        // Every property subtitle contains "USA"; "a" hits nearly everything
        assert_eq!(index.search_all("a", &props).len(), DEFAULT_RESULT_LIMIT);
        assert_eq!(index.clone().with_limit(3).search_all("a", &props).len(), 3);
    }

    #[test]
    fn test_precedence_sections_people_records() {
        let index = QuickSearchIndex::default();
        let mut props = oak_grove();
        props[0].data.title = "Clarity House".to_string();

        let kinds: Vec<ResultKind> = index.search_all("cl", &props).iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ResultKind::Section, // Clients
                ResultKind::Person,  // Claudia
                ResultKind::Person,  // Clara
                ResultKind::Person,  // Clarisa
                ResultKind::Record,
            ]
        );

        let reordered = index.with_precedence([Source::Records, Source::People, Source::Sections]);
        let kinds: Vec<ResultKind> = reordered.search_all("cl", &props).iter().map(|r| r.kind).collect();
        assert_eq!(kinds.first(), Some(&ResultKind::Record));
        assert_eq!(kinds.last(), Some(&ResultKind::Section));
    }

    #[test]
    fn test_people_match_subtitle() {
        let index = QuickSearchIndex::default();
        let results = index.search_all("agent", &Vec::<Property>::new());
        // Section "Agents" plus all five people via their "Agent" subtitle
        assert_eq!(results.len(), 6);
        assert_eq!(results[0].kind, ResultKind::Section);
    }

    #[test]
    fn test_overlay_query_row_and_wrapping() {
        let index = QuickSearchIndex::default();
        let props = oak_grove();
        let mut nav = RecordingNavigator::default();
        let mut overlay = SearchOverlay::new();

        overlay.open(&index, "oak", &props);
        assert_eq!(overlay.rows().len(), 2);
        assert_eq!(overlay.rows()[0].kind, ResultKind::Query);
        assert_eq!(overlay.results().len(), 1);
        assert_eq!(overlay.selected(), 0);

        assert_eq!(overlay.handle_key(OverlayKey::ArrowUp, &mut nav), OverlayEvent::Moved(1));
        assert_eq!(overlay.handle_key(OverlayKey::ArrowDown, &mut nav), OverlayEvent::Moved(0));
        assert_eq!(overlay.handle_key(OverlayKey::ArrowDown, &mut nav), OverlayEvent::Moved(1));
        assert_eq!(overlay.handle_key(OverlayKey::ArrowDown, &mut nav), OverlayEvent::Moved(0));
    }

    #[test]
    fn test_overlay_enter_on_query_row_is_noop() {
        let index = QuickSearchIndex::default();
        let mut nav = RecordingNavigator::default();
        let mut overlay = SearchOverlay::new();

        overlay.open(&index, "oak", &oak_grove());
        assert_eq!(overlay.handle_key(OverlayKey::Enter, &mut nav), OverlayEvent::Ignored);
        assert!(overlay.is_open());
        assert!(nav.visited.is_empty());
    }

    #[test]
    fn test_overlay_enter_navigates_and_closes() {
        let index = QuickSearchIndex::default();
        let mut nav = RecordingNavigator::default();
        let mut overlay = SearchOverlay::new();

        overlay.open(&index, "oak", &oak_grove());
        overlay.handle_key(OverlayKey::ArrowDown, &mut nav);
        assert_eq!(
            overlay.handle_key(OverlayKey::Enter, &mut nav),
            OverlayEvent::Navigated("/dashboard/properties/03483".to_string())
        );
        assert!(!overlay.is_open());
        assert_eq!(nav.visited, vec!["/dashboard/properties/03483".to_string()]);
    }

    #[test]
    fn test_overlay_escape_has_no_side_effects() {
        let index = QuickSearchIndex::default();
        let mut nav = RecordingNavigator::default();
        let mut overlay = SearchOverlay::new();

        overlay.open(&index, "dash", &Vec::<Property>::new());
        assert_eq!(overlay.handle_key(OverlayKey::Escape, &mut nav), OverlayEvent::Closed);
        assert!(!overlay.is_open());
        assert!(nav.visited.is_empty());
        assert_eq!(overlay.handle_key(OverlayKey::ArrowDown, &mut nav), OverlayEvent::Ignored);
    }

    #[test]
    fn test_overlay_query_change_resets_selection() {
        let index = QuickSearchIndex::default();
        let props = seed::properties();
        let mut nav = RecordingNavigator::default();
        let mut overlay = SearchOverlay::new();

        overlay.open(&index, "a", &props);
        overlay.handle_key(OverlayKey::ArrowDown, &mut nav);
        overlay.handle_key(OverlayKey::ArrowDown, &mut nav);
        assert_eq!(overlay.selected(), 2);

        overlay.set_query(&index, "ag", &props);
        assert_eq!(overlay.selected(), 0);
        assert_eq!(overlay.query(), "ag");
    }

    #[test]
    fn test_overlay_empty_query_has_no_rows() {
        let index = QuickSearchIndex::default();
        let mut nav = RecordingNavigator::default();
        let mut overlay = SearchOverlay::new();

        overlay.open(&index, "", &seed::properties());
        assert!(overlay.rows().is_empty());
        assert_eq!(overlay.handle_key(OverlayKey::ArrowDown, &mut nav), OverlayEvent::Moved(0));
        assert_eq!(overlay.handle_key(OverlayKey::ArrowUp, &mut nav), OverlayEvent::Moved(0));
        assert_eq!(overlay.handle_key(OverlayKey::Enter, &mut nav), OverlayEvent::Ignored);
    }

    #[test]
    fn test_overlay_click() {
        let index = QuickSearchIndex::default();
        let mut nav = RecordingNavigator::default();
        let mut overlay = SearchOverlay::new();

        overlay.open(&index, "analytics", &Vec::<Property>::new());
        assert_eq!(overlay.click(0, &mut nav), OverlayEvent::Ignored);
        assert!(overlay.is_open());

        assert_eq!(
            overlay.click(1, &mut nav),
            OverlayEvent::Navigated("/dashboard/analytics".to_string())
        );
        assert!(!overlay.is_open());
    }
}
