// Single-select dropdown state machine

use crate::binding::Binding;
use std::collections::HashMap;

/// Trigger text when neither a label nor a value is available
pub const PLACEHOLDER: &str = "Select...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectState {
    #[default]
    Closed,
    Open,
}

/// A combobox: `Closed` until the trigger is clicked, `Open` until a selection,
/// an outside click or Escape
#[derive(Debug)]
pub struct Select {
    value: Binding<String>,
    labels: HashMap<String, String>,
    /// Label committed with the last selection, keyed by the value it belongs to
    committed: Option<(String, String)>,
    state: SelectState,
}

impl Select {
    pub fn new(value: Binding<String>) -> Self {
        Self {
            value,
            labels: HashMap::new(),
            committed: None,
            state: SelectState::Closed,
        }
    }

    /// Register the options shown in the listbox as `(value, label)` pairs
    pub fn with_options<'a>(mut self, options: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (value, label) in options {
            self.register(value, label);
        }
        self
    }

    pub fn register(&mut self, value: &str, label: &str) {
        self.labels.insert(value.to_string(), label.to_string());
    }

    pub fn state(&self) -> SelectState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SelectState::Open
    }

    pub fn value(&self) -> String {
        self.value.get()
    }

    pub fn trigger_click(&mut self) {
        self.state = match self.state {
            SelectState::Closed => SelectState::Open,
            SelectState::Open => SelectState::Closed,
        };
    }

    pub fn outside_click(&mut self) {
        self.state = SelectState::Closed;
    }

    pub fn escape(&mut self) {
        self.state = SelectState::Closed;
    }

    /// Commit `value`, cache its display label and close
    pub fn select(&mut self, value: &str) {
        let label = self.labels.get(value).cloned().unwrap_or_else(|| value.to_string());
        self.value.set(value.to_string());
        self.committed = Some((value.to_string(), label));
        self.state = SelectState::Closed;
    }

    /// Cached label, else the registered label, else the raw value, else the placeholder
    pub fn display_text(&self) -> String {
        let value = self.value.get();
        if let Some((committed_value, label)) = &self.committed
            && *committed_value == value
        {
            return label.clone();
        }
        if let Some(label) = self.labels.get(&value) {
            return label.clone();
        }
        if !value.is_empty() {
            return value;
        }
        PLACEHOLDER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TYPES: [(&str, &str); 3] = [("house", "House"), ("villa", "Villa"), ("condo", "Condo")];

    #[test]
    fn test_open_close_transitions() {
        let mut select = Select::new(Binding::default());
        assert_eq!(select.state(), SelectState::Closed);

        select.trigger_click();
        assert!(select.is_open());
        select.trigger_click();
        assert!(!select.is_open());

        select.trigger_click();
        select.outside_click();
        assert!(!select.is_open());

        select.trigger_click();
        select.escape();
        assert!(!select.is_open());
    }

    #[test]
    fn test_selection_commits_and_closes() {
        let mut select = Select::new(Binding::default()).with_options(TYPES);
        assert_eq!(select.display_text(), PLACEHOLDER);

        select.trigger_click();
        select.select("villa");
        assert!(!select.is_open());
        assert_eq!(select.value(), "villa");
        assert_eq!(select.display_text(), "Villa");
    }

    #[test]
    fn test_display_falls_back_to_raw_value() {
        let select = Select::new(Binding::standalone("loft".to_string())).with_options(TYPES);
        assert_eq!(select.display_text(), "loft");
    }

    #[test]
    fn test_controlled_select() {
        let shared = Rc::new(RefCell::new("house".to_string()));
        let reader = Rc::clone(&shared);
        let writer = Rc::clone(&shared);
        let binding = Binding::controlled(move || reader.borrow().clone(), move |v| *writer.borrow_mut() = v);

        let mut select = Select::new(binding).with_options(TYPES);
        assert_eq!(select.display_text(), "House");

        select.select("condo");
        assert_eq!(*shared.borrow(), "condo");

        // A parent-side change must not leave a stale cached label
        *shared.borrow_mut() = "villa".to_string();
        assert_eq!(select.display_text(), "Villa");
    }
}
