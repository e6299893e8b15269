// Standalone or controlled state for reusable form components

use std::fmt;

/// Where a component's value lives
///
/// `Standalone` owns the value. `Controlled` reads and writes through callbacks
/// supplied by the parent, so the parent's draft stays the only copy.
pub enum Binding<T> {
    Standalone(T),
    Controlled {
        get: Box<dyn Fn() -> T>,
        set: Box<dyn FnMut(T)>,
    },
}

impl<T: Clone> Binding<T> {
    pub fn standalone(value: T) -> Self {
        Binding::Standalone(value)
    }

    pub fn controlled(get: impl Fn() -> T + 'static, set: impl FnMut(T) + 'static) -> Self {
        Binding::Controlled {
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, Binding::Controlled { .. })
    }

    pub fn get(&self) -> T {
        match self {
            Binding::Standalone(value) => value.clone(),
            Binding::Controlled { get, .. } => get(),
        }
    }

    pub fn set(&mut self, value: T) {
        match self {
            Binding::Standalone(current) => *current = value,
            Binding::Controlled { set, .. } => set(value),
        }
    }

    /// Read, modify and write back in one step
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }
}

impl<T: Default + Clone> Default for Binding<T> {
    fn default() -> Self {
        Binding::Standalone(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Standalone(value) => f.debug_tuple("Standalone").field(value).finish(),
            Binding::Controlled { .. } => f.write_str("Controlled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_standalone_owns_value() {
        let mut binding = Binding::standalone(3);
        assert!(!binding.is_controlled());
        binding.set(5);
        assert_eq!(binding.get(), 5);
        binding.update(|v| *v += 1);
        assert_eq!(binding.get(), 6);
    }

    #[test]
    fn test_controlled_writes_through() {
        let shared = Rc::new(RefCell::new(String::from("house")));
        let reader = Rc::clone(&shared);
        let writer = Rc::clone(&shared);

        let mut binding = Binding::controlled(move || reader.borrow().clone(), move |v| *writer.borrow_mut() = v);
        assert!(binding.is_controlled());
        assert_eq!(binding.get(), "house");

        binding.set("villa".to_string());
        assert_eq!(*shared.borrow(), "villa");

        // Parent-side changes are visible immediately
        *shared.borrow_mut() = "condo".to_string();
        assert_eq!(binding.get(), "condo");
    }
}
