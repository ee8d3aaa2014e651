//! String interner
//!
//! Canonicalizes type, property and display names per graph. Registering
//! equal text twice hands back the same allocation, so two handles can be
//! compared by pointer as well as by content.
//!
//! Author: Moroya Sakamoto

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Canonical handle to an interned string
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if both handles point at the same interned allocation
    pub fn ptr_eq(a: &Symbol, b: &Symbol) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for Symbol {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-graph string set. Strings live until [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct StringInterner {
    strings: HashSet<Symbol>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning the canonical handle
    pub fn register(&mut self, text: &str) -> Symbol {
        if let Some(existing) = self.strings.get(text) {
            return existing.clone();
        }
        let symbol = Symbol(Arc::from(text));
        self.strings.insert(symbol.clone());
        symbol
    }

    /// Look up without interning
    pub fn get(&self, text: &str) -> Option<&Symbol> {
        self.strings.get(text)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.strings.contains(text)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn clear(&mut self) {
        self.strings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_same_text_same_handle() {
        let mut strings = StringInterner::new();
        let a = strings.register("Transform");
        let b = strings.register(&String::from("Transform"));
        assert!(Symbol::ptr_eq(&a, &b));
        assert_eq!(strings.len(), 1);
    }

    #[test]
    fn test_register_different_text() {
        let mut strings = StringInterner::new();
        let a = strings.register("Position");
        let b = strings.register("Rotation");
        assert!(!Symbol::ptr_eq(&a, &b));
        assert_ne!(a, b);
        assert_eq!(strings.len(), 2);
    }

    #[test]
    fn test_separate_interners_do_not_share() {
        let mut one = StringInterner::new();
        let mut two = StringInterner::new();
        let a = one.register("Mesh");
        let b = two.register("Mesh");
        assert_eq!(a, b);
        assert!(!Symbol::ptr_eq(&a, &b));
    }

    #[test]
    fn test_get_does_not_intern() {
        let mut strings = StringInterner::new();
        assert!(strings.get("Light").is_none());
        assert!(strings.is_empty());
        strings.register("Light");
        assert!(strings.contains("Light"));
        assert_eq!(strings.get("Light").map(Symbol::as_str), Some("Light"));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut strings = StringInterner::new();
        strings.register("a");
        strings.register("b");
        strings.clear();
        assert!(strings.is_empty());
    }

    #[test]
    fn test_symbol_derefs_to_str() {
        let mut strings = StringInterner::new();
        let s = strings.register("Children");
        assert_eq!(&*s, "Children");
        assert!(s.starts_with("Child"));
        assert_eq!(s.to_string(), "Children");
        assert_eq!(format!("{s:?}"), "\"Children\"");
    }
}
