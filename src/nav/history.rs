//! Linear navigation history.
//!
//! A plain entry list with a cursor. Pushing while the cursor sits behind the
//! end discards the forward entries, matching browser history semantics.

/// Address history with a movable cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// The address at the cursor.
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Push a new address, discarding any forward entries.
    pub fn push(&mut self, address: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(address.into());
        self.index += 1;
    }

    /// Replace the address at the cursor without adding an entry.
    pub fn replace(&mut self, address: impl Into<String>) {
        self.entries[self.index] = address.into();
    }

    /// Move the cursor back one entry.
    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Move the cursor forward one entry.
    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn can_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back() {
        let mut history = History::new("/");
        history.push("/blogs");
        history.push("/blogs/moka-pot-vs-aeropress");
        assert_eq!(history.current(), "/blogs/moka-pot-vs-aeropress");

        assert_eq!(history.back(), Some("/blogs"));
        assert_eq!(history.back(), Some("/"));
        assert_eq!(history.back(), None);
    }

    #[test]
    fn test_forward_after_back() {
        let mut history = History::new("/");
        history.push("/blogs");
        history.back();
        assert!(history.can_forward());
        assert_eq!(history.forward(), Some("/blogs"));
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = History::new("/");
        history.push("/blogs");
        history.push("/tools");
        history.back();
        history.back();
        history.push("/tools/quiz");

        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), "/tools/quiz");
        assert!(!history.can_forward());
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = History::new("/blogs");
        history.replace("/");
        assert_eq!(history.current(), "/");
        assert_eq!(history.len(), 1);
    }
}
