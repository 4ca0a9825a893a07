use std::collections::HashSet;

/// Insertion-ordered set of non-empty lines. The first occurrence wins.
///
/// Holds an entry's extracted comments and references. Adding multi-line
/// text adds each line on its own, so a block comment seen twice is stored
/// once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every non-empty line of `text` not already present.
    pub fn add(&mut self, text: &str) {
        for line in text.split('\n').filter(|line| !line.is_empty()) {
            if self.seen.insert(line.to_string()) {
                self.items.push(line.to_string());
            }
        }
    }

    /// Lines joined with `\n`.
    pub fn render(&self) -> String {
        self.items.join("\n")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.seen.clear();
    }
}

impl<'a> FromIterator<&'a str> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        for text in iter {
            set.add(text);
        }
        set
    }
}
