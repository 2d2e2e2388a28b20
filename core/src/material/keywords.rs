use std::fmt;

/// A canonical set of shader keywords.
///
/// Keywords are deduplicated and sorted lexicographically on construction, so
/// two sets built from the same tokens in any order compare (and hash) equal.
/// This is what makes a keyword set usable as a variant cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyword, keeping the set canonical. Returns `false` if it was
    /// already present.
    pub fn insert(&mut self, keyword: impl Into<String>) -> bool {
        let keyword = keyword.into();
        match self.keywords.binary_search(&keyword) {
            Ok(_) => false,
            Err(pos) => {
                self.keywords.insert(pos, keyword);
                true
            }
        }
    }

    /// Adds every keyword from `other`.
    pub fn extend_from(&mut self, other: &KeywordSet) {
        for keyword in &other.keywords {
            self.insert(keyword.as_str());
        }
    }

    /// Returns the union of `self` and `other`.
    pub fn union(&self, other: &KeywordSet) -> KeywordSet {
        let mut out = self.clone();
        out.extend_from(other);
        out
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords
            .binary_search_by(|k| k.as_str().cmp(keyword))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Iterates keywords in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Canonical string form: sorted keywords joined by a single space.
    pub fn canonical(&self) -> String {
        self.keywords.join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut keywords: Vec<String> = iter.into_iter().map(Into::into).collect();
        keywords.sort();
        keywords.dedup();
        Self { keywords }
    }
}

impl<S: Into<String>> Extend<S> for KeywordSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for keyword in iter {
            self.insert(keyword);
        }
    }
}

impl fmt::Display for KeywordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
