use ahash::AHashMap;

/// Per-label hit counts for one request, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchTally {
    entries: Vec<(String, usize)>,
}

impl MatchTally {
    /// Count occurrences of each label in the raw match list
    pub fn from_matches<I, S>(matches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index: AHashMap<String, usize> = AHashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for label in matches {
            let label = label.as_ref();
            match index.get(label) {
                Some(&pos) => {
                    if let Some((_, count)) = entries.get_mut(pos) {
                        *count = count.saturating_add(1);
                    }
                }
                None => {
                    index.insert(label.to_string(), entries.len());
                    entries.push((label.to_string(), 1));
                }
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.iter().find(|(l, _)| *l == label).map(|(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_hits(&self) -> usize {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    /// Label with the strictly greatest count
    ///
    /// Ties go to the label seen first: a later label only takes over with a
    /// higher count.
    pub fn best_hit(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (label, count) in self.iter() {
            if best.is_none_or(|(_, c)| c < count) {
                best = Some((label, count));
            }
        }
        best
    }
}
