use crate::model::Entry;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};

pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Index of the entry whose name scores highest; earliest entry wins ties.
    pub fn best_match(&mut self, query: &str, entries: &[Entry]) -> Option<usize> {
        if query.trim().is_empty() {
            return None;
        }
        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);

        let mut buf = Vec::new();
        let mut best: Option<(usize, u32)> = None;

        for (i, entry) in entries.iter().enumerate() {
            let haystack = Utf32Str::new(&entry.name, &mut buf);
            if let Some(score) = pattern.score(haystack, &mut self.matcher) {
                if best.is_none_or(|(_, top)| score > top) {
                    best = Some((i, score));
                }
            }
        }

        best.map(|(i, _)| i)
    }
}
