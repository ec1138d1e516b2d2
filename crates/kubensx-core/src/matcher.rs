use std::fmt;

/// How a pattern is compared against candidate names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Candidate equals the pattern.
    Exact,
    /// `*`-separated fragments must all occur, in order.
    #[default]
    Wildcard,
    /// Pattern characters occur as a case-insensitive subsequence.
    Fuzzy,
}

impl MatchMode {
    /// Picks the mode for a command-line pattern and strips its sigil.
    ///
    /// Exact (flag or `=`) is checked before fuzzy (flag or `~`); without
    /// either, the flag or the configured `fallback` applies.
    pub fn detect(pattern: &str, flag: Option<MatchMode>, fallback: MatchMode) -> (MatchMode, &str) {
        if flag == Some(Self::Exact) || pattern.starts_with('=') {
            return (Self::Exact, pattern.strip_prefix('=').unwrap_or(pattern));
        }
        if flag == Some(Self::Fuzzy) || pattern.starts_with('~') {
            return (Self::Fuzzy, pattern.strip_prefix('~').unwrap_or(pattern));
        }
        (flag.unwrap_or(fallback), pattern)
    }

    /// Filters `candidates` down to those matching `pattern`, preserving
    /// candidate order. A literal match always wins on its own.
    pub fn filter(self, pattern: &str, candidates: &[String]) -> Vec<String> {
        if candidates.iter().any(|c| c == pattern) {
            return vec![pattern.to_string()];
        }
        match self {
            Self::Exact => Vec::new(),
            Self::Wildcard => candidates.iter().filter(|c| wildcard_match(pattern, c)).cloned().collect(),
            Self::Fuzzy => candidates.iter().filter(|c| fold_subsequence(pattern, c)).cloned().collect(),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Wildcard => write!(f, "wildcard"),
            Self::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

fn wildcard_match(pattern: &str, candidate: &str) -> bool {
    let mut rest = candidate;
    for fragment in pattern.split('*').filter(|f| !f.is_empty()) {
        match rest.find(fragment) {
            Some(index) => rest = &rest[index + fragment.len()..],
            None => return false,
        }
    }
    true
}

fn fold_subsequence(pattern: &str, candidate: &str) -> bool {
    let mut haystack = candidate.chars().flat_map(char::to_lowercase);
    pattern.chars().flat_map(char::to_lowercase).all(|needle| haystack.any(|c| c == needle))
}

/// A pattern bound to one field of the triple.
///
/// `.` selects `default` whatever the candidates are, `*` selects every
/// candidate, and an empty pattern selects the empty value. A field that was
/// not spelled out by the user (`explicit == false`) is matched exactly and
/// falls back to every candidate instead of matching nothing; a blank one
/// stays blank.
#[derive(Debug, Clone, Copy)]
pub struct FieldMatcher<'a> {
    pub mode: MatchMode,
    pub pattern: &'a str,
    pub default: &'a str,
    pub explicit: bool,
}

impl<'a> FieldMatcher<'a> {
    pub fn new(mode: MatchMode, pattern: &'a str, default: &'a str, explicit: bool) -> Self {
        Self { mode, pattern, default, explicit }
    }

    /// Sorted, deduplicated matches.
    pub fn apply(&self, candidates: &[String]) -> Vec<String> {
        let mut matches = if self.explicit { self.apply_explicit(candidates) } else { self.apply_implicit(candidates) };
        matches.sort();
        matches.dedup();
        matches
    }

    fn apply_explicit(&self, candidates: &[String]) -> Vec<String> {
        match self.pattern {
            "" => vec![String::new()],
            "." => vec![self.default.to_string()],
            "*" => candidates.to_vec(),
            pattern => self.mode.filter(pattern, candidates),
        }
    }

    fn apply_implicit(&self, candidates: &[String]) -> Vec<String> {
        if self.pattern.is_empty() || candidates.is_empty() {
            return vec![self.pattern.to_string()];
        }
        let strict = MatchMode::Exact.filter(self.pattern, candidates);
        if strict.is_empty() {
            candidates.to_vec()
        } else {
            strict
        }
    }
}
