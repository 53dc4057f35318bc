/// How [`contains`] matches a subset against its candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// At least one element of the subset is present.
    Any,
    /// Every element of the subset is present.
    All,
}

/// Tests whether `subset` is contained in `candidates`.
///
/// An empty subset is contained in anything, in both modes.
pub fn contains<T: PartialEq>(subset: &[T], candidates: &[T], mode: Match) -> bool {
    if subset.is_empty() {
        return true;
    }

    match mode {
        Match::Any => subset.iter().any(|s| candidates.contains(s)),
        Match::All => subset.iter().all(|s| candidates.contains(s)),
    }
}
