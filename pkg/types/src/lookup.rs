/// Outcome of an upstream lookup that can legitimately come back empty.
///
/// Every "expected" absence (no resolvable groups, no matching quota, user
/// unknown to the cluster) collapses into `NotFound`. Transport-level
/// faults (connection refused, HTTP 5xx) map to `Unavailable`. Both render
/// the same "no quota found" page; the tag exists so a stricter caller can
/// tell them apart without changing the default behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Unavailable,
}

impl<T> Lookup<T> {
    /// The found value, dropping the absence tag.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::Unavailable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}
