//! Tagged outcome of an external-source lookup.
//!
//! Both directory and profile lookups must distinguish "source unreachable"
//! from "source reachable, nothing matched" from "source reachable, call
//! failed". Collapsing these into an optional value loses the distinction
//! the orchestrator needs, so every lookup returns this variant instead.

/// Outcome of a single lookup against an external source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Lookup<T> {
    /// The source returned a matching item.
    Found(T),
    /// The source was reachable and returned no match.
    NotFound,
    /// The source is not configured or not connected; no call was made.
    Unavailable,
    /// The source was reachable but the call failed.
    Error(String),
}

impl<T> Lookup<T> {
    /// Check whether this outcome carries an item.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Borrow the item, if any.
    pub fn as_found(&self) -> Option<&T> {
        match self {
            Lookup::Found(item) => Some(item),
            _ => None,
        }
    }

    /// Consume the outcome, keeping only a found item.
    ///
    /// Mapping treats every non-found outcome the same way (the source
    /// contributes nothing), so this is the usual bridge into the mapper.
    pub fn into_found(self) -> Option<T> {
        match self {
            Lookup::Found(item) => Some(item),
            _ => None,
        }
    }

    /// Map the found item, preserving the other outcomes.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(item) => Lookup::Found(f(item)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Unavailable => Lookup::Unavailable,
            Lookup::Error(detail) => Lookup::Error(detail),
        }
    }
}
