//! Node capability bound and routing error types.

use std::hash::Hash;

use thiserror::Error;

/// Capabilities a node identifier must provide.
///
/// Routing needs a total order on nodes (so every process holding the
/// same membership derives the same canonical sequence) and a value hash
/// consistent with equality (for membership checks). Blanket-implemented
/// for any type with the right bounds; never implemented by hand.
pub trait Node: Clone + Ord + Hash {}

impl<T: Clone + Ord + Hash> Node for T {}

/// Errors that can occur during routing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// `route` was called on a router with no members.
    ///
    /// Returning a default node instead would silently corrupt placement
    /// for callers that skip the `is_empty` check, so this surfaces as a
    /// distinct error kind.
    #[error("cannot route: router has no nodes")]
    EmptyRouter,
}

/// Result type for routing operations.
pub type RouteResult<V> = Result<V, RouteError>;
