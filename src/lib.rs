//! Deterministic Key-to-Node Routing Library
//!
//! Maps arbitrary lookup keys to exactly one member of a dynamic node
//! set. Routing depends only on the current membership, never on the
//! order nodes were added or removed, so independent processes holding
//! the same membership agree on key placement without communicating.

pub mod routing;

pub use routing::router::Router;
pub use routing::types::{Node, RouteError, RouteResult};
