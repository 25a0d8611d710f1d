//! Key routing subsystem.
//!
//! # Data Flow
//! ```text
//! route(key) called
//!     → hashing.rs (32-bit key hash, avalanche mixing)
//!     → router.rs (index = abs(mixed) % member count)
//!     → Return: member at index, or RouteError::EmptyRouter
//!
//! Membership change:
//!     add / add_all / remove
//!     → Copy backing sequence, apply change, stable sort where needed
//!     → Freeze as a new immutable Router (receiver untouched)
//! ```
//!
//! # Design Decisions
//! - Routers are persistent values; every update returns a new router
//! - Members kept sorted so identical membership routes identically
//!   regardless of insertion order
//! - Key hashing is platform-independent for cross-process agreement
//! - Deterministic: same router value and key always pick the same node
//! - Empty membership is a caller error, surfaced explicitly

pub mod hashing;
pub mod router;
pub mod types;

pub use router::Router;
pub use types::{Node, RouteError, RouteResult};
