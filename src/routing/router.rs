//! Deterministic key-to-node routing.
//!
//! # Responsibilities
//! - Hold the current membership as a sorted, duplicate-free sequence
//! - Route arbitrary keys to exactly one current member
//! - Produce updated routers without mutating existing ones
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Routing depends only on current membership, never insertion history
//! - Full stable resort on add: O(n log n) accepted since membership
//!   changes are rare relative to routing calls
//! - No minimal-movement guarantee: a membership change may redistribute
//!   the whole key space across the remaining members
//! - Explicit error on empty routing rather than a silent default node

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::routing::hashing::{avalanche, key_hash};
use crate::routing::types::{Node, RouteError, RouteResult};

/// A persistent set of routable node identifiers.
///
/// Holds distinct members in ascending order and maps any hashable key to
/// exactly one of them. `add`, `add_all` and `remove` return a new router
/// and leave the receiver untouched, so a router handed to another thread
/// never changes underneath it.
///
/// Two processes that build routers from the same membership, in any
/// insertion order, route every key identically.
#[derive(Debug, Clone)]
pub struct Router<T> {
    /// Members in ascending order. Strictly sorted, no duplicates.
    elements: Vec<T>,
    /// The same members, kept for O(1) containment checks.
    members: HashSet<T>,
}

impl<T> Router<T> {
    /// Create a router with no members.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            members: HashSet::new(),
        }
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Node> Router<T> {
    /// Number of distinct members.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the router has no members.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true if `node` is a current member.
    pub fn contains(&self, node: &T) -> bool {
        self.members.contains(node)
    }

    /// Borrow the members in ascending order.
    pub fn nodes(&self) -> &[T] {
        &self.elements
    }

    /// Iterate over the members in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Return a router that also contains `node`.
    ///
    /// Adding an existing member is a no-op and returns a router equal to
    /// the receiver without re-sorting.
    pub fn add(&self, node: T) -> Router<T> {
        if self.members.contains(&node) {
            return self.clone();
        }

        let mut elements = self.elements.clone();
        let mut members = self.members.clone();
        elements.push(node.clone());
        elements.sort();
        members.insert(node);

        let next = Router { elements, members };
        debug!(nodes = next.len(), "node added to router");
        next
    }

    /// Return a router that also contains every element of `nodes`.
    ///
    /// Elements already present (and duplicates within `nodes`) are
    /// skipped; the combined sequence is sorted once, not once per
    /// element. The sort is stable, so values that compare equal keep
    /// their relative insertion order.
    pub fn add_all<I>(&self, nodes: I) -> Router<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut elements = self.elements.clone();
        let mut members = self.members.clone();

        for node in nodes {
            if members.insert(node.clone()) {
                elements.push(node);
            }
        }

        if elements.len() == self.elements.len() {
            return self.clone();
        }

        let added = elements.len() - self.elements.len();
        elements.sort();

        let next = Router { elements, members };
        debug!(added, nodes = next.len(), "nodes added to router");
        next
    }

    /// Return a router without `node`.
    ///
    /// Removing a non-member is a no-op and returns a router equal to the
    /// receiver. The surviving members keep their order; a subsequence of
    /// a sorted sequence needs no resort.
    pub fn remove(&self, node: &T) -> Router<T> {
        if !self.members.contains(node) {
            return self.clone();
        }

        let elements: Vec<T> = self
            .elements
            .iter()
            .filter(|element| *element != node)
            .cloned()
            .collect();
        let mut members = self.members.clone();
        members.remove(node);

        let next = Router { elements, members };
        debug!(nodes = next.len(), "node removed from router");
        next
    }

    /// Route `key` to one current member.
    ///
    /// Pure: the same router value and key always select the same member,
    /// on this process or any other holding an equal router. Fails with
    /// [`RouteError::EmptyRouter`] when there are no members; callers are
    /// expected to check `is_empty` or handle the error.
    pub fn route<K: Hash + ?Sized>(&self, key: &K) -> RouteResult<&T> {
        if self.elements.is_empty() {
            return Err(RouteError::EmptyRouter);
        }

        let mixed = avalanche(key_hash(key));
        // unsigned_abs is total at i32::MIN, where two's-complement abs is not.
        let index = mixed.unsigned_abs() as usize % self.elements.len();
        Ok(&self.elements[index])
    }
}

/// Equality is membership equality. `members` is derived from `elements`
/// and never consulted.
impl<T: Node> PartialEq for Router<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Node> Eq for Router<T> {}

impl<T: Node> FromIterator<T> for Router<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Router::new().add_all(iter)
    }
}

impl<T: Node, const N: usize> From<[T; N]> for Router<T> {
    fn from(nodes: [T; N]) -> Self {
        nodes.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a Router<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Serializes as the sorted member sequence.
impl<T: Node + Serialize> Serialize for Router<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.elements.serialize(serializer)
    }
}

/// Deserializes through the dedup/sort constructor, so unsorted or
/// duplicated input cannot break the invariants.
impl<'de, T: Node + Deserialize<'de>> Deserialize<'de> for Router<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Router::from_iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_router() {
        let router: Router<u32> = Router::new();
        assert_eq!(router.len(), 0);
        assert!(router.is_empty());
        assert_eq!(router.route("any-key"), Err(RouteError::EmptyRouter));
    }

    #[test]
    fn test_construction_dedups_and_sorts() {
        let router = Router::from(["b", "a", "b", "c", "a"]);
        assert_eq!(router.len(), 3);
        assert_eq!(router.nodes(), ["a", "b", "c"]);
        assert!(router.contains(&"a"));
        assert!(router.contains(&"b"));
        assert!(!router.contains(&"d"));
    }

    #[test]
    fn test_add_keeps_sorted_order() {
        let router = Router::from(["a", "c"]).add("b");
        assert_eq!(router.nodes(), ["a", "b", "c"]);
    }

    #[test]
    fn test_add_existing_member_is_noop() {
        let router = Router::from([1, 2, 3]);
        let same = router.add(2);
        assert_eq!(same, router);
        assert_eq!(same.len(), 3);
    }

    #[test]
    fn test_add_does_not_mutate_receiver() {
        let router = Router::from([1, 3]);
        let grown = router.add(2);
        assert_eq!(router.nodes(), [1, 3]);
        assert_eq!(grown.nodes(), [1, 2, 3]);
    }

    #[test]
    fn test_add_all_merges_in_one_pass() {
        let router = Router::from([5, 1]).add_all([3, 1, 4, 3]);
        assert_eq!(router.nodes(), [1, 3, 4, 5]);
    }

    #[test]
    fn test_add_all_with_nothing_new() {
        let router = Router::from([1, 2]);
        assert_eq!(router.add_all([2, 1]), router);
        assert_eq!(router.add_all(std::iter::empty()), router);
    }

    #[test]
    fn test_remove_member() {
        let router = Router::from(["a", "b", "c"]);
        let shrunk = router.remove(&"b");
        assert_eq!(shrunk.nodes(), ["a", "c"]);
        assert!(!shrunk.contains(&"b"));
        assert_eq!(router.len(), 3);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let router = Router::from([1, 2, 3]);
        assert_eq!(router.remove(&9), router);
    }

    #[test]
    fn test_add_then_remove_restores_value() {
        let router = Router::from(["a", "b", "c"]);
        assert_eq!(router.add("d").remove(&"d"), router);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let forward: Router<_> = ["a", "b", "c"].into();
        let backward: Router<_> = ["c", "a", "b"].into();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_route_after_add_to_empty() {
        let router = Router::<u32>::new().add(5);
        assert_eq!(router.route(&42u32), Ok(&5));
    }

    #[test]
    fn test_single_node_takes_every_key() {
        let router = Router::from(["only"]);
        for i in 0..100u32 {
            assert_eq!(router.route(&i), Ok(&"only"));
        }
    }

    #[test]
    fn test_route_is_deterministic() {
        let router = Router::from(["a", "b", "c", "d"]);
        for i in 0..100u32 {
            assert_eq!(router.route(&i), router.route(&i));
        }
    }

    #[test]
    fn test_iteration_is_ascending_and_restartable() {
        let router = Router::from([30, 10, 20]);
        let first: Vec<_> = router.iter().copied().collect();
        let second: Vec<_> = (&router).into_iter().copied().collect();
        assert_eq!(first, [10, 20, 30]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sorted_invariant_survives_mixed_updates() {
        let router = Router::from([7, 3])
            .add(9)
            .add_all([1, 8, 3])
            .remove(&8)
            .add(2)
            .remove(&7);
        assert_eq!(router.nodes(), [1, 2, 3, 9]);
        for pair in router.nodes().windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
