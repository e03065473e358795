// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Disjoint set union (union-find) with path compression and union by rank.
//!
//! The heuristics rebuild connectivity information many times per run: once
//! per constructive pass to group terminals, and once per edge-removal trial
//! in the local search. `DisjointSetUnion` therefore never frees its memory;
//! `reset` restores the singleton state in `O(n)` and `reset_with_len` adapts
//! the structure to another problem size while reusing the allocation.

/// A union-find structure over the elements `0..len`.
///
/// # Examples
///
/// ```rust
/// # use steiner_core::dsu::DisjointSetUnion;
/// let mut dsu = DisjointSetUnion::new(4);
/// assert!(dsu.unite(0, 1));
/// assert!(dsu.unite(2, 3));
/// assert!(!dsu.unite(1, 0));
/// assert_eq!(dsu.components(), 2);
/// assert!(dsu.is_connected(0, 1));
/// assert!(!dsu.is_connected(1, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisjointSetUnion {
    parent: Vec<usize>,
    rank: Vec<u32>,
    components: usize,
}

impl DisjointSetUnion {
    /// Creates a new structure with `len` singleton sets.
    #[inline]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            components: len,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the structure holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of disjoint sets.
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Returns the representative of the set containing `element`.
    /// Every node visited on the way is re-parented directly to the root.
    ///
    /// # Panics
    ///
    /// Panics if `element` is not in `0..len()`.
    pub fn find(&mut self, element: usize) -> usize {
        assert!(
            element < self.len(),
            "called `DisjointSetUnion::find` with element out of bounds: the len is {} but the index is {}",
            self.len(),
            element
        );

        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = element;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `false` if both were already in the same set, in which case
    /// nothing changes.
    pub fn unite(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }

        self.components -= 1;
        true
    }

    /// Returns `true` if `a` and `b` are in the same set.
    #[inline]
    pub fn is_connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Restores the singleton state without releasing memory.
    pub fn reset(&mut self) {
        for (i, p) in self.parent.iter_mut().enumerate() {
            *p = i;
        }
        self.rank.fill(0);
        self.components = self.parent.len();
    }

    /// Resizes the structure to `len` singleton sets, reusing the existing
    /// allocation where possible.
    pub fn reset_with_len(&mut self, len: usize) {
        self.parent.clear();
        self.parent.extend(0..len);
        self.rank.clear();
        self.rank.resize(len, 0);
        self.components = len;
    }
}

impl std::fmt::Display for DisjointSetUnion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DisjointSetUnion(len: {}, components: {})",
            self.len(),
            self.components
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_unions_yield_single_component() {
        for n in 1..32 {
            let mut dsu = DisjointSetUnion::new(n);
            for i in 1..n {
                assert!(dsu.unite(i - 1, i));
            }
            assert_eq!(dsu.components(), 1);
        }
    }

    #[test]
    fn test_unite_on_connected_pair_is_noop() {
        let mut dsu = DisjointSetUnion::new(5);
        assert!(dsu.unite(0, 1));
        assert!(dsu.unite(1, 2));
        assert_eq!(dsu.components(), 3);

        assert!(!dsu.unite(2, 0));
        assert_eq!(dsu.components(), 3);
    }

    #[test]
    fn test_reset_restores_singletons() {
        let mut dsu = DisjointSetUnion::new(6);
        dsu.unite(0, 5);
        dsu.unite(1, 4);
        dsu.unite(4, 5);
        dsu.reset();

        assert_eq!(dsu.components(), 6);
        for i in 0..6 {
            assert_eq!(dsu.find(i), i);
        }
    }

    #[test]
    fn test_components_match_distinct_roots() {
        let mut dsu = DisjointSetUnion::new(10);
        dsu.unite(0, 1);
        dsu.unite(2, 3);
        dsu.unite(3, 4);
        dsu.unite(7, 9);

        let mut roots: Vec<usize> = (0..10).map(|i| dsu.find(i)).collect();
        roots.sort_unstable();
        roots.dedup();
        assert_eq!(roots.len(), dsu.components());
    }

    #[test]
    fn test_path_compression_points_to_root() {
        let mut dsu = DisjointSetUnion::new(4);
        dsu.unite(0, 1);
        dsu.unite(2, 3);
        dsu.unite(1, 3);
        let root = dsu.find(3);
        for i in 0..4 {
            dsu.find(i);
            assert_eq!(dsu.parent[i], root);
        }
    }

    #[test]
    fn test_reset_with_len_resizes() {
        let mut dsu = DisjointSetUnion::new(3);
        dsu.unite(0, 2);
        dsu.reset_with_len(5);
        assert_eq!(dsu.len(), 5);
        assert_eq!(dsu.components(), 5);
        assert!(!dsu.is_connected(0, 2));

        dsu.reset_with_len(2);
        assert_eq!(dsu.len(), 2);
        assert_eq!(dsu.components(), 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_find_out_of_bounds_panics() {
        let mut dsu = DisjointSetUnion::new(2);
        dsu.find(2);
    }

    #[test]
    fn test_display() {
        let mut dsu = DisjointSetUnion::new(3);
        dsu.unite(0, 1);
        assert_eq!(dsu.to_string(), "DisjointSetUnion(len: 3, components: 2)");
    }
}
