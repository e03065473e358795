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

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Phantom-typed wrappers around `usize` that keep node ids and edge ids
//! apart. The CSR graph stores both as plain offsets into flat arrays, and
//! passing an edge offset where a node id is expected is an easy mistake to
//! make and a hard one to find. `TypedIndex<T>` carries a tag type
//! `T: TypedIndexTag` that encodes intent at the type level while compiling
//! down to a transparent `usize`.
//!
//! ## Highlights
//!
//! - `NodeIndex` and `EdgeIndex` are the two index spaces of a graph.
//! - `Display`/`Debug` print the tag name, e.g. `NodeIndex(3)`.
//! - Conversions: `From<usize>` and `From<TypedIndex<T>> for usize`.
//! - `+`/`-` with `usize` for offset arithmetic over CSR slices.
//!
//! ## Usage
//!
//! ```rust
//! use steiner_core::utils::index::{EdgeIndex, NodeIndex};
//!
//! let node = NodeIndex::new(3);
//! let edge = EdgeIndex::new(7);
//! assert_eq!(node.get(), 3);
//! assert_eq!(format!("{}", node), "NodeIndex(3)");
//! assert_eq!(format!("{}", edge), "EdgeIndex(7)");
//! ```

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index that is associated with a specific tag type `T`.
///
/// # Examples
///
/// ```rust
/// # use steiner_core::utils::index::{TypedIndex, TypedIndexTag};
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
/// struct TerminalTag;
///
/// impl TypedIndexTag for TerminalTag {
///    const NAME: &'static str = "TerminalIndex";
/// }
///
/// type TerminalIndex = TypedIndex<TerminalTag>;
///
/// let index = TerminalIndex::new(5);
/// assert_eq!(index.get(), 5);
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` with the given `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use steiner_core::utils::index::NodeIndex;
    /// let node = NodeIndex::new(11);
    /// assert_eq!(node.get(), 11);
    /// ```
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

macro_rules! impl_index_op {
    ($trait_name:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<T> std::ops::$trait_name<usize> for TypedIndex<T> {
            type Output = Self;

            fn $method(self, rhs: usize) -> Self::Output {
                Self::new(self.index $op rhs)
            }
        }
        impl<T> std::ops::$assign_trait<usize> for TypedIndex<T> {
            fn $assign_method(&mut self, rhs: usize) {
                self.index = self.index $op rhs;
            }
        }
    };
}

impl_index_op!(Add, add, AddAssign, add_assign, +);
impl_index_op!(Sub, sub, SubAssign, sub_assign, -);

/// A tag type for graph node indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIndexTag;

impl TypedIndexTag for NodeIndexTag {
    const NAME: &'static str = "NodeIndex";
}

/// A typed index for graph nodes.
pub type NodeIndex = TypedIndex<NodeIndexTag>;

/// A tag type for physical (directed) edge indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EdgeIndexTag;

impl TypedIndexTag for EdgeIndexTag {
    const NAME: &'static str = "EdgeIndex";
}

/// A typed index for physical edges in the CSR edge array.
pub type EdgeIndex = TypedIndex<EdgeIndexTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let node: NodeIndex = 42.into();
        assert_eq!(node.get(), 42);

        let raw: usize = node.into();
        assert_eq!(raw, 42);
    }

    #[test]
    fn test_debug_and_display_use_tag_name() {
        let node = NodeIndex::new(7);
        let edge = EdgeIndex::new(9);
        assert_eq!(format!("{}", node), "NodeIndex(7)");
        assert_eq!(format!("{:?}", edge), "EdgeIndex(9)");
    }

    #[test]
    fn test_offset_arithmetic() {
        let mut edge = EdgeIndex::new(10);
        assert_eq!((edge + 5).get(), 15);
        assert_eq!((edge - 5).get(), 5);

        edge += 2;
        assert_eq!(edge.get(), 12);
        edge -= 12;
        assert_eq!(edge.get(), 0);
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        let mut nodes = vec![NodeIndex::new(3), NodeIndex::new(1), NodeIndex::new(2)];
        nodes.sort();
        assert_eq!(nodes, vec![NodeIndex::new(1), NodeIndex::new(2), NodeIndex::new(3)]);
    }
}
