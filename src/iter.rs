use std::{collections::btree_map, hash::Hash, iter::FusedIterator};

use crate::EdgeIndex;

/// Iterator over the edges of an [`EdgeIndex`], in insertion order.
///
/// Created by [`EdgeIndex::iter`]. The index cannot be mutated while this is alive.
pub struct Edges<'a, N> {
    inner: btree_map::Values<'a, u64, (N, N)>,
}

impl<'a, N> Edges<'a, N> {
    pub(crate) fn new(inner: btree_map::Values<'a, u64, (N, N)>) -> Self {
        Self { inner }
    }
}

impl<'a, N> Iterator for Edges<'a, N> {
    type Item = (&'a N, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(source, target)| (source, target))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, N> DoubleEndedIterator for Edges<'a, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(source, target)| (source, target))
    }
}

impl<'a, N> ExactSizeIterator for Edges<'a, N> {}

impl<'a, N> FusedIterator for Edges<'a, N> {}

impl<'a, N> Clone for Edges<'a, N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, N> IntoIterator for &'a EdgeIndex<N> {
    type Item = (&'a N, &'a N);
    type IntoIter = Edges<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Eq + Hash + Clone> Extend<(N, N)> for EdgeIndex<N> {
    fn extend<I: IntoIterator<Item = (N, N)>>(&mut self, edges: I) {
        for (source, target) in edges {
            self.add_edge(source, target);
        }
    }
}

/// Seeds an index from `(source, target)` pairs. Repeated pairs collapse into one
/// edge, which keeps the position of its first occurrence.
impl<N: Eq + Hash + Clone> FromIterator<(N, N)> for EdgeIndex<N> {
    fn from_iter<I: IntoIterator<Item = (N, N)>>(edges: I) -> Self {
        let mut index = EdgeIndex::new();
        index.extend(edges);
        index
    }
}

impl<N: Eq + Hash + Clone, const K: usize> From<[(N, N); K]> for EdgeIndex<N> {
    fn from(edges: [(N, N); K]) -> Self {
        edges.into_iter().collect()
    }
}
