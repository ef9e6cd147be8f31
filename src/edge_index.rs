use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::{self, Debug, Display},
    hash::Hash,
};

use tracing::trace;

use crate::{error::ConsistencyError, iter::Edges};

/// A set of directed edges, indexed by source and by target.
///
/// Every node starts out with no edges, so queries about unknown nodes return
/// empty results instead of failing.
///
/// Edges are enumerated in the order they were first added. Removing an edge and
/// adding it again moves it to the end.
///
/// ```
/// use edge_index::EdgeIndex;
///
/// let mut index = EdgeIndex::from([("a", "b")]);
/// index.add_edge("b", "c");
/// assert!(index.has_edge(&"b", &"c"));
///
/// index.remove_source(&"a");
/// assert_eq!(index.edges(), vec![("b", "c")]);
/// ```
#[derive(Clone)]
pub struct EdgeIndex<N> {
    /// source -> target -> sequence number of the edge.
    /// Never holds an empty inner map.
    forward: HashMap<N, HashMap<N, u64>>,

    /// target -> sources. Never holds an empty set.
    reverse: HashMap<N, HashSet<N>>,

    /// Every edge, keyed by the sequence number it was given on insertion.
    order: BTreeMap<u64, (N, N)>,

    next_seq: u64,
}

impl<N> EdgeIndex<N> {
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Creates an empty index with room for `nodes` distinct sources and targets.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            forward: HashMap::with_capacity(nodes),
            reverse: HashMap::with_capacity(nodes),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Returns the number of edges.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over the edges in insertion order.
    pub fn iter(&self) -> Edges<'_, N> {
        Edges::new(self.order.values())
    }

    pub fn clear(&mut self) {
        trace!(edges = self.order.len(), "Clearing edge index");
        self.forward.clear();
        self.reverse.clear();
        self.order.clear();
    }
}

impl<N: Eq + Hash + Clone> EdgeIndex<N> {
    /// Adds the edge `source -> target`.
    ///
    /// Returns `false` if the edge was already present, in which case nothing changes.
    pub fn add_edge(&mut self, source: N, target: N) -> bool {
        if self.has_edge(&source, &target) {
            return false;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.order.insert(seq, (source.clone(), target.clone()));
        self.reverse
            .entry(target.clone())
            .or_default()
            .insert(source.clone());
        self.forward.entry(source).or_default().insert(target, seq);
        true
    }

    /// Removes the edge `source -> target`, returning whether it was present.
    pub fn remove_edge(&mut self, source: &N, target: &N) -> bool {
        match self.unlink_target(source, target) {
            Some(seq) => {
                self.order.remove(&seq);
                self.unlink_source(target, source);
                true
            }
            None => false,
        }
    }

    /// Removes every edge leaving `node` and returns the targets it pointed to.
    ///
    /// Edges entering `node` are left alone.
    pub fn remove_source(&mut self, node: &N) -> HashSet<N> {
        let Some(targets) = self.forward.remove(node) else {
            return HashSet::new();
        };

        let mut removed = HashSet::with_capacity(targets.len());
        for (target, seq) in targets {
            self.order.remove(&seq);
            self.unlink_source(&target, node);
            removed.insert(target);
        }

        trace!(edges = removed.len(), "Removed outgoing edges of a source");
        removed
    }

    /// Removes every edge entering `node` and returns the sources that pointed to it.
    ///
    /// Edges leaving `node` are left alone.
    pub fn remove_target(&mut self, node: &N) -> HashSet<N> {
        let Some(sources) = self.reverse.remove(node) else {
            return HashSet::new();
        };

        for source in &sources {
            if let Some(seq) = self.unlink_target(source, node) {
                self.order.remove(&seq);
            }
        }

        trace!(edges = sources.len(), "Removed incoming edges of a target");
        sources
    }

    pub fn has_edge(&self, source: &N, target: &N) -> bool {
        self.forward
            .get(source)
            .is_some_and(|targets| targets.contains_key(target))
    }

    /// Returns `true` if `node` has at least one outgoing edge.
    pub fn has_source(&self, node: &N) -> bool {
        self.forward.contains_key(node)
    }

    /// Returns `true` if `node` has at least one incoming edge.
    pub fn has_target(&self, node: &N) -> bool {
        self.reverse.contains_key(node)
    }

    /// Returns a copy of the nodes `node` points to.
    pub fn get_targets(&self, node: &N) -> HashSet<N> {
        self.forward
            .get(node)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns a copy of the nodes pointing to `node`.
    pub fn get_sources(&self, node: &N) -> HashSet<N> {
        self.reverse.get(node).cloned().unwrap_or_default()
    }

    /// Returns every node with at least one outgoing edge.
    pub fn sources(&self) -> HashSet<N> {
        self.forward.keys().cloned().collect()
    }

    /// Returns every node with at least one incoming edge.
    pub fn targets(&self) -> HashSet<N> {
        self.reverse.keys().cloned().collect()
    }

    /// Returns every edge in insertion order.
    pub fn edges(&self) -> Vec<(N, N)> {
        self.order.values().cloned().collect()
    }

    /// Drops `target` from the targets of `source`, pruning `source` from the
    /// forward index once it has none left. Returns the sequence number of the
    /// edge if it existed.
    fn unlink_target(&mut self, source: &N, target: &N) -> Option<u64> {
        let targets = self.forward.get_mut(source)?;
        let seq = targets.remove(target)?;
        if targets.is_empty() {
            self.forward.remove(source);
        }
        Some(seq)
    }

    /// Drops `source` from the sources of `target`, pruning `target` from the
    /// reverse index once it has none left.
    fn unlink_source(&mut self, target: &N, source: &N) {
        if let Some(sources) = self.reverse.get_mut(target) {
            sources.remove(source);
            if sources.is_empty() {
                self.reverse.remove(target);
            }
        }
    }
}

impl<N: Eq + Hash + Clone + Debug> EdgeIndex<N> {
    /// Checks that the forward index, the reverse index and the edge order all
    /// describe the same set of edges, and that no node is kept with an empty set.
    pub fn validate(&self) -> Result<(), ConsistencyError> {
        for (source, targets) in &self.forward {
            if targets.is_empty() {
                return Err(ConsistencyError::EmptyTargetSet {
                    from: format!("{:?}", source),
                });
            }

            for (target, seq) in targets {
                let mirrored = self
                    .reverse
                    .get(target)
                    .is_some_and(|sources| sources.contains(source));
                if !mirrored {
                    return Err(ConsistencyError::missing_reverse(source, target));
                }

                match self.order.get(seq) {
                    Some((s, t)) if s == source && t == target => {}
                    _ => return Err(ConsistencyError::unordered_edge(source, target)),
                }
            }
        }

        for (target, sources) in &self.reverse {
            if sources.is_empty() {
                return Err(ConsistencyError::EmptySourceSet {
                    to: format!("{:?}", target),
                });
            }

            for source in sources {
                if !self.has_edge(source, target) {
                    return Err(ConsistencyError::missing_forward(source, target));
                }
            }
        }

        for (seq, (source, target)) in &self.order {
            let recorded = self
                .forward
                .get(source)
                .and_then(|targets| targets.get(target));
            if recorded != Some(seq) {
                return Err(ConsistencyError::stale_order_entry(source, target));
            }
        }

        Ok(())
    }
}

impl<N> Default for EdgeIndex<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Debug> Debug for EdgeIndex<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<N: Display> Display for EdgeIndex<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (source, target) in self.iter() {
            writeln!(f, "{} -> {}", source, target)?;
        }
        Ok(())
    }
}
