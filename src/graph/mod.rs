// dbgasm: De Bruijn graph assembly of short reads into contigs.
//
// Copyright 2026 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! The de Bruijn graph and its nodes.
//!
//! A [Graph] owns an arena of [KmerNode]s addressed by [NodeId]. Edges are
//! stored on both endpoints as insertion ordered maps from the neighbour id to
//! the number of times the transition was observed.
//!
//! A graph goes through two states:
//!
//!   - *raw*: populated with [add_kmers](Graph::add_kmers) or a
//!     [GraphBuilder](builder::GraphBuilder). Every node is a single k-mer.
//!   - *final*: after [simplify](Graph::simplify) every node is a unitig and
//!     the graph no longer accepts insertions.
//!
//! ## Usage
//!
//! ```rust
//! use dbgasm::graph::Graph;
//! use dbgasm::kmer::extract_kmers;
//!
//! let mut graph = Graph::new();
//! graph.add_kmers(extract_kmers("ACGTAC", 3).unwrap()).unwrap();
//! assert_eq!(graph.to_string(), "DBG(3) with 4 nodes and 3 edges");
//!
//! graph.simplify().unwrap();
//! assert_eq!(graph.to_string(), "DBG(3) with 1 nodes and 0 edges");
//!
//! let contigs = graph.contigs();
//! assert_eq!(contigs[0].sequence, "ACGTAC");
//! ```
//!

pub mod builder;
pub mod simplify;

use crate::Contig;
use crate::kmer::ALPHABET;
use crate::kmer::InvalidKmerLength;
use crate::kmer::InvalidSymbol;

use indexmap::IndexMap;

type E = Box<dyn std::error::Error>;

/// Insertion into a graph that has already been simplified.
#[derive(Debug, Clone)]
pub struct GraphFinalized;

impl std::fmt::Display for GraphFinalized {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "graph has been simplified and can no longer be modified")
    }
}

impl std::error::Error for GraphFinalized {}

/// Insertion of a k-mer whose length differs from the graph's k.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompatibleKmerLength {
    pub expected: usize,
    pub got: usize,
}

impl std::fmt::Display for IncompatibleKmerLength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "incompatible k-mer lengths: {} and {}", self.expected, self.got)
    }
}

impl std::error::Error for IncompatibleKmerLength {}

/// Consecutive k-mers of a read that do not overlap by k - 1 symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonOverlappingKmers {
    pub from: String,
    pub to: String,
}

impl std::fmt::Display for NonOverlappingKmers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "k-mers {} and {} do not overlap", self.from, self.to)
    }
}

impl std::error::Error for NonOverlappingKmers {}

/// Stable index of a node in a [Graph].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A k-mer, or after simplification a unitig of several k-mers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KmerNode {
    /// Length k while the graph is raw, at least k after simplification.
    pub sequence: String,
    /// Number of occurrences across all reads. Unitigs carry the
    /// multiplicity of their first k-mer.
    pub multiplicity: u32,
    /// Successors and the number of times each transition was observed.
    pub outgoing: IndexMap<NodeId, u32>,
    /// Predecessors and the number of times each transition was observed.
    pub incoming: IndexMap<NodeId, u32>,
    /// Node has been absorbed into a unitig.
    pub merged: bool,
    /// Node is a unitig resolved from a cycle without an entry point.
    pub circular: bool,
    /// Number of k-mers represented by this node.
    pub kmer_count: usize,
    /// Sum of the multiplicities of the k-mers represented by this node.
    pub total_multiplicity: u64,
}

impl KmerNode {
    fn new(sequence: &str) -> Self {
        KmerNode{ sequence: sequence.to_string(), kmer_count: 1, ..Default::default() }
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    /// Mean multiplicity of the k-mers in this node.
    pub fn coverage(&self) -> f64 {
        if self.kmer_count == 0 {
            return 0.0
        }
        self.total_multiplicity as f64 / self.kmer_count as f64
    }
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    k: Option<usize>,
    nodes: Vec<KmerNode>,
    index: IndexMap<String, NodeId>,
    finalized: bool,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Create an empty graph that only accepts k-mers of length `k`.
    pub fn with_kmer_len(
        k: usize,
    ) -> Self {
        Graph{ k: Some(k), ..Default::default() }
    }

    /// Length of the k-mers in this graph, None if nothing has been added.
    pub fn kmer_len(&self) -> Option<usize> {
        self.k
    }

    /// True after [simplify](Graph::simplify) has been called.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|node| !node.merged).count()
    }

    /// Number of distinct edges between live nodes.
    ///
    /// Each edge is stored on both of its endpoints but counted once.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().filter(|node| !node.merged).map(|node| node.outgoing.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    pub fn node(
        &self,
        id: NodeId,
    ) -> Option<&KmerNode> {
        self.nodes.get(id.0).filter(|node| !node.merged)
    }

    /// Find the node of `kmer` in a raw graph.
    pub fn find(
        &self,
        kmer: &str,
    ) -> Option<NodeId> {
        self.index.get(kmer).copied()
    }

    /// Iterate over the live nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &KmerNode)> {
        self.nodes.iter().enumerate().filter(|(_, node)| !node.merged).map(|(idx, node)| (NodeId(idx), node))
    }

    /// Add the k-mers of one read.
    ///
    /// Every k-mer increases the multiplicity of its node by one, creating the
    /// node if necessary, and every consecutive pair of k-mers adds one
    /// observation of the edge between them.
    ///
    /// The whole read is checked before anything is inserted, so the graph is
    /// unchanged if an error is returned.
    ///
    /// ## Errors
    ///
    /// [GraphFinalized] if the graph has been simplified.
    /// [IncompatibleKmerLength] if a k-mer has a different length than the
    /// ones already in the graph or the others in the read.
    /// [InvalidKmerLength] if a k-mer is empty.
    /// [InvalidSymbol] if a k-mer contains symbols other than A, C, G or T.
    /// [NonOverlappingKmers] if consecutive k-mers do not overlap by k - 1.
    ///
    pub fn add_kmers<'a, I: Iterator<Item = &'a str>>(
        &mut self,
        kmers: I,
    ) -> Result<(), E> {
        if self.finalized {
            return Err(Box::new(GraphFinalized{}))
        }

        let kmers: Vec<&str> = kmers.collect();
        let k = self.check_kmers(&kmers)?;
        if kmers.is_empty() {
            return Ok(())
        }
        self.k = Some(k);

        let mut prev: Option<NodeId> = None;
        for kmer in kmers {
            let id = self.insert_kmer(kmer);
            if let Some(from) = prev {
                self.add_edge(from, id, 1);
            }
            prev = Some(id);
        }

        Ok(())
    }

    // Returns the k-mer length to use for `kmers`.
    fn check_kmers(
        &self,
        kmers: &[&str],
    ) -> Result<usize, E> {
        let k = match (self.k, kmers.first()) {
            (Some(k), _) => k,
            (None, Some(first)) => first.len(),
            (None, None) => return Ok(0),
        };
        if k == 0 {
            return Err(Box::new(InvalidKmerLength{ k, read_index: None, length: 0 }))
        }

        for (idx, kmer) in kmers.iter().enumerate() {
            if kmer.len() != k {
                return Err(Box::new(IncompatibleKmerLength{ expected: k, got: kmer.len() }))
            }
            if let Some(position) = kmer.bytes().position(|x| !ALPHABET.contains(&x)) {
                let symbol = kmer[position..].chars().next().unwrap_or('?');
                return Err(Box::new(InvalidSymbol{ read_index: None, position, symbol }))
            }
            if idx > 0 && kmers[idx - 1][1..] != kmer[..(k - 1)] {
                return Err(Box::new(NonOverlappingKmers{ from: kmers[idx - 1].to_string(), to: kmer.to_string() }))
            }
        }

        Ok(k)
    }

    fn insert_kmer(
        &mut self,
        kmer: &str,
    ) -> NodeId {
        let id = match self.index.get(kmer) {
            Some(id) => *id,
            None => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(KmerNode::new(kmer));
                self.index.insert(kmer.to_string(), id);
                id
            },
        };

        let node = &mut self.nodes[id.0];
        node.multiplicity += 1;
        node.total_multiplicity += 1;

        id
    }

    fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        count: u32,
    ) {
        *self.nodes[from.0].outgoing.entry(to).or_insert(0) += count;
        *self.nodes[to.0].incoming.entry(from).or_insert(0) += count;
    }

    /// The live nodes as contigs.
    ///
    /// Contigs are ordered by decreasing length, ties broken by sequence, and
    /// named `contig1`, `contig2`, ... in that order.
    pub fn contigs(&self) -> Vec<Contig> {
        let mut nodes: Vec<&KmerNode> = self.nodes().map(|(_, node)| node).collect();
        nodes.sort_by(|a, b| {
            b.sequence.len().cmp(&a.sequence.len()).then_with(|| a.sequence.cmp(&b.sequence))
        });

        nodes.iter().enumerate().map(|(idx, node)| {
            Contig{
                id: format!("contig{}", idx + 1),
                sequence: node.sequence.clone(),
                multiplicity: node.multiplicity,
                coverage: node.coverage(),
                circular: node.circular,
            }
        }).collect()
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let k = self.k.map(|x| x.to_string()).unwrap_or("-".to_string());
        write!(f, "DBG({}) with {} nodes and {} edges", k, self.node_count(), self.edge_count())
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn add_kmers_counts_nodes_and_edges() {
        use super::Graph;
        use crate::kmer::extract_kmers;

        let mut graph = Graph::new();
        graph.add_kmers(extract_kmers("ACGTAC", 3).unwrap()).unwrap();

        assert_eq!(graph.kmer_len(), Some(3));
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);

        let acg = graph.find("ACG").unwrap();
        let cgt = graph.find("CGT").unwrap();
        assert_eq!(graph.node(acg).unwrap().outgoing.get(&cgt), Some(&1));
        assert_eq!(graph.node(cgt).unwrap().incoming.get(&acg), Some(&1));
    }

    #[test]
    fn add_kmers_sums_multiplicity_and_edge_weight() {
        use super::Graph;
        use crate::kmer::extract_kmers;

        let mut graph = Graph::new();
        graph.add_kmers(extract_kmers("ACGT", 3).unwrap()).unwrap();
        graph.add_kmers(extract_kmers("ACGT", 3).unwrap()).unwrap();
        graph.add_kmers(extract_kmers("TACG", 3).unwrap()).unwrap();

        let acg = graph.find("ACG").unwrap();
        let cgt = graph.find("CGT").unwrap();
        let tac = graph.find("TAC").unwrap();

        assert_eq!(graph.node(acg).unwrap().multiplicity, 3);
        assert_eq!(graph.node(cgt).unwrap().multiplicity, 2);
        assert_eq!(graph.node(acg).unwrap().outgoing.get(&cgt), Some(&2));
        assert_eq!(graph.node(acg).unwrap().incoming.get(&tac), Some(&1));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn add_kmers_single_kmer_has_no_edges() {
        use super::Graph;
        use crate::kmer::extract_kmers;

        let mut graph = Graph::new();
        graph.add_kmers(extract_kmers("ACG", 3).unwrap()).unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn add_kmers_repeated_kmer_is_self_loop() {
        use super::Graph;
        use crate::kmer::extract_kmers;

        let mut graph = Graph::new();
        graph.add_kmers(extract_kmers("AAAA", 3).unwrap()).unwrap();

        let aaa = graph.find("AAA").unwrap();
        let node = graph.node(aaa).unwrap();
        assert_eq!(node.multiplicity, 2);
        assert_eq!(node.outgoing.get(&aaa), Some(&1));
        assert_eq!(node.in_degree(), 1);
        assert_eq!(node.out_degree(), 1);
    }

    #[test]
    fn error_if_incompatible_kmer_length() {
        use super::Graph;
        use super::IncompatibleKmerLength;
        use crate::kmer::extract_kmers;

        let mut graph = Graph::with_kmer_len(3);
        let got = graph.add_kmers(extract_kmers("ACGT", 4).unwrap()).unwrap_err();

        assert_eq!(got.downcast_ref::<IncompatibleKmerLength>(), Some(&IncompatibleKmerLength{ expected: 3, got: 4 }));
    }

    #[test]
    fn error_if_kmers_do_not_overlap() {
        use super::Graph;
        use super::NonOverlappingKmers;

        let mut graph = Graph::new();
        let got = graph.add_kmers(["AAA", "CCC"].into_iter()).unwrap_err();
        let expected = NonOverlappingKmers{ from: "AAA".to_string(), to: "CCC".to_string() };

        assert_eq!(got.downcast_ref::<NonOverlappingKmers>(), Some(&expected));
        assert!(graph.is_empty());
    }

    #[test]
    fn error_if_kmer_has_invalid_symbol() {
        use super::Graph;
        use crate::kmer::InvalidSymbol;

        let mut graph = Graph::new();
        let got = graph.add_kmers(["AAA", "Bé"].into_iter()).unwrap_err();
        assert_eq!(got.downcast_ref::<InvalidSymbol>(), Some(&InvalidSymbol{ read_index: None, position: 0, symbol: 'B' }));

        let got = graph.add_kmers(["AéA"].into_iter()).unwrap_err();
        assert_eq!(got.downcast_ref::<InvalidSymbol>(), Some(&InvalidSymbol{ read_index: None, position: 1, symbol: 'é' }));

        assert!(graph.is_empty());
        graph.simplify().unwrap();
        assert!(graph.contigs().is_empty());
    }

    #[test]
    fn error_if_kmer_is_empty() {
        use super::Graph;
        use crate::kmer::InvalidKmerLength;

        let mut graph = Graph::new();
        let got = graph.add_kmers(["", ""].into_iter()).unwrap_err();

        assert!(got.downcast_ref::<InvalidKmerLength>().is_some());
        assert_eq!(graph.kmer_len(), None);
    }

    #[test]
    fn error_mid_read_leaves_graph_unchanged() {
        use super::Graph;
        use super::IncompatibleKmerLength;
        use crate::kmer::extract_kmers;

        let mut graph = Graph::new();
        graph.add_kmers(extract_kmers("ACGT", 3).unwrap()).unwrap();

        let got = graph.add_kmers(["ACG", "CGT", "GTAC", "TAC"].into_iter()).unwrap_err();
        assert_eq!(got.downcast_ref::<IncompatibleKmerLength>(), Some(&IncompatibleKmerLength{ expected: 3, got: 4 }));

        let acg = graph.find("ACG").unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node(acg).unwrap().multiplicity, 1);
        assert!(graph.find("GTA").is_none());
    }

    #[test]
    fn add_kmers_empty_read() {
        use super::Graph;

        let mut graph = Graph::new();
        graph.add_kmers(std::iter::empty()).unwrap();

        assert_eq!(graph.kmer_len(), None);
        assert!(graph.is_empty());
    }

    #[test]
    fn error_if_adding_to_finalized() {
        use super::Graph;
        use super::GraphFinalized;
        use crate::kmer::extract_kmers;

        let mut graph = Graph::new();
        graph.add_kmers(extract_kmers("ACGT", 3).unwrap()).unwrap();
        graph.simplify().unwrap();

        let got = graph.add_kmers(extract_kmers("ACGT", 3).unwrap()).unwrap_err();

        assert!(got.downcast_ref::<GraphFinalized>().is_some());
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn display_empty_graph() {
        use super::Graph;

        let graph = Graph::new();

        assert_eq!(graph.to_string(), "DBG(-) with 0 nodes and 0 edges");
        assert!(graph.is_empty());
        assert!(graph.contigs().is_empty());
    }

    #[test]
    fn contigs_are_ordered_by_length() {
        use super::Graph;
        use crate::kmer::extract_kmers;

        let mut graph = Graph::new();
        graph.add_kmers(extract_kmers("TTT", 3).unwrap()).unwrap();
        graph.add_kmers(extract_kmers("CCCGA", 3).unwrap()).unwrap();
        graph.add_kmers(extract_kmers("AAG", 3).unwrap()).unwrap();
        graph.simplify().unwrap();

        let got: Vec<(String, String)> = graph.contigs().into_iter().map(|x| (x.id, x.sequence)).collect();
        let expected = vec![
            ("contig1".to_string(), "CCCGA".to_string()),
            ("contig2".to_string(), "AAG".to_string()),
            ("contig3".to_string(), "TTT".to_string()),
        ];

        assert_eq!(got, expected);
    }
}
