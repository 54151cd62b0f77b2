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

//! Compacting non-branching paths into unitigs.
//!
//! An edge `u -> v` is collapsed when `u` has exactly one successor, `v` has
//! exactly one predecessor and `u != v`. Simplification runs in two phases:
//!
//!   1. Every node that can not be absorbed into its predecessor starts a
//!      linear chain. The chain is extended forward for as long as the next
//!      edge can be collapsed.
//!   2. Nodes left over after the first phase form pure cycles where every
//!      node has in- and out-degree 1. Each cycle is walked once from its
//!      lexicographically smallest k-mer and becomes one circular unitig.
//!
//! Both walks are iterative and mark visited nodes as merged, so every raw
//! node ends up in exactly one unitig and cycles terminate.
//!

use crate::graph::Graph;
use crate::graph::GraphFinalized;
use crate::graph::KmerNode;
use crate::graph::NodeId;

use log::info;

type E = Box<dyn std::error::Error>;

impl Graph {
    /// Merge all non-branching paths into unitigs and freeze the graph.
    ///
    /// After this call every node is a unitig with a sequence of length at
    /// least k, node ids are reassigned, [find](Graph::find) no longer
    /// returns anything, and further insertions fail with [GraphFinalized].
    ///
    /// ## Errors
    ///
    /// [GraphFinalized] if the graph has already been simplified.
    ///
    /// ## Usage
    ///
    /// ```rust
    /// use dbgasm::graph::Graph;
    /// use dbgasm::kmer::extract_kmers;
    ///
    /// // ACG branches into CGT and CGA
    /// let mut graph = Graph::new();
    /// graph.add_kmers(extract_kmers("ACGT", 3).unwrap()).unwrap();
    /// graph.add_kmers(extract_kmers("ACGA", 3).unwrap()).unwrap();
    /// graph.simplify().unwrap();
    ///
    /// let mut got: Vec<String> = graph.contigs().into_iter().map(|x| x.sequence).collect();
    /// got.sort();
    /// assert_eq!(got, vec!["ACG", "CGA", "CGT"]);
    /// ```
    ///
    pub fn simplify(
        &mut self,
    ) -> Result<(), E> {
        if self.finalized {
            return Err(Box::new(GraphFinalized{}))
        }
        let starts = self.chain_starts();
        self.compact(&starts);
        Ok(())
    }

    // Node has a single predecessor that has a single successor.
    fn is_absorbable(
        &self,
        id: NodeId,
    ) -> bool {
        let node = &self.nodes[id.0];
        if node.in_degree() != 1 {
            return false
        }
        match node.incoming.first() {
            Some((pred, _)) => *pred != id && self.nodes[pred.0].out_degree() == 1,
            None => false,
        }
    }

    fn absorbable_successor(
        &self,
        id: NodeId,
    ) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        if node.out_degree() != 1 {
            return None
        }
        let (next, _) = node.outgoing.first()?;
        if *next != id && self.nodes[next.0].in_degree() == 1 {
            Some(*next)
        } else {
            None
        }
    }

    fn is_pure_self_loop(
        &self,
        id: NodeId,
    ) -> bool {
        let node = &self.nodes[id.0];
        node.in_degree() == 1 && node.out_degree() == 1 && node.outgoing.contains_key(&id)
    }

    fn chain_starts(&self) -> Vec<NodeId> {
        self.nodes().map(|(id, _)| id).filter(|id| !self.is_absorbable(*id)).collect()
    }

    fn trace_chain(
        &mut self,
        start: NodeId,
    ) -> Vec<NodeId> {
        let mut chain = vec![start];
        self.nodes[start.0].merged = true;

        let mut last = start;
        while let Some(next) = self.absorbable_successor(last) {
            if self.nodes[next.0].merged {
                break;
            }
            self.nodes[next.0].merged = true;
            chain.push(next);
            last = next;
        }

        chain
    }

    fn trace_cycle(
        &mut self,
        start: NodeId,
    ) -> Vec<NodeId> {
        let mut cycle = vec![start];
        self.nodes[start.0].merged = true;

        let mut last = start;
        while let Some((&next, _)) = self.nodes[last.0].outgoing.first() {
            if next == start || self.nodes[next.0].merged {
                break;
            }
            self.nodes[next.0].merged = true;
            cycle.push(next);
            last = next;
        }

        cycle
    }

    fn merge_run(
        &self,
        run: &[NodeId],
        circular: bool,
    ) -> KmerNode {
        let first = &self.nodes[run[0].0];
        let mut sequence = first.sequence.clone();
        let mut total_multiplicity = first.total_multiplicity;
        let mut kmer_count = first.kmer_count;

        run[1..].iter().for_each(|id| {
            let node = &self.nodes[id.0];
            sequence.push_str(&node.sequence[(node.sequence.len() - 1)..]);
            total_multiplicity += node.total_multiplicity;
            kmer_count += node.kmer_count;
        });

        KmerNode{
            sequence,
            multiplicity: first.multiplicity,
            circular,
            kmer_count,
            total_multiplicity,
            ..Default::default()
        }
    }

    fn compact(
        &mut self,
        starts: &[NodeId],
    ) {
        let n_kmers = self.node_count();

        let mut runs: Vec<(Vec<NodeId>, bool)> = Vec::new();
        for start in starts {
            if self.nodes[start.0].merged {
                continue;
            }
            let chain = self.trace_chain(*start);
            let circular = chain.len() == 1 && self.is_pure_self_loop(*start);
            runs.push((chain, circular));
        }
        let n_chains = runs.len();

        // Whatever is left forms cycles without an entry point. Visiting the
        // k-mers in sorted order starts every cycle from its smallest k-mer.
        let mut leftover: Vec<NodeId> = self.nodes().map(|(id, _)| id).collect();
        leftover.sort_by(|a, b| self.nodes[a.0].sequence.cmp(&self.nodes[b.0].sequence));
        for id in leftover {
            if self.nodes[id.0].merged {
                continue;
            }
            let cycle = self.trace_cycle(id);
            info!("Resolved a cycle of {} k-mers starting from {}", cycle.len(), self.nodes[id.0].sequence);
            runs.push((cycle, true));
        }

        let mut owner: Vec<usize> = vec![0; self.nodes.len()];
        runs.iter().enumerate().for_each(|(idx, (run, _))| {
            run.iter().for_each(|id| owner[id.0] = idx);
        });

        let mut unitigs: Vec<KmerNode> = runs.iter().map(|(run, circular)| self.merge_run(run, *circular)).collect();

        // Edges leaving a run start from its last k-mer and always point to
        // the first k-mer of a run.
        runs.iter().enumerate().for_each(|(idx, (run, _))| {
            let last = run[run.len() - 1];
            self.nodes[last.0].outgoing.iter().for_each(|(target, count)| {
                let to = owner[target.0];
                *unitigs[idx].outgoing.entry(NodeId(to)).or_insert(0) += count;
                *unitigs[to].incoming.entry(NodeId(idx)).or_insert(0) += count;
            });
        });

        let n_circular = runs.iter().filter(|(_, circular)| *circular).count();
        info!("Compacted {} k-mers into {} unitigs ({} from chains, {} circular)", n_kmers, unitigs.len(), n_chains, n_circular);

        self.nodes = unitigs;
        self.index.clear();
        self.finalized = true;
    }
}
