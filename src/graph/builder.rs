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

//! Building a raw [Graph] from reads.
//!
//! ## Usage
//!
//! ```rust
//! use dbgasm::ShortReadPolicy;
//! use dbgasm::graph::builder::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new(3, ShortReadPolicy::Skip).unwrap();
//! builder.add_reads(["ACGT", "ACGA", "AC"]).unwrap();
//! assert_eq!(builder.reads_skipped(), 1);
//!
//! let graph = builder.build();
//! assert_eq!(graph.to_string(), "DBG(3) with 3 nodes and 2 edges");
//! ```
//!

use crate::ShortReadPolicy;
use crate::graph::Graph;
use crate::kmer::InvalidKmerLength;
use crate::kmer::extract_read_kmers;

use log::info;

type E = Box<dyn std::error::Error>;

pub struct GraphBuilder {
    graph: Graph,
    k: usize,
    policy: ShortReadPolicy,

    n_reads: usize,
    n_skipped: usize,
}

impl GraphBuilder {
    /// Start building a graph of k-mers of length `k`.
    ///
    /// Returns [InvalidKmerLength] if `k` is 0.
    pub fn new(
        k: usize,
        policy: ShortReadPolicy,
    ) -> Result<Self, E> {
        if k == 0 {
            return Err(Box::new(InvalidKmerLength{ k, read_index: None, length: 0 }))
        }
        Ok(GraphBuilder{
            graph: Graph::with_kmer_len(k), k, policy,
            n_reads: 0, n_skipped: 0,
        })
    }

    /// Add the k-mers of the next read.
    ///
    /// Reads are numbered in the order they are added, including skipped
    /// reads, and errors refer to this number.
    ///
    /// ## Errors
    ///
    /// [InvalidKmerLength] if the read is shorter than k and the policy is
    /// [ShortReadPolicy::Strict], [InvalidSymbol](crate::kmer::InvalidSymbol)
    /// if the read contains symbols other than A, C, G or T.
    ///
    pub fn add_read(
        &mut self,
        sequence: &str,
    ) -> Result<(), E> {
        let read_index = self.n_reads;
        self.n_reads += 1;

        if sequence.len() < self.k && self.policy == ShortReadPolicy::Skip {
            info!("Skipping read {} of length {} < k={}", read_index, sequence.len(), self.k);
            self.n_skipped += 1;
            return Ok(())
        }

        let kmers = extract_read_kmers(read_index, sequence, self.k)?;
        self.graph.add_kmers(kmers)
    }

    pub fn add_reads<I, S>(
        &mut self,
        reads: I,
    ) -> Result<(), E> where I: IntoIterator<Item = S>, S: AsRef<str> {
        for read in reads {
            self.add_read(read.as_ref())?;
        }
        Ok(())
    }

    pub fn reads_added(&self) -> usize {
        self.n_reads
    }

    pub fn reads_skipped(&self) -> usize {
        self.n_skipped
    }

    /// Finish building and return the raw graph.
    pub fn build(self) -> Graph {
        if self.n_skipped > 0 {
            info!("Skipped {} of {} reads shorter than k={}", self.n_skipped, self.n_reads, self.k);
        }
        info!("Built {}", self.graph);
        self.graph
    }
}
