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

//! dbgasm is a library and a command-line client for:
//!
//!   - Building a de Bruijn graph from the k-mers of short sequencing reads.
//!   - Compacting the graph into maximal non-branching paths (unitigs).
//!   - Reporting the unitigs as contigs along with assembly statistics.
//!
//! Reads are expected to be strings over the DNA alphabet `ACGT`. Contigs
//! are not canonicalised, a read and its reverse complement produce separate
//! k-mers.
//!
//! ## Usage
//!
//! ### Command line
//!
//! The dbgasm CLI supports the following subcommands:
//!   - `dbgasm assemble` assemble reads from a FASTA or FASTQ file into contigs.
//!   - `dbgasm stats` report the number of contigs, total length, and N50 of
//!     existing contig files.
//!
//! ### Rust API
//!
//! The API provides [assemble] for processing an entire set of reads at
//! once, and [assemble_from_read_to_write] for reading FASTA or FASTQ input
//! from a [Read] and writing the contigs as FASTA to a [Write].
//!
//! For finer control the individual stages are available:
//!
//!   - [extract_kmers](kmer::extract_kmers): iterate over the k-mers of a read.
//!   - [GraphBuilder](graph::builder::GraphBuilder): build a raw [Graph] from reads.
//!   - [Graph::simplify]: compact the graph into unitigs.
//!   - [Graph::contigs]: read the unitigs out as [Contig]s.
//!   - [AssemblyStats](stats::AssemblyStats): count, total length, and N50 of contigs.
//!   - [Printer](printer::Printer): format [Contig]s as FASTA records.
//!
//! See documentation for the appropriate functions or structs for usage examples.
//!

use graph::Graph;
use graph::builder::GraphBuilder;
use stats::AssemblyStats;

use std::io::Read;
use std::io::Write;

pub mod graph;
pub mod kmer;
pub mod printer;
pub mod reads;
pub mod stats;

type E = Box<dyn std::error::Error>;

/// How to handle reads shorter than k.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShortReadPolicy {
    /// Fail with [InvalidKmerLength](kmer::InvalidKmerLength).
    #[default]
    Strict,
    /// Drop the read and continue.
    Skip,
}

impl std::str::FromStr for ShortReadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(ShortReadPolicy::Strict),
            "skip" => Ok(ShortReadPolicy::Skip),
            _ => Err(format!("'{}' is not a valid ShortReadPolicy", s)),
        }
    }
}

/// Parameters of an assembly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyConfig {
    pub k: usize,
    pub short_reads: ShortReadPolicy,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        AssemblyConfig{ k: 15, short_reads: ShortReadPolicy::default() }
    }
}

/// An assembled contig.
///
/// `multiplicity` is the number of times the first k-mer of the contig was
/// observed in the reads and `coverage` the mean multiplicity over all of its
/// k-mers. Contigs read out of a cycle in the graph have `circular` set.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contig {
    pub id: String,
    pub sequence: String,
    pub multiplicity: u32,
    pub coverage: f64,
    pub circular: bool,
}

impl Contig {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Result of [assemble].
#[derive(Debug)]
pub struct Assembly {
    /// Number of distinct k-mers in the raw graph.
    pub raw_nodes: usize,
    /// Number of distinct k-mer transitions in the raw graph.
    pub raw_edges: usize,
    /// The simplified graph.
    pub graph: Graph,
    /// Contigs ordered by length, longest first.
    pub contigs: Vec<Contig>,
    pub stats: AssemblyStats,
}

/// Build the raw de Bruijn graph of `reads`.
///
/// ## Errors
///
/// Terminates with the first error from [GraphBuilder::add_read].
///
pub fn build_graph<I, S>(
    reads: I,
    config: &AssemblyConfig,
) -> Result<Graph, E> where I: IntoIterator<Item = S>, S: AsRef<str> {
    let mut builder = GraphBuilder::new(config.k, config.short_reads.clone())?;
    builder.add_reads(reads)?;
    Ok(builder.build())
}

/// Assemble `reads` into contigs.
///
/// Builds the raw graph, simplifies it, and computes statistics of the
/// resulting contigs. Empty input produces an empty assembly.
///
/// ## Usage
///
/// ```rust
/// use dbgasm::{assemble, AssemblyConfig, ShortReadPolicy};
///
/// let config = AssemblyConfig{ k: 3, short_reads: ShortReadPolicy::Strict };
/// let assembly = assemble(["ACGTAC"], &config).unwrap();
///
/// assert_eq!(assembly.raw_nodes, 4);
/// assert_eq!(assembly.raw_edges, 3);
/// assert_eq!(assembly.contigs.len(), 1);
/// assert_eq!(assembly.contigs[0].sequence, "ACGTAC");
/// assert_eq!(assembly.stats.n50, 6);
/// ```
///
pub fn assemble<I, S>(
    reads: I,
    config: &AssemblyConfig,
) -> Result<Assembly, E> where I: IntoIterator<Item = S>, S: AsRef<str> {
    let mut graph = build_graph(reads, config)?;
    let raw_nodes = graph.node_count();
    let raw_edges = graph.edge_count();

    graph.simplify()?;

    let contigs = graph.contigs();
    let stats = AssemblyStats::compute(&contigs);

    Ok(Assembly{ raw_nodes, raw_edges, graph, contigs, stats })
}

/// Assemble reads from FASTA or FASTQ data in `conn_in` and write contigs to `conn_out`.
///
/// Sequences are converted to uppercase before assembly. Contigs are written
/// as FASTA records wrapped to `line_width` if given.
///
/// ## Usage
///
/// ```rust
/// use dbgasm::{assemble_from_read_to_write, AssemblyConfig};
/// use std::io::Cursor;
///
/// let config = AssemblyConfig{ k: 3, ..Default::default() };
/// let mut input = Cursor::new(b">r1\nACGT\n>r2\nACGA\n".to_vec());
/// let mut output: Vec<u8> = Vec::new();
///
/// let stats = assemble_from_read_to_write(&config, None, &mut input, &mut output).unwrap();
///
/// let expected: Vec<u8> = b">contig1 length=3 multiplicity=2 coverage=2.00\nACG\n>contig2 length=3 multiplicity=1 coverage=1.00\nCGA\n>contig3 length=3 multiplicity=1 coverage=1.00\nCGT\n".to_vec();
/// assert_eq!(output, expected);
/// assert_eq!(stats.count, 3);
/// ```
///
pub fn assemble_from_read_to_write<R: Read + Send, W: Write>(
    config: &AssemblyConfig,
    line_width: Option<usize>,
    conn_in: &mut R,
    conn_out: &mut W,
) -> Result<AssemblyStats, E> {
    let reads = reads::read_fastx(conn_in)?;
    let assembly = assemble(reads.iter().map(|read| &read.bases), config)?;
    printer::write_fasta(&assembly.contigs, line_width, conn_out)?;
    Ok(assembly.stats)
}
