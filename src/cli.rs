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
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // Assemble reads into contigs
    Assemble {
        // Input fasta or fastq sequence file
        #[arg(group = "input", required = true, help = "Input reads")]
        input_file: PathBuf,

        // k-mer length
        #[arg(short = 'k', long = "kmer-length", default_value_t = 15)]
        kmer_length: usize,

        // Output file path, defaults to stdout
        #[arg(short = 'o', long = "output", required = false)]
        out_file: Option<PathBuf>,

        // Skip reads shorter than k instead of failing
        #[arg(long = "skip-short-reads", default_value_t = false)]
        skip_short_reads: bool,

        // Wrap output sequences to this many characters per line
        #[arg(long = "line-width", required = false)]
        line_width: Option<usize>,

        // Compress output with gzip
        #[arg(long = "gzip", default_value_t = false)]
        gzip: bool,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Report statistics of assembled contigs
    Stats {
        // Input fasta file(s)
        #[arg(group = "input", required = true, help = "Input contig file(s)")]
        input_files: Vec<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },
}
