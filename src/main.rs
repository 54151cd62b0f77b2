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
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use flate2::Compression;
use flate2::write::GzEncoder;
use log::error;
use log::info;

use dbgasm::AssemblyConfig;
use dbgasm::ShortReadPolicy;
use dbgasm::stats::AssemblyStats;

mod cli;

type E = Box<dyn std::error::Error>;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init()
    .unwrap();
}

fn open_output(
    out_file: &Option<PathBuf>,
) -> Result<Box<dyn Write>, E> {
    let conn: Box<dyn Write> = match out_file {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };
    Ok(conn)
}

fn assemble(
    input_file: &Path,
    config: &AssemblyConfig,
    out_file: &Option<PathBuf>,
    line_width: Option<usize>,
    gzip: bool,
) -> Result<(), E> {
    info!("Reading {}", input_file.display());
    let reads = dbgasm::reads::read_fastx_file(input_file)?;
    info!("Read {} sequences", reads.len());

    let assembly = dbgasm::assemble(reads.iter().map(|read| &read.bases), config)?;
    info!("Raw graph has {} nodes and {} edges", assembly.raw_nodes, assembly.raw_edges);
    info!("Simplified {}", assembly.graph);
    info!("{}", assembly.stats);

    let mut conn_out = open_output(out_file)?;
    if gzip {
        let mut encoder = GzEncoder::new(conn_out, Compression::default());
        dbgasm::printer::write_fasta(&assembly.contigs, line_width, &mut encoder)?;
        encoder.finish()?.flush()?;
    } else {
        dbgasm::printer::write_fasta(&assembly.contigs, line_width, &mut conn_out)?;
    }
    Ok(())
}

fn contig_stats(
    input_file: &Path,
) -> Result<(AssemblyStats, usize), E> {
    let contigs = dbgasm::reads::read_fastx_file(input_file)?;
    let lengths: Vec<usize> = contigs.iter().map(|contig| contig.bases.len()).collect();
    let n90 = dbgasm::stats::nx(&lengths, 90);
    Ok((AssemblyStats::from_lengths(&lengths), n90))
}

fn main() {
    let cli = cli::Cli::parse();

    // Subcommands:
    let res = match &cli.command {
        // Assemble
        Some(cli::Commands::Assemble {
            input_file,
            kmer_length,
            out_file,
            skip_short_reads,
            line_width,
            gzip,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });

            let config = AssemblyConfig{
                k: *kmer_length,
                short_reads: if *skip_short_reads { ShortReadPolicy::Skip } else { ShortReadPolicy::Strict },
            };
            assemble(input_file, &config, out_file, *line_width, *gzip)
        },

        // Stats
        Some(cli::Commands::Stats {
            input_files,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });

            println!("file\tcontigs\ttotal_length\tlongest\tN50\tN90");
            input_files.iter().try_for_each(|file| {
                let (stats, n90) = contig_stats(file)?;
                println!("{}\t{}\t{}\t{}\t{}\t{}", file.display(), stats.count, stats.total_length, stats.longest, stats.n50, n90);
                Ok::<(), E>(())
            })
        },

        None => Ok(()),
    };

    if let Err(e) = res {
        error!("{}", e);
        std::process::exit(1);
    }
}
