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

//! Reading sequences from FASTA or FASTQ input.
//!
//! Parsing is handled by [needletail](https://docs.rs/needletail), so input
//! may be gzip compressed. Sequences are converted to uppercase and header
//! lines are kept as the read name.
//!

use std::io::Read;
use std::path::Path;

use needletail::errors::ParseErrorKind;
use needletail::parser::FastxReader;

type E = Box<dyn std::error::Error>;

/// A named sequence read.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SequenceRead {
    pub name: String,
    pub bases: String,
}

impl std::fmt::Display for SequenceRead {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.bases.len() > 20 {
            write!(f, "{}: {}...", self.name, &self.bases[0..20])
        } else {
            write!(f, "{}: {}", self.name, self.bases)
        }
    }
}

fn collect_records(
    mut reader: Box<dyn FastxReader + '_>,
) -> Result<Vec<SequenceRead>, E> {
    let mut reads: Vec<SequenceRead> = Vec::new();
    while let Some(record) = reader.next() {
        let record = record?;
        let name = record.id().iter().map(|x| *x as char).collect::<String>();
        let bases = record.seq().iter().map(|x| x.to_ascii_uppercase() as char).collect::<String>();
        reads.push(SequenceRead{ name, bases });
    }
    Ok(reads)
}

/// Read all records from a FASTA or FASTQ stream.
///
/// Empty input returns an empty vector.
///
/// ## Usage
///
/// ```rust
/// use dbgasm::reads::read_fastx;
/// use std::io::Cursor;
///
/// let input = Cursor::new(b">r1\nACGT\nAC\n>r2\nacga\n".to_vec());
/// let reads = read_fastx(input).unwrap();
///
/// assert_eq!(reads.len(), 2);
/// assert_eq!(reads[0].bases, "ACGTAC");
/// assert_eq!(reads[1].bases, "ACGA");
/// ```
///
pub fn read_fastx<R: Read + Send>(
    conn: R,
) -> Result<Vec<SequenceRead>, E> {
    match needletail::parse_fastx_reader(conn) {
        Ok(reader) => collect_records(reader),
        Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => Ok(Vec::new()),
        Err(e) => Err(Box::new(e)),
    }
}

/// Read all records from a FASTA or FASTQ file.
pub fn read_fastx_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<SequenceRead>, E> {
    match needletail::parse_fastx_file(path) {
        Ok(reader) => collect_records(reader),
        Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => Ok(Vec::new()),
        Err(e) => Err(Box::new(e)),
    }
}
