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

//! Extracting overlapping k-mers from a sequence.
//!
//! [Kmers] is a lazy sliding window of length `k` and stride 1 over a
//! validated sequence. The iterator borrows the sequence and can be cloned to
//! restart the extraction from the beginning.
//!
//! ## Usage
//!
//! ```rust
//! use dbgasm::kmer::extract_kmers;
//!
//! let kmers = extract_kmers("ACGTAC", 3).unwrap();
//! assert_eq!(kmers.collect::<Vec<&str>>(), vec!["ACG", "CGT", "GTA", "TAC"]);
//! ```
//!

type E = Box<dyn std::error::Error>;

/// Symbols accepted in reads.
pub const ALPHABET: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// `k` is zero or longer than the sequence it is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKmerLength {
    pub k: usize,
    pub read_index: Option<usize>,
    pub length: usize,
}

impl std::fmt::Display for InvalidKmerLength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.k == 0 {
            return write!(f, "k-mer length must be at least 1")
        }
        match self.read_index {
            Some(idx) => write!(f, "read {} has length {} which is shorter than k={}", idx, self.length, self.k),
            None => write!(f, "sequence has length {} which is shorter than k={}", self.length, self.k),
        }
    }
}

impl std::error::Error for InvalidKmerLength {}

/// A sequence contains a symbol outside of [ALPHABET].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSymbol {
    pub read_index: Option<usize>,
    pub position: usize,
    pub symbol: char,
}

impl std::fmt::Display for InvalidSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.read_index {
            Some(idx) => write!(f, "invalid symbol '{}' at position {} in read {}", self.symbol, self.position, idx),
            None => write!(f, "invalid symbol '{}' at position {}", self.symbol, self.position),
        }
    }
}

impl std::error::Error for InvalidSymbol {}

/// Sliding window over a sequence.
#[derive(Debug, Clone)]
pub struct Kmers<'a> {
    sequence: &'a str,
    k: usize,
    pos: usize,
}

impl<'a> Kmers<'a> {
    /// Length of the k-mers produced.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The sequence the k-mers are taken from.
    pub fn sequence(&self) -> &'a str {
        self.sequence
    }
}

impl<'a> Iterator for Kmers<'a> {
    type Item = &'a str;

    fn next(
        &mut self,
    ) -> Option<&'a str> {
        if self.pos + self.k > self.sequence.len() {
            return None
        }
        let kmer = &self.sequence[self.pos..(self.pos + self.k)];
        self.pos += 1;
        Some(kmer)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.sequence.len() + 1).saturating_sub(self.pos + self.k);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Kmers<'_> {}

fn check_sequence(
    read_index: Option<usize>,
    sequence: &str,
    k: usize,
) -> Result<(), E> {
    if k == 0 || sequence.len() < k {
        return Err(Box::new(InvalidKmerLength{ k, read_index, length: sequence.len() }))
    }
    if let Some(position) = sequence.bytes().position(|x| !ALPHABET.contains(&x)) {
        let symbol = sequence[position..].chars().next().unwrap_or('?');
        return Err(Box::new(InvalidSymbol{ read_index, position, symbol }))
    }
    Ok(())
}

/// Extract all k-mers of length `k` from `sequence`.
///
/// Yields exactly `sequence.len() - k + 1` k-mers in left to right order.
/// Repeated k-mers are yielded once per occurrence.
///
/// ## Errors
///
/// Returns [InvalidKmerLength] if `k` is 0 or longer than `sequence`, and
/// [InvalidSymbol] if `sequence` contains anything else than A, C, G or T.
///
pub fn extract_kmers(
    sequence: &str,
    k: usize,
) -> Result<Kmers<'_>, E> {
    check_sequence(None, sequence, k)?;
    Ok(Kmers{ sequence, k, pos: 0 })
}

/// Same as [extract_kmers] but records `read_index` in the errors.
pub fn extract_read_kmers(
    read_index: usize,
    sequence: &str,
    k: usize,
) -> Result<Kmers<'_>, E> {
    check_sequence(Some(read_index), sequence, k)?;
    Ok(Kmers{ sequence, k, pos: 0 })
}
