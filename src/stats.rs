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

//! Assembly quality statistics.
//!
//! ## Usage
//!
//! ```rust
//! use dbgasm::stats::AssemblyStats;
//!
//! let stats = AssemblyStats::from_lengths(&[8, 5, 3, 1]);
//! assert_eq!(stats.count, 4);
//! assert_eq!(stats.total_length, 17);
//! assert_eq!(stats.n50, 5);
//! ```
//!

use crate::Contig;

/// Summary statistics of a set of contigs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub count: usize,
    pub total_length: usize,
    pub longest: usize,
    pub n50: usize,
}

impl AssemblyStats {
    pub fn compute(
        contigs: &[Contig],
    ) -> Self {
        let lengths: Vec<usize> = contigs.iter().map(|contig| contig.sequence.len()).collect();
        AssemblyStats::from_lengths(&lengths)
    }

    pub fn from_lengths(
        lengths: &[usize],
    ) -> Self {
        AssemblyStats{
            count: lengths.len(),
            total_length: lengths.iter().sum(),
            longest: lengths.iter().copied().max().unwrap_or(0),
            n50: n50(lengths),
        }
    }
}

impl std::fmt::Display for AssemblyStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} contigs, total length {}, longest {}, N50 {}", self.count, self.total_length, self.longest, self.n50)
    }
}

/// Nx of a set of contig lengths.
///
/// Sorts the lengths in descending order and returns the length at which the
/// cumulative sum first reaches `x` percent of the total length. Returns 0
/// for an empty input.
///
/// Panics if `x` is greater than 100.
///
pub fn nx(
    lengths: &[usize],
    x: usize,
) -> usize {
    assert!(x <= 100);

    let mut sorted = lengths.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let total: usize = sorted.iter().sum();
    let mut cumulative = 0;
    for length in sorted {
        cumulative += length;
        if cumulative * 100 >= total * x {
            return length
        }
    }
    0
}

/// N50 of a set of contig lengths, see [nx].
pub fn n50(
    lengths: &[usize],
) -> usize {
    nx(lengths, 50)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn n50_example() {
        use super::n50;

        // 8 < 8.5 <= 8 + 5
        assert_eq!(n50(&[8, 5, 3, 1]), 5);
        assert_eq!(n50(&[1, 3, 8, 5]), 5);
    }

    #[test]
    fn n50_exactly_half() {
        use super::n50;

        assert_eq!(n50(&[5, 5]), 5);
        assert_eq!(n50(&[6, 4, 2]), 6);
        assert_eq!(n50(&[5, 4, 2]), 4);
    }

    #[test]
    fn n50_single_contig() {
        use super::n50;

        assert_eq!(n50(&[42]), 42);
    }

    #[test]
    fn n50_empty() {
        use super::n50;

        assert_eq!(n50(&[]), 0);
    }

    #[test]
    fn nx_bounds() {
        use super::nx;

        let lengths = [10, 7, 2, 1];
        assert_eq!(nx(&lengths, 0), 10);
        assert_eq!(nx(&lengths, 50), 10);
        assert_eq!(nx(&lengths, 90), 2);
        assert_eq!(nx(&lengths, 100), 1);
    }

    #[test]
    fn n50_does_not_decrease_when_merging() {
        use super::n50;

        // Same total length, length concentrated into fewer contigs.
        let splits: Vec<Vec<usize>> = vec![
            vec![1; 20],
            vec![2; 10],
            vec![5, 5, 5, 2, 2, 1],
            vec![10, 5, 5],
            vec![15, 5],
            vec![20],
        ];
        splits.iter().for_each(|x| assert_eq!(x.iter().sum::<usize>(), 20));

        let got: Vec<usize> = splits.iter().map(|x| n50(x)).collect();
        got.windows(2).for_each(|pair| assert!(pair[0] <= pair[1]));
    }

    #[test]
    fn compute_from_contigs() {
        use super::AssemblyStats;
        use crate::Contig;

        let contigs: Vec<Contig> = ["ACGTACGT", "ACGTA", "ACG", "A"].iter().enumerate().map(|(idx, seq)| {
            Contig{ id: format!("contig{}", idx + 1), sequence: seq.to_string(), multiplicity: 1, coverage: 1.0, circular: false }
        }).collect();

        let got = AssemblyStats::compute(&contigs);
        let expected = AssemblyStats{ count: 4, total_length: 17, longest: 8, n50: 5 };

        assert_eq!(got, expected);
    }

    #[test]
    fn compute_empty() {
        use super::AssemblyStats;

        let got = AssemblyStats::compute(&[]);

        assert_eq!(got, AssemblyStats{ count: 0, total_length: 0, longest: 0, n50: 0 });
        assert_eq!(got.to_string(), "0 contigs, total length 0, longest 0, N50 0");
    }
}
