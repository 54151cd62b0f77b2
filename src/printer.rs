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

//! Printer for outputting [Contig] records as FASTA.
//!
//! Can be used to convert any iterator over [Contig] records to their plain
//! text representation. Returns 1 record at a time using next(), or the error
//! that prevented formatting the record.
//!
//! ## Usage
//!
//! ```rust
//! use dbgasm::Contig;
//! use dbgasm::printer::Printer;
//!
//! let data = vec![
//!     Contig{ id: "contig1".to_string(), sequence: "ACGTAC".to_string(), multiplicity: 2, coverage: 1.5, circular: false },
//!     Contig{ id: "contig2".to_string(), sequence: "ACGAC".to_string(), multiplicity: 1, coverage: 1.0, circular: true },
//! ];
//!
//! let mut iter = data.into_iter();
//! let mut printer = Printer::new(&mut iter, Some(4));
//!
//! let mut output: Vec<u8> = Vec::new();
//! for record in printer.by_ref() {
//!     output.append(&mut record.unwrap());
//! }
//!
//! let mut expected: Vec<u8> = Vec::new();
//! expected.append(&mut b">contig1 length=6 multiplicity=2 coverage=1.50\nACGT\nAC\n".to_vec());
//! expected.append(&mut b">contig2 length=5 multiplicity=1 coverage=1.00 circular\nACGA\nC\n".to_vec());
//!
//! assert_eq!(output, expected);
//! ```
//!

use crate::Contig;

use std::io::Write;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct FastaPrinterError;

impl std::fmt::Display for FastaPrinterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "contig has an empty identifier")
    }
}

impl std::error::Error for FastaPrinterError {}

/// Format a single contig as a FASTA record.
///
/// Writes the header line followed by the sequence to `conn`. If
/// `line_width` is given the sequence is wrapped to lines of at most that
/// many symbols.
///
/// Terminates with a [FastaPrinterError] if [Contig::id] is empty.
///
pub fn format_fasta_record<W: Write>(
    contig: &Contig,
    line_width: Option<usize>,
    conn: &mut W,
) -> Result<(), E> {
    if contig.id.is_empty() {
        return Err(Box::new(FastaPrinterError{}))
    }

    let mut formatted: String = String::new();
    formatted += &format!(">{} length={} multiplicity={} coverage={:.2}", contig.id, contig.sequence.len(), contig.multiplicity, contig.coverage);
    if contig.circular {
        formatted += " circular";
    }
    formatted += "\n";

    match line_width {
        Some(width) if width > 0 => {
            contig.sequence.as_bytes().chunks(width).for_each(|line| {
                formatted += &line.iter().map(|x| *x as char).collect::<String>();
                formatted += "\n";
            });
        },
        _ => {
            formatted += &contig.sequence;
            formatted += "\n";
        },
    }

    conn.write_all(formatted.as_bytes())?;
    Ok(())
}

/// Write all `contigs` as FASTA records to `conn`.
///
/// ## Usage
///
/// ```rust
/// use dbgasm::Contig;
/// use dbgasm::printer::write_fasta;
///
/// let data = vec![
///     Contig{ id: "contig1".to_string(), sequence: "ACGTAC".to_string(), multiplicity: 1, coverage: 1.0, circular: false },
/// ];
///
/// let mut output: Vec<u8> = Vec::new();
/// write_fasta(&data, None, &mut output).unwrap();
///
/// assert_eq!(output, b">contig1 length=6 multiplicity=1 coverage=1.00\nACGTAC\n".to_vec());
/// ```
///
pub fn write_fasta<W: Write>(
    contigs: &[Contig],
    line_width: Option<usize>,
    conn: &mut W,
) -> Result<(), E> {
    let mut records = contigs.iter().cloned();
    for record in Printer::new(&mut records, line_width) {
        conn.write_all(&record?)?;
    }
    conn.flush()?;
    Ok(())
}

pub struct Printer<'a, I: Iterator> where I: Iterator<Item=Contig> {
    records: &'a mut I,
    line_width: Option<usize>,
}

impl<'a, I: Iterator> Printer<'a, I> where I: Iterator<Item=Contig> {
    pub fn new(
        records: &'a mut I,
        line_width: Option<usize>,
    ) -> Self {
        Printer{ records, line_width }
    }
}

impl<I: Iterator> Iterator for Printer<'_, I> where I: Iterator<Item=Contig> {
    type Item = Result<Vec<u8>, E>;

    fn next(
        &mut self,
    ) -> Option<Result<Vec<u8>, E>> {
        let contig = self.records.next()?;
        let mut out: Vec<u8> = Vec::new();
        match format_fasta_record(&contig, self.line_width, &mut out) {
            Ok(()) => Some(Ok(out)),
            Err(e) => Some(Err(e)),
        }
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn format_fasta_record_single_line() {
        use crate::Contig;
        use super::format_fasta_record;

        let data = Contig{ id: "contig1".to_string(), sequence: "ACGTAC".to_string(), multiplicity: 1, coverage: 1.0, circular: false };
        let expected: Vec<u8> = b">contig1 length=6 multiplicity=1 coverage=1.00\nACGTAC\n".to_vec();

        let mut got: Vec<u8> = Vec::new();
        format_fasta_record(&data, None, &mut got).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn format_fasta_record_wrapped() {
        use crate::Contig;
        use super::format_fasta_record;

        let data = Contig{ id: "contig3".to_string(), sequence: "ACGTACGT".to_string(), multiplicity: 4, coverage: 2.25, circular: false };
        let expected: Vec<u8> = b">contig3 length=8 multiplicity=4 coverage=2.25\nACG\nTAC\nGT\n".to_vec();

        let mut got: Vec<u8> = Vec::new();
        format_fasta_record(&data, Some(3), &mut got).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn format_fasta_record_exact_width() {
        use crate::Contig;
        use super::format_fasta_record;

        let data = Contig{ id: "contig1".to_string(), sequence: "ACGT".to_string(), multiplicity: 1, coverage: 1.0, circular: true };
        let expected: Vec<u8> = b">contig1 length=4 multiplicity=1 coverage=1.00 circular\nACGT\n".to_vec();

        let mut got: Vec<u8> = Vec::new();
        format_fasta_record(&data, Some(4), &mut got).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn record_error_if_no_id() {
        use crate::Contig;
        use super::format_fasta_record;

        let data = Contig{ id: String::new(), sequence: "ACGT".to_string(), multiplicity: 1, coverage: 1.0, circular: false };

        let got = format_fasta_record(&data, None, &mut Vec::new());

        assert!(got.is_err());
    }

    #[test]
    fn printer_yields_one_record_per_contig() {
        use crate::Contig;
        use super::Printer;

        let data = vec![
            Contig{ id: "contig1".to_string(), sequence: "ACGT".to_string(), multiplicity: 1, coverage: 1.0, circular: false },
            Contig{ id: "contig2".to_string(), sequence: "TTT".to_string(), multiplicity: 3, coverage: 3.0, circular: false },
        ];
        let mut iter = data.into_iter();

        let got: Vec<Vec<u8>> = Printer::new(&mut iter, None).map(|x| x.unwrap()).collect();

        assert_eq!(got.len(), 2);
        assert_eq!(got[1], b">contig2 length=3 multiplicity=3 coverage=3.00\nTTT\n".to_vec());
    }

    #[test]
    fn write_fasta_stops_at_first_error() {
        use crate::Contig;
        use super::write_fasta;

        let data = vec![
            Contig{ id: "contig1".to_string(), sequence: "ACGT".to_string(), multiplicity: 1, coverage: 1.0, circular: false },
            Contig{ id: String::new(), sequence: "TTT".to_string(), multiplicity: 1, coverage: 1.0, circular: false },
        ];

        let mut got: Vec<u8> = Vec::new();
        let res = write_fasta(&data, None, &mut got);

        assert!(res.is_err());
        assert_eq!(got, b">contig1 length=4 multiplicity=1 coverage=1.00\nACGT\n".to_vec());
    }

    #[test]
    fn printer_reports_record_without_id() {
        use crate::Contig;
        use super::FastaPrinterError;
        use super::Printer;

        let data = vec![
            Contig{ id: "contig1".to_string(), sequence: "ACGT".to_string(), multiplicity: 1, coverage: 1.0, circular: false },
            Contig{ id: String::new(), sequence: "TTT".to_string(), multiplicity: 1, coverage: 1.0, circular: false },
            Contig{ id: "contig3".to_string(), sequence: "GG".to_string(), multiplicity: 1, coverage: 1.0, circular: false },
        ];
        let mut iter = data.into_iter();

        let got: Vec<Result<Vec<u8>, Box<dyn std::error::Error>>> = Printer::new(&mut iter, None).collect();

        assert_eq!(got.len(), 3);
        assert!(got[0].is_ok());
        assert!(got[1].as_ref().unwrap_err().downcast_ref::<FastaPrinterError>().is_some());
        assert_eq!(got[2].as_ref().unwrap(), &b">contig3 length=2 multiplicity=1 coverage=1.00\nGG\n".to_vec());
    }

    #[test]
    fn printer_empty() {
        use crate::Contig;
        use super::Printer;

        let mut iter = Vec::<Contig>::new().into_iter();
        let mut printer = Printer::new(&mut iter, Some(60));

        assert!(printer.next().is_none());
    }
}
