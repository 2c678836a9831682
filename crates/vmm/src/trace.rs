use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::IntErrorKind;
use std::path::Path;

use log::warn;
use pagesim_error::{errinput, errrange, Error};

use crate::typedef::{AccessType, PageId};
use crate::Result;

/// The first line of a trace: the size of the virtual address space and of physical memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceHeader {
    pub num_pages: usize,
    pub num_frames: usize,
}

/// One trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    pub page: PageId,
    pub access_type: AccessType,
}

impl Access {
    pub fn new(page: PageId, access_type: AccessType) -> Self {
        Self { page, access_type }
    }
}

/// Reads a trace of the form
///
/// ```text
/// <num_pages> <num_frames>
/// <page> <r|w>
/// <page> <r|w>
/// ...
/// ```
///
/// Blank lines are skipped. The first malformed record ends the trace, like running out of
/// input does. A well-formed integer page index outside `[0, num_pages)`, including one too
/// large for `i64`, is not malformed; it is reported as an out-of-range access.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    header: TraceHeader,
    line: String,
    line_no: usize,
    done: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace file at `path` and reads its header.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            Error::IO(format!(
                "Unable to open trace {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::new(BufReader::new(file))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps `reader` and consumes the header line.
    pub fn new(mut reader: R) -> Result<Self> {
        let mut line = String::new();
        let mut line_no = 0;
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return errinput!("trace is missing its '<num_pages> <num_frames>' header");
            }
            line_no += 1;
            if !line.trim().is_empty() {
                break;
            }
        }

        let header = Self::parse_header(line.trim())?;
        Ok(Self {
            reader,
            header,
            line,
            line_no,
            done: false,
        })
    }

    pub fn header(&self) -> TraceHeader {
        self.header
    }

    fn parse_header(line: &str) -> Result<TraceHeader> {
        let mut tokens = line.split_whitespace();
        let mut next_count = |what: &str| -> Result<usize> {
            let token = match tokens.next() {
                Some(token) => token,
                None => return errinput!("trace header is missing {}", what),
            };
            token
                .parse()
                .map_err(|e| Error::InvalidInput(format!("bad {} '{}': {}", what, token, e)))
        };
        let num_pages = next_count("number of pages")?;
        let num_frames = next_count("number of frames")?;
        Ok(TraceHeader {
            num_pages,
            num_frames,
        })
    }

    /// Splits a record into its raw page index and access type.
    fn parse_record(line: &str) -> Option<(i64, AccessType)> {
        let mut tokens = line.split_whitespace();
        let page = Self::parse_page(tokens.next()?)?;
        let mut access = tokens.next()?.chars();
        let access_type = AccessType::from_char(access.next()?)?;
        if access.next().is_some() {
            return None;
        }
        Some((page, access_type))
    }

    /// Parses a page index, saturating integers that overflow `i64` so they still surface as
    /// out-of-range accesses.
    fn parse_page(token: &str) -> Option<i64> {
        match token.parse::<i64>() {
            Ok(page) => Some(page),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Some(i64::MAX),
                IntErrorKind::NegOverflow => Some(i64::MIN),
                _ => None,
            },
        }
    }

    fn to_access(&self, page: i64, access_type: AccessType) -> Result<Access> {
        match PageId::try_from(page) {
            Ok(index) if index < self.header.num_pages => Ok(Access::new(index, access_type)),
            _ => errrange!(page, self.header.num_pages),
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<Access>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => self.line_no += 1,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }

            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }
            return match Self::parse_record(line) {
                Some((page, access_type)) => Some(self.to_access(page, access_type)),
                None => {
                    warn!(
                        "Malformed trace record on line {}: {:?}; ignoring the rest of the trace",
                        self.line_no, line
                    );
                    self.done = true;
                    None
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn read_all(input: &str) -> (TraceHeader, Vec<Result<Access>>) {
        let reader = TraceReader::new(input.as_bytes()).unwrap();
        let header = reader.header();
        (header, reader.collect())
    }

    #[test]
    fn test_read_header_and_records() {
        let (header, records) = read_all("3 2\n0 r\n1 w\n2 r\n");
        assert_eq!(
            TraceHeader {
                num_pages: 3,
                num_frames: 2
            },
            header
        );
        assert_eq!(
            vec![
                Ok(Access::new(0, AccessType::Read)),
                Ok(Access::new(1, AccessType::Write)),
                Ok(Access::new(2, AccessType::Read)),
            ],
            records
        );
    }

    #[test]
    fn test_blank_lines_and_missing_trailing_newline() {
        let (_, records) = read_all("\n4 1\n\n3 w\n\n  1   r");
        assert_eq!(
            vec![
                Ok(Access::new(3, AccessType::Write)),
                Ok(Access::new(1, AccessType::Read)),
            ],
            records
        );
    }

    #[test]
    fn test_malformed_record_ends_trace() {
        let (_, records) = read_all("4 2\n0 r\nx w\n1 r\n");
        assert_eq!(vec![Ok(Access::new(0, AccessType::Read))], records);

        let (_, records) = read_all("4 2\n0 r\n1 q\n1 r\n");
        assert_eq!(1, records.len());

        let (_, records) = read_all("4 2\n0\n1 r\n");
        assert!(records.is_empty());

        let (_, records) = read_all("4 2\n0 rw\n");
        assert!(records.is_empty());
    }

    #[test]
    fn test_negative_page_is_out_of_range() {
        let (_, records) = read_all("4 2\n-1 r\n");
        assert_eq!(
            vec![Err(Error::PageOutOfRange {
                page: -1,
                num_pages: 4
            })],
            records
        );
    }

    #[test]
    fn test_huge_page_is_out_of_range() {
        let (_, records) = read_all("3 2\n0 r\n99999999999999999999 r\n1 r\n");
        assert_eq!(
            vec![
                Ok(Access::new(0, AccessType::Read)),
                Err(Error::PageOutOfRange {
                    page: i64::MAX,
                    num_pages: 3
                }),
                Ok(Access::new(1, AccessType::Read)),
            ],
            records
        );

        let (_, records) = read_all("3 2\n-99999999999999999999 w\n");
        assert_eq!(
            vec![Err(Error::PageOutOfRange {
                page: i64::MIN,
                num_pages: 3
            })],
            records
        );

        let (_, records) = read_all("3 2\n3 r\n");
        assert_eq!(
            vec![Err(Error::PageOutOfRange {
                page: 3,
                num_pages: 3
            })],
            records
        );
    }

    #[test]
    fn test_bad_header() {
        assert!(matches!(
            TraceReader::new("".as_bytes()),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            TraceReader::new("8\n0 r\n".as_bytes()),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            TraceReader::new("eight 2\n".as_bytes()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    #[serial]
    fn test_from_path() {
        let path = std::env::temp_dir().join("pagesim_test_trace.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "2 1\n1 w\n0 r").unwrap();
        }
        let reader = TraceReader::from_path(&path).unwrap();
        assert_eq!(2, reader.header().num_pages);
        let records: Vec<Access> = reader.map(|r| r.unwrap()).collect();
        assert_eq!(
            vec![
                Access::new(1, AccessType::Write),
                Access::new(0, AccessType::Read)
            ],
            records
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    #[serial]
    fn test_from_missing_path() {
        let path = std::env::temp_dir().join("pagesim_test_trace_missing.txt");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            TraceReader::from_path(&path),
            Err(Error::IO(_))
        ));
    }
}
