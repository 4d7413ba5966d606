use crate::error::{EngineError, RecordError, Result};
use crate::model::RawRecord;
use csv::{Reader, ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streaming reader over the customer CSV.
///
/// The header row is consumed on construction. Every later call to
/// [`RecordSource::next_record`] yields one row, end-of-data, or a per-line read
/// error that the caller may skip.
pub struct RecordSource<R> {
    reader: Reader<R>,
    exhausted: bool,
}

impl RecordSource<File> {
    /// Open `path` with a read buffer of `buffer_size` bytes.
    ///
    /// # Errors
    /// Returns `EngineError::Open` when the file cannot be opened and
    /// `EngineError::Header` when the header row cannot be read.
    pub fn open(path: &Path, buffer_size: usize) -> Result<Self> {
        let file = File::open(path).map_err(|source| EngineError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file, buffer_size)
    }
}

impl<R: Read> RecordSource<R> {
    /// Wrap `input` and skip its header row. Zero-byte input is not an error.
    ///
    /// # Errors
    /// Returns `EngineError::Header` when the header row cannot be read.
    pub fn new(input: R, buffer_size: usize) -> Result<Self> {
        // Row shape is judged per record by the extractor, so the reader stays flexible.
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .buffer_capacity(buffer_size.max(1))
            .from_reader(input);

        let mut header = StringRecord::new();
        let has_header = reader.read_record(&mut header).map_err(EngineError::Header)?;

        Ok(Self {
            reader,
            exhausted: !has_header,
        })
    }

    /// Read the next data row.
    ///
    /// Returns `Ok(None)` at end of data. A `RecordError::Read` covers only the
    /// offending line; reading may continue afterwards. An I/O failure of the
    /// underlying stream is reported once and then treated as end of data.
    pub fn next_record(&mut self) -> std::result::Result<Option<RawRecord>, RecordError> {
        if self.exhausted {
            return Ok(None);
        }

        let mut fields = StringRecord::new();
        match self.reader.read_record(&mut fields) {
            Ok(true) => {
                let line = fields.position().map_or(0, csv::Position::line);
                Ok(Some(RawRecord::new(line, fields)))
            }
            Ok(false) => {
                self.exhausted = true;
                Ok(None)
            }
            Err(err) => {
                if err.is_io_error() {
                    self.exhausted = true;
                }
                // I/O errors carry no position; fall back to where the reader stopped.
                let line = err
                    .position()
                    .map_or_else(|| self.reader.position().line(), csv::Position::line);
                Err(RecordError::Read {
                    line,
                    message: err.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const HEADER: &str = "first_name,last_name,email,gender,ip_address\n";

    fn drain<R: Read>(source: &mut RecordSource<R>) -> (Vec<RawRecord>, Vec<RecordError>) {
        let mut records = Vec::new();
        let mut errors = Vec::new();
        loop {
            match source.next_record() {
                Ok(Some(record)) => records.push(record),
                Ok(None) => break,
                Err(err) => errors.push(err),
            }
        }
        (records, errors)
    }

    #[test]
    fn test_header_is_skipped() {
        let input = format!("{HEADER}Mildred,Hernandez,mh@github.io,Female,38.194.51.128\n");
        let mut source = RecordSource::new(Cursor::new(input), 64).unwrap();

        let (records, errors) = drain(&mut source);
        assert!(errors.is_empty());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(2), Some("mh@github.io"));
        assert_eq!(records[0].line(), 2);
    }

    #[test]
    fn test_zero_bytes_is_end_of_data() {
        let mut source = RecordSource::new(Cursor::new(Vec::<u8>::new()), 64).unwrap();
        assert_eq!(source.next_record().unwrap(), None);
        assert_eq!(source.next_record().unwrap(), None);
    }

    #[test]
    fn test_header_only_is_end_of_data() {
        let mut source = RecordSource::new(Cursor::new(HEADER), 64).unwrap();
        assert_eq!(source.next_record().unwrap(), None);
    }

    #[test]
    fn test_quoted_fields_follow_csv_rules() {
        let input = format!("{HEADER}\"Smith, Jr.\",Doe,jd@example.com,Male,10.0.0.1\n");
        let mut source = RecordSource::new(Cursor::new(input), 16).unwrap();

        let record = source.next_record().unwrap().unwrap();
        assert_eq!(record.get(0), Some("Smith, Jr."));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_short_rows_are_passed_through() {
        let input = format!("{HEADER}only,three,fields\n");
        let mut source = RecordSource::new(Cursor::new(input), 64).unwrap();

        let record = source.next_record().unwrap().unwrap();
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let mut input = HEADER.as_bytes().to_vec();
        input.extend_from_slice(b"Bad,\xff\xfe,bad@example.com,Male,1.1.1.1\n");
        input.extend_from_slice(b"Good,Row,good@example.com,Female,2.2.2.2\n");
        let mut source = RecordSource::new(Cursor::new(input), 64).unwrap();

        let (records, errors) = drain(&mut source);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], RecordError::Read { line: 2, .. }));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(2), Some("good@example.com"));
    }

    /// Yields its bytes, then fails every later read.
    struct BrokenStream {
        data: Cursor<Vec<u8>>,
    }

    impl Read for BrokenStream {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(std::io::Error::other("disk gone")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_stream_failure_is_reported_once_then_end_of_data() {
        let input = format!("{HEADER}A,B,a@cnet.com,Male,1.1.1.1\n");
        let stream = BrokenStream {
            data: Cursor::new(input.into_bytes()),
        };
        let mut source = RecordSource::new(stream, 64).unwrap();

        let record = source.next_record().unwrap().unwrap();
        assert_eq!(record.get(2), Some("a@cnet.com"));

        match source.next_record() {
            Err(RecordError::Read { line, message }) => {
                assert!(line >= 2, "line {line}");
                assert!(message.contains("disk gone"));
            }
            other => panic!("expected a read error, got {other:?}"),
        }
        assert_eq!(source.next_record().unwrap(), None);
        assert_eq!(source.next_record().unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_header_fails_initialization() {
        let input = b"first\xff,last\n".to_vec();
        let result = RecordSource::new(Cursor::new(input), 64);
        assert!(matches!(result, Err(EngineError::Header(_))));
    }

    #[test]
    fn test_open_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{HEADER}A,B,ab@cnet.com,Male,1.2.3.4\n").unwrap();

        let mut source = RecordSource::open(file.path(), 8).unwrap();
        let (records, _) = drain(&mut source);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_open_missing_file_is_startup_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");

        let result = RecordSource::open(&missing, 64);
        assert!(matches!(result, Err(EngineError::Open { .. })));
    }
}
