//! Delimited text tables (CSV and friends).
use std::iter::Peekable;
use std::str::Chars;

use encoding::label::encoding_from_whatwg_label;
use encoding::{DecoderTrap, Encoding};

use super::ReadError;

const UTF8_BOM: &[u8] = &[ 0xef, 0xbb, 0xbf ];

/// Decodes file contents to a String.
///
/// `label` is a WHATWG encoding label: "utf-8", "windows-1255",
/// "iso-8859-8", .... Undecodable bytes become U+FFFD rather than errors:
/// one garbled street name shouldn't sink a whole table.
pub fn decode(bytes: &[u8], label: &str) -> Result<String, ReadError> {
    let encoding = encoding_from_whatwg_label(label)
        .ok_or_else(|| ReadError::UnknownEncoding(label.to_string()))?;

    let bytes = if encoding.name() == "utf-8" && bytes.starts_with(UTF8_BOM) {
        &bytes[UTF8_BOM.len() ..]
    } else {
        bytes
    };

    encoding.decode(bytes, DecoderTrap::Replace)
        .map_err(|err| ReadError::ParseError { line: 0, description: err.into_owned() })
}

/// One data record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// 1-based line the record starts on. (Quoted fields may span lines.)
    pub line: usize,
    pub cells: Box<[String]>,
}

impl Row {
    pub fn get(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(|s| s.as_str())
    }
}

/// A header plus data rows.
///
/// Cells are kept exactly as written (after unquoting), so a Table can be
/// written back out with every column intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub headers: Box<[String]>,
    pub rows: Vec<Row>,
    pub delimiter: char,
}

impl Table {
    /// Parses RFC 4180-style text.
    ///
    /// * The first record is the header.
    /// * Fields may be quoted with `"`; quoted fields may contain the
    ///   delimiter, line breaks and doubled `""` quotes.
    /// * Lines end in `\n` or `\r\n`. Blank lines are skipped.
    /// * Rows shorter than the header are padded with empty cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use sewergrid::read::Table;
    ///
    /// let table = Table::parse("Label,Note\nMH1,\"deep, old\"\n", ',').unwrap();
    ///
    /// assert_eq!(Some(1), table.column("Note"));
    /// assert_eq!(Some("deep, old"), table.rows[0].get(1));
    /// ```
    pub fn parse(text: &str, delimiter: char) -> Result<Table, ReadError> {
        let mut records = RecordParser::new(text, delimiter);

        let headers: Box<[String]> = match records.next() {
            None => Box::new([]),
            Some(record) => record?.1.into_iter().map(|h| h.trim().to_string()).collect(),
        };

        let mut rows = Vec::<Row>::new();
        for record in records {
            let (line, mut cells) = record?;
            if cells.len() < headers.len() {
                cells.resize(headers.len(), String::new());
            }
            rows.push(Row { line: line, cells: cells.into_boxed_slice() });
        }

        Ok(Table {
            headers: headers,
            rows: rows,
            delimiter: delimiter,
        })
    }

    /// Returns the index of the column whose (trimmed) header is `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, ReadError> {
        self.column(name).ok_or_else(|| ReadError::MissingColumn(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Iterates over (line, fields) records.
struct RecordParser<'a> {
    chars: Peekable<Chars<'a>>,
    delimiter: char,
    line: usize,
}

impl<'a> RecordParser<'a> {
    fn new(text: &'a str, delimiter: char) -> RecordParser<'a> {
        RecordParser {
            chars: text.chars().peekable(),
            delimiter: delimiter,
            line: 1,
        }
    }

    /// Reads one record, or `None` at end of input.
    ///
    /// Side-effect: advances past the record's line break.
    fn read_record(&mut self) -> Option<Result<(usize, Vec<String>), ReadError>> {
        self.chars.peek()?;

        let start_line = self.line;
        let mut fields = Vec::<String>::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut quote_line = start_line;

        while let Some(c) = self.chars.next() {
            if in_quotes {
                match c {
                    '"' if self.chars.peek() == Some(&'"') => {
                        self.chars.next();
                        field.push('"');
                    }
                    '"' => in_quotes = false,
                    '\n' => {
                        self.line += 1;
                        field.push(c);
                    }
                    _ => field.push(c),
                }
                continue;
            }

            match c {
                '"' if field.is_empty() => {
                    in_quotes = true;
                    quote_line = self.line;
                }
                '\r' if self.chars.peek() == Some(&'\n') => {}
                '\r' | '\n' => {
                    self.line += 1;
                    fields.push(field);
                    return Some(Ok((start_line, fields)));
                }
                _ if c == self.delimiter => {
                    fields.push(std::mem::take(&mut field));
                }
                _ => field.push(c),
            }
        }

        if in_quotes {
            return Some(Err(ReadError::ParseError {
                line: quote_line,
                description: "quoted field never ends".to_string(),
            }));
        }

        fields.push(field);
        Some(Ok((start_line, fields)))
    }
}

impl<'a> Iterator for RecordParser<'a> {
    type Item = Result<(usize, Vec<String>), ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.read_record()? {
                // blank line
                Ok((_, ref fields)) if fields.len() == 1 && fields[0].is_empty() => continue,
                other => return Some(other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(table: &Table) -> Vec<Vec<&str>> {
        table.rows.iter().map(|r| r.cells.iter().map(|c| c.as_str()).collect()).collect()
    }

    #[test]
    fn simple() {
        let table = Table::parse("a,b\n1,2\n3,4\n", ',').unwrap();

        assert_eq!(vec![ "a", "b" ], table.headers.to_vec());
        assert_eq!(vec![ vec![ "1", "2" ], vec![ "3", "4" ] ], cells(&table));
        assert_eq!(2, table.rows[0].line);
        assert_eq!(3, table.rows[1].line);
    }

    #[test]
    fn no_trailing_newline() {
        let table = Table::parse("a,b\n1,2", ',').unwrap();
        assert_eq!(vec![ vec![ "1", "2" ] ], cells(&table));
    }

    #[test]
    fn crlf_and_blank_lines() {
        let table = Table::parse("a,b\r\n\r\n1,2\r\n\r\n", ',').unwrap();
        assert_eq!(vec![ vec![ "1", "2" ] ], cells(&table));
        assert_eq!(3, table.rows[0].line);
    }

    #[test]
    fn quoted_fields() {
        let table = Table::parse("a,b\n\"x, y\",\"say \"\"hi\"\"\"\n\"multi\nline\",z\nlast,1\n", ',').unwrap();

        assert_eq!(vec![
            vec![ "x, y", "say \"hi\"" ],
            vec![ "multi\nline", "z" ],
            vec![ "last", "1" ],
        ], cells(&table));
        assert_eq!(5, table.rows[2].line);
    }

    #[test]
    fn empty_quoted_field() {
        let table = Table::parse("a,b,c\n\"\",x,\"\"\n", ',').unwrap();
        assert_eq!(vec![ vec![ "", "x", "" ] ], cells(&table));
    }

    #[test]
    fn short_rows_padded() {
        let table = Table::parse("a,b,c\n1\n", ',').unwrap();
        assert_eq!(vec![ vec![ "1", "", "" ] ], cells(&table));
    }

    #[test]
    fn other_delimiter() {
        let table = Table::parse("a;b\n1,5;2\n", ';').unwrap();
        assert_eq!(vec![ vec![ "1,5", "2" ] ], cells(&table));
    }

    #[test]
    fn headers_trimmed() {
        let table = Table::parse(" Start Node , Stop Node\n", ',').unwrap();
        assert_eq!(Some(0), table.column("Start Node"));
        assert_eq!(Some(1), table.column("Stop Node"));
        assert!(table.is_empty());
    }

    #[test]
    fn unterminated_quote() {
        match Table::parse("a,b\n1,2\n3,\"oops\n4,5\n", ',') {
            Err(ReadError::ParseError { line, .. }) => assert_eq!(3, line),
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn missing_column() {
        let table = Table::parse("a,b\n", ',').unwrap();
        match table.require_column("c") {
            Err(ReadError::MissingColumn(name)) => assert_eq!("c", name),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn empty_text() {
        let table = Table::parse("", ',').unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn decode_windows_1255() {
        // "שלום" in windows-1255
        let bytes = [ 0xf9, 0xec, 0xe5, 0xed ];
        assert_eq!("שלום", decode(&bytes, "windows-1255").unwrap());
    }

    #[test]
    fn decode_strips_bom() {
        let bytes = [ 0xef, 0xbb, 0xbf, b'a', b',', b'b' ];
        assert_eq!("a,b", decode(&bytes, "utf-8").unwrap());
    }

    #[test]
    fn decode_unknown_label() {
        match decode(b"x", "klingon") {
            Err(ReadError::UnknownEncoding(label)) => assert_eq!("klingon", label),
            other => panic!("expected UnknownEncoding, got {:?}", other),
        }
    }
}
