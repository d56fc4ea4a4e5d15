// src/readers/linesource.rs

//! Implements a [`DecodedLines`], an iterator of text lines decoded from
//! the bytes of a log file.
//!
//! The backup agent writes its job logs in UTF-16LE. Bytes are read one
//! block at a time, decoded to UTF-8 with [`encoding_rs`], and split into
//! lines.

use crate::common::{Count, CRc, NLc};

use std::fmt;
use std::io::{Error, ErrorKind, Read, Result};
use std::str::FromStr;

use ::encoding_rs::{
    CoderResult,
    Decoder,
    Encoding,
    UTF_16BE,
    UTF_16LE,
    UTF_8,
};
use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Size of one read from the underlying byte source, in bytes.
pub type BlockSz = usize;

/// Default [`BlockSz`] of a `DecodedLines`.
pub const BLOCKSZ_DEF: BlockSz = 0x10000;

/// Text encoding of a log file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogEncoding {
    /// the backup agent's native encoding
    #[default]
    Utf16Le,
    Utf16Be,
    Utf8,
}

impl LogEncoding {
    pub fn encoding(&self) -> &'static Encoding {
        match self {
            LogEncoding::Utf16Le => UTF_16LE,
            LogEncoding::Utf16Be => UTF_16BE,
            LogEncoding::Utf8 => UTF_8,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            LogEncoding::Utf16Le => "utf-16le",
            LogEncoding::Utf16Be => "utf-16be",
            LogEncoding::Utf8 => "utf-8",
        }
    }
}

impl fmt::Display for LogEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-16le" | "utf16le" | "utf-16" | "utf16" => Ok(LogEncoding::Utf16Le),
            "utf-16be" | "utf16be" => Ok(LogEncoding::Utf16Be),
            "utf-8" | "utf8" => Ok(LogEncoding::Utf8),
            _ => Err(format!("Unsupported encoding {:?}; expected one of utf-16le, utf-16be, utf-8", s)),
        }
    }
}

/// A source of decoded text lines for a
/// [`RecordStream`](crate::readers::recordstream::RecordStream).
pub trait LineSource: Iterator<Item = Result<String>> {
    /// Were any bytes invalid for the source encoding?
    fn had_replacements(&self) -> bool {
        false
    }
}

/// Lines already in memory are never decoded.
impl LineSource for std::vec::IntoIter<Result<String>> {}

/// Iterator of lines decoded from the bytes of `R`.
///
/// A byte-order mark at the start of the bytes overrides the given
/// [`LogEncoding`] and is not part of the first line.
///
/// Lines end at `'\n'`; a `'\r'` before the `'\n'` is removed. The last line
/// does not need a `'\n'`.
///
/// After an [`Error`] is returned the iterator is finished.
pub struct DecodedLines<R: Read> {
    reader: R,
    decoder: Decoder,
    /// bytes from the most recent read
    block: Vec<u8>,
    /// decoded text not yet returned as lines
    text: String,
    /// byte offset into `text` where the next line begins
    text_at: usize,
    /// the reader returned zero bytes and the decoder was flushed
    eof: bool,
    /// an `Error` was returned
    errored: bool,
    lines_returned: Count,
    bytes_read: Count,
    /// the decoder replaced malformed byte sequences with U+FFFD
    had_replacements: bool,
}

impl<R: Read> fmt::Debug for DecodedLines<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DecodedLines")
            .field("encoding", &self.decoder.encoding().name())
            .field("blocksz", &self.block.len())
            .field("text.len", &self.text.len())
            .field("text_at", &self.text_at)
            .field("eof", &self.eof)
            .field("errored", &self.errored)
            .field("lines_returned", &self.lines_returned)
            .field("bytes_read", &self.bytes_read)
            .finish()
    }
}

impl<R: Read> DecodedLines<R> {
    pub fn new(
        reader: R,
        encoding: LogEncoding,
    ) -> DecodedLines<R> {
        DecodedLines::with_blocksz(reader, encoding, BLOCKSZ_DEF)
    }

    /// `blocksz` is the count of bytes requested per read; must be more
    /// than zero.
    pub fn with_blocksz(
        reader: R,
        encoding: LogEncoding,
        blocksz: BlockSz,
    ) -> DecodedLines<R> {
        defñ!("DecodedLines::with_blocksz(…, {}, {})", encoding, blocksz);
        assert_ne!(blocksz, 0, "blocksz must be more than zero");

        DecodedLines {
            reader,
            decoder: encoding.encoding().new_decoder(),
            block: vec![0; blocksz],
            text: String::with_capacity(blocksz),
            text_at: 0,
            eof: false,
            errored: false,
            lines_returned: 0,
            bytes_read: 0,
            had_replacements: false,
        }
    }

    /// Count of lines returned so far.
    pub const fn count_lines_returned(&self) -> Count {
        self.lines_returned
    }

    /// Count of bytes read so far.
    pub const fn count_bytes_read(&self) -> Count {
        self.bytes_read
    }

    /// Read one block of bytes and decode it onto the end of `self.text`.
    ///
    /// At end of the reader the decoder is flushed and `self.eof` is set.
    fn read_block(&mut self) -> Result<()> {
        // drop text of lines already returned
        if self.text_at != 0 {
            self.text.drain(..self.text_at);
            self.text_at = 0;
        }
        let readsz: usize = loop {
            match self.reader.read(&mut self.block) {
                Ok(readsz) => break readsz,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        };
        defo!("read {} bytes", readsz);
        self.bytes_read += readsz as Count;
        let last: bool = readsz == 0;
        let mut src: &[u8] = &self.block[..readsz];
        loop {
            let needed: usize = match self.decoder.max_utf8_buffer_length(src.len()) {
                Some(val) => val,
                None => {
                    return Err(Error::new(
                        ErrorKind::InvalidData,
                        format!("decode buffer length overflow for {} bytes", src.len()),
                    ));
                }
            };
            self.text.reserve(needed);
            let (result, readsz_dec, replaced) = self.decoder.decode_to_string(src, &mut self.text, last);
            self.had_replacements |= replaced;
            debug_assert_le!(readsz_dec, src.len());
            src = &src[readsz_dec..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
        self.eof = last;

        Ok(())
    }

    /// Remove the next line from `self.text`, if a complete line is there.
    fn take_line(&mut self) -> Option<String> {
        let at_nl: usize = self.text[self.text_at..].find(NLc)? + self.text_at;
        let line_s: &str = &self.text[self.text_at..at_nl];
        let line: String = line_s.strip_suffix(CRc).unwrap_or(line_s).to_string();
        self.text_at = at_nl + 1;

        Some(line)
    }

    /// Remove the remaining text as the last line, if there is any.
    fn take_last_line(&mut self) -> Option<String> {
        if self.text_at >= self.text.len() {
            return None;
        }
        let line_s: &str = &self.text[self.text_at..];
        let line: String = line_s.strip_suffix(CRc).unwrap_or(line_s).to_string();
        self.text_at = self.text.len();

        Some(line)
    }
}

impl<R: Read> Iterator for DecodedLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored {
            return None;
        }
        loop {
            if let Some(line) = self.take_line() {
                self.lines_returned += 1;
                return Some(Ok(line));
            }
            if self.eof {
                let line = self.take_last_line()?;
                self.lines_returned += 1;
                return Some(Ok(line));
            }
            if let Err(err) = self.read_block() {
                defo!("read_block() error {}", err);
                self.errored = true;
                return Some(Err(err));
            }
        }
    }
}

impl<R: Read> LineSource for DecodedLines<R> {
    /// Were any malformed byte sequences replaced with U+FFFD?
    fn had_replacements(&self) -> bool {
        self.had_replacements
    }
}
