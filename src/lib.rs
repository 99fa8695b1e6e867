//! # hexcat
//! Hexcat renders binary data as a classic hexadecimal dump: an eight-digit
//! offset column followed by up to sixteen bytes per row, printed as paired
//! lowercase hex digits.
//!
//! ## Examples
//!
//! Any slice of bytes [can be dumped](AsDump) with a single line:
//! ```rust
//! use hexcat::AsDump;
//!
//! let msg = b"Hello, world!";
//! msg.dump().print();
//! // 00000000 4865 6c6c 6f2c 2077 6f72 6c64 21
//! ```
//!
//! Dumps can be collected into in-memory targets for inspection. A row
//! shorter than sixteen bytes is padded with spaces so columns stay aligned:
//! ```rust
//! use hexcat::AsDump;
//!
//! let dump = b"ABC".dump().dump_to::<String>().unwrap();
//! assert_eq!(dump, concat!(
//!     "00000000 4142 43 ",
//!     "     ", "     ", "     ", "     ", "     ", "     ",
//!     "\n",
//! ));
//! ```
//!
//! A byte limit truncates the dump without consuming the rest of the input:
//! ```rust
//! use hexcat::{AsDump, options::DumpOptionsBuilder};
//!
//! let dump = [0x61u8; 64].dump().limit(4).dump_to::<String>().unwrap();
//! assert_eq!(dump, concat!(
//!     "00000000 6161 6161 ",
//!     "     ", "     ", "     ", "     ", "     ", "     ",
//!     "\n",
//! ));
//! ```
//!
//! Anything that implements [`std::io::Read`] works as a source, so dumping a
//! file streams it in 4096-byte chunks rather than loading it whole:
//! ```rust,no_run
//! use std::fs::File;
//! use hexcat::{Dumper, options::DumpOptionsBuilder};
//!
//! let f = File::open("image.bin").unwrap();
//! Dumper::new(f)
//!     .limit(256)
//!     .dump_io(std::io::stdout())
//!     .unwrap();
//! ```

use std::{
    cmp::min,
    io::{self, Read, Write},
};

use options::{DumpOptions, DumpOptionsBuilder};
use writer::{IOWriter, WriteDump};

/// All [`Dumper`] options.
pub mod options;

/// The [`WriteDump`] trait and several foreign type implementations.
pub mod writer;

/// Bytes physically read from the source per driver iteration.
const CHUNK_SIZE: usize = 4096;

/// Bytes rendered per output row.
const BYTES_PER_ROW: usize = 16;

/// Bytes per hex group within a row.
const GROUP_SIZE: usize = 2;

const OFFSET_DIGITS: usize = 8;

const LINE_BUFFER_SIZE: usize = 128;

const LOWER_LUT: [u8; 16] = [
    b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'a', b'b', b'c', b'd', b'e', b'f',
];

trait ToHex {
    fn to_hex_lower(self) -> [u8; 2];
}

impl ToHex for u8 {
    fn to_hex_lower(self) -> [u8; 2] {
        let mut x = [0u8; 2];
        x[0] = LOWER_LUT[(self >> 4) as usize];
        x[1] = LOWER_LUT[(self & 0xf) as usize];
        x
    }
}

trait HexVisualWidth {
    fn hex_visual_width(&self) -> usize;
}

impl HexVisualWidth for u64 {
    fn hex_visual_width(&self) -> usize {
        let mut u = *self;
        let mut i = 0usize;
        while u > 0 {
            u >>= 4;
            i += 1;
        }
        i
    }
}

#[derive(Clone, PartialEq, Eq)]
struct StackBuffer<const N: usize> {
    buffer: [u8; N],
    len: usize,
}

impl<const N: usize> StackBuffer<N> {
    fn new() -> Self {
        Self {
            buffer: [0u8; N],
            len: 0,
        }
    }

    fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    fn clear(&mut self) {
        self.len = 0
    }

    fn push(&mut self, b: u8) {
        self.check_extension(1);
        self.buffer[self.len] = b;
        self.len += 1;
    }

    fn check_extension(&self, extend_by: usize) {
        if self.len + extend_by >= N {
            panic!("Stack-based buffer overflow");
        }
    }

    fn extend_from_slice(&mut self, other: &[u8]) {
        self.check_extension(other.len());
        self.buffer[self.len..self.len + other.len()].copy_from_slice(other);
        self.len += other.len();
    }

    fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_slice()).unwrap()
    }
}

/// Render one row of up to [`BYTES_PER_ROW`] bytes into `line`.
///
/// The offset column is at least [`OFFSET_DIGITS`] lowercase hex digits,
/// zero-padded, growing only when the offset no longer fits. Each of the
/// eight groups is two bytes: a full group is four digits plus a space, a
/// group holding a single trailing byte is two digits plus a space, and a
/// group past the end of the row is five spaces so columns stay aligned.
///
/// The renderer is stateless; composing calls over consecutive slices with
/// their absolute offsets yields the full dump.
fn render_row(line: &mut StackBuffer<LINE_BUFFER_SIZE>, row: &[u8], offset: u64) {
    debug_assert!(!row.is_empty() && row.len() <= BYTES_PER_ROW);

    let width = usize::max(OFFSET_DIGITS, offset.hex_visual_width());
    for shift in (0..width).rev() {
        line.push(LOWER_LUT[((offset >> (shift * 4)) & 0xf) as usize]);
    }
    line.push(b' ');

    for pair in (0..BYTES_PER_ROW).step_by(GROUP_SIZE) {
        if pair < row.len() {
            line.extend_from_slice(&row[pair].to_hex_lower());
            if pair + 1 < row.len() {
                line.extend_from_slice(&row[pair + 1].to_hex_lower());
            }
            line.push(b' ');
        } else {
            line.extend_from_slice(b"     ");
        }
    }
}

enum DumpFailure<E> {
    Read(io::Error),
    Write(E),
}

/// Drives the dump: reads chunks, clamps them to the byte limit, renders
/// rows and hands each line to the writer.
struct DumpLineWriter<R: Read, W: WriteDump> {
    reader: R,
    writer: W,
    chunk: [u8; CHUNK_SIZE],
    line: StackBuffer<LINE_BUFFER_SIZE>,
    offset: u64,
    options: DumpOptions,
}

impl<R: Read, W: WriteDump> DumpLineWriter<R, W> {
    fn new(reader: R, writer: W, options: DumpOptions) -> Self {
        Self {
            reader,
            writer,
            chunk: [0u8; CHUNK_SIZE],
            line: StackBuffer::new(),
            offset: 0,
            options,
        }
    }

    fn do_dump(mut self) -> io::Result<W::Output> {
        match self.dump_internal() {
            Ok(()) => Ok(W::consume(Ok(self.writer))),
            Err(DumpFailure::Read(e)) => Err(e),
            Err(DumpFailure::Write(e)) => Ok(W::consume(Err(e))),
        }
    }

    fn dump_internal(&mut self) -> Result<(), DumpFailure<W::Error>> {
        if self.options.limit == Some(0) {
            return Ok(());
        }
        loop {
            let n = match self.reader.read(&mut self.chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(DumpFailure::Read(e)),
            };

            // The loop only runs while offset < limit, so the clamp
            // subtraction cannot underflow.
            let take = match self.options.limit {
                Some(limit) => min(n as u64, limit - self.offset) as usize,
                None => n,
            };

            self.write_chunk_rows(take).map_err(DumpFailure::Write)?;
            self.offset += take as u64;

            if self.options.limit.is_some_and(|limit| self.offset >= limit) {
                break;
            }
        }
        Ok(())
    }

    fn write_chunk_rows(&mut self, len: usize) -> Result<(), W::Error> {
        for row_start in (0..len).step_by(BYTES_PER_ROW) {
            let row_end = min(row_start + BYTES_PER_ROW, len);
            self.line.clear();
            render_row(
                &mut self.line,
                &self.chunk[row_start..row_end],
                self.offset + row_start as u64,
            );
            self.line.push(b'\n');
            self.writer.write_str(self.line.as_str())?;
            self.writer.line_end()?;
        }
        Ok(())
    }
}

/// Performs hex dumps over any [`Read`] source.
///
/// Typically this struct is not constructed directly for in-memory data;
/// the [`AsDump`] trait builds a borrowing [`Dumper`] from any byte slice.
pub struct Dumper<R: Read> {
    reader: R,
    options: DumpOptions,
}

impl<R: Read> Dumper<R> {
    /// Construct a new [`Dumper`] with the given reader and
    /// [default options](DumpOptions::default).
    pub fn new(reader: R) -> Self {
        Dumper {
            reader,
            options: DumpOptions::default(),
        }
    }

    /// Construct a new [`Dumper`] with the given reader and options.
    pub fn new_with_options(reader: R, options: DumpOptions) -> Self {
        Dumper { reader, options }
    }

    /// Print a hex dump to `stdout`, swallowing any I/O error.
    ///
    /// ```
    /// use hexcat::AsDump;
    ///
    /// let v = [0u8; 64];
    ///
    /// v.dump().print();
    /// ```
    pub fn print(self) {
        let _ = self.dump_io(io::stdout());
    }

    /// Print a hex dump to `stderr`, swallowing any I/O error.
    pub fn print_err(self) {
        let _ = self.dump_io(io::stderr());
    }

    /// Construct a default instance of `W` and write a hex dump to it,
    /// returning its output.
    ///
    /// ```
    /// use hexcat::AsDump;
    ///
    /// let dump = [0u8; 64].dump().dump_to::<String>().unwrap();
    /// assert_eq!(dump.lines().count(), 4);
    /// ```
    pub fn dump_to<W: WriteDump + Default>(self) -> io::Result<W::Output> {
        self.dump_into(W::default())
    }

    /// Write a hex dump to an instance of `W` and return its output.
    ///
    /// The outer [`io::Result`] carries errors from the byte source; errors
    /// raised by the writer itself are folded into `W::Output` by
    /// [`WriteDump::consume`].
    pub fn dump_into<W: WriteDump>(self, writer: W) -> io::Result<W::Output> {
        let dlw = DumpLineWriter::new(self.reader, writer, self.options);
        dlw.do_dump()
    }

    /// Write a hex dump to an object that implements [`std::io::Write`].
    /// Output is buffered and flushed before returning.
    ///
    /// ```no_run
    /// use std::fs::OpenOptions;
    /// use hexcat::AsDump;
    ///
    /// let v = [0u8; 64];
    ///
    /// let f = OpenOptions::new()
    ///     .write(true)
    ///     .create(true)
    ///     .open("dump.txt")
    ///     .unwrap();
    ///
    /// v.dump().dump_io(f).expect("could not write hex dump to file");
    /// ```
    pub fn dump_io<W: Write>(self, write: W) -> io::Result<()> {
        self.dump_into(IOWriter::new(write)).and_then(|r| r)
    }
}

/// [`Dumper`] implements [`DumpOptionsBuilder`] to allow for fluent
/// configuration.
impl<R: Read> DumpOptionsBuilder for Dumper<R> {
    fn map_options<F: FnOnce(DumpOptions) -> DumpOptions>(self, f: F) -> Self {
        Dumper {
            options: f(self.options),
            ..self
        }
    }
}

/// This trait can be implemented for reference types to yield a non-owning
/// version of [`Dumper`].
pub trait AsDump<'a> {
    /// Construct a non-owning [`Dumper`] from a reference of the current
    /// value.
    fn as_dump(&'a self) -> Dumper<&'a [u8]>;

    /// By default, this method simply calls [`as_dump`](AsDump::as_dump).
    fn dump(&'a self) -> Dumper<&'a [u8]> {
        self.as_dump()
    }
}

/// Blanket implementation for any type that implements `AsRef<[u8]>`.
/// In other words, any type that can be seen as a slice of `u8` can be
/// quickly made into a [`Dumper`].
///
/// ## Examples
/// ```
/// use hexcat::AsDump;
///
/// let v = vec![0u8; 24];
/// let x = [0u8; 4];
/// let s = "greetings earthling!";
///
/// v.dump().print();
/// x.dump().print();
/// s.dump().print();
/// ```
impl<'a, T: AsRef<[u8]>> AsDump<'a> for T {
    fn as_dump(&'a self) -> Dumper<&'a [u8]> {
        Dumper::new(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_visual_width_counts_nibbles() {
        assert_eq!(0u64.hex_visual_width(), 0);
        assert_eq!(0xfu64.hex_visual_width(), 1);
        assert_eq!(0x10u64.hex_visual_width(), 2);
        assert_eq!(0xffff_ffffu64.hex_visual_width(), 8);
        assert_eq!(0x1_0000_0000u64.hex_visual_width(), 9);
    }

    #[test]
    fn stack_buffer_accumulates_and_clears() {
        let mut b = StackBuffer::<16>::new();
        b.push(b'a');
        b.extend_from_slice(b"bc");
        assert_eq!(b.as_str(), "abc");
        b.clear();
        assert_eq!(b.as_slice(), b"");
    }

    #[test]
    fn row_offset_is_zero_padded_to_eight_digits() {
        let mut line = StackBuffer::new();
        render_row(&mut line, &[0xff], 0x10);
        assert!(line.as_str().starts_with("00000010 ff "));
    }

    #[test]
    fn row_offset_widens_past_eight_digits() {
        let mut line = StackBuffer::new();
        render_row(&mut line, &[0x00], 0x1_0000_0000);
        assert!(line.as_str().starts_with("100000000 00 "));
    }

    #[test]
    fn full_row_has_eight_groups_and_trailing_space() {
        let row: Vec<u8> = (0..16).collect();
        let mut line = StackBuffer::new();
        render_row(&mut line, &row, 0);
        assert_eq!(
            line.as_str(),
            "00000000 0001 0203 0405 0607 0809 0a0b 0c0d 0e0f "
        );
    }
}
