//! Seekable byte source used by the decoders
//!
//! Wraps any `Read + Seek` in a buffered reader that tracks its own position
//! and carries sticky end-of-stream and error flags. Reads never fail eagerly:
//! a read past the end sets `eos`, a short fixed-width read or an I/O failure
//! additionally records an error. The loader inspects the error once the
//! decode pass is over.

use crate::error::{Error, Result};
use std::io::{self, BufReader, Read, Seek, SeekFrom};

/// Buffered byte stream with end-of-stream and error flags
pub struct ByteStream<R> {
    inner: BufReader<R>,
    pos: u64,
    size: u64,
    eos: bool,
    err: Option<io::Error>,
}

impl<R: Read + Seek> ByteStream<R> {
    /// Wrap a reader. Positions are absolute offsets into `reader`; the
    /// stream starts wherever `reader` currently is.
    pub fn new(mut reader: R) -> Result<Self> {
        let (pos, size) = measure(&mut reader).map_err(|e| Error::StreamRead {
            message: "unable to determine stream size".to_string(),
            source: Some(e),
        })?;

        Ok(Self {
            inner: BufReader::new(reader),
            pos,
            size,
            eos: false,
            err: None,
        })
    }

    /// Current position
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Total size of the underlying stream
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Bytes left between the current position and the end
    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.pos)
    }

    /// True once a read was attempted at the end of the stream
    pub fn eos(&self) -> bool {
        self.eos
    }

    /// True if any read so far failed
    pub fn has_error(&self) -> bool {
        self.err.is_some()
    }

    /// Take the first recorded read error, clearing the flag
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.err.take()
    }

    /// Read a single byte, or `None` at the end of the stream
    pub fn read_byte(&mut self) -> Option<u8> {
        if self.pos >= self.size {
            self.eos = true;
            return None;
        }

        let mut b = [0u8; 1];
        match self.inner.read_exact(&mut b) {
            Ok(()) => {
                self.pos += 1;
                Some(b[0])
            }
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    /// Read exactly `N` bytes. Missing bytes are left zeroed and flag an error.
    pub fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        for (got, slot) in buf.iter_mut().enumerate() {
            match self.read_byte() {
                Some(b) => *slot = b,
                None => {
                    self.fail(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("short read: wanted {N} bytes, got {got}"),
                    ));
                    break;
                }
            }
        }
        buf
    }

    /// Read a little-endian `u16`
    pub fn read_u16_le(&mut self) -> u16 {
        u16::from_le_bytes(self.read_array())
    }

    /// Read a little-endian `u32`
    pub fn read_u32_le(&mut self) -> u32 {
        u32::from_le_bytes(self.read_array())
    }

    /// Consume everything up to and including the next `\n`
    pub fn skip_line(&mut self) {
        while let Some(b) = self.read_byte() {
            if b == b'\n' {
                break;
            }
        }
    }

    /// Skip `count` bytes. Running off the end counts as a short read.
    pub fn skip(&mut self, count: u64) {
        let target = self.pos.saturating_add(count);
        if target > self.size {
            let size = self.size;
            let e = match self.move_to(size) {
                Ok(()) => io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("skip of {count} bytes runs past the end of the stream"),
                ),
                Err(e) => e,
            };
            self.fail(e);
            return;
        }

        if let Err(e) = self.move_to(target) {
            self.fail(e);
        }
    }

    /// Seek to an absolute position. Positions past the end are rejected
    /// without moving the stream.
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        if pos > self.size {
            return Err(Error::Seek {
                offset: pos,
                len: self.size,
            });
        }

        self.move_to(pos).map_err(|e| Error::StreamRead {
            message: format!("seek to offset {pos} failed"),
            source: Some(e),
        })?;
        self.eos = false;
        Ok(())
    }

    fn move_to(&mut self, pos: u64) -> io::Result<()> {
        let delta = i64::try_from(pos)
            .ok()
            .zip(i64::try_from(self.pos).ok())
            .map(|(to, from)| to - from);

        match delta {
            Some(delta) => self.inner.seek_relative(delta)?,
            None => {
                self.inner.seek(SeekFrom::Start(pos))?;
            }
        }
        self.pos = pos;
        Ok(())
    }

    fn fail(&mut self, e: io::Error) {
        self.eos = true;
        if self.err.is_none() {
            self.err = Some(e);
        }
    }
}

fn measure<R: Seek>(reader: &mut R) -> io::Result<(u64, u64)> {
    let start = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(start))?;
    Ok((start, end))
}
