//! One-method traits accepted by the wrappers.
//!
//! Reading, writing and seeking use `std::io::{Read, Write, Seek}` directly.

use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufWriter, LineWriter, Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;

pub trait Close {
    fn close(self) -> io::Result<()>;
}

impl Close for File {
    // std releases the descriptor on drop and ignores what close(2) says.
    fn close(self) -> io::Result<()> {
        drop(self);
        Ok(())
    }
}

impl<W: Write> Close for BufWriter<W> {
    fn close(self) -> io::Result<()> {
        self.into_inner().map(drop).map_err(|err| err.into_error())
    }
}

impl<W: Write> Close for LineWriter<W> {
    fn close(self) -> io::Result<()> {
        self.into_inner().map(drop).map_err(|err| err.into_error())
    }
}

/// Write at an absolute offset without moving the cursor.
pub trait WriteAt {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize>;
}

impl WriteAt for &File {
    #[cfg(unix)]
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::write_at(*self, buf, offset)
    }

    // seek_write moves the cursor, put it back.
    #[cfg(windows)]
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        use std::io::{Seek, SeekFrom};
        let mut f: &File = *self;
        let pos = f.stream_position()?;
        let n = std::os::windows::fs::FileExt::seek_write(f, buf, offset)?;
        f.seek(SeekFrom::Start(pos))?;
        Ok(n)
    }
}

impl WriteAt for File {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        <&File as WriteAt>::write_at(&mut &*self, buf, offset)
    }
}

impl WriteAt for Vec<u8> {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        let range = usize::try_from(offset)
            .ok()
            .and_then(|start| start.checked_add(buf.len()).map(|end| (start, end)));
        let (start, end) = match range {
            Some(range) => range,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("offset {} is out of range", offset),
                ))
            }
        };
        if self.len() < end {
            self.try_reserve(end - self.len()).map_err(|err| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("offset {}: {}", offset, err))
            })?;
            self.resize(end, 0);
        }
        self[start..end].copy_from_slice(buf);
        Ok(buf.len())
    }
}

pub trait Encoder {
    type Error: Into<Error>;

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error>;
}

pub trait Decoder {
    type Error: Into<Error>;

    fn decode<T: DeserializeOwned>(&mut self) -> Result<T, Self::Error>;
}

/// Writes one JSON document per line.
pub struct JsonEncoder<W> {
    w: W,
}

impl<W: Write> JsonEncoder<W> {
    pub fn new(w: W) -> JsonEncoder<W> {
        JsonEncoder { w }
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}

impl<W: Write> Encoder for JsonEncoder<W> {
    type Error = Error;

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        serde_json::to_writer(&mut self.w, value)?;
        Ok(self.w.write_all(b"\n")?)
    }
}

/// Reads whitespace separated JSON documents. Wrap slow readers in a
/// `BufReader`, bytes are pulled one at a time.
pub struct JsonDecoder<R: Read> {
    de: serde_json::Deserializer<serde_json::de::IoRead<R>>,
}

impl<R: Read> JsonDecoder<R> {
    pub fn new(r: R) -> JsonDecoder<R> {
        JsonDecoder {
            de: serde_json::Deserializer::from_reader(r),
        }
    }

    /// Whether anything but whitespace is left. A read error counts as more,
    /// the next `decode` reports it.
    pub fn more(&mut self) -> bool {
        self.de.end().is_err()
    }
}

impl<R: Read> Decoder for JsonDecoder<R> {
    type Error = serde_json::Error;

    fn decode<T: DeserializeOwned>(&mut self) -> Result<T, serde_json::Error> {
        T::deserialize(&mut self.de)
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, BufWriter, Cursor, Read, Seek, SeekFrom, Write};

    use crate::capability::{Close, Decoder, Encoder, JsonDecoder, JsonEncoder, WriteAt};

    #[test]
    fn test_vec_write_at() {
        let mut v = b"abc".to_vec();
        assert_eq!(2, v.write_at(b"XY", 1).unwrap());
        assert_eq!(b"aXY".to_vec(), v);
        assert_eq!(1, v.write_at(b"Z", 5).unwrap());
        assert_eq!(b"aXY\0\0Z".to_vec(), v);
    }

    #[test]
    fn test_vec_write_at_huge_offset() {
        let mut v: Vec<u8> = Vec::new();
        let err = v.write_at(b"x", u64::MAX).unwrap_err();
        assert_eq!(io::ErrorKind::InvalidInput, err.kind());
        let err = v.write_at(b"x", u64::MAX - 1).unwrap_err();
        assert_eq!(io::ErrorKind::InvalidInput, err.kind());
        assert!(v.is_empty());
    }

    #[test]
    fn test_file_write_at_keeps_cursor() {
        let mut f = tempfile::tempfile().unwrap();
        f.write_all(b"abc").unwrap();
        assert_eq!(2, (&f).write_at(b"XY", 10).unwrap());
        assert_eq!(3, f.seek(SeekFrom::Current(0)).unwrap());

        f.write_all(b"d").unwrap();
        f.seek(SeekFrom::Start(0)).unwrap();
        let mut out = Vec::new();
        f.read_to_end(&mut out).unwrap();
        assert_eq!(b"abcd\0\0\0\0\0\0XY".to_vec(), out);
    }

    #[test]
    fn test_close_flushes() {
        let mut out = Vec::new();
        {
            let mut w = BufWriter::new(&mut out);
            w.write_all(b"tail").unwrap();
            w.close().unwrap();
        }
        assert_eq!(b"tail".to_vec(), out);
    }

    #[test]
    fn test_json_roundtrip_values() {
        let mut e = JsonEncoder::new(Vec::new());
        e.encode("text").unwrap();
        e.encode(&12).unwrap();
        let out = e.into_inner();
        assert_eq!(b"\"text\"\n12\n".to_vec(), out);

        let mut d = JsonDecoder::new(Cursor::new(out));
        assert!(d.more());
        assert_eq!("text", d.decode::<String>().unwrap());
        assert!(d.more());
        assert_eq!(12, d.decode::<u32>().unwrap());
        assert!(!d.more());
        assert!(d.decode::<u32>().unwrap_err().is_eof());
    }
}
