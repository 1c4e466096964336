use std::fs::{self, DirEntry, File, Metadata, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde::de::{Deserialize, DeserializeOwned};
use serde::Serialize;

use crate::capability::{Close, Decoder, Encoder, WriteAt};
use crate::error::Error;
use crate::policy::{self, Policy};
use crate::temp;

/// Calls the wrapped primitives and aborts on their failure.
///
/// `Must::new()` asks the process policy at the moment of failure,
/// `Must::with_policy` pins one for every call made through it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Must {
    policy: Option<Policy>,
}

impl Must {
    pub fn new() -> Must {
        Must { policy: None }
    }

    pub fn with_policy(policy: Policy) -> Must {
        Must {
            policy: Some(policy),
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy.unwrap_or_else(policy::policy)
    }

    pub fn abort<E: Into<Error>>(&self, err: E) -> ! {
        self.policy().abort(err.into())
    }

    /// Returns the value, or aborts with the error.
    pub fn check<T, E: Into<Error>>(&self, res: Result<T, E>) -> T {
        match res {
            Ok(v) => v,
            Err(err) => self.abort(err),
        }
    }

    fn at<T>(&self, op: &'static str, path: &Path, res: io::Result<T>) -> T {
        match res {
            Ok(v) => v,
            Err(err) => self.abort(Error::Path(op, path.to_path_buf(), err)),
        }
    }

    pub fn open<P: AsRef<Path>>(&self, path: P) -> File {
        let path = path.as_ref();
        self.at("open", path, File::open(path))
    }

    pub fn create<P: AsRef<Path>>(&self, path: P) -> File {
        let path = path.as_ref();
        self.at("create", path, File::create(path))
    }

    pub fn open_with<P: AsRef<Path>>(&self, path: P, options: &OpenOptions) -> File {
        let path = path.as_ref();
        self.at("open", path, options.open(path))
    }

    pub fn close<C: Close>(&self, c: C) {
        self.check(c.close())
    }

    pub fn seek<S: Seek + ?Sized>(&self, s: &mut S, pos: SeekFrom) -> u64 {
        self.check(s.seek(pos))
    }

    pub fn stat(&self, f: &File) -> Metadata {
        self.check(f.metadata())
    }

    pub fn stat_path<P: AsRef<Path>>(&self, path: P) -> Metadata {
        let path = path.as_ref();
        self.at("stat", path, fs::metadata(path))
    }

    /// Flushes data and metadata to durable storage.
    pub fn sync(&self, f: &File) {
        self.check(f.sync_all())
    }

    pub fn truncate(&self, f: &File, size: u64) {
        self.check(f.set_len(size))
    }

    /// Truncates or zero-extends an existing file.
    pub fn truncate_path<P: AsRef<Path>>(&self, path: P, size: u64) {
        let path = path.as_ref();
        let res = OpenOptions::new()
            .write(true)
            .open(path)
            .and_then(|f| f.set_len(size));
        self.at("truncate", path, res)
    }

    /// Removes a file, or a directory if it is empty.
    pub fn remove<P: AsRef<Path>>(&self, path: P) {
        let path = path.as_ref();
        let res = fs::symlink_metadata(path).and_then(|md| {
            if md.is_dir() {
                fs::remove_dir(path)
            } else {
                fs::remove_file(path)
            }
        });
        self.at("remove", path, res)
    }

    pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) {
        let from = from.as_ref();
        self.at("rename", from, fs::rename(from, to))
    }

    /// Creates a new file in `dir` (the system temporary directory if `None`)
    /// named after `pattern`: the random part replaces the last `*`,
    /// or is appended.
    pub fn temp_file(&self, dir: Option<&Path>, pattern: &str) -> (PathBuf, File) {
        let dir = temp::dir_or_default(dir);
        self.at("create temp file in", &dir, temp::file(&dir, pattern))
    }

    pub fn temp_dir(&self, dir: Option<&Path>, pattern: &str) -> PathBuf {
        let dir = temp::dir_or_default(dir);
        self.at("create temp dir in", &dir, temp::dir(&dir, pattern))
    }

    /// All entries of a directory, sorted by file name.
    pub fn read_dir<P: AsRef<Path>>(&self, path: P) -> Vec<DirEntry> {
        let path = path.as_ref();
        let res = fs::read_dir(path).and_then(|entries| entries.collect::<io::Result<Vec<_>>>());
        let mut entries = self.at("read dir", path, res);
        entries.sort_by_key(|e| e.file_name());
        entries
    }

    /// Returns `0` at the end of the stream.
    pub fn read<R: Read + ?Sized>(&self, r: &mut R, buf: &mut [u8]) -> usize {
        self.check(r.read(buf))
    }

    /// Fills `buf` completely, running out of data is a failure.
    pub fn read_full<R: Read + ?Sized>(&self, r: &mut R, buf: &mut [u8]) -> usize {
        self.check(r.read_exact(buf));
        buf.len()
    }

    pub fn read_all<R: Read + ?Sized>(&self, r: &mut R) -> Vec<u8> {
        let mut buf = Vec::new();
        self.check(r.read_to_end(&mut buf));
        buf
    }

    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Vec<u8> {
        let path = path.as_ref();
        self.at("read", path, fs::read(path))
    }

    pub fn read_to_string<P: AsRef<Path>>(&self, path: P) -> String {
        let path = path.as_ref();
        self.at("read", path, fs::read_to_string(path))
    }

    pub fn write<W: Write + ?Sized>(&self, w: &mut W, buf: &[u8]) -> usize {
        self.check(w.write(buf))
    }

    pub fn write_at<W: WriteAt + ?Sized>(&self, w: &mut W, buf: &[u8], offset: u64) -> usize {
        self.check(w.write_at(buf, offset))
    }

    pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(&self, path: P, contents: C) {
        let path = path.as_ref();
        self.at("write", path, fs::write(path, contents))
    }

    pub fn flush<W: Write + ?Sized>(&self, w: &mut W) {
        self.check(w.flush())
    }

    pub fn copy<R, W>(&self, r: &mut R, w: &mut W) -> u64
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        self.check(io::copy(r, w))
    }

    pub fn encode<E, T>(&self, e: &mut E, value: &T)
    where
        E: Encoder,
        T: Serialize + ?Sized,
    {
        self.check(e.encode(value))
    }

    pub fn decode<D, T>(&self, d: &mut D) -> T
    where
        D: Decoder,
        T: DeserializeOwned,
    {
        self.check(d.decode())
    }

    pub fn marshal_json<T: Serialize + ?Sized>(&self, value: &T) -> Vec<u8> {
        self.check(serde_json::to_vec(value))
    }

    pub fn unmarshal_json<'a, T: Deserialize<'a>>(&self, data: &'a [u8]) -> T {
        self.check(serde_json::from_slice(data))
    }

    /// Parses a signed decimal integer.
    pub fn parse_int(&self, buf: &[u8]) -> i64 {
        let s = self.check(std::str::from_utf8(buf));
        self.check(s.parse::<i64>())
    }
}
