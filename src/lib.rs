//! Wrappers for I/O, filesystem and serialization calls that abort instead of
//! returning an error.
//!
//! Every wrapper hands a failure to the process abort [`Policy`]: by default
//! the error is printed and the process exits, [`set_policy`] can swap that
//! for a panic which [`catch`] intercepts. [`Must`] does the same with a
//! policy of its own.
//!
//! ```no_run
//! let data = must::read_file("input.bin");
//! must::write_file("output.bin", &data);
//! ```

mod capability;
mod error;
mod must;
mod policy;
mod temp;

use std::fs::{DirEntry, File, Metadata, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde::de::{Deserialize, DeserializeOwned};
use serde::Serialize;

pub use crate::capability::{Close, Decoder, Encoder, JsonDecoder, JsonEncoder, WriteAt};
pub use crate::error::{Error, Result};
pub use crate::must::Must;
pub use crate::policy::{catch, policy, set_policy, OrAbort, Policy};

/// Aborts with `err` unless it is `Ok`, returning the value.
pub fn check<T, E: Into<Error>>(res: std::result::Result<T, E>) -> T {
    Must::new().check(res)
}

pub fn open<P: AsRef<Path>>(path: P) -> File {
    Must::new().open(path)
}

pub fn create<P: AsRef<Path>>(path: P) -> File {
    Must::new().create(path)
}

pub fn open_with<P: AsRef<Path>>(path: P, options: &OpenOptions) -> File {
    Must::new().open_with(path, options)
}

pub fn close<C: Close>(c: C) {
    Must::new().close(c)
}

pub fn seek<S: Seek + ?Sized>(s: &mut S, pos: SeekFrom) -> u64 {
    Must::new().seek(s, pos)
}

pub fn stat(f: &File) -> Metadata {
    Must::new().stat(f)
}

pub fn stat_path<P: AsRef<Path>>(path: P) -> Metadata {
    Must::new().stat_path(path)
}

pub fn sync(f: &File) {
    Must::new().sync(f)
}

pub fn truncate(f: &File, size: u64) {
    Must::new().truncate(f, size)
}

pub fn truncate_path<P: AsRef<Path>>(path: P, size: u64) {
    Must::new().truncate_path(path, size)
}

pub fn remove<P: AsRef<Path>>(path: P) {
    Must::new().remove(path)
}

pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) {
    Must::new().rename(from, to)
}

pub fn temp_file(dir: Option<&Path>, pattern: &str) -> (PathBuf, File) {
    Must::new().temp_file(dir, pattern)
}

pub fn temp_dir(dir: Option<&Path>, pattern: &str) -> PathBuf {
    Must::new().temp_dir(dir, pattern)
}

pub fn read_dir<P: AsRef<Path>>(path: P) -> Vec<DirEntry> {
    Must::new().read_dir(path)
}

pub fn read<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> usize {
    Must::new().read(r, buf)
}

pub fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> usize {
    Must::new().read_full(r, buf)
}

pub fn read_all<R: Read + ?Sized>(r: &mut R) -> Vec<u8> {
    Must::new().read_all(r)
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Vec<u8> {
    Must::new().read_file(path)
}

pub fn read_to_string<P: AsRef<Path>>(path: P) -> String {
    Must::new().read_to_string(path)
}

pub fn write<W: Write + ?Sized>(w: &mut W, buf: &[u8]) -> usize {
    Must::new().write(w, buf)
}

pub fn write_at<W: WriteAt + ?Sized>(w: &mut W, buf: &[u8], offset: u64) -> usize {
    Must::new().write_at(w, buf, offset)
}

pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) {
    Must::new().write_file(path, contents)
}

pub fn flush<W: Write + ?Sized>(w: &mut W) {
    Must::new().flush(w)
}

pub fn copy<R: Read + ?Sized, W: Write + ?Sized>(r: &mut R, w: &mut W) -> u64 {
    Must::new().copy(r, w)
}

pub fn encode<E: Encoder, T: Serialize + ?Sized>(e: &mut E, value: &T) {
    Must::new().encode(e, value)
}

pub fn decode<D: Decoder, T: DeserializeOwned>(d: &mut D) -> T {
    Must::new().decode(d)
}

pub fn marshal_json<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    Must::new().marshal_json(value)
}

pub fn unmarshal_json<'a, T: Deserialize<'a>>(data: &'a [u8]) -> T {
    Must::new().unmarshal_json(data)
}

pub fn parse_int(buf: &[u8]) -> i64 {
    Must::new().parse_int(buf)
}
