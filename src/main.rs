mod logger;
mod options;

use std::convert::TryFrom;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use must::{JsonDecoder, JsonEncoder};
use options::{Command, Options};
use structopt::StructOpt;

fn cat(paths: &[PathBuf]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for path in paths {
        log::debug!("cat '{}'", path.display());
        let mut f = must::open(path);
        must::copy(&mut f, &mut out);
    }
    must::flush(&mut out);
}

fn cp(src: &Path, dst: &Path, sync: bool) {
    log::info!("copy '{}' to '{}'", src.display(), dst.display());
    let mut r = BufReader::new(must::open(src));
    let mut w = BufWriter::new(must::create(dst));
    let n = must::copy(&mut r, &mut w);
    must::flush(&mut w);
    if sync {
        must::sync(w.get_ref());
    }
    must::close(w);
    log::debug!("copied {} bytes", n);
}

fn ls(dir: &Path) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for entry in must::read_dir(dir) {
        let kind = must::check(entry.file_type());
        let slash = if kind.is_dir() { "/" } else { "" };
        must::check(writeln!(out, "{}{}", entry.file_name().to_string_lossy(), slash));
    }
}

fn stat(path: &Path) {
    let md = must::stat_path(path);
    let kind = if md.is_dir() {
        "directory"
    } else if md.is_file() {
        "file"
    } else {
        "other"
    };
    let modified: DateTime<Local> = must::check(md.modified()).into();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    must::check(writeln!(
        out,
        "{}\t{}\t{}\t{}",
        path.display(),
        kind,
        md.len(),
        modified.format("%Y-%m-%d %H:%M:%S")
    ));
}

fn truncate(path: &Path, size: &str) {
    let size = must::parse_int(size.as_bytes());
    let size = must::check(u64::try_from(size).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("negative size {}", size))
    }));
    log::info!("truncate '{}' to {} bytes", path.display(), size);
    must::truncate_path(path, size);
}

fn json(path: &Path) {
    let mut d = JsonDecoder::new(BufReader::new(must::open(path)));
    let stdout = io::stdout();
    let mut e = JsonEncoder::new(stdout.lock());
    let mut count = 0;
    while d.more() {
        let value: serde_json::Value = must::decode(&mut d);
        must::encode(&mut e, &value);
        count += 1;
    }
    must::flush(&mut e.into_inner());
    log::debug!("{} documents", count);
}

fn mktemp(directory: bool, tmpdir: Option<&Path>, pattern: &str) {
    let path = if directory {
        must::temp_dir(tmpdir, pattern)
    } else {
        let (path, f) = must::temp_file(tmpdir, pattern);
        must::close(f);
        path
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    must::check(writeln!(out, "{}", path.display()));
}

fn run(command: &Command) {
    match command {
        Command::Cat { paths } => cat(paths),
        Command::Cp { src, dst, sync } => cp(src, dst, *sync),
        Command::Mv { src, dst } => {
            log::info!("rename '{}' to '{}'", src.display(), dst.display());
            must::rename(src, dst)
        }
        Command::Rm { paths } => {
            for path in paths {
                log::info!("remove '{}'", path.display());
                must::remove(path);
            }
        }
        Command::Ls { dir } => ls(dir),
        Command::Stat { path } => stat(path),
        Command::Truncate { path, size } => truncate(path, size),
        Command::Json { path } => json(path),
        Command::Mktemp {
            directory,
            tmpdir,
            pattern,
        } => mktemp(*directory, tmpdir.as_deref(), pattern),
    }
}

fn main() {
    let opts = Options::from_args();
    if let Err(err) = logger::setup(opts.verbose) {
        panic!("cannot set up logging: {}", err);
    }
    log::debug!("verbosity {}, policy {:?}", opts.verbose, opts.policy);

    // With the panic policy a failure unwinds out of main and ends the
    // process with status 101.
    must::set_policy(opts.policy);
    run(&opts.command);
}
