use std::fmt::{Debug, Display, Formatter};
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::str::Utf8Error;

/// Whatever the wrapped operation reported.
///
/// The variants only record where the failure came from. Every one of them
/// is handed to the abort policy the same way.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Path(&'static str, PathBuf, io::Error),
    Json(serde_json::Error),
    ParseInt(ParseIntError),
    Utf8(Utf8Error),
    Codec(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Error::Io(err) => Some(err),
            Error::Path(_, _, err) => Some(err),
            _ => None,
        }
    }

    /// Process status used by the exiting policy.
    pub fn exit_code(&self) -> i32 {
        match self.io_error().and_then(|err| err.raw_os_error()) {
            Some(code) if code > 0 && code < 256 => code,
            _ => 1,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => Display::fmt(err, f),
            Error::Path(op, path, err) => write!(f, "{} {}: {}", op, path.display(), err),
            Error::Json(err) => Display::fmt(err, f),
            Error::ParseInt(err) => Display::fmt(err, f),
            Error::Utf8(err) => Display::fmt(err, f),
            Error::Codec(err) => Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Path(_, _, err) => Some(err),
            Error::Json(err) => Some(err),
            Error::ParseInt(err) => Some(err),
            Error::Utf8(err) => Some(err),
            Error::Codec(err) => Some(err.as_ref()),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Error::ParseInt(err)
    }
}

impl From<Utf8Error> for Error {
    fn from(err: Utf8Error) -> Self {
        Error::Utf8(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Error {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Error::Codec(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use std::io;
    use std::path::PathBuf;

    use crate::error::Error;

    #[test]
    fn test_path_display() {
        let err = Error::Path(
            "open",
            PathBuf::from("/no/such/file"),
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!("open /no/such/file: not found", err.to_string());
    }

    #[test]
    fn test_exit_code() {
        let err = Error::Io(io::Error::from_raw_os_error(2));
        assert_eq!(2, err.exit_code());
        let err = Error::Io(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(1, err.exit_code());
        let err: Error = "abc".parse::<i64>().unwrap_err().into();
        assert_eq!(1, err.exit_code());
    }

    #[test]
    fn test_source() {
        use std::error::Error as _;
        let err: Error = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(err.source().is_some());
        assert!(err.io_error().is_some());
    }
}
