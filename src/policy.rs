use std::any::Any;
use std::fmt::{Debug, Formatter};
use std::io::Write;
use std::panic;
use std::str::FromStr;
use std::sync::{Once, PoisonError, RwLock};
use std::thread;

use crate::error::{Error, Result};
use crate::must::Must;

/// What happens to a failed operation.
#[derive(Clone, Copy)]
pub enum Policy {
    /// Describe the error on stderr and end the process.
    Exit,
    /// Unwind with the error as the panic payload, see [`catch`]. The panic
    /// message shows the error description.
    Panic,
    Custom(fn(Error) -> !),
}

impl Policy {
    pub fn abort(self, err: Error) -> ! {
        match self {
            Policy::Exit => quit_err(err),
            Policy::Panic => raise(err),
            Policy::Custom(f) => f(err),
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Exit
    }
}

impl Debug for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Exit => f.write_str("Exit"),
            Policy::Panic => f.write_str("Panic"),
            Policy::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "exit" => Ok(Policy::Exit),
            "panic" => Ok(Policy::Panic),
            _ => Err(format!("unknown policy '{}', expected 'exit' or 'panic'", s)),
        }
    }
}

fn quit_code(code: i32) -> ! {
    std::process::exit(code)
}

fn quit_err(err: Error) -> ! {
    if log::log_enabled!(log::Level::Error) {
        log::error!("{}", err);
    } else {
        let _ = writeln!(std::io::stderr().lock(), "{}", err);
    }
    quit_code(err.exit_code())
}

static HOOK: Once = Once::new();

fn describe(payload: &(dyn Any + Send)) -> Option<String> {
    payload.downcast_ref::<Error>().map(|err| err.to_string())
}

// Panics carrying an `Error` print its description instead of `Box<dyn Any>`,
// everything else goes to the hook that was there before.
fn install_hook() {
    let prev = panic::take_hook();
    panic::set_hook(Box::new(move |info| match describe(info.payload()) {
        Some(msg) => {
            let current = thread::current();
            let name = current.name().unwrap_or("<unnamed>");
            let _ = writeln!(std::io::stderr().lock(), "thread '{}' aborted: {}", name, msg);
        }
        None => prev(info),
    }));
}

fn raise(err: Error) -> ! {
    if !thread::panicking() {
        HOOK.call_once(install_hook);
    }
    panic::panic_any(err)
}

static POLICY: RwLock<Policy> = RwLock::new(Policy::Exit);

/// Policy used by the free functions and by every [`Must`] without a pinned
/// one. Set it once, before any thread starts calling wrappers.
pub fn set_policy(policy: Policy) {
    log::debug!("abort policy: {:?}", policy);
    *POLICY.write().unwrap_or_else(PoisonError::into_inner) = policy;
}

pub fn policy() -> Policy {
    *POLICY.read().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `f`, turning an abort raised by [`Policy::Panic`] back into an error.
///
/// Panics that do not carry a [`Error`] keep unwinding.
pub fn catch<F, R>(f: F) -> Result<R>
where
    F: FnOnce() -> R,
{
    match panic::catch_unwind(panic::AssertUnwindSafe(f)) {
        Ok(r) => Ok(r),
        Err(payload) => match payload.downcast::<Error>() {
            Ok(err) => Err(*err),
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}

/// Extracts the value of any result, aborting through the process policy on
/// failure.
pub trait OrAbort<T>: sealed::Sealed {
    fn or_abort(self) -> T;
}

impl<T, E> OrAbort<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn or_abort(self) -> T {
        Must::new().check(self)
    }
}

mod sealed {
    pub trait Sealed {}

    impl<T, E> Sealed for Result<T, E> {}
}

#[cfg(test)]
mod test {
    use std::io;

    use crate::error::Error;
    use crate::policy::{catch, describe, policy, set_policy, OrAbort, Policy};

    fn failure() -> io::Result<u32> {
        Err(io::Error::new(io::ErrorKind::Other, "boom"))
    }

    #[test]
    fn test_parse() {
        assert!(matches!("exit".parse::<Policy>(), Ok(Policy::Exit)));
        assert!(matches!("panic".parse::<Policy>(), Ok(Policy::Panic)));
        assert!("fatal".parse::<Policy>().is_err());
    }

    #[test]
    fn test_catch_passes_value() {
        assert_eq!(7, catch(|| 7).unwrap());
    }

    #[test]
    fn test_catch_panic_policy() {
        let err = catch(|| Policy::Panic.abort(Error::Io(failure().unwrap_err()))).unwrap_err();
        assert_eq!("boom", err.to_string());
    }

    #[test]
    fn test_describe_payload() {
        let err = Error::Io(failure().unwrap_err());
        assert_eq!(Some("boom".to_string()), describe(&err));
        assert_eq!(None, describe(&"plain"));
    }

    #[test]
    fn test_catch_resumes_foreign_panic() {
        let res = std::panic::catch_unwind(|| catch(|| panic!("not ours")));
        let payload = res.unwrap_err();
        assert_eq!(Some(&"not ours"), payload.downcast_ref::<&str>());
    }

    // The only test touching the process policy.
    #[test]
    fn test_process_policy() {
        assert!(matches!(policy(), Policy::Exit));

        set_policy(Policy::Panic);
        let err = catch(|| failure().or_abort()).unwrap_err();
        assert_eq!("boom", err.to_string());
        assert_eq!(3, catch(|| Ok::<_, io::Error>(3).or_abort()).unwrap());

        set_policy(Policy::Exit);
        assert!(matches!(policy(), Policy::Exit));
    }
}
