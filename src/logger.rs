use core::result;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Coloured records on stderr, `verbose` from 0 (off) to 5 (trace).
pub fn setup(verbose: u8) -> result::Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    fern::Dispatch::new()
        .format(move |out, msg, rec| {
            out.finish(format_args!(
                "{} - {} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                rec.target(),
                colors.color(rec.level()),
                msg
            ))
        })
        .level(level(verbose))
        .chain(std::io::stderr())
        .apply()
        .map_err(fern::InitError::SetLoggerError)
}

#[cfg(test)]
mod test {
    use log::LevelFilter;

    use crate::logger::level;

    #[test]
    fn test_level() {
        assert_eq!(LevelFilter::Off, level(0));
        assert_eq!(LevelFilter::Warn, level(2));
        assert_eq!(LevelFilter::Trace, level(9));
    }
}
