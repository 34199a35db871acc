use std::path::PathBuf;

use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to load settings"))]
    Config {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: config::ConfigError,
    },
    #[snafu(display("Api call failed"))]
    Api {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: fleet_core::Error,
    },
    #[snafu(display("Failed to write csv"))]
    Csv {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: csv::Error,
    },
    #[snafu(display("IO error on '{}'", path.display()))]
    Io {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
}

impl From<fleet_core::Error> for Error {
    #[track_caller]
    fn from(error: fleet_core::Error) -> Self {
        let location = std::panic::Location::caller();
        Error::Api {
            location: Location::new(location.file(), location.line(), location.column()),
            error,
        }
    }
}
