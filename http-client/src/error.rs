use reqwest::StatusCode;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to build HTTP client"))]
    Build {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: reqwest::Error,
    },
    #[snafu(display("HTTP transport error"))]
    Transport {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: reqwest_middleware::Error,
    },
    #[snafu(display("Failed to read HTTP response body"))]
    Body {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: reqwest::Error,
    },
    #[snafu(display("HTTP request failed, status: '{status}', url: '{url}', body: '{body}'"))]
    FailedRequest {
        #[snafu(implicit)]
        location: Location,
        url: String,
        status: StatusCode,
        body: String,
    },
    #[snafu(display("Failed to decode response body, url: '{url}'"))]
    Decode {
        #[snafu(implicit)]
        location: Location,
        url: String,
        #[snafu(source)]
        error: serde_json::Error,
    },
}

impl From<reqwest_middleware::Error> for Error {
    #[track_caller]
    fn from(error: reqwest_middleware::Error) -> Self {
        Error::Transport {
            location: caller_location(),
            error,
        }
    }
}

impl From<reqwest::Error> for Error {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        Error::Body {
            location: caller_location(),
            error,
        }
    }
}

#[track_caller]
fn caller_location() -> Location {
    let location = std::panic::Location::caller();
    Location::new(location.file(), location.line(), location.column())
}
