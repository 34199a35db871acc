use std::num::ParseIntError;

use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a call against the dashboard api.
///
/// Transport failures, non-success statuses and unexpected response bodies are kept apart so a
/// view can decide how to present each of them, see [`ErrorKind`].
#[derive(Debug, Snafu, strum::EnumDiscriminants)]
#[snafu(visibility(pub(crate)))]
#[strum_discriminants(name(ErrorKind), derive(strum::Display))]
pub enum Error {
    #[snafu(display("Network error"))]
    Network {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: BoxedError,
    },
    #[snafu(display("Request failed, status: '{status}', url: '{url}', body: '{body}'"))]
    HttpStatus {
        #[snafu(implicit)]
        location: Location,
        status: u16,
        url: String,
        body: String,
    },
    #[snafu(display("Failed to decode response"))]
    Decode {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: BoxedError,
    },
}

impl Error {
    #[track_caller]
    pub fn network(error: impl Into<BoxedError>) -> Self {
        Error::Network {
            location: caller_location(),
            error: error.into(),
        }
    }

    #[track_caller]
    pub fn decode(error: impl Into<BoxedError>) -> Self {
        Error::Decode {
            location: caller_location(),
            error: error.into(),
        }
    }

    #[track_caller]
    pub fn http_status(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Error::HttpStatus {
            location: caller_location(),
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from(self)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Network { .. } | Error::Decode { .. } => None,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum VoyageIdError {
    #[snafu(display("Voyage id '{id}' is not of the form 'mmsi-year-voyage_no'"))]
    Format {
        #[snafu(implicit)]
        location: Location,
        id: String,
    },
    #[snafu(display("Failed to parse part of voyage id '{id}'"))]
    Parse {
        #[snafu(implicit)]
        location: Location,
        id: String,
        #[snafu(source)]
        error: ParseIntError,
    },
}

#[track_caller]
fn caller_location() -> Location {
    let location = std::panic::Location::caller();
    Location::new(location.file(), location.line(), location.column())
}
