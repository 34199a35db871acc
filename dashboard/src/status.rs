use fleet_core::ErrorKind;
use tracing::error;

/// Loading flag and last failure of a page, bound by the view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewStatus {
    pub loading: bool,
    pub error: Option<StatusError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusError {
    /// A call against the api failed.
    Api {
        action: &'static str,
        kind: ErrorKind,
        status: Option<u16>,
        message: String,
    },
    /// A form was submitted with missing or malformed input, nothing was sent.
    Invalid { message: String },
}

impl ViewStatus {
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }

    pub fn fail(&mut self, action: &'static str, e: &fleet_core::Error) {
        error!("{action} failed: {e:?}");
        self.error = Some(StatusError::Api {
            action,
            kind: e.kind(),
            status: e.status(),
            message: e.to_string(),
        });
    }

    pub fn invalid(&mut self, e: &impl std::fmt::Display) {
        self.error = Some(StatusError::Invalid {
            message: e.to_string(),
        });
    }

    /// Returns the value on success, records the failure otherwise.
    pub fn check<T>(&mut self, action: &'static str, result: fleet_core::Result<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.fail(action, &e);
                None
            }
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match &self.error {
            Some(StatusError::Api { kind, .. }) => Some(*kind),
            Some(StatusError::Invalid { .. }) | None => None,
        }
    }
}
