use fleet_core::Error;

/// Maps transport errors onto the error kinds the pages act on.
pub(crate) trait IntoCoreError<T> {
    fn into_core(self) -> fleet_core::Result<T>;
}

impl<T> IntoCoreError<T> for http_client::Result<T> {
    #[track_caller]
    fn into_core(self) -> fleet_core::Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(to_core(e)),
        }
    }
}

#[track_caller]
pub(crate) fn to_core(error: http_client::Error) -> Error {
    match error {
        http_client::Error::FailedRequest {
            url, status, body, ..
        } => Error::http_status(status.as_u16(), url, body),
        e @ http_client::Error::Decode { .. } => Error::decode(e),
        e @ (http_client::Error::Build { .. }
        | http_client::Error::Transport { .. }
        | http_client::Error::Body { .. }) => Error::network(e),
    }
}
