//! Turns a received response into the decoded payload or a classified failure.

use entity::messages::ErrorBody;
use log::*;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, GENERIC_REJECTION_MESSAGE};

pub(crate) async fn into_outcome<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to decode {status} response body: {e}");
            Error::from(e)
        });
    }

    Err(Error::new(classify(status, &body)))
}

/// Maps a non-success status and its body to an error kind.
pub(crate) fn classify(status: StatusCode, body: &[u8]) -> ErrorKind {
    let message = server_message(body);
    match status {
        StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
        s if s.is_client_error() => ErrorKind::Client {
            status: s.as_u16(),
            message,
        },
        s => ErrorKind::Server {
            status: s.as_u16(),
            message,
        },
    }
}

/// The server's conventional error field, else a generic message.
fn server_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::message)
        .unwrap_or_else(|| GENERIC_REJECTION_MESSAGE.to_string())
}
