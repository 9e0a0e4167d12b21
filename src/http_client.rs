use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::FetchError;

const USER_AGENT: &str = concat!("pitchcast/", env!("CARGO_PKG_VERSION"));
const SNIPPET_CHARS: usize = 220;

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build http client")
    })
}

/// Sends the request and returns the body of a successful response.
pub fn send_for_text(req: RequestBuilder) -> Result<String, FetchError> {
    let resp = req.send().map_err(transport_error)?;
    let status = resp.status();
    let body = resp.text().map_err(transport_error)?;
    classify_response(status, body)
}

pub fn classify_response(status: StatusCode, body: String) -> Result<String, FetchError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimited);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound);
    }
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            snippet: snippet(&body),
        });
    }
    Ok(body)
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Transport(format!("request timed out: {err}"))
    } else {
        FetchError::Transport(err.to_string())
    }
}

pub(crate) fn snippet(body: &str) -> String {
    body.trim()
        .replace(['\n', '\r'], " ")
        .chars()
        .take(SNIPPET_CHARS)
        .collect()
}
