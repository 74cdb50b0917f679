//! Shared request helpers for the upstream APIs.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;
use url::Url;

use super::error::{SourceError, SourceResult};

/// One JSON array response decoded record by record.
#[derive(Debug)]
pub(crate) struct RecordPage<T> {
    pub records: Vec<T>,
    /// Elements of the array that did not decode as `T`.
    pub skipped: usize,
}

impl<T> RecordPage<T> {
    /// True when the upstream array itself was empty.
    pub fn is_exhausted(&self) -> bool {
        self.records.is_empty() && self.skipped == 0
    }
}

/// Issues a single GET and decodes the JSON body.
///
/// Non-2xx statuses and bodies that do not match `T` are errors. The
/// per-request timeout comes from the shared [`Client`].
async fn get_json<T: DeserializeOwned>(client: &Client, url: Url) -> SourceResult<T> {
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| SourceError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Fetches a JSON array and decodes its elements one at a time.
///
/// A body that is not an array is an error; an element that does not decode
/// as `T` is logged and skipped.
pub(crate) async fn get_records<T: DeserializeOwned>(
    client: &Client,
    url: Url,
) -> SourceResult<RecordPage<T>> {
    let values: Vec<Value> = get_json(client, url.clone()).await?;

    let mut records = Vec::with_capacity(values.len());
    let mut skipped = 0;
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!(url = %url, index, "Skipping malformed record: {}", e);
            }
        }
    }

    Ok(RecordPage { records, skipped })
}
