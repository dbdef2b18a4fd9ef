//! Form field extraction.
//!
//! Field values are returned as raw bytes so a page body is stored exactly
//! as submitted, even when it is not UTF-8.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use percent_encoding::percent_decode;

use crate::error::ServerError;

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Read the first value of form field `name`.
///
/// Values from a urlencoded or multipart body come first, then the query
/// string. A field found nowhere yields `None`. Requests without a
/// `Content-Type` are read from the query string only.
///
/// # Errors
///
/// Returns [`ServerError::BadForm`] if the body can't be read or the
/// multipart stream is malformed, and [`ServerError::UnsupportedForm`] for
/// any other content type.
pub(crate) async fn field(request: Request, name: &str) -> Result<Option<Vec<u8>>, ServerError> {
    let query = request.uri().query().map(str::to_owned);
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| mime_essence(value.as_bytes()));

    let from_body = match content_type.as_deref() {
        None => None,
        Some(URLENCODED) => {
            let body = Bytes::from_request(request, &())
                .await
                .map_err(|e| ServerError::BadForm(e.body_text()))?;
            urlencoded_value(&body, name)
        }
        Some(MULTIPART) => multipart_value(request, name).await?,
        Some(other) => return Err(ServerError::UnsupportedForm(other.to_owned())),
    };

    Ok(from_body.or_else(|| {
        query
            .as_deref()
            .and_then(|q| urlencoded_value(q.as_bytes(), name))
    }))
}

/// Media type without parameters, lowercased.
fn mime_essence(value: &[u8]) -> String {
    let value = String::from_utf8_lossy(value);
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// First value of `name` in an `application/x-www-form-urlencoded` string.
///
/// Pairs are split on `&`, `+` decodes to a space, and percent escapes decode
/// to raw bytes. Malformed escapes are kept literally.
fn urlencoded_value(input: &[u8], name: &str) -> Option<Vec<u8>> {
    input
        .split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = match pair.iter().position(|&b| b == b'=') {
                Some(i) => (&pair[..i], &pair[i + 1..]),
                None => (pair, &[][..]),
            };
            (decode(key) == name.as_bytes()).then(|| decode(value))
        })
}

fn decode(input: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = input
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

/// First part named `name` in a `multipart/form-data` body.
async fn multipart_value(request: Request, name: &str) -> Result<Option<Vec<u8>>, ServerError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ServerError::BadForm(e.body_text()))?;

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadForm(e.body_text()))?
    {
        if part.name() == Some(name) {
            let bytes = part
                .bytes()
                .await
                .map_err(|e| ServerError::BadForm(e.body_text()))?;
            return Ok(Some(bytes.to_vec()));
        }
    }
    Ok(None)
}
