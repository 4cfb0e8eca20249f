//! Query parameter parsing.
//!
//! Everything arrives as untyped strings; these helpers turn them into the
//! typed values the dispatchers need. Any failure here short-circuits to a
//! Bad Request before persistence is touched.

use axum::http::Method;
use std::collections::HashMap;

pub type ParamMap = HashMap<String, String>;

/// A parameter that is missing, malformed or out of range. The user-facing
/// message is fixed by the outcome translator, so no payload is carried.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseFailure;

/// The domain operation the client asked for, read from the `method`
/// override parameter (case-insensitive) and falling back to the transport
/// verb when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedMethod {
    Get,
    Post,
    Put,
    Delete,
    Unsupported,
}

pub fn requested_method(params: &ParamMap, transport: &Method) -> RequestedMethod {
    let verb = match params.get("method") {
        Some(overridden) => overridden.as_str(),
        None => transport.as_str(),
    };
    if verb.eq_ignore_ascii_case("GET") {
        RequestedMethod::Get
    } else if verb.eq_ignore_ascii_case("POST") {
        RequestedMethod::Post
    } else if verb.eq_ignore_ascii_case("PUT") {
        RequestedMethod::Put
    } else if verb.eq_ignore_ascii_case("DELETE") {
        RequestedMethod::Delete
    } else {
        RequestedMethod::Unsupported
    }
}

/// Zero-indexed page number; absent defaults to the first page.
pub fn page(params: &ParamMap) -> Result<u32, ParseFailure> {
    match params.get("page") {
        None => Ok(0),
        Some(raw) => raw.parse::<u32>().map_err(|_| ParseFailure),
    }
}

/// A required integer parameter, any sign.
pub fn required_i64(params: &ParamMap, name: &str) -> Result<i64, ParseFailure> {
    params
        .get(name)
        .ok_or(ParseFailure)?
        .parse::<i64>()
        .map_err(|_| ParseFailure)
}

/// A required integer parameter that must not be negative.
pub fn non_negative_i64(params: &ParamMap, name: &str) -> Result<i64, ParseFailure> {
    let value = required_i64(params, name)?;
    if value < 0 {
        return Err(ParseFailure);
    }
    Ok(value)
}

/// An optional integer parameter; absent or empty means "no value".
pub fn optional_i64(params: &ParamMap, name: &str) -> Result<Option<i64>, ParseFailure> {
    match params.get(name) {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| ParseFailure),
    }
}

/// A required free-text parameter, percent-decoded before any further check.
pub fn decoded_text(params: &ParamMap, name: &str) -> Result<String, ParseFailure> {
    let raw = params.get(name).ok_or(ParseFailure)?;
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ParseFailure)
}
