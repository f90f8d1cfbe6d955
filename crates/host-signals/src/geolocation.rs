//! One-shot location lookup over HTTPS.
//!
//! The host has no positioning hardware we can rely on, so the position is
//! resolved from the public IP address. Any service returning either the
//! ipinfo.io shape (`"loc": "lat,lng"`) or explicit `latitude`/`longitude`
//! fields is accepted.

use crate::error::SignalError;
use crate::types::Position;
use serde::Deserialize;

/// Default lookup endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://ipinfo.io/json";

#[derive(Debug, Deserialize)]
struct LocationBody {
    #[serde(default)]
    loc: Option<String>,
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lon", alias = "lng")]
    longitude: Option<f64>,
    #[serde(default)]
    accuracy: Option<f64>,
}

/// Queries `endpoint` once and returns the reported position (blocking).
///
/// # Errors
///
/// Returns [`SignalError`] if:
/// - the request fails or times out
/// - the server answers with a non-200 status
/// - the body carries no usable coordinates
#[cfg(feature = "blocking")]
pub fn locate(endpoint: &str, timeout: std::time::Duration) -> Result<Position, SignalError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SignalError::Network(e.to_string()))?;

    let response = client
        .get(endpoint)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| SignalError::Network(e.to_string()))?;

    let body = map_response(response)?;
    parse_position(&body)
}

#[cfg(feature = "blocking")]
fn map_response(response: reqwest::blocking::Response) -> Result<String, SignalError> {
    let status = response.status().as_u16();
    match status {
        200 => response
            .text()
            .map_err(|e| SignalError::Network(e.to_string())),
        _ => Err(SignalError::Http(status)),
    }
}

/// Extracts a position from a lookup response body.
pub fn parse_position(body: &str) -> Result<Position, SignalError> {
    let parsed: LocationBody =
        serde_json::from_str(body).map_err(|e| SignalError::Parse(e.to_string()))?;

    let (latitude, longitude) = match (parsed.latitude, parsed.longitude, parsed.loc.as_deref()) {
        (Some(lat), Some(lng), _) => (lat, lng),
        (_, _, Some(loc)) => parse_loc(loc)?,
        _ => return Err(SignalError::Parse("no coordinates in response".to_string())),
    };

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(SignalError::Parse(format!(
            "coordinates out of range: {}, {}",
            latitude, longitude
        )));
    }

    Ok(Position {
        latitude,
        longitude,
        accuracy: parsed.accuracy.filter(|a| a.is_finite() && *a >= 0.0),
    })
}

fn parse_loc(loc: &str) -> Result<(f64, f64), SignalError> {
    let (lat, lng) = loc
        .split_once(',')
        .ok_or_else(|| SignalError::Parse(format!("malformed loc: {}", loc)))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| SignalError::Parse(format!("latitude: {}", e)))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|e| SignalError::Parse(format!("longitude: {}", e)))?;
    Ok((lat, lng))
}
