use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};
use crate::message::SyncMessage;

/// Encoding of sync messages at the transport edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON format (what notebook front-ends speak).
    #[default]
    Json,

    /// CBOR format (compact binary).
    Cbor,
}

impl Format {
    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Cbor => "application/cbor",
        }
    }
}

/// Encode a value to bytes using the specified format.
pub fn encode<T: Serialize>(value: &T, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Json => serde_json::to_vec(value).map_err(Error::from),
        Format::Cbor => {
            let mut buf = Vec::new();
            ciborium::into_writer(value, &mut buf)?;
            Ok(buf)
        }
    }
}

/// Decode bytes to a value using the specified format.
pub fn decode<T: DeserializeOwned>(data: &[u8], format: Format) -> Result<T> {
    match format {
        Format::Json => serde_json::from_slice(data).map_err(Error::from),
        Format::Cbor => ciborium::from_reader(data).map_err(|e| Error::Cbor(e.to_string())),
    }
}

/// Try to auto-detect the format from the data.
///
/// Returns `Json` if the data starts with `{` or `[`, otherwise `Cbor`.
pub fn detect_format(data: &[u8]) -> Format {
    match data.first() {
        Some(b'{') | Some(b'[') => Format::Json,
        _ => Format::Cbor,
    }
}

/// Decode bytes, auto-detecting the format.
pub fn decode_auto<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    let format = detect_format(data);
    decode(data, format)
}

/// Encode a sync message for the transport.
pub fn encode_message(message: &SyncMessage, format: Format) -> Result<Vec<u8>> {
    let bytes = encode(message, format)?;
    tracing::trace!(
        model_id = %message.model_id,
        method = %message.method,
        format = format.mime_type(),
        len = bytes.len(),
        "Encoded sync message"
    );
    Ok(bytes)
}

/// Decode a sync message from the remote side.
///
/// Front-ends may answer in either encoding, so the format is detected.
pub fn decode_message(data: &[u8]) -> Result<SyncMessage> {
    let format = detect_format(data);
    decode(data, format).map_err(|e| {
        tracing::warn!(format = format.mime_type(), len = data.len(), error = %e, "Undecodable sync message");
        e
    })
}
