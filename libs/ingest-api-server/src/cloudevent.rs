use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use ingest_api::event::Event;

use crate::error::ApiError;

pub const STRUCTURED_CONTENT_TYPE: &str = "application/cloudevents+json";

/// CloudEvent received over HTTP, in either binary or structured content mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudEvent {
    pub id: Option<String>,
    pub source: String,
    pub event_type: Option<String>,
    pub data: Vec<u8>,
}

/// Structured-mode JSON envelope.
#[derive(Deserialize)]
struct Envelope {
    id: Option<String>,
    source: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    data_base64: Option<String>,
}

impl CloudEvent {
    pub fn from_http(headers: &HeaderMap, body: Bytes) -> Result<Self, ApiError> {
        let structured = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with(STRUCTURED_CONTENT_TYPE));

        if structured {
            Self::from_structured(&body)
        } else {
            Self::from_binary(headers, body)
        }
    }

    fn from_binary(headers: &HeaderMap, body: Bytes) -> Result<Self, ApiError> {
        let header = |name: &str| -> Result<Option<String>, ApiError> {
            headers
                .get(name)
                .map(|v| {
                    v.to_str()
                        .map(str::to_owned)
                        .map_err(|e| ApiError::Envelope(format!("header {name}: {e}")))
                })
                .transpose()
        };

        let source = header("ce-source")?
            .ok_or_else(|| ApiError::Envelope("missing ce-source header".into()))?;

        Ok(Self {
            id: header("ce-id")?,
            source,
            event_type: header("ce-type")?,
            data: body.to_vec(),
        })
    }

    fn from_structured(body: &[u8]) -> Result<Self, ApiError> {
        let envelope: Envelope =
            serde_json::from_slice(body).map_err(|e| ApiError::Envelope(e.to_string()))?;

        let source = envelope
            .source
            .ok_or_else(|| ApiError::Envelope("missing source attribute".into()))?;

        let data = match (envelope.data_base64, envelope.data) {
            (Some(encoded), _) => STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| ApiError::Envelope(format!("data_base64: {e}")))?,
            (None, Some(serde_json::Value::String(text))) => text.into_bytes(),
            (None, Some(serde_json::Value::Null)) | (None, None) => Vec::new(),
            (None, Some(other)) => other.to_string().into_bytes(),
        };

        Ok(Self {
            id: envelope.id,
            source,
            event_type: envelope.event_type,
            data,
        })
    }

    /// Payload as text for string-typed functions.
    ///
    /// A JSON string literal is unwrapped, anything else is taken verbatim.
    pub fn text(&self) -> Result<String, ApiError> {
        let text = String::from_utf8(self.data.clone())
            .map_err(ingest_api::error::RouteError::from)?;
        Ok(serde_json::from_str::<String>(&text).unwrap_or(text))
    }

    pub fn into_event(self) -> Event {
        Event::new(self.source, self.data)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn binary_headers(source: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("ce-id", HeaderValue::from_static("1"));
        headers.insert("ce-specversion", HeaderValue::from_static("1.0"));
        headers.insert("ce-type", HeaderValue::from_static("router"));
        headers.insert("ce-source", HeaderValue::from_str(source).unwrap());
        headers
    }

    #[test]
    fn binary_mode() {
        let ev = CloudEvent::from_http(&binary_headers("svc#inbox"), Bytes::from_static(b"raw"))
            .unwrap();
        assert_eq!(ev.source, "svc#inbox");
        assert_eq!(ev.event_type.as_deref(), Some("router"));
        assert_eq!(ev.id.as_deref(), Some("1"));
        assert_eq!(ev.data, b"raw");
    }

    #[test]
    fn binary_mode_requires_source() {
        let err = CloudEvent::from_http(&HeaderMap::new(), Bytes::new()).unwrap_err();
        assert!(matches!(err, ApiError::Envelope(_)));
    }

    fn structured(body: &str) -> Result<CloudEvent, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/cloudevents+json; charset=utf-8"),
        );
        CloudEvent::from_http(&headers, Bytes::from(body.to_string()))
    }

    #[test]
    fn structured_mode_string_data() {
        let ev = structured(r#"{"specversion":"1.0","id":"7","type":"router","source":"svc#avro","data":"hello"}"#)
            .unwrap();
        assert_eq!(ev.source, "svc#avro");
        assert_eq!(ev.data, b"hello");
    }

    #[test]
    fn structured_mode_base64_data() {
        let ev = structured(r#"{"source":"svc#avro","data_base64":"aGVsbG8="}"#).unwrap();
        assert_eq!(ev.data, b"hello");
    }

    #[test]
    fn structured_mode_object_data_is_serialized() {
        let ev = structured(r#"{"source":"s#x","data":{"k":1}}"#).unwrap();
        assert_eq!(ev.data, br#"{"k":1}"#);
    }

    #[test]
    fn structured_mode_errors() {
        assert!(matches!(structured(r#"{"data":"x"}"#), Err(ApiError::Envelope(_))));
        assert!(matches!(structured("not json"), Err(ApiError::Envelope(_))));
        assert!(matches!(
            structured(r#"{"source":"s","data_base64":"!!"}"#),
            Err(ApiError::Envelope(_))
        ));
    }

    #[test]
    fn text_unwraps_json_strings() {
        let mut ev = CloudEvent {
            id: None,
            source: "s".into(),
            event_type: None,
            data: br#""quoted""#.to_vec(),
        };
        assert_eq!(ev.text().unwrap(), "quoted");

        ev.data = b"plain".to_vec();
        assert_eq!(ev.text().unwrap(), "plain");

        ev.data = vec![0xff];
        assert!(matches!(ev.text(), Err(ApiError::Route(_))));
    }
}
