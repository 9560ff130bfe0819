use serde::Deserialize;

use crate::TourRecord;

/// Body returned by the CORS relay: the target's payload travels as a JSON
/// string inside `contents`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayEnvelope {
    #[serde(default)]
    pub contents: Option<String>,
    #[serde(default)]
    pub status: Option<RelayStatus>,
}

/// Upstream metadata reported by the relay. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayStatus {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub http_code: Option<u16>,
    #[serde(default)]
    pub response_time: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid relay envelope: {0}")]
    Envelope(#[source] serde_json::Error),
    #[error("relay envelope has no contents")]
    MissingContents,
    #[error("invalid tours payload: {0}")]
    Payload(#[source] serde_json::Error),
}

/// Decodes the relay body into tour records: envelope first, then the
/// JSON-encoded `contents` string a second time.
pub fn decode_envelope(bytes: &[u8]) -> Result<(Vec<TourRecord>, Option<RelayStatus>), DecodeError> {
    let envelope: RelayEnvelope = serde_json::from_slice(bytes).map_err(DecodeError::Envelope)?;
    let contents = envelope.contents.ok_or(DecodeError::MissingContents)?;
    let tours: Vec<TourRecord> = serde_json::from_str(&contents).map_err(DecodeError::Payload)?;
    Ok((tours, envelope.status))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::RecordId;

    #[test]
    fn decodes_double_encoded_contents() {
        let body = br#"{"contents":"[{\"id\":\"rec6d6T3q5EBIdCfD\",\"name\":\"Best of Paris in 7 Days Tour\",\"info\":\"Paris is synonymous with the finest things.\",\"image\":\"https://www.course-api.com/images/tours/tour-1.jpeg\",\"price\":\"1,995\"}]","status":{"url":"https://course-api.com/react-tours-project","content_type":"application/json; charset=utf-8","http_code":200,"response_time":112}}"#;

        let (tours, status) = decode_envelope(body).unwrap();

        assert_eq!(tours.len(), 1);
        assert_eq!(tours[0].id, RecordId::Text("rec6d6T3q5EBIdCfD".to_string()));
        assert_eq!(tours[0].price, "1,995");
        assert_eq!(status.unwrap().http_code, Some(200));
    }

    #[test]
    fn numeric_price_and_missing_fields_become_text() {
        let body = br#"{"contents":"[{\"id\":1,\"price\":10,\"extra\":true}]"}"#;

        let (tours, status) = decode_envelope(body).unwrap();

        assert!(status.is_none());
        assert_eq!(
            tours,
            vec![TourRecord {
                id: RecordId::Number(1.into()),
                name: String::new(),
                info: String::new(),
                image: String::new(),
                price: "10".to_string(),
            }]
        );
    }

    #[test]
    fn fractional_numeric_id_is_accepted() {
        let body = br#"{"contents":"[{\"id\":1.5,\"name\":\"Half\"}]"}"#;

        let (tours, _) = decode_envelope(body).unwrap();

        assert_eq!(tours[0].id.to_string(), "1.5");
        assert_eq!(tours[0].name, "Half");
    }

    #[test]
    fn numeric_id_beyond_i64_is_accepted() {
        let body = br#"{"contents":"[{\"id\":18446744073709551615,\"name\":\"Max\"}]"}"#;

        let (tours, _) = decode_envelope(body).unwrap();

        assert_eq!(tours[0].id, RecordId::Number(u64::MAX.into()));
        assert_eq!(tours[0].id.to_string(), "18446744073709551615");
    }

    #[test]
    fn null_contents_is_missing() {
        let err = decode_envelope(br#"{"contents":null}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingContents));
    }

    #[test]
    fn contents_must_be_an_array() {
        let err = decode_envelope(br#"{"contents":"{\"id\":1}"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Payload(_)));
    }

    #[test]
    fn record_without_id_is_rejected() {
        let err = decode_envelope(br#"{"contents":"[{\"name\":\"A\"}]"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Payload(_)));
    }

    #[test]
    fn non_json_body_is_an_envelope_error() {
        let err = decode_envelope(b"<html>nope</html>").unwrap_err();
        assert!(matches!(err, DecodeError::Envelope(_)));
    }
}
