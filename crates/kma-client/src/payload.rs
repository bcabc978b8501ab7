//! Binding of `getVilageFcst` responses to forecast records.
//!
//! Successful answers are JSON. Gateway-level failures (unregistered key,
//! quota exceeded) arrive as an XML `OpenAPI_ServiceResponse` document
//! regardless of the requested data type.

use chrono::NaiveDateTime;
use forecast_common::ForecastRecord;
use forecast_engine::SourceError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use tracing::warn;

/// Result code of a normal answer.
pub const RESULT_OK: &str = "00";

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Option<ResponseDto>,
}

#[derive(Debug, Deserialize)]
struct ResponseDto {
    header: Option<HeaderDto>,
    body: Option<BodyDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeaderDto {
    result_code: String,
    #[serde(default)]
    result_msg: String,
}

#[derive(Debug, Deserialize)]
struct BodyDto {
    items: Option<ItemsField>,
}

/// The service sends `"items": ""` instead of an object when a page is empty.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemsField {
    List(ItemsDto),
    #[allow(dead_code)]
    Blank(String),
}

#[derive(Debug, Deserialize)]
struct ItemsDto {
    #[serde(default)]
    item: Vec<ItemDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDto {
    category: String,
    fcst_date: String,
    fcst_time: String,
    fcst_value: String,
}

/// Parse a response body into forecast records.
///
/// Items whose target date or time cannot be read are skipped, which may
/// leave an empty list. Only a response without any item is reported as
/// [`SourceError::NoRecords`].
pub fn parse_payload(body: &str) -> Result<Vec<ForecastRecord>, SourceError> {
    let trimmed = body.trim_start();
    if trimmed.is_empty() {
        return Err(SourceError::EmptyBody);
    }

    if trimmed.starts_with('<') {
        return Err(parse_gateway_error(trimmed));
    }

    let envelope: Envelope =
        serde_json::from_str(trimmed).map_err(|e| SourceError::malformed(e.to_string()))?;
    let response = envelope
        .response
        .ok_or_else(|| SourceError::malformed("missing response"))?;
    let header = response
        .header
        .ok_or_else(|| SourceError::malformed("missing response header"))?;

    if header.result_code != RESULT_OK {
        return Err(SourceError::Api {
            code: header.result_code,
            message: header.result_msg,
        });
    }

    let items = match response.body.and_then(|b| b.items) {
        Some(ItemsField::List(items)) => items.item,
        Some(ItemsField::Blank(_)) | None => Vec::new(),
    };

    if items.is_empty() {
        return Err(SourceError::NoRecords);
    }

    let total = items.len();
    let records: Vec<ForecastRecord> = items.into_iter().filter_map(to_record).collect();

    if records.len() < total {
        warn!(skipped = total - records.len(), total, "Skipped items with unreadable target time");
    }

    Ok(records)
}

fn to_record(item: ItemDto) -> Option<ForecastRecord> {
    let stamp = format!("{}{}", item.fcst_date, item.fcst_time);
    match NaiveDateTime::parse_from_str(&stamp, "%Y%m%d%H%M") {
        Ok(forecast_at) => Some(ForecastRecord::new(item.category, forecast_at, item.fcst_value)),
        Err(e) => {
            warn!(
                category = %item.category,
                fcst_date = %item.fcst_date,
                fcst_time = %item.fcst_time,
                error = %e,
                "Unreadable forecast time"
            );
            None
        }
    }
}

/// Read `returnReasonCode` and `returnAuthMsg` from the gateway's XML envelope.
fn parse_gateway_error(xml: &str) -> SourceError {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut current: Option<&'static str> = None;
    let mut reason_code = String::new();
    let mut auth_msg = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                current = match e.name().as_ref() {
                    b"returnReasonCode" => Some("code"),
                    b"returnAuthMsg" => Some("msg"),
                    _ => None,
                };
            }
            Ok(Event::Text(t)) => {
                let text = match t.unescape() {
                    Ok(text) => text.into_owned(),
                    Err(e) => return SourceError::malformed(format!("XML text: {e}")),
                };
                match current {
                    Some("code") => reason_code.push_str(&text),
                    Some("msg") => auth_msg.push_str(&text),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => {
                return SourceError::malformed(format!(
                    "XML parsing error at position {}: {:?}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    if reason_code.is_empty() {
        return SourceError::malformed("XML response without returnReasonCode");
    }

    SourceError::Api {
        code: reason_code,
        message: auth_msg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_common::FailureKind;
    use test_utils::generators::{api_error_payload, empty_items_payload, gateway_error_xml, village_forecast_payload};

    #[test]
    fn test_parses_items() {
        let body = village_forecast_payload(&[
            ("TMP", "20240515", "1200", "21"),
            ("PCP", "20240515", "1200", "강수없음"),
        ])
        .to_string();

        let records = parse_payload(&body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, "TMP");
        assert_eq!(records[0].forecast_at.format("%Y%m%d%H%M").to_string(), "202405151200");
        assert_eq!(records[1].value, "강수없음");
    }

    #[test]
    fn test_skips_unreadable_times() {
        let body = village_forecast_payload(&[
            ("TMP", "20240515", "2500", "21"),
            ("TMP", "2024-05-15", "1200", "20"),
            ("TMP", "20240515", "1300", "22"),
        ])
        .to_string();

        let records = parse_payload(&body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "22");
    }

    #[test]
    fn test_only_unreadable_times_is_empty_not_failure() {
        let body = village_forecast_payload(&[
            ("TMP", "20240515", "2500", "21"),
            ("POP", "2024-05-15", "1200", "30"),
        ])
        .to_string();

        let records = parse_payload(&body).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_api_error_code() {
        let body = api_error_payload("03", "NO_DATA").to_string();
        match parse_payload(&body) {
            Err(SourceError::Api { code, message }) => {
                assert_eq!(code, "03");
                assert_eq!(message, "NO_DATA");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_items_is_fetch_failure() {
        let err = parse_payload(&empty_items_payload().to_string()).unwrap_err();
        assert!(matches!(err, SourceError::NoRecords));
        assert_eq!(err.failure_kind(), FailureKind::UpstreamFetchFailed);
    }

    #[test]
    fn test_blank_items_string() {
        let body = r#"{"response":{"header":{"resultCode":"00","resultMsg":"NORMAL_SERVICE"},"body":{"items":""}}}"#;
        assert!(matches!(parse_payload(body), Err(SourceError::NoRecords)));
    }

    #[test]
    fn test_missing_body() {
        let body = r#"{"response":{"header":{"resultCode":"00","resultMsg":"NORMAL_SERVICE"}}}"#;
        assert!(matches!(parse_payload(body), Err(SourceError::NoRecords)));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_payload("{\"response\": ").unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
        assert_eq!(err.failure_kind(), FailureKind::ParseFailed);

        assert!(matches!(parse_payload("{}"), Err(SourceError::Malformed(_))));
    }

    #[test]
    fn test_empty_body() {
        assert!(matches!(parse_payload(""), Err(SourceError::EmptyBody)));
        assert!(matches!(parse_payload("  \n"), Err(SourceError::EmptyBody)));
    }

    #[test]
    fn test_gateway_xml_error() {
        let xml = gateway_error_xml("30", "SERVICE_KEY_IS_NOT_REGISTERED_ERROR");
        match parse_payload(&xml) {
            Err(SourceError::Api { code, message }) => {
                assert_eq!(code, "30");
                assert_eq!(message, "SERVICE_KEY_IS_NOT_REGISTERED_ERROR");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_unrelated_xml_is_malformed() {
        assert!(matches!(
            parse_payload("<html><body>Bad Gateway</body></html>"),
            Err(SourceError::Malformed(_))
        ));
    }
}
