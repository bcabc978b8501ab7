//! Generators for upstream village forecast payloads.
//!
//! These build the JSON and XML documents the forecast service returns so
//! client and service tests can run against a mock server.

use chrono::{Duration, NaiveDateTime};
use forecast_common::ForecastWindow;
use serde_json::{json, Value};

/// One forecast item: (category, fcstDate, fcstTime, fcstValue).
pub type Item<'a> = (&'a str, &'a str, &'a str, &'a str);

/// Builds a successful `getVilageFcst` JSON response holding `items`.
///
/// # Example
///
/// ```
/// use test_utils::village_forecast_payload;
///
/// let payload = village_forecast_payload(&[("TMP", "20240515", "1200", "21")]);
/// assert_eq!(payload["response"]["header"]["resultCode"], "00");
/// ```
pub fn village_forecast_payload(items: &[Item<'_>]) -> Value {
    let item: Vec<Value> = items
        .iter()
        .map(|(category, date, time, value)| {
            json!({
                "baseDate": "20240515",
                "baseTime": "1100",
                "category": category,
                "fcstDate": date,
                "fcstTime": time,
                "fcstValue": value,
                "nx": 60,
                "ny": 127
            })
        })
        .collect();

    json!({
        "response": {
            "header": { "resultCode": "00", "resultMsg": "NORMAL_SERVICE" },
            "body": {
                "dataType": "JSON",
                "items": { "item": item },
                "pageNo": 1,
                "numOfRows": 1000,
                "totalCount": items.len()
            }
        }
    })
}

/// Builds an hourly series for each category starting at the window's
/// issue time, with values `base + hour offset`.
pub fn hourly_series(window: &ForecastWindow, categories: &[&str], hours: u32, base: i32) -> Value {
    let start: NaiveDateTime = window.issued_at();
    let mut rows = Vec::new();
    for hour in 0..hours {
        let at = start + Duration::hours(hour as i64);
        for category in categories {
            rows.push((
                category.to_string(),
                at.format("%Y%m%d").to_string(),
                at.format("%H%M").to_string(),
                (base + hour as i32).to_string(),
            ));
        }
    }
    let items: Vec<Item<'_>> = rows
        .iter()
        .map(|(c, d, t, v)| (c.as_str(), d.as_str(), t.as_str(), v.as_str()))
        .collect();
    village_forecast_payload(&items)
}

/// Builds an API-level error response (result code other than "00").
pub fn api_error_payload(code: &str, message: &str) -> Value {
    json!({
        "response": {
            "header": { "resultCode": code, "resultMsg": message }
        }
    })
}

/// Builds a successful response whose body carries no items.
pub fn empty_items_payload() -> Value {
    json!({
        "response": {
            "header": { "resultCode": "00", "resultMsg": "NORMAL_SERVICE" },
            "body": {
                "dataType": "JSON",
                "items": { "item": [] },
                "pageNo": 1,
                "numOfRows": 1000,
                "totalCount": 0
            }
        }
    })
}

/// Builds the XML envelope the data portal gateway returns for key or
/// quota errors.
pub fn gateway_error_xml(reason_code: &str, auth_msg: &str) -> String {
    format!(
        "<OpenAPI_ServiceResponse>\
           <cmmMsgHeader>\
             <errMsg>SERVICE ERROR</errMsg>\
             <returnAuthMsg>{auth_msg}</returnAuthMsg>\
             <returnReasonCode>{reason_code}</returnReasonCode>\
           </cmmMsgHeader>\
         </OpenAPI_ServiceResponse>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use forecast_common::IssueSlot;

    #[test]
    fn test_hourly_series_shape() {
        let window = ForecastWindow::new(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(), IssueSlot::H2300);
        let payload = hourly_series(&window, &["TMP", "POP"], 3, 10);
        let items = payload["response"]["body"]["items"]["item"].as_array().unwrap();

        assert_eq!(items.len(), 6);
        assert_eq!(items[0]["fcstTime"], "2300");
        // Crosses midnight
        assert_eq!(items[2]["fcstDate"], "20240516");
        assert_eq!(items[2]["fcstTime"], "0000");
        assert_eq!(items[5]["fcstValue"], "12");
    }

    #[test]
    fn test_gateway_error_xml() {
        let xml = gateway_error_xml("30", "SERVICE_KEY_IS_NOT_REGISTERED_ERROR");
        assert!(xml.contains("<returnReasonCode>30</returnReasonCode>"));
    }
}
