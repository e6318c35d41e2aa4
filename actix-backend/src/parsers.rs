//! Request body parsing for JSON and url-encoded form submissions.

use actix_web::{web::Bytes, HttpMessage, HttpRequest};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Parses the body into a JSON value. An empty body is an empty object.
pub fn parse(req: &HttpRequest, body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let content_type = req.content_type();
    if content_type == "application/json" || content_type.ends_with("+json") {
        return serde_json::from_slice(body)
            .map_err(|e| ApiError::ParseError(format!("JSON parse error - {e}")));
    }

    if content_type == "application/x-www-form-urlencoded" {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|e| ApiError::ParseError(format!("Form parse error - {e}")))?;
        // Repeated keys keep the last value.
        let map = pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect::<Map<String, Value>>();
        return Ok(Value::Object(map));
    }

    Err(ApiError::UnsupportedMediaType(content_type.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use serde_json::json;

    fn request(content_type: &str) -> HttpRequest {
        TestRequest::post()
            .insert_header(("content-type", content_type))
            .to_http_request()
    }

    #[rstest]
    fn json_body() {
        let value = parse(&request("application/json"), &Bytes::from_static(br#"{"code": "x"}"#)).unwrap();
        assert_eq!(value, json!({ "code": "x" }));
    }

    #[rstest]
    fn json_with_charset() {
        let req = request("application/json; charset=utf-8");
        assert!(parse(&req, &Bytes::from_static(b"{}")).is_ok());
    }

    #[rstest]
    fn form_body() {
        let value = parse(
            &request("application/x-www-form-urlencoded"),
            &Bytes::from_static(b"code=print%28123%29&linenos=on"),
        )
        .unwrap();
        assert_eq!(value, json!({ "code": "print(123)", "linenos": "on" }));
    }

    #[rstest]
    fn empty_body_is_empty_object() {
        let value = parse(&TestRequest::post().to_http_request(), &Bytes::new()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[rstest]
    fn broken_json_is_a_parse_error() {
        let err = parse(&request("application/json"), &Bytes::from_static(b"{nope")).unwrap_err();
        assert!(matches!(err, ApiError::ParseError(ref msg) if msg.starts_with("JSON parse error")));
    }

    #[rstest]
    fn unknown_media_type() {
        let err = parse(&request("text/plain"), &Bytes::from_static(b"code")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported media type \"text/plain\" in request.");
    }
}
