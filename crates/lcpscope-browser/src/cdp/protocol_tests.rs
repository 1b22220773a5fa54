use serde_json::json;

use super::*;

#[test]
fn request_skips_absent_optional_fields() {
    let request = CdpRequest {
        id: 1,
        method: "Page.enable".to_string(),
        params: None,
        session_id: None,
    };
    let text = serde_json::to_string(&request).unwrap();
    assert_eq!(text, r#"{"id":1,"method":"Page.enable"}"#);
}

#[test]
fn request_serializes_session_id_in_wire_casing() {
    let request = CdpRequest {
        id: 7,
        method: "Runtime.evaluate".to_string(),
        params: Some(json!({"expression": "1 + 1"})),
        session_id: Some("SESSION".to_string()),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["sessionId"], "SESSION");
    assert_eq!(value["params"]["expression"], "1 + 1");
}

#[test]
fn parses_command_response() {
    let text = r#"{"id":3,"result":{"frameId":"F1"},"sessionId":"SESSION"}"#;
    let response: CdpResponse = serde_json::from_str(text).unwrap();
    assert_eq!(response.id, Some(3));
    assert_eq!(response.result.unwrap()["frameId"], "F1");
    assert!(response.method.is_none());
}

#[test]
fn parses_pushed_event() {
    let text = r#"{"method":"Network.requestWillBeSent","params":{"requestId":"R1"},"sessionId":"SESSION"}"#;
    let response: CdpResponse = serde_json::from_str(text).unwrap();
    assert_eq!(response.id, None);
    assert_eq!(response.method.as_deref(), Some("Network.requestWillBeSent"));
    assert_eq!(response.session_id.as_deref(), Some("SESSION"));
}

#[test]
fn parses_error_response() {
    let text = r#"{"id":4,"error":{"code":-32000,"message":"Cannot find context"}}"#;
    let response: CdpResponse = serde_json::from_str(text).unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, -32000);
    assert!(error.message.contains("context"));
}

#[test]
fn parses_browser_version_pascal_case() {
    let text = r#"{
        "Browser": "Chrome/131.0.0.0",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "V8-Version": "13.1",
        "WebKit-Version": "537.36",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/abc"
    }"#;
    let version: BrowserVersion = serde_json::from_str(text).unwrap();
    assert!(version.browser.starts_with("Chrome"));
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}
