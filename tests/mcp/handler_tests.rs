//! Protocol handler and stdio message-flow tests

use brave_search_mcp::mcp::protocol::*;
use brave_search_mcp::mcp::server::McpServer;
use serde_json::json;

use crate::common::{create_test_handlers, create_test_services};

fn request(id: i64, method: &str, params: Option<serde_json::Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: Some(json!(id)),
        method: method.to_string(),
        params,
    }
}

#[tokio::test]
async fn test_initialize_negotiates_known_version() {
    let handlers = create_test_handlers("http://127.0.0.1:1", "");

    let response = handlers
        .dispatch(request(
            1,
            "initialize",
            Some(json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "1.0"}
            })),
        ))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "brave-search-mcp");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
}

#[tokio::test]
async fn test_initialize_falls_back_on_unknown_version() {
    let handlers = create_test_handlers("http://127.0.0.1:1", "");

    let response = handlers
        .dispatch(request(
            1,
            "initialize",
            Some(json!({"protocolVersion": "1999-01-01"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.result.unwrap()["protocolVersion"], "2025-06-18");
}

#[tokio::test]
async fn test_tools_list_contains_search_tools() {
    let handlers = create_test_handlers("http://127.0.0.1:1", "");

    let response = handlers.dispatch(request(2, "tools/list", None)).await.unwrap();

    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    let names: Vec<&str> = tools
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();

    assert_eq!(
        names,
        vec!["brave_local_search", "brave_news_search", "brave_web_search"]
    );

    for tool in &tools {
        assert!(tool["inputSchema"].is_object());
        assert!(!tool["description"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_tools_call_without_params_is_invalid() {
    let handlers = create_test_handlers("http://127.0.0.1:1", "");

    let response = handlers.dispatch(request(3, "tools/call", None)).await.unwrap();

    assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
}

#[tokio::test]
async fn test_tools_call_unknown_tool() {
    let handlers = create_test_handlers("http://127.0.0.1:1", "");

    let response = handlers
        .dispatch(request(
            4,
            "tools/call",
            Some(json!({"name": "brave_video_search", "arguments": {}})),
        ))
        .await
        .unwrap();

    let error = response.error.unwrap();
    assert_eq!(error.code, INVALID_REQUEST);
    assert!(error.message.contains("brave_video_search"));
}

#[tokio::test]
async fn test_missing_api_key_is_tool_error_not_crash() {
    let handlers = create_test_handlers("http://127.0.0.1:1", "");

    let response = handlers
        .dispatch(request(
            5,
            "tools/call",
            Some(json!({
                "name": "brave_web_search",
                "arguments": {"query": "rust"}
            })),
        ))
        .await
        .unwrap();

    let error = response.error.unwrap();
    assert_eq!(error.code, MISSING_API_KEY);
    assert!(error.message.contains("BRAVE_API_KEY"));
    assert_eq!(response.id, Some(json!(5)));
}

#[tokio::test]
async fn test_unknown_method_with_id() {
    let handlers = create_test_handlers("http://127.0.0.1:1", "");

    let response = handlers
        .dispatch(request(6, "resources/list", None))
        .await
        .unwrap();

    assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    assert_eq!(response.id, Some(json!(6)));
}

#[tokio::test]
async fn test_unknown_notification_ignored() {
    let handlers = create_test_handlers("http://127.0.0.1:1", "");

    let response = handlers
        .dispatch(JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/cancelled".to_string(),
            params: None,
        })
        .await
        .unwrap();

    assert!(response.is_empty());
}

#[tokio::test]
async fn test_protocol_ping() {
    let handlers = create_test_handlers("http://127.0.0.1:1", "");

    let response = handlers.dispatch(request(7, "ping", None)).await.unwrap();

    assert_eq!(response.result.unwrap(), json!({}));
}

// --- stdio message flow -------------------------------------------------

#[tokio::test]
async fn test_n_requests_in_yield_n_ordered_responses() {
    let server = McpServer::new(create_test_services("http://127.0.0.1:1", ""));

    let count = 5;
    let mut responses = Vec::new();
    for i in 0..count {
        let line = format!(r#"{{"jsonrpc": "2.0", "id": {i}, "method": "ping"}}"#);
        responses.push(server.process_message(&line).await);
    }

    assert_eq!(responses.len(), count);
    for (i, response) in responses.iter().enumerate() {
        assert_eq!(response.id, Some(json!(i)));
        assert!(response.error.is_none());
    }
}

#[tokio::test]
async fn test_malformed_line_yields_parse_error() {
    let server = McpServer::new(create_test_services("http://127.0.0.1:1", ""));

    let response = server.process_message("{not valid json").await;

    assert_eq!(response.id, None);
    assert_eq!(response.error.unwrap().code, PARSE_ERROR);
}

#[tokio::test]
async fn test_processing_continues_after_bad_message() {
    let server = McpServer::new(create_test_services("http://127.0.0.1:1", ""));

    let bad = server.process_message("garbage").await;
    assert_eq!(bad.error.unwrap().code, PARSE_ERROR);

    let good = server
        .process_message(r#"{"jsonrpc": "2.0", "id": 9, "method": "tools/list"}"#)
        .await;
    assert_eq!(good.id, Some(json!(9)));
    assert!(good.result.is_some());
}

#[tokio::test]
async fn test_stdio_full_handshake_sequence() {
    let server = McpServer::new(create_test_services("http://127.0.0.1:1", ""));

    let init = server
        .process_message(
            r#"{"jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {"protocolVersion": "2025-03-26"}}"#,
        )
        .await;
    assert_eq!(init.result.unwrap()["protocolVersion"], "2025-03-26");

    // Notification: placeholder response that the transport suppresses.
    let note = server
        .process_message(r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#)
        .await;
    assert!(note.is_empty());

    let list = server
        .process_message(r#"{"jsonrpc": "2.0", "id": 1, "method": "tools/list"}"#)
        .await;
    assert_eq!(list.id, Some(json!(1)));
}
