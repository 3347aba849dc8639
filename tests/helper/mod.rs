//! Shared harness for end-to-end tests driving the LspService directly
#![allow(dead_code)]

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tower::Service;
use tower_lsp::jsonrpc::{Request, Response};
use tower_lsp::lsp_types::{PublishDiagnosticsParams, Range};
use tower_lsp::{ClientSocket, LspService};

use sample_lsp::config::Settings;
use sample_lsp::lsp::backend::Backend;

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Builds a service and a running fake client that acknowledges
/// `workspace/applyEdit` with `applied`.
pub async fn start_server(
    settings: Settings,
    initialization_options: Option<Value>,
    applied: bool,
) -> (LspService<Backend>, mpsc::UnboundedReceiver<Request>) {
    let (mut service, socket) =
        LspService::build(|client| Backend::build(client, settings)).finish();
    let client_rx = spawn_fake_client(socket, applied);

    service
        .call(create_initialize_request(1, initialization_options))
        .await
        .unwrap();
    service
        .call(create_initialized_notification())
        .await
        .unwrap();

    (service, client_rx)
}

pub async fn start_default_server() -> (LspService<Backend>, mpsc::UnboundedReceiver<Request>) {
    start_server(Settings::default(), None, true).await
}

/// Forwards every server-to-client message to the returned channel and
/// answers requests the way an editor would.
pub fn spawn_fake_client(socket: ClientSocket, applied: bool) -> mpsc::UnboundedReceiver<Request> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let (mut requests, mut responses) = socket.split();

        while let Some(request) = requests.next().await {
            if let Some(id) = request.id().cloned() {
                let result = match request.method() {
                    "workspace/applyEdit" if applied => json!({ "applied": true }),
                    "workspace/applyEdit" => {
                        json!({ "applied": false, "failureReason": "read-only" })
                    }
                    _ => Value::Null,
                };
                if responses.send(Response::from_ok(id, result)).await.is_err() {
                    break;
                }
            }

            if tx.send(request).is_err() {
                break;
            }
        }
    });

    rx
}

pub async fn wait_for_message(
    rx: &mut mpsc::UnboundedReceiver<Request>,
    method: &str,
) -> Option<Request> {
    tokio::time::timeout(TIMEOUT, async {
        while let Some(message) = rx.recv().await {
            if message.method() == method {
                return Some(message);
            }
        }
        None
    })
    .await
    .ok()
    .flatten()
}

pub async fn wait_for_diagnostics(
    rx: &mut mpsc::UnboundedReceiver<Request>,
) -> PublishDiagnosticsParams {
    let notification = wait_for_message(rx, "textDocument/publishDiagnostics")
        .await
        .expect("Expected publishDiagnostics notification");
    serde_json::from_value(notification.params().unwrap().clone()).unwrap()
}

/// Sends a request and returns its successful result.
pub async fn request(service: &mut LspService<Backend>, request: Request) -> Value {
    let response = service
        .call(request)
        .await
        .unwrap()
        .expect("Expected a response");
    let (_, result) = response.into_parts();
    result.unwrap()
}

/// Sends a request and returns the JSON-RPC error it fails with.
pub async fn request_error(
    service: &mut LspService<Backend>,
    request: Request,
) -> tower_lsp::jsonrpc::Error {
    let response = service
        .call(request)
        .await
        .unwrap()
        .expect("Expected a response");
    let (_, result) = response.into_parts();
    result.unwrap_err()
}

pub async fn notify(service: &mut LspService<Backend>, notification: Request) {
    let response = service.call(notification).await.unwrap();
    assert!(response.is_none());
}

pub fn create_initialize_request(id: i64, initialization_options: Option<Value>) -> Request {
    Request::build("initialize")
        .params(json!({
            "processId": null,
            "rootUri": null,
            "capabilities": {},
            "initializationOptions": initialization_options,
        }))
        .id(id)
        .finish()
}

pub fn create_initialized_notification() -> Request {
    Request::build("initialized").params(json!({})).finish()
}

pub fn create_shutdown_request(id: i64) -> Request {
    Request::build("shutdown").id(id).finish()
}

pub fn create_did_open_notification(uri: &str, text: &str) -> Request {
    Request::build("textDocument/didOpen")
        .params(json!({
            "textDocument": {
                "uri": uri,
                "languageId": "plaintext",
                "version": 1,
                "text": text,
            }
        }))
        .finish()
}

pub fn create_did_change_notification(
    uri: &str,
    version: i32,
    range: Option<Range>,
    text: &str,
) -> Request {
    let mut change = json!({ "text": text });
    if let Some(range) = range {
        change["range"] = serde_json::to_value(range).unwrap();
    }

    Request::build("textDocument/didChange")
        .params(json!({
            "textDocument": { "uri": uri, "version": version },
            "contentChanges": [change],
        }))
        .finish()
}

pub fn create_did_save_notification(uri: &str) -> Request {
    Request::build("textDocument/didSave")
        .params(json!({ "textDocument": { "uri": uri } }))
        .finish()
}

pub fn create_did_close_notification(uri: &str) -> Request {
    Request::build("textDocument/didClose")
        .params(json!({ "textDocument": { "uri": uri } }))
        .finish()
}

pub fn create_did_change_configuration_notification(settings: Value) -> Request {
    Request::build("workspace/didChangeConfiguration")
        .params(json!({ "settings": settings }))
        .finish()
}

pub fn create_completion_request(id: i64, uri: &str, line: u32, character: u32) -> Request {
    Request::build("textDocument/completion")
        .params(json!({
            "textDocument": { "uri": uri },
            "position": { "line": line, "character": character },
        }))
        .id(id)
        .finish()
}

pub fn create_completion_resolve_request(id: i64, item: Value) -> Request {
    Request::build("completionItem/resolve")
        .params(item)
        .id(id)
        .finish()
}

pub fn create_code_action_request(id: i64, uri: &str, range: Range, diagnostics: Value) -> Request {
    Request::build("textDocument/codeAction")
        .params(json!({
            "textDocument": { "uri": uri },
            "range": range,
            "context": { "diagnostics": diagnostics },
        }))
        .id(id)
        .finish()
}

pub fn create_execute_command_request(id: i64, command: &str, arguments: Value) -> Request {
    Request::build("workspace/executeCommand")
        .params(json!({ "command": command, "arguments": arguments }))
        .id(id)
        .finish()
}
