use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{duplex, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, ReadHalf, WriteHalf};

use mcp_relay::config::ServerSettings;
use mcp_relay::mcp::server::{McpServer, PROTOCOL_VERSION};
use mcp_relay::mcp::tools::RelayToolProvider;
use mcp_relay::relay::Relay;

type ClientReader = Lines<BufReader<ReadHalf<tokio::io::DuplexStream>>>;
type ClientWriter = WriteHalf<tokio::io::DuplexStream>;

/// Boots a server over an in-memory transport and returns the relay plus
/// the client side of the pipe.
fn boot() -> (Arc<Relay>, ClientWriter, ClientReader) {
    let relay = Arc::new(Relay::new());
    let provider = Arc::new(RelayToolProvider::new(relay.clone()));
    let server = Arc::new(McpServer::new(provider, ServerSettings::default()));

    let (client_io, server_io) = duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(server_io);
    tokio::spawn(server.run(server_read, server_write));

    let (client_read, client_write) = tokio::io::split(client_io);
    (relay, client_write, BufReader::new(client_read).lines())
}

async fn send(writer: &mut ClientWriter, frame: Value) {
    writer
        .write_all(format!("{frame}\n").as_bytes())
        .await
        .unwrap();
    writer.flush().await.unwrap();
}

async fn recv(reader: &mut ClientReader) -> Value {
    let line = reader.next_line().await.unwrap().unwrap();
    serde_json::from_str(&line).unwrap()
}

#[tokio::test]
async fn initialize_handshake_reports_server_identity() {
    let (_relay, mut writer, mut reader) = boot();

    send(
        &mut writer,
        json!({
            "jsonrpc": "2.0",
            "method": "initialize",
            "params": { "protocolVersion": PROTOCOL_VERSION, "capabilities": {} },
            "id": 0
        }),
    )
    .await;

    let response = recv(&mut reader).await;
    assert_eq!(response["id"], json!(0));
    assert_eq!(response["result"]["protocolVersion"], json!(PROTOCOL_VERSION));
    assert_eq!(
        response["result"]["serverInfo"]["name"],
        json!("mcp-input-server")
    );
}

#[tokio::test]
async fn initialized_notification_is_silent() {
    let (_relay, mut writer, mut reader) = boot();

    send(
        &mut writer,
        json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    )
    .await;
    // A follow-up request is answered first thing, proving the
    // notification produced no frame of its own.
    send(
        &mut writer,
        json!({ "jsonrpc": "2.0", "method": "ping", "id": 1 }),
    )
    .await;

    let response = recv(&mut reader).await;
    assert_eq!(response["id"], json!(1));
    assert_eq!(response["result"], json!({}));
}

#[tokio::test]
async fn capability_list_has_exactly_one_entry() {
    let (_relay, mut writer, mut reader) = boot();

    send(
        &mut writer,
        json!({ "jsonrpc": "2.0", "method": "tools/list", "id": 2 }),
    )
    .await;

    let response = recv(&mut reader).await;
    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], json!("get_vscode_input"));
    assert_eq!(tools[0]["inputSchema"]["type"], json!("object"));
    assert_eq!(tools[0]["inputSchema"]["properties"], json!({}));
}

#[tokio::test]
async fn suspended_call_resolves_when_operator_submits() {
    let (relay, mut writer, mut reader) = boot();

    send(
        &mut writer,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": { "name": "get_vscode_input", "arguments": {} },
            "id": 3
        }),
    )
    .await;

    // The call must be parked before the submission arrives.
    while relay.registered_waiters().await == 0 {
        tokio::task::yield_now().await;
    }
    relay.submit("operator says hi".to_string()).await;

    let response = recv(&mut reader).await;
    assert_eq!(response["id"], json!(3));
    assert_eq!(response["result"]["isError"], json!(false));
    assert_eq!(
        response["result"]["content"][0]["text"],
        json!("operator says hi")
    );
}

#[tokio::test]
async fn buffered_message_resolves_a_call_immediately() {
    let (relay, mut writer, mut reader) = boot();
    relay.submit("already here".to_string()).await;

    send(
        &mut writer,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": { "name": "get_vscode_input" },
            "id": 4
        }),
    )
    .await;

    let response = recv(&mut reader).await;
    assert_eq!(
        response["result"]["content"][0]["text"],
        json!("already here")
    );
}

#[tokio::test]
async fn unknown_capability_keeps_the_success_envelope() {
    let (_relay, mut writer, mut reader) = boot();

    send(
        &mut writer,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": { "name": "not_a_tool", "arguments": {} },
            "id": 5
        }),
    )
    .await;

    let response = recv(&mut reader).await;
    assert!(response.get("error").is_none());
    assert_eq!(response["result"]["isError"], json!(false));
    assert_eq!(response["result"]["content"][0]["text"], json!("Unknown tool"));
}

#[tokio::test]
async fn two_suspended_calls_are_served_in_call_order() {
    let (relay, mut writer, mut reader) = boot();

    send(
        &mut writer,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": { "name": "get_vscode_input" },
            "id": 10
        }),
    )
    .await;
    while relay.registered_waiters().await < 1 {
        tokio::task::yield_now().await;
    }
    send(
        &mut writer,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": { "name": "get_vscode_input" },
            "id": 11
        }),
    )
    .await;
    while relay.registered_waiters().await < 2 {
        tokio::task::yield_now().await;
    }

    relay.submit("first".to_string()).await;
    relay.submit("second".to_string()).await;

    let a = recv(&mut reader).await;
    let b = recv(&mut reader).await;
    let text_by_id = |id: i64| {
        [&a, &b]
            .into_iter()
            .find(|r| r["id"] == json!(id))
            .map(|r| r["result"]["content"][0]["text"].clone())
            .unwrap()
    };

    assert_eq!(text_by_id(10), json!("first"));
    assert_eq!(text_by_id(11), json!("second"));
}

#[tokio::test]
async fn garbage_frame_gets_a_parse_error() {
    let (_relay, mut writer, mut reader) = boot();

    writer.write_all(b"this is not json\n").await.unwrap();
    writer.flush().await.unwrap();

    let response = recv(&mut reader).await;
    assert_eq!(response["error"]["code"], json!(-32700));
    assert_eq!(response["id"], Value::Null);
}

#[tokio::test]
async fn unknown_method_is_a_protocol_error() {
    let (_relay, mut writer, mut reader) = boot();

    send(
        &mut writer,
        json!({ "jsonrpc": "2.0", "method": "resources/list", "id": 6 }),
    )
    .await;

    let response = recv(&mut reader).await;
    assert_eq!(response["error"]["code"], json!(-32601));
}
