//! Statistics fetched over the host's WebSocket API

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ae_statistics::{
    StatisticsError, StatisticsQuery, StatisticsResponse, StatisticsResult, StatisticsSource,
};
use async_trait::async_trait;
use futures_util::stream::SplitStream;
use futures_util::{Sink, SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, instrument};

type WsRead = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Default budget for one statistics exchange
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`StatisticsSource`] talking to a live instance
///
/// Each query runs on its own authenticated connection so concurrent
/// queries never wait on each other's responses.
pub struct WebSocketStatisticsSource {
    base_url: String,
    token: String,
    timeout: Duration,
    next_id: AtomicU64,
}

impl WebSocketStatisticsSource {
    /// `base_url` is the instance's HTTP address, `token` a long-lived access token
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            timeout: DEFAULT_TIMEOUT,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn ws_url(&self) -> String {
        let url = self
            .base_url
            .replace("http://", "ws://")
            .replace("https://", "wss://");
        format!("{}/api/websocket", url)
    }

    async fn exchange(&self, query: &StatisticsQuery) -> StatisticsResult<StatisticsResponse> {
        let (ws_stream, _) = connect_async(self.ws_url())
            .await
            .map_err(|e| StatisticsError::Connection(format!("connect failed: {}", e)))?;
        let (mut write, mut read) = ws_stream.split();

        let greeting = recv_message(&mut read).await?;
        if message_type(&greeting) != Some("auth_required") {
            return Err(StatisticsError::Auth(format!(
                "expected auth_required, got {}",
                greeting
            )));
        }

        let auth = json!({
            "type": "auth",
            "access_token": self.token,
        });
        send_message(&mut write, &auth).await?;

        let auth_response = recv_message(&mut read).await?;
        if message_type(&auth_response) != Some("auth_ok") {
            let reason = auth_response
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("auth rejected");
            return Err(StatisticsError::Auth(reason.to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        send_message(&mut write, &query.to_message(id)).await?;
        debug!("Sent statistics command {} for {:?}", id, query.statistic_ids);

        loop {
            let message = recv_message(&mut read).await?;
            if message.get("id").and_then(Value::as_u64) != Some(id)
                || message_type(&message) != Some("result")
            {
                continue;
            }
            return result_payload(message);
        }
    }
}

#[async_trait]
impl StatisticsSource for WebSocketStatisticsSource {
    #[instrument(skip_all, fields(ids = ?query.statistic_ids))]
    async fn statistics_during_period(
        &self,
        query: &StatisticsQuery,
    ) -> StatisticsResult<StatisticsResponse> {
        timeout(self.timeout, self.exchange(query))
            .await
            .map_err(|_| StatisticsError::Timeout(self.timeout))?
    }
}

fn message_type(message: &Value) -> Option<&str> {
    message.get("type").and_then(Value::as_str)
}

/// Unpack a `result` message into the response map or the reported error
fn result_payload(mut message: Value) -> StatisticsResult<StatisticsResponse> {
    if message.get("success").and_then(Value::as_bool) == Some(true) {
        let result = message.get_mut("result").map(Value::take).unwrap_or(Value::Null);
        if result.is_null() {
            return Ok(StatisticsResponse::new());
        }
        return Ok(serde_json::from_value(result)?);
    }

    let error = message.get("error");
    let field = |key: &str| {
        error
            .and_then(|e| e.get(key))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    };
    Err(StatisticsError::Query {
        code: field("code"),
        message: field("message"),
    })
}

async fn send_message<W>(write: &mut W, message: &Value) -> StatisticsResult<()>
where
    W: Sink<Message> + Unpin,
    W::Error: std::fmt::Display,
{
    write
        .send(Message::Text(message.to_string()))
        .await
        .map_err(|e| StatisticsError::Connection(format!("send failed: {}", e)))
}

/// Next JSON text frame; control frames are skipped
async fn recv_message(read: &mut WsRead) -> StatisticsResult<Value> {
    loop {
        let message = read
            .next()
            .await
            .ok_or_else(|| StatisticsError::Connection("connection closed".to_string()))?
            .map_err(|e| StatisticsError::Connection(format!("receive failed: {}", e)))?;

        match message {
            Message::Text(text) => return Ok(serde_json::from_str(&text)?),
            Message::Close(_) => {
                return Err(StatisticsError::Connection("connection closed".to_string()))
            }
            _ => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ae_statistics::{FetchRequest, Period};
    use chrono::{TimeZone, Utc};
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    const TOKEN: &str = "secret";

    /// One-connection fake instance answering a single command with `reply`
    async fn serve_once(reply: impl FnOnce(u64) -> Value + Send + 'static) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let ws = accept_async(stream).await.unwrap();
            let (mut write, mut read) = ws.split();

            let send = |v: Value| Message::Text(v.to_string());
            let next = |msg: Option<Result<Message, tokio_tungstenite::tungstenite::Error>>| -> Value {
                match msg {
                    Some(Ok(Message::Text(text))) => serde_json::from_str(&text).unwrap(),
                    other => panic!("unexpected frame: {:?}", other),
                }
            };

            write
                .send(send(json!({"type": "auth_required", "ha_version": "2024.3.0"})))
                .await
                .unwrap();
            let auth = next(read.next().await);
            if auth["access_token"] != TOKEN {
                write
                    .send(send(json!({"type": "auth_invalid", "message": "Invalid access token"})))
                    .await
                    .unwrap();
                return;
            }
            write.send(send(json!({"type": "auth_ok"}))).await.unwrap();

            let command = next(read.next().await);
            assert_eq!(command["type"], "recorder/statistics_during_period");
            assert_eq!(command["period"], "hour");
            let id = command["id"].as_u64().unwrap();

            write
                .send(send(json!({"id": id, "type": "event", "event": {}})))
                .await
                .unwrap();
            write.send(send(reply(id))).await.unwrap();
        });

        format!("http://{}/", addr)
    }

    fn query() -> StatisticsQuery {
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        FetchRequest::ending_at(end, 24, Period::Hour).query_for("sensor.tv_power")
    }

    #[test]
    fn test_ws_url() {
        let source = WebSocketStatisticsSource::new("https://ha.local:8123/", TOKEN);
        assert_eq!(source.ws_url(), "wss://ha.local:8123/api/websocket");

        let source = WebSocketStatisticsSource::new("http://localhost:8123", TOKEN);
        assert_eq!(source.ws_url(), "ws://localhost:8123/api/websocket");
    }

    #[tokio::test]
    async fn test_statistics_exchange() {
        let url = serve_once(|id| {
            json!({
                "id": id,
                "type": "result",
                "success": true,
                "result": {
                    "sensor.tv_power": [
                        {"start": 1709290800000.0, "end": 1709294400000.0, "mean": 85.0}
                    ]
                }
            })
        })
        .await;

        let source = WebSocketStatisticsSource::new(&url, TOKEN);
        let response = source.statistics_during_period(&query()).await.unwrap();
        assert_eq!(response["sensor.tv_power"][0].mean, Some(85.0));
    }

    #[tokio::test]
    async fn test_query_error() {
        let url = serve_once(|id| {
            json!({
                "id": id,
                "type": "result",
                "success": false,
                "error": {"code": "invalid_format", "message": "bad period"}
            })
        })
        .await;

        let source = WebSocketStatisticsSource::new(&url, TOKEN);
        let err = source.statistics_during_period(&query()).await.unwrap_err();
        match err {
            StatisticsError::Query { code, message } => {
                assert_eq!(code, "invalid_format");
                assert_eq!(message, "bad period");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_auth_rejected() {
        let url = serve_once(|_| Value::Null).await;

        let source = WebSocketStatisticsSource::new(&url, "wrong");
        let err = source.statistics_during_period(&query()).await.unwrap_err();
        assert!(matches!(err, StatisticsError::Auth(ref m) if m == "Invalid access token"));
    }

    #[tokio::test]
    async fn test_timeout() {
        // Accepts TCP but never completes the WebSocket handshake
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _held = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let source = WebSocketStatisticsSource::new(&format!("http://{}", addr), TOKEN)
            .with_timeout(Duration::from_millis(100));
        let err = source.statistics_during_period(&query()).await.unwrap_err();
        assert!(matches!(err, StatisticsError::Timeout(_)));
    }

    #[test]
    fn test_null_result_is_empty() {
        let response =
            result_payload(json!({"id": 1, "type": "result", "success": true, "result": null}))
                .unwrap();
        assert!(response.is_empty());
    }
}
