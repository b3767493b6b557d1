//! WebSocket transport.

use std::ops::ControlFlow;

use block_metrics::{channel, HeaderFeed, HeaderSink};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use super::{confirmation, deliver, finish, rpc};
use crate::error::DashboardError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Dial `url`, subscribe, and spawn the read loop.
pub(super) async fn connect(url: &str, buffer: usize) -> Result<HeaderFeed, DashboardError> {
    let (mut stream, _) = connect_async(url)
        .await
        .map_err(|e| DashboardError::setup(url, e))?;

    let request = rpc::subscribe_request().map_err(|e| DashboardError::setup(url, e))?;
    stream
        .send(Message::Text(request.into()))
        .await
        .map_err(|e| DashboardError::setup(url, e))?;

    let subscription = await_subscription(&mut stream)
        .await
        .map_err(|reason| DashboardError::setup(url, reason))?;
    tracing::debug!(%subscription, "newHeads subscription confirmed");

    let (sink, feed) = channel(buffer);
    tokio::spawn(read_loop(stream, subscription, sink));
    Ok(feed)
}

async fn await_subscription(stream: &mut WsStream) -> Result<String, String> {
    while let Some(msg) = stream.next().await {
        match msg.map_err(|e| e.to_string())? {
            Message::Text(text) => {
                if let Some(outcome) = confirmation(rpc::parse_frame(text.as_str(), None)) {
                    return outcome;
                }
            }
            Message::Ping(data) => {
                stream.send(Message::Pong(data)).await.map_err(|e| e.to_string())?;
            }
            Message::Close(_) => return Err("connection closed during subscribe".to_string()),
            _ => {}
        }
    }
    Err("connection closed during subscribe".to_string())
}

async fn read_loop(mut stream: WsStream, subscription: String, sink: HeaderSink) {
    let outcome = loop {
        let Some(msg) = stream.next().await else {
            break Some("connection closed".to_string());
        };

        match msg {
            Ok(Message::Text(text)) => {
                let frame = rpc::parse_frame(text.as_str(), Some(&subscription));
                if let ControlFlow::Break(outcome) = deliver(frame, &sink).await {
                    break outcome;
                }
            }
            Ok(Message::Ping(data)) => {
                if let Err(e) = stream.send(Message::Pong(data)).await {
                    break Some(e.to_string());
                }
            }
            Ok(Message::Close(_)) => break Some("connection closed by node".to_string()),
            Ok(_) => {}
            Err(e) => break Some(e.to_string()),
        }
    };

    finish(sink, outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::rpc::SUBSCRIBE_ID;
    use block_metrics::{MetricsAggregator, MetricsError};
    use tokio::net::TcpListener;
    use tokio_test::{assert_err, assert_ok};
    use tokio_tungstenite::accept_async;

    fn notification(number: u64, timestamp: u64) -> String {
        format!(
            r#"{{"jsonrpc":"2.0","method":"eth_subscription","params":{{"subscription":"0xfeed","result":{{"number":"{:#x}","hash":"0x{:064x}","gasLimit":"0x7a1200","gasUsed":"0x{:x}","timestamp":"{:#x}"}}}}}}"#,
            number, number, number * 1_000_000, timestamp
        )
    }

    /// Accept one client, confirm its subscription, push `heads`, then close.
    async fn serve(listener: TcpListener, heads: Vec<String>) {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(tcp).await.unwrap();

        let Some(Ok(Message::Text(request))) = ws.next().await else {
            panic!("expected subscribe request");
        };
        let request: serde_json::Value = serde_json::from_str(request.as_str()).unwrap();
        assert_eq!(request["method"], "eth_subscribe");

        let reply = format!(r#"{{"jsonrpc":"2.0","id":{},"result":"0xfeed"}}"#, SUBSCRIBE_ID);
        ws.send(Message::Text(reply.into())).await.unwrap();
        for head in heads {
            ws.send(Message::Text(head.into())).await.unwrap();
        }
        ws.close(None).await.unwrap();
    }

    #[tokio::test]
    async fn test_headers_then_fault_on_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(serve(
            listener,
            vec![notification(1, 100), notification(2, 110), notification(3, 125)],
        ));

        let feed = assert_ok!(connect(&url, 16).await);
        let aggregator = MetricsAggregator::default();
        let result = aggregator.run(feed).await;
        server.await.unwrap();

        assert!(matches!(result, Err(MetricsError::StreamFault(_))));
        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.gas_limit, vec![8, 8, 8]);
        assert_eq!(snapshot.gas_used, vec![10_000, 20_000, 30_000]);
        assert_eq!(snapshot.block_time, vec![10, 15]);
        assert_eq!(snapshot.last_block, Some(3));
    }

    #[tokio::test]
    async fn test_refused_subscription_is_setup_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(tcp).await.unwrap();
            let _ = ws.next().await;
            let reply = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"the method eth_subscribe does not exist"}}"#;
            ws.send(Message::Text(reply.into())).await.unwrap();
        });

        let err = assert_err!(connect(&url, 16).await);
        server.await.unwrap();
        assert!(matches!(err, DashboardError::Setup { .. }));
        assert!(err.to_string().contains("-32601"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_setup_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = connect(&url, 16).await.unwrap_err();
        assert!(matches!(err, DashboardError::Setup { .. }));
    }
}
