//! JSON-RPC framing for the `newHeads` subscription.

use block_metrics::BlockHeader;
use primitive_types::{H256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request id used for the `eth_subscribe` call.
pub(crate) const SUBSCRIBE_ID: u64 = 1;

/// JSON-RPC request.
#[derive(Debug, Serialize)]
struct RpcRequest<T: Serialize> {
    jsonrpc: &'static str,
    method: &'static str,
    params: T,
    id: u64,
}

/// Any message the node may send: a reply or a notification.
#[derive(Debug, Deserialize)]
struct RpcMessage {
    id: Option<u64>,
    result: Option<serde_json::Value>,
    error: Option<RpcError>,
    method: Option<String>,
    params: Option<SubscriptionParams>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct SubscriptionParams {
    subscription: String,
    result: serde_json::Value,
}

/// Header fields as hex strings, the way `newHeads` reports them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RpcHeader {
    pub number: String,
    pub hash: String,
    pub gas_limit: String,
    pub gas_used: String,
    pub timestamp: String,
}

/// Header field that failed to decode.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum HeaderDecodeError {
    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

impl RpcHeader {
    /// Decode the hex fields.
    pub(crate) fn decode(&self) -> Result<BlockHeader, HeaderDecodeError> {
        Ok(BlockHeader {
            number: parse_u64("number", &self.number)?,
            hash: parse_hash(&self.hash)?,
            gas_limit: parse_u256("gasLimit", &self.gas_limit)?,
            gas_used: parse_u256("gasUsed", &self.gas_used)?,
            timestamp: parse_u64("timestamp", &self.timestamp)?,
        })
    }
}

/// A classified incoming message.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Frame {
    /// Reply to our `eth_subscribe`, carrying the subscription id.
    Subscribed(String),
    /// `newHeads` notification for our subscription.
    Header(BlockHeader),
    /// Error reply, or a notification that could not be decoded.
    Error(String),
    /// Anything unrelated to our subscription.
    Ignored,
}

/// Serialized `eth_subscribe("newHeads")` request.
pub(crate) fn subscribe_request() -> Result<String, serde_json::Error> {
    serde_json::to_string(&RpcRequest {
        jsonrpc: "2.0",
        method: "eth_subscribe",
        params: ("newHeads",),
        id: SUBSCRIBE_ID,
    })
}

/// Classify one text frame. Notifications only count once `subscription` is known.
pub(crate) fn parse_frame(text: &str, subscription: Option<&str>) -> Frame {
    let Ok(message) = serde_json::from_str::<RpcMessage>(text) else {
        tracing::debug!(frame = %text, "Ignoring non JSON-RPC frame");
        return Frame::Ignored;
    };

    if let Some(error) = message.error {
        return Frame::Error(format!("RPC error {}: {}", error.code, error.message));
    }

    if message.id == Some(SUBSCRIBE_ID) {
        if let Some(id) = message.result.as_ref().and_then(|r| r.as_str()) {
            return Frame::Subscribed(id.to_string());
        }
    }

    if message.method.as_deref() != Some("eth_subscription") {
        return Frame::Ignored;
    }
    let (Some(params), Some(subscription)) = (message.params, subscription) else {
        return Frame::Ignored;
    };
    if params.subscription != subscription {
        return Frame::Ignored;
    }

    let header = serde_json::from_value::<RpcHeader>(params.result)
        .map_err(|e| format!("malformed header: {}", e))
        .and_then(|raw| raw.decode().map_err(|e| format!("malformed header: {}", e)));
    match header {
        Ok(header) => Frame::Header(header),
        Err(reason) => Frame::Error(reason),
    }
}

fn strip_hex(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

fn parse_u64(field: &'static str, s: &str) -> Result<u64, HeaderDecodeError> {
    u64::from_str_radix(strip_hex(s), 16).map_err(|_| HeaderDecodeError::InvalidField {
        field,
        value: s.to_string(),
    })
}

fn parse_u256(field: &'static str, s: &str) -> Result<U256, HeaderDecodeError> {
    U256::from_str_radix(strip_hex(s), 16).map_err(|_| HeaderDecodeError::InvalidField {
        field,
        value: s.to_string(),
    })
}

fn parse_hash(s: &str) -> Result<H256, HeaderDecodeError> {
    let invalid = || HeaderDecodeError::InvalidField {
        field: "hash",
        value: s.to_string(),
    };
    let bytes = hex::decode(strip_hex(s)).map_err(|_| invalid())?;
    let bytes: [u8; 32] = bytes.try_into().map_err(|_| invalid())?;
    Ok(H256::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0xdeadbeef00000000000000000000000000000000000000000000000000000001";

    fn notification(subscription: &str, header: &str) -> String {
        format!(
            r#"{{"jsonrpc":"2.0","method":"eth_subscription","params":{{"subscription":"{}","result":{}}}}}"#,
            subscription, header
        )
    }

    fn header_json(number: &str) -> String {
        format!(
            r#"{{"number":"{}","hash":"{}","parentHash":"0x00","gasLimit":"0x1c9c380","gasUsed":"0x5208","timestamp":"0x60000000","miner":"0x00"}}"#,
            number, HASH
        )
    }

    #[test]
    fn test_subscribe_request() {
        let request: serde_json::Value = serde_json::from_str(&subscribe_request().unwrap()).unwrap();
        assert_eq!(request["method"], "eth_subscribe");
        assert_eq!(request["params"][0], "newHeads");
        assert_eq!(request["id"], SUBSCRIBE_ID);
    }

    #[test]
    fn test_subscription_confirmation() {
        let frame = parse_frame(r#"{"jsonrpc":"2.0","id":1,"result":"0xcd0c3e8af590364c09d0fa6a1210faf5"}"#, None);
        assert_eq!(
            frame,
            Frame::Subscribed("0xcd0c3e8af590364c09d0fa6a1210faf5".to_string())
        );
    }

    #[test]
    fn test_header_notification() {
        let frame = parse_frame(&notification("0xabc", &header_json("0x12d687")), Some("0xabc"));
        let header = match frame {
            Frame::Header(header) => header,
            other => panic!("expected header, got {:?}", other),
        };
        assert_eq!(header.number, 1_234_567);
        assert_eq!(header.gas_limit, U256::from(30_000_000u64));
        assert_eq!(header.gas_used, U256::from(21_000u64));
        assert_eq!(header.timestamp, 0x6000_0000);
        assert_eq!(header.hash_prefix(), "deadbeef");
    }

    #[test]
    fn test_foreign_subscription_ignored() {
        let text = notification("0xother", &header_json("0x1"));
        assert_eq!(parse_frame(&text, Some("0xabc")), Frame::Ignored);
        assert_eq!(parse_frame(&text, None), Frame::Ignored);
    }

    #[test]
    fn test_error_reply() {
        let frame = parse_frame(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"notifications not supported"}}"#,
            None,
        );
        assert_eq!(
            frame,
            Frame::Error("RPC error -32601: notifications not supported".to_string())
        );
    }

    #[test]
    fn test_malformed_header_is_error() {
        let frame = parse_frame(&notification("0xabc", &header_json("0xzz")), Some("0xabc"));
        assert!(matches!(frame, Frame::Error(reason) if reason.contains("number")));
    }

    #[test]
    fn test_garbage_ignored() {
        assert_eq!(parse_frame("not json", Some("0xabc")), Frame::Ignored);
    }
}
