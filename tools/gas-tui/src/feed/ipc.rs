//! IPC transport over a Unix domain socket.
//!
//! The node writes JSON values back to back with no framing, so frames are
//! cut with a streaming JSON deserializer over the read buffer.

use std::path::Path;

use block_metrics::HeaderFeed;

use crate::error::DashboardError;

#[cfg(unix)]
pub(super) async fn connect(path: &Path, buffer: usize) -> Result<HeaderFeed, DashboardError> {
    unix::connect(path, buffer).await
}

#[cfg(not(unix))]
pub(super) async fn connect(path: &Path, _buffer: usize) -> Result<HeaderFeed, DashboardError> {
    Err(DashboardError::setup(
        path.display(),
        "IPC endpoints are only supported on Unix",
    ))
}

#[cfg(unix)]
mod unix {
    use std::ops::ControlFlow;
    use std::path::Path;

    use block_metrics::{channel, HeaderFeed, HeaderSink};
    use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixStream;

    use crate::error::DashboardError;
    use crate::feed::{confirmation, deliver, finish, rpc};

    const READ_CHUNK: usize = 8 * 1024;
    /// Largest single JSON value accepted from the node.
    const MAX_FRAME_BYTES: usize = 4 * 1024 * 1024;

    pub(super) async fn connect(path: &Path, buffer: usize) -> Result<HeaderFeed, DashboardError> {
        let endpoint = path.display();
        let stream = UnixStream::connect(path)
            .await
            .map_err(|e| DashboardError::setup(&endpoint, e))?;
        let (read_half, mut write_half) = stream.into_split();

        let mut request = rpc::subscribe_request().map_err(|e| DashboardError::setup(&endpoint, e))?;
        request.push('\n');
        write_half
            .write_all(request.as_bytes())
            .await
            .map_err(|e| DashboardError::setup(&endpoint, e))?;

        let mut frames = FrameReader::new(read_half);
        let subscription = loop {
            let text = frames
                .next_frame()
                .await
                .map_err(|reason| DashboardError::setup(&endpoint, reason))?
                .ok_or_else(|| DashboardError::setup(&endpoint, "connection closed during subscribe"))?;
            if let Some(outcome) = confirmation(rpc::parse_frame(&text, None)) {
                break outcome.map_err(|reason| DashboardError::setup(&endpoint, reason))?;
            }
        };
        tracing::debug!(%subscription, "newHeads subscription confirmed");

        let (sink, feed) = channel(buffer);
        // The write half stays alive with the loop; dropping it would shut the socket down.
        tokio::spawn(async move {
            let _write_half = write_half;
            read_loop(frames, subscription, sink).await;
        });
        Ok(feed)
    }

    async fn read_loop<R: AsyncRead + Unpin>(
        mut frames: FrameReader<R>,
        subscription: String,
        sink: HeaderSink,
    ) {
        let outcome = loop {
            let text = match frames.next_frame().await {
                Ok(Some(text)) => text,
                Ok(None) => break Some("connection closed".to_string()),
                Err(reason) => break Some(reason),
            };
            let frame = rpc::parse_frame(&text, Some(&subscription));
            if let ControlFlow::Break(outcome) = deliver(frame, &sink).await {
                break outcome;
            }
        };

        finish(sink, outcome);
    }

    /// Splits a byte stream into complete JSON values.
    pub(super) struct FrameReader<R> {
        reader: R,
        buf: Vec<u8>,
        limit: usize,
    }

    impl<R: AsyncRead + Unpin> FrameReader<R> {
        pub(super) fn new(reader: R) -> Self {
            Self::with_limit(reader, MAX_FRAME_BYTES)
        }

        pub(super) fn with_limit(reader: R, limit: usize) -> Self {
            Self {
                reader,
                buf: Vec::with_capacity(READ_CHUNK),
                limit,
            }
        }

        /// Next complete JSON value as text, `None` at end of stream.
        pub(super) async fn next_frame(&mut self) -> Result<Option<String>, String> {
            loop {
                if let Some(frame) = self.take_frame()? {
                    return Ok(Some(frame));
                }
                if self.buf.len() > self.limit {
                    return Err(format!("IPC frame exceeds {} bytes", self.limit));
                }

                let mut chunk = [0u8; READ_CHUNK];
                let n = self.reader.read(&mut chunk).await.map_err(|e| e.to_string())?;
                if n == 0 {
                    return Ok(None);
                }
                self.buf.extend_from_slice(&chunk[..n]);
            }
        }

        fn take_frame(&mut self) -> Result<Option<String>, String> {
            let mut values =
                serde_json::Deserializer::from_slice(&self.buf).into_iter::<serde::de::IgnoredAny>();
            match values.next() {
                Some(Ok(_)) => {
                    let end = values.byte_offset();
                    let frame = std::str::from_utf8(&self.buf[..end])
                        .map_err(|e| e.to_string())?
                        .trim()
                        .to_string();
                    self.buf.drain(..end);
                    Ok(Some(frame))
                }
                Some(Err(e)) if e.is_eof() => Ok(None),
                Some(Err(e)) => Err(format!("malformed IPC frame: {}", e)),
                None => {
                    self.buf.clear();
                    Ok(None)
                }
            }
        }
    }

}
