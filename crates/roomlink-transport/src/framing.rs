//! Length-prefixed message framing for stream transports.
//!
//! TCP is a byte stream, so the control channel delimits messages with a
//! 4-byte big-endian length prefix:
//!
//! ```text
//! +----------------+------------------+
//! | length (4 BE)  |  payload         |
//! +----------------+------------------+
//! ```

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::TransportError;

/// Largest frame accepted or produced by default (16 MiB).
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Prepends the length prefix to `payload`.
///
/// # Errors
/// Returns [`TransportError::FrameTooLarge`] if `payload` is longer
/// than `max`.
pub fn encode_frame(payload: &[u8], max: usize) -> Result<Vec<u8>, TransportError> {
    if payload.len() > max || payload.len() > u32::MAX as usize {
        return Err(TransportError::FrameTooLarge {
            size: payload.len(),
            max,
        });
    }

    let mut buffer = Vec::with_capacity(4 + payload.len());
    buffer.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buffer.extend_from_slice(payload);
    Ok(buffer)
}

/// Writes one framed message and flushes.
pub async fn write_frame<W>(
    writer: &mut W,
    payload: &[u8],
    max: usize,
) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let frame = encode_frame(payload, max)?;
    writer
        .write_all(&frame)
        .await
        .map_err(TransportError::SendFailed)?;
    writer.flush().await.map_err(TransportError::SendFailed)
}

/// Reads one framed message.
///
/// Returns `Ok(None)` if the stream ends cleanly before a length prefix.
/// A stream that ends in the middle of a frame is an error.
pub async fn read_frame<R>(
    reader: &mut R,
    max: usize,
) -> Result<Option<Vec<u8>>, TransportError>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Ok(None);
        }
        Err(e) => return Err(TransportError::ReceiveFailed(e)),
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > max {
        return Err(TransportError::FrameTooLarge { size: len, max });
    }

    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .await
        .map_err(TransportError::ReceiveFailed)?;
    Ok(Some(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_frame_prefixes_big_endian_length() {
        let frame = encode_frame(b"hello", MAX_FRAME_SIZE).unwrap();
        assert_eq!(&frame[..4], &[0, 0, 0, 5]);
        assert_eq!(&frame[4..], b"hello");
    }

    #[test]
    fn test_encode_frame_over_limit_returns_error() {
        let result = encode_frame(&[0u8; 10], 4);
        assert!(matches!(
            result,
            Err(TransportError::FrameTooLarge { size: 10, max: 4 })
        ));
    }

    #[tokio::test]
    async fn test_read_frame_reads_consecutive_frames() {
        let mut bytes = encode_frame(b"one", MAX_FRAME_SIZE).unwrap();
        bytes.extend(encode_frame(b"two", MAX_FRAME_SIZE).unwrap());
        let mut reader = &bytes[..];

        let first = read_frame(&mut reader, MAX_FRAME_SIZE).await.unwrap();
        let second = read_frame(&mut reader, MAX_FRAME_SIZE).await.unwrap();
        let end = read_frame(&mut reader, MAX_FRAME_SIZE).await.unwrap();

        assert_eq!(first.as_deref(), Some(&b"one"[..]));
        assert_eq!(second.as_deref(), Some(&b"two"[..]));
        assert!(end.is_none(), "clean EOF should yield None");
    }

    #[tokio::test]
    async fn test_read_frame_truncated_payload_returns_error() {
        // Claims 100 bytes, carries 3.
        let bytes = [0u8, 0, 0, 100, 1, 2, 3];
        let mut reader = &bytes[..];

        let result = read_frame(&mut reader, MAX_FRAME_SIZE).await;

        assert!(matches!(result, Err(TransportError::ReceiveFailed(_))));
    }

    #[tokio::test]
    async fn test_read_frame_oversized_prefix_returns_error() {
        let bytes = 1024u32.to_be_bytes();
        let mut reader = &bytes[..];

        let result = read_frame(&mut reader, 16).await;

        assert!(matches!(
            result,
            Err(TransportError::FrameTooLarge { size: 1024, max: 16 })
        ));
    }

    #[tokio::test]
    async fn test_write_frame_then_read_frame() {
        let mut buffer = Vec::new();
        write_frame(&mut buffer, b"payload", MAX_FRAME_SIZE)
            .await
            .unwrap();

        let mut reader = &buffer[..];
        let decoded = read_frame(&mut reader, MAX_FRAME_SIZE).await.unwrap();
        assert_eq!(decoded.as_deref(), Some(&b"payload"[..]));
    }
}
