//! Decode-once codec: one NDJSON line -> one `Envelope`.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use pubsubkit_core::error::{PubSubError, Result};
use pubsubkit_core::protocol::envelope::Envelope;

/// One line as read off the input, newline stripped.
#[derive(Debug, PartialEq, Eq)]
pub enum Frame {
    Line(String),
    /// Longer than the limit. The rest of the line was discarded unread.
    TooLong,
    NotUtf8,
}

/// Read the next line, buffering at most `max_bytes` of it. `Ok(None)` at EOF.
pub async fn read_frame<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_bytes: usize,
) -> io::Result<Option<Frame>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    // +1 for the newline itself.
    let limit = max_bytes as u64 + 1;
    let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if n == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    } else if n as u64 == limit {
        skip_line(reader).await?;
        return Ok(Some(Frame::TooLong));
    }

    Ok(Some(match std::str::from_utf8(buf) {
        Ok(s) => Frame::Line(s.to_owned()),
        Err(_) => Frame::NotUtf8,
    }))
}

async fn skip_line<R>(reader: &mut R) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let (used, done) = {
            let chunk = reader.fill_buf().await?;
            if chunk.is_empty() {
                return Ok(());
            }
            match chunk.iter().position(|b| *b == b'\n') {
                Some(i) => (i + 1, true),
                None => (chunk.len(), false),
            }
        };
        reader.consume(used);
        if done {
            return Ok(());
        }
    }
}

/// `Ok(None)` for blank lines.
pub fn decode_line(line: &str, max_bytes: usize) -> Result<Option<Envelope>> {
    if line.len() > max_bytes {
        return Err(PubSubError::PayloadTooLarge);
    }
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Envelope::from_json(line).map(Some)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pubsubkit_core::ErrorKind;

    #[test]
    fn blank_lines_are_skipped() {
        assert!(decode_line("", 1024).unwrap().is_none());
        assert!(decode_line("   \r", 1024).unwrap().is_none());
    }

    #[test]
    fn oversized_line_is_rejected_before_parsing() {
        let line = format!(r#"{{"data":{{"topic":"whispers.1","pad":"{}"}}}}"#, "x".repeat(64));
        assert_eq!(
            decode_line(&line, 32).unwrap_err().kind(),
            ErrorKind::PayloadTooLarge
        );
        assert!(decode_line(&line, 1024).unwrap().is_some());
    }

    #[tokio::test]
    async fn frames_are_capped_and_resynced() {
        let input = format!("short\r\n{}\nafter\ntail", "y".repeat(40));
        let mut reader = input.as_bytes();
        let mut buf = Vec::new();
        let mut frames = Vec::new();
        while let Some(f) = read_frame(&mut reader, &mut buf, 16).await.unwrap() {
            frames.push(f);
            assert!(buf.len() <= 17);
        }
        assert_eq!(
            frames,
            vec![
                Frame::Line("short".into()),
                Frame::TooLong,
                Frame::Line("after".into()),
                Frame::Line("tail".into()),
            ]
        );
    }

    #[tokio::test]
    async fn invalid_utf8_is_flagged() {
        let mut reader: &[u8] = b"ok\n\xff\xfe\n";
        let mut buf = Vec::new();
        assert_eq!(
            read_frame(&mut reader, &mut buf, 64).await.unwrap(),
            Some(Frame::Line("ok".into()))
        );
        assert_eq!(
            read_frame(&mut reader, &mut buf, 64).await.unwrap(),
            Some(Frame::NotUtf8)
        );
        assert_eq!(read_frame(&mut reader, &mut buf, 64).await.unwrap(), None);
    }

    #[test]
    fn bad_json_is_malformed() {
        assert_eq!(
            decode_line("{not json", 1024).unwrap_err().kind(),
            ErrorKind::MalformedPayload
        );
    }
}
