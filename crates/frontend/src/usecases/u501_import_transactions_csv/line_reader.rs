//! Newline-delimited stream decoding for the import endpoint.
//!
//! The server writes one JSON object per line and flushes as rows are processed, so
//! chunk boundaries are arbitrary: a chunk may end mid-line or in the middle of a
//! multi-byte UTF-8 sequence. Bytes are buffered and only complete lines are decoded.
//! `\n` never occurs inside a multi-byte sequence, so splitting on it before decoding
//! is always safe.

use futures::{Stream, StreamExt};

/// Incremental byte-to-line splitter
#[derive(Debug, Default)]
pub struct LineDecoder {
    buf: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return every line it completes.
    ///
    /// Blank lines are dropped and a trailing `\r` is stripped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        // everything already buffered is known to hold no newline
        let mut scan_from = self.buf.len();
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(pos) = self.buf[scan_from..].iter().position(|&b| b == b'\n') {
            let end = scan_from + pos;
            if let Some(line) = decode_line(&self.buf[start..end]) {
                lines.push(line);
            }
            start = end + 1;
            scan_from = start;
        }
        self.buf.drain(..start);
        lines
    }

    /// Flush whatever is left once the stream has ended without a trailing newline
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buf);
        decode_line(&rest)
    }

    pub fn pending_len(&self) -> usize {
        self.buf.len()
    }
}

fn decode_line(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let line = text.trim_end_matches('\r');
    if line.trim().is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

/// Turn a stream of byte chunks into a stream of complete lines.
///
/// A chunk error is yielded once and ends the stream. Each call starts from an empty
/// buffer, so the returned stream can't be resumed halfway through another one.
pub fn ndjson_lines<S, E>(chunks: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<Vec<u8>, E>>,
{
    async_stream::stream! {
        let mut decoder = LineDecoder::new();
        let mut chunks = std::pin::pin!(chunks);

        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    for line in decoder.push(&bytes) {
                        yield Ok(line);
                    }
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }

        if let Some(line) = decoder.finish() {
            yield Ok(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::stream;

    const SAMPLE: &str = "{\"type\":\"log\",\"message\":\"Привет, мир\"}\n\
                          {\"type\":\"progress\",\"message\":\"€ 1 234 → ok\",\"current\":1,\"total\":2}\r\n\
                          \n\
                          {\"type\":\"complete\",\"message\":\"готово 🎉\"}";

    fn collect(chunks: Vec<Vec<u8>>) -> Vec<String> {
        let input = stream::iter(chunks.into_iter().map(Ok::<_, String>));
        block_on(ndjson_lines(input).collect::<Vec<_>>())
            .into_iter()
            .map(|r| r.unwrap())
            .collect()
    }

    fn whole() -> Vec<String> {
        collect(vec![SAMPLE.as_bytes().to_vec()])
    }

    #[test]
    fn test_whole_stream_lines() {
        let lines = whole();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Привет"));
        assert!(!lines[1].ends_with('\r'));
        assert_eq!(lines[2], "{\"type\":\"complete\",\"message\":\"готово 🎉\"}");
    }

    #[test]
    fn test_every_two_way_split_matches_whole() {
        let bytes = SAMPLE.as_bytes();
        let expected = whole();
        for i in 0..=bytes.len() {
            let chunks = vec![bytes[..i].to_vec(), bytes[i..].to_vec()];
            assert_eq!(collect(chunks), expected, "split at byte {}", i);
        }
    }

    #[test]
    fn test_byte_by_byte_matches_whole() {
        let chunks: Vec<Vec<u8>> = SAMPLE.as_bytes().iter().map(|b| vec![*b]).collect();
        assert_eq!(collect(chunks), whole());
    }

    #[test]
    fn test_three_way_splits_inside_multibyte_chars() {
        let bytes = SAMPLE.as_bytes();
        let expected = whole();
        // every position where a char boundary is NOT a byte boundary
        let inner: Vec<usize> = (1..bytes.len())
            .filter(|i| !SAMPLE.is_char_boundary(*i))
            .collect();
        assert!(!inner.is_empty());
        for &i in &inner {
            for &j in inner.iter().filter(|j| **j > i) {
                let chunks = vec![
                    bytes[..i].to_vec(),
                    bytes[i..j].to_vec(),
                    bytes[j..].to_vec(),
                ];
                assert_eq!(collect(chunks), expected);
            }
        }
    }

    #[test]
    fn test_final_line_without_newline_is_flushed() {
        let mut decoder = LineDecoder::new();
        assert!(decoder.push(b"{\"a\":1}\n{\"b\"").len() == 1);
        assert!(decoder.push(b":2}").is_empty());
        assert_eq!(decoder.pending_len(), 7);
        assert_eq!(decoder.finish(), Some("{\"b\":2}".to_string()));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_whitespace_tail_is_not_a_line() {
        let mut decoder = LineDecoder::new();
        assert_eq!(decoder.push(b"{}\n  \r\n"), vec!["{}".to_string()]);
        decoder.push(b"   ");
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let mut decoder = LineDecoder::new();
        let lines = decoder.push(b"ab\xffcd\n");
        assert_eq!(lines, vec!["ab\u{FFFD}cd".to_string()]);
    }

    #[test]
    fn test_chunk_error_ends_stream() {
        let input = stream::iter(vec![
            Ok(b"{\"x\":1}\n{\"y\"".to_vec()),
            Err("connection reset".to_string()),
            Ok(b":2}\n".to_vec()),
        ]);
        let items = block_on(ndjson_lines(input).collect::<Vec<_>>());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Ok("{\"x\":1}".to_string()));
        assert_eq!(items[1], Err("connection reset".to_string()));
    }

    #[test]
    fn test_empty_stream_yields_nothing() {
        assert!(collect(vec![]).is_empty());
        assert!(collect(vec![Vec::new(), Vec::new()]).is_empty());
    }

    #[test]
    fn test_long_line_in_small_chunks() {
        let long = format!("{{\"type\":\"log\",\"message\":\"{}\"}}", "ж".repeat(5000));
        let input = format!("{}\nshort\ntail", long);
        let mut decoder = LineDecoder::new();
        let mut lines = Vec::new();
        for chunk in input.as_bytes().chunks(3) {
            lines.extend(decoder.push(chunk));
        }
        assert_eq!(lines, vec![long, "short".to_string()]);
        assert_eq!(decoder.pending_len(), 4);
        assert_eq!(decoder.finish().as_deref(), Some("tail"));
    }
}
