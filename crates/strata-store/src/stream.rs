use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};

use crate::error::StoreResult;

/// Incremental blob content: a stream of chunks in content order.
pub type BlobStream = BoxStream<'static, StoreResult<Bytes>>;

/// Chunk size used when a backend synthesizes a stream from buffered
/// content.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Turn already-buffered content into a [`BlobStream`] of fixed-size
/// chunks. The final chunk may be shorter; empty content yields an empty
/// stream.
pub fn chunk_stream(content: Bytes, chunk_size: usize) -> BlobStream {
    debug_assert!(chunk_size > 0);
    let chunks = (0..content.len())
        .step_by(chunk_size.max(1))
        .map(move |start| {
            let end = (start + chunk_size).min(content.len());
            Ok(content.slice(start..end))
        })
        .collect::<Vec<_>>();
    stream::iter(chunks).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    #[tokio::test]
    async fn chunks_reassemble_to_content() {
        let content = Bytes::from(vec![7u8; 10_000]);
        let chunks: Vec<Bytes> = chunk_stream(content.clone(), 4096)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 4096);
        assert_eq!(chunks[2].len(), 10_000 - 2 * 4096);
        let reassembled: Vec<u8> = chunks.concat();
        assert_eq!(reassembled, content);
    }

    #[tokio::test]
    async fn empty_content_yields_empty_stream() {
        let chunks: Vec<Bytes> = chunk_stream(Bytes::new(), DEFAULT_CHUNK_SIZE)
            .try_collect()
            .await
            .unwrap();
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn content_smaller_than_chunk_is_one_chunk() {
        let content = Bytes::from_static(b"small");
        let chunks: Vec<Bytes> = chunk_stream(content.clone(), DEFAULT_CHUNK_SIZE)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(chunks, vec![content]);
    }
}
