//! TCP を使った PeerWriter 実装
//!
//! 受信ループが `OwnedReadHalf` を所有し、書き込み側の `OwnedWriteHalf` を
//! この型が保持します。ブロードキャストは複数のタスクから同時に行われるため、
//! 書き込みは Mutex で直列化されます。
//!
//! 相手が読み込みを止めると `write_all` はブロックし続けるため、書き込みとロック待ちは
//! 全て close 用の CancellationToken と競合させます。close は先にトークンを発火させてから
//! ロックを取得します。

use async_trait::async_trait;
use tokio::{
    io::AsyncWriteExt,
    net::tcp::OwnedWriteHalf,
    sync::Mutex,
};
use tokio_util::sync::CancellationToken;

use crate::domain::{PeerWriter, TransportError};

/// TCP 接続の書き込みハンドル
pub struct TcpPeerWriter {
    /// close 後は None
    inner: Mutex<Option<OwnedWriteHalf>>,
    /// close で発火し、進行中の書き込みを中断する
    closed: CancellationToken,
}

impl TcpPeerWriter {
    pub fn new(writer: OwnedWriteHalf) -> Self {
        Self {
            inner: Mutex::new(Some(writer)),
            closed: CancellationToken::new(),
        }
    }

    async fn write_locked(&self, payload: &[u8]) -> Result<(), TransportError> {
        let mut guard = self.inner.lock().await;
        let writer = guard.as_mut().ok_or(TransportError::Closed)?;
        writer.write_all(payload).await?;
        Ok(())
    }
}

#[async_trait]
impl PeerWriter for TcpPeerWriter {
    async fn write_payload(&self, payload: &[u8]) -> Result<(), TransportError> {
        tokio::select! {
            biased;
            _ = self.closed.cancelled() => Err(TransportError::Closed),
            result = self.write_locked(payload) => result,
        }
    }

    async fn close(&self) {
        self.closed.cancel();
        let Some(mut writer) = self.inner.lock().await.take() else {
            return;
        };
        if let Err(e) = writer.shutdown().await {
            tracing::debug!("Failed to shut down connection: {}", e);
        }
    }
}
