//! UseCase: セッション切断処理
//!
//! 受信ループの終了時とシャットダウン時の両方から呼ばれうるため、冪等に実装する。

use std::sync::Arc;

use crate::domain::{DisconnectReason, Session, SessionRegistry};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Registry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// セッションを Registry から削除し、接続を閉じる
    ///
    /// # Returns
    ///
    /// このセッションを Registry から削除したのがこの呼び出しであれば `true`
    pub async fn execute(&self, session: &Session, reason: DisconnectReason) -> bool {
        let removed = self.registry.unregister(session.id()).await;
        // unregister が既に他の経路で行われていても liveness は必ず false にする
        session.close();
        session.writer().close().await;

        let name = session.display_name().await;
        if removed {
            tracing::info!(
                session_id = %session.id(),
                name = %name,
                "Session has disconnected: {}",
                reason
            );
        } else {
            tracing::debug!(
                session_id = %session.id(),
                name = %name,
                "Session was already removed: {}",
                reason
            );
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockPeerWriter, PendingSession},
        infrastructure::registry::InMemorySessionRegistry,
    };

    #[tokio::test]
    async fn test_disconnect_removes_and_closes_session() {
        // テスト項目: 切断するとセッションが Registry から削除され、接続が閉じられる
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        let mut writer = MockPeerWriter::new();
        writer.expect_close().times(1).return_const(());
        let session = registry
            .register(PendingSession::new(
                "127.0.0.1:50003".parse().unwrap(),
                Arc::new(writer),
                0,
            ))
            .await
            .unwrap();
        let usecase = DisconnectSessionUseCase::new(registry.clone());

        // when (操作):
        let removed = usecase
            .execute(&session, DisconnectReason::PeerClosed)
            .await;

        // then (期待する結果):
        assert!(removed);
        assert!(!session.is_alive());
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_twice_is_noop() {
        // テスト項目: 2 回切断しても 1 回目と同じ状態のまま（二重切断の競合を想定）
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        let mut writer = MockPeerWriter::new();
        writer.expect_close().times(2).return_const(());
        let session = registry
            .register(PendingSession::new(
                "127.0.0.1:50004".parse().unwrap(),
                Arc::new(writer),
                0,
            ))
            .await
            .unwrap();
        let other = registry
            .register(PendingSession::new(
                "127.0.0.1:50005".parse().unwrap(),
                Arc::new(MockPeerWriter::new()),
                0,
            ))
            .await
            .unwrap();
        let usecase = DisconnectSessionUseCase::new(registry.clone());

        // when (操作):
        let first = usecase
            .execute(&session, DisconnectReason::PeerClosed)
            .await;
        let second = usecase.execute(&session, DisconnectReason::Shutdown).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        let remaining: Vec<_> = registry.snapshot().await.iter().map(|s| s.id()).collect();
        assert_eq!(remaining, vec![other.id()]);
    }
}
