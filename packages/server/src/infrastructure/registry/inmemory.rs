//! InMemory SessionRegistry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! 登録順を保つため Vec をインメモリのストレージとして使用します。
//!
//! ## ロック規律
//!
//! 全ての操作は 1 つの Mutex の下で行われ、ロック中にネットワーク I/O は行いません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{PendingSession, RegistryError, Session, SessionId, SessionRegistry};

#[derive(Default)]
struct Inner {
    /// 登録順に並んだ生存中のセッション
    sessions: Vec<Arc<Session>>,
    /// 次に割り当てる ID（再利用しない）
    next_id: u64,
    /// close_all 実行済みかどうか
    closed: bool,
}

/// インメモリ SessionRegistry 実装
#[derive(Default)]
pub struct InMemorySessionRegistry {
    inner: Mutex<Inner>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn register(&self, pending: PendingSession) -> Result<Arc<Session>, RegistryError> {
        let mut inner = self.inner.lock().await;
        if inner.closed {
            return Err(RegistryError::Closed);
        }

        let id = SessionId::new(inner.next_id);
        inner.next_id += 1;

        let session = Arc::new(Session::register(id, pending));
        inner.sessions.push(Arc::clone(&session));
        tracing::debug!(session_id = %id, "Session registered");

        Ok(session)
    }

    async fn unregister(&self, id: SessionId) -> bool {
        let mut inner = self.inner.lock().await;
        let Some(index) = inner.sessions.iter().position(|s| s.id() == id) else {
            return false;
        };

        let session = inner.sessions.remove(index);
        session.close();
        tracing::debug!(session_id = %id, "Session unregistered");
        true
    }

    async fn snapshot(&self) -> Vec<Arc<Session>> {
        let inner = self.inner.lock().await;
        inner.sessions.clone()
    }

    async fn close_all(&self) -> Vec<Arc<Session>> {
        let mut inner = self.inner.lock().await;
        inner.closed = true;

        let sessions = std::mem::take(&mut inner.sessions);
        for session in &sessions {
            session.close();
        }
        sessions
    }

    async fn count(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockPeerWriter;
    use futures_util::future::join_all;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemorySessionRegistry の register / unregister / snapshot / close_all
    // - ID の一意性と単調増加（並行登録を含む）
    // - unregister の冪等性
    //
    // 【なぜこのテストが必要か】
    // - Registry は全セッションとアクセプタが共有する唯一の可変状態
    // - ブロードキャストと切断処理の正しさはここに依存する
    // ========================================

    fn pending() -> PendingSession {
        PendingSession::new(
            "127.0.0.1:50000".parse().unwrap(),
            Arc::new(MockPeerWriter::new()),
            0,
        )
    }

    #[tokio::test]
    async fn test_register_assigns_sequential_ids() {
        // テスト項目: 登録順に 0 から連番の ID が割り当てられる
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();

        // when (操作):
        let a = registry.register(pending()).await.unwrap();
        let b = registry.register(pending()).await.unwrap();
        let c = registry.register(pending()).await.unwrap();

        // then (期待する結果):
        assert_eq!(a.id(), SessionId::new(0));
        assert_eq!(b.id(), SessionId::new(1));
        assert_eq!(c.id(), SessionId::new(2));
        assert_eq!(registry.count().await, 3);
    }

    #[tokio::test]
    async fn test_concurrent_registrations_get_distinct_increasing_ids() {
        // テスト項目: 並行登録でも ID は重複せず、スナップショットは ID 昇順（登録順）になる
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());

        // when (操作):
        let handles = (0..64).map(|_| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.register(pending()).await.unwrap().id() })
        });
        let mut ids: Vec<SessionId> = join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        // then (期待する結果):
        let snapshot_ids: Vec<SessionId> =
            registry.snapshot().await.iter().map(|s| s.id()).collect();
        assert!(snapshot_ids.windows(2).all(|w| w[0] < w[1]));

        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 64);
        assert_eq!(ids, snapshot_ids);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_unregister() {
        // テスト項目: 切断後も ID は再利用されない
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let first = registry.register(pending()).await.unwrap();
        registry.unregister(first.id()).await;

        // when (操作):
        let second = registry.register(pending()).await.unwrap();

        // then (期待する結果):
        assert_eq!(second.id(), SessionId::new(1));
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        // テスト項目: 同じセッションを 2 回 unregister しても 1 回と同じ状態になる
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let a = registry.register(pending()).await.unwrap();
        let b = registry.register(pending()).await.unwrap();

        // when (操作):
        let first = registry.unregister(a.id()).await;
        let second = registry.unregister(a.id()).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert!(!a.is_alive());
        assert!(b.is_alive());
        let remaining: Vec<SessionId> = registry.snapshot().await.iter().map(|s| s.id()).collect();
        assert_eq!(remaining, vec![b.id()]);
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        // テスト項目: スナップショット取得後の変更はスナップショットに影響しない
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let a = registry.register(pending()).await.unwrap();
        let snapshot = registry.snapshot().await;

        // when (操作):
        registry.unregister(a.id()).await;
        registry.register(pending()).await.unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), a.id());
    }

    #[tokio::test]
    async fn test_close_all_drains_and_refuses_new_sessions() {
        // テスト項目: close_all で全セッションが閉じられ、以降の登録は拒否される
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let a = registry.register(pending()).await.unwrap();
        let b = registry.register(pending()).await.unwrap();

        // when (操作):
        let drained = registry.close_all().await;
        let late = registry.register(pending()).await;

        // then (期待する結果):
        assert_eq!(drained.len(), 2);
        assert!(!a.is_alive());
        assert!(!b.is_alive());
        assert_eq!(registry.count().await, 0);
        assert_eq!(late.unwrap_err(), RegistryError::Closed);
        assert!(!registry.unregister(a.id()).await);
    }
}
