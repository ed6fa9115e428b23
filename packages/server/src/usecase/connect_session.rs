//! UseCase: セッション接続処理

use std::sync::Arc;

use relay_shared::time::timestamp_to_rfc3339;

use crate::domain::{PendingSession, RegistryError, Session, SessionRegistry};

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// Registry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 受け付けた接続を Registry に登録する
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<Session>)` - ID が割り当てられた AwaitingName 状態のセッション
    /// * `Err(RegistryError::Closed)` - シャットダウン開始後のため登録できない
    pub async fn execute(&self, pending: PendingSession) -> Result<Arc<Session>, RegistryError> {
        let session = self.registry.register(pending).await?;

        tracing::info!(
            session_id = %session.id(),
            peer = %session.peer_addr(),
            connected_at = %timestamp_to_rfc3339(session.connected_at()),
            "New connection"
        );

        Ok(session)
    }
}
