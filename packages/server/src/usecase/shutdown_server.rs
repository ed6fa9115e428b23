//! UseCase: サーバーのシャットダウン処理

use std::sync::Arc;

use crate::domain::SessionRegistry;

/// シャットダウンのユースケース
pub struct ShutdownServerUseCase {
    /// Registry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl ShutdownServerUseCase {
    /// 新しい ShutdownServerUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 全セッションを閉じる
    ///
    /// Registry のロック下で全セッションの liveness を false にして受信ループを起こし、
    /// ロックを解放した後に各接続を閉じる。既に終了したセッションがあっても安全。
    ///
    /// # Returns
    ///
    /// 閉じたセッションの数
    pub async fn execute(&self) -> usize {
        tracing::info!("Shutting down server...");

        let sessions = self.registry.close_all().await;
        for session in &sessions {
            session.writer().close().await;
        }

        tracing::info!(closed = sessions.len(), "All sessions closed");
        sessions.len()
    }
}
