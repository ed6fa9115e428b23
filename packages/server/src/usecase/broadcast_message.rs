//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastMessageUseCase::execute() メソッド
//! - 送信者以外の全セッションへの配送（スナップショット順）
//!
//! ### なぜこのテストが必要か
//! - 送信者自身には配送されないことを保証
//! - 一部の書き込み失敗が残りの配送を妨げないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数セッションへの配送
//! - 異常系：途中のセッションへの書き込み失敗
//! - エッジケース：送信者のみが接続している場合（配送対象なし）

use std::sync::Arc;

use crate::domain::{Session, SessionId, SessionRegistry};

/// 1 回のブロードキャストの結果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    /// 書き込みに成功したセッション（配送順）
    pub delivered: Vec<SessionId>,
    /// 書き込みに失敗したセッション（配送順）
    pub failed: Vec<SessionId>,
}

/// メッセージ中継のユースケース
pub struct BroadcastMessageUseCase {
    /// Registry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl BroadcastMessageUseCase {
    /// 新しい BroadcastMessageUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 送信者以外の全セッションにペイロードを配送する
    ///
    /// Registry のスナップショットを取得した後、ロックを保持せずに順番に書き込む。
    /// 失敗したセッションはログに残すだけで切断しない（そのセッション自身の受信ループが検知する）。
    ///
    /// # Arguments
    ///
    /// * `origin` - 送信元のセッション
    /// * `payload` - 中継するバイト列（加工しない）
    pub async fn execute(&self, origin: &Session, payload: &[u8]) -> BroadcastReport {
        let targets = self.registry.snapshot().await;
        let mut report = BroadcastReport::default();

        for target in targets.iter().filter(|s| s.id() != origin.id()) {
            match target.writer().write_payload(payload).await {
                Ok(()) => report.delivered.push(target.id()),
                Err(e) => {
                    let name = target.display_name().await;
                    tracing::warn!(
                        session_id = %target.id(),
                        name = %name,
                        "Failed to send data to session: {}",
                        e
                    );
                    report.failed.push(target.id());
                }
            }
        }

        tracing::debug!(
            session_id = %origin.id(),
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "Broadcast finished"
        );

        report
    }
}
