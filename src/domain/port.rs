// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::model::{Order, OrderDraft, OrderId};
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// ロガートレイト
/// ログ出力を抽象化するポート
/// 出力の失敗が業務処理を失敗させたりブロックしたりしてはならない
pub trait Logger: Send + Sync {
    /// デバッグレベルのログを出力
    fn debug(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 情報レベルのログを出力
    fn info(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 警告レベルのログを出力
    fn warn(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// エラーレベルのログを出力
    fn error(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );
}

/// リポジトリエラー型
/// オーダーストア操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// 対象の注文が存在しない
    NotFound(String),
    /// 操作に失敗
    OperationFailed(String),
    /// データの取得に失敗
    FetchFailed(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::NotFound(msg) => write!(f, "Order not found: {}", msg),
            RepositoryError::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            RepositoryError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// 注文リポジトリトレイト
/// 注文の永続化とライフサイクル遷移を抽象化する
/// IDの採番はストア側の責務（1始まりの単調増加）
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// 作成データから注文を永続化し、IDを採番して返す
    ///
    /// # Arguments
    /// * `draft` - 注文の作成データ
    ///
    /// # Returns
    /// * `Ok(Order)` - 採番済みの注文（`processed=false, success=false`）
    /// * `Err(RepositoryError)` - 永続化失敗
    async fn create(&self, draft: OrderDraft) -> Result<Order, RepositoryError>;

    /// 注文IDで注文を検索する
    ///
    /// # Returns
    /// * `Ok(Some(Order))` - 注文が見つかった
    /// * `Ok(None)` - 注文が見つからなかった
    /// * `Err(RepositoryError)` - 検索失敗
    async fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// 作成順で最初の未処理注文を取得する
    /// `Ok(None)` は「現時点で処理すべき注文がない」ことを意味し、エラーではない
    async fn find_first_unprocessed(&self) -> Result<Option<Order>, RepositoryError>;

    /// 注文を処理済みにマークする
    /// false→true の一方向遷移で、ストア内部で直列化される
    /// 既に処理済みの注文への再呼び出しは状態を変えない
    ///
    /// # Arguments
    /// * `order_id` - 対象の注文ID
    /// * `success` - 予約結果
    ///
    /// # Returns
    /// * `Ok(Order)` - 更新後の注文
    /// * `Err(RepositoryError::NotFound)` - 注文が存在しない
    async fn set_processed(
        &self,
        order_id: OrderId,
        success: bool,
    ) -> Result<Order, RepositoryError>;
}
