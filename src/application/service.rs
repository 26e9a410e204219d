use crate::application::ApplicationError;
use crate::domain::model::{Order, OrderDraft, OrderId};
use crate::domain::port::OrderRepository;
use std::sync::Arc;

/// 注文アプリケーションサービス
/// REST層からの注文作成・参照を受け付ける
/// 予約結果の反映は非同期のワーカーが行うため、作成時点では常に未処理
pub struct OrderApplicationService<R>
where
    R: OrderRepository,
{
    order_repository: Arc<R>,
}

impl<R> OrderApplicationService<R>
where
    R: OrderRepository,
{
    /// 新しいアプリケーションサービスを作成
    ///
    /// # Arguments
    /// * `order_repository` - 注文リポジトリ
    pub fn new(order_repository: Arc<R>) -> Self {
        Self { order_repository }
    }

    /// 新しい注文を作成
    /// IDはストアが採番する
    ///
    /// # Returns
    /// * `Ok(Order)` - 作成された注文（`processed=false`）
    /// * `Err(ApplicationError)` - 作成失敗
    pub async fn create_order(&self, draft: OrderDraft) -> Result<Order, ApplicationError> {
        self.order_repository
            .create(draft)
            .await
            .map_err(ApplicationError::from)
    }

    /// 注文IDで注文を取得
    ///
    /// # Returns
    /// * `Ok(Some(Order))` - 注文が見つかった
    /// * `Ok(None)` - 注文が見つからなかった
    /// * `Err(ApplicationError)` - 取得失敗
    pub async fn get_order_by_id(&self, id: OrderId) -> Result<Option<Order>, ApplicationError> {
        self.order_repository
            .find_by_id(id)
            .await
            .map_err(ApplicationError::from)
    }
}
