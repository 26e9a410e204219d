use crate::domain::model::Order;
use crate::domain::port::{OrderRepository, RepositoryError};
use crate::domain::service::{BookingError, BookingService};
use std::sync::Arc;

/// 注文処理のエラー型
/// 「空室なし」は処理済みとして記録される通常の業務結果であり、
/// それ以外（予約エンジンの障害、ストア障害）とは区別される
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    /// 空室なし。注文は `processed=true, success=false` として記録済み
    #[error("room is unavailable for the requested dates")]
    RoomUnavailable,
    /// 予約に失敗。注文は未処理のまま残る
    #[error("error when booking a room: {0}")]
    Booking(BookingError),
    /// オーダーストア操作に失敗
    #[error("order store failure: {0}")]
    Repository(#[from] RepositoryError),
}

/// 注文プロセッサ
/// 1つの注文を予約し、結果をオーダーストアへ反映する
/// 状態遷移: Pending → {Booked, Rejected}（終端、1回限り）
pub struct OrderProcessor<R>
where
    R: OrderRepository,
{
    booking_service: Arc<BookingService>,
    order_repository: Arc<R>,
}

impl<R> OrderProcessor<R>
where
    R: OrderRepository,
{
    pub fn new(booking_service: Arc<BookingService>, order_repository: Arc<R>) -> Self {
        Self {
            booking_service,
            order_repository,
        }
    }

    /// 注文を1件処理する
    /// - 予約成功: `processed=true, success=true` を記録
    /// - 空室なし: `processed=true, success=false` を記録し `RoomUnavailable` を返す（非致命）
    /// - その他の予約エラー: 注文を処理済みにせず致命エラーとして伝播する
    pub async fn process_order(&self, order: &Order) -> Result<(), ProcessingError> {
        match self.booking_service.book(order) {
            Ok(()) => {
                self.order_repository.set_processed(order.id(), true).await?;
                Ok(())
            }
            Err(BookingError::RoomUnavailable) => {
                self.order_repository
                    .set_processed(order.id(), false)
                    .await?;
                Err(ProcessingError::RoomUnavailable)
            }
            Err(err) => Err(ProcessingError::Booking(err)),
        }
    }
}
