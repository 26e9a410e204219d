use crate::application::processor::{OrderProcessor, ProcessingError};
use crate::domain::model::Order;
use crate::domain::port::{Logger, OrderRepository, RepositoryError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// ポーリングの既定間隔
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// 未処理注文イテレータ
/// 次の未処理注文が現れるまでオーダーストアをポーリングする。
/// イベント通知ではなく意図的な単純ポーリング: ストアはインメモリで走査が安価な一方、
/// 最悪のピックアップ遅延はバックオフ間隔で抑えられる
pub struct UnprocessedOrderIterator<R>
where
    R: OrderRepository,
{
    order_repository: Arc<R>,
    poll_interval: Duration,
}

impl<R> UnprocessedOrderIterator<R>
where
    R: OrderRepository,
{
    pub fn new(order_repository: Arc<R>) -> Self {
        Self::with_poll_interval(order_repository, DEFAULT_POLL_INTERVAL)
    }

    /// ポーリング間隔を指定して作成（テストでは短い間隔を使う）
    pub fn with_poll_interval(order_repository: Arc<R>, poll_interval: Duration) -> Self {
        Self {
            order_repository,
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// 次の未処理注文を取得する
    /// 未処理注文がない間はバックオフ間隔で再試行する。
    /// 待機中もキャンセルを監視するため、キャンセルは1間隔以内に観測される
    ///
    /// # Returns
    /// * `Ok(Some(Order))` - 次の未処理注文
    /// * `Ok(None)` - キャンセルされた
    /// * `Err(RepositoryError)` - ストアの走査に失敗
    pub async fn next_unprocessed(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<Order>, RepositoryError> {
        loop {
            if cancel.is_cancelled() {
                return Ok(None);
            }

            if let Some(order) = self.order_repository.find_first_unprocessed().await? {
                return Ok(Some(order));
            }

            tokio::select! {
                _ = cancel.cancelled() => return Ok(None),
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}

/// ワーカーループ
/// キャンセルされるまで未処理注文を取り出して処理し続ける。
/// 1件の注文の失敗でループを止めない: 空室なしもその他の処理エラーも
/// ログに記録して次の注文へ進む
pub struct Worker<R>
where
    R: OrderRepository,
{
    iterator: UnprocessedOrderIterator<R>,
    processor: OrderProcessor<R>,
    logger: Arc<dyn Logger>,
}

impl<R> Worker<R>
where
    R: OrderRepository,
{
    pub fn new(
        iterator: UnprocessedOrderIterator<R>,
        processor: OrderProcessor<R>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            iterator,
            processor,
            logger,
        }
    }

    /// ワーカーを実行する
    /// キャンセルトークンが発火するまで戻らない。
    /// キャンセルはループ先頭とバックオフ待機の双方で観測される
    pub async fn run(&self, cancel: CancellationToken) {
        self.logger.info("Worker", "Worker started working", None, None);

        loop {
            let order = match self.iterator.next_unprocessed(&cancel).await {
                Ok(Some(order)) => order,
                Ok(None) => break, // キャンセルされた
                Err(err) => {
                    self.logger.error(
                        "Worker",
                        &format!("Failed to fetch next unprocessed order: {}", err),
                        None,
                        None,
                    );
                    // ストア障害で同じエラーを高速に繰り返さないよう1間隔待つ
                    if self.wait_or_cancel(&cancel).await {
                        break;
                    }
                    continue;
                }
            };

            match self.processor.process_order(&order).await {
                Ok(()) => {
                    self.logger.info(
                        "Worker",
                        "Order processed",
                        None,
                        Some(Self::order_context(&order)),
                    );
                }
                Err(ProcessingError::RoomUnavailable) => {
                    self.logger.info(
                        "Worker",
                        "Room is unavailable, order rejected",
                        None,
                        Some(Self::order_context(&order)),
                    );
                }
                Err(err) => {
                    self.logger.error(
                        "Worker",
                        &format!("Error processing order: {}", err),
                        None,
                        Some(Self::order_context(&order)),
                    );
                    // 注文は未処理のまま残るため、即時再取得の空回りを避ける
                    if self.wait_or_cancel(&cancel).await {
                        break;
                    }
                }
            }
        }

        self.logger.info("Worker", "Worker stopped", None, None);
    }

    /// バックオフ間隔ぶん待機する。キャンセルされたら true
    async fn wait_or_cancel(&self, cancel: &CancellationToken) -> bool {
        tokio::select! {
            _ = cancel.cancelled() => true,
            _ = tokio::time::sleep(self.iterator.poll_interval()) => false,
        }
    }

    fn order_context(order: &Order) -> HashMap<String, String> {
        let mut context = HashMap::new();
        context.insert("order_id".to_string(), order.id().to_string());
        context.insert("hotel_id".to_string(), order.hotel_id().to_string());
        context.insert("room_id".to_string(), order.room_id().to_string());
        context
    }
}
