use crate::domain::model::{Order, OrderDraft, OrderId};
use crate::domain::port::{OrderRepository, RepositoryError};
use async_trait::async_trait;
use parking_lot::Mutex;

/// ストアの内部状態
/// 注文リストと採番カウンタを1つのミューテックスで覆い、
/// 追加・ステータス更新・走査をそれぞれ原子的にする
struct Store {
    orders: Vec<Order>,
    max_id: u64,
}

/// インメモリ注文リポジトリ
/// 注文を作成順のリストで保持する。IDは1始まりの単調増加で採番される。
/// 注文は削除されない
pub struct InMemoryOrderRepository {
    store: Mutex<Store>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// 注文リストの初期容量を指定して作成
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Mutex::new(Store {
                orders: Vec::with_capacity(capacity),
                max_id: 0,
            }),
        }
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, draft: OrderDraft) -> Result<Order, RepositoryError> {
        let mut store = self.store.lock();
        store.max_id += 1;
        let order = Order::new(OrderId::new(store.max_id), draft);
        store.orders.push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let store = self.store.lock();
        Ok(store
            .orders
            .iter()
            .find(|order| order.id() == order_id)
            .cloned())
    }

    async fn find_first_unprocessed(&self) -> Result<Option<Order>, RepositoryError> {
        let store = self.store.lock();
        Ok(store
            .orders
            .iter()
            .find(|order| !order.processed())
            .cloned())
    }

    async fn set_processed(
        &self,
        order_id: OrderId,
        success: bool,
    ) -> Result<Order, RepositoryError> {
        let mut store = self.store.lock();
        match store.orders.iter_mut().find(|order| order.id() == order_id) {
            Some(order) => {
                // false→true の一方向遷移。2回目以降の呼び出しは状態を変えない
                order.mark_processed(success);
                Ok(order.clone())
            }
            None => Err(RepositoryError::NotFound(order_id.to_string())),
        }
    }
}
