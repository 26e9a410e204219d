use crate::domain::model::Order;
use chrono::NaiveDateTime;
use serde::Serialize;

/// 注文用のレスポンスDTO
/// `processed=false` の間は `success` に意味がない点に注意
#[derive(Serialize)]
pub struct OrderResponse {
    pub id: u64,
    pub hotel_id: String,
    pub room_id: String,
    pub email: String,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub processed: bool,
    pub success: bool,
}

impl OrderResponse {
    /// ドメインオブジェクトからOrderResponseを作成
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().value(),
            hotel_id: order.hotel_id().to_string(),
            room_id: order.room_id().to_string(),
            email: order.guest_email().to_string(),
            from: order.check_in(),
            to: order.check_out(),
            processed: order.processed(),
            success: order.success(),
        }
    }
}
