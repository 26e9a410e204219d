use crate::domain::error::DomainError;
use crate::domain::model::{HotelId, OrderId, RoomId};
use chrono::{Duration, NaiveDateTime, Timelike};

/// 予約リクエスト
/// 1つの注文について連続した日付範囲の在庫引当を要求する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    order_id: OrderId,
    hotel_id: HotelId,
    room_id: RoomId,
    days: Vec<NaiveDateTime>,
}

impl ReservationRequest {
    pub fn new(
        order_id: OrderId,
        hotel_id: HotelId,
        room_id: RoomId,
        days: Vec<NaiveDateTime>,
    ) -> Self {
        Self {
            order_id,
            hotel_id,
            room_id,
            days,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn days(&self) -> &[NaiveDateTime] {
        &self.days
    }

    /// リクエストの整形式チェック
    /// 検証ルール:
    /// - 注文IDは0でない
    /// - ホテルID・客室IDは空でない
    /// - 日付列は空でなく、各要素は0時0分0秒
    /// - 連続する要素はちょうど24時間差の昇順（欠落・重複なし）
    ///
    /// # Returns
    /// * `Ok(())` - 整形式
    /// * `Err(DomainError::InvalidRequest)` - 違反したルールと位置を示すメッセージ
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.order_id.value() == 0 {
            return Err(DomainError::InvalidRequest("order id is required".to_string()));
        }

        if self.hotel_id.is_empty() {
            return Err(DomainError::InvalidRequest("hotel id is required".to_string()));
        }

        if self.room_id.is_empty() {
            return Err(DomainError::InvalidRequest("room id is required".to_string()));
        }

        if self.days.is_empty() {
            return Err(DomainError::InvalidRequest(
                "day sequence is required".to_string(),
            ));
        }

        for (i, day) in self.days.iter().enumerate() {
            if day.hour() != 0 || day.minute() != 0 || day.second() != 0 {
                return Err(DomainError::InvalidRequest(format!(
                    "day at index {} must have zero hour, minute and second",
                    i
                )));
            }
        }

        for i in 1..self.days.len() {
            if self.days[i] - self.days[i - 1] != Duration::hours(24) {
                return Err(DomainError::InvalidRequest(format!(
                    "day sequence is broken between indexes {} and {}",
                    i - 1,
                    i
                )));
            }
        }

        Ok(())
    }
}
