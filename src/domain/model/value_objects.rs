use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use std::fmt;

/// 注文の一意識別子
/// オーダーストアが採番する（1始まりの単調増加、0は不正値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(u64);

impl OrderId {
    /// 採番済みの値から OrderId を作成
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// 内部の数値を取得
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ホテルの識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotelId(String);

impl HotelId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 客室の識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 在庫スロットのキー
/// (ホテル, 客室, 暦日) の値等価で同一性を判断する
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingSlot {
    hotel_id: HotelId,
    room_id: RoomId,
    day: NaiveDate,
}

impl BookingSlot {
    pub fn new(hotel_id: HotelId, room_id: RoomId, day: NaiveDate) -> Self {
        Self {
            hotel_id,
            room_id,
            day,
        }
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }
}

impl fmt::Display for BookingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.hotel_id, self.room_id, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_order_id_value() {
        let id = OrderId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_booking_slot_value_equality() {
        let a = BookingSlot::new(
            HotelId::new("reddison"),
            RoomId::new("lux"),
            day(2024, 1, 1),
        );
        let b = BookingSlot::new(
            HotelId::new("reddison"),
            RoomId::new("lux"),
            day(2024, 1, 1),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_booking_slot_differs_by_day() {
        let a = BookingSlot::new(
            HotelId::new("reddison"),
            RoomId::new("lux"),
            day(2024, 1, 1),
        );
        let b = BookingSlot::new(
            HotelId::new("reddison"),
            RoomId::new("lux"),
            day(2024, 1, 2),
        );
        assert_ne!(a, b);
    }
}
