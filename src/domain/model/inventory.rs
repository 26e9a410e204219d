use crate::domain::model::{HotelId, OrderId, RoomId};
use chrono::NaiveDate;
use std::collections::HashSet;

/// 空室シードデータ
/// 起動時に在庫テーブルへ投入する (ホテル, 客室, 暦日, quota) のタプル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomAvailability {
    hotel_id: HotelId,
    room_id: RoomId,
    day: NaiveDate,
    quota: u32,
}

impl RoomAvailability {
    pub fn new(hotel_id: HotelId, room_id: RoomId, day: NaiveDate, quota: u32) -> Self {
        Self {
            hotel_id,
            room_id,
            day,
            quota,
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

    pub fn quota(&self) -> u32 {
        self.quota
    }
}

/// 在庫エントリ
/// 1スロットの quota と、そのスロットを占有している注文IDの集合を保持する
/// 不変条件: `holders.len() <= quota`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    quota: u32,
    holders: HashSet<OrderId>,
}

impl InventoryEntry {
    /// quota を固定して空のエントリを作成
    pub fn new(quota: u32) -> Self {
        Self {
            quota,
            holders: HashSet::with_capacity(quota as usize),
        }
    }

    pub fn quota(&self) -> u32 {
        self.quota
    }

    pub fn holders(&self) -> &HashSet<OrderId> {
        &self.holders
    }

    /// 残り引当可能数
    pub fn remaining(&self) -> u32 {
        self.quota.saturating_sub(self.holders.len() as u32)
    }

    /// 残りが1以上あるか
    pub fn has_vacancy(&self) -> bool {
        self.remaining() >= 1
    }

    /// 注文IDを占有者として追加
    /// 集合なので同じIDの再追加は何もしない（quota を二重消費しない）
    pub fn add_holder(&mut self, order_id: OrderId) {
        self.holders.insert(order_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = InventoryEntry::new(2);
        assert_eq!(entry.quota(), 2);
        assert!(entry.holders().is_empty());
        assert_eq!(entry.remaining(), 2);
    }

    #[test]
    fn test_add_holder_consumes_quota() {
        let mut entry = InventoryEntry::new(2);
        entry.add_holder(OrderId::new(1));
        assert_eq!(entry.remaining(), 1);
        assert!(entry.has_vacancy());
        entry.add_holder(OrderId::new(2));
        assert_eq!(entry.remaining(), 0);
        assert!(!entry.has_vacancy());
    }

    #[test]
    fn test_add_holder_is_idempotent() {
        let mut entry = InventoryEntry::new(2);
        entry.add_holder(OrderId::new(1));
        entry.add_holder(OrderId::new(1));
        assert_eq!(entry.holders().len(), 1); // 集合なので増えない
        assert_eq!(entry.remaining(), 1);
    }

    #[test]
    fn test_zero_quota_has_no_vacancy() {
        let entry = InventoryEntry::new(0);
        assert!(!entry.has_vacancy());
        assert_eq!(entry.remaining(), 0);
    }

    #[test]
    fn test_holders_reports_membership() {
        let mut entry = InventoryEntry::new(1);
        assert!(!entry.holders().contains(&OrderId::new(7)));
        entry.add_holder(OrderId::new(7));
        assert!(entry.holders().contains(&OrderId::new(7)));
    }
}
