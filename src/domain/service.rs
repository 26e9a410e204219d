// ドメインサービス
// 在庫テーブルに対する空室確認・引当と、注文から予約リクエストへの変換を実装

use crate::domain::error::DomainError;
use crate::domain::model::{
    BookingSlot, InventoryEntry, Order, OrderId, ReservationRequest, RoomAvailability,
};
use crate::domain::port::Logger;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// 空室管理エンジン
/// (ホテル, 客室, 暦日) → 在庫エントリの並行マップを単独で所有し、
/// 複数日にまたがる引当を1つのクリティカルセクションとして実行する
///
/// テーブル全体を覆う1つの RwLock という粗いロック方式を採用している。
/// 1リクエストの全日程に対する検証と引当が他のリクエストと交錯しないことが
/// 不変条件であり、スロット単位のロックに分割する場合もこの原子性は保たなければならない
pub struct AvailabilityEngine {
    table: RwLock<HashMap<BookingSlot, InventoryEntry>>,
    logger: Arc<dyn Logger>,
}

impl AvailabilityEngine {
    /// シードデータから在庫テーブルを構築
    /// シードに存在しないスロットは「未登録」であり quota=0 とは区別される
    pub fn new(seed: Vec<RoomAvailability>, logger: Arc<dyn Logger>) -> Self {
        let mut table = HashMap::with_capacity(seed.len());
        for availability in seed {
            let slot = BookingSlot::new(
                availability.hotel_id().clone(),
                availability.room_id().clone(),
                availability.day(),
            );
            table.insert(slot, InventoryEntry::new(availability.quota()));
        }

        Self {
            table: RwLock::new(table),
            logger,
        }
    }

    /// 空室確認
    /// リクエストの全日程について、スロットが存在しかつ残り quota が1以上かを
    /// 1つの共有ロックの中で確認する（日単位でロックを解放しない）
    ///
    /// # Returns
    /// * `Ok(())` - 全日程で引当可能
    /// * `Err(DomainError::InvalidRequest)` - リクエストが整形式でない
    /// * `Err(DomainError::Unavailable)` - 1日以上が引当不可（該当日はログに記録）
    pub fn check_availability(&self, request: &ReservationRequest) -> Result<(), DomainError> {
        request.validate()?;

        let unavailable_days = {
            let table = self.table.read();
            Self::unavailable_days(&table, request)
        };

        if !unavailable_days.is_empty() {
            self.log_unavailable(request, &unavailable_days);
            return Err(DomainError::Unavailable);
        }

        Ok(())
    }

    /// 引当
    /// 検証済みリクエストの全日程に注文IDを占有者として追加する。
    /// 空室確認と書き込みは同一の排他ロックの中で行う（validate-then-commit）。
    /// 確認と書き込みの間で他スレッドに追い越されることはなく、
    /// 他の呼び出し側が途中まで更新された日程を観測することもない
    ///
    /// # Returns
    /// * `Ok(())` - 全日程を引当済み
    /// * `Err(DomainError::InvalidRequest)` - リクエストが整形式でない（状態は変更されない）
    /// * `Err(DomainError::Unavailable)` - 1日以上が満室（状態は変更されない）
    /// * `Err(DomainError::SlotNotFound)` - 未登録スロットへの引当（設定不整合、状態は変更されない）
    pub fn reserve(&self, request: &ReservationRequest) -> Result<(), DomainError> {
        request.validate()?;

        let mut table = self.table.write();

        let mut unavailable_days = Vec::new();
        for day in request.days() {
            let slot = Self::slot_for(request, day);
            match table.get(&slot) {
                None => return Err(DomainError::SlotNotFound(slot.to_string())),
                Some(entry) if !entry.has_vacancy() => unavailable_days.push(slot.day()),
                Some(_) => {}
            }
        }

        if !unavailable_days.is_empty() {
            drop(table);
            self.log_unavailable(request, &unavailable_days);
            return Err(DomainError::Unavailable);
        }

        for day in request.days() {
            let slot = Self::slot_for(request, day);
            if let Some(entry) = table.get_mut(&slot) {
                entry.add_holder(request.order_id());
            }
        }

        Ok(())
    }

    /// スロットの占有者集合を取得（診断・テスト用）
    pub fn holders(&self, slot: &BookingSlot) -> Option<HashSet<OrderId>> {
        self.table.read().get(slot).map(|entry| entry.holders().clone())
    }

    fn slot_for(request: &ReservationRequest, day: &NaiveDateTime) -> BookingSlot {
        BookingSlot::new(
            request.hotel_id().clone(),
            request.room_id().clone(),
            day.date(),
        )
    }

    fn unavailable_days(
        table: &HashMap<BookingSlot, InventoryEntry>,
        request: &ReservationRequest,
    ) -> Vec<NaiveDate> {
        request
            .days()
            .iter()
            .filter_map(|day| {
                let slot = Self::slot_for(request, day);
                match table.get(&slot) {
                    Some(entry) if entry.has_vacancy() => None,
                    _ => Some(day.date()),
                }
            })
            .collect()
    }

    fn log_unavailable(&self, request: &ReservationRequest, unavailable_days: &[NaiveDate]) {
        let days = unavailable_days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let mut context = HashMap::new();
        context.insert("order_id".to_string(), request.order_id().to_string());
        context.insert("hotel_id".to_string(), request.hotel_id().to_string());
        context.insert("room_id".to_string(), request.room_id().to_string());
        context.insert("unavailable_days".to_string(), days);

        self.logger.info(
            "AvailabilityEngine",
            "Hotel room is not available for selected dates",
            None,
            Some(context),
        );
    }
}

/// 予約サービスのエラー型
/// 空室なしという通常の業務結果を、下位のエンジン・設定エラーと区別して表現する
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("room is unavailable for the requested dates")]
    RoomUnavailable,
    #[error("invalid booking input: {0}")]
    Validation(String),
    #[error("availability engine failure: {0}")]
    Engine(DomainError),
}

/// 予約サービス
/// 注文のチェックイン/チェックアウトを日単位の予約リクエストへ変換し、
/// 空室管理エンジンに引当を委譲する
pub struct BookingService {
    engine: Arc<AvailabilityEngine>,
    logger: Arc<dyn Logger>,
}

impl BookingService {
    pub fn new(engine: Arc<AvailabilityEngine>, logger: Arc<dyn Logger>) -> Self {
        Self { engine, logger }
    }

    /// 注文の滞在日程を予約する
    ///
    /// # Returns
    /// * `Ok(())` - 全日程を引当済み
    /// * `Err(BookingError::Validation)` - チェックイン > チェックアウト等の入力エラー
    /// * `Err(BookingError::RoomUnavailable)` - 空室なし（業務上の通常の失敗）
    /// * `Err(BookingError::Engine)` - 在庫設定の不整合などの下位エラー
    pub fn book(&self, order: &Order) -> Result<(), BookingError> {
        let days = days_between(order.check_in(), order.check_out());
        if days.is_empty() {
            // 日程が空になるのは check_in > check_out の入力エラーのみ
            // 「0泊の予約成功」として扱ってはならない
            return Err(BookingError::Validation(format!(
                "check-in {} is after check-out {}",
                order.check_in(),
                order.check_out()
            )));
        }

        let request = ReservationRequest::new(
            order.id(),
            order.hotel_id().clone(),
            order.room_id().clone(),
            days,
        );

        match self.engine.reserve(&request) {
            Ok(()) => Ok(()),
            Err(DomainError::Unavailable) => {
                let mut context = HashMap::new();
                context.insert("order_id".to_string(), order.id().to_string());
                self.logger.info(
                    "BookingService",
                    "Can't book a room: no availability",
                    None,
                    Some(context),
                );
                Err(BookingError::RoomUnavailable)
            }
            Err(DomainError::InvalidRequest(msg)) => Err(BookingError::Validation(msg)),
            Err(err) => Err(BookingError::Engine(err)),
        }
    }
}

/// チェックインからチェックアウトまでの暦日の列を0時0分0秒で返す
/// 両端を含む: 1泊の滞在はチェックイン日とチェックアウト日の2日を予約する
/// `from` が `to` より後の場合は空（呼び出し側で入力エラーとして扱う）
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> Vec<NaiveDateTime> {
    if from > to {
        return Vec::new();
    }

    let mut days = Vec::new();
    let mut day = from.date();
    while day <= to.date() {
        days.push(day.and_time(NaiveTime::MIN));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{HotelId, OrderId, RoomId};
    use chrono::NaiveDate;
    use uuid::Uuid;

    struct NoopLogger;

    impl Logger for NoopLogger {
        fn debug(&self, _: &str, _: &str, _: Option<Uuid>, _: Option<HashMap<String, String>>) {}
        fn info(&self, _: &str, _: &str, _: Option<Uuid>, _: Option<HashMap<String, String>>) {}
        fn warn(&self, _: &str, _: &str, _: Option<Uuid>, _: Option<HashMap<String, String>>) {}
        fn error(&self, _: &str, _: &str, _: Option<Uuid>, _: Option<HashMap<String, String>>) {}
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(0, 0, 0).unwrap()
    }

    fn seed_engine(quota: u32, days: &[NaiveDate]) -> AvailabilityEngine {
        let seed = days
            .iter()
            .map(|day| {
                RoomAvailability::new(HotelId::new("reddison"), RoomId::new("lux"), *day, quota)
            })
            .collect();
        AvailabilityEngine::new(seed, Arc::new(NoopLogger))
    }

    fn request(order_id: u64, days: Vec<NaiveDateTime>) -> ReservationRequest {
        ReservationRequest::new(
            OrderId::new(order_id),
            HotelId::new("reddison"),
            RoomId::new("lux"),
            days,
        )
    }

    fn slot(day: NaiveDate) -> BookingSlot {
        BookingSlot::new(HotelId::new("reddison"), RoomId::new("lux"), day)
    }

    #[test]
    fn test_check_availability_succeeds_for_seeded_slot() {
        let engine = seed_engine(1, &[date(2024, 1, 1)]);
        let req = request(1, vec![midnight(2024, 1, 1)]);
        assert!(engine.check_availability(&req).is_ok());
    }

    #[test]
    fn test_check_availability_fails_for_unknown_slot() {
        let engine = seed_engine(1, &[date(2024, 1, 1)]);
        let req = request(1, vec![midnight(2024, 2, 1)]);
        assert_eq!(
            engine.check_availability(&req),
            Err(DomainError::Unavailable)
        );
    }

    #[test]
    fn test_check_availability_fails_for_zero_quota() {
        let engine = seed_engine(0, &[date(2024, 1, 1)]);
        let req = request(1, vec![midnight(2024, 1, 1)]);
        assert_eq!(
            engine.check_availability(&req),
            Err(DomainError::Unavailable)
        );
    }

    #[test]
    fn test_check_availability_rejects_malformed_request() {
        let engine = seed_engine(1, &[date(2024, 1, 1)]);
        let req = request(0, vec![midnight(2024, 1, 1)]);
        assert!(matches!(
            engine.check_availability(&req),
            Err(DomainError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_reserve_adds_holder() {
        let engine = seed_engine(1, &[date(2024, 1, 1)]);
        let req = request(1, vec![midnight(2024, 1, 1)]);
        assert!(engine.reserve(&req).is_ok());

        let holders = engine.holders(&slot(date(2024, 1, 1))).unwrap();
        assert_eq!(holders.len(), 1);
        assert!(holders.contains(&OrderId::new(1)));
    }

    #[test]
    fn test_reserve_exhausted_quota_fails() {
        let engine = seed_engine(1, &[date(2024, 1, 1)]);
        assert!(engine.reserve(&request(1, vec![midnight(2024, 1, 1)])).is_ok());
        assert_eq!(
            engine.reserve(&request(2, vec![midnight(2024, 1, 1)])),
            Err(DomainError::Unavailable)
        );

        let holders = engine.holders(&slot(date(2024, 1, 1))).unwrap();
        assert_eq!(holders.len(), 1); // quota を超えない
    }

    #[test]
    fn test_reserve_duplicate_order_does_not_double_consume() {
        let engine = seed_engine(2, &[date(2024, 1, 1)]);
        assert!(engine.reserve(&request(1, vec![midnight(2024, 1, 1)])).is_ok());
        assert!(engine.reserve(&request(1, vec![midnight(2024, 1, 1)])).is_ok());

        let holders = engine.holders(&slot(date(2024, 1, 1))).unwrap();
        assert_eq!(holders.len(), 1); // 同一注文の再引当で占有数は増えない
    }

    #[test]
    fn test_reserve_unknown_slot_is_slot_not_found() {
        let engine = seed_engine(1, &[date(2024, 1, 1)]);
        let req = request(1, vec![midnight(2024, 1, 1), midnight(2024, 1, 2)]);
        assert!(matches!(
            engine.reserve(&req),
            Err(DomainError::SlotNotFound(_))
        ));

        // 何も引当てられていない
        let holders = engine.holders(&slot(date(2024, 1, 1))).unwrap();
        assert!(holders.is_empty());
    }

    #[test]
    fn test_reserve_multi_day_is_all_or_nothing() {
        let days = [date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)];
        let engine = seed_engine(1, &days);

        // 中日だけ先に埋める
        assert!(engine.reserve(&request(9, vec![midnight(2024, 1, 2)])).is_ok());

        let req = request(
            1,
            vec![midnight(2024, 1, 1), midnight(2024, 1, 2), midnight(2024, 1, 3)],
        );
        assert_eq!(engine.reserve(&req), Err(DomainError::Unavailable));

        // 失敗したリクエストはどの日も引当てていない
        assert!(engine.holders(&slot(date(2024, 1, 1))).unwrap().is_empty());
        assert!(engine.holders(&slot(date(2024, 1, 3))).unwrap().is_empty());
    }

    #[test]
    fn test_days_between_single_day() {
        let days = days_between(midnight(2024, 1, 1), midnight(2024, 1, 1));
        assert_eq!(days, vec![midnight(2024, 1, 1)]);
    }

    #[test]
    fn test_days_between_inclusive_range() {
        let days = days_between(midnight(2024, 1, 1), midnight(2024, 1, 4));
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], midnight(2024, 1, 1));
        assert_eq!(days[3], midnight(2024, 1, 4));
    }

    #[test]
    fn test_days_between_truncates_time_of_day() {
        let from = date(2024, 1, 1).and_hms_opt(15, 30, 0).unwrap();
        let to = date(2024, 1, 2).and_hms_opt(9, 0, 0).unwrap();
        let days = days_between(from, to);
        assert_eq!(days, vec![midnight(2024, 1, 1), midnight(2024, 1, 2)]);
    }

    #[test]
    fn test_days_between_reversed_range_is_empty() {
        let days = days_between(midnight(2024, 1, 2), midnight(2024, 1, 1));
        assert!(days.is_empty());
    }

    #[test]
    fn test_book_reversed_stay_is_validation_error() {
        let engine = Arc::new(seed_engine(1, &[date(2024, 1, 1)]));
        let service = BookingService::new(engine, Arc::new(NoopLogger));
        let order = Order::new(
            OrderId::new(1),
            crate::domain::model::OrderDraft::new(
                HotelId::new("reddison"),
                RoomId::new("lux"),
                "guest@example.com",
                midnight(2024, 1, 2),
                midnight(2024, 1, 1),
            ),
        );
        assert!(matches!(
            service.book(&order),
            Err(BookingError::Validation(_))
        ));
    }

    #[test]
    fn test_book_full_room_is_room_unavailable() {
        let engine = Arc::new(seed_engine(0, &[date(2024, 1, 1)]));
        let service = BookingService::new(engine, Arc::new(NoopLogger));
        let order = Order::new(
            OrderId::new(1),
            crate::domain::model::OrderDraft::new(
                HotelId::new("reddison"),
                RoomId::new("lux"),
                "guest@example.com",
                midnight(2024, 1, 1),
                midnight(2024, 1, 1),
            ),
        );
        assert_eq!(service.book(&order), Err(BookingError::RoomUnavailable));
    }

    #[test]
    fn test_book_unknown_slot_is_engine_error() {
        let engine = Arc::new(seed_engine(1, &[date(2024, 1, 1)]));
        let service = BookingService::new(engine, Arc::new(NoopLogger));
        let order = Order::new(
            OrderId::new(1),
            crate::domain::model::OrderDraft::new(
                HotelId::new("reddison"),
                RoomId::new("lux"),
                "guest@example.com",
                midnight(2024, 1, 1),
                midnight(2024, 1, 2),
            ),
        );
        assert!(matches!(service.book(&order), Err(BookingError::Engine(_))));
    }
}
