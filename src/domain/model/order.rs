use crate::domain::model::{HotelId, OrderId, RoomId};
use chrono::NaiveDateTime;

/// 注文の作成データ
/// ストアが採番する前の、IDを持たない注文内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    hotel_id: HotelId,
    room_id: RoomId,
    guest_email: String,
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
}

impl OrderDraft {
    pub fn new(
        hotel_id: HotelId,
        room_id: RoomId,
        guest_email: impl Into<String>,
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
    ) -> Self {
        Self {
            hotel_id,
            room_id,
            guest_email: guest_email.into(),
            check_in,
            check_out,
        }
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn guest_email(&self) -> &str {
        &self.guest_email
    }

    pub fn check_in(&self) -> NaiveDateTime {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDateTime {
        self.check_out
    }
}

/// 注文エンティティ
/// 作成データとライフサイクルフラグを1つのフラットなレコードとして保持する
/// ライフサイクル: `processed=false` で作成され、ちょうど1回だけ
/// `processed=true` に遷移する（`success` は予約結果を反映）。以後変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    hotel_id: HotelId,
    room_id: RoomId,
    guest_email: String,
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    processed: bool,
    success: bool,
}

impl Order {
    /// ストアが採番したIDと作成データから注文を作成
    pub fn new(id: OrderId, draft: OrderDraft) -> Self {
        Self {
            id,
            hotel_id: draft.hotel_id,
            room_id: draft.room_id,
            guest_email: draft.guest_email,
            check_in: draft.check_in,
            check_out: draft.check_out,
            processed: false,
            success: false,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn guest_email(&self) -> &str {
        &self.guest_email
    }

    pub fn check_in(&self) -> NaiveDateTime {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDateTime {
        self.check_out
    }

    pub fn processed(&self) -> bool {
        self.processed
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// 処理済みにマークする
    /// false→true の一方向遷移。既に処理済みの場合は何もしない
    pub fn mark_processed(&mut self, success: bool) {
        if self.processed {
            return;
        }
        self.processed = true;
        self.success = success;
    }
}
