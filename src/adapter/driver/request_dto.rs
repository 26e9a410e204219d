use crate::domain::model::{HotelId, OrderDraft, RoomId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 注文作成用のリクエストDTO
/// `from`/`to` は宿泊初日と最終日（両端を含む）
#[derive(Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub hotel_id: String,
    pub room_id: String,
    pub email: String,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl CreateOrderRequest {
    /// リクエストを注文の作成データに変換
    pub fn into_draft(self) -> OrderDraft {
        OrderDraft::new(
            HotelId::new(self.hotel_id),
            RoomId::new(self.room_id),
            self.email,
            self.from,
            self.to,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_create_order_request_deserialization() {
        let json = r#"{
            "hotel_id": "reddison",
            "room_id": "lux",
            "email": "guest@example.com",
            "from": "2024-01-01T00:00:00",
            "to": "2024-01-04T00:00:00"
        }"#;

        let request: CreateOrderRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.hotel_id, "reddison");
        assert_eq!(request.room_id, "lux");
        assert_eq!(request.email, "guest@example.com");
        assert_eq!(request.from, midnight(2024, 1, 1));
        assert_eq!(request.to, midnight(2024, 1, 4));
    }

    #[test]
    fn test_create_order_request_serialization() {
        let request = CreateOrderRequest {
            hotel_id: "reddison".to_string(),
            room_id: "lux".to_string(),
            email: "guest@example.com".to_string(),
            from: midnight(2024, 1, 1),
            to: midnight(2024, 1, 2),
        };

        let json = serde_json::to_string(&request).unwrap();
        let _deserialized: CreateOrderRequest = serde_json::from_str(&json).unwrap();

        // 必要なフィールドがシリアライズされることを確認
        assert!(json.contains("hotel_id"));
        assert!(json.contains("room_id"));
        assert!(json.contains("email"));
        assert!(json.contains("from"));
        assert!(json.contains("to"));
    }

    #[test]
    fn test_into_draft() {
        let request = CreateOrderRequest {
            hotel_id: "reddison".to_string(),
            room_id: "lux".to_string(),
            email: "guest@example.com".to_string(),
            from: midnight(2024, 1, 1),
            to: midnight(2024, 1, 2),
        };

        let draft = request.into_draft();

        assert_eq!(draft.hotel_id().as_str(), "reddison");
        assert_eq!(draft.room_id().as_str(), "lux");
        assert_eq!(draft.guest_email(), "guest@example.com");
        assert_eq!(draft.check_in(), midnight(2024, 1, 1));
        assert_eq!(draft.check_out(), midnight(2024, 1, 2));
    }
}
