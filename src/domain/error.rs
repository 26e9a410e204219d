/// ドメイン層のエラー型
/// 予約リクエストの検証違反と在庫引当の失敗を表現する
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 不正な予約リクエスト（例: 注文IDが0、日付列に欠落がある）
    InvalidRequest(String),
    /// 空室なし（要求された日のいずれかで quota を使い切っている）
    Unavailable,
    /// 在庫スロット未登録（シードデータに存在しない hotel/room/day への予約）
    SlotNotFound(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidRequest(msg) => write!(f, "Invalid reservation request: {}", msg),
            DomainError::Unavailable => {
                write!(f, "Hotel room is not available for the selected dates")
            }
            DomainError::SlotNotFound(msg) => write!(f, "No availability data found: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
