// ドメイン層
// 空室在庫と予約のビジネスルールを実装する

pub mod error;
pub mod model;
pub mod port;
pub mod service;
