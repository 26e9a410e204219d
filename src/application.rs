// アプリケーション層
// ユースケースの調整役。ドメインサービスとポートを組み合わせる

pub mod error;
pub mod processor;
pub mod service;
pub mod worker;

pub use error::ApplicationError;
