// ホテル予約管理システム
// ヘキサゴナルアーキテクチャのサンプルプロジェクト

pub mod adapter;
pub mod application;
pub mod domain;
