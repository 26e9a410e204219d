// アダプター層
// ポートの具体実装（driven）と外部からの入力（driver）

pub mod driven;
pub mod driver;
