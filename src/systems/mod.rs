pub mod collector;
pub mod money;
pub mod pool;
pub mod printer;
pub mod processor;
pub mod setter;
pub mod transfer;
pub mod visual;

use bevy::prelude::*;

/// ゲームシステムの実行順序を制御するセット
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSystemSet {
    /// 入力および一時停止の切り替え
    Input,
    /// 印刷・回収・納品・処理のコアロジック
    Logic,
    /// プレイヤー移動と搬送アニメーションの前進
    Actor,
    /// 視覚的な同期処理
    Visual,
}
