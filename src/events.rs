//! コンポーネント間のブロードキャストイベント

use bevy::prelude::*;

/// 机の紙束の回収が完了したことを知らせるメッセージ
/// 回収タスク1件の完了ごとに1回発行され、プリンタが
/// 該当スロットの高さカウンタをリセットする
#[derive(Message, Debug, Clone, Copy)]
pub struct PapersCollected {
    pub desk: Entity,
}
