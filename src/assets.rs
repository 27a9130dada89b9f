use bevy::prelude::*;

/// 手続き生成したテクスチャのカタログ
/// 起動時に一度だけ構築され、以後は全スポーン箇所が参照する
#[derive(Resource)]
pub struct GameAssets {
    pub floor: Handle<Image>,
    pub wall: Handle<Image>,
    pub desk: Handle<Image>,
    pub dest_desk: Handle<Image>,
    pub printer: Handle<Image>,
    pub paper: Handle<Image>,
    pub money: Handle<Image>,
    pub player: Handle<Image>,
    pub money_pad: Handle<Image>,
}

#[cfg(test)]
impl GameAssets {
    /// ヘッドレステスト用の空ハンドルカタログ
    pub fn placeholder() -> Self {
        Self {
            floor: Handle::default(),
            wall: Handle::default(),
            desk: Handle::default(),
            dest_desk: Handle::default(),
            printer: Handle::default(),
            paper: Handle::default(),
            money: Handle::default(),
            player: Handle::default(),
            money_pad: Handle::default(),
        }
    }
}
