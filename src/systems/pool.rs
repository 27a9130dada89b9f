//! 紙・金の実体を再利用するオブジェクトプール
//!
//! 生成済みアイテムは「待機列で非表示」か「ちょうど1つの置き場の下で
//! 表示中」のどちらかにしかならない。枯渇時のみ新規生成する。

use crate::assets::GameAssets;
use crate::constants::*;
use bevy::prelude::*;
use std::collections::VecDeque;

/// プール管理対象のアイテム種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Paper,
    Money,
}

/// 紙アイテムのマーカー
#[derive(Component)]
pub struct Paper;

/// 金アイテムのマーカー
#[derive(Component)]
pub struct Money;

/// 待機列と生成関数を持つアイテムプール本体
pub struct ItemPool {
    kind: ItemKind,
    idle: VecDeque<Entity>,
    spawned: usize,
}

impl ItemPool {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            idle: VecDeque::new(),
            spawned: 0,
        }
    }

    /// 待機アイテムを再利用するか、枯渇していれば新規生成する
    pub fn acquire(&mut self, commands: &mut Commands, assets: &GameAssets) -> Entity {
        if let Some(item) = self.idle.pop_front() {
            commands
                .entity(item)
                .remove::<ChildOf>()
                .insert(Visibility::Visible);
            item
        } else {
            let item = self.spawn_item(commands, assets);
            info!("POOL: new {:?} spawned (total {})", self.kind, self.spawned);
            item
        }
    }

    /// アイテムを非表示にして待機列へ戻す
    /// 非アクティブなアイテムの二重返却は呼び出し側の誤り（ガードしない）
    pub fn release(&mut self, commands: &mut Commands, item: Entity) {
        commands.entity(item).remove::<ChildOf>().insert((
            Visibility::Hidden,
            Transform::from_translation(Vec3::ZERO),
        ));
        self.idle.push_back(item);
    }

    /// 起動時の事前生成
    pub fn prefill(&mut self, commands: &mut Commands, assets: &GameAssets, count: usize) {
        for _ in 0..count {
            let item = self.spawn_item(commands, assets);
            commands.entity(item).insert(Visibility::Hidden);
            self.idle.push_back(item);
        }
    }

    fn spawn_item(&mut self, commands: &mut Commands, assets: &GameAssets) -> Entity {
        self.spawned += 1;
        let mut entity = commands.spawn((
            Transform::default(),
            Visibility::Visible,
        ));
        match self.kind {
            ItemKind::Paper => entity.insert((
                Paper,
                Sprite {
                    image: assets.paper.clone(),
                    custom_size: Some(PAPER_SIZE),
                    ..default()
                },
                Name::new("Paper"),
            )),
            ItemKind::Money => entity.insert((
                Money,
                Sprite {
                    image: assets.money.clone(),
                    custom_size: Some(MONEY_SIZE),
                    ..default()
                },
                Name::new("Money"),
            )),
        };
        entity.id()
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    pub fn total_spawned(&self) -> usize {
        self.spawned
    }

    pub fn is_queued(&self, item: Entity) -> bool {
        self.idle.contains(&item)
    }
}

/// 紙プール
#[derive(Resource)]
pub struct PaperPool(pub ItemPool);

/// 金プール
#[derive(Resource)]
pub struct MoneyPool(pub ItemPool);
