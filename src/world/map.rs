//! オフィスマップと座標変換API

use crate::constants::*;
use bevy::prelude::*;

/// 床タイルのマーカー
#[derive(Component)]
pub struct Tile;

/// 壁・机などの通行不可セルを保持するグリッドマップ
/// クリック先の有効判定と直線経路の遮蔽チェックに使う
#[derive(Resource)]
pub struct OfficeMap {
    pub obstacles: Vec<bool>,
}

impl Default for OfficeMap {
    fn default() -> Self {
        Self {
            obstacles: vec![false; (MAP_WIDTH * MAP_HEIGHT) as usize],
        }
    }
}

impl OfficeMap {
    #[inline(always)]
    pub fn pos_to_idx(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= MAP_WIDTH || y < 0 || y >= MAP_HEIGHT {
            return None;
        }
        Some((y * MAP_WIDTH + x) as usize)
    }

    #[inline(always)]
    pub fn world_to_grid(pos: Vec2) -> (i32, i32) {
        (
            (pos.x / TILE_SIZE).floor() as i32,
            (pos.y / TILE_SIZE).floor() as i32,
        )
    }

    #[inline(always)]
    pub fn grid_to_world(x: i32, y: i32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * TILE_SIZE,
            (y as f32 + 0.5) * TILE_SIZE,
        )
    }

    pub fn set_blocked(&mut self, x: i32, y: i32, blocked: bool) {
        if let Some(idx) = Self::pos_to_idx(x, y) {
            self.obstacles[idx] = blocked;
        }
    }

    /// マップ外は通行不可とみなす
    pub fn is_walkable_world(&self, pos: Vec2) -> bool {
        let (x, y) = Self::world_to_grid(pos);
        match Self::pos_to_idx(x, y) {
            Some(idx) => !self.obstacles[idx],
            None => false,
        }
    }

    /// 直線経路上に障害物が無いか（半タイル間隔でサンプリング）
    pub fn is_path_clear(&self, from: Vec2, to: Vec2) -> bool {
        let dist = from.distance(to);
        if dist <= f32::EPSILON {
            return self.is_walkable_world(to);
        }
        let steps = (dist / (TILE_SIZE * 0.5)).ceil().max(1.0) as i32;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            if !self.is_walkable_world(from.lerp(to, t)) {
                return false;
            }
        }
        true
    }
}
