use bevy::prelude::*;

pub const TILE_SIZE: f32 = 32.0;
pub const MAP_WIDTH: i32 = 30;
pub const MAP_HEIGHT: i32 = 20;

// ============================================================
// Z軸レイヤー管理
// ============================================================

/// 床タイルのレイヤー
pub const Z_FLOOR: f32 = 0.0;
/// 金の置き場パッドのレイヤー
pub const Z_PAD: f32 = 0.2;
/// 机・プリンタのレイヤー
pub const Z_DESK: f32 = 0.3;
/// 着地済みアイテムのベースレイヤー
pub const Z_ITEM: f32 = 0.5;
/// 積み重ね1枚ごとのレイヤー加算
pub const Z_ITEM_STEP: f32 = 0.01;
/// 壁のレイヤー
pub const Z_WALL: f32 = 0.8;
/// プレイヤーのレイヤー
pub const Z_CHARACTER: f32 = 1.0;
/// 搬送中アイテムのレイヤー（必ず最前面）
pub const Z_FLYING: f32 = 2.0;

// ============================================================
// スプライトサイズ
// ============================================================

pub const FLOOR_SIZE: Vec2 = Vec2::new(TILE_SIZE, TILE_SIZE);
pub const WALL_SIZE: Vec2 = Vec2::new(TILE_SIZE, TILE_SIZE);
pub const DESK_SIZE: Vec2 = Vec2::new(30.0, 30.0);
pub const PRINTER_SIZE: Vec2 = Vec2::new(30.0, 30.0);
pub const PAD_SIZE: Vec2 = Vec2::new(26.0, 26.0);
pub const PAPER_SIZE: Vec2 = Vec2::new(20.0, 14.0);
pub const MONEY_SIZE: Vec2 = Vec2::new(18.0, 10.0);
pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 24.0);

// ============================================================
// オブジェクトプール
// ============================================================

/// 起動時に各プールへ事前生成しておくアイテム数
pub const POOL_PREFILL: usize = 100;

// ============================================================
// プリンタ
// ============================================================

/// 印刷間隔 (秒)
pub const PRINT_INTERVAL_SECS: f32 = 2.0;
/// 印刷した紙がスロットへ届くまでの搬送時間 (秒)
pub const PRINT_LERP_SECS: f32 = 1.0;
/// 着地位置の散らし幅 (px)
pub const PRINT_POSITION_JITTER: f32 = 2.0;
/// 着地回転の散らし幅 (ラジアン)
pub const PRINT_ROTATION_JITTER: f32 = 0.05;
/// スロット高さカウンタの折り返し値
pub const MAX_STACK_HEIGHT: u32 = 50;
/// 紙の排出口のプリンタ中心からのオフセット
pub const PRINTER_EXIT_OFFSET: Vec2 = Vec2::new(0.0, -24.0);
/// 紙1枚ごとの積み上げオフセット (px)
pub const STACK_STEP: f32 = 2.0;

// ============================================================
// 紙回収
// ============================================================

/// 机の回収が始まる距離 (px)
pub const COLLECTION_DISTANCE: f32 = 1.5 * TILE_SIZE;
/// 回収中の紙の移動速度 (px/秒)
pub const COLLECTION_SPEED: f32 = 120.0;
/// 回収中の紙の回転スルーレート (ラジアン/秒)
pub const COLLECTION_ROTATION_SLEW: f32 = 5.0;
/// 到着とみなす距離 (px)
pub const ARRIVAL_EPSILON: f32 = 1.0;
/// 手元スタックアンカーのプレイヤー中心からのオフセット
pub const CARRY_BASE_OFFSET: Vec2 = Vec2::new(0.0, 10.0);

// ============================================================
// 納品
// ============================================================

/// 処理机への納品が始まる距離 (px)
pub const SETTING_DISTANCE: f32 = 1.5 * TILE_SIZE;
/// 紙1枚の納品搬送時間 (秒)
pub const SET_LERP_SECS: f32 = 1.0;

// ============================================================
// 紙処理・金スポーン
// ============================================================

/// 紙1枚の処理間隔 (秒)
pub const PROCESS_SECS: f32 = 1.0;
/// 金が置き場へ届くまでの搬送時間 (秒)
pub const MONEY_LERP_SECS: f32 = 1.0;
/// 金1枚ごとの積み上げオフセット (px)
pub const MONEY_HEIGHT_STEP: f32 = 3.0;
/// 金スポーン時の初期回転 (ラジアン)
pub const MONEY_SPAWN_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

// ============================================================
// 金回収
// ============================================================

/// 金の回収が始まる距離 (px)
pub const MONEY_COLLECT_DISTANCE: f32 = 1.5 * TILE_SIZE;
/// 金がプレイヤーへ吸い寄せられる時間 (秒)
pub const MONEY_COLLECT_SECS: f32 = 0.5;

// ============================================================
// プレイヤー移動
// ============================================================

/// 移動速度 (px/秒)
pub const MOVE_SPEED: f32 = 160.0;
/// 回頭速度 (ラジアン/秒)
pub const TURN_SPEED: f32 = 8.0;
/// 目的地に到着したとみなす半径 (px)
pub const STOP_EPSILON: f32 = 4.0;

// ============================================================
// カメラ
// ============================================================

/// 毎フレームの追従補間係数
pub const CAMERA_SMOOTH: f32 = 0.1;
/// 注視点のプレイヤーからのオフセット
pub const CAMERA_OFFSET: Vec2 = Vec2::new(0.0, 16.0);

// ============================================================
// オフィスレイアウト (グリッド座標)
// ============================================================

pub const PRINTER_GRID: (i32, i32) = (4, 10);
pub const PRINT_DESK_GRIDS: [(i32, i32); 3] = [(8, 13), (8, 10), (8, 7)];
pub const DEST_DESK_GRID: (i32, i32) = (22, 10);
pub const MONEY_PAD_GRIDS: [(i32, i32); 2] = [(25, 12), (25, 8)];
pub const PLAYER_GRID: (i32, i32) = (14, 10);
/// 間仕切り壁の列とその縦範囲
pub const PARTITION_X: i32 = 17;
pub const PARTITION_Y: (i32, i32) = (13, 17);
