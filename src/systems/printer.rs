//! 紙の印刷とスロットへの搬送開始

use crate::assets::GameAssets;
use crate::constants::*;
use crate::events::PapersCollected;
use crate::systems::pool::PaperPool;
use crate::systems::transfer::TransferAnimation;
use bevy::prelude::*;
use rand::Rng;

/// プリンタの動作設定
/// 全数値を生成時に列挙する
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub interval_secs: f32,
    pub lerp_secs: f32,
    pub position_jitter: f32,
    pub rotation_jitter: f32,
    pub max_stack_height: u32,
    pub exit_offset: Vec2,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            interval_secs: PRINT_INTERVAL_SECS,
            lerp_secs: PRINT_LERP_SECS,
            position_jitter: PRINT_POSITION_JITTER,
            rotation_jitter: PRINT_ROTATION_JITTER,
            max_stack_height: MAX_STACK_HEIGHT,
            exit_offset: PRINTER_EXIT_OFFSET,
        }
    }
}

/// 一定間隔で紙を取得し、担当スロットへラウンドロビンで積むプリンタ
#[derive(Component)]
pub struct Printer {
    pub config: PrinterConfig,
    pub slots: Vec<Entity>,
    /// スロットごとの高さカウンタ（max_stack_heightで折り返す）
    pub heights: Vec<u32>,
    pub current_slot: usize,
    pub timer: Timer,
}

impl Printer {
    pub fn new(config: PrinterConfig, slots: Vec<Entity>) -> Self {
        let timer = Timer::from_seconds(config.interval_secs, TimerMode::Repeating);
        Self {
            heights: vec![0; slots.len()],
            current_slot: 0,
            slots,
            config,
            timer,
        }
    }
}

/// 印刷ループ
/// タイマー発火ごとに紙をプールから取得し、排出口から現在スロットへの
/// 搬送を開始する。高さカウンタの加算は搬送開始前に同期的に行う。
pub fn print_papers_system(
    time: Res<Time>,
    mut commands: Commands,
    assets: Res<GameAssets>,
    mut paper_pool: ResMut<PaperPool>,
    mut q_printers: Query<(&Transform, &mut Printer)>,
    q_slots: Query<&Transform, Without<Printer>>,
) {
    let mut rng = rand::thread_rng();
    for (printer_tf, mut printer) in q_printers.iter_mut() {
        printer.timer.tick(time.delta());
        if !printer.timer.just_finished() || printer.slots.is_empty() {
            continue;
        }

        let slot_index = printer.current_slot;
        let slot_entity = printer.slots[slot_index];
        let Ok(slot_tf) = q_slots.get(slot_entity) else {
            warn!("PRINT: slot {:?} is gone, skipping", slot_entity);
            continue;
        };

        let exit = printer_tf.translation.truncate() + printer.config.exit_offset;
        let jitter = Vec2::new(
            rng.gen_range(-printer.config.position_jitter..=printer.config.position_jitter),
            rng.gen_range(-printer.config.position_jitter..=printer.config.position_jitter),
        );
        let height = printer.heights[slot_index];
        let end_pos = slot_tf.translation.truncate()
            + jitter
            + Vec2::new(0.0, height as f32 * STACK_STEP);
        let end_rot = Quat::from_rotation_z(
            rng.gen_range(-printer.config.rotation_jitter..=printer.config.rotation_jitter),
        );

        let paper = paper_pool.0.acquire(&mut commands, &assets);
        commands.entity(paper).insert((
            Transform::from_translation(exit.extend(Z_FLYING)),
            TransferAnimation::new(
                exit,
                end_pos,
                Quat::IDENTITY,
                end_rot,
                printer.config.lerp_secs,
                slot_entity,
                STACK_STEP,
            ),
        ));
        info!(
            "PRINT: paper {:?} -> slot {:?} (height {})",
            paper, slot_entity, height
        );

        printer.heights[slot_index] += 1;
        if printer.heights[slot_index] >= printer.config.max_stack_height {
            printer.heights[slot_index] = 0;
        }
        printer.current_slot = (slot_index + 1) % printer.slots.len();
    }
}

/// 回収完了メッセージを受けて該当スロットの高さカウンタをリセットする
pub fn reset_stack_height_system(
    mut messages: MessageReader<PapersCollected>,
    mut q_printers: Query<&mut Printer>,
) {
    for message in messages.read() {
        for mut printer in q_printers.iter_mut() {
            if let Some(index) = printer.slots.iter().position(|slot| *slot == message.desk) {
                printer.heights[index] = 0;
            }
        }
    }
}
