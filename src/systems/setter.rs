//! 手元スタックから処理机への納品
//!
//! 納品は明示的な状態機械で単一飛行にする: 同時に飛ぶ紙は常に1枚で、
//! 先頭の紙が着地してから次の1枚を切り離す。距離条件は開始時のみ
//! 評価し、始まった納品は手元が空になるまで続ける。

use crate::constants::*;
use crate::systems::pool::Paper;
use crate::systems::transfer::TransferAnimation;
use bevy::prelude::*;

/// 納品の動作設定
#[derive(Debug, Clone)]
pub struct SetterConfig {
    pub setting_distance: f32,
    pub lerp_secs: f32,
}

impl Default for SetterConfig {
    fn default() -> Self {
        Self {
            setting_distance: SETTING_DISTANCE,
            lerp_secs: SET_LERP_SECS,
        }
    }
}

/// 納品の進行状態
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SetterState {
    #[default]
    Idle,
    InFlight {
        paper: Entity,
    },
}

/// 手元スタックの紙を処理机へ1枚ずつ納品するセッタ
#[derive(Component)]
pub struct PaperSetter {
    pub config: SetterConfig,
    pub destination: Entity,
    pub carry_anchor: Entity,
    pub state: SetterState,
}

impl PaperSetter {
    pub fn new(config: SetterConfig, destination: Entity, carry_anchor: Entity) -> Self {
        Self {
            config,
            destination,
            carry_anchor,
            state: SetterState::Idle,
        }
    }
}

/// 納品状態機械を1フレーム進める
pub fn set_papers_system(
    mut commands: Commands,
    mut q_setters: Query<(&Transform, &mut PaperSetter), Without<Paper>>,
    q_dest: Query<&Transform, (Without<Paper>, Without<PaperSetter>)>,
    q_children: Query<&Children>,
    mut q_papers: Query<&mut Transform, With<Paper>>,
    q_in_flight: Query<(), With<TransferAnimation>>,
) {
    for (player_tf, mut setter) in q_setters.iter_mut() {
        let continuing = match setter.state {
            SetterState::InFlight { paper } => {
                if q_in_flight.contains(paper) {
                    continue;
                }
                // 直前の1枚が着地した
                true
            }
            SetterState::Idle => false,
        };

        let Ok(dest_tf) = q_dest.get(setter.destination) else {
            setter.state = SetterState::Idle;
            continue;
        };
        let player_pos = player_tf.translation.truncate();
        let near = player_pos.distance(dest_tf.translation.truncate())
            <= setter.config.setting_distance;
        if !continuing && !near {
            continue;
        }

        let front = q_children
            .get(setter.carry_anchor)
            .ok()
            .and_then(|children| children.iter().find(|child| q_papers.contains(*child)));
        let Some(paper) = front else {
            if continuing {
                info!("SET: carried stack empty, done");
            }
            setter.state = SetterState::Idle;
            continue;
        };
        let Ok(mut paper_tf) = q_papers.get_mut(paper) else {
            setter.state = SetterState::Idle;
            continue;
        };

        // 先頭の紙を切り離し、机の現在の積み枚数ぶん上へ向けて搬送する
        let start_pos = player_pos + CARRY_BASE_OFFSET + paper_tf.translation.truncate();
        let start_rot = paper_tf.rotation;
        paper_tf.translation = start_pos.extend(Z_FLYING);
        let dest_count = q_children
            .get(setter.destination)
            .map(|children| children.len())
            .unwrap_or(0);
        let end_pos = dest_tf.translation.truncate()
            + Vec2::new(0.0, dest_count as f32 * STACK_STEP);
        commands
            .entity(paper)
            .remove::<ChildOf>()
            .insert(TransferAnimation::new(
                start_pos,
                end_pos,
                start_rot,
                dest_tf.rotation,
                setter.config.lerp_secs,
                setter.destination,
                STACK_STEP,
            ));
        info!(
            "SET: paper {:?} -> desk {:?} (stack {})",
            paper, setter.destination, dest_count
        );
        setter.state = SetterState::InFlight { paper };
    }
}
