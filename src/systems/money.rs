//! プレイヤー近傍の金の回収

use crate::constants::*;
use crate::systems::pool::{Money, MoneyPool};
use crate::systems::processor::MoneySpawnPoint;
use crate::systems::transfer::TransferAnimation;
use bevy::prelude::*;

/// 金回収の動作設定
#[derive(Debug, Clone)]
pub struct MoneyCollectorConfig {
    pub collection_distance: f32,
    pub collect_secs: f32,
}

impl Default for MoneyCollectorConfig {
    fn default() -> Self {
        Self {
            collection_distance: MONEY_COLLECT_DISTANCE,
            collect_secs: MONEY_COLLECT_SECS,
        }
    }
}

/// 置き場の金を吸い寄せて回収するコレクタ
#[derive(Component)]
pub struct MoneyCollector {
    pub config: MoneyCollectorConfig,
    pub earned: usize,
}

impl MoneyCollector {
    pub fn new(config: MoneyCollectorConfig) -> Self {
        Self { config, earned: 0 }
    }
}

/// 進行中の金回収タスク
/// 目標はプレイヤーの現在位置を毎フレーム追いかける
#[derive(Component)]
pub struct MoneyCollectTask {
    pub start_pos: Vec2,
    pub start_rot: Quat,
    pub timer: Timer,
}

/// 置き場に着地済みの金のうち、射程内のものの回収を開始する
pub fn money_scan_system(
    mut commands: Commands,
    q_players: Query<(&Transform, &MoneyCollector), Without<Money>>,
    mut q_money: Query<
        (Entity, &mut Transform, &ChildOf),
        (With<Money>, Without<TransferAnimation>, Without<MoneyCollectTask>),
    >,
    mut q_pads: Query<(&Transform, &mut MoneySpawnPoint), Without<Money>>,
) {
    let Ok((player_tf, collector)) = q_players.single() else {
        return;
    };
    let player_pos = player_tf.translation.truncate();

    for (money, mut money_tf, child_of) in q_money.iter_mut() {
        // 置き場以外の親（手元スタックなど）の下にある金は対象外
        let Ok((pad_tf, mut pad)) = q_pads.get_mut(child_of.parent()) else {
            continue;
        };
        let world = pad_tf.translation.truncate() + money_tf.translation.truncate();
        if player_pos.distance(world) > collector.config.collection_distance {
            continue;
        }

        money_tf.translation = world.extend(Z_FLYING);
        let start_rot = money_tf.rotation;
        commands
            .entity(money)
            .remove::<ChildOf>()
            .insert(MoneyCollectTask {
                start_pos: world,
                start_rot,
                timer: Timer::from_seconds(collector.config.collect_secs, TimerMode::Once),
            });
        pad.occupancy = pad.occupancy.saturating_sub(1);
        info!("MONEY: picking up {:?}", money);
    }
}

/// 金の吸い寄せを1フレーム進め、完了した金をプールへ返す
pub fn collect_money_system(
    time: Res<Time>,
    mut commands: Commands,
    mut money_pool: ResMut<MoneyPool>,
    mut q_players: Query<(&Transform, &mut MoneyCollector), Without<Money>>,
    mut q_tasks: Query<(Entity, &mut Transform, &mut MoneyCollectTask), With<Money>>,
) {
    let Ok((player_tf, mut collector)) = q_players.single_mut() else {
        return;
    };
    let target = player_tf.translation.truncate();

    for (money, mut money_tf, mut task) in q_tasks.iter_mut() {
        task.timer.tick(time.delta());
        let t = task.timer.fraction();
        let pos = task.start_pos.lerp(target, t);
        money_tf.translation = pos.extend(Z_FLYING);
        money_tf.rotation = task.start_rot.slerp(player_tf.rotation, t);

        if task.timer.finished() {
            collector.earned += 1;
            info!("MONEY: collected {:?} (earned {})", money, collector.earned);
            commands.entity(money).remove::<MoneyCollectTask>();
            money_pool.0.release(&mut commands, money);
        }
    }
}
