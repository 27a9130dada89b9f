//! プレイヤーによる机の紙束の回収
//!
//! 机ごとの回収タスクは `CollectTask` コンポーネントの存在そのものが
//! 単一飛行フラグになる。タスクはスナップショットした紙を毎フレーム
//! ライブな目標（射程内なら手元スタック、離脱中なら元の机）へ動かす。

use crate::constants::*;
use crate::events::PapersCollected;
use crate::systems::pool::Paper;
use crate::systems::transfer::{rotate_towards, step_towards};
use bevy::prelude::*;

/// 回収の動作設定
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub collection_distance: f32,
    pub collection_speed: f32,
    pub rotation_slew: f32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            collection_distance: COLLECTION_DISTANCE,
            collection_speed: COLLECTION_SPEED,
            rotation_slew: COLLECTION_ROTATION_SLEW,
        }
    }
}

/// 担当する机を巡回し、紙を手元スタックへ吸い寄せるコレクタ
#[derive(Component)]
pub struct PaperCollector {
    pub config: CollectorConfig,
    pub desks: Vec<Entity>,
    /// 手元スタックのアンカー（プレイヤーの子エンティティ）
    pub carry_anchor: Entity,
    pub in_range: Vec<bool>,
    pub collected_total: usize,
}

impl PaperCollector {
    pub fn new(config: CollectorConfig, desks: Vec<Entity>, carry_anchor: Entity) -> Self {
        Self {
            config,
            in_range: vec![false; desks.len()],
            desks,
            carry_anchor,
            collected_total: 0,
        }
    }
}

/// 机ごとの進行中回収タスク
#[derive(Component)]
pub struct CollectTask {
    pub papers: Vec<Entity>,
    pub arrived: Vec<bool>,
    pub arrived_count: usize,
    /// 離脱中の戻り先
    pub desk_pos: Vec2,
    pub desk_rot: Quat,
}

/// 机との距離を監視し、射程に入った机の回収タスクを開始する
pub fn desk_scan_system(
    mut commands: Commands,
    mut q_collectors: Query<(&Transform, &mut PaperCollector), Without<Paper>>,
    q_desks: Query<
        (&Transform, Option<&Children>, Has<CollectTask>),
        (Without<Paper>, Without<PaperCollector>),
    >,
    mut q_papers: Query<&mut Transform, With<Paper>>,
) {
    for (player_tf, mut collector) in q_collectors.iter_mut() {
        let player_pos = player_tf.translation.truncate();
        for index in 0..collector.desks.len() {
            let desk = collector.desks[index];
            let Ok((desk_tf, children, has_task)) = q_desks.get(desk) else {
                collector.in_range[index] = false;
                continue;
            };
            let desk_pos = desk_tf.translation.truncate();
            collector.in_range[index] =
                player_pos.distance(desk_pos) <= collector.config.collection_distance;

            if !collector.in_range[index] || has_task {
                continue;
            }
            let Some(children) = children else {
                continue;
            };
            let papers: Vec<Entity> = children
                .iter()
                .filter(|child| q_papers.contains(*child))
                .collect();
            if papers.is_empty() {
                continue;
            }

            // スナップショットした紙を机から切り離し、ワールド座標へ持ち上げる
            for paper in &papers {
                if let Ok(mut paper_tf) = q_papers.get_mut(*paper) {
                    let world = desk_pos + paper_tf.translation.truncate();
                    paper_tf.translation = world.extend(Z_FLYING);
                }
                commands.entity(*paper).remove::<ChildOf>();
            }
            info!("COLLECT: start desk {:?} ({} papers)", desk, papers.len());
            commands.entity(desk).insert(CollectTask {
                arrived: vec![false; papers.len()],
                arrived_count: 0,
                papers,
                desk_pos,
                desk_rot: desk_tf.rotation,
            });
        }
    }
}

/// 進行中の回収タスクを1フレーム進める
/// 目標は毎フレーム再計算する: 射程内なら手元スタック、離脱中は元の机。
/// 全ての紙が手元スタックへ到着した時のみタスクが完了する。
pub fn collect_papers_system(
    time: Res<Time>,
    mut commands: Commands,
    mut q_collectors: Query<(&Transform, &mut PaperCollector), Without<Paper>>,
    mut q_tasks: Query<(Entity, &mut CollectTask)>,
    mut q_papers: Query<&mut Transform, With<Paper>>,
    q_children: Query<&Children>,
    mut collected_writer: MessageWriter<PapersCollected>,
) {
    let Ok((player_tf, mut collector)) = q_collectors.single_mut() else {
        return;
    };
    let player_pos = player_tf.translation.truncate();
    let carry_pos = player_pos + CARRY_BASE_OFFSET;
    let dt = time.delta_secs();

    for (desk_entity, mut task) in q_tasks.iter_mut() {
        let in_range = collector
            .desks
            .iter()
            .position(|desk| *desk == desk_entity)
            .map(|index| collector.in_range[index])
            .unwrap_or(false);
        let carried_count = q_children
            .get(collector.carry_anchor)
            .map(|children| children.len())
            .unwrap_or(0);

        let mut landed_this_frame = 0;
        for index in 0..task.papers.len() {
            if task.arrived[index] {
                continue;
            }
            let paper = task.papers[index];
            let Ok(mut paper_tf) = q_papers.get_mut(paper) else {
                // 搬送中に消えた紙は到着済み扱いで吸収する
                task.arrived[index] = true;
                task.arrived_count += 1;
                continue;
            };

            let (target_pos, target_rot) = if in_range {
                (
                    carry_pos
                        + Vec2::new(0.0, (carried_count + index) as f32 * STACK_STEP),
                    player_tf.rotation,
                )
            } else {
                (
                    task.desk_pos + Vec2::new(0.0, index as f32 * STACK_STEP),
                    task.desk_rot,
                )
            };

            let pos = paper_tf.translation.truncate();
            let next = step_towards(pos, target_pos, collector.config.collection_speed * dt);
            paper_tf.translation = next.extend(Z_FLYING);
            paper_tf.rotation = rotate_towards(
                paper_tf.rotation,
                target_rot,
                collector.config.rotation_slew * dt,
            );

            // 到着判定は手元スタックが目標のときだけ行う
            if in_range && next.distance(target_pos) < ARRIVAL_EPSILON {
                let stack_index = carried_count + landed_this_frame;
                paper_tf.translation = Vec3::new(
                    0.0,
                    stack_index as f32 * STACK_STEP,
                    Z_ITEM + stack_index as f32 * Z_ITEM_STEP,
                );
                paper_tf.rotation = Quat::IDENTITY;
                commands.entity(paper).insert(ChildOf(collector.carry_anchor));
                task.arrived[index] = true;
                task.arrived_count += 1;
                landed_this_frame += 1;
            }
        }

        if task.arrived_count == task.papers.len() {
            collector.collected_total += task.papers.len();
            info!(
                "COLLECT: desk {:?} done, {} collected (total {})",
                desk_entity,
                task.papers.len(),
                collector.collected_total
            );
            commands.entity(desk_entity).remove::<CollectTask>();
            collected_writer.write(PapersCollected { desk: desk_entity });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct SeenCollected(Vec<Entity>);

    fn capture_collected(
        mut reader: MessageReader<PapersCollected>,
        mut seen: ResMut<SeenCollected>,
    ) {
        for message in reader.read() {
            seen.0.push(message.desk);
        }
    }

    fn tick(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    /// 机1つ・紙3枚・射程内プレイヤーの最小シーン
    fn collector_app(paper_count: usize) -> (App, Entity, Entity, Entity) {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.init_resource::<SeenCollected>();
        app.add_message::<PapersCollected>();
        app.add_systems(
            Update,
            (desk_scan_system, collect_papers_system, capture_collected).chain(),
        );

        let desk = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, Z_DESK)).id();
        for index in 0..paper_count {
            let paper = app
                .world_mut()
                .spawn((
                    Paper,
                    Transform::from_xyz(0.0, index as f32 * STACK_STEP, Z_ITEM),
                ))
                .id();
            app.world_mut().entity_mut(paper).insert(ChildOf(desk));
        }

        let player = app
            .world_mut()
            .spawn(Transform::from_xyz(30.0, 0.0, Z_CHARACTER))
            .id();
        let anchor = app.world_mut().spawn(Transform::default()).id();
        app.world_mut().entity_mut(anchor).insert(ChildOf(player));
        app.world_mut().entity_mut(player).insert(PaperCollector::new(
            CollectorConfig::default(),
            vec![desk],
            anchor,
        ));
        (app, desk, player, anchor)
    }

    #[test]
    fn collects_all_papers_and_resets_flag() {
        let (mut app, desk, _player, anchor) = collector_app(3);

        for _ in 0..20 {
            tick(&mut app, 0.1);
        }

        assert_eq!(app.world().get::<Children>(anchor).unwrap().len(), 3);
        assert!(app.world().get::<CollectTask>(desk).is_none());
        let mut q_collector = app.world_mut().query::<&PaperCollector>();
        let collector = q_collector.single(app.world()).unwrap();
        assert_eq!(collector.collected_total, 3);
        assert_eq!(app.world().resource::<SeenCollected>().0, vec![desk]);
    }

    #[test]
    fn only_one_task_per_desk_until_completion() {
        let (mut app, desk, _player, anchor) = collector_app(2);

        tick(&mut app, 0.05);
        assert_eq!(app.world().get::<CollectTask>(desk).unwrap().papers.len(), 2);

        // 飛行中に追加で届いた紙はスナップショットに混ざらない
        let late_paper = app
            .world_mut()
            .spawn((Paper, Transform::default()))
            .id();
        app.world_mut().entity_mut(late_paper).insert(ChildOf(desk));
        tick(&mut app, 0.05);
        assert_eq!(app.world().get::<CollectTask>(desk).unwrap().papers.len(), 2);

        // 完了後の再スキャンで残りの紙に新しいタスクが始まる
        for _ in 0..20 {
            tick(&mut app, 0.1);
        }
        assert_eq!(app.world().get::<Children>(anchor).unwrap().len(), 3);
        assert_eq!(app.world().resource::<SeenCollected>().0.len(), 2);
    }

    #[test]
    fn leaving_range_retargets_papers_back_to_desk() {
        let (mut app, desk, player, anchor) = collector_app(1);

        tick(&mut app, 0.05);
        assert!(app.world().get::<CollectTask>(desk).is_some());

        // 射程から離脱: 紙は机へ戻り、タスクは完了しない
        app.world_mut()
            .get_mut::<Transform>(player)
            .unwrap()
            .translation = Vec3::new(500.0, 0.0, Z_CHARACTER);
        for _ in 0..20 {
            tick(&mut app, 0.1);
        }
        assert!(app.world().get::<CollectTask>(desk).is_some());
        assert!(app.world().get::<Children>(anchor).is_none());
        let paper = app.world().get::<CollectTask>(desk).unwrap().papers[0];
        let paper_pos = app.world().get::<Transform>(paper).unwrap().translation;
        assert!(paper_pos.truncate().distance(Vec2::ZERO) < 1.0);

        // 復帰すると同じタスクが完了まで進む
        app.world_mut()
            .get_mut::<Transform>(player)
            .unwrap()
            .translation = Vec3::new(30.0, 0.0, Z_CHARACTER);
        for _ in 0..20 {
            tick(&mut app, 0.1);
        }
        assert!(app.world().get::<CollectTask>(desk).is_none());
        assert_eq!(app.world().get::<Children>(anchor).unwrap().len(), 1);
    }
}
