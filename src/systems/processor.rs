//! 処理机での紙の消費と金のスポーン

use crate::assets::GameAssets;
use crate::constants::*;
use crate::systems::pool::{MoneyPool, Paper, PaperPool};
use crate::systems::transfer::TransferAnimation;
use bevy::prelude::*;

/// 処理机の動作設定
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub process_secs: f32,
    pub lerp_secs: f32,
    pub money_step: f32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            process_secs: PROCESS_SECS,
            lerp_secs: MONEY_LERP_SECS,
            money_step: MONEY_HEIGHT_STEP,
        }
    }
}

/// 机上の紙を一定間隔で消費し、対になる金をスポーンする処理机
/// `active` は単一飛行のラッチで、机が空になると自動停止する
#[derive(Component)]
pub struct PaperProcessor {
    pub config: ProcessorConfig,
    pub spawn_points: Vec<Entity>,
    pub current_spawn: usize,
    pub timer: Timer,
    pub active: bool,
}

impl PaperProcessor {
    pub fn new(config: ProcessorConfig, spawn_points: Vec<Entity>) -> Self {
        let timer = Timer::from_seconds(config.process_secs, TimerMode::Repeating);
        Self {
            config,
            spawn_points,
            current_spawn: 0,
            timer,
            active: false,
        }
    }
}

/// 金の置き場
/// 占有数は着地済みと飛行中の両方を数える
#[derive(Component, Default)]
pub struct MoneySpawnPoint {
    pub occupancy: u32,
}

/// 処理ループ
/// 発火ごとに先頭の紙をプールへ返し、次の置き場へ金の搬送を始める
pub fn process_papers_system(
    time: Res<Time>,
    mut commands: Commands,
    assets: Res<GameAssets>,
    mut paper_pool: ResMut<PaperPool>,
    mut money_pool: ResMut<MoneyPool>,
    mut q_processors: Query<(Entity, &mut PaperProcessor)>,
    q_children: Query<&Children>,
    q_transforms: Query<&Transform>,
    mut q_pads: Query<&mut MoneySpawnPoint>,
    q_papers: Query<&Transform, With<Paper>>,
) {
    for (desk_entity, mut processor) in q_processors.iter_mut() {
        let papers: Vec<Entity> = q_children
            .get(desk_entity)
            .map(|children| {
                children
                    .iter()
                    .filter(|child| q_papers.contains(*child))
                    .collect()
            })
            .unwrap_or_default();

        if processor.active && papers.is_empty() {
            processor.active = false;
            info!("PROCESS: desk {:?} empty, stopping", desk_entity);
            continue;
        }
        if !processor.active {
            if papers.is_empty() {
                continue;
            }
            processor.active = true;
            processor.timer.reset();
            info!(
                "PROCESS: desk {:?} starting ({} papers)",
                desk_entity,
                papers.len()
            );
        }

        processor.timer.tick(time.delta());
        if !processor.timer.just_finished() {
            continue;
        }

        let Some(&paper) = papers.first() else {
            continue;
        };
        let Ok(desk_tf) = q_transforms.get(desk_entity) else {
            continue;
        };
        let paper_world = desk_tf.translation.truncate()
            + q_papers
                .get(paper)
                .map(|tf| tf.translation.truncate())
                .unwrap_or_default();
        paper_pool.0.release(&mut commands, paper);

        if processor.spawn_points.is_empty() {
            continue;
        }
        let pad_entity = processor.spawn_points[processor.current_spawn];
        let (Ok(pad_tf), Ok(mut pad)) =
            (q_transforms.get(pad_entity), q_pads.get_mut(pad_entity))
        else {
            warn!("PROCESS: spawn point {:?} is gone", pad_entity);
            continue;
        };

        let money = money_pool.0.acquire(&mut commands, &assets);
        let start_rot = Quat::from_rotation_z(MONEY_SPAWN_ANGLE);
        let end_pos = pad_tf.translation.truncate()
            + Vec2::new(0.0, pad.occupancy as f32 * processor.config.money_step);
        commands.entity(money).insert((
            Transform {
                translation: paper_world.extend(Z_FLYING),
                rotation: start_rot,
                ..default()
            },
            TransferAnimation::new(
                paper_world,
                end_pos,
                start_rot,
                pad_tf.rotation,
                processor.config.lerp_secs,
                pad_entity,
                processor.config.money_step,
            ),
        ));
        pad.occupancy += 1;
        info!(
            "PROCESS: paper {:?} -> money {:?} at pad {:?}",
            paper, money, pad_entity
        );
        processor.current_spawn = (processor.current_spawn + 1) % processor.spawn_points.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PapersCollected;
    use crate::systems::collector::{
        collect_papers_system, desk_scan_system, CollectorConfig, PaperCollector,
    };
    use crate::systems::money::{
        collect_money_system, money_scan_system, MoneyCollector, MoneyCollectorConfig,
    };
    use crate::systems::pool::{ItemKind, ItemPool, Money};
    use crate::systems::setter::{set_papers_system, PaperSetter, SetterConfig};
    use crate::systems::transfer::advance_transfers_system;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn tick(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    fn processor_app() -> (App, Entity, Vec<Entity>) {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.insert_resource(GameAssets::placeholder());
        app.insert_resource(PaperPool(ItemPool::new(ItemKind::Paper)));
        app.insert_resource(MoneyPool(ItemPool::new(ItemKind::Money)));
        app.add_systems(
            Update,
            (process_papers_system, advance_transfers_system).chain(),
        );

        let pads = vec![
            app.world_mut()
                .spawn((Transform::from_xyz(60.0, 30.0, Z_PAD), MoneySpawnPoint::default()))
                .id(),
            app.world_mut()
                .spawn((Transform::from_xyz(60.0, -30.0, Z_PAD), MoneySpawnPoint::default()))
                .id(),
        ];
        let desk = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 0.0, Z_DESK),
                PaperProcessor::new(ProcessorConfig::default(), pads.clone()),
            ))
            .id();
        (app, desk, pads)
    }

    fn seed_papers(app: &mut App, desk: Entity, count: usize) -> Vec<Entity> {
        (0..count)
            .map(|index| {
                let paper = app
                    .world_mut()
                    .spawn((
                        Paper,
                        Transform::from_xyz(0.0, index as f32 * STACK_STEP, Z_ITEM),
                    ))
                    .id();
                app.world_mut().entity_mut(paper).insert(ChildOf(desk));
                paper
            })
            .collect()
    }

    #[test]
    fn consumes_papers_and_spawns_money_round_robin() {
        let (mut app, desk, pads) = processor_app();
        seed_papers(&mut app, desk, 2);

        // 起動フレーム + 処理2回 + 自動停止
        tick(&mut app, 0.1);
        tick(&mut app, 1.0);
        tick(&mut app, 1.0);
        tick(&mut app, 0.1);

        let paper_pool = &app.world().resource::<PaperPool>().0;
        assert_eq!(paper_pool.idle_count(), 2);
        assert_eq!(app.world().resource::<MoneyPool>().0.total_spawned(), 2);
        for pad in &pads {
            assert_eq!(app.world().get::<MoneySpawnPoint>(*pad).unwrap().occupancy, 1);
        }

        let processor = app.world().get::<PaperProcessor>(desk).unwrap();
        assert_eq!(processor.current_spawn, 0);
        assert!(!processor.active);
    }

    #[test]
    fn restarts_when_new_papers_arrive() {
        let (mut app, desk, pads) = processor_app();
        seed_papers(&mut app, desk, 1);

        tick(&mut app, 0.1);
        tick(&mut app, 1.0);
        tick(&mut app, 0.1);
        assert!(!app.world().get::<PaperProcessor>(desk).unwrap().active);

        seed_papers(&mut app, desk, 1);
        tick(&mut app, 0.1);
        assert!(app.world().get::<PaperProcessor>(desk).unwrap().active);
        tick(&mut app, 1.0);
        assert_eq!(
            app.world().get::<MoneySpawnPoint>(pads[1]).unwrap().occupancy,
            1
        );
    }

    /// 印刷パイプラインを一周した紙が元の状態でプールへ戻る
    #[test]
    fn paper_round_trip_returns_to_pool() {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.insert_resource(GameAssets::placeholder());
        app.insert_resource(PaperPool(ItemPool::new(ItemKind::Paper)));
        app.insert_resource(MoneyPool(ItemPool::new(ItemKind::Money)));
        app.add_message::<PapersCollected>();
        app.add_systems(
            Update,
            (
                desk_scan_system,
                collect_papers_system,
                set_papers_system,
                process_papers_system,
                money_scan_system,
                collect_money_system,
                advance_transfers_system,
            )
                .chain(),
        );

        let desk = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, Z_DESK)).id();
        let pad = app
            .world_mut()
            .spawn((Transform::from_xyz(60.0, 30.0, Z_PAD), MoneySpawnPoint::default()))
            .id();
        let dest = app
            .world_mut()
            .spawn((
                Transform::from_xyz(60.0, 0.0, Z_DESK),
                PaperProcessor::new(ProcessorConfig::default(), vec![pad]),
            ))
            .id();
        let player = app
            .world_mut()
            .spawn(Transform::from_xyz(30.0, 0.0, Z_CHARACTER))
            .id();
        let anchor = app.world_mut().spawn(Transform::default()).id();
        app.world_mut().entity_mut(anchor).insert(ChildOf(player));
        app.world_mut().entity_mut(player).insert((
            PaperCollector::new(CollectorConfig::default(), vec![desk], anchor),
            PaperSetter::new(SetterConfig::default(), dest, anchor),
            MoneyCollector::new(MoneyCollectorConfig::default()),
        ));

        // 印刷済みの紙1枚を机に用意する
        let paper = app
            .world_mut()
            .run_system_once(
                |mut commands: Commands, mut pool: ResMut<PaperPool>, assets: Res<GameAssets>| {
                    pool.0.acquire(&mut commands, &assets)
                },
            )
            .unwrap();
        app.world_mut()
            .entity_mut(paper)
            .insert((Transform::from_xyz(0.0, 0.0, Z_ITEM), ChildOf(desk)));

        for _ in 0..200 {
            tick(&mut app, 0.05);
        }

        // 紙は取得時と同じ状態でプールに戻っている
        let paper_pool = &app.world().resource::<PaperPool>().0;
        assert_eq!(paper_pool.total_spawned(), 1);
        assert!(paper_pool.is_queued(paper));
        assert_eq!(
            *app.world().get::<Visibility>(paper).unwrap(),
            Visibility::Hidden
        );
        assert!(app.world().get::<ChildOf>(paper).is_none());

        // 対になる金も回収されてプールへ戻った
        let money_pool = &app.world().resource::<MoneyPool>().0;
        assert_eq!(money_pool.total_spawned(), 1);
        assert_eq!(money_pool.idle_count(), 1);
        assert_eq!(app.world().get::<MoneySpawnPoint>(pad).unwrap().occupancy, 0);
        let mut q_money = app.world_mut().query_filtered::<&Visibility, With<Money>>();
        assert!(q_money
            .iter(app.world())
            .all(|visibility| *visibility == Visibility::Hidden));

        let mut q_collector = app.world_mut().query::<(&PaperCollector, &MoneyCollector)>();
        let (collector, money_collector) = q_collector.single(app.world()).unwrap();
        assert_eq!(collector.collected_total, 1);
        assert_eq!(money_collector.earned, 1);
        assert!(!app.world().get::<PaperProcessor>(dest).unwrap().active);
    }
}
