//! スタートアップ関連のプラグイン

mod asset_catalog;

use crate::assets::GameAssets;
use crate::constants::*;
use crate::entities::camera::{FollowCamera, MainCamera};
use crate::entities::player::{AnimationState, CarryAnchor, MovementConfig, Player};
use crate::systems::collector::{CollectorConfig, PaperCollector};
use crate::systems::money::{MoneyCollector, MoneyCollectorConfig};
use crate::systems::pool::{ItemKind, ItemPool, MoneyPool, PaperPool};
use crate::systems::printer::{Printer, PrinterConfig};
use crate::systems::processor::{MoneySpawnPoint, PaperProcessor, ProcessorConfig};
use crate::systems::setter::{PaperSetter, SetterConfig};
use crate::world::map::{OfficeMap, Tile};
use asset_catalog::create_game_assets;
use bevy::prelude::*;

pub struct StartupPlugin;

impl Plugin for StartupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OfficeMap>()
            .add_systems(Startup, setup_office);
    }
}

/// オフィスシーンの構築
/// 床・壁・机・プリンタ・処理机・置き場・プレイヤー・カメラ・プールを
/// 1回で生成し、通行不可セルをマップへ刻む
fn setup_office(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut office_map: ResMut<OfficeMap>,
) {
    let assets = create_game_assets(&mut images);

    spawn_floor_and_walls(&mut commands, &assets, &mut office_map);

    // 印刷机（プリンタのスロット兼回収対象）
    let desks: Vec<Entity> = PRINT_DESK_GRIDS
        .iter()
        .map(|(gx, gy)| {
            office_map.set_blocked(*gx, *gy, true);
            commands
                .spawn((
                    Sprite {
                        image: assets.desk.clone(),
                        custom_size: Some(DESK_SIZE),
                        ..default()
                    },
                    Transform::from_translation(
                        OfficeMap::grid_to_world(*gx, *gy).extend(Z_DESK),
                    ),
                    Name::new("PaperDesk"),
                ))
                .id()
        })
        .collect();

    // プリンタ
    let (printer_x, printer_y) = PRINTER_GRID;
    office_map.set_blocked(printer_x, printer_y, true);
    commands.spawn((
        Sprite {
            image: assets.printer.clone(),
            custom_size: Some(PRINTER_SIZE),
            ..default()
        },
        Transform::from_translation(
            OfficeMap::grid_to_world(printer_x, printer_y).extend(Z_DESK),
        ),
        Printer::new(PrinterConfig::default(), desks.clone()),
        Name::new("Printer"),
    ));

    // 金の置き場
    let pads: Vec<Entity> = MONEY_PAD_GRIDS
        .iter()
        .map(|(gx, gy)| {
            commands
                .spawn((
                    Sprite {
                        image: assets.money_pad.clone(),
                        custom_size: Some(PAD_SIZE),
                        ..default()
                    },
                    Transform::from_translation(
                        OfficeMap::grid_to_world(*gx, *gy).extend(Z_PAD),
                    ),
                    MoneySpawnPoint::default(),
                    Name::new("MoneyPad"),
                ))
                .id()
        })
        .collect();

    // 処理机
    let (dest_x, dest_y) = DEST_DESK_GRID;
    office_map.set_blocked(dest_x, dest_y, true);
    let dest_desk = commands
        .spawn((
            Sprite {
                image: assets.dest_desk.clone(),
                custom_size: Some(DESK_SIZE),
                ..default()
            },
            Transform::from_translation(OfficeMap::grid_to_world(dest_x, dest_y).extend(Z_DESK)),
            PaperProcessor::new(ProcessorConfig::default(), pads),
            Name::new("ProcessingDesk"),
        ))
        .id();

    // プレイヤーと手元スタック
    let player_pos = OfficeMap::grid_to_world(PLAYER_GRID.0, PLAYER_GRID.1);
    let player = commands
        .spawn((
            Sprite {
                image: assets.player.clone(),
                custom_size: Some(PLAYER_SIZE),
                ..default()
            },
            Transform::from_translation(player_pos.extend(Z_CHARACTER)),
            Player {
                config: MovementConfig::default(),
            },
            AnimationState {
                is_moving: false,
                facing_right: true,
            },
            Name::new("Player"),
        ))
        .id();
    let carry_anchor = commands
        .spawn((
            CarryAnchor,
            Transform::from_translation(CARRY_BASE_OFFSET.extend(0.5)),
            Visibility::default(),
            Name::new("CarryAnchor"),
        ))
        .id();
    commands.entity(carry_anchor).insert(ChildOf(player));
    commands.entity(player).insert((
        PaperCollector::new(CollectorConfig::default(), desks, carry_anchor),
        PaperSetter::new(SetterConfig::default(), dest_desk, carry_anchor),
        MoneyCollector::new(MoneyCollectorConfig::default()),
    ));

    // 追従カメラ
    commands.spawn((
        Camera2d,
        MainCamera,
        FollowCamera {
            offset: CAMERA_OFFSET,
            smooth: CAMERA_SMOOTH,
        },
        Transform::from_translation((player_pos + CAMERA_OFFSET).extend(0.0)),
    ));

    // プール（事前生成）
    let mut paper_pool = ItemPool::new(ItemKind::Paper);
    paper_pool.prefill(&mut commands, &assets, POOL_PREFILL);
    let mut money_pool = ItemPool::new(ItemKind::Money);
    money_pool.prefill(&mut commands, &assets, POOL_PREFILL);
    commands.insert_resource(PaperPool(paper_pool));
    commands.insert_resource(MoneyPool(money_pool));

    commands.insert_resource(assets);
    info!("STARTUP: office ready");
}

fn spawn_floor_and_walls(
    commands: &mut Commands,
    assets: &GameAssets,
    office_map: &mut OfficeMap,
) {
    for y in 0..MAP_HEIGHT {
        for x in 0..MAP_WIDTH {
            let pos = OfficeMap::grid_to_world(x, y);
            let border = x == 0 || y == 0 || x == MAP_WIDTH - 1 || y == MAP_HEIGHT - 1;
            let partition = x == PARTITION_X && (PARTITION_Y.0..=PARTITION_Y.1).contains(&y);
            if border || partition {
                office_map.set_blocked(x, y, true);
                commands.spawn((
                    Sprite {
                        image: assets.wall.clone(),
                        custom_size: Some(WALL_SIZE),
                        ..default()
                    },
                    Transform::from_translation(pos.extend(Z_WALL)),
                    Name::new("Wall"),
                ));
            } else {
                commands.spawn((
                    Tile,
                    Sprite {
                        image: assets.floor.clone(),
                        custom_size: Some(FLOOR_SIZE),
                        ..default()
                    },
                    Transform::from_translation(pos.extend(Z_FLOOR)),
                    Name::new("Floor"),
                ));
            }
        }
    }
}
