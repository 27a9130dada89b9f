//! ゲームロジック関連のプラグイン

use crate::entities::player::player_movement_system;
use crate::systems::GameSystemSet;
use crate::systems::collector::{collect_papers_system, desk_scan_system};
use crate::systems::money::{collect_money_system, money_scan_system};
use crate::systems::printer::{print_papers_system, reset_stack_height_system};
use crate::systems::processor::process_papers_system;
use crate::systems::setter::set_papers_system;
use crate::systems::transfer::advance_transfers_system;
use bevy::prelude::*;

pub struct LogicPlugin;

impl Plugin for LogicPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                print_papers_system,
                desk_scan_system,
                collect_papers_system,
                reset_stack_height_system,
                set_papers_system,
                process_papers_system,
                money_scan_system,
                collect_money_system,
            )
                .chain()
                .in_set(GameSystemSet::Logic),
        )
        .add_systems(
            Update,
            (player_movement_system, advance_transfers_system)
                .chain()
                .in_set(GameSystemSet::Actor),
        );
    }
}
