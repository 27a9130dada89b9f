//! プラグインモジュールのエントリポイント

pub mod input;
pub mod logic;
pub mod startup;
pub mod visual;

pub use input::InputPlugin;
pub use logic::LogicPlugin;
pub use startup::StartupPlugin;
pub use visual::VisualPlugin;
