use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts, asked for a fresh one every time a board is built.
pub trait LayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> MineLayout;
}

/// A fixed layout regenerates itself, the requested config is ignored.
impl LayoutGenerator for MineLayout {
    fn generate(&mut self, config: GameConfig) -> MineLayout {
        if config != self.game_config() {
            log::warn!(
                "Fixed layout ignores requested config {:?}, keeping {:?}",
                config,
                self.game_config()
            );
        }
        self.clone()
    }
}
