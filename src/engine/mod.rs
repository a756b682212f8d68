// Engine modules: assets, timing, input, rendering

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod renderer;
