// Game logic: the hero and the scene that drives it

pub mod characters;
pub mod scene;
