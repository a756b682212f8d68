// Core utilities shared by the engine and game modules

pub mod math;
