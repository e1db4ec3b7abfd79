pub mod app;
pub mod assets;
pub mod braille;
pub mod classify;
pub mod coast;
pub mod data;
pub mod hash;
pub mod map;
pub mod ui;
