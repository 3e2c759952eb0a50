pub mod display;
pub mod steno;
