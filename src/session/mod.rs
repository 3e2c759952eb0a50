pub mod refresh;
pub mod result;
pub mod scorer;
