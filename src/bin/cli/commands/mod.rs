pub mod add;
pub mod due;
pub mod enhance;
pub mod review;
pub mod show;
pub mod stats;
