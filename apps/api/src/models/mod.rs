pub mod candidate;
pub mod events;
pub mod score;
