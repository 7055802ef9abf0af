pub mod chat;
pub mod fruits;
pub mod health;
