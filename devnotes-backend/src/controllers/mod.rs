pub mod health;
pub mod metadata;
pub mod notes;
pub mod proxy;
