pub mod health;
pub mod preferences;
pub mod recent;
pub mod saved;
pub mod search;
pub mod shell;
