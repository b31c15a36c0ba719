//! Menu collection domain models and manager.

pub mod manager;
pub mod model;

pub use manager::MenuManager;
pub use model::{DEFAULT_MENU_TITLE, MenuCollection, MenuEntry, MenuId, MenuIdGenerator};
