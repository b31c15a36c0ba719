//! Domain core for the pictoboard session: pictogram and menu models, the
//! drag-transfer protocol, long-press detection, view navigation, and the
//! storage/collaborator traits the infrastructure crate implements.

pub mod error;
pub mod gesture;
pub mod menu;
pub mod navigation;
pub mod pictogram;
pub mod recognition;
pub mod storage;
pub mod transfer;

// Re-export common types
pub use error::{PictoError, Result};
pub use menu::{MenuEntry, MenuId, MenuManager};
pub use navigation::{Navigator, SessionView};
pub use pictogram::PictogramDescriptor;
pub use recognition::{QueryStatus, RecognitionClient};
pub use storage::KeyValueStore;
