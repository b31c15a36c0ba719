//! Pictogram descriptor domain model.

pub mod model;

pub use model::PictogramDescriptor;
