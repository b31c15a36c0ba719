//! Recognition webhook collaborator.

pub mod client;
pub mod dto;

pub use client::WebhookClient;
