//! Shared utility modules.

pub mod html;
pub mod mime;
