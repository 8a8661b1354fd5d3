//! Look composition: project the current selection into an ordered image list.

pub mod resolve;

pub use resolve::{DEFAULT_HEAD_ASSET, MAX_LOOK_IMAGES, resolve_look_images};
