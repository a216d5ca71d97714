//! Domain entities

pub mod menu;
pub mod published;
pub mod translation;

pub use menu::*;
pub use published::*;
pub use translation::*;
