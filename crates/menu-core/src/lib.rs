//! Menu Core - shared domain for publishing and viewing restaurant menus

pub mod allergy;
pub mod domain;
pub mod error;
pub mod language;
pub mod render;
pub mod resolver;
pub mod settings;
pub mod transform;
pub mod ui_strings;

pub use domain::*;
pub use error::{MenuError, Result};
pub use language::{DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
