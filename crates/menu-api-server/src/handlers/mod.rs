pub mod health;
pub mod images;
pub mod menus;
pub mod translate;
