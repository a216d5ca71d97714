pub mod memory;
pub mod models;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::InMemoryMenuStore;
pub use models::*;
pub use pool::DbPool;
pub use postgres::PgMenuStore;
pub use store::MenuStore;
