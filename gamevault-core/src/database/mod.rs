pub mod infrastructure;
pub mod ports;
pub mod postgres;

pub use infrastructure::memory::InMemoryGameRepository;
pub use infrastructure::postgres::repositories::games::PostgresGameRepository;
pub use ports::games::GameRepository;
pub use postgres::PostgresDatabase;
