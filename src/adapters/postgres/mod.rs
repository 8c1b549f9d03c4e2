//! PostgreSQL adapters.

mod answer_repository;
mod user_repository;

pub use answer_repository::PostgresAnswerRepository;
pub use user_repository::PostgresUserRepository;
