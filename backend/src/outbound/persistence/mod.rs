//! Diesel/PostgreSQL adapters implementing the repository ports.

mod diesel_analysis_repository;
mod diesel_journal_repository;
mod diesel_knowledge_repository;
mod diesel_subscription_repository;
mod diesel_user_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_analysis_repository::DieselAnalysisRepository;
pub use diesel_journal_repository::DieselJournalRepository;
pub use diesel_knowledge_repository::DieselKnowledgeRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
