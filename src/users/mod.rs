//! User domain services: fake-user generation, conflict-safe persistence,
//! and batch import with deduplication.

pub mod batch;
pub mod generator;
pub mod repository;

pub use batch::BatchImporter;
pub use generator::UserGenerator;
pub use repository::UserRepository;
