//! Parcel persistence adapters.

mod in_memory_parcel_repository;

pub use in_memory_parcel_repository::InMemoryParcelRepository;
