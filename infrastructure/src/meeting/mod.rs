//! Meeting storage adapters

mod file_repository;

pub use file_repository::FileMeetingRepository;
