pub mod alert;
pub mod repository;
pub mod severity;
pub mod summary;
pub mod ticket;
