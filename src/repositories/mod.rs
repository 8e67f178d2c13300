//! Repositories
//!
//! Acceso a datos del servicio de persistencia de referencia.

pub mod my_list_repository;

pub use my_list_repository::MyListRepository;
