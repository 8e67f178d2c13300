//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y formateo de métricas de ruta.

pub mod errors;
pub mod format;
pub mod validation;

pub use errors::{AppError, AppResult, SyncIntent};
