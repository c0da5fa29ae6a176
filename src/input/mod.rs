//! Translation input loading
pub mod translation;
