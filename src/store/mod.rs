//! In-memory package translation store
mod package_store;
mod types;

pub use package_store::PackageStore;
pub use types::{
    LoadError,
    RegistrationError,
    RegistrationReport,
};
