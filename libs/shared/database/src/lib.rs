pub mod error;
pub mod records;
pub mod store;

pub use error::StoreError;
pub use records::*;
pub use store::ClinicStore;
