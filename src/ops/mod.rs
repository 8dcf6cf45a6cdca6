pub mod edit;
pub mod script;
pub mod seed;
pub mod store;

pub use edit::{EditController, ItemEditState};
pub use store::{ItemStore, StoreError};
