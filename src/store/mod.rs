//! Player record storage.
//!
//! The durable store is an external collaborator. `PlayerStore` is the
//! contract the engine consumes; `MemoryStore` is an in-process
//! implementation used by tests and local runs.

mod error;
mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use traits::PlayerStore;
