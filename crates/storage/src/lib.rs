pub mod error;
pub mod session;
pub mod traits;

pub use error::StorageError;
pub use session::SessionStore;
pub use traits::*;
