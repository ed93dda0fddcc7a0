pub mod backend;
pub mod blocking;
pub mod request_trait;

pub use backend::*;
pub use request_trait::*;
