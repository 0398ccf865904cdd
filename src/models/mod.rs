pub mod qr;
pub mod state;

pub use qr::*;
pub use state::*;
