pub mod flight;
pub mod incident;
pub mod macros;
pub mod network;

pub use flight::*;
pub use incident::*;
pub use network::*;
