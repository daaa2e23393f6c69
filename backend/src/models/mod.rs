pub mod breakdown;
pub mod evaluation;
pub mod macros;
pub mod time;

pub use breakdown::*;
pub use evaluation::*;
pub use time::*;
