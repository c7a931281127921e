mod modifiers;
mod scalars;
mod type_id;

pub use modifiers::*;
pub use scalars::*;
pub use type_id::*;
