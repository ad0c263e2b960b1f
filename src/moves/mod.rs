pub mod attacks;
pub mod buffer;
pub mod movegen;

pub use attacks::{is_attacked, is_in_check};
pub use buffer::MoveBuffer;
pub use movegen::generate_legal;
