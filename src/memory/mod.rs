mod bounded;
mod exp;

pub use bounded::BoundedMemory;
pub use exp::Exp;
