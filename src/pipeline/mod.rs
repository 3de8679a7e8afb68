pub mod assemble;
pub mod normalize;
pub mod participants;
pub mod reconcile;

pub use assemble::*;
pub use normalize::*;
pub use participants::*;
pub use reconcile::*;
