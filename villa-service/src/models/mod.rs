pub mod patch;
pub mod villa;

pub use patch::{PatchError, PatchOp, PatchOperation, VillaPatch};
pub use villa::{Villa, VillaDto};
