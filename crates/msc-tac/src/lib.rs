//! msc-tac - three-address-code generation (§4.5).

mod generator;
mod instruction;

pub use generator::TacGenerator;
pub use instruction::{render_listing, Instruction};
