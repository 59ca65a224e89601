pub mod collision;
pub mod deformation;
pub mod input;
pub mod movement;
pub mod scoring;

pub use collision::*;
pub use deformation::*;
pub use input::*;
pub use movement::*;
pub use scoring::*;
