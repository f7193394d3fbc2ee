pub mod app;
pub mod error;
pub mod geometry;
pub mod render;
pub mod shader;

pub use self::{app::*, error::*, geometry::*, render::*, shader::*};
