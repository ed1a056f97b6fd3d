//! Descriptor model
//!
//! Values handed to the core, the descriptor nodes a build pass produces,
//! resolver variant sets, builder settings and the error taxonomy.

mod descriptor;
mod error;
mod settings;
mod value;
mod variants;

pub use descriptor::*;
pub use error::*;
pub use settings::*;
pub use value::*;
pub use variants::*;
