pub mod error;
pub mod forest;
pub mod id_generator;
pub mod node;
pub mod path;
pub mod visitor;
pub mod wire;

pub use error::*;
pub use forest::*;
pub use id_generator::*;
pub use node::*;
pub use path::*;
pub use visitor::*;
pub use wire::*;
