pub mod check;
pub mod edit;
pub mod init;
pub mod tree;

pub use check::{check, CheckArgs};
pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use tree::{tree, TreeArgs};
