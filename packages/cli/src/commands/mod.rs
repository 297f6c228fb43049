pub mod apply;
pub mod init;
pub mod node;
pub mod show;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use node::{node, NodeArgs};
pub use show::{show, ShowArgs};
pub use validate::{validate, ValidateArgs};
