mod entry;
pub mod extract;
pub mod rpc;

pub use entry::{API_PREFIX, app, router};
pub use extract::RpcInput;
