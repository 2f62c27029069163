//! One module per operation; each action builds one request, issues one
//! call, and shapes an `OperationResult`.

mod create;
mod select;
mod update;

pub use create::Create;
pub use select::Select;
pub use update::Update;
