pub mod args;
pub mod ne;

pub use args::{parse_args, Command, Invocation};
pub use ne::{NeFile, ResourceVisitor};
pub use ne::error::{ErrorKind, NeError};
pub use ne::extract::{extract_resource, DumpOptions, Dumper, FileNaming};
pub use ne::header::{NeHeader, TableLayout};
pub use ne::table::{ResourceBlock, ResourceEntry, ResourceKind, ResourceName, ResourceTable, TypeBlock, TypeEntry};
