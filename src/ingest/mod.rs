pub mod loader;
pub mod record;

pub use loader::{decode_bytes, decode_records, RecordLoader, SourceLocation};
pub use record::{RowRecord, ID_COLUMN};
