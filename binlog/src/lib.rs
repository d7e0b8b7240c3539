mod cursor;
mod event;
mod row;
mod schema;

pub use cursor::BinlogCursor;
pub use event::{BinlogEventType, RowsEvent, RowsEventHeader, UnknownEventType};
pub use row::{CellValue, Row};
pub use schema::{ColumnSchema, TableSchema};

pub use bytes;
pub use rust_decimal;
