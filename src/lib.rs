//! Binlog-driven change propagation for online MySQL data migrations:
//! translates row events into idempotent DML for the target, and waits for a
//! replica to catch up to a marked master position at cutover.

pub mod dml;
pub mod replica_wait;
pub mod retry;

pub use dml::{delete_events, from_rows_event, insert_events, update_events, DmlError, DmlEvent};
pub use replica_wait::{
  master_binlog_cursor, MasterPositionViaCustomQuery, ReplicaCatchUp, ReplicatedMasterPositionFetcher, WaitError,
};
pub use retry::with_retries;

pub use binlog;
pub use mysql_async;
