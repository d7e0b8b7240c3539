use crate::row::Row;

// https://dev.mysql.com/doc/dev/mysql-server/latest/namespacemysql_1_1binlog_1_1event.html
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BinlogEventType {
  UNKNOWN_EVENT = 0,
  START_EVENT_V3 = 1,
  QUERY_EVENT = 2,
  STOP_EVENT = 3,
  ROTATE_EVENT = 4,
  INTVAR_EVENT = 5,
  LOAD_EVENT = 6,
  SLAVE_EVENT = 7,
  CREATE_FILE_EVENT = 8,
  APPEND_BLOCK_EVENT = 9,
  EXEC_LOAD_EVENT = 10,
  DELETE_FILE_EVENT = 11,
  NEW_LOAD_EVENT = 12,
  RAND_EVENT = 13,
  USER_VAR_EVENT = 14,
  FORMAT_DESCRIPTION_EVENT = 15,
  XID_EVENT = 16,
  BEGIN_LOAD_QUERY_EVENT = 17,
  EXECUTE_LOAD_QUERY_EVENT = 18,
  TABLE_MAP_EVENT = 19,
  WRITE_ROWS_EVENTV0 = 20,
  UPDATE_ROWS_EVENTV0 = 21,
  DELETE_ROWS_EVENTV0 = 22,
  WRITE_ROWS_EVENTV1 = 23,
  UPDATE_ROWS_EVENTV1 = 24,
  DELETE_ROWS_EVENTV1 = 25,
  INCIDENT_EVENT = 26,
  HEARTBEAT_LOG_EVENT = 27,
  IGNORABLE_LOG_EVENT = 28,
  ROWS_QUERY_LOG_EVENT = 29,
  WRITE_ROWS_EVENTV2 = 30,
  UPDATE_ROWS_EVENTV2 = 31,
  DELETE_ROWS_EVENTV2 = 32,
  GTID_EVENT = 33,
  ANONYMOUS_GTID_EVENT = 34,
  PREVIOUS_GTIDS_EVENT = 35,
  TRANSACTION_CONTEXT_EVENT = 36,
  VIEW_CHANGE_EVENT = 37,
  XA_PREPARE_LOG_EVENT = 38,
  PARTIAL_UPDATE_ROWS_EVENT = 39,
  TRANSACTION_PAYLOAD_EVENT = 40,
  HEARTBEAT_LOG_EVENT_V2 = 41,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown binlog event type {0}")]
pub struct UnknownEventType(pub u8);

impl TryFrom<u8> for BinlogEventType {
  type Error = UnknownEventType;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    use BinlogEventType::*;
    match value {
      0 => Ok(UNKNOWN_EVENT),
      1 => Ok(START_EVENT_V3),
      2 => Ok(QUERY_EVENT),
      3 => Ok(STOP_EVENT),
      4 => Ok(ROTATE_EVENT),
      5 => Ok(INTVAR_EVENT),
      6 => Ok(LOAD_EVENT),
      7 => Ok(SLAVE_EVENT),
      8 => Ok(CREATE_FILE_EVENT),
      9 => Ok(APPEND_BLOCK_EVENT),
      10 => Ok(EXEC_LOAD_EVENT),
      11 => Ok(DELETE_FILE_EVENT),
      12 => Ok(NEW_LOAD_EVENT),
      13 => Ok(RAND_EVENT),
      14 => Ok(USER_VAR_EVENT),
      15 => Ok(FORMAT_DESCRIPTION_EVENT),
      16 => Ok(XID_EVENT),
      17 => Ok(BEGIN_LOAD_QUERY_EVENT),
      18 => Ok(EXECUTE_LOAD_QUERY_EVENT),
      19 => Ok(TABLE_MAP_EVENT),
      20 => Ok(WRITE_ROWS_EVENTV0),
      21 => Ok(UPDATE_ROWS_EVENTV0),
      22 => Ok(DELETE_ROWS_EVENTV0),
      23 => Ok(WRITE_ROWS_EVENTV1),
      24 => Ok(UPDATE_ROWS_EVENTV1),
      25 => Ok(DELETE_ROWS_EVENTV1),
      26 => Ok(INCIDENT_EVENT),
      27 => Ok(HEARTBEAT_LOG_EVENT),
      28 => Ok(IGNORABLE_LOG_EVENT),
      29 => Ok(ROWS_QUERY_LOG_EVENT),
      30 => Ok(WRITE_ROWS_EVENTV2),
      31 => Ok(UPDATE_ROWS_EVENTV2),
      32 => Ok(DELETE_ROWS_EVENTV2),
      33 => Ok(GTID_EVENT),
      34 => Ok(ANONYMOUS_GTID_EVENT),
      35 => Ok(PREVIOUS_GTIDS_EVENT),
      36 => Ok(TRANSACTION_CONTEXT_EVENT),
      37 => Ok(VIEW_CHANGE_EVENT),
      38 => Ok(XA_PREPARE_LOG_EVENT),
      39 => Ok(PARTIAL_UPDATE_ROWS_EVENT),
      40 => Ok(TRANSACTION_PAYLOAD_EVENT),
      41 => Ok(HEARTBEAT_LOG_EVENT_V2),
      unknown => Err(UnknownEventType(unknown)),
    }
  }
}

impl BinlogEventType {
  pub fn is_write_rows(self) -> bool {
    matches!(self, BinlogEventType::WRITE_ROWS_EVENTV1 | BinlogEventType::WRITE_ROWS_EVENTV2)
  }

  pub fn is_update_rows(self) -> bool {
    matches!(self, BinlogEventType::UPDATE_ROWS_EVENTV1 | BinlogEventType::UPDATE_ROWS_EVENTV2)
  }

  pub fn is_delete_rows(self) -> bool {
    matches!(self, BinlogEventType::DELETE_ROWS_EVENTV1 | BinlogEventType::DELETE_ROWS_EVENTV2)
  }

  pub fn is_rows_event(self) -> bool {
    self.is_write_rows() || self.is_update_rows() || self.is_delete_rows()
  }
}

/// Header fields of a rows event, as reported by the binlog stream.
#[derive(Debug, Clone)]
pub struct RowsEventHeader {
  pub event_type: BinlogEventType,
  pub timestamp: u32,
  pub server_id: u32,
  pub log_position: u32,
  pub flags: u16,
}

impl RowsEventHeader {
  pub fn new(event_type: BinlogEventType) -> Self {
    Self {
      event_type,
      timestamp: 0,
      server_id: 0,
      log_position: 0,
      flags: 0,
    }
  }
}

/// A decoded rows event: the header tag plus one cell row per row image.
///
/// Insert and delete events carry one row per affected record. Update events
/// carry two per record, in strict `(before, after)` pair order.
#[derive(Debug, Clone)]
pub struct RowsEvent {
  pub header: RowsEventHeader,
  pub rows: Vec<Row>,
}

impl RowsEvent {
  pub fn new(event_type: BinlogEventType, rows: Vec<Row>) -> Self {
    Self {
      header: RowsEventHeader::new(event_type),
      rows,
    }
  }
}

#[cfg(test)]
mod test {
  use super::{BinlogEventType, UnknownEventType};

  #[test]
  fn maps_rows_event_tags_to_wire_values() {
    assert_eq!(BinlogEventType::WRITE_ROWS_EVENTV1, 23.try_into().unwrap());
    assert_eq!(BinlogEventType::UPDATE_ROWS_EVENTV1, 24.try_into().unwrap());
    assert_eq!(BinlogEventType::DELETE_ROWS_EVENTV1, 25.try_into().unwrap());
    assert_eq!(BinlogEventType::WRITE_ROWS_EVENTV2, 30.try_into().unwrap());
    assert_eq!(BinlogEventType::UPDATE_ROWS_EVENTV2, 31.try_into().unwrap());
    assert_eq!(BinlogEventType::DELETE_ROWS_EVENTV2, 32.try_into().unwrap());
  }

  #[test]
  fn rejects_unknown_tags() {
    assert_eq!(Err(UnknownEventType(0xF3)), BinlogEventType::try_from(0xF3));
  }

  #[test]
  fn classifies_rows_events() {
    assert!(BinlogEventType::WRITE_ROWS_EVENTV1.is_write_rows());
    assert!(BinlogEventType::WRITE_ROWS_EVENTV2.is_rows_event());
    assert!(BinlogEventType::UPDATE_ROWS_EVENTV2.is_update_rows());
    assert!(BinlogEventType::DELETE_ROWS_EVENTV1.is_delete_rows());
    assert!(!BinlogEventType::TABLE_MAP_EVENT.is_rows_event());
    assert!(!BinlogEventType::WRITE_ROWS_EVENTV0.is_rows_event());
  }
}
