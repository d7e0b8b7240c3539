use std::fmt;
use std::str::FromStr;

/// A position in a MySQL server's binary log.
///
/// The derived ordering compares `log_file` lexicographically before
/// `log_position` numerically, which matches how the server names rotated
/// binlog files (`mysql-bin.000001`, `mysql-bin.000002`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BinlogCursor {
  pub log_file: String,
  pub log_position: u32,
}

impl BinlogCursor {
  pub fn new(log_file: impl Into<String>, log_position: u32) -> Self {
    Self {
      log_file: log_file.into(),
      log_position,
    }
  }

  /// True when `other` has progressed at least up to this position.
  pub fn reached_by(&self, other: &BinlogCursor) -> bool {
    other >= self
  }
}

impl fmt::Display for BinlogCursor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.log_file, self.log_position)
  }
}

impl FromStr for BinlogCursor {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (log_file, log_position) = s
      .split_once('/')
      .ok_or_else(|| "Failed to parse binlog cursor. Expected format is <prefix>.<file>/<position>".to_string())?;
    let log_file = log_file.to_string();
    let log_position = log_position
      .parse()
      .map_err(|_| "Failed to parse binlog cursor position. Expected format is u32.".to_string())?;
    Ok(Self { log_file, log_position })
  }
}
