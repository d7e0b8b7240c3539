/// A column as known to the schema cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
  pub name: String,
  pub is_unsigned: bool,
}

impl ColumnSchema {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      is_unsigned: false,
    }
  }

  pub fn unsigned(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      is_unsigned: true,
    }
  }
}

/// The authoritative definition of a table at translation time: identity,
/// ordered columns, and the indices of the primary-key columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
  pub schema: String,
  pub table: String,
  pub columns: Vec<ColumnSchema>,
  pub pk_columns: Vec<usize>,
}

impl TableSchema {
  pub fn new(
    schema: impl Into<String>,
    table: impl Into<String>,
    columns: Vec<ColumnSchema>,
    pk_columns: Vec<usize>,
  ) -> Self {
    Self {
      schema: schema.into(),
      table: table.into(),
      columns,
      pk_columns,
    }
  }
}
