use binlog::{BinlogEventType, CellValue, Row, RowsEvent, TableSchema};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DmlError {
  #[error("table {schema}.{table} has {columns} columns but the event row has {cells} values")]
  ColumnCountMismatch {
    schema: String,
    table: String,
    columns: usize,
    cells: usize,
  },

  #[error("update event for {schema}.{table} carries an odd number of rows ({rows})")]
  UnpairedUpdateRows { schema: String, table: String, rows: usize },

  #[error("expected column {column} of {schema}.{table} to contain a non-negative primary key, got {value}")]
  NegativePrimaryKey {
    schema: String,
    table: String,
    column: usize,
    value: i64,
  },

  #[error("failed to parse primary key {value:?} in column {column} of {schema}.{table} as an unsigned integer")]
  PrimaryKeyParse {
    schema: String,
    table: String,
    column: usize,
    value: String,
  },

  #[error("column {column} of {schema}.{table} holds a {type_name} cell, which cannot be a primary key")]
  UnsupportedPrimaryKey {
    schema: String,
    table: String,
    column: usize,
    type_name: &'static str,
  },

  #[error("unrecognized rows event type: {0:?}")]
  UnrecognizedEvent(BinlogEventType),
}

/// One row change decoded from a rows event, ready to be rendered as an
/// idempotent statement against the target.
#[derive(Debug, Clone, PartialEq)]
pub struct DmlEvent {
  table: TableSchema,
  kind: DmlKind,
}

#[derive(Debug, Clone, PartialEq)]
enum DmlKind {
  Insert { new_values: Row },
  Update { old_values: Row, new_values: Row },
  Delete { old_values: Row },
}

/// Translates a rows event into one `DmlEvent` per logical row change.
///
/// Validates that every row carries exactly one cell per column, rewrites
/// signed cells of `UNSIGNED` columns into their unsigned counterparts, and
/// dispatches on the event tag. Events that are not insert/update/delete rows
/// events are rejected.
pub fn from_rows_event(table: &TableSchema, event: &RowsEvent) -> Result<Vec<DmlEvent>, DmlError> {
  for row in &event.rows {
    verify_row_width(table, row)?;
  }
  let rows = normalize_unsigned(table, &event.rows);

  let event_type = event.header.event_type;
  if event_type.is_write_rows() {
    Ok(insert_events_from_rows(table, rows))
  } else if event_type.is_update_rows() {
    update_events_from_rows(table, rows)
  } else if event_type.is_delete_rows() {
    Ok(delete_events_from_rows(table, rows))
  } else {
    Err(DmlError::UnrecognizedEvent(event_type))
  }
}

/// One insert per event row. Rows are taken as-is; `from_rows_event` is the
/// entry point that validates and normalizes first.
pub fn insert_events(table: &TableSchema, event: &RowsEvent) -> Result<Vec<DmlEvent>, DmlError> {
  Ok(insert_events_from_rows(table, event.rows.clone()))
}

/// One update per `(before, after)` row pair.
pub fn update_events(table: &TableSchema, event: &RowsEvent) -> Result<Vec<DmlEvent>, DmlError> {
  update_events_from_rows(table, event.rows.clone())
}

/// One delete per event row.
pub fn delete_events(table: &TableSchema, event: &RowsEvent) -> Result<Vec<DmlEvent>, DmlError> {
  Ok(delete_events_from_rows(table, event.rows.clone()))
}

fn insert_events_from_rows(table: &TableSchema, rows: Vec<Row>) -> Vec<DmlEvent> {
  rows
    .into_iter()
    .map(|new_values| DmlEvent {
      table: table.clone(),
      kind: DmlKind::Insert { new_values },
    })
    .collect()
}

fn update_events_from_rows(table: &TableSchema, rows: Vec<Row>) -> Result<Vec<DmlEvent>, DmlError> {
  // An update carries two rows per changed record: first the old image
  // (for WHERE), then the new image (for SET).
  if rows.len() % 2 != 0 {
    return Err(DmlError::UnpairedUpdateRows {
      schema: table.schema.clone(),
      table: table.table.clone(),
      rows: rows.len(),
    });
  }

  let mut events = Vec::with_capacity(rows.len() / 2);
  let mut rows = rows.into_iter();
  while let (Some(old_values), Some(new_values)) = (rows.next(), rows.next()) {
    events.push(DmlEvent {
      table: table.clone(),
      kind: DmlKind::Update { old_values, new_values },
    });
  }
  Ok(events)
}

fn delete_events_from_rows(table: &TableSchema, rows: Vec<Row>) -> Vec<DmlEvent> {
  rows
    .into_iter()
    .map(|old_values| DmlEvent {
      table: table.clone(),
      kind: DmlKind::Delete { old_values },
    })
    .collect()
}

fn normalize_unsigned(table: &TableSchema, rows: &[Row]) -> Vec<Row> {
  rows
    .iter()
    .map(|row| {
      row
        .iter()
        .zip(&table.columns)
        .map(|(cell, column)| {
          if column.is_unsigned {
            cell.clone().reinterpret_unsigned()
          } else {
            cell.clone()
          }
        })
        .collect()
    })
    .collect()
}

fn verify_row_width(table: &TableSchema, row: &Row) -> Result<(), DmlError> {
  if table.columns.len() != row.len() {
    return Err(DmlError::ColumnCountMismatch {
      schema: table.schema.clone(),
      table: table.table.clone(),
      columns: table.columns.len(),
      cells: row.len(),
    });
  }
  Ok(())
}

impl DmlEvent {
  pub fn database(&self) -> &str {
    &self.table.schema
  }

  pub fn table(&self) -> &str {
    &self.table.table
  }

  pub fn table_schema(&self) -> &TableSchema {
    &self.table
  }

  /// The pre-change row image. Inserts have none.
  pub fn old_values(&self) -> Option<&Row> {
    match &self.kind {
      DmlKind::Insert { .. } => None,
      DmlKind::Update { old_values, .. } | DmlKind::Delete { old_values } => Some(old_values),
    }
  }

  /// The post-change row image. Deletes have none.
  pub fn new_values(&self) -> Option<&Row> {
    match &self.kind {
      DmlKind::Insert { new_values } | DmlKind::Update { new_values, .. } => Some(new_values),
      DmlKind::Delete { .. } => None,
    }
  }

  /// The primary key of the affected row, as a `u64`: from the new image for
  /// inserts and updates, from the old image for deletes.
  pub fn primary_key(&self) -> Result<u64, DmlError> {
    let row = match &self.kind {
      DmlKind::Insert { new_values } | DmlKind::Update { new_values, .. } => new_values,
      DmlKind::Delete { old_values } => old_values,
    };
    verify_row_width(&self.table, row)?;
    let column = self.table.pk_columns[0];
    cell_as_u64(&self.table, column, &row[column])
  }

  /// Renders the event as one idempotent statement, projected onto the
  /// columns shared with `intersection` and qualified with the
  /// intersection's schema and table names.
  ///
  /// String and byte literals double embedded single quotes and nothing
  /// else, which is only correct when the target session runs with
  /// `NO_BACKSLASH_ESCAPES`. Callers own that session setting.
  ///
  /// ref: https://dev.mysql.com/doc/refman/8.0/en/sql-mode.html#sqlmode_no_backslash_escapes
  pub fn sql(&self, intersection: &TableSchema) -> Result<String, DmlError> {
    let target = quoted_table_name(&intersection.schema, &intersection.table);

    match &self.kind {
      DmlKind::Insert { new_values } => {
        let (columns, images) = columns_and_values_in_intersection(&self.table, intersection, &[new_values])?;
        Ok(format!(
          "INSERT IGNORE INTO {} ({}) VALUES ({})",
          target,
          columns.join(","),
          values_list(&images[0]),
        ))
      }

      DmlKind::Update { old_values, new_values } => {
        let (columns, images) =
          columns_and_values_in_intersection(&self.table, intersection, &[old_values, new_values])?;
        Ok(format!(
          "UPDATE {} SET {} WHERE {}",
          target,
          set_clause(&columns, &images[1]),
          where_clause(&columns, &images[0]),
        ))
      }

      DmlKind::Delete { old_values } => {
        let (columns, images) = columns_and_values_in_intersection(&self.table, intersection, &[old_values])?;
        Ok(format!("DELETE FROM {} WHERE {}", target, where_clause(&columns, &images[0])))
      }
    }
  }
}

fn cell_as_u64(table: &TableSchema, column: usize, cell: &CellValue) -> Result<u64, DmlError> {
  if let Some(value) = cell.as_u64() {
    return Ok(value);
  }

  if let Some(value) = cell.as_i64() {
    if value < 0 {
      return Err(DmlError::NegativePrimaryKey {
        schema: table.schema.clone(),
        table: table.table.clone(),
        column,
        value,
      });
    }
    return Ok(value as u64);
  }

  match cell {
    // The driver returns BIGINT UNSIGNED values that overflow i64 as a
    // base-10 byte string.
    CellValue::Bytes(value) => {
      let text = String::from_utf8_lossy(value);
      text.parse::<u64>().map_err(|_| DmlError::PrimaryKeyParse {
        schema: table.schema.clone(),
        table: table.table.clone(),
        column,
        value: text.into_owned(),
      })
    }
    other => Err(DmlError::UnsupportedPrimaryKey {
      schema: table.schema.clone(),
      table: table.table.clone(),
      column,
      type_name: other.type_name(),
    }),
  }
}

/// Projects the given row images onto the columns present in both schemas,
/// preserving source column order. Returns the quoted column names and one
/// reduced row per image.
fn columns_and_values_in_intersection(
  table: &TableSchema,
  intersection: &TableSchema,
  images: &[&Row],
) -> Result<(Vec<String>, Vec<Row>), DmlError> {
  assert!(
    !table.columns.is_empty() && !intersection.columns.is_empty(),
    "zero columns: table: {}, intersection: {}",
    table.columns.len(),
    intersection.columns.len(),
  );

  let mut matched = Vec::new();
  for (index, column) in table.columns.iter().enumerate() {
    if intersection.columns.iter().any(|c| c.name == column.name) {
      matched.push((index, quote_identifier(&column.name)));
    }
  }

  let mut projected: Vec<Row> = Vec::with_capacity(images.len());
  for image in images {
    verify_row_width(table, image)?;
    projected.push(matched.iter().map(|(index, _)| image[*index].clone()).collect());
  }

  let columns = matched.into_iter().map(|(_, name)| name).collect();
  Ok((columns, projected))
}

fn values_list(values: &Row) -> String {
  let mut buffer = String::new();
  for (i, value) in values.iter().enumerate() {
    if i > 0 {
      buffer.push(',');
    }
    append_escaped_value(&mut buffer, value);
  }
  buffer
}

fn set_clause(columns: &[String], values: &Row) -> String {
  let mut buffer = String::new();
  for (i, value) in values.iter().enumerate() {
    if i > 0 {
      buffer.push(',');
    }
    buffer.push_str(&columns[i]);
    buffer.push('=');
    append_escaped_value(&mut buffer, value);
  }
  buffer
}

fn where_clause(columns: &[String], values: &Row) -> String {
  let mut buffer = String::new();
  for (i, value) in values.iter().enumerate() {
    if i > 0 {
      buffer.push_str(" AND ");
    }
    buffer.push_str(&columns[i]);
    if value.is_null() {
      // "WHERE col = NULL" never matches rows.
      buffer.push_str(" IS NULL");
    } else {
      buffer.push('=');
      append_escaped_value(&mut buffer, value);
    }
  }
  buffer
}

pub fn quoted_table_name(schema: &str, table: &str) -> String {
  format!("{}.{}", quote_identifier(schema), quote_identifier(table))
}

pub fn quote_identifier(name: &str) -> String {
  let mut buffer = String::with_capacity(name.len() + 2);
  buffer.push('`');
  for c in name.chars() {
    if c == '`' {
      buffer.push_str("``");
    } else {
      buffer.push(c);
    }
  }
  buffer.push('`');
  buffer
}

fn append_escaped_value(buffer: &mut String, value: &CellValue) {
  match value {
    CellValue::Null => buffer.push_str("NULL"),
    CellValue::U8(v) => buffer.push_str(&v.to_string()),
    CellValue::U16(v) => buffer.push_str(&v.to_string()),
    CellValue::U32(v) => buffer.push_str(&v.to_string()),
    CellValue::U64(v) => buffer.push_str(&v.to_string()),
    CellValue::I8(v) => buffer.push_str(&v.to_string()),
    CellValue::I16(v) => buffer.push_str(&v.to_string()),
    CellValue::I32(v) => buffer.push_str(&v.to_string()),
    CellValue::I64(v) => buffer.push_str(&v.to_string()),
    CellValue::F32(v) => buffer.push_str(&v.to_string()),
    CellValue::F64(v) => buffer.push_str(&v.to_string()),
    CellValue::Bool(true) => buffer.push('1'),
    CellValue::Bool(false) => buffer.push('0'),
    CellValue::String(v) => append_escaped_string(buffer, v),
    CellValue::Bytes(v) if v.is_empty() => buffer.push_str("NULL"),
    CellValue::Bytes(v) => append_escaped_bytes(buffer, v),
    CellValue::Decimal(v) => append_escaped_string(buffer, &v.to_string()),
  }
}

// Doubling embedded single quotes is the entire escaping story under
// NO_BACKSLASH_ESCAPES; backslashes pass through untouched.
//
// ref: https://github.com/mysql/mysql-server/blob/mysql-5.7.5/mysys/charset.c#L963-L1038
fn append_escaped_string(buffer: &mut String, value: &str) {
  buffer.push('\'');
  for c in value.chars() {
    if c == '\'' {
      buffer.push_str("''");
    } else {
      buffer.push(c);
    }
  }
  buffer.push('\'');
}

// Bytes 0x00..=0xFF map onto U+0000..=U+00FF one to one; re-encoding them
// for the wire is the session character set's concern.
fn append_escaped_bytes(buffer: &mut String, value: &[u8]) {
  buffer.push_str("_binary'");
  for &b in value {
    if b == b'\'' {
      buffer.push_str("''");
    } else {
      buffer.push(char::from(b));
    }
  }
  buffer.push('\'');
}
