use bytes::Bytes;
use rust_decimal::Decimal;

/// A single column value as decoded from a binlog row image.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
  Null,
  I8(i8),
  I16(i16),
  I32(i32),
  I64(i64),
  U8(u8),
  U16(u16),
  U32(u32),
  U64(u64),
  F32(f32),
  F64(f64),
  Bool(bool),
  String(String),
  Bytes(Bytes),
  Decimal(Decimal),
}

/// One row image: one cell per table column, in column order.
pub type Row = Vec<CellValue>;

impl CellValue {
  /// The driver hands back an empty byte buffer for NULL text columns, so an
  /// empty `Bytes` counts as NULL everywhere a NULL does.
  pub fn is_null(&self) -> bool {
    match self {
      CellValue::Null => true,
      CellValue::Bytes(b) => b.is_empty(),
      _ => false,
    }
  }

  /// Reinterprets a signed integer as the unsigned integer of the same
  /// width, keeping the bit pattern. Binlog decoders emit signed values for
  /// `TINYINT UNSIGNED` and friends, so a stored 255 arrives as `-1i8`.
  pub fn reinterpret_unsigned(self) -> CellValue {
    match self {
      CellValue::I8(v) => CellValue::U8(v as u8),
      CellValue::I16(v) => CellValue::U16(v as u16),
      CellValue::I32(v) => CellValue::U32(v as u32),
      CellValue::I64(v) => CellValue::U64(v as u64),
      other => other,
    }
  }

  pub fn as_u64(&self) -> Option<u64> {
    match *self {
      CellValue::U8(v) => Some(v.into()),
      CellValue::U16(v) => Some(v.into()),
      CellValue::U32(v) => Some(v.into()),
      CellValue::U64(v) => Some(v),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match *self {
      CellValue::I8(v) => Some(v.into()),
      CellValue::I16(v) => Some(v.into()),
      CellValue::I32(v) => Some(v.into()),
      CellValue::I64(v) => Some(v),
      _ => None,
    }
  }

  pub fn type_name(&self) -> &'static str {
    match self {
      CellValue::Null => "null",
      CellValue::I8(_) => "i8",
      CellValue::I16(_) => "i16",
      CellValue::I32(_) => "i32",
      CellValue::I64(_) => "i64",
      CellValue::U8(_) => "u8",
      CellValue::U16(_) => "u16",
      CellValue::U32(_) => "u32",
      CellValue::U64(_) => "u64",
      CellValue::F32(_) => "f32",
      CellValue::F64(_) => "f64",
      CellValue::Bool(_) => "bool",
      CellValue::String(_) => "string",
      CellValue::Bytes(_) => "bytes",
      CellValue::Decimal(_) => "decimal",
    }
  }
}
