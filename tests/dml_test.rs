use binlog::bytes::Bytes;
use binlog::rust_decimal::Decimal;
use binlog::{BinlogEventType, CellValue, ColumnSchema, RowsEvent, TableSchema};
use gondola::dml;

fn products_table() -> TableSchema {
  TableSchema::new(
    "shop",
    "products",
    vec![
      ColumnSchema::unsigned("id"),
      ColumnSchema::new("name"),
      ColumnSchema::new("price"),
      ColumnSchema::new("weight"),
      ColumnSchema::new("sku"),
      ColumnSchema::new("in_stock"),
    ],
    vec![0],
  )
}

// The target table dropped the legacy `sku` column mid-migration.
fn target_table() -> TableSchema {
  TableSchema::new(
    "shop_new",
    "products",
    vec![
      ColumnSchema::unsigned("id"),
      ColumnSchema::new("name"),
      ColumnSchema::new("price"),
      ColumnSchema::new("weight"),
      ColumnSchema::new("in_stock"),
    ],
    vec![0],
  )
}

#[test]
fn replays_a_write_burst_against_the_target_schema() {
  let table = products_table();
  let event = RowsEvent::new(
    BinlogEventType::WRITE_ROWS_EVENTV2,
    vec![
      vec![
        CellValue::I64(1),
        CellValue::String("Dog bed".to_string()),
        CellValue::Decimal(Decimal::new(4999, 2)),
        CellValue::F64(1.5),
        CellValue::Bytes(Bytes::from_static(b"DB-01")),
        CellValue::Bool(true),
      ],
      vec![
        CellValue::I64(2),
        CellValue::String("Cat's tower".to_string()),
        CellValue::Decimal(Decimal::new(14999, 2)),
        CellValue::F64(12.25),
        CellValue::Bytes(Bytes::new()),
        CellValue::Bool(false),
      ],
    ],
  );

  let events = dml::from_rows_event(&table, &event).unwrap();
  assert_eq!(2, events.len());

  assert_eq!(
    "INSERT IGNORE INTO `shop_new`.`products` (`id`,`name`,`price`,`weight`,`in_stock`) \
     VALUES (1,'Dog bed','49.99',1.5,1)",
    events[0].sql(&target_table()).unwrap()
  );
  assert_eq!(
    "INSERT IGNORE INTO `shop_new`.`products` (`id`,`name`,`price`,`weight`,`in_stock`) \
     VALUES (2,'Cat''s tower','149.99',12.25,0)",
    events[1].sql(&target_table()).unwrap()
  );

  assert_eq!(1, events[0].primary_key().unwrap());
  assert_eq!(2, events[1].primary_key().unwrap());
}

#[test]
fn replays_updates_with_null_transitions() {
  let table = products_table();
  let event = RowsEvent::new(
    BinlogEventType::UPDATE_ROWS_EVENTV2,
    vec![
      // Old image first, then the new image.
      vec![
        CellValue::I64(1),
        CellValue::Null,
        CellValue::Decimal(Decimal::new(4999, 2)),
        CellValue::F64(1.5),
        CellValue::Bytes(Bytes::from_static(b"DB-01")),
        CellValue::Bool(true),
      ],
      vec![
        CellValue::I64(1),
        CellValue::String("Dog bed".to_string()),
        CellValue::Decimal(Decimal::new(4999, 2)),
        CellValue::F64(1.5),
        CellValue::Bytes(Bytes::from_static(b"DB-01")),
        CellValue::Bool(true),
      ],
    ],
  );

  let events = dml::from_rows_event(&table, &event).unwrap();
  assert_eq!(1, events.len());

  assert_eq!(
    "UPDATE `shop_new`.`products` \
     SET `id`=1,`name`='Dog bed',`price`='49.99',`weight`=1.5,`in_stock`=1 \
     WHERE `id`=1 AND `name` IS NULL AND `price`='49.99' AND `weight`=1.5 AND `in_stock`=1",
    events[0].sql(&target_table()).unwrap()
  );
}

#[test]
fn replays_deletes_from_the_old_image() {
  let table = products_table();
  let event = RowsEvent::new(
    BinlogEventType::DELETE_ROWS_EVENTV1,
    vec![vec![
      CellValue::I64(2),
      CellValue::String("Cat's tower".to_string()),
      CellValue::Null,
      CellValue::Null,
      CellValue::Bytes(Bytes::new()),
      CellValue::Bool(false),
    ]],
  );

  let events = dml::from_rows_event(&table, &event).unwrap();
  assert_eq!(1, events.len());
  assert_eq!(2, events[0].primary_key().unwrap());

  // The empty sku buffer renders as NULL just like an explicit NULL would,
  // and it is dropped from the projection anyway.
  assert_eq!(
    "DELETE FROM `shop_new`.`products` \
     WHERE `id`=2 AND `name`='Cat''s tower' AND `price` IS NULL AND `weight` IS NULL AND `in_stock`=0",
    events[0].sql(&target_table()).unwrap()
  );
}

#[test]
fn normalized_unsigned_cells_survive_the_whole_pipeline() {
  let table = products_table();
  let event = RowsEvent::new(
    BinlogEventType::WRITE_ROWS_EVENTV1,
    vec![vec![
      CellValue::I64(-1),
      CellValue::Null,
      CellValue::Null,
      CellValue::Null,
      CellValue::Null,
      CellValue::Null,
    ]],
  );

  let events = dml::from_rows_event(&table, &event).unwrap();
  let sql = events[0].sql(&target_table()).unwrap();
  assert!(sql.contains("VALUES (18446744073709551615,"), "got: {sql}");
  assert_eq!(18_446_744_073_709_551_615, events[0].primary_key().unwrap());
}
