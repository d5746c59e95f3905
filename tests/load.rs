mod common;

use common::{Event, MockConnection};
use deltaload::prelude::*;
use deltaload::ddl::{TableDef, TableSql};
use deltaload::resolver::DdlBuilder;
use deltaload::{DriverError, LiteralError, LiteralRenderer, LoadReport, TableAction, load};

const TABLE: &str = "main.sales.orders";

fn numbers(rows: i64) -> Dataset {
    Dataset::from(Column::from_values("n", 0..rows))
}

fn report(outcome: &LoadOutcome) -> &LoadReport {
    outcome.report().expect("expected rows to be loaded")
}

#[test]
fn test_million_rows_single_column_is_two_batches() {
    let mut conn = MockConnection::default();
    let outcome = Loader::default()
        .load(&numbers(1_000_000), &mut conn, TABLE, &LoadOptions::new())
        .unwrap();

    let report = report(&outcome);
    assert_eq!(report.batches, 2);
    assert_eq!(report.batch_rows, 900_000);
    assert_eq!(report.rows, 1_000_000);
    assert_eq!(report.rows_affected, 1_000_000);
    assert!(report.warnings.is_empty());

    let inserts = conn.inserts();
    assert_eq!(inserts.len(), 2);
    assert!(inserts[0].contains("(0), (1), "));
    assert!(inserts[0].ends_with("(899999)"));
    assert!(inserts[1].contains("VALUES (900000), "));
    assert!(inserts[1].ends_with("(999999)"));
    assert_eq!(conn.rows(TABLE), Some(1_000_000));
}

#[test]
fn test_small_dataset_is_one_statement() {
    let mut conn = MockConnection::default();
    let outcome = Loader::default()
        .load(&numbers(10), &mut conn, TABLE, &LoadOptions::new())
        .unwrap();

    assert_eq!(report(&outcome).batches, 1);
    assert_eq!(
        conn.inserts(),
        vec![
            "INSERT INTO `main`.`sales`.`orders` (`n`) VALUES \
             (0), (1), (2), (3), (4), (5), (6), (7), (8), (9)"
        ]
    );
    assert_eq!(conn.tx_events(), vec![&Event::Begin, &Event::Commit]);
}

#[test]
fn test_failure_on_second_batch_rolls_back_everything() {
    let mut conn = MockConnection::default()
        .fail_on_insert(2, DriverError::statement("column n: value out of range"));
    let options = LoadOptions::new().batch_rows(4);

    let err = Loader::default()
        .load(&numbers(10), &mut conn, TABLE, &options)
        .unwrap_err();

    match &err {
        LoadError::Execution { range, source } => {
            assert_eq!(*range, 4..8);
            assert!(source.message.contains("out of range"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.failed_range(), Some(&(4..8)));
    assert!(err.to_string().contains("rows 4..8"));
    assert!(!err.is_retryable());

    // the third batch is never attempted
    assert_eq!(conn.inserts().len(), 2);
    assert_eq!(conn.tx_events(), vec![&Event::Begin, &Event::Rollback]);
    // the table was created but holds nothing from this load
    assert_eq!(conn.rows(TABLE), Some(0));
}

#[test]
fn test_timeout_is_retryable_and_rolled_back() {
    let mut conn =
        MockConnection::default().fail_on_insert(1, DriverError::timeout("query timed out"));
    let err = Loader::default()
        .load(&numbers(3), &mut conn, TABLE, &LoadOptions::new())
        .unwrap_err();

    assert_eq!(err.failed_range(), Some(&(0..3)));
    assert!(err.is_retryable());
    assert_eq!(conn.tx_events(), vec![&Event::Begin, &Event::Rollback]);
}

#[test]
fn test_commit_failure_is_transaction_error() {
    let mut conn = MockConnection::default().fail_on_commit();
    let err = Loader::default()
        .load(&numbers(3), &mut conn, TABLE, &LoadOptions::new())
        .unwrap_err();

    assert!(matches!(err, LoadError::Transaction(_)));
    assert_eq!(conn.tx_events(), vec![&Event::Begin, &Event::Rollback]);
    assert_eq!(conn.rows(TABLE), Some(0));
}

#[test]
fn test_empty_dataset_is_noop() {
    let mut conn = MockConnection::default();
    let empty = Dataset::from(Column::new("n", Vec::new()));

    let outcome = Loader::default()
        .load(&empty, &mut conn, TABLE, &LoadOptions::new())
        .unwrap();

    assert!(outcome.is_noop());
    assert_eq!(outcome.rows(), 0);
    assert_eq!(outcome.warnings(), &[LoadWarning::EmptyDataset]);
    assert!(conn.inserts().is_empty());
    assert!(conn.tx_events().is_empty());
}

#[test]
fn test_dataset_without_columns_touches_nothing() {
    let mut conn = MockConnection::default();
    let outcome = Loader::default()
        .load(&Dataset::default(), &mut conn, TABLE, &LoadOptions::new())
        .unwrap();

    assert!(outcome.is_noop());
    assert!(conn.events.is_empty());
}

#[test]
fn test_two_part_name_is_configuration_error() {
    let mut conn = MockConnection::default();
    let err = Loader::default()
        .load(&numbers(3), &mut conn, "sales.orders", &LoadOptions::new())
        .unwrap_err();

    assert!(matches!(err, LoadError::Configuration(ref m) if m.contains("sales.orders")));
    assert!(conn.events.is_empty());
}

#[test]
fn test_non_positive_batch_rows_is_rejected_before_io() {
    for rows in [0, -1, -500] {
        let mut conn = MockConnection::default();
        let err = Loader::default()
            .load(
                &numbers(3),
                &mut conn,
                TABLE,
                &LoadOptions::new().batch_rows(rows),
            )
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidArgument(_)), "{rows}: {err}");
        assert!(conn.events.is_empty());
    }
}

#[test]
fn test_explicit_batch_over_ceiling_warns_and_is_honored() {
    let mut conn = MockConnection::default();
    let config = LoaderConfig::default().with_value_ceiling(10);
    let dataset = Dataset::new(vec![
        Column::from_values("a", 0..20),
        Column::from_values("b", 0..20),
    ])
    .unwrap();

    let outcome = Loader::new(config)
        .load(
            &dataset,
            &mut conn,
            TABLE,
            &LoadOptions::new().batch_rows(8),
        )
        .unwrap();

    assert_eq!(outcome.warnings().len(), 1);
    let report = report(&outcome);
    assert_eq!(report.batch_rows, 8);
    assert_eq!(report.batches, 3);
    assert_eq!(
        report.warnings,
        vec![LoadWarning::BatchExceedsCeiling {
            batch_rows: 8,
            values: 16,
            ceiling: 10
        }]
    );
    assert_eq!(conn.rows(TABLE), Some(20));
}

#[test]
fn test_too_many_columns_is_chunk_size_error_before_ddl() {
    let mut conn = MockConnection::default();
    let config = LoaderConfig::default().with_value_ceiling(2);
    let dataset = Dataset::new(vec![
        Column::from_values("a", 0..5),
        Column::from_values("b", 0..5),
        Column::from_values("c", 0..5),
    ])
    .unwrap();

    let err = Loader::new(config)
        .load(&dataset, &mut conn, TABLE, &LoadOptions::new())
        .unwrap_err();

    assert!(matches!(err, LoadError::ChunkSize(_)));
    assert!(conn.ddl().is_empty());
}

#[test]
fn test_fail_policy_refuses_existing_table() {
    let mut conn = MockConnection::default().with_table(TABLE, 5);
    let err = Loader::default()
        .load(&numbers(3), &mut conn, TABLE, &LoadOptions::new())
        .unwrap_err();

    assert!(matches!(err, LoadError::TableExists(ref t) if t == TABLE));
    assert!(conn.ddl().is_empty());
    assert!(conn.inserts().is_empty());
    assert_eq!(conn.rows(TABLE), Some(5));
}

#[test]
fn test_fail_policy_creates_missing_table() {
    let mut conn = MockConnection::default();
    let outcome = Loader::default()
        .load(&numbers(3), &mut conn, TABLE, &LoadOptions::new())
        .unwrap();

    assert_eq!(report(&outcome).action, TableAction::Created);
    assert_eq!(
        conn.ddl(),
        vec!["CREATE TABLE `main`.`sales`.`orders` (\n\t`n` BIGINT\n)"]
    );
}

#[test]
fn test_replace_policy_drops_and_recreates() {
    let mut conn = MockConnection::default().with_table(TABLE, 5);
    let options = LoadOptions::new().exists_policy(ExistsPolicy::Replace);

    let outcome = Loader::default()
        .load(&numbers(3), &mut conn, TABLE, &options)
        .unwrap();

    assert_eq!(report(&outcome).action, TableAction::Replaced);
    let ddl = conn.ddl();
    assert_eq!(ddl.len(), 2);
    assert!(ddl[0].starts_with("DROP TABLE IF EXISTS"));
    assert!(ddl[1].starts_with("CREATE TABLE `main`"));
    assert_eq!(conn.rows(TABLE), Some(3));
}

#[test]
fn test_append_twice_doubles_rows() {
    let mut conn = MockConnection::default();
    let options = LoadOptions::new().exists_policy(ExistsPolicy::Append);
    let loader = Loader::default();

    let first = loader.load(&numbers(7), &mut conn, TABLE, &options).unwrap();
    let second = loader.load(&numbers(7), &mut conn, TABLE, &options).unwrap();

    assert_eq!(report(&first).action, TableAction::Created);
    assert_eq!(report(&second).action, TableAction::Reused);
    assert_eq!(conn.rows(TABLE), Some(14));
    assert_eq!(
        conn.ddl(),
        vec!["CREATE TABLE IF NOT EXISTS `main`.`sales`.`orders` (\n\t`n` BIGINT\n)"]
    );
}

#[test]
fn test_empty_dataset_still_resolves_table() {
    let mut conn = MockConnection::default();
    let empty = Dataset::from(Column::new("n", Vec::new()));
    let options = LoadOptions::new().column_type("n", ColumnType::BigInt);

    let outcome = Loader::default()
        .load(&empty, &mut conn, TABLE, &options)
        .unwrap();

    assert!(outcome.is_noop());
    assert_eq!(conn.ddl().len(), 1);
    assert_eq!(conn.rows(TABLE), Some(0));
}

#[test]
fn test_statements_follow_ddl_and_precede_commit() {
    let mut conn = MockConnection::default();
    Loader::default()
        .load(
            &numbers(6),
            &mut conn,
            TABLE,
            &LoadOptions::new().batch_rows(2),
        )
        .unwrap();

    let kinds: Vec<&str> = conn
        .events
        .iter()
        .map(|e| match e {
            Event::Exists(_) => "exists",
            Event::Ddl(_) => "ddl",
            Event::Begin => "begin",
            Event::Insert(_) => "insert",
            Event::Commit => "commit",
            Event::Rollback => "rollback",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["exists", "ddl", "begin", "insert", "insert", "insert", "commit"]
    );
}

#[test]
fn test_compilation_error_rolls_back() {
    let mut conn = MockConnection::new(Dialect::SQLite);
    let dataset = Dataset::from(Column::from_values("x", [1.0, 2.0, f64::INFINITY, 4.0]));

    let err = Loader::default()
        .load(
            &dataset,
            &mut conn,
            "local.main.measurements",
            &LoadOptions::new().batch_rows(2),
        )
        .unwrap_err();

    assert!(matches!(err, LoadError::Compilation { row: 2, ref column, .. } if column == "x"));
    assert_eq!(conn.inserts().len(), 1);
    assert_eq!(conn.tx_events(), vec![&Event::Begin, &Event::Rollback]);
}

#[test]
fn test_configured_dialect_overrides_connection() {
    let mut conn = MockConnection::new(Dialect::Databricks);
    let config = LoaderConfig::default().with_dialect(Dialect::PostgreSQL);
    let dataset = Dataset::from(Column::from_values("note", ["it's"]));

    load(&dataset, &mut conn, TABLE, &LoadOptions::new(), &config).unwrap();

    assert_eq!(
        conn.inserts(),
        vec![r#"INSERT INTO "sales"."orders" ("note") VALUES ('it''s')"#]
    );
}

#[test]
fn test_index_flag_adds_no_column() {
    let mut conn = MockConnection::default();
    Loader::default()
        .load(&numbers(2), &mut conn, TABLE, &LoadOptions::new().index(true))
        .unwrap();

    assert_eq!(
        conn.inserts(),
        vec!["INSERT INTO `main`.`sales`.`orders` (`n`) VALUES (0), (1)"]
    );
}

/// Creates Delta tables with a table property
struct DeltaDdl;

impl DdlBuilder for DeltaDdl {
    fn create_table(&self, table: &TableDef, dialect: Dialect) -> String {
        format!("{} USING DELTA", TableSql::new(table, dialect).create_table_sql())
    }

    fn create_table_if_not_exists(&self, table: &TableDef, dialect: Dialect) -> String {
        format!(
            "{} USING DELTA",
            TableSql::new(table, dialect).create_table_if_not_exists_sql()
        )
    }

    fn drop_table(&self, table: &TableDef, dialect: Dialect) -> String {
        TableSql::new(table, dialect).drop_table_sql()
    }
}

/// Renders integers as hex strings and refuses negative ones
struct HexIntegers;

impl LiteralRenderer for HexIntegers {
    fn render(&self, value: &Value, out: &mut String) -> Result<(), LiteralError> {
        match value {
            Value::Integer(i) if *i < 0 => Err(LiteralError::Unsupported {
                kind: "negative integer",
                dialect: Dialect::Databricks,
            }),
            Value::Integer(i) => {
                out.push_str(&format!("'{i:#x}'"));
                Ok(())
            }
            other => Dialect::Databricks.render(other, out),
        }
    }
}

#[test]
fn test_custom_ddl_builder_and_renderer() {
    let mut conn = MockConnection::default();
    let loader = Loader::default()
        .with_ddl_builder(DeltaDdl)
        .with_renderer(HexIntegers);

    loader
        .load(&numbers(3), &mut conn, TABLE, &LoadOptions::new())
        .unwrap();

    assert_eq!(
        conn.ddl(),
        vec!["CREATE TABLE `main`.`sales`.`orders` (\n\t`n` BIGINT\n) USING DELTA"]
    );
    assert_eq!(
        conn.inserts(),
        vec!["INSERT INTO `main`.`sales`.`orders` (`n`) VALUES ('0x0'), ('0x1'), ('0x2')"]
    );
}

#[test]
fn test_custom_renderer_error_rolls_back() {
    let mut conn = MockConnection::default();
    let loader = Loader::default().with_renderer(HexIntegers);
    let dataset = Dataset::from(Column::from_values("n", [1, 2, -3, 4]));

    let err = loader
        .load(&dataset, &mut conn, TABLE, &LoadOptions::new().batch_rows(2))
        .unwrap_err();

    assert!(matches!(
        err,
        LoadError::Compilation { row: 2, ref column, source: LiteralError::Unsupported { .. } }
            if column == "n"
    ));
    assert_eq!(conn.inserts().len(), 1);
    assert_eq!(conn.tx_events(), vec![&Event::Begin, &Event::Rollback]);
    assert_eq!(conn.rows(TABLE), Some(0));
}
