use chrono::{TimeZone, Utc};
use demotron_core::{DemoError, RenameRequest, SyntheticEventRow, TableRef};
use demotron_warehouse::bigquery::sql::{
    append_script, quote_identifier, rename_statement, string_literal, table_path,
};
use uuid::Uuid;

fn rename_request(old: &str, new: &str) -> RenameRequest {
    RenameRequest {
        project_id: "sqlmesh-public-demo".to_string(),
        dataset_id: "tcloud_raw_data".to_string(),
        table_id: "raw_events".to_string(),
        old_name: old.to_string(),
        new_name: new.to_string(),
    }
}

fn sample_row(name: &str, hour: u32) -> SyntheticEventRow {
    SyntheticEventRow {
        event_id: Uuid::from_u128(0x1111_2222_3333_4444_5555_6666_7777_8888),
        event_name: name.to_string(),
        event_timestamp: Utc
            .with_ymd_and_hms(2024, 1, 10, hour, 30, 0)
            .single()
            .expect("timestamp"),
        user_id: Uuid::from_u128(0xaaaa_bbbb_cccc_dddd_eeee_ffff_0000_1111),
    }
}

#[test]
fn rename_statement_quotes_every_identifier() {
    let statement = rename_statement(&rename_request("named_events", "event_name"))
        .expect("statement");
    assert_eq!(
        statement,
        "ALTER TABLE `sqlmesh-public-demo`.`tcloud_raw_data`.`raw_events` \
         RENAME COLUMN `named_events` TO `event_name`"
    );
}

#[test]
fn rename_rejects_injected_identifiers() {
    let err = rename_statement(&rename_request("named_events`; DROP TABLE x; --", "event_name"))
        .expect_err("backtick rejected");
    assert!(matches!(err, DemoError::InvalidArgument(_)));

    let err = rename_statement(&rename_request("", "event_name")).expect_err("empty rejected");
    assert!(matches!(err, DemoError::InvalidArgument(_)));
}

#[test]
fn identifier_rules() {
    assert_eq!(quote_identifier("raw_events").expect("plain"), "`raw_events`");
    assert!(quote_identifier("raw\nevents").is_err());
    assert!(quote_identifier("raw\\events").is_err());

    let path = table_path("p", &TableRef::new("d", "t")).expect("path");
    assert_eq!(path, "`p`.`d`.`t`");
}

#[test]
fn string_literals_are_escaped() {
    assert_eq!(string_literal("page_view"), "'page_view'");
    assert_eq!(string_literal("it's"), "'it\\'s'");
    assert_eq!(string_literal("a\\b"), "'a\\\\b'");
}

#[test]
fn append_script_creates_then_inserts_all_rows() {
    let table = TableRef::new("tcloud_raw_data", "raw_events");
    let rows = vec![sample_row("page_view", 9), sample_row("ad_view", 17)];
    let script = append_script("sqlmesh-public-demo", &table, &rows).expect("script");

    let path = "`sqlmesh-public-demo`.`tcloud_raw_data`.`raw_events`";
    assert!(script.starts_with(&format!("CREATE TABLE IF NOT EXISTS {path} (")));
    assert!(script.contains("event_timestamp TIMESTAMP"));
    assert!(script.contains(&format!(
        "INSERT INTO {path} (event_id, event_name, event_timestamp, user_id)"
    )));
    assert!(script.contains(
        "('11112222-3333-4444-5555-666677778888', 'page_view', \
         TIMESTAMP '2024-01-10 09:30:00+00:00', 'aaaabbbb-cccc-dddd-eeee-ffff00001111')"
    ));
    assert!(script.contains("TIMESTAMP '2024-01-10 17:30:00+00:00'"));
    assert!(script.trim_end().ends_with(");"));
    assert_eq!(script.matches("TIMESTAMP '").count(), 2);
}

#[test]
fn append_script_requires_rows() {
    let table = TableRef::new("tcloud_raw_data", "raw_events");
    let err = append_script("sqlmesh-public-demo", &table, &[]).expect_err("no rows");
    assert!(matches!(err, DemoError::InvalidArgument(_)));
}
