mod setup;

use predicates::prelude::*;
use setup::*;

#[test]
fn test_show_table() {
    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("show")
        .arg(college_file("DEPT"));
    let expected = r#"
DId    DName
10     compsci
20     math
30     drama
"#
    .trim_start();
    cmd.assert().success().stdout(expected);
}

#[test]
fn test_query_table() {
    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("query")
        .arg(college_file("STUDENT"))
        .arg("MajorId == 10");
    let expected = r#"
SId    SName    GradYear    MajorId
1      joe      2021        10
3      max      2022        10
9      lee      2021        10
"#
    .trim_start();
    cmd.assert().success().stdout(expected);
}

#[test]
fn test_query_csv_mode() {
    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--mode")
        .arg("csv")
        .arg("query")
        .arg(college_file("STUDENT"))
        .arg("GradYear < 2020");
    let expected = r#"
SId,SName,GradYear,MajorId
8,pat,2019,20
"#
    .trim_start();
    cmd.assert().success().stdout(expected);
}

#[test]
fn test_max_rows_truncates() {
    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--max-rows")
        .arg("1")
        .arg("show")
        .arg(college_file("DEPT"));
    let expected = r#"
DId    DName
10     compsci
... 2 more rows
"#
    .trim_start();
    cmd.assert().success().stdout(expected);
}

#[test]
fn test_max_rows_from_env() {
    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .env("RELFRAME_MAX_ROWS", "2")
        .arg("show")
        .arg(college_file("DEPT"));
    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("... 1 more row\n"));
}

#[test]
fn test_tab_delimited_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pets.tsv");
    std::fs::write(&path, "name\tlegs\ncat\t4\nbird\t2\nsnake\t0\n").unwrap();

    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--delimiter")
        .arg("\\t")
        .arg("--mode")
        .arg("csv")
        .arg("query")
        .arg(&path)
        .arg("legs >= 2");
    let expected = "name\tlegs\nbird\t2\ncat\t4\n";
    cmd.assert().success().stdout(expected);
}

#[test]
fn test_missing_file_errors() {
    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("show")
        .arg("does/not/exist.csv");
    cmd.assert()
        .code(1)
        .stdout(predicate::str::starts_with("ERROR: "))
        .stdout(predicate::str::contains("exist.csv"));
}

#[test]
fn test_malformed_query_errors() {
    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("query")
        .arg(college_file("STUDENT"))
        .arg("MajorId ==");
    cmd.assert()
        .code(1)
        .stdout(predicate::str::starts_with("ERROR: Malformed query"));
}

#[test]
fn test_unknown_column_errors() {
    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("query")
        .arg(college_file("STUDENT"))
        .arg("Age > 20");
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("ERROR:"));
}

#[test]
fn test_bad_delimiter_errors() {
    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--delimiter")
        .arg(";;")
        .arg("show")
        .arg(college_file("DEPT"));
    cmd.assert()
        .code(1)
        .stdout(predicate::str::starts_with("ERROR: Invalid argument"));
}
