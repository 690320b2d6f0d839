use std::path::PathBuf;

use relframe_core::Relation;
use relframe_core::testutil::{assert_rows_eq, enroll, student};
use relframe_csv::{DialectOptions, ReadOptions, read_relation, write_relation};

fn college(table: &str) -> Relation {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata/college")
        .join(format!("{table}.csv"));
    read_relation(path, &ReadOptions::default()).unwrap()
}

#[test]
fn reads_shipped_tables() {
    assert_eq!(student(), college("STUDENT"));
    assert_eq!(enroll(), college("ENROLL"));
    assert_eq!(3, college("DEPT").len());
    assert_eq!(6, college("COURSE").len());
    assert_eq!(
        &["SectId", "CourseId", "Prof", "YearOffered"],
        college("SECTION").columns()
    );
}

#[test]
fn query_on_file_data() {
    let rel = college("STUDENT").query("MajorId == 10").unwrap();
    assert_rows_eq(
        &rel,
        &[
            &["1", "joe", "2021", "10"],
            &["3", "max", "2022", "10"],
            &["9", "lee", "2021", "10"],
        ],
    );
}

#[test]
fn write_then_read_tab_separated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("courses.tsv");
    let dialect = DialectOptions::with_delimiter("\\t").unwrap();

    let courses = college("COURSE");
    let file = std::fs::File::create(&path).unwrap();
    write_relation(file, &courses, &dialect).unwrap();

    let opts = ReadOptions {
        dialect,
        trim: false,
    };
    let read_back = read_relation(&path, &opts).unwrap();
    assert_eq!(courses, read_back);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("CId\tTitle\tDeptId\n"));
}
