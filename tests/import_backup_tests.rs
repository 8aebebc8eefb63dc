mod common;
use common::{init_db_with_roster, setup_test_db, stutra_db, temp_out};
use predicates::str::contains;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use stutra::core::import::{section_from_file_stem, title_case};

fn roster_file(dir_name: &str, file_name: &str, content: &str) -> PathBuf {
    let dir = env::temp_dir().join(dir_name);
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(file_name);
    fs::write(&path, content).expect("write roster");
    path
}

#[test]
fn test_title_case_and_section_from_file_name() {
    assert_eq!(title_case("ADITI  sharma"), "Aditi Sharma");
    assert_eq!(
        section_from_file_stem(Path::new("/tmp/raman2.csv")).as_deref(),
        Some("Raman")
    );
    assert_eq!(
        section_from_file_stem(Path::new("class_10-b.csv")).as_deref(),
        Some("Class B")
    );
    assert_eq!(section_from_file_stem(Path::new("2024.csv")), None);
}

#[test]
fn test_import_roster_csv_per_section_layout() {
    let db_path = setup_test_db("import_roster_per_section");
    stutra_db(&db_path).arg("init").assert().success();

    let file = roster_file(
        "stutra_import_per_section",
        "raman2.csv",
        "S.NO,A.NO.,Name\n1,501,ADITI sharma\n2,,Missing Number\n3,abc,Bad Number\n4,502,ravi KUMAR\n",
    );

    stutra_db(&db_path)
        .args(["import", "--csv", &file.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("2 students added"))
        .stdout(contains("missing name or admission number"))
        .stdout(contains("invalid admission number 'abc'"));

    stutra_db(&db_path)
        .args(["student", "list", "--section", "Raman"])
        .assert()
        .success()
        .stdout(contains("Aditi Sharma"))
        .stdout(contains("Ravi Kumar"));

    // importing again skips the existing ids
    stutra_db(&db_path)
        .args(["import", "--csv", &file.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("0 students added"))
        .stdout(contains("already exists"));
}

#[test]
fn test_import_roster_csv_flat_layout() {
    let db_path = setup_test_db("import_roster_flat");
    stutra_db(&db_path).arg("init").assert().success();

    let file = roster_file(
        "stutra_import_flat",
        "students.csv",
        "name,admission_number,section\nZoe,701,Tagore\nYan,702,\n",
    );

    stutra_db(&db_path)
        .args([
            "import",
            "--csv",
            &file.to_string_lossy(),
            "--section",
            "Gandhi",
        ])
        .assert()
        .success()
        .stdout(contains("2 students added"));

    stutra_db(&db_path)
        .args(["student", "list", "--section", "Gandhi"])
        .assert()
        .success()
        .stdout(contains("Yan"));

    stutra_db(&db_path)
        .args(["student", "list", "--section", "Tagore"])
        .assert()
        .success()
        .stdout(contains("Zoe"));
}

#[test]
fn test_backup_json_then_import_reproduces_export() {
    let db_path = setup_test_db("backup_json_source");
    init_db_with_roster(&db_path);

    stutra_db(&db_path)
        .args(["mark", "1", "3", "--status", "present", "--date", "2025-07-27"])
        .assert()
        .success();
    stutra_db(&db_path)
        .args(["mark", "3", "--status", "absent", "--date", "2025-07-27"])
        .assert()
        .success();

    let snapshot = temp_out("backup_json_snapshot", "json");
    stutra_db(&db_path)
        .args(["backup", "--file", &snapshot, "--json"])
        .assert()
        .success()
        .stdout(contains("Snapshot written"));

    let restored = setup_test_db("backup_json_restored");
    stutra_db(&restored).arg("init").assert().success();
    stutra_db(&restored)
        .args(["import", "--backup", &snapshot])
        .assert()
        .success()
        .stdout(contains("3 students added"))
        .stdout(contains("3 log entries added"));

    let export = |db: &str, name: &str| -> String {
        let out = temp_out(name, "csv");
        stutra_db(db)
            .args([
                "export", "--section", "A", "--range", "2025-07-27", "--file", &out, "--force",
            ])
            .assert()
            .success();
        fs::read_to_string(&out).expect("read export")
    };

    let original = export(&db_path, "backup_json_original_export");
    let copy = export(&restored, "backup_json_restored_export");
    assert_eq!(original, copy);
    assert!(copy.ends_with("\"3\",\"Carol\",\"A\""));

    // exporting straight from the snapshot gives the same report
    let out = temp_out("backup_json_from_backup", "csv");
    stutra_db(&db_path)
        .args([
            "export",
            "--section",
            "A",
            "--range",
            "2025-07-27",
            "--file",
            &out,
            "--from-backup",
            &snapshot,
        ])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&out).expect("read export"), original);
}

#[test]
fn test_backup_copy_compressed() {
    let db_path = setup_test_db("backup_copy_compressed");
    init_db_with_roster(&db_path);

    let out = temp_out("backup_copy_compressed", "sqlite");
    let zip = Path::new(&out).with_extension("zip");
    fs::remove_file(&zip).ok();

    stutra_db(&db_path)
        .args(["backup", "--file", &out, "--compress"])
        .assert()
        .success();

    assert!(zip.exists());
    assert!(!Path::new(&out).exists());
}
