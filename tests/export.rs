use std::fs;
use std::path::{Path, PathBuf};

use nbdefs::{export, CollectOptions, Collector, Definition, Error, ExportOptions, MergePolicy};

const SOME_CLASS: &str = "class SomeClass:\n    def __init__():\n        self.somethin = None\n\n    def gimme_somethin(self):\n        return self.somethin";
const ANOTHER_FUNC: &str = "def another_func() -> None:\n  ...";
const FUNCS_FOR_DAYS: &str =
    "def funcs_for_days(x: str, i: int) -> str:\n  \"\"\"Docstring.\"\"\"\n  return \"x: {x}; i: {i}\"";
const PRINT_THIS: &str = "def print_this(x: str) -> None:\n  print(x)";

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("files")
}

fn notebook() -> PathBuf {
    fixture_dir().join("test.ipynb")
}

fn expected_all() -> String {
    [SOME_CLASS, ANOTHER_FUNC, FUNCS_FOR_DAYS, PRINT_THIS].join("\n\n")
}

fn with_policy(policy: MergePolicy) -> ExportOptions {
    ExportOptions {
        policy,
        ..Default::default()
    }
}

#[test]
fn collects_notebook_definitions_in_cell_order() {
    let mut collector = Collector::new().unwrap();
    let defs = collector.collect(&notebook(), &CollectOptions::default()).unwrap();

    let expected = vec![
        Definition::new("another_func", notebook(), ANOTHER_FUNC),
        Definition::new("print_this", notebook(), PRINT_THIS),
        Definition::new("funcs_for_days", notebook(), FUNCS_FOR_DAYS),
        Definition::new("SomeClass", notebook(), SOME_CLASS),
    ];
    assert_eq!(defs, expected);
}

#[test]
fn collects_with_include_and_exclude() {
    let mut collector = Collector::new().unwrap();

    let include = CollectOptions::new(
        None,
        Some(vec!["another_func".into(), "print_this".into(), "missing".into()]),
        None,
    )
    .unwrap();
    let names: Vec<_> = collector
        .collect(&notebook(), &include)
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["another_func", "print_this"]);

    let exclude =
        CollectOptions::new(None, None, Some(vec!["another_func".into(), "print_this".into()]))
            .unwrap();
    let names: Vec<_> = collector
        .collect(&notebook(), &exclude)
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["funcs_for_days", "SomeClass"]);
}

#[test]
fn exports_notebook_to_fresh_file() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("tmpfile.py");

    let summary = export(&notebook(), &dest, &ExportOptions::default()).unwrap();

    assert_eq!(summary.written, vec![dest.clone()]);
    assert_eq!(summary.definitions, 4);
    assert_eq!(fs::read_to_string(&dest).unwrap(), expected_all());
}

#[test]
fn exports_directory_to_mirrored_file() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("tmpdir");

    let summary = export(&fixture_dir(), &dest, &ExportOptions::default()).unwrap();

    let written = dest.join("test.py");
    assert_eq!(summary.written, vec![written.clone()]);
    assert_eq!(fs::read_to_string(written).unwrap(), expected_all());
}

#[test]
fn exports_nested_directory_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("nbs");
    fs::create_dir_all(src.join("deep")).unwrap();
    fs::copy(notebook(), src.join("deep").join("one.ipynb")).unwrap();
    fs::copy(notebook(), src.join("skip.ipynb")).unwrap();

    let options = ExportOptions {
        collect: CollectOptions::new(Some("skip.ipynb".into()), None, None).unwrap(),
        ..Default::default()
    };
    let dest = tmp.path().join("out");
    export(&src, &dest, &options).unwrap();

    assert_eq!(
        fs::read_to_string(dest.join("deep").join("one.py")).unwrap(),
        expected_all()
    );
    assert!(!dest.join("skip.py").exists());
}

#[test]
fn export_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("funcs.py");

    for policy in [MergePolicy::Upsert, MergePolicy::Overwrite] {
        export(&notebook(), &dest, &with_policy(policy)).unwrap();
        let first = fs::read_to_string(&dest).unwrap();
        export(&notebook(), &dest, &with_policy(policy)).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), first);
    }

    export(&notebook(), &dest, &with_policy(MergePolicy::UpdateOnly)).unwrap();
    assert_eq!(fs::read_to_string(&dest).unwrap(), expected_all());
}

#[test]
fn upsert_keeps_existing_definitions() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("funcs.py");
    fs::write(
        &dest,
        "def another_func():\n    return \"kept\"\n\n\ndef local_only():\n    pass\n",
    )
    .unwrap();

    export(&notebook(), &dest, &ExportOptions::default()).unwrap();

    let expected = [
        SOME_CLASS,
        "def another_func():\n    return \"kept\"",
        FUNCS_FOR_DAYS,
        "def local_only():\n    pass",
        PRINT_THIS,
    ]
    .join("\n\n");
    assert_eq!(fs::read_to_string(&dest).unwrap(), expected);
}

#[test]
fn overwrite_discards_existing_definitions() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("funcs.py");
    fs::write(&dest, "def stale():\n    pass\n").unwrap();

    export(&notebook(), &dest, &with_policy(MergePolicy::Overwrite)).unwrap();

    assert_eq!(fs::read_to_string(&dest).unwrap(), expected_all());
}

#[test]
fn update_only_leaves_destination_definitions_unchanged() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("funcs.py");
    fs::write(&dest, "def print_this(x):\n    return x\n").unwrap();

    export(&notebook(), &dest, &with_policy(MergePolicy::UpdateOnly)).unwrap();

    // Matching source definitions do not replace destination text
    assert_eq!(
        fs::read_to_string(&dest).unwrap(),
        "def print_this(x):\n    return x"
    );
}

#[test]
fn update_only_into_fresh_file_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("funcs.py");

    let summary = export(&notebook(), &dest, &with_policy(MergePolicy::UpdateOnly)).unwrap();

    assert!(summary.written.is_empty());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "");
}

#[test]
fn malformed_file_aborts_directory_export() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("good.py"), "def good():\n    pass\n").unwrap();
    fs::write(src.join("bad.py"), "def bad(:\n    pass\n").unwrap();

    let dest = tmp.path().join("out");
    let err = export(&src, &dest, &ExportOptions::default()).unwrap_err();

    assert!(matches!(err, Error::Parse { .. }));
    assert!(!dest.exists());
}

#[test]
fn missing_source_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let err = export(
        &tmp.path().join("missing.ipynb"),
        &tmp.path().join("out.py"),
        &ExportOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
}
