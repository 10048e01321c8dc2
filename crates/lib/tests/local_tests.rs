//! Behavior of stores backed by local files.

use std::fs;
use std::path::PathBuf;

use jsondoc::{DocumentError, DocumentStore};
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use tempfile::TempDir;

fn doc_path(temp: &TempDir, relative: &str) -> PathBuf {
  temp.path().join(relative)
}

fn open(path: &PathBuf) -> DocumentStore {
  DocumentStore::open(path.to_str().unwrap()).unwrap()
}

#[test]
fn reopening_does_not_rewrite() {
  let temp = TempDir::new().unwrap();
  let path = doc_path(&temp, "state/doc.json");

  let first = open(&path);
  assert_eq!(first.get().unwrap(), json!({}));
  let modified = fs::metadata(&path).unwrap().modified().unwrap();

  let second = open(&path);
  assert_eq!(second.get().unwrap(), json!({}));
  assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);
}

#[test]
fn reopening_keeps_content_written_earlier() {
  let temp = TempDir::new().unwrap();
  let path = doc_path(&temp, "doc.json");

  open(&path).set(&json!({"count": 3})).unwrap();

  assert_eq!(open(&path).get().unwrap(), json!({"count": 3}));
}

#[test]
fn relative_path_without_parent() {
  let temp = TempDir::new().unwrap();
  let path = doc_path(&temp, "bare.json");

  let store = open(&path);

  assert!(path.is_file());
  assert!(!store.is_remote());
}

#[test]
fn directory_bootstrap_failure_creates_nothing() {
  let temp = TempDir::new().unwrap();
  let blocker = doc_path(&temp, "blocker");
  fs::write(&blocker, "i am a file").unwrap();
  let path = blocker.join("nested").join("doc.json");

  let result = DocumentStore::open(path.to_str().unwrap());

  assert!(matches!(result, Err(DocumentError::DirectoryCreation { .. })));
  assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn unwritable_directory_fails_initialization_with_write_error() {
  use std::os::unix::fs::PermissionsExt;

  let temp = TempDir::new().unwrap();
  let dir = doc_path(&temp, "readonly");
  fs::create_dir(&dir).unwrap();
  fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

  // Root ignores directory permissions, so only assert when the probe write fails.
  if fs::write(dir.join("probe"), "").is_err() {
    let result = DocumentStore::open(dir.join("doc.json").to_str().unwrap());
    assert!(matches!(result, Err(DocumentError::FileWrite { .. })));
  }

  fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn merge_then_push_workflow() {
  let temp = TempDir::new().unwrap();
  let settings = open(&doc_path(&temp, "settings.json"));
  let log = open(&doc_path(&temp, "log.json"));

  settings.merge(Map::from_iter([("a".to_string(), json!(1))])).unwrap();
  let merged = settings
    .merge(Map::from_iter([("b".to_string(), json!({"deep": true}))]))
    .unwrap();
  assert_eq!(merged, json!({"a": 1, "b": {"deep": true}}));

  log.push(json!({"event": "start"})).unwrap();
  let pushed = log.push(json!({"event": "stop"})).unwrap();
  assert_eq!(pushed, json!([{"event": "start"}, {"event": "stop"}]));
  assert_eq!(log.get().unwrap(), pushed);
}

#[test]
fn merged_keys_keep_document_order() {
  let temp = TempDir::new().unwrap();
  let store = open(&doc_path(&temp, "doc.json"));
  store.set(&json!({"z": 1, "a": 2})).unwrap();

  store
    .merge(Map::from_iter([("m".to_string(), json!(3)), ("z".to_string(), json!(4))]))
    .unwrap();

  let doc = store.get().unwrap();
  let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
  assert_eq!(keys, ["z", "a", "m"]);
  assert_eq!(doc["z"], 4);
}

fn arb_json() -> impl Strategy<Value = Value> {
  let leaf = prop_oneof![
    Just(Value::Null),
    any::<bool>().prop_map(Value::from),
    any::<i64>().prop_map(Value::from),
    "[a-zA-Z0-9 _-]{0,12}".prop_map(Value::from),
  ];
  leaf.prop_recursive(3, 24, 6, |inner| {
    prop_oneof![
      prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
      prop::collection::vec(("[a-z]{1,6}", inner), 0..6)
        .prop_map(|entries| Value::Object(entries.into_iter().collect())),
    ]
  })
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(32))]

  #[test]
  fn set_then_get_round_trips(doc in arb_json()) {
    let temp = TempDir::new().unwrap();
    let store = open(&doc_path(&temp, "doc.json"));

    store.set(&doc).unwrap();

    prop_assert_eq!(store.get().unwrap(), doc);
  }

  #[test]
  fn each_push_adds_exactly_one(items in prop::collection::vec(arb_json(), 1..8)) {
    let temp = TempDir::new().unwrap();
    let store = open(&doc_path(&temp, "doc.json"));
    store.set(&json!([])).unwrap();

    for (i, item) in items.iter().enumerate() {
      let pushed = store.push(item.clone()).unwrap();
      let pushed = pushed.as_array().unwrap();
      prop_assert_eq!(pushed.len(), i + 1);
      prop_assert_eq!(pushed.last().unwrap(), item);
    }
  }
}
