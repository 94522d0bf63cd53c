// storefront/src/engine/file.rs

use super::StorageEngine;
use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{event, Level};

/// On-disk layout of one database.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
  version: u32,
  collections: BTreeMap<String, BTreeMap<u64, Value>>,
}

struct OpenDb {
  path: PathBuf,
  doc: Document,
}

/// Durable engine keeping each database as `<dir>/<db_name>.json`.
///
/// Every mutation rewrites the file through a temp file and a rename, so a
/// crash leaves either the old or the new document. Mutations are serialized
/// by an async mutex. Nothing coordinates two processes on the same file;
/// the last writer wins.
pub struct FileEngine {
  dir: PathBuf,
  db: Mutex<Option<OpenDb>>,
}

impl FileEngine {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self {
      dir: dir.into(),
      db: Mutex::new(None),
    }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  async fn read_document(path: &Path) -> anyhow::Result<Option<Document>> {
    match tokio::fs::read(path).await {
      Ok(bytes) => {
        let doc = serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(doc))
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
  }

  async fn write_document(path: &Path, doc: &Document) -> anyhow::Result<()> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes)
      .await
      .with_context(|| format!("writing {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
      .await
      .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
  }

  /// Applies `f` to one collection and persists the document. If the write
  /// fails the collection is restored, keeping memory and disk in agreement.
  async fn mutate<F>(&self, collection: &str, f: F) -> anyhow::Result<()>
  where
    F: FnOnce(&mut BTreeMap<u64, Value>) + Send,
  {
    let mut guard = self.db.lock().await;
    let db = guard.as_mut().ok_or_else(|| anyhow!("database is not open"))?;
    let coll = db
      .doc
      .collections
      .get_mut(collection)
      .ok_or_else(|| anyhow!("collection '{}' does not exist", collection))?;
    let before = coll.clone();
    f(coll);

    if let Err(e) = Self::write_document(&db.path, &db.doc).await {
      event!(Level::WARN, collection, error = %e, "Write failed; restoring collection.");
      if let Some(coll) = db.doc.collections.get_mut(collection) {
        *coll = before;
      }
      return Err(e);
    }
    Ok(())
  }

  async fn read_collection<T: Send>(
    &self,
    collection: &str,
    f: impl FnOnce(&BTreeMap<u64, Value>) -> T + Send,
  ) -> anyhow::Result<T> {
    let guard = self.db.lock().await;
    let db = guard.as_ref().ok_or_else(|| anyhow!("database is not open"))?;
    let coll = db
      .doc
      .collections
      .get(collection)
      .ok_or_else(|| anyhow!("collection '{}' does not exist", collection))?;
    Ok(f(coll))
  }
}

#[async_trait]
impl StorageEngine for FileEngine {
  fn name(&self) -> &'static str {
    "file"
  }

  async fn open(&self, db_name: &str, version: u32, collections: &[&'static str]) -> anyhow::Result<()> {
    let mut guard = self.db.lock().await;

    tokio::fs::create_dir_all(&self.dir)
      .await
      .with_context(|| format!("creating {}", self.dir.display()))?;
    let path = self.dir.join(format!("{}.json", db_name));

    let existing = Self::read_document(&path).await?;
    let is_new = existing.is_none();
    let mut doc = existing.unwrap_or_default();

    if doc.version > version {
      bail!(
        "database '{}' is at version {}, newer than requested version {}",
        db_name,
        doc.version,
        version
      );
    }

    let missing: Vec<&str> = collections
      .iter()
      .copied()
      .filter(|c| !doc.collections.contains_key(*c))
      .collect();

    if is_new || doc.version < version || !missing.is_empty() {
      event!(
        Level::INFO,
        db_name,
        from_version = doc.version,
        to_version = version,
        created_collections = ?missing,
        "Upgrading database file."
      );
      for collection in missing {
        doc.collections.insert(collection.to_string(), BTreeMap::new());
      }
      doc.version = version;
      Self::write_document(&path, &doc).await?;
    }

    *guard = Some(OpenDb { path, doc });
    Ok(())
  }

  async fn put(&self, collection: &str, key: u64, value: Value) -> anyhow::Result<()> {
    self
      .mutate(collection, move |coll| {
        coll.insert(key, value);
      })
      .await
  }

  async fn get(&self, collection: &str, key: u64) -> anyhow::Result<Option<Value>> {
    self.read_collection(collection, |coll| coll.get(&key).cloned()).await
  }

  async fn get_all(&self, collection: &str) -> anyhow::Result<Vec<Value>> {
    self
      .read_collection(collection, |coll| coll.values().cloned().collect())
      .await
  }

  async fn delete(&self, collection: &str, key: u64) -> anyhow::Result<()> {
    // Skip the rewrite when there is nothing to remove.
    if self.read_collection(collection, |coll| !coll.contains_key(&key)).await? {
      return Ok(());
    }
    self
      .mutate(collection, move |coll| {
        coll.remove(&key);
      })
      .await
  }

  async fn clear(&self, collection: &str) -> anyhow::Result<()> {
    self.mutate(collection, |coll| coll.clear()).await
  }
}
