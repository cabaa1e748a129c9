//! Thread-safe reference store with lazy load and atomic reload.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use nakaz_core::{ArticleRecord, EffectiveRecord, ReferenceLookup};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::decode::decode_reference;
use crate::index::ReferenceIndex;
use crate::parse::parse_records;
use crate::StoreError;

/// File read when no path is configured.
pub const DEFAULT_REFERENCE_FILE: &str = "reference_uk_2025_06_07.txt";

#[derive(Debug, Default)]
struct State {
    index: Arc<ReferenceIndex>,
    loaded: bool,
}

/// Administrative snapshot of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceStatus {
    /// `file` once a load has been attempted, `unknown` before.
    pub source: String,
    pub count: usize,
    /// Configured path, or `(default)` when none was given.
    pub file_path: String,
}

/// In-memory sanctions reference.
///
/// Lookups and reload share one mutex. Readers clone the current index
/// handle under the lock, so each lookup sees one whole generation of
/// records even while a reload swaps in the next.
#[derive(Debug)]
pub struct ReferenceStore {
    path: Mutex<Option<PathBuf>>,
    state: Mutex<State>,
}

impl Default for ReferenceStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ReferenceStore {
    /// Store that reads `path` (or the default file) on first access.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: Mutex::new(path),
            state: Mutex::new(State::default()),
        }
    }

    /// Store loaded eagerly from `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(Some(path.into()));
        store.reload()?;
        Ok(store)
    }

    /// Point the store at `path` and read it.
    pub fn load(&self, path: impl Into<PathBuf>) -> Result<usize, StoreError> {
        *lock(&self.path) = Some(path.into());
        self.reload()
    }

    /// Re-read the configured file and replace the whole index.
    ///
    /// The file is read while holding the lock, so lookups wait for the
    /// swap instead of seeing a partial index. On error the previous index
    /// stays in place.
    pub fn reload(&self) -> Result<usize, StoreError> {
        let path = self.resolved_path();
        let mut state = lock(&self.state);
        let index = read_index(&path)?;
        let count = index.count();
        *state = State {
            index: Arc::new(index),
            loaded: true,
        };
        Ok(count)
    }

    /// Current index, loading it on first use.
    pub fn snapshot(&self) -> Arc<ReferenceIndex> {
        let mut state = lock(&self.state);
        if !state.loaded {
            let path = self.resolved_path();
            let index = read_index(&path).unwrap_or_else(|err| {
                error!(path = %path.display(), %err, "reference load failed, serving empty index");
                ReferenceIndex::default()
            });
            *state = State {
                index: Arc::new(index),
                loaded: true,
            };
        }
        Arc::clone(&state.index)
    }

    pub fn count(&self) -> usize {
        self.snapshot().count()
    }

    /// Does not trigger the lazy load; an unread store reports count 0.
    pub fn status(&self) -> ReferenceStatus {
        let (loaded, count) = {
            let state = lock(&self.state);
            (state.loaded, state.index.count())
        };
        ReferenceStatus {
            source: if loaded { "file" } else { "unknown" }.to_string(),
            count,
            file_path: lock(&self.path)
                .as_ref()
                .map_or_else(|| "(default)".to_string(), |p| p.display().to_string()),
        }
    }

    pub fn get_by_code(&self, code: &str, on: NaiveDate) -> Option<ArticleRecord> {
        self.snapshot().resolve(code, on).cloned()
    }

    pub fn get_with_range(&self, code: &str, on: NaiveDate) -> Option<EffectiveRecord> {
        self.snapshot().effective_range(code, on)
    }

    fn resolved_path(&self) -> PathBuf {
        lock(&self.path)
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REFERENCE_FILE))
    }
}

impl ReferenceLookup for ReferenceStore {
    fn get_by_code(&self, code: &str, on: NaiveDate) -> Option<ArticleRecord> {
        ReferenceStore::get_by_code(self, code, on)
    }

    fn get_with_range(&self, code: &str, on: NaiveDate) -> Option<EffectiveRecord> {
        ReferenceStore::get_with_range(self, code, on)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Read and index the file at `path`. A missing file is an empty index.
fn read_index(path: &Path) -> Result<ReferenceIndex, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "reference file not found, store is empty");
            return Ok(ReferenceIndex::default());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let index = ReferenceIndex::from_records(parse_records(&decode_reference(&bytes)));
    info!(count = index.count(), path = %path.display(), "loaded reference");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::thread;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::decode::encode_shifted;

    const HEADER: &str = "stat\tp2\thard\tfs1r64\tfs1r64_01x\td_izm";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// One row per `(caption, code, max years, d_izm)`.
    fn reference_bytes(rows: &[(&str, &str, &str, &str)]) -> Vec<u8> {
        let mut bytes = format!("{HEADER}\r\n").into_bytes();
        for (caption, code, max, d_izm) in rows {
            bytes.extend(encode_shifted(caption));
            bytes.extend(format!("\t{code}\t2\t01\t{max}\t{d_izm}\r\n").into_bytes());
        }
        bytes
    }

    fn write_file(rows: &[(&str, &str, &str, &str)]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&reference_bytes(rows)).unwrap();
        file.flush().unwrap();
        file
    }

    fn generation(file: &NamedTempFile, marker: &str) {
        let bytes = reference_bytes(&[
            ("Стоп", "1880001", marker, ""),
            ("Стоп", "1880002", marker, ""),
            ("Стоп", "1900003", marker, ""),
        ]);
        std::fs::write(file.path(), bytes).unwrap();
    }

    #[test]
    fn loads_and_resolves_by_date() {
        let file = write_file(&[
            ("Стоп", "1880002", "5", "01.01.2018"),
            ("Стоп", "1880002", "7", "10.07.2021"),
            ("Точно", "0990001", "3", "-"),
        ]);
        let store = ReferenceStore::open(file.path()).unwrap();

        assert_eq!(store.count(), 3);
        let old = store.get_by_code("1880002", date(2020, 1, 1)).unwrap();
        assert_eq!(old.fs1r64_01x, "5");
        assert_eq!(old.stat, "Стоп");
        let new = store.get_by_code("1880002", date(2022, 1, 1)).unwrap();
        assert_eq!(new.fs1r64_01x, "7");
        assert!(store.get_by_code("9990001", date(2022, 1, 1)).is_none());
    }

    #[test]
    fn falls_back_to_first_record() {
        let file = write_file(&[
            ("Стоп", "1880002", "5", "01.01.2018"),
            ("Стоп", "1880002", "7", "10.07.2021"),
        ]);
        let store = ReferenceStore::open(file.path()).unwrap();
        let early = store.get_by_code("1880002", date(2000, 1, 1)).unwrap();
        assert_eq!(early.fs1r64_01x, "5");
    }

    #[test]
    fn range_lookup() {
        let file = write_file(&[
            ("Стоп", "1880002", "5", "01.01.2018"),
            ("Стоп", "1880002", "7", "10.07.2021"),
        ]);
        let store = ReferenceStore::open(file.path()).unwrap();
        let found = store.get_with_range("1880002", date(2019, 3, 3)).unwrap();
        assert_eq!(found.effective_from, Some(date(2018, 1, 1)));
        assert_eq!(found.effective_to, Some(date(2021, 7, 9)));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let store = ReferenceStore::open(&path).unwrap();
        assert_eq!(store.count(), 0);
        assert!(store.get_by_code("1880002", date(2022, 1, 1)).is_none());

        let status = store.status();
        assert_eq!(status.source, "file");
        assert_eq!(status.count, 0);
        assert_eq!(status.file_path, path.display().to_string());
    }

    #[test]
    fn lazy_until_first_lookup() {
        let file = write_file(&[("Стоп", "1880002", "5", "")]);
        let store = ReferenceStore::new(Some(file.path().to_path_buf()));
        assert!(!lock(&store.state).loaded);
        assert!(store.get_by_code("1880002", date(2022, 1, 1)).is_some());
        assert!(lock(&store.state).loaded);
    }

    #[test]
    fn default_path_and_status_before_load() {
        let store = ReferenceStore::default();
        assert_eq!(store.resolved_path(), PathBuf::from(DEFAULT_REFERENCE_FILE));
        assert_eq!(
            store.status(),
            ReferenceStatus {
                source: "unknown".into(),
                count: 0,
                file_path: "(default)".into(),
            }
        );
    }

    #[test]
    fn reload_replaces_records() {
        let file = write_file(&[("Стоп", "1880002", "5", "")]);
        let store = ReferenceStore::open(file.path()).unwrap();
        assert_eq!(store.count(), 1);

        generation(&file, "9");
        assert_eq!(store.reload().unwrap(), 3);
        let record = store.get_by_code("1880002", date(2022, 1, 1)).unwrap();
        assert_eq!(record.fs1r64_01x, "9");
    }

    #[test]
    fn load_switches_file() {
        let first = write_file(&[("Стоп", "1880002", "5", "")]);
        let second = write_file(&[("Стоп", "0990001", "3", ""), ("Стоп", "0990002", "4", "")]);
        let store = ReferenceStore::open(first.path()).unwrap();
        assert_eq!(store.load(second.path()).unwrap(), 2);
        assert!(store.get_by_code("1880002", date(2022, 1, 1)).is_none());
        assert_eq!(store.status().file_path, second.path().display().to_string());
    }

    #[test]
    fn reload_never_mixes_generations() {
        let file = write_file(&[]);
        generation(&file, "1");
        let store = Arc::new(ReferenceStore::open(file.path()).unwrap());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let snapshot = store.snapshot();
                        let on = date(2022, 1, 1);
                        let markers: Vec<_> = ["1880001", "1880002", "1900003"]
                            .iter()
                            .map(|code| snapshot.resolve(code, on).unwrap().fs1r64_01x.clone())
                            .collect();
                        assert!(markers.iter().all(|m| *m == markers[0]), "{markers:?}");
                    }
                })
            })
            .collect();

        for marker in ["2", "3", "4", "5"] {
            generation(&file, marker);
            store.reload().unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(store.get_by_code("1900003", date(2022, 1, 1)).unwrap().fs1r64_01x, "5");
    }
}
