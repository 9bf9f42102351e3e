//! Encrypted file-backed key-value store.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/salt                                  passphrase salt (optional)
//! <root>/<sha256(scope)>/<sha256(key)>.bin     one sealed entry per key
//! ```
//!
//! File names are hashes, so neither keys nor scopes leak through directory
//! listings. Writes go through a temporary file renamed into place; readers
//! see the previous value or the new one, never a partial write.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::encryption::{generate_salt, EntryCipher, SALT_SIZE};
use super::traits::{check_key, KeyValueStore, StoreResult};
use crate::errors::StoreError;
use crate::scope::StoreScope;

const SALT_FILE: &str = "salt";
const ENTRY_EXTENSION: &str = "bin";

/// [`KeyValueStore`] persisting AES-256-GCM sealed entries on disk.
pub struct EncryptedFileStore {
    dir: PathBuf,
    scope: StoreScope,
    cipher: EntryCipher,
}

impl std::fmt::Debug for EncryptedFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedFileStore")
            .field("dir", &self.dir)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

fn io_error(err: io::Error) -> StoreError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => StoreError::unavailable(err),
        _ => StoreError::unknown(err),
    }
}

/// Hash of the scope's parts, each length-prefixed so no two scopes share input.
fn scope_dir_name(scope: &StoreScope) -> String {
    let mut hasher = Sha256::new();
    hasher.update((scope.service().len() as u64).to_be_bytes());
    hasher.update(scope.service().as_bytes());
    match scope.access_group() {
        Some(group) => {
            hasher.update([1u8]);
            hasher.update((group.len() as u64).to_be_bytes());
            hasher.update(group.as_bytes());
        }
        None => hasher.update([0u8]),
    }
    hex::encode(hasher.finalize())
}

impl EncryptedFileStore {
    /// Open (creating if needed) the store for `scope` under `root`.
    ///
    /// # Security
    ///
    /// The master key should come from a secure random source or a proper
    /// KDF; it is wiped from memory when the store is dropped.
    pub fn new(
        root: impl AsRef<Path>,
        scope: StoreScope,
        master_key: [u8; 32],
    ) -> StoreResult<Self> {
        Self::open(root.as_ref(), scope, EntryCipher::new(master_key))
    }

    /// Open the store with a key derived from `passphrase` (Argon2id).
    ///
    /// A random salt is created in `<root>/salt` on first use and reused after.
    /// Concurrent first opens agree on a single salt.
    pub fn open_with_passphrase(
        root: impl AsRef<Path>,
        scope: StoreScope,
        passphrase: &[u8],
    ) -> StoreResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root).map_err(io_error)?;
        let salt = load_or_create_salt(&root.join(SALT_FILE))?;
        let cipher = EntryCipher::from_passphrase(passphrase, &salt).map_err(StoreError::unknown)?;
        Self::open(root, scope, cipher)
    }

    fn open(root: &Path, scope: StoreScope, cipher: EntryCipher) -> StoreResult<Self> {
        let dir = root.join(scope_dir_name(&scope));
        fs::create_dir_all(&dir).map_err(io_error)?;
        debug!(scope = %scope, dir = %dir.display(), "opened encrypted file store");
        Ok(Self { dir, scope, cipher })
    }

    /// Get the scope of this store.
    pub fn scope(&self) -> &StoreScope {
        &self.scope
    }

    /// Get the directory holding this scope's entries.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir
            .join(format!("{}.{}", hex::encode(digest), ENTRY_EXTENSION))
    }

    /// Context binding a sealed value to its scope and key.
    fn context(&self, key: &str) -> Vec<u8> {
        let mut context = Vec::new();
        context.extend_from_slice(b"credkeep-file-v1\0");
        context.extend_from_slice(scope_dir_name(&self.scope).as_bytes());
        context.push(0);
        context.extend_from_slice(key.as_bytes());
        context
    }

    fn write_atomically(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut suffix = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut suffix);
        let tmp = self.dir.join(format!(".tmp-{}", hex::encode(suffix)));

        let result = (|| {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(data)?;
            file.sync_all()?;
            fs::rename(&tmp, path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

fn read_salt(path: &Path) -> io::Result<Option<[u8; SALT_SIZE]>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    bytes.as_slice().try_into().map(Some).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "salt file {} has {} bytes, expected {}",
                path.display(),
                bytes.len(),
                SALT_SIZE
            ),
        )
    })
}

fn salt_error(err: io::Error) -> StoreError {
    match err.kind() {
        io::ErrorKind::InvalidData => StoreError::encoding(err),
        _ => io_error(err),
    }
}

/// Read the salt, creating it on first use.
///
/// A new salt is written to a temporary file and hard-linked into place; the
/// link fails if another process published first, and that salt is used.
fn load_or_create_salt(path: &Path) -> StoreResult<[u8; SALT_SIZE]> {
    if let Some(salt) = read_salt(path).map_err(salt_error)? {
        return Ok(salt);
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut suffix = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut suffix);
    let tmp = dir.join(format!(".salt-{}", hex::encode(suffix)));

    let salt = generate_salt();
    let published = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&salt)?;
        file.sync_all()?;
        fs::hard_link(&tmp, path)
    })();
    let _ = fs::remove_file(&tmp);

    match published {
        Ok(()) => Ok(salt),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => read_salt(path)
            .map_err(salt_error)?
            .ok_or_else(|| StoreError::unknown(format!("salt file {} vanished", path.display()))),
        Err(e) => Err(io_error(e)),
    }
}

impl KeyValueStore for EncryptedFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        check_key(key)?;
        let sealed = match fs::read(self.entry_path(key)) {
            Ok(sealed) => sealed,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(e)),
        };
        self.cipher
            .decrypt(&sealed, &self.context(key))
            .map(Some)
            .map_err(StoreError::encoding)
    }

    fn set(&self, key: &str, value: Option<&[u8]>) -> StoreResult<()> {
        check_key(key)?;
        let path = self.entry_path(key);
        match value {
            Some(bytes) => {
                let sealed = self
                    .cipher
                    .encrypt(bytes, &self.context(key))
                    .map_err(StoreError::encoding)?;
                self.write_atomically(&path, &sealed).map_err(io_error)?;
                debug!(scope = %self.scope, key, len = bytes.len(), "wrote credential file");
            }
            None => match fs::remove_file(&path) {
                Ok(()) => debug!(scope = %self.scope, key, "deleted credential file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(io_error(e)),
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreErrorCode;

    #[test]
    fn test_entry_files_are_hashed() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            EncryptedFileStore::new(dir.path(), StoreScope::new("svc"), [3u8; 32]).unwrap();

        store.set("pushtoken", Some(b"token")).unwrap();

        let names: Vec<String> = fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".bin"));
        assert!(!names[0].contains("pushtoken"));
    }

    #[test]
    fn test_scope_dirs_are_distinct() {
        let pairs = [
            (StoreScope::new("svc"), StoreScope::new("svc").with_access_group("")),
            (
                StoreScope::new("a\0\u{1}b"),
                StoreScope::new("a").with_access_group("b"),
            ),
            (
                StoreScope::new("a").with_access_group("b\0c"),
                StoreScope::new("a\0b").with_access_group("c"),
            ),
            (StoreScope::new("a@b"), StoreScope::new("a").with_access_group("b")),
        ];
        for (a, b) in pairs {
            assert_ne!(scope_dir_name(&a), scope_dir_name(&b), "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_salt_created_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SALT_FILE);

        let first = load_or_create_salt(&path).unwrap();
        let second = load_or_create_salt(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read(&path).unwrap(), first.to_vec());

        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_concurrent_salt_creation_agrees() {
        use std::sync::{Arc, Barrier};

        for _ in 0..10 {
            let dir = tempfile::tempdir().unwrap();
            let path = Arc::new(dir.path().join(SALT_FILE));
            let barrier = Arc::new(Barrier::new(4));

            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let path = Arc::clone(&path);
                    let barrier = Arc::clone(&barrier);
                    std::thread::spawn(move || {
                        barrier.wait();
                        load_or_create_salt(&path).unwrap()
                    })
                })
                .collect();

            let salts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert!(salts.iter().all(|s| *s == salts[0]));
            assert_eq!(fs::read(path.as_ref()).unwrap(), salts[0].to_vec());
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = EncryptedFileStore::new(dir.path(), StoreScope::new("svc"), [3u8; 32]).unwrap();
        assert_eq!(
            store.get("").unwrap_err().code(),
            StoreErrorCode::EncodingFailure
        );
    }

    #[test]
    fn test_bad_salt_length() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SALT_FILE), b"short").unwrap();

        let err =
            EncryptedFileStore::open_with_passphrase(dir.path(), StoreScope::new("svc"), b"pw")
                .unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::EncodingFailure);
    }
}
