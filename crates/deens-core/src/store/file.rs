// # File Credential Store
//
// File-based implementation of CredentialStore with crash recovery.
//
// ## Crash Recovery
//
// - Atomic writes: Uses write-then-rename for atomicity
// - Corruption detection: Validates JSON on load
// - Automatic backup: Keeps .backup of last known good file
// - Recovery: Falls back to backup if corruption detected
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "credentials": {
//     "email": "john.doe@example.com",
//     "token": "..."
//   },
//   "saved_at": "2025-01-09T12:00:00Z"
// }
// ```
//
// On unix the file is created with mode 0600.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::Error;
use crate::credentials::ApiCredentials;
use crate::traits::credential_store::CredentialStore;

/// Credential file format version
const CREDENTIAL_FILE_VERSION: &str = "1.0";

/// File-based credential store with crash recovery
///
/// # Example
///
/// ```rust,no_run
/// use deens_core::credentials::ApiCredentials;
/// use deens_core::store::FileCredentialStore;
/// use deens_core::traits::CredentialStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileCredentialStore::new("/home/john/.config/deens/credentials.json").await?;
///
///     store
///         .save_credentials(&ApiCredentials::new("john.doe@example.com", "ApItOken")?)
///         .await?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    credentials: RwLock<Option<ApiCredentials>>,
}

/// Serializable credential file format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct CredentialFileFormat {
    version: String,
    credentials: Option<ApiCredentials>,
    #[serde(default)]
    saved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl FileCredentialStore {
    /// Create or load a file credential store
    ///
    /// This will:
    /// 1. Create parent directories if needed
    /// 2. Try to load the existing credential file
    /// 3. If it is corrupted, try the backup
    /// 4. If both fail, start empty
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::config(format!(
                    "Failed to create credential directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let credentials = Self::load_with_recovery(&path).await?;

        Ok(Self {
            path,
            credentials: RwLock::new(credentials),
        })
    }

    /// Path of the credential file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load credentials from file with automatic recovery
    async fn load_with_recovery(path: &Path) -> Result<Option<ApiCredentials>, Error> {
        match Self::load(path).await {
            Ok(credentials) => Ok(credentials),
            Err(Error::Json(e)) => {
                tracing::warn!(
                    "Credential file {} appears corrupted: {}. Attempting recovery from backup.",
                    path.display(),
                    e
                );

                let backup_path = Self::backup_path(path);
                if !backup_path.exists() {
                    tracing::warn!("No backup file found. Starting without credentials.");
                    return Ok(None);
                }

                match Self::load(&backup_path).await {
                    Ok(credentials) => {
                        tracing::info!("Recovered credentials from backup");

                        if let Err(restore_err) = fs::copy(&backup_path, path).await {
                            tracing::error!(
                                "Failed to restore credential file from backup: {}",
                                restore_err
                            );
                        }

                        Ok(credentials)
                    }
                    Err(backup_err) => {
                        tracing::error!(
                            "Backup also corrupted: {}. Starting without credentials.",
                            backup_err
                        );
                        Ok(None)
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Load credentials from file
    async fn load(path: &Path) -> Result<Option<ApiCredentials>, Error> {
        if !path.exists() {
            tracing::debug!("Credential file does not exist: {}", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::credential_store(format!(
                "Failed to read credential file {}: {}",
                path.display(),
                e
            ))
        })?;

        let file: CredentialFileFormat = serde_json::from_str(&content)?;

        if file.version != CREDENTIAL_FILE_VERSION {
            tracing::warn!(
                "Credential file version mismatch: expected {}, got {}. Attempting to load anyway.",
                CREDENTIAL_FILE_VERSION,
                file.version
            );
        }

        Ok(file.credentials)
    }

    /// Write the file atomically
    async fn write(&self, credentials: Option<&ApiCredentials>) -> Result<(), Error> {
        let file = CredentialFileFormat {
            version: CREDENTIAL_FILE_VERSION.to_string(),
            credentials: credentials.cloned(),
            saved_at: Some(chrono::Utc::now()),
        };

        let json = serde_json::to_string_pretty(&file)?;

        let temp_path = self.temp_path();
        {
            let mut out = fs::File::create(&temp_path).await.map_err(|e| {
                Error::credential_store(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            restrict_permissions(&temp_path).await?;

            out.write_all(json.as_bytes()).await.map_err(|e| {
                Error::credential_store(format!(
                    "Failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            out.flush().await.map_err(|e| {
                Error::credential_store(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        if self.path.exists() {
            let backup_path = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                tracing::warn!("Failed to create backup: {}", e);
            }
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::credential_store(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("Credentials written to file: {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .await
        .map_err(|e| {
            Error::credential_store(format!(
                "Failed to restrict permissions of {}: {}",
                path.display(),
                e
            ))
        })
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), Error> {
    Ok(())
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get_credentials(&self) -> Result<Option<ApiCredentials>, Error> {
        Ok(self.credentials.read().await.clone())
    }

    async fn save_credentials(&self, credentials: &ApiCredentials) -> Result<(), Error> {
        let mut guard = self.credentials.write().await;
        self.write(Some(credentials)).await?;
        *guard = Some(credentials.clone());
        Ok(())
    }

    async fn delete_credentials(&self) -> Result<(), Error> {
        let mut guard = self.credentials.write().await;

        for path in [self.path.clone(), Self::backup_path(&self.path)] {
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(Error::credential_store(format!(
                        "Failed to remove {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }

        *guard = None;
        Ok(())
    }
}
