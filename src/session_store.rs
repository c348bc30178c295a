//! Persistent session-token storage for Loomport clients.
//!
//! Login tokens are valid for many hours; caching one in `loomport.toml`
//! lets CLI tooling and repeated test runs skip the login round trip. The
//! token lives in the `[session]` table and is the only key this store
//! touches.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use ortho_config::ConfigDiscovery;
use thiserror::Error;

use ortho_config::toml;

const APP_NAME: &str = "loomport";
const CONFIG_ENV_VAR: &str = "LOOMPORT_CONFIG_PATH";
const CONFIG_FILE_NAME: &str = "loomport.toml";
const DOTFILE_NAME: &str = ".loomport.toml";
const PROJECT_FILE_NAME: &str = "loomport.toml";
const SESSION_SECTION: &str = "session";
const TOKEN_KEY: &str = "token";

/// Errors raised while reading or updating the session file.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Raised when no configuration candidates are available.
    #[error("no configuration file candidates were discovered")]
    NoCandidates,
    /// Raised when file system operations fail.
    #[error("failed to access {path}: {message}")]
    Io {
        /// Path that could not be accessed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when parsing existing TOML content fails.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path that could not be parsed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when existing TOML has an unexpected structure.
    #[error("invalid configuration in {path}: {message}")]
    InvalidStructure {
        /// Path that had invalid content.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
}

/// Reads and writes the cached session token in `loomport.toml`, using
/// `OrthoConfig`'s discovery search order.
#[derive(Clone, Debug)]
pub struct SessionStore {
    discovery: ConfigDiscovery,
}

impl SessionStore {
    /// Builds a store using the standard Loomport discovery settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            discovery: ConfigDiscovery::builder(APP_NAME)
                .env_var(CONFIG_ENV_VAR)
                .config_file_name(CONFIG_FILE_NAME)
                .dotfile_name(DOTFILE_NAME)
                .project_file_name(PROJECT_FILE_NAME)
                .build(),
        }
    }

    /// Builds a store using an explicit discovery configuration.
    #[must_use]
    pub const fn with_discovery(discovery: ConfigDiscovery) -> Self {
        Self { discovery }
    }

    fn resolve_target(&self) -> Result<StoreTarget, SessionStoreError> {
        let candidates = self.discovery.utf8_candidates();
        if candidates.is_empty() {
            return Err(SessionStoreError::NoCandidates);
        }

        for candidate in &candidates {
            if path_exists(candidate)? {
                return Ok(StoreTarget {
                    path: candidate.clone(),
                    exists: true,
                });
            }
        }

        let fallback = candidates
            .last()
            .cloned()
            .ok_or(SessionStoreError::NoCandidates)?;
        Ok(StoreTarget {
            path: fallback,
            exists: false,
        })
    }

    /// Returns the cached session token, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] when the file cannot be accessed or
    /// parsed.
    pub fn current_token(&self) -> Result<Option<String>, SessionStoreError> {
        let target = self.resolve_target()?;
        if !target.exists {
            return Ok(None);
        }

        let contents = read_store(&target.path)?;
        let value = parse_toml(&target.path, &contents)?;
        read_token(&target.path, &value)
    }

    /// Writes the session token, replacing any previous value, and returns
    /// the path written.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] when reading or updating the file
    /// fails.
    pub fn write_token(&self, token: &str) -> Result<Utf8PathBuf, SessionStoreError> {
        let target = self.resolve_target()?;
        let contents = if target.exists {
            read_store(&target.path)?
        } else {
            String::new()
        };

        let mut value = parse_toml(&target.path, &contents)?;
        write_token_value(&target.path, &mut value, token)?;
        write_store(&target.path, &value)?;
        Ok(target.path)
    }

    /// Removes the cached token, returning the path that was updated when a
    /// token was present.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] when reading or updating the file
    /// fails.
    pub fn clear_token(&self) -> Result<Option<Utf8PathBuf>, SessionStoreError> {
        let target = self.resolve_target()?;
        if !target.exists {
            return Ok(None);
        }

        let contents = read_store(&target.path)?;
        let mut value = parse_toml(&target.path, &contents)?;
        if remove_token_value(&target.path, &mut value)? {
            write_store(&target.path, &value)?;
            return Ok(Some(target.path));
        }
        Ok(None)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct StoreTarget {
    path: Utf8PathBuf,
    exists: bool,
}

fn split_path(path: &Utf8Path) -> Result<(&Utf8Path, &str), SessionStoreError> {
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| SessionStoreError::InvalidStructure {
            path: path.to_path_buf(),
            message: String::from("session file path is missing a filename"),
        })?;
    Ok((parent, file_name))
}

fn path_exists(path: &Utf8Path) -> Result<bool, SessionStoreError> {
    let (parent, file_name) = split_path(path)?;
    match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir
            .try_exists(file_name)
            .map_err(|err| SessionStoreError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(SessionStoreError::Io {
            path: parent.to_path_buf(),
            message: err.to_string(),
        }),
    }
}

fn read_store(path: &Utf8Path) -> Result<String, SessionStoreError> {
    let (parent, file_name) = split_path(path)?;
    let dir =
        Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| SessionStoreError::Io {
            path: parent.to_path_buf(),
            message: err.to_string(),
        })?;

    dir.read_to_string(file_name)
        .map_err(|err| SessionStoreError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

fn parse_toml(path: &Utf8Path, contents: &str) -> Result<toml::Value, SessionStoreError> {
    if contents.trim().is_empty() {
        return Ok(toml::Value::Table(toml::value::Table::new()));
    }

    toml::from_str(contents).map_err(|err| SessionStoreError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn session_table<'a>(
    path: &Utf8Path,
    value: &'a toml::Value,
) -> Result<Option<&'a toml::value::Table>, SessionStoreError> {
    let table = value
        .as_table()
        .ok_or_else(|| SessionStoreError::InvalidStructure {
            path: path.to_path_buf(),
            message: String::from("session file root is not a table"),
        })?;

    let Some(section) = table.get(SESSION_SECTION) else {
        return Ok(None);
    };

    section
        .as_table()
        .map(Some)
        .ok_or_else(|| SessionStoreError::InvalidStructure {
            path: path.to_path_buf(),
            message: format!("[{SESSION_SECTION}] must be a table"),
        })
}

fn read_token(path: &Utf8Path, value: &toml::Value) -> Result<Option<String>, SessionStoreError> {
    let Some(section) = session_table(path, value)? else {
        return Ok(None);
    };

    section.get(TOKEN_KEY).map_or(Ok(None), |raw| {
        raw.as_str()
            .map(|token| Some(token.trim().to_owned()))
            .ok_or_else(|| SessionStoreError::InvalidStructure {
                path: path.to_path_buf(),
                message: format!("{SESSION_SECTION}.{TOKEN_KEY} must be a string"),
            })
    })
}

fn write_token_value(
    path: &Utf8Path,
    value: &mut toml::Value,
    token: &str,
) -> Result<(), SessionStoreError> {
    let table = value
        .as_table_mut()
        .ok_or_else(|| SessionStoreError::InvalidStructure {
            path: path.to_path_buf(),
            message: String::from("session file root is not a table"),
        })?;

    let section = table
        .entry(String::from(SESSION_SECTION))
        .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));

    let section_table =
        section
            .as_table_mut()
            .ok_or_else(|| SessionStoreError::InvalidStructure {
                path: path.to_path_buf(),
                message: format!("[{SESSION_SECTION}] must be a table"),
            })?;

    section_table.insert(
        String::from(TOKEN_KEY),
        toml::Value::String(token.trim().to_owned()),
    );
    Ok(())
}

fn remove_token_value(
    path: &Utf8Path,
    value: &mut toml::Value,
) -> Result<bool, SessionStoreError> {
    let table = value
        .as_table_mut()
        .ok_or_else(|| SessionStoreError::InvalidStructure {
            path: path.to_path_buf(),
            message: String::from("session file root is not a table"),
        })?;

    let Some(section) = table.get_mut(SESSION_SECTION) else {
        return Ok(false);
    };

    let section_table =
        section
            .as_table_mut()
            .ok_or_else(|| SessionStoreError::InvalidStructure {
                path: path.to_path_buf(),
                message: format!("[{SESSION_SECTION}] must be a table"),
            })?;

    Ok(section_table.remove(TOKEN_KEY).is_some())
}

fn write_store(path: &Utf8Path, value: &toml::Value) -> Result<(), SessionStoreError> {
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(|err| {
        SessionStoreError::Io {
            path: parent.to_path_buf(),
            message: err.to_string(),
        }
    })?;

    let (_, file_name) = split_path(path)?;
    let dir =
        Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| SessionStoreError::Io {
            path: parent.to_path_buf(),
            message: err.to_string(),
        })?;

    let rendered = toml::to_string_pretty(value).map_err(|err| SessionStoreError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    dir.write(file_name, rendered)
        .map_err(|err| SessionStoreError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn discovery_for_path(path: &Utf8Path) -> ConfigDiscovery {
        let root = path
            .parent()
            .expect("temp path should have a parent directory");
        ConfigDiscovery::builder(APP_NAME)
            .env_var(CONFIG_ENV_VAR)
            .config_file_name(CONFIG_FILE_NAME)
            .dotfile_name(DOTFILE_NAME)
            .project_file_name(PROJECT_FILE_NAME)
            .clear_project_roots()
            .add_project_root(root)
            .build()
    }

    fn temp_store_path(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().join("loomport.toml"))
            .unwrap_or_else(|err| panic!("temp path should be utf8: {}", err.display()))
    }

    #[test]
    fn write_token_creates_session_file() {
        let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = temp_store_path(&tmp);
        let store = SessionStore::with_discovery(discovery_for_path(&path));

        let written_path = store
            .write_token("tok-123")
            .unwrap_or_else(|err| panic!("write token: {err}"));

        assert_eq!(written_path, path);
        let token = store
            .current_token()
            .unwrap_or_else(|err| panic!("read token: {err}"));
        assert_eq!(token, Some(String::from("tok-123")));
    }

    #[test]
    fn write_token_replaces_previous_value() {
        let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = temp_store_path(&tmp);
        let store = SessionStore::with_discovery(discovery_for_path(&path));
        store
            .write_token("tok-123")
            .unwrap_or_else(|err| panic!("seed token: {err}"));

        store
            .write_token("tok-456")
            .unwrap_or_else(|err| panic!("replace token: {err}"));

        let token = store
            .current_token()
            .unwrap_or_else(|err| panic!("read token: {err}"));
        assert_eq!(token, Some(String::from("tok-456")));
    }

    #[test]
    fn current_token_is_none_without_a_file() {
        let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = temp_store_path(&tmp);
        let store = SessionStore::with_discovery(discovery_for_path(&path));

        let token = store
            .current_token()
            .unwrap_or_else(|err| panic!("read token: {err}"));
        assert_eq!(token, None);
    }

    #[test]
    fn clear_token_removes_the_cached_value() {
        let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = temp_store_path(&tmp);
        let store = SessionStore::with_discovery(discovery_for_path(&path));
        store
            .write_token("tok-123")
            .unwrap_or_else(|err| panic!("seed token: {err}"));

        let cleared = store
            .clear_token()
            .unwrap_or_else(|err| panic!("clear token: {err}"));
        assert_eq!(cleared, Some(path));

        let token = store
            .current_token()
            .unwrap_or_else(|err| panic!("read token: {err}"));
        assert_eq!(token, None);
    }

    #[test]
    fn clear_token_without_a_token_is_a_no_op() {
        let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = temp_store_path(&tmp);
        let store = SessionStore::with_discovery(discovery_for_path(&path));

        let cleared = store
            .clear_token()
            .unwrap_or_else(|err| panic!("clear token: {err}"));
        assert_eq!(cleared, None);
    }

    #[test]
    fn malformed_session_file_surfaces_parse_error() {
        let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = temp_store_path(&tmp);
        std::fs::write(&path, "not [valid toml").unwrap_or_else(|err| panic!("seed file: {err}"));
        let store = SessionStore::with_discovery(discovery_for_path(&path));

        let err = store
            .current_token()
            .expect_err("malformed TOML should fail");
        assert!(
            matches!(err, SessionStoreError::Parse { .. }),
            "unexpected error: {err:?}"
        );
    }
}
