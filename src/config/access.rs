use super::*;
use crate::Value;

impl KerConfig {
    /// Get a typed value from the configuration using dot notation.
    ///
    /// Numeric segments index into arrays (`servers.0.host`), and each segment
    /// also matches its `snake_case` or `kebab-case` spelling.
    ///
    /// # Examples
    /// ```
    /// # use ker::KerConfig;
    /// let config = KerConfig::from_str("server { host = \"localhost\" port = 8080 }")?;
    /// let host: String = config.get("server.host")?;
    /// let port: u16 = config.get("server.port")?;
    /// assert_eq!((host.as_str(), port), ("localhost", 8080));
    /// # Ok::<(), ker::KerError>(())
    /// ```
    ///
    /// # Errors
    /// Returns `PathNotFound` if the path doesn't exist, or `TypeError` if the
    /// value can't be converted to `T`.
    pub fn get<T>(&self, path: &str) -> Result<T, KerError>
    where
        T: TryFrom<Value, Error = KerError>,
    {
        let value = self.get_value(path)?;
        T::try_from(value).map_err(|e| with_path(e, path))
    }

    /// Like [`get`](Self::get), but a missing path or a `null` value gives `None`.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, KerError>
    where
        T: TryFrom<Value, Error = KerError>,
    {
        match self.lookup(path) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::try_from(value.clone())
                .map(Some)
                .map_err(|e| with_path(e, path)),
        }
    }

    /// Get a value, falling back to `default` if it is missing or has the wrong type.
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = KerError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Get a raw `Value`. The empty path returns the whole document as a block.
    pub fn get_value(&self, path: &str) -> Result<Value, KerError> {
        if path.trim().is_empty() {
            return Ok(self.document.to_value());
        }
        self.lookup(path).cloned().ok_or_else(|| KerError::PathNotFound {
            path: path.to_string(),
            hint: Some("Check that the path exists in your config file".into()),
            code: Some(304),
        })
    }

    /// Keys of the block at `path`, in document order.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, KerError> {
        if path.trim().is_empty() {
            return Ok(self.document.keys().cloned().collect());
        }
        match self.lookup(path) {
            Some(Value::Block(block)) => Ok(block.keys().cloned().collect()),
            Some(other) => Err(KerError::type_error(
                format!("Path '{}' is a {}, not a block", path, other.type_name()),
                Some("Only blocks have keys".into()),
            )),
            None => Err(KerError::PathNotFound {
                path: path.to_string(),
                hint: None,
                code: Some(304),
            }),
        }
    }

    /// Check if a configuration path exists.
    pub fn has(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = find_key(&self.document.entries, first)?;

        for seg in segments {
            current = match current {
                Value::Block(block) => find_key(block, seg)?,
                Value::Array(items) => items.get(seg.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Exact key first, then the `snake_case` and `kebab-case` spellings.
fn find_key<'a>(block: &'a crate::ast::Block, seg: &str) -> Option<&'a Value> {
    block
        .get(seg)
        .or_else(|| block.get(&seg.replace('-', "_")))
        .or_else(|| block.get(&seg.replace('_', "-")))
}

fn with_path(e: KerError, path: &str) -> KerError {
    match e {
        KerError::TypeError { message, hint, code } => KerError::TypeError {
            message: format!("{} at `{}`", message, path),
            hint,
            code,
        },
        other => other,
    }
}
