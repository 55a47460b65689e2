//! Key-value persistence for board state.
//!
//! Values are stored as JSON strings. Reads never fail: a missing or
//! unreadable value yields the caller's default. Writes are last-write-wins
//! with no transactions.

use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
	/// No storage backend is available (e.g. storage disabled by the browser).
	#[error("storage unavailable")]
	Unavailable,

	#[error("failed to serialize value: {0}")]
	Serialize(#[from] serde_json::Error),

	/// The backend rejected the write.
	#[error("storage write failed: {0}")]
	Backend(String),
}

/// Raw string storage backend.
pub trait KeyValueStore {
	fn get_raw(&self, key: &str) -> Option<String>;

	fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;

	/// Read `key`, falling back to `default` when absent or unparseable.
	fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T
	where
		Self: Sized,
	{
		let Some(raw) = self.get_raw(key) else {
			return default;
		};
		match serde_json::from_str(&raw) {
			Ok(value) => value,
			Err(e) => {
				warn!("board-store: ignoring unreadable value for {key}: {e}");
				default
			}
		}
	}

	fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>
	where
		Self: Sized,
	{
		let raw = serde_json::to_string(value)?;
		self.set_raw(key, &raw)
	}

	/// Read-modify-write: apply `updater` to the current value (or `default`)
	/// and store the result, which is also returned.
	fn update<T, F>(&self, key: &str, default: T, updater: F) -> Result<T, StorageError>
	where
		Self: Sized,
		T: Serialize + DeserializeOwned,
		F: FnOnce(T) -> T,
	{
		let next = updater(self.get(key, default));
		self.set(key, &next)?;
		Ok(next)
	}
}

/// In-process store. Used in tests and as a fallback when browser storage
/// is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
	values: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
	fn get_raw(&self, key: &str) -> Option<String> {
		self.values.borrow().get(key).cloned()
	}

	fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.values
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// `window.localStorage`.
#[derive(Clone, Debug)]
pub struct BrowserStore {
	storage: web_sys::Storage,
}

impl BrowserStore {
	pub fn open() -> Result<Self, StorageError> {
		let storage = web_sys::window()
			.ok_or(StorageError::Unavailable)?
			.local_storage()
			.map_err(|e| StorageError::Backend(format!("{e:?}")))?
			.ok_or(StorageError::Unavailable)?;
		Ok(Self { storage })
	}
}

impl KeyValueStore for BrowserStore {
	fn get_raw(&self, key: &str) -> Option<String> {
		self.storage.get_item(key).ok().flatten()
	}

	fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.storage
			.set_item(key, value)
			.map_err(|e| StorageError::Backend(format!("{e:?}")))
	}
}

/// Whichever backend could be opened.
#[derive(Debug)]
pub enum AnyStore {
	Browser(BrowserStore),
	Memory(MemoryStore),
}

impl AnyStore {
	/// Browser storage when available, memory otherwise.
	pub fn open() -> Self {
		match BrowserStore::open() {
			Ok(store) => AnyStore::Browser(store),
			Err(e) => {
				warn!("board-store: {e}; changes will not persist");
				AnyStore::Memory(MemoryStore::default())
			}
		}
	}
}

impl KeyValueStore for AnyStore {
	fn get_raw(&self, key: &str) -> Option<String> {
		match self {
			AnyStore::Browser(s) => s.get_raw(key),
			AnyStore::Memory(s) => s.get_raw(key),
		}
	}

	fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
		match self {
			AnyStore::Browser(s) => s.set_raw(key, value),
			AnyStore::Memory(s) => s.set_raw(key, value),
		}
	}
}
