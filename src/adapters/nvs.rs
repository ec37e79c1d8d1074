//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`ConfigStore`] as a tiny byte-addressable memory: one `u8`
//! key per slot address (`addr0`, `addr1`) in the `smokefan` namespace,
//! committed on every write.  A key that was never written reads back as
//! the configured erased value, the way an unprogrammed EEPROM cell would.
//!
//! On non-espidf targets the store is an in-memory map (dev/test only).

use crate::app::ports::{ConfigStore, Slot, StorageError};
use log::info;

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::warn;

const CONFIG_NAMESPACE: &str = "smokefan";

pub struct NvsAdapter {
    erased_value: u8,
    #[cfg(not(target_os = "espidf"))]
    store: HashMap<String, u8>,
}

impl NvsAdapter {
    /// Create a new NvsAdapter and initialise NVS flash.
    ///
    /// On first boot or after a version mismatch the NVS partition is erased
    /// and re-initialised automatically, which resets both limits to
    /// `erased_value`.
    pub fn new(erased_value: u8) -> Result<Self, StorageError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(StorageError::InitFailed);
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(StorageError::InitFailed);
                }
            } else if ret != ESP_OK {
                return Err(StorageError::InitFailed);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            erased_value,
            #[cfg(not(target_os = "espidf"))]
            store: HashMap::new(),
        })
    }

    pub fn erased_value(&self) -> u8 {
        self.erased_value
    }

    /// NUL-terminated key for a slot address, e.g. `addr1\0`.
    fn slot_key(slot: Slot) -> [u8; 8] {
        let mut key = *b"addr0\0\0\0";
        key[4] = b'0' + slot.address();
        key
    }

    #[cfg(not(target_os = "espidf"))]
    fn composite_key(slot: Slot) -> String {
        let key = Self::slot_key(slot);
        let len = key.iter().position(|&b| b == 0).unwrap_or(key.len());
        format!(
            "{}::{}",
            CONFIG_NAMESPACE,
            String::from_utf8_lossy(&key[..len])
        )
    }

    /// Open the config namespace, execute a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = CONFIG_NAMESPACE.as_bytes();
        let len = ns_bytes.len().min(15);
        ns_buf[..len].copy_from_slice(&ns_bytes[..len]);

        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }
}

impl ConfigStore for NvsAdapter {
    fn read(&self, slot: Slot) -> Result<u8, StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            let value = self.store.get(&Self::composite_key(slot)).copied();
            Ok(value.unwrap_or(self.erased_value))
        }

        #[cfg(target_os = "espidf")]
        {
            let key = Self::slot_key(slot);
            let result = Self::with_nvs_handle(false, |handle| {
                let mut value: u8 = 0;
                let ret = unsafe { nvs_get_u8(handle, key.as_ptr() as *const _, &mut value) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(value)
            });
            match result {
                Ok(value) => Ok(value),
                // A fresh namespace does not exist yet, so opening it
                // read-only fails the same way a missing key does.
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND => Ok(self.erased_value),
                Err(e) => {
                    warn!("NvsAdapter: read {:?} failed ({})", slot, e);
                    Err(StorageError::IoError)
                }
            }
        }
    }

    fn write(&mut self, slot: Slot, value: u8) -> Result<(), StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            self.store.insert(Self::composite_key(slot), value);
            info!("NvsAdapter: {:?} <- {} (simulation)", slot, value);
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            let key = Self::slot_key(slot);
            let result = Self::with_nvs_handle(true, |handle| {
                let ret = unsafe { nvs_set_u8(handle, key.as_ptr() as *const _, value) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(())
            });
            match result {
                Ok(()) => {
                    info!("NvsAdapter: {:?} <- {}", slot, value);
                    Ok(())
                }
                Err(e) if e == ESP_ERR_NVS_NOT_ENOUGH_SPACE => Err(StorageError::Full),
                Err(e) => {
                    warn!("NvsAdapter: write {:?} failed ({})", slot, e);
                    Err(StorageError::IoError)
                }
            }
        }
    }
}
