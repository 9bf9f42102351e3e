//! Windows Credential Manager backend.
//!
//! Each entry is a generic credential whose target name encodes the scope:
//! `<service>/<key>` or `<service>@<group>/<key>`, with `%`, `@` and `/`
//! percent-escaped inside each part.
//!
//! Credential Manager caps blobs at 2560 bytes; larger values are rejected by
//! `CredWriteW` with `ERROR_INVALID_PARAMETER` and surface as encoding failures.

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;

use windows::core::{Error as WinError, HRESULT, PCWSTR, PWSTR};
use windows::Win32::Security::Credentials::{
    CredDeleteW, CredFree, CredReadW, CredWriteW, CREDENTIALW, CRED_PERSIST_LOCAL_MACHINE,
    CRED_TYPE_GENERIC,
};

use super::address::credential_target;
use super::{CredentialBackend, FailureKind};
use crate::scope::StoreScope;

// Win32 error codes
const ERROR_NOT_FOUND: u32 = 1168;
const ERROR_NO_SUCH_LOGON_SESSION: u32 = 1312;
const ERROR_ACCESS_DENIED: u32 = 5;
const ERROR_INVALID_PARAMETER: u32 = 87;
const ERROR_BAD_USERNAME: u32 = 2202;

/// Credential Manager-backed [`CredentialBackend`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialManagerBackend;

fn target_name(scope: &StoreScope, key: &str) -> Vec<u16> {
    OsStr::new(&credential_target(scope, key))
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

fn is_win32(error: &WinError, code: u32) -> bool {
    error.code() == HRESULT::from_win32(code)
}

impl CredentialBackend for CredentialManagerBackend {
    type Error = WinError;

    fn read(&self, scope: &StoreScope, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let target = target_name(scope, key);

        unsafe {
            let mut credential_ptr = std::ptr::null_mut();
            match CredReadW(
                PCWSTR(target.as_ptr()),
                CRED_TYPE_GENERIC,
                0,
                &mut credential_ptr,
            ) {
                Ok(()) => {
                    let credential: &CREDENTIALW = &*credential_ptr;
                    let data = if credential.CredentialBlobSize == 0 {
                        Vec::new()
                    } else {
                        std::slice::from_raw_parts(
                            credential.CredentialBlob,
                            credential.CredentialBlobSize as usize,
                        )
                        .to_vec()
                    };
                    CredFree(credential_ptr as *const std::ffi::c_void);
                    Ok(Some(data))
                }
                Err(e) if is_win32(&e, ERROR_NOT_FOUND) => Ok(None),
                Err(e) => Err(e),
            }
        }
    }

    fn write(&self, scope: &StoreScope, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let mut target = target_name(scope, key);

        let credential = CREDENTIALW {
            Type: CRED_TYPE_GENERIC,
            TargetName: PWSTR(target.as_mut_ptr()),
            CredentialBlobSize: value.len() as u32,
            CredentialBlob: value.as_ptr() as *mut u8,
            Persist: CRED_PERSIST_LOCAL_MACHINE,
            ..Default::default()
        };

        // CredWriteW replaces an existing credential with the same target
        unsafe { CredWriteW(&credential, 0) }
    }

    fn delete(&self, scope: &StoreScope, key: &str) -> Result<(), Self::Error> {
        let target = target_name(scope, key);

        match unsafe { CredDeleteW(PCWSTR(target.as_ptr()), CRED_TYPE_GENERIC, 0) } {
            Err(e) if is_win32(&e, ERROR_NOT_FOUND) => Ok(()),
            other => other,
        }
    }

    fn classify(error: &Self::Error) -> FailureKind {
        if is_win32(error, ERROR_NO_SUCH_LOGON_SESSION) || is_win32(error, ERROR_ACCESS_DENIED) {
            FailureKind::Unavailable
        } else if is_win32(error, ERROR_INVALID_PARAMETER) || is_win32(error, ERROR_BAD_USERNAME)
        {
            FailureKind::Encoding
        } else {
            FailureKind::Other
        }
    }
}
