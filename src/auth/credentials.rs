// src/auth/credentials.rs
use sha2::{Digest, Sha256};

/// Single back-office account. The password is kept only as a SHA-256 digest
/// and compared without early exit.
#[derive(Clone)]
pub struct AdminCredentials {
    login: String,
    password_hash: [u8; 32],
}

impl AdminCredentials {
    pub fn new(login: &str, password: &str) -> Self {
        Self {
            login: login.trim().to_string(),
            password_hash: sha256(password),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn verify(&self, login: &str, password: &str) -> bool {
        let login_ok = digests_equal(&sha256(login.trim()), &sha256(&self.login));
        let password_ok = digests_equal(&sha256(password), &self.password_hash);
        login_ok & password_ok
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

pub(crate) fn sha256(input: &str) -> [u8; 32] {
    let out = Sha256::digest(input.as_bytes());
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

/// Constant-time-ish compare for digests.
pub(crate) fn digests_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}
