use crate::error::{Result, TypesError};
use sha2::{Digest, Sha256};

/// XRPL's base58 alphabet (ripple/Bitcoin-style, but reshuffled to discourage confusion between
/// ripple and other ledger addresses).
const XRPL_ALPHABET: bs58::Alphabet = match bs58::Alphabet::new(
    b"rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz",
) {
    Ok(a) => a,
    Err(_) => panic!("invalid xrpl base58 alphabet"),
};

/// Version byte prefixed to a classic (non-X-address) account id before base58 encoding.
const ACCOUNT_ID_VERSION: u8 = 0x00;

/// A 20-byte XRPL account identifier, decoded from (or destined for) a classic `r...` address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId([u8; 20]);

impl AccountId {
    /// Wrap a raw 20-byte account id.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The raw 20 bytes of this account id.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Decode a classic XRPL address (`rXXXX...`) into its 20-byte account id, verifying the
    /// trailing double-SHA256 checksum.
    pub fn from_classic_address(address: &str) -> Result<Self> {
        let decoded = bs58::decode(address)
            .with_alphabet(&XRPL_ALPHABET)
            .into_vec()
            .map_err(|e| TypesError::InvalidBase58(e.to_string()))?;

        if decoded.len() != 25 {
            return Err(TypesError::InvalidAccountIdLength(decoded.len()));
        }

        let (payload, checksum) = decoded.split_at(21);
        let expected = double_sha256(payload);
        if &expected[..4] != checksum {
            return Err(TypesError::BadChecksum);
        }

        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&payload[1..]);
        Ok(Self(bytes))
    }

    /// Encode this account id back into a classic base58 address, for logging and round-trip tests.
    pub fn to_classic_address(&self) -> String {
        let mut payload = Vec::with_capacity(25);
        payload.push(ACCOUNT_ID_VERSION);
        payload.extend_from_slice(&self.0);
        let checksum = double_sha256(&payload);
        payload.extend_from_slice(&checksum[..4]);
        bs58::encode(payload).with_alphabet(&XRPL_ALPHABET).into_string()
    }
}

impl std::fmt::Debug for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccountId").field(&self.to_classic_address()).finish()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_classic_address())
    }
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_classic_address() {
        // well-known XRPL genesis account
        let address = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
        let id = AccountId::from_classic_address(address).unwrap();
        assert_eq!(id.to_classic_address(), address);
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut address: Vec<char> = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".chars().collect();
        let last = address.len() - 1;
        address[last] = if address[last] == 'h' { 'j' } else { 'h' };
        let tampered: String = address.into_iter().collect();
        assert!(AccountId::from_classic_address(&tampered).is_err());
    }
}
