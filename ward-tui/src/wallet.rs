//! Wallet collaborator seam. Signature rejection is a typed error rather
//! than a substring match on the provider's message.

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::signer::keypair::{read_keypair_file, Keypair};
use solana_sdk::signer::Signer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("signature request cancelled by user")]
    UserCancelled,

    #[error("wallet transport failure: {0}")]
    Transport(String),
}

pub trait Wallet {
    fn connected(&self) -> bool;
    fn pubkey(&self) -> Option<Pubkey>;
    fn sign_message(&self, message: &[u8]) -> Result<Signature, WalletError>;
}

/// Local keypair-file wallet. A file-backed signer cannot cancel, but
/// interactive wallet adapters surface `UserCancelled` through the same
/// trait.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let keypair = read_keypair_file(path)
            .map_err(|e| anyhow::anyhow!("failed to read keypair file {path}: {e}"))?;
        Ok(Self { keypair })
    }
}

impl Wallet for KeypairWallet {
    fn connected(&self) -> bool {
        true
    }

    fn pubkey(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    fn sign_message(&self, message: &[u8]) -> Result<Signature, WalletError> {
        Ok(self.keypair.sign_message(message))
    }
}

/// Placeholder wallet shown before a keypair is configured.
pub struct DisconnectedWallet;

impl Wallet for DisconnectedWallet {
    fn connected(&self) -> bool {
        false
    }

    fn pubkey(&self) -> Option<Pubkey> {
        None
    }

    fn sign_message(&self, _message: &[u8]) -> Result<Signature, WalletError> {
        Err(WalletError::Transport("no wallet connected".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_wallet_signs() {
        let wallet = KeypairWallet {
            keypair: Keypair::new(),
        };
        assert!(wallet.connected());
        let signature = wallet.sign_message(b"Ward AI DAO Vote").unwrap();
        let pubkey = wallet.pubkey().unwrap();
        assert!(signature.verify(pubkey.as_ref(), b"Ward AI DAO Vote"));
    }

    #[test]
    fn test_disconnected_wallet_cannot_sign() {
        let wallet = DisconnectedWallet;
        assert!(!wallet.connected());
        assert!(matches!(
            wallet.sign_message(b"msg"),
            Err(WalletError::Transport(_))
        ));
    }
}
