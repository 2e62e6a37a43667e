use std::sync::Arc;

use solana_sdk::{
    pubkey::Pubkey,
    signature::Signature,
    signer::{Signer, SignerError},
};

/// Signer that can be shared between threads.
pub struct DynSigner(Box<dyn Signer + Send + Sync>);

impl Signer for DynSigner {
    fn pubkey(&self) -> Pubkey {
        self.0.pubkey()
    }

    fn try_pubkey(&self) -> Result<Pubkey, SignerError> {
        self.0.try_pubkey()
    }

    fn sign_message(&self, message: &[u8]) -> Signature {
        self.0.sign_message(message)
    }

    fn try_sign_message(&self, message: &[u8]) -> Result<Signature, SignerError> {
        self.0.try_sign_message(message)
    }

    fn is_interactive(&self) -> bool {
        self.0.is_interactive()
    }
}

/// Shared Signer.
pub type SignerRef = Arc<DynSigner>;

/// Create a new shared signer.
pub fn shared_signer(signer: impl Signer + Send + Sync + 'static) -> SignerRef {
    SignerRef::new(DynSigner(Box::new(signer)))
}

#[cfg(test)]
mod tests {
    use solana_sdk::signature::Keypair;

    use super::*;

    #[test]
    fn shared_signer_signs_as_inner() {
        let keypair = Keypair::new();
        let pubkey = keypair.pubkey();
        let message = b"order-manager";
        let expected = keypair.sign_message(message);

        let signer = shared_signer(keypair);
        let cloned = signer.clone();
        assert_eq!(cloned.pubkey(), pubkey);
        assert_eq!(cloned.sign_message(message), expected);
        assert!(expected.verify(pubkey.as_ref(), message));
    }
}
