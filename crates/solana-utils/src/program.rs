use std::ops::Deref;

use solana_sdk::{pubkey::Pubkey, signer::Signer};

use crate::{config::Config, transaction_builder::TransactionBuilder};

/// A deployed program together with the wallet config used to talk to it.
#[derive(Clone)]
pub struct Program<C> {
    program_id: Pubkey,
    cfg: Config<C>,
}

impl<C> Program<C> {
    /// Create a new [`Program`].
    pub fn new(program_id: Pubkey, cfg: Config<C>) -> Self {
        Self { program_id, cfg }
    }

    /// Get the program id.
    pub fn id(&self) -> &Pubkey {
        &self.program_id
    }
}

impl<C: Deref<Target = impl Signer> + Clone> Program<C> {
    /// Create a [`TransactionBuilder`] for an instruction of this program.
    pub fn transaction(&self) -> TransactionBuilder<C> {
        TransactionBuilder::new(self.program_id, &self.cfg)
    }
}
