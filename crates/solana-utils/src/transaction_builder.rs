use std::ops::Deref;

use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signer::Signer,
    transaction::VersionedTransaction,
};

#[cfg(anchor)]
use anchor_lang::prelude::*;

use crate::config::Config;

/// A builder for a single-instruction transaction signed by the payer.
#[must_use = "transaction builder do nothing if not built"]
#[derive(Clone)]
pub struct TransactionBuilder<C> {
    program_id: Pubkey,
    cfg: Config<C>,
    accounts: Vec<AccountMeta>,
    instruction_data: Option<Vec<u8>>,
}

impl<C: Deref<Target = impl Signer> + Clone> TransactionBuilder<C> {
    /// Create a new transaction builder.
    pub fn new(program_id: Pubkey, cfg: &Config<C>) -> Self {
        Self {
            program_id,
            cfg: cfg.clone(),
            accounts: Default::default(),
            instruction_data: None,
        }
    }

    /// Append accounts for the instruction.
    pub fn accounts(mut self, mut accounts: Vec<AccountMeta>) -> Self {
        self.accounts.append(&mut accounts);
        self
    }

    /// Append accounts for the instruction.
    #[cfg(anchor)]
    pub fn anchor_accounts(self, accounts: impl ToAccountMetas) -> Self {
        self.accounts(accounts.to_account_metas(None))
    }

    /// Set arguments for the instruction.
    pub fn args(mut self, args: Vec<u8>) -> Self {
        self.instruction_data = Some(args);
        self
    }

    /// Set arguments for the instruction.
    #[cfg(anchor)]
    pub fn anchor_args(self, args: impl anchor_lang::InstructionData) -> Self {
        self.args(args.data())
    }

    /// Construct the instruction, `None` if no arguments were set.
    pub fn instruction(&self) -> Option<Instruction> {
        let ix_data = self.instruction_data.as_ref()?;
        Some(Instruction {
            program_id: self.program_id,
            data: ix_data.clone(),
            accounts: self.accounts.clone(),
        })
    }

    /// Get versioned message with the given blockhash.
    pub fn message_with_blockhash(&self, latest_hash: Hash) -> crate::Result<VersionedMessage> {
        let instructions = Vec::from_iter(self.instruction());
        let message =
            v0::Message::try_compile(&self.cfg.payer(), &instructions, &[], latest_hash)?;
        Ok(VersionedMessage::V0(message))
    }

    /// Get the transaction signed by the payer alone.
    pub fn signed_transaction_with_blockhash(
        &self,
        latest_hash: Hash,
    ) -> crate::Result<VersionedTransaction> {
        let message = self.message_with_blockhash(latest_hash)?;
        let signers: Vec<&dyn Signer> = vec![&**self.cfg.payer_ref()];
        let tx = VersionedTransaction::try_new(message, &signers)?;
        Ok(tx)
    }
}
