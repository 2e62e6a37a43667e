use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use ordermgr_programs::{
    anchor_lang::{AccountDeserialize, AccountSerialize},
    instruction::SetOrderState,
    ConfigState, OrderManagerError, OrderState, OrderStatus,
};
use ordermgr_solana_utils::{config::DEFAULT_CONFIRM_TIMEOUT, utils::WithSlot};
use solana_client::rpc_filter::RpcFilterType;
use solana_sdk::{
    account::Account,
    hash::Hash,
    instruction::InstructionError,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{TransactionError, VersionedTransaction},
};

use crate::{
    pda::{find_config_address, find_order_address},
    Error, TradeId,
};

use super::ledger::Ledger;

// Anchor framework error codes.
const CONSTRAINT_SEEDS: u32 = 2006;
const ACCOUNT_NOT_INITIALIZED: u32 = 3012;

const LAMPORTS: u64 = 2_000_000;

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<Pubkey, Account>,
    offline: bool,
    stalled: bool,
    slot: u64,
    clock: i64,
    sent: Vec<VersionedTransaction>,
    processed: Vec<Signature>,
}

/// In-memory [`Ledger`] that executes `set_order_state` the way the program does.
///
/// A transaction is applied atomically: either every check passes and the order
/// is updated, or it is rejected with the program error code and nothing changes.
#[derive(Debug, Clone)]
pub struct MockLedger {
    program_id: Pubkey,
    state: Arc<Mutex<State>>,
    requests: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    latency: Duration,
}

impl MockLedger {
    /// Create an empty ledger for the program.
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            state: Arc::new(Mutex::new(State {
                slot: 1,
                clock: 1_700_000_000,
                ..Default::default()
            })),
            requests: Default::default(),
            in_flight: Default::default(),
            max_in_flight: Default::default(),
            latency: Duration::ZERO,
        }
    }

    /// Create a ledger whose config account registers `admin`.
    pub fn with_admin(program_id: Pubkey, admin: &Pubkey) -> crate::Result<Self> {
        let ledger = Self::new(program_id);
        ledger.set_admin(admin)?;
        Ok(ledger)
    }

    /// Delay every transaction submission.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_account<T: AccountSerialize>(
        &self,
        address: Pubkey,
        value: &T,
    ) -> crate::Result<()> {
        let mut data = Vec::new();
        value.try_serialize(&mut data)?;
        self.insert_account(
            address,
            Account {
                lamports: LAMPORTS,
                data,
                owner: self.program_id,
                executable: false,
                rent_epoch: 0,
            },
        );
        Ok(())
    }

    /// Write the config account.
    pub fn set_admin(&self, admin: &Pubkey) -> crate::Result<()> {
        let (address, bump) = find_config_address(&self.program_id);
        self.write_account(
            address,
            &ConfigState {
                admin: *admin,
                bump,
            },
        )
    }

    /// Store an order at the address derived from its trade id.
    pub fn insert_order(&self, order: OrderState) -> crate::Result<Pubkey> {
        let (address, _) = find_order_address(&order.trade_id.into(), &self.program_id);
        self.write_account(address, &order)?;
        Ok(address)
    }

    /// Store a raw account.
    pub fn insert_account(&self, address: Pubkey, account: Account) {
        self.state().accounts.insert(address, account);
    }

    /// Decode the order of the given trade.
    pub fn order(&self, trade_id: u64) -> Option<OrderState> {
        let (address, _) = find_order_address(&trade_id.into(), &self.program_id);
        let state = self.state();
        let account = state.accounts.get(&address)?;
        OrderState::try_deserialize(&mut account.data.as_slice()).ok()
    }

    /// Make every ledger call fail with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Accept submissions without ever confirming them.
    ///
    /// Stalled transactions are recorded but not applied, and the submission
    /// fails with [`Error::Timeout`].
    pub fn set_stalled(&self, stalled: bool) {
        self.state().stalled = stalled;
    }

    /// Number of ledger calls made so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Transactions submitted so far, including rejected ones.
    pub fn sent_transactions(&self) -> Vec<VersionedTransaction> {
        self.state().sent.clone()
    }

    /// Highest number of submissions observed in flight at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn begin(&self) -> crate::Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.state().offline {
            return Err(Error::network("connection refused"));
        }
        Ok(())
    }

    fn process(&self, transaction: &VersionedTransaction) -> crate::Result<Signature> {
        let mut state = self.state();
        state.sent.push(transaction.clone());

        let signature = transaction
            .signatures
            .first()
            .copied()
            .unwrap_or_default();
        if !transaction.verify_with_results().into_iter().all(|ok| ok) {
            return Err(Error::program_rejection(
                &TransactionError::SignatureFailure,
                vec![],
            ));
        }
        if state.processed.contains(&signature) {
            return Err(Error::program_rejection(
                &TransactionError::AlreadyProcessed,
                vec![],
            ));
        }

        let keys = transaction.message.static_account_keys();
        let num_signers = usize::from(transaction.message.header().num_required_signatures);
        let mut updates = Vec::new();
        let mut logs = Vec::new();

        for (idx, ix) in transaction.message.instructions().iter().enumerate() {
            let reject = |error: InstructionError, logs: &mut Vec<String>| {
                if let InstructionError::Custom(code) = error {
                    logs.push(anchor_error_log(code));
                    logs.push(format!(
                        "Program {} failed: custom program error: {code:#x}",
                        self.program_id
                    ));
                }
                Error::program_rejection(
                    &TransactionError::InstructionError(idx as u8, error),
                    std::mem::take(logs),
                )
            };

            let program_id = keys.get(usize::from(ix.program_id_index));
            if program_id != Some(&self.program_id) {
                return Err(reject(InstructionError::IncorrectProgramId, &mut logs));
            }
            logs.push(format!("Program {} invoke [1]", self.program_id));
            logs.push("Program log: Instruction: SetOrderState".to_string());

            let Some(args) = SetOrderState::try_from_data(&ix.data) else {
                return Err(reject(InstructionError::InvalidInstructionData, &mut logs));
            };
            let [admin, order, config] = match ix.accounts.as_slice() {
                [admin, order, config, ..] => [*admin, *order, *config].map(usize::from),
                _ => return Err(reject(InstructionError::NotEnoughAccountKeys, &mut logs)),
            };
            if admin >= num_signers {
                return Err(reject(InstructionError::MissingRequiredSignature, &mut logs));
            }
            let (Some(admin), Some(order), Some(config)) =
                (keys.get(admin), keys.get(order), keys.get(config))
            else {
                return Err(reject(InstructionError::NotEnoughAccountKeys, &mut logs));
            };

            if *config != find_config_address(&self.program_id).0 {
                return Err(reject(InstructionError::Custom(CONSTRAINT_SEEDS), &mut logs));
            }
            let Some(config_state) = decode::<ConfigState>(&state.accounts, config) else {
                return Err(reject(
                    InstructionError::Custom(ACCOUNT_NOT_INITIALIZED),
                    &mut logs,
                ));
            };
            if config_state.admin != *admin {
                return Err(reject(
                    InstructionError::Custom(OrderManagerError::Unauthorized.code()),
                    &mut logs,
                ));
            }

            let trade_id = TradeId::from(args.trade_id);
            if *order != find_order_address(&trade_id, &self.program_id).0 {
                return Err(reject(InstructionError::Custom(CONSTRAINT_SEEDS), &mut logs));
            }
            let Some(mut order_state) = decode::<OrderState>(&state.accounts, order) else {
                return Err(reject(
                    InstructionError::Custom(ACCOUNT_NOT_INITIALIZED),
                    &mut logs,
                ));
            };
            if order_state.trade_id != args.trade_id {
                return Err(reject(
                    InstructionError::Custom(OrderManagerError::TradeIdMismatch.code()),
                    &mut logs,
                ));
            }
            if !is_admin_transition(order_state.status, args.new_status) {
                return Err(reject(
                    InstructionError::Custom(OrderManagerError::InvalidStatusTransition.code()),
                    &mut logs,
                ));
            }

            order_state.status = args.new_status;
            if args.new_status == OrderStatus::Shipped {
                order_state.shipped_at = state.clock;
            }
            logs.push(format!("Program {} success", self.program_id));
            updates.push((*order, order_state));
        }

        for (address, order) in updates {
            let mut data = Vec::new();
            order
                .try_serialize(&mut data)
                .map_err(|err| Error::Decode(err.to_string()))?;
            if let Some(account) = state.accounts.get_mut(&address) {
                account.data = data;
            }
        }
        state.processed.push(signature);
        state.slot += 1;
        state.clock += 1;
        Ok(signature)
    }
}

/// Admin transitions accepted by the program.
fn is_admin_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;

    matches!(
        (from, to),
        (Created, Signed) | (Signed, Shipped) | (Paid, Shipped)
    )
}

fn anchor_error_log(code: u32) -> String {
    match OrderManagerError::from_code(code) {
        Some(err) => format!(
            "Program log: AnchorError occurred. Error Code: {err}. Error Number: {code}. Error Message: {}.",
            err.message()
        ),
        None => format!("Program log: AnchorError occurred. Error Number: {code}."),
    }
}

fn decode<T: AccountDeserialize>(accounts: &HashMap<Pubkey, Account>, address: &Pubkey) -> Option<T> {
    let account = accounts.get(address)?;
    T::try_deserialize(&mut account.data.as_slice()).ok()
}

impl Ledger for MockLedger {
    async fn program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<RpcFilterType>,
    ) -> crate::Result<WithSlot<Vec<(Pubkey, Account)>>> {
        self.begin()?;
        let state = self.state();
        let accounts = state
            .accounts
            .iter()
            .filter(|(_, account)| account.owner == *program_id)
            .filter(|(_, account)| {
                filters.iter().all(|filter| match filter {
                    RpcFilterType::Memcmp(memcmp) => memcmp.bytes_match(&account.data),
                    RpcFilterType::DataSize(size) => account.data.len() as u64 == *size,
                    _ => true,
                })
            })
            .map(|(address, account)| (*address, account.clone()))
            .collect();
        Ok(WithSlot::new(state.slot, accounts))
    }

    async fn account(&self, address: &Pubkey) -> crate::Result<WithSlot<Option<Account>>> {
        self.begin()?;
        let state = self.state();
        Ok(WithSlot::new(
            state.slot,
            state.accounts.get(address).cloned(),
        ))
    }

    async fn latest_blockhash(&self) -> crate::Result<Hash> {
        self.begin()?;
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm(&self, transaction: &VersionedTransaction) -> crate::Result<Signature> {
        self.begin()?;
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let res = if self.state().stalled {
            self.state().sent.push(transaction.clone());
            Err(ordermgr_solana_utils::Error::ConfirmationTimeout(DEFAULT_CONFIRM_TIMEOUT).into())
        } else {
            self.process(transaction)
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        res
    }
}
