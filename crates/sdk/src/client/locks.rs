use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::TradeId;

type Table = HashMap<TradeId, Slot>;

#[derive(Debug, Default)]
struct Slot {
    mutex: Arc<AsyncMutex<()>>,
    /// Holders and waiters currently registered for the trade.
    users: usize,
}

fn lock_table(table: &Mutex<Table>) -> MutexGuard<'_, Table> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Per-trade mutual exclusion for state transitions.
///
/// Transitions of the same trade are applied one at a time in arrival order,
/// while different trades never wait on each other.
#[derive(Debug, Default, Clone)]
pub struct TradeLocks {
    table: Arc<Mutex<Table>>,
}

impl TradeLocks {
    /// Wait until the trade is free and lock it.
    ///
    /// Dropping the returned future before it resolves unregisters the waiter.
    pub async fn lock(&self, trade_id: TradeId) -> TradeGuard {
        let (entry, mutex) = {
            let mut table = lock_table(&self.table);
            let slot = table.entry(trade_id).or_default();
            slot.users += 1;
            let entry = Entry {
                trade_id,
                table: self.table.clone(),
            };
            (entry, slot.mutex.clone())
        };
        let guard = mutex.lock_owned().await;
        TradeGuard {
            _guard: guard,
            entry,
        }
    }

    /// Number of trades currently locked or waited on.
    pub fn len(&self) -> usize {
        lock_table(&self.table).len()
    }

    /// Returns whether no trade is locked.
    pub fn is_empty(&self) -> bool {
        lock_table(&self.table).is_empty()
    }
}

/// Registration of one holder or waiter. The slot is removed with its last user.
#[derive(Debug)]
struct Entry {
    trade_id: TradeId,
    table: Arc<Mutex<Table>>,
}

impl Drop for Entry {
    fn drop(&mut self) {
        let mut table = lock_table(&self.table);
        if let Some(slot) = table.get_mut(&self.trade_id) {
            slot.users = slot.users.saturating_sub(1);
            if slot.users == 0 {
                table.remove(&self.trade_id);
            }
        }
    }
}

/// Guard returned by [`TradeLocks::lock`]. The trade is released on drop.
#[derive(Debug)]
pub struct TradeGuard {
    // Unlocked before `entry` unregisters.
    _guard: OwnedMutexGuard<()>,
    entry: Entry,
}

impl TradeGuard {
    /// Get the locked trade id.
    pub fn trade_id(&self) -> TradeId {
        self.entry.trade_id
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::{sleep, timeout};

    use super::*;

    #[tokio::test]
    async fn same_trade_is_exclusive() {
        let locks = TradeLocks::default();
        let first = locks.lock(TradeId::new(1)).await;
        assert_eq!(first.trade_id(), TradeId::new(1));

        let waiting = timeout(Duration::from_millis(50), locks.lock(TradeId::new(1))).await;
        assert!(waiting.is_err());

        drop(first);
        let second = timeout(Duration::from_millis(50), locks.lock(TradeId::new(1))).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn different_trades_do_not_contend() {
        let locks = TradeLocks::default();
        let _a = locks.lock(TradeId::new(1)).await;
        let b = timeout(Duration::from_millis(50), locks.lock(TradeId::new(2))).await;
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn table_is_cleaned_up() {
        let locks = TradeLocks::default();
        let first = locks.lock(TradeId::new(7)).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock(TradeId::new(7)).await;
                sleep(Duration::from_millis(10)).await;
            })
        };
        sleep(Duration::from_millis(10)).await;
        drop(first);
        // The waiter still holds a reference, so the entry must survive.
        assert_eq!(locks.len(), 1);

        waiter.await.unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn cancelled_waiters_release_entry() {
        let locks = TradeLocks::default();
        let holder = locks.lock(TradeId::new(5)).await;

        // Given up while still blocked.
        let timed_out = timeout(Duration::from_millis(20), locks.lock(TradeId::new(5))).await;
        assert!(timed_out.is_err());
        assert_eq!(locks.len(), 1);

        // Aborted around the time it is woken.
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock(TradeId::new(5)).await;
                sleep(Duration::from_secs(60)).await;
            })
        };
        sleep(Duration::from_millis(10)).await;
        drop(holder);
        waiter.abort();
        assert!(waiter.await.unwrap_err().is_cancelled());
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn arrival_order_is_kept() {
        let locks = TradeLocks::default();
        let order = Arc::new(Mutex::new(Vec::new()));
        let first = locks.lock(TradeId::new(9)).await;

        let mut handles = Vec::new();
        for idx in 0..3 {
            let locks = locks.clone();
            let order = order.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.lock(TradeId::new(9)).await;
                order.lock().unwrap().push(idx);
            }));
            sleep(Duration::from_millis(10)).await;
        }
        drop(first);
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        assert!(locks.is_empty());
    }
}
