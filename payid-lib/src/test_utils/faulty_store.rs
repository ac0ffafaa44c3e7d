//! Store wrapper with scripted failures.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::task::Poll;

use crate::codec::StoredRecord;
use crate::store::{PutOutcome, RecordStore, StoreError, StoreResult};
use crate::PayId;

/// Store operation a fault can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    Put,
    Delete,
}

/// What happens when a scripted call is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Return `StoreError::Unavailable` without touching the inner store.
    Unavailable,
    /// Delete the key from the inner store first, then run the call.
    ///
    /// Simulates a concurrent caller removing the record just before this call.
    Vanish,
    /// Suspend the call once before running it.
    ///
    /// Lets other futures on the same task (`join!`) or executor make
    /// progress in between, to pin down an interleaving.
    Yield,
}

/// Wraps a store and injects faults on the nth call of an operation.
pub struct FaultyStore<S> {
    inner: S,
    faults: Mutex<Vec<(StoreOp, usize, Fault)>>,
    calls: Mutex<HashMap<StoreOp, usize>>,
}

impl<S: RecordStore> FaultyStore<S> {
    /// Wrap `inner` with no faults scheduled.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            faults: Mutex::new(Vec::new()),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Schedule `fault` for the `nth` (1-based) call of `op`.
    pub fn inject(&self, op: StoreOp, nth: usize, fault: Fault) {
        self.faults.lock().unwrap().push((op, nth, fault));
    }

    /// Number of calls of `op` seen so far.
    pub fn calls(&self, op: StoreOp) -> usize {
        self.calls.lock().unwrap().get(&op).copied().unwrap_or(0)
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn next_fault(&self, op: StoreOp) -> Option<Fault> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(op).or_insert(0);
            *count += 1;
            *count
        };

        let mut faults = self.faults.lock().unwrap();
        let pos = faults.iter().position(|(o, n, _)| *o == op && *n == count)?;
        Some(faults.remove(pos).2)
    }

    async fn apply(&self, op: StoreOp, key: &PayId) -> StoreResult<()> {
        match self.next_fault(op) {
            None => Ok(()),
            Some(Fault::Unavailable) => Err(StoreError::Unavailable(format!(
                "injected {op:?} failure for {key}"
            ))),
            Some(Fault::Vanish) => self.inner.delete(key).await,
            Some(Fault::Yield) => {
                yield_once().await;
                Ok(())
            }
        }
    }
}

async fn yield_once() {
    let mut yielded = false;
    std::future::poll_fn(|cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await
}

#[async_trait]
impl<S: RecordStore> RecordStore for FaultyStore<S> {
    async fn get(&self, key: &PayId) -> StoreResult<Option<StoredRecord>> {
        self.apply(StoreOp::Get, key).await?;
        self.inner.get(key).await
    }

    async fn put_if_absent(&self, record: StoredRecord) -> StoreResult<PutOutcome> {
        self.apply(StoreOp::Put, &record.id).await?;
        self.inner.put_if_absent(record).await
    }

    async fn delete(&self, key: &PayId) -> StoreResult<()> {
        self.apply(StoreOp::Delete, key).await?;
        self.inner.delete(key).await
    }
}
