//! Allocation session - owns the editable list for one lead and the
//! debounced auto-save machinery around it.
//!
//! Every mutation re-arms a single debounce timer; when the idle delay
//! elapses the full list is validated and PUT to the backend, and the
//! server's canonical response is merged back into the local rows. The timer
//! and the save state are owned by the session instance, never ambient:
//! [`AllocationSession::shutdown`] cancels any pending timer unconditionally,
//! so no orphan save can fire after teardown.
//!
//! Consistency notes: at most one PUT is in flight per session. An edit that
//! lands while a save is in flight re-enters `Scheduled` once the flight
//! clears, starting a fresh debounce window; the in-flight request itself is
//! never aborted. Each save carries a monotonically increasing sequence
//! number and responses that are not the latest issued are discarded instead
//! of merged.

use crate::{
    api::ApiClient,
    core::reconciler::merge_allocations,
    core::stats::FundingStats,
    core::store::{AllocationRow, AllocationStore},
    core::validator::validate_allocations,
    errors::{Error, Result},
    models::{InvestorProfile, Lead},
};
use std::{sync::Arc, time::Duration};
use tokio::{sync::Mutex, task::JoinHandle, time};
use tracing::{debug, info, warn};

/// Idle delay before a scheduled save fires, unless overridden via config.
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(600);

/// Persister state, observable for rendering save indicators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveState {
    /// Nothing pending
    Idle,
    /// A save will fire once the idle delay elapses
    Scheduled,
    /// A PUT is in flight
    Saving,
    /// Validation rejected the list before sending; see `last_error`
    Failed,
}

struct SessionState {
    store: AllocationStore,
    investors: Vec<InvestorProfile>,
    save: SaveState,
    pending: Option<JoinHandle<()>>,
    saving: bool,
    resave_after_flight: bool,
    issued_seq: u64,
    last_error: Option<String>,
}

struct Shared {
    api: ApiClient,
    lead_id: String,
    delay: Duration,
    state: Mutex<SessionState>,
}

/// One editing session over a lead's investor allocations. Cheap to clone;
/// clones share the same store and timer.
#[derive(Clone)]
pub struct AllocationSession {
    shared: Arc<Shared>,
}

impl AllocationSession {
    /// Builds a session from a fetched lead and the investor directory.
    /// Rows the directory knows about are resolved for display immediately.
    #[must_use]
    pub fn new(
        api: ApiClient,
        lead: &Lead,
        investors: Vec<InvestorProfile>,
        delay: Duration,
    ) -> Self {
        let mut store = AllocationStore::from_lead(lead);
        store.resolve_all(&investors);

        Self {
            shared: Arc::new(Shared {
                api,
                lead_id: lead.id.clone(),
                delay,
                state: Mutex::new(SessionState {
                    store,
                    investors,
                    save: SaveState::Idle,
                    pending: None,
                    saving: false,
                    resave_after_flight: false,
                    issued_seq: 0,
                    last_error: None,
                }),
            }),
        }
    }

    /// Replaces the percentage text at `index` and re-arms the save timer.
    pub async fn set_percentage(&self, index: usize, raw: &str) -> Result<()> {
        {
            let mut st = self.shared.state.lock().await;
            st.store.set_percentage(index, raw)?;
        }
        Self::schedule(&self.shared).await;
        Ok(())
    }

    /// Replaces the amount text at `index` and re-arms the save timer.
    pub async fn set_amount(&self, index: usize, raw: &str) -> Result<()> {
        {
            let mut st = self.shared.state.lock().await;
            st.store.set_amount(index, raw)?;
        }
        Self::schedule(&self.shared).await;
        Ok(())
    }

    /// Adds an investor from the directory to the list, with defaulted
    /// percentage/amount when omitted, and schedules a save.
    pub async fn add_investor(
        &self,
        investor_id: &str,
        percentage: Option<f64>,
        amount: Option<f64>,
    ) -> Result<()> {
        {
            let mut st = self.shared.state.lock().await;
            let profile = st
                .investors
                .iter()
                .find(|i| i.id == investor_id)
                .cloned()
                .ok_or_else(|| Error::UnknownInvestor {
                    investor_id: investor_id.to_string(),
                })?;
            st.store.add(&profile, percentage, amount)?;
        }
        Self::schedule(&self.shared).await;
        Ok(())
    }

    /// Removes an investor's row and schedules a save with the shorter list
    /// (an empty list still persists). Returns whether a row was removed.
    pub async fn remove_investor(&self, investor_id: &str) -> bool {
        let removed = {
            let mut st = self.shared.state.lock().await;
            st.store.remove(investor_id)
        };
        if removed {
            Self::schedule(&self.shared).await;
        }
        removed
    }

    /// Snapshot of the current rows.
    pub async fn rows(&self) -> Vec<AllocationRow> {
        self.shared.state.lock().await.store.rows().to_vec()
    }

    /// Current persister state.
    pub async fn save_state(&self) -> SaveState {
        self.shared.state.lock().await.save
    }

    /// The most recent user-visible failure message, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.shared.state.lock().await.last_error.clone()
    }

    /// Funding-stat aggregates over the current rows.
    pub async fn stats(&self) -> FundingStats {
        let st = self.shared.state.lock().await;
        FundingStats::compute(st.store.rows(), st.store.purchase_price())
    }

    /// The lead's purchase price as last reported by the backend.
    pub async fn purchase_price(&self) -> f64 {
        self.shared.state.lock().await.store.purchase_price()
    }

    /// Cancels any pending timer unconditionally. Call on logical-session
    /// end; an already in-flight PUT is allowed to finish.
    pub async fn shutdown(&self) {
        let mut st = self.shared.state.lock().await;
        if let Some(handle) = st.pending.take() {
            handle.abort();
        }
        st.resave_after_flight = false;
        if !st.saving {
            st.save = SaveState::Idle;
        }
        debug!(lead_id = %self.shared.lead_id, "allocation session shut down");
    }

    /// Re-arms the debounce timer for the current list, or cancels the
    /// pending save outright when the (non-empty) list is incomplete.
    ///
    /// Returns a boxed future so the schedule -> fire -> schedule recursion
    /// has a concrete `Send` type the compiler can resolve.
    fn schedule(
        shared: &Arc<Shared>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
        let shared = Arc::clone(shared);
        Box::pin(async move {
            let mut st = shared.state.lock().await;
            if let Some(handle) = st.pending.take() {
                handle.abort();
            }

            if !st.store.is_complete() {
                st.resave_after_flight = false;
                if !st.saving {
                    st.save = SaveState::Idle;
                }
                debug!(lead_id = %shared.lead_id, "allocation list incomplete, pending save cancelled");
                return;
            }

            if st.saving {
                // Re-enter Scheduled once the in-flight save clears.
                st.resave_after_flight = true;
                return;
            }

            st.save = SaveState::Scheduled;
            let task_shared = Arc::clone(&shared);
            let delay = shared.delay;
            st.pending = Some(tokio::spawn(async move {
                time::sleep(delay).await;
                AllocationSession::fire(task_shared).await;
            }));
        })
    }

    /// Deadline elapsed: validate, send, reconcile.
    async fn fire(shared: Arc<Shared>) {
        let (payload, seq) = {
            let mut st = shared.state.lock().await;
            st.pending = None;
            if st.saving {
                // At most one PUT in flight per session.
                st.resave_after_flight = true;
                return;
            }
            match validate_allocations(st.store.rows(), &st.investors, st.store.purchase_price()) {
                Ok(payload) => {
                    st.saving = true;
                    st.save = SaveState::Saving;
                    st.issued_seq += 1;
                    st.last_error = None;
                    (payload, st.issued_seq)
                }
                Err(err) => {
                    warn!(lead_id = %shared.lead_id, "allocation save rejected before send: {err}");
                    st.save = SaveState::Failed;
                    st.last_error = Some(err.to_string());
                    return;
                }
            }
        };

        let result = shared
            .api
            .put_investor_allocations(&shared.lead_id, &payload)
            .await;

        let resave = {
            let mut st = shared.state.lock().await;
            st.saving = false;
            match result {
                Ok(lead) => {
                    if seq == st.issued_seq {
                        let merged = merge_allocations(st.store.rows(), &lead.investor_allocations);
                        st.store.replace_rows(merged);
                        st.store.set_purchase_price(lead.purchase_price());
                        info!(
                            lead_id = %shared.lead_id,
                            allocations = payload.len(),
                            "allocation save persisted"
                        );
                    } else {
                        debug!(
                            lead_id = %shared.lead_id,
                            seq,
                            latest = st.issued_seq,
                            "discarding stale save response"
                        );
                    }
                    st.save = SaveState::Idle;
                }
                Err(err) => {
                    warn!(lead_id = %shared.lead_id, "allocation save failed: {err}");
                    st.save = SaveState::Idle;
                    st.last_error = Some(err.to_string());
                }
            }
            std::mem::take(&mut st.resave_after_flight)
        };

        if resave {
            Self::schedule(&shared).await;
        }
    }
}
