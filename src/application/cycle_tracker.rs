//! CycleTrackerController - orchestrates the cycle tracker screen.
//!
//! The controller turns calendar taps and form input into log-store calls
//! and keeps a read-through copy of the user's history for the lifetime of
//! the screen. After every change it recomputes the forecast; the forecast
//! itself is pure and lives in the domain.
//!
//! Each mutating operation makes exactly one store call and only touches
//! in-session state after that call succeeds.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::cycle::{
    forecast, sorted_newest_first, CycleRecord, DateSelection, ForecastState, NewCycleRecord,
    SymptomAdvisor, DEFAULT_CYCLE_LENGTH_DAYS,
};
use crate::domain::foundation::{CycleRecordId, DomainError, UserId, ValidationError};
use crate::ports::{AuthContext, Clock, CycleLogStore};

/// Command to log a completed period.
#[derive(Debug, Clone, Default)]
pub struct LogCycleCommand {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub symptoms: Option<String>,
}

/// Command to delete a logged period.
#[derive(Debug, Clone, Copy)]
pub struct DeleteCycleCommand {
    pub id: CycleRecordId,
}

/// Errors surfaced to the UI layer.
#[derive(Debug, Clone, Error)]
pub enum CycleTrackerError {
    /// User-correctable input problem.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Nobody is signed in.
    #[error("Not signed in")]
    Unauthenticated,

    /// The log store failed or timed out. Nothing was changed locally.
    #[error("Cycle log unavailable: {0}")]
    StoreUnavailable(String),

    /// Delete of an id the store does not know.
    #[error("Cycle record not found: {0}")]
    NotFound(CycleRecordId),
}

impl From<DomainError> for CycleTrackerError {
    fn from(err: DomainError) -> Self {
        CycleTrackerError::StoreUnavailable(err.to_string())
    }
}

/// Controller behind the cycle tracker screen.
pub struct CycleTrackerController {
    store: Arc<dyn CycleLogStore>,
    auth: Arc<dyn AuthContext>,
    clock: Arc<dyn Clock>,
    advisor: SymptomAdvisor,
    cycle_length_days: i64,
    history: Vec<CycleRecord>,
    forecast: ForecastState,
    selection: DateSelection,
}

impl CycleTrackerController {
    pub fn new(
        store: Arc<dyn CycleLogStore>,
        auth: Arc<dyn AuthContext>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            auth,
            clock,
            advisor: SymptomAdvisor::new(),
            cycle_length_days: DEFAULT_CYCLE_LENGTH_DAYS,
            history: Vec::new(),
            forecast: ForecastState::NoData,
            selection: DateSelection::new(),
        }
    }

    /// Overrides the cycle length used for forecasting.
    pub fn with_cycle_length(mut self, days: i64) -> Self {
        self.cycle_length_days = days;
        self
    }

    /// Overrides the symptom keyword table.
    pub fn with_advisor(mut self, advisor: SymptomAdvisor) -> Self {
        self.advisor = advisor;
        self
    }

    /// In-session history, newest start date first (ties: latest logged first).
    pub fn history(&self) -> &[CycleRecord] {
        &self.history
    }

    pub fn forecast(&self) -> &ForecastState {
        &self.forecast
    }

    pub fn selection(&self) -> DateSelection {
        self.selection
    }

    /// Tip for the given symptom text.
    pub fn advice(&self, symptoms: &str) -> &'static str {
        self.advisor.advise(symptoms)
    }

    /// Loads the signed-in user's history and computes the first forecast.
    pub async fn load(&mut self) -> Result<&ForecastState, CycleTrackerError> {
        let user_id = self.require_user()?;

        let records = self.store.list(&user_id).await.map_err(|e| {
            tracing::warn!(user = %user_id, error = %e, "failed to load cycle history");
            CycleTrackerError::from(e)
        })?;

        self.history = sorted_newest_first(&records);
        self.recompute();
        tracing::debug!(user = %user_id, records = self.history.len(), "loaded cycle history");
        Ok(&self.forecast)
    }

    /// Applies one calendar tap to the start/end selection.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<DateSelection, CycleTrackerError> {
        self.selection.select(date).map_err(|e| {
            tracing::warn!(%date, error = %e, "rejected calendar selection");
            CycleTrackerError::Validation(e)
        })?;
        Ok(self.selection)
    }

    /// Logs a period with both dates required.
    ///
    /// Input is validated before anything else, so a bad range never
    /// reaches the store.
    pub async fn log_cycle(&mut self, cmd: LogCycleCommand) -> Result<CycleRecord, CycleTrackerError> {
        let start = cmd
            .start_date
            .ok_or_else(|| ValidationError::empty_field("start_date"))?;
        let end = cmd
            .end_date
            .ok_or_else(|| ValidationError::empty_field("end_date"))?;
        let draft = NewCycleRecord::new(start, Some(end), cmd.symptoms, self.clock.now())?;

        let user_id = self.require_user()?;

        let id = self.store.append(&user_id, &draft).await.map_err(|e| {
            tracing::warn!(user = %user_id, error = %e, "failed to log cycle");
            CycleTrackerError::from(e)
        })?;

        let record = draft.into_record(id);
        let position = self.history.partition_point(|existing| {
            existing.start_date() > record.start_date()
                || (existing.start_date() == record.start_date()
                    && existing.logged_at() >= record.logged_at())
        });
        self.history.insert(position, record.clone());
        self.recompute();

        tracing::info!(user = %user_id, record = %id, start = %start, end = %end, "logged cycle");
        Ok(record)
    }

    /// Logs the dates currently held by the calendar selection, then clears it.
    ///
    /// On failure the selection is kept so the user can retry.
    pub async fn log_selected_cycle(&mut self, symptoms: Option<String>) -> Result<CycleRecord, CycleTrackerError> {
        let cmd = LogCycleCommand {
            start_date: self.selection.start_date(),
            end_date: self.selection.end_date(),
            symptoms,
        };
        let record = self.log_cycle(cmd).await?;
        self.selection.reset();
        Ok(record)
    }

    /// Deletes a logged period.
    ///
    /// An id unknown to the store is reported as `NotFound`; if the stale id
    /// was still cached locally it is dropped so the session matches the store.
    pub async fn delete_cycle(&mut self, cmd: DeleteCycleCommand) -> Result<(), CycleTrackerError> {
        let user_id = self.require_user()?;

        match self.store.remove(&user_id, &cmd.id).await {
            Ok(()) => {
                self.forget(cmd.id);
                tracing::info!(user = %user_id, record = %cmd.id, "deleted cycle");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                self.forget(cmd.id);
                tracing::warn!(user = %user_id, record = %cmd.id, "delete of unknown cycle record");
                Err(CycleTrackerError::NotFound(cmd.id))
            }
            Err(e) => {
                tracing::warn!(user = %user_id, record = %cmd.id, error = %e, "failed to delete cycle");
                Err(e.into())
            }
        }
    }

    fn require_user(&self) -> Result<UserId, CycleTrackerError> {
        self.auth
            .current_user_id()
            .ok_or(CycleTrackerError::Unauthenticated)
    }

    fn forget(&mut self, id: CycleRecordId) {
        let before = self.history.len();
        self.history.retain(|r| r.id() != id);
        if self.history.len() != before {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.forecast = forecast(&self.history, self.clock.now(), self.cycle_length_days);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryCycleLogStore, SessionAuthContext};
    use crate::domain::cycle::{SelectionPhase, GENERIC_TIP};
    use crate::domain::foundation::{ErrorCode, Timestamp};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ─────────────────────────────────────────────────────────────────────
    // Mock implementations
    // ─────────────────────────────────────────────────────────────────────

    /// Counts calls and can be told to fail.
    struct MockCycleLogStore {
        inner: InMemoryCycleLogStore,
        calls: Mutex<Vec<&'static str>>,
        fail_with: Mutex<Option<ErrorCode>>,
    }

    impl MockCycleLogStore {
        fn new() -> Self {
            Self {
                inner: InMemoryCycleLogStore::new(),
                calls: Mutex::new(Vec::new()),
                fail_with: Mutex::new(None),
            }
        }

        fn fail_with(&self, code: ErrorCode) {
            *self.fail_with.lock().unwrap() = Some(code);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) -> Result<(), DomainError> {
            self.calls.lock().unwrap().push(call);
            match *self.fail_with.lock().unwrap() {
                Some(code) => Err(DomainError::new(code, "Simulated failure")),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl CycleLogStore for MockCycleLogStore {
        async fn append(&self, user_id: &UserId, record: &NewCycleRecord) -> Result<CycleRecordId, DomainError> {
            self.record("append")?;
            self.inner.append(user_id, record).await
        }

        async fn list(&self, user_id: &UserId) -> Result<Vec<CycleRecord>, DomainError> {
            self.record("list")?;
            self.inner.list(user_id).await
        }

        async fn remove(&self, user_id: &UserId, id: &CycleRecordId) -> Result<(), DomainError> {
            self.record("remove")?;
            self.inner.remove(user_id, id).await
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Test helpers
    // ─────────────────────────────────────────────────────────────────────

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn test_user() -> UserId {
        UserId::new("test-user-123").unwrap()
    }

    fn clock_at(date: NaiveDate) -> Arc<FixedClock> {
        Arc::new(FixedClock::new(Timestamp::start_of(date)))
    }

    fn controller(store: Arc<MockCycleLogStore>) -> CycleTrackerController {
        CycleTrackerController::new(
            store,
            Arc::new(SessionAuthContext::signed_in(test_user())),
            clock_at(jan(15)),
        )
    }

    fn log(start: Option<NaiveDate>, end: Option<NaiveDate>) -> LogCycleCommand {
        LogCycleCommand {
            start_date: start,
            end_date: end,
            symptoms: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn starts_with_no_data() {
        let ctrl = controller(Arc::new(MockCycleLogStore::new()));
        assert!(ctrl.forecast().is_no_data());
        assert!(ctrl.history().is_empty());
        assert_eq!(ctrl.selection().phase(), SelectionPhase::AwaitingStart);
    }

    #[tokio::test]
    async fn log_cycle_persists_and_forecasts() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store.clone());

        let record = ctrl.log_cycle(log(Some(jan(1)), Some(jan(5)))).await.unwrap();

        assert_eq!(store.calls(), vec!["append"]);
        assert_eq!(ctrl.history(), &[record]);
        let prediction = ctrl.forecast().prediction().unwrap();
        assert_eq!(prediction.next_predicted_start, NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
        assert_eq!(prediction.progress.value(), 36);
    }

    #[tokio::test]
    async fn log_cycle_puts_newer_period_first() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store);

        ctrl.log_cycle(log(Some(jan(1)), Some(jan(3)))).await.unwrap();
        let newest = ctrl.log_cycle(log(Some(jan(8)), Some(jan(9)))).await.unwrap();

        assert_eq!(ctrl.history().len(), 2);
        assert_eq!(ctrl.history()[0].id(), newest.id());
    }

    #[tokio::test]
    async fn backfilled_period_keeps_history_newest_first() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store);

        ctrl.log_cycle(log(Some(jan(8)), Some(jan(10)))).await.unwrap();
        ctrl.log_cycle(log(Some(jan(12)), Some(jan(13)))).await.unwrap();
        let backfilled = ctrl.log_cycle(log(Some(jan(1)), Some(jan(3)))).await.unwrap();

        let starts: Vec<_> = ctrl.history().iter().map(|r| r.start_date()).collect();
        assert_eq!(starts, vec![jan(12), jan(8), jan(1)]);
        assert_eq!(ctrl.history()[2].id(), backfilled.id());
        assert_eq!(ctrl.history(), sorted_newest_first(ctrl.history()).as_slice());
        assert_eq!(ctrl.forecast().prediction().unwrap().reference_date, jan(13));
    }

    #[tokio::test]
    async fn end_before_start_never_reaches_store() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store.clone());

        let result = ctrl.log_cycle(log(Some(jan(10)), Some(jan(5)))).await;

        assert!(matches!(
            result,
            Err(CycleTrackerError::Validation(ValidationError::EndBeforeStart { .. }))
        ));
        assert!(store.calls().is_empty());
        assert!(ctrl.forecast().is_no_data());
    }

    #[tokio::test]
    async fn missing_dates_are_validation_errors() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store.clone());

        for cmd in [log(None, Some(jan(5))), log(Some(jan(5)), None), log(None, None)] {
            let result = ctrl.log_cycle(cmd).await;
            assert!(matches!(
                result,
                Err(CycleTrackerError::Validation(ValidationError::EmptyField { .. }))
            ));
        }
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn signed_out_user_cannot_mutate_or_load() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = CycleTrackerController::new(
            store.clone(),
            Arc::new(SessionAuthContext::new()),
            clock_at(jan(15)),
        );

        assert!(matches!(ctrl.load().await, Err(CycleTrackerError::Unauthenticated)));
        assert!(matches!(
            ctrl.log_cycle(log(Some(jan(1)), Some(jan(5)))).await,
            Err(CycleTrackerError::Unauthenticated)
        ));
        assert!(matches!(
            ctrl.delete_cycle(DeleteCycleCommand { id: CycleRecordId::new() }).await,
            Err(CycleTrackerError::Unauthenticated)
        ));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn store_failure_leaves_history_untouched() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store.clone());
        ctrl.log_cycle(log(Some(jan(1)), Some(jan(5)))).await.unwrap();
        let before_history = ctrl.history().to_vec();
        let before_forecast = ctrl.forecast().clone();

        store.fail_with(ErrorCode::StoreUnavailable);
        let result = ctrl.log_cycle(log(Some(jan(8)), Some(jan(9)))).await;

        assert!(matches!(result, Err(CycleTrackerError::StoreUnavailable(_))));
        assert_eq!(ctrl.history(), before_history.as_slice());
        assert_eq!(ctrl.forecast(), &before_forecast);
    }

    #[tokio::test]
    async fn delete_removes_record_and_recomputes() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store.clone());
        let older = ctrl.log_cycle(log(Some(jan(1)), Some(jan(3)))).await.unwrap();
        let newer = ctrl.log_cycle(log(Some(jan(8)), Some(jan(10)))).await.unwrap();

        ctrl.delete_cycle(DeleteCycleCommand { id: newer.id() }).await.unwrap();

        assert_eq!(ctrl.history(), &[older]);
        assert_eq!(ctrl.forecast().prediction().unwrap().reference_date, jan(3));
    }

    #[tokio::test]
    async fn deleting_last_record_returns_to_no_data() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store);
        let only = ctrl.log_cycle(log(Some(jan(1)), Some(jan(3)))).await.unwrap();

        ctrl.delete_cycle(DeleteCycleCommand { id: only.id() }).await.unwrap();

        assert!(ctrl.history().is_empty());
        assert!(ctrl.forecast().is_no_data());
    }

    #[tokio::test]
    async fn deleting_twice_reports_not_found_and_keeps_others() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store);
        let keep = ctrl.log_cycle(log(Some(jan(1)), Some(jan(3)))).await.unwrap();
        let gone = ctrl.log_cycle(log(Some(jan(8)), Some(jan(10)))).await.unwrap();

        ctrl.delete_cycle(DeleteCycleCommand { id: gone.id() }).await.unwrap();
        let second = ctrl.delete_cycle(DeleteCycleCommand { id: gone.id() }).await;

        assert!(matches!(second, Err(CycleTrackerError::NotFound(id)) if id == gone.id()));
        assert_eq!(ctrl.history(), &[keep]);
    }

    #[tokio::test]
    async fn not_found_drops_stale_cached_record() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store.clone());
        let record = ctrl.log_cycle(log(Some(jan(1)), Some(jan(3)))).await.unwrap();

        // Removed behind the controller's back, e.g. from another device.
        store.inner.remove(&test_user(), &record.id()).await.unwrap();

        let result = ctrl.delete_cycle(DeleteCycleCommand { id: record.id() }).await;
        assert!(matches!(result, Err(CycleTrackerError::NotFound(_))));
        assert!(ctrl.history().is_empty());
        assert!(ctrl.forecast().is_no_data());
    }

    #[tokio::test]
    async fn delete_store_failure_keeps_record() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store.clone());
        let record = ctrl.log_cycle(log(Some(jan(1)), Some(jan(3)))).await.unwrap();

        store.fail_with(ErrorCode::DatabaseError);
        let result = ctrl.delete_cycle(DeleteCycleCommand { id: record.id() }).await;

        assert!(matches!(result, Err(CycleTrackerError::StoreUnavailable(_))));
        assert_eq!(ctrl.history(), &[record]);
    }

    #[tokio::test]
    async fn load_sorts_storage_order_newest_first() {
        let store = Arc::new(MockCycleLogStore::new());
        for (start, end) in [(jan(8), jan(10)), (jan(1), jan(3))] {
            let draft = NewCycleRecord::new(start, Some(end), None, Timestamp::now()).unwrap();
            store.inner.append(&test_user(), &draft).await.unwrap();
        }
        let mut ctrl = controller(store.clone());

        let forecast = ctrl.load().await.unwrap().clone();

        assert_eq!(store.calls(), vec!["list"]);
        assert_eq!(forecast.prediction().unwrap().reference_date, jan(10));
        assert_eq!(ctrl.history()[0].start_date(), jan(8));
    }

    #[tokio::test]
    async fn load_failure_is_store_unavailable() {
        let store = Arc::new(MockCycleLogStore::new());
        store.fail_with(ErrorCode::StoreUnavailable);
        let mut ctrl = controller(store);

        assert!(matches!(ctrl.load().await, Err(CycleTrackerError::StoreUnavailable(_))));
        assert!(ctrl.forecast().is_no_data());
    }

    #[tokio::test]
    async fn select_date_rejects_end_before_start() {
        let mut ctrl = controller(Arc::new(MockCycleLogStore::new()));

        ctrl.select_date(jan(10)).unwrap();
        let result = ctrl.select_date(jan(5));

        assert!(matches!(result, Err(CycleTrackerError::Validation(_))));
        assert_eq!(ctrl.selection().phase(), SelectionPhase::AwaitingEnd);
        assert_eq!(ctrl.selection().start_date(), Some(jan(10)));
    }

    #[tokio::test]
    async fn log_selected_cycle_uses_selection_and_resets_it() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store);

        ctrl.select_date(jan(2)).unwrap();
        ctrl.select_date(jan(6)).unwrap();
        let record = ctrl.log_selected_cycle(Some("cramps".into())).await.unwrap();

        assert_eq!(record.start_date(), jan(2));
        assert_eq!(record.end_date(), Some(jan(6)));
        assert_eq!(record.symptoms(), Some("cramps"));
        assert_eq!(ctrl.selection(), DateSelection::new());
    }

    #[tokio::test]
    async fn log_selected_cycle_without_end_keeps_selection() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store.clone());

        ctrl.select_date(jan(2)).unwrap();
        let result = ctrl.log_selected_cycle(None).await;

        assert!(matches!(result, Err(CycleTrackerError::Validation(_))));
        assert_eq!(ctrl.selection().start_date(), Some(jan(2)));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn custom_cycle_length_flows_into_forecast() {
        let store = Arc::new(MockCycleLogStore::new());
        let mut ctrl = controller(store).with_cycle_length(30);

        ctrl.log_cycle(log(Some(jan(1)), Some(jan(5)))).await.unwrap();

        let prediction = ctrl.forecast().prediction().unwrap();
        assert_eq!(prediction.cycle_length_days, 30);
        assert_eq!(prediction.next_predicted_start, NaiveDate::from_ymd_opt(2024, 2, 4).unwrap());
    }

    #[tokio::test]
    async fn advice_uses_configured_table() {
        let ctrl = controller(Arc::new(MockCycleLogStore::new()))
            .with_advisor(SymptomAdvisor::with_rules([("spotting", "Note it down.")]));
        assert_eq!(ctrl.advice("Spotting today"), "Note it down.");
        assert_eq!(ctrl.advice("cramps"), GENERIC_TIP);
    }
}
