//! Dashboard controller
//!
//! Issues the nationwide and district reads, builds panels from whatever
//! comes back and publishes each resulting view snapshot on a `watch`
//! channel.
//!
//! Failure policy: a failed or empty read clears its loading mark, logs, and
//! leaves the previously published panel in place. No retries.
//!
//! Loads do not overlap: a second `load()` waits for the one in progress, so
//! an older payload can never replace a newer one.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use super::view::{CasesPanel, DashboardView, DistrictPanel};
use crate::config::DashboardConfig;
use crate::source::CaseSource;

/// What became of one read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Payload received and its panel replaced
    Updated,
    /// Upstream answered with no data; previous panel kept
    NoData,
    /// Request failed; previous panel kept
    Failed,
}

/// Outcome of one load, per dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub cases: FetchOutcome,
    pub districts: FetchOutcome,
}

impl LoadReport {
    pub fn all_updated(&self) -> bool {
        self.cases == FetchOutcome::Updated && self.districts == FetchOutcome::Updated
    }
}

/// Fetches dashboard data and publishes view snapshots
pub struct DashboardController {
    source: Arc<dyn CaseSource>,
    config: DashboardConfig,
    views: watch::Sender<DashboardView>,
    load_lock: Mutex<()>,
}

impl DashboardController {
    pub fn new(source: Arc<dyn CaseSource>, config: DashboardConfig) -> Self {
        let (views, _) = watch::channel(DashboardView::default());
        Self {
            source,
            config,
            views,
            load_lock: Mutex::new(()),
        }
    }

    /// Receive every snapshot published from now on
    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.views.subscribe()
    }

    /// Latest published snapshot
    pub fn current(&self) -> DashboardView {
        self.views.borrow().clone()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Run both reads concurrently and return once both have settled
    pub async fn load(&self) -> LoadReport {
        let _guard = self.load_lock.lock().await;
        tracing::info!("Loading dashboard data");

        let (cases, districts) = tokio::join!(self.load_cases(), self.load_districts());
        let report = LoadReport { cases, districts };

        tracing::info!(
            cases = ?report.cases,
            districts = ?report.districts,
            "Dashboard load finished"
        );
        report
    }

    async fn load_cases(&self) -> FetchOutcome {
        self.begin_request();

        match self.source.fetch_covid19_data().await {
            Ok(Some(data)) => {
                let panel = CasesPanel::build(data, &self.config);
                tracing::info!(
                    regions = panel.regions.len(),
                    chart_points = panel.series.len(),
                    "Nationwide data updated"
                );
                self.finish_request(|view| view.cases = Some(panel));
                FetchOutcome::Updated
            }
            Ok(None) => {
                tracing::info!("Nationwide data source returned no data");
                self.finish_request(|_| {});
                FetchOutcome::NoData
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch nationwide data");
                self.finish_request(|_| {});
                FetchOutcome::Failed
            }
        }
    }

    async fn load_districts(&self) -> FetchOutcome {
        self.begin_request();

        match self.source.fetch_district_wise().await {
            Ok(Some(data)) => {
                let panel = DistrictPanel::build(&data);
                tracing::info!(rows = panel.rows.len(), "District data updated");
                self.finish_request(|view| view.districts = Some(panel));
                FetchOutcome::Updated
            }
            Ok(None) => {
                tracing::info!("District data source returned no data");
                self.finish_request(|_| {});
                FetchOutcome::NoData
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch district data");
                self.finish_request(|_| {});
                FetchOutcome::Failed
            }
        }
    }

    fn begin_request(&self) {
        self.views.send_modify(|view| {
            view.pending_requests += 1;
            view.generation += 1;
        });
    }

    fn finish_request(&self, apply: impl FnOnce(&mut DashboardView)) {
        self.views.send_modify(|view| {
            apply(view);
            view.pending_requests = view.pending_requests.saturating_sub(1);
            view.generation += 1;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{
        CaseRecord, Covid19Data, DistrictGroup, DistrictRecord, DistrictWise, FetchError,
        TimeSeriesPoint,
    };
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Semaphore;

    /// In-memory source; `failing` switches both reads to errors
    struct FakeSource {
        covid: Option<Covid19Data>,
        districts: Option<DistrictWise>,
        failing: AtomicBool,
    }

    impl FakeSource {
        fn new(covid: Option<Covid19Data>, districts: Option<DistrictWise>) -> Self {
            Self {
                covid,
                districts,
                failing: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl CaseSource for FakeSource {
        async fn fetch_covid19_data(&self) -> Result<Option<Covid19Data>, FetchError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(FetchError::Unavailable);
            }
            Ok(self.covid.clone())
        }

        async fn fetch_district_wise(&self) -> Result<Option<DistrictWise>, FetchError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(FetchError::Timeout);
            }
            Ok(self.districts.clone())
        }
    }

    /// Wraps a source; every read waits for a permit from `gate`
    struct GatedSource {
        inner: FakeSource,
        gate: Arc<Semaphore>,
    }

    #[async_trait]
    impl CaseSource for GatedSource {
        async fn fetch_covid19_data(&self) -> Result<Option<Covid19Data>, FetchError> {
            let _permit = self.gate.acquire().await.unwrap();
            self.inner.fetch_covid19_data().await
        }

        async fn fetch_district_wise(&self) -> Result<Option<DistrictWise>, FetchError> {
            let _permit = self.gate.acquire().await.unwrap();
            self.inner.fetch_district_wise().await
        }
    }

    fn gated() -> (Arc<DashboardController>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let source = Arc::new(GatedSource {
            inner: FakeSource::new(Some(covid()), Some(districts())),
            gate: gate.clone(),
        });
        let controller = Arc::new(DashboardController::new(source, DashboardConfig::default()));
        (controller, gate)
    }

    fn covid() -> Covid19Data {
        Covid19Data {
            statewise: vec![
                CaseRecord::new("Total", "26917").last_updated("26/04/2020, 10:00:00 pm"),
                CaseRecord::new("Maharashtra", "7628"),
                CaseRecord::new("Sikkim", "0"),
            ],
            cases_time_series: vec![
                TimeSeriesPoint::new("25 April ", "24942"),
                TimeSeriesPoint::new("26 April ", "26917"),
            ],
        }
    }

    fn districts() -> DistrictWise {
        let mut list = BTreeMap::new();
        list.insert("Mumbai".to_string(), DistrictRecord::new(5049));
        list.insert("Pune".to_string(), DistrictRecord::new(1072));
        let mut groups = BTreeMap::new();
        groups.insert("districtData".to_string(), DistrictGroup::Districts(list));
        let mut data = DistrictWise::new();
        data.insert("Maharashtra".to_string(), groups);
        data
    }

    #[tokio::test]
    async fn test_load_populates_view() {
        let source = Arc::new(FakeSource::new(Some(covid()), Some(districts())));
        let controller = DashboardController::new(source, DashboardConfig::default());

        let report = controller.load().await;
        assert!(report.all_updated());

        let view = controller.current();
        assert!(!view.is_loading());
        assert_eq!(view.generation, 4);
        let names: Vec<_> = view.table_rows().iter().map(|r| r.state.as_str()).collect();
        assert_eq!(names, vec!["Total", "Maharashtra"]);
        assert_eq!(view.district_rows().len(), 2);
        assert_eq!(
            view.cases.unwrap().last_updated.as_deref(),
            Some("26th April 2020, 10:00:00 pm")
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let source = Arc::new(FakeSource::new(Some(covid()), Some(districts())));
        let controller = DashboardController::new(source.clone(), DashboardConfig::default());

        controller.load().await;
        let before = controller.current();

        source.failing.store(true, Ordering::SeqCst);
        let report = controller.load().await;
        assert_eq!(report.cases, FetchOutcome::Failed);
        assert_eq!(report.districts, FetchOutcome::Failed);

        let after = controller.current();
        assert!(!after.is_loading());
        assert_eq!(after.cases, before.cases);
        assert_eq!(after.districts, before.districts);
        assert!(after.generation > before.generation);
    }

    #[tokio::test]
    async fn test_no_data_clears_loading() {
        let source = Arc::new(FakeSource::new(None, None));
        let controller = DashboardController::new(source, DashboardConfig::default());

        let report = controller.load().await;
        assert_eq!(report.cases, FetchOutcome::NoData);
        assert_eq!(report.districts, FetchOutcome::NoData);

        let view = controller.current();
        assert!(!view.is_loading());
        assert!(view.cases.is_none());
        assert!(view.districts.is_none());
    }

    #[tokio::test]
    async fn test_reload_replaces_district_rows() {
        let source = Arc::new(FakeSource::new(Some(covid()), Some(districts())));
        let controller = DashboardController::new(source, DashboardConfig::default());

        controller.load().await;
        controller.load().await;
        assert_eq!(controller.current().district_rows().len(), 2);
    }

    #[tokio::test]
    async fn test_subscriber_sees_final_snapshot() {
        let source = Arc::new(FakeSource::new(Some(covid()), Some(districts())));
        let controller = DashboardController::new(source, DashboardConfig::default());
        let mut rx = controller.subscribe();

        controller.load().await;

        assert!(rx.has_changed().unwrap());
        let view = rx.borrow_and_update().clone();
        assert!(view.cases.is_some());
        assert!(view.districts.is_some());
        assert_eq!(view.pending_requests, 0);
    }

    #[tokio::test]
    async fn test_loading_while_reads_in_flight() {
        let (controller, gate) = gated();
        let mut rx = controller.subscribe();

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.load().await }
        });

        let view = rx.wait_for(|view| view.pending_requests == 2).await.unwrap().clone();
        assert!(view.is_loading());
        assert!(view.cases.is_none());
        assert!(view.districts.is_none());

        gate.add_permits(2);
        let report = task.await.unwrap();
        assert!(report.all_updated());

        let view = controller.current();
        assert!(!view.is_loading());
        assert!(view.cases.is_some());
        assert!(view.districts.is_some());
    }

    #[tokio::test]
    async fn test_overlapping_loads_run_one_at_a_time() {
        let (controller, gate) = gated();
        let mut rx = controller.subscribe();

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.load().await }
        });
        rx.wait_for(|view| view.pending_requests == 2).await.unwrap();

        let second = tokio::spawn({
            let controller = controller.clone();
            async move { controller.load().await }
        });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(controller.current().pending_requests, 2);

        gate.add_permits(4);
        assert!(first.await.unwrap().all_updated());
        assert!(second.await.unwrap().all_updated());

        let view = controller.current();
        assert_eq!(view.pending_requests, 0);
        assert_eq!(view.generation, 8);
    }
}
