//! Board pipeline service.
//!
//! Ties a layout and an admission source together: fetch, reconcile, assemble. Each call runs
//! an independent cycle with no state carried over, so one service can be cloned into every
//! request handler.

use crate::bed_id::{normalize, BedId};
use crate::board::{assemble, Board, PatientView};
use crate::layout::Layout;
use crate::reconcile::{reconcile, Reconciliation};
use crate::source::AdmissionSource;
use crate::WardResult;
use std::sync::Arc;

/// Pure board operations - no API concerns.
#[derive(Clone)]
pub struct WardBoardService {
    layout: Arc<Layout>,
    source: Arc<dyn AdmissionSource>,
}

impl WardBoardService {
    pub fn new(layout: Arc<Layout>, source: Arc<dyn AdmissionSource>) -> Self {
        Self { layout, source }
    }

    /// Run one reconciliation cycle and return its result without assembling a board.
    ///
    /// # Errors
    ///
    /// Returns the source's error unchanged if the fetch fails.
    pub fn reconcile(&self) -> WardResult<Reconciliation> {
        let records = self.source.fetch()?;
        Ok(reconcile(&self.layout, records))
    }

    /// Run one full cycle and return a fresh board.
    ///
    /// # Errors
    ///
    /// Returns the source's error unchanged if the fetch fails; no partial board is produced.
    pub fn board(&self) -> WardResult<Board> {
        let reconciliation = self.reconcile()?;
        let board = assemble(&self.layout, &reconciliation);

        tracing::info!(
            occupied = reconciliation.occupied.len(),
            waiting = reconciliation.waiting.len(),
            updated_at = %board.updated_at,
            "board assembled"
        );

        Ok(board)
    }

    /// Valid bed ids in layout order.
    pub fn beds(&self) -> &[BedId] {
        self.layout.all_beds()
    }

    /// Look up the patient recorded against a bed code.
    ///
    /// Both the query and each record's bed field are normalised before comparison, so `s1`
    /// finds a patient recorded as `S01`. The first matching record in source order is
    /// returned. A query that does not normalise returns `Ok(None)` without fetching.
    ///
    /// # Errors
    ///
    /// Returns the source's error unchanged if the fetch fails.
    pub fn bed_detail(&self, code: &str) -> WardResult<Option<PatientView>> {
        let Some(wanted) = normalize(code) else {
            return Ok(None);
        };

        let records = self.source.fetch()?;
        Ok(records
            .iter()
            .find(|r| r.bedno.as_deref().and_then(normalize).as_ref() == Some(&wanted))
            .map(PatientView::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admission::AdmissionRecord;
    use crate::board::BedStatus;
    use crate::source::InMemorySource;
    use crate::WardError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingSource;

    impl AdmissionSource for FailingSource {
        fn fetch(&self) -> WardResult<Vec<AdmissionRecord>> {
            Err(WardError::InvalidInput("database unavailable".into()))
        }
    }

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl AdmissionSource for CountingSource {
        fn fetch(&self) -> WardResult<Vec<AdmissionRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    fn layout() -> Arc<Layout> {
        Arc::new(
            Layout::from_zones(vec![("A".into(), vec!["A01".into(), "A02".into()])])
                .expect("valid layout"),
        )
    }

    fn admission(bed: &str, an: &str) -> AdmissionRecord {
        AdmissionRecord {
            bedno: Some(bed.into()),
            an: Some(an.into()),
            ..Default::default()
        }
    }

    fn service(records: Vec<AdmissionRecord>) -> WardBoardService {
        WardBoardService::new(layout(), Arc::new(InMemorySource::new(records)))
    }

    #[test]
    fn board_runs_a_full_cycle() {
        let svc = service(vec![admission("a1", "1"), admission("A01", "2")]);
        let board = svc.board().expect("board");

        let slots: Vec<BedStatus> = board.zones[0]
            .rooms
            .iter()
            .map(|r| r.beds[0].status)
            .collect();
        assert_eq!(slots, vec![BedStatus::Occupied, BedStatus::Empty]);
        assert_eq!(board.center.waiting.len(), 1);
        assert_eq!(board.center.waiting[0].patient.an.as_deref(), Some("2"));
    }

    #[test]
    fn source_failure_propagates() {
        let svc = WardBoardService::new(layout(), Arc::new(FailingSource));
        let err = svc.board().expect_err("source fails");
        assert!(err.to_string().contains("database unavailable"));
        assert!(svc.bed_detail("A01").is_err());
    }

    #[test]
    fn beds_lists_the_layout() {
        let svc = service(Vec::new());
        let beds: Vec<&str> = svc.beds().iter().map(BedId::as_str).collect();
        assert_eq!(beds, vec!["A01", "A02"]);
    }

    #[test]
    fn bed_detail_matches_through_normalisation() {
        let svc = service(vec![admission(" a 2", "10"), admission("A02", "11")]);

        let found = svc.bed_detail("a2").expect("lookup").expect("patient");
        assert_eq!(found.an.as_deref(), Some("10"));

        assert!(svc.bed_detail("A01").expect("lookup").is_none());
    }

    #[test]
    fn blank_bed_detail_query_skips_the_source() {
        let source = Arc::new(CountingSource::default());
        let svc = WardBoardService::new(layout(), source.clone());
        assert!(svc.bed_detail("  ").expect("lookup").is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
