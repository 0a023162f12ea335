use smallvec::SmallVec;

/// Owns the `loaded` flag of every panel and batches arrivals for deferred
/// reconciliation with the visibility tracker.
#[derive(Clone, Debug)]
pub struct ImageLoadTracker {
    loaded: Vec<bool>,
    batch: SmallVec<[usize; 8]>,
    reconcile_scheduled: bool,
}

/// What the caller should do after reporting a load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Duplicate or unknown panel; nothing changed.
    Ignored,
    /// Recorded; a reconcile pass is already scheduled for this batch.
    Queued,
    /// Recorded and this is the first arrival of a new batch: schedule a
    /// deferred reconcile pass.
    ScheduleReconcile,
}

impl ImageLoadTracker {
    pub fn new(panel_count: usize) -> Self {
        Self {
            loaded: vec![false; panel_count],
            batch: SmallVec::new(),
            reconcile_scheduled: false,
        }
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded.get(index).copied().unwrap_or(false)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.iter().filter(|l| **l).count()
    }

    pub fn reconcile_scheduled(&self) -> bool {
        self.reconcile_scheduled
    }

    pub fn on_image_loaded(&mut self, index: usize) -> LoadOutcome {
        match self.loaded.get_mut(index) {
            Some(flag) if !*flag => *flag = true,
            _ => return LoadOutcome::Ignored,
        }
        self.batch.push(index);
        log::debug!("[load] panel {} image ready", index);
        if self.reconcile_scheduled {
            LoadOutcome::Queued
        } else {
            self.reconcile_scheduled = true;
            LoadOutcome::ScheduleReconcile
        }
    }

    /// Take the batch of panels that finished loading since the last pass.
    pub fn drain_batch(&mut self) -> SmallVec<[usize; 8]> {
        self.reconcile_scheduled = false;
        std::mem::take(&mut self.batch)
    }
}
