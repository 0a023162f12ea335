use crate::config::RevealPolicy;

/// Reveal state of a single panel. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    /// Entry condition met under the load-gated policy; waiting on the image.
    Pending,
    Revealed,
}

/// Result of feeding one intersection signal to the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Below threshold, already handled, or unknown panel.
    Ignored,
    /// Panel is now revealed. The reveal observer can drop it.
    Revealed,
    /// Panel met its entry condition but waits for its image. The reveal
    /// observer can drop it; promotion happens on load reconciliation.
    Deferred,
}

/// Owns the `revealed` and `pending_reveal` flags of every panel.
#[derive(Clone, Debug)]
pub struct VisibilityTracker {
    policy: RevealPolicy,
    reveal_threshold: f64,
    current_threshold: f64,
    track_current: bool,
    states: Vec<PanelVisibility>,
    last_current: Option<usize>,
}

impl VisibilityTracker {
    pub fn new(
        panel_count: usize,
        policy: RevealPolicy,
        reveal_threshold: f64,
        current_threshold: f64,
        track_current: bool,
    ) -> Self {
        Self {
            policy,
            reveal_threshold,
            current_threshold,
            track_current,
            states: vec![PanelVisibility::Hidden; panel_count],
            last_current: None,
        }
    }

    pub fn policy(&self) -> RevealPolicy {
        self.policy
    }

    pub fn state(&self, index: usize) -> PanelVisibility {
        self.states.get(index).copied().unwrap_or_default()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.state(index) == PanelVisibility::Revealed
    }

    pub fn is_pending(&self, index: usize) -> bool {
        self.state(index) == PanelVisibility::Pending
    }

    pub fn revealed_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == PanelVisibility::Revealed)
            .count()
    }

    /// Handle a reveal-observer signal for `index` with on-screen fraction
    /// `ratio`. `loaded` is read from the image load tracker.
    pub fn on_intersection(&mut self, index: usize, ratio: f64, loaded: bool) -> RevealOutcome {
        let Some(state) = self.states.get_mut(index) else {
            return RevealOutcome::Ignored;
        };
        if *state != PanelVisibility::Hidden || ratio < self.reveal_threshold {
            return RevealOutcome::Ignored;
        }
        match (self.policy, loaded) {
            (RevealPolicy::Eager, _) | (RevealPolicy::LoadGated, true) => {
                *state = PanelVisibility::Revealed;
                log::debug!("[reveal] panel {} revealed (ratio {:.2})", index, ratio);
                RevealOutcome::Revealed
            }
            (RevealPolicy::LoadGated, false) => {
                *state = PanelVisibility::Pending;
                log::debug!("[reveal] panel {} waiting on image", index);
                RevealOutcome::Deferred
            }
        }
    }

    /// Promote a pending panel whose image has arrived. Returns `true` only on
    /// the Pending -> Revealed transition.
    pub fn promote_loaded(&mut self, index: usize) -> bool {
        match self.states.get_mut(index) {
            Some(state) if *state == PanelVisibility::Pending => {
                *state = PanelVisibility::Revealed;
                log::debug!("[reveal] panel {} revealed after load", index);
                true
            }
            _ => false,
        }
    }

    /// Handle a current-panel observer signal. Returns the panel to propose as
    /// current when it crosses the stricter threshold.
    pub fn on_current_signal(&mut self, index: usize, ratio: f64) -> Option<usize> {
        if !self.track_current || index >= self.states.len() || ratio < self.current_threshold {
            return None;
        }
        self.last_current = Some(index);
        Some(index)
    }

    /// Last panel that crossed the current threshold, if any.
    pub fn last_current(&self) -> Option<usize> {
        self.last_current
    }
}
