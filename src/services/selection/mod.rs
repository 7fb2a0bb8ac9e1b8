//! Drag-selection state machine for the time grid.
//!
//! Pointer events come in from the grid; the engine tracks the anchor slot
//! and the working selection, and resolves pointer-up (or a press on an
//! occupied slot) into an outcome the activity modal consumes. Once an
//! outcome is handed off the engine is back in `Idle`; the modal owns the
//! interaction from there, and closing it without saving touches nothing.

use chrono::NaiveTime;

use crate::models::activity::Activity;
use crate::models::slot::SlotCalendar;
use crate::services::occupancy::OccupancyIndex;

/// Internal state of the selection engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging {
        anchor: NaiveTime,
        selection: Vec<NaiveTime>,
    },
}

/// What a resolved gesture asks the embedding UI to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// Nothing to do
    None,
    /// Open the modal to create an activity over these slots
    OpenCreate { slots: Vec<NaiveTime> },
    /// Open the modal to edit an existing activity; `slots` is the
    /// activity's full span, not just the clicked slot
    OpenEdit {
        activity: Activity,
        slots: Vec<NaiveTime>,
    },
}

/// Tracks an in-progress drag selection and resolves it against occupancy.
#[derive(Debug, Default)]
pub struct SelectionEngine {
    state: SelectionState,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }

    /// Slots currently highlighted by the drag (empty when idle).
    pub fn working_selection(&self) -> &[NaiveTime] {
        match &self.state {
            SelectionState::Idle => &[],
            SelectionState::Dragging { selection, .. } => selection,
        }
    }

    /// Pointer pressed on a slot.
    ///
    /// On an unoccupied slot this starts a drag anchored there. On an
    /// occupied slot it is edit entry: the owning activity's whole span is
    /// reconstructed and handed back immediately.
    pub fn pointer_down(
        &mut self,
        slot: NaiveTime,
        occupancy: &OccupancyIndex,
        calendar: &SlotCalendar,
    ) -> SelectionOutcome {
        if !calendar.contains(slot) {
            log::debug!("Ignoring pointer-down off the grid at {}", slot.format("%H:%M"));
            return SelectionOutcome::None;
        }

        if let Some(activity) = occupancy.activity_at(slot) {
            let slots = calendar.slots_between(activity.start_time, activity.end_time);
            self.state = SelectionState::Idle;
            return SelectionOutcome::OpenEdit {
                activity: activity.clone(),
                slots,
            };
        }

        self.state = SelectionState::Dragging {
            anchor: slot,
            selection: vec![slot],
        };
        SelectionOutcome::None
    }

    /// Pointer moved onto a slot while dragging.
    ///
    /// The working selection becomes the inclusive index range between the
    /// anchor and the hovered slot (in either direction), minus any slot an
    /// existing activity occupies. Dragging across an activity therefore
    /// leaves a gap rather than failing.
    pub fn pointer_enter(
        &mut self,
        slot: NaiveTime,
        occupancy: &OccupancyIndex,
        calendar: &SlotCalendar,
    ) {
        let SelectionState::Dragging { anchor, selection } = &mut self.state else {
            return;
        };

        let (Some(anchor_idx), Some(current_idx)) =
            (calendar.index_of(*anchor), calendar.index_of(slot))
        else {
            return;
        };

        let (lo, hi) = if anchor_idx <= current_idx {
            (anchor_idx, current_idx)
        } else {
            (current_idx, anchor_idx)
        };

        *selection = (lo..=hi)
            .filter_map(|i| calendar.slot_at(i))
            .filter(|s| !occupancy.is_occupied(*s))
            .collect();
    }

    /// Pointer released. Finalizes a non-empty drag into a create request;
    /// a no-op otherwise.
    pub fn pointer_up(&mut self) -> SelectionOutcome {
        let state = std::mem::take(&mut self.state);
        match state {
            SelectionState::Dragging { selection, .. } if !selection.is_empty() => {
                SelectionOutcome::OpenCreate { slots: selection }
            }
            _ => SelectionOutcome::None,
        }
    }

    /// Abort any in-progress drag (modal closed without saving).
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }
}
