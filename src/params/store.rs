use thiserror::Error;

use crate::device::DeviceSink;
use crate::orientation::Orientation;
use crate::pressure::PressureCurve;
use crate::screen_map::Rect;

use super::{FieldKind, FieldMask, ParameterSet};

/// A field whose device write failed during an apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to apply {kind}: {reason}")]
pub struct FieldFailure {
    pub kind: FieldKind,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed to apply: {}", .failures.len(), summarize(.failures))]
pub struct ApplyError {
    pub failures: Vec<FieldFailure>,
}

fn summarize(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Per-field outcome of [`ParameterStore::apply_config`].
///
/// Fields in `committed` were written and promoted to the baseline even if
/// other fields of the same call failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub committed: Vec<FieldKind>,
    pub failures: Vec<FieldFailure>,
}

impl ApplyReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn committed_mask(&self) -> FieldMask {
        self.committed
            .iter()
            .fold(FieldMask::NONE, |mask, kind| mask | kind.mask())
    }

    pub fn failed_mask(&self) -> FieldMask {
        self.failures
            .iter()
            .fold(FieldMask::NONE, |mask, f| mask | f.kind.mask())
    }

    pub fn into_result(self) -> Result<(), ApplyError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ApplyError {
                failures: self.failures,
            })
        }
    }
}

/// Editable configuration plus the last state known to be on the device.
///
/// Edits go to `current`. [`apply_config`](Self::apply_config) pushes masked
/// fields to the device and promotes them into `baseline`;
/// [`restore_config`](Self::restore_config) copies masked fields back.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    current: ParameterSet,
    baseline: ParameterSet,
}

impl ParameterStore {
    /// Seed both snapshots from the device's configuration at startup.
    pub fn new(initial: ParameterSet) -> Self {
        Self {
            current: initial,
            baseline: initial,
        }
    }

    pub fn current(&self) -> &ParameterSet {
        &self.current
    }

    pub fn baseline(&self) -> &ParameterSet {
        &self.baseline
    }

    /// Record a display geometry change. Only `current` is touched.
    pub fn set_screen_size(&mut self, screen_size: Rect) {
        log::debug!("Screen size changed to {}", screen_size);
        self.current.screen_size = screen_size;
    }

    pub fn screen_size(&self) -> Rect {
        self.current.screen_size
    }

    pub fn set_screen_map(&mut self, screen_map: Rect) {
        self.current.screen_map = screen_map;
    }

    pub fn screen_map(&self) -> Rect {
        self.current.screen_map
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.current.orientation = orientation;
    }

    pub fn orientation(&self) -> Orientation {
        self.current.orientation
    }

    pub fn set_pressure_map(&mut self, coefs: [i16; 4]) {
        self.current.pressure_curve.set_from_coefficients(coefs);
    }

    pub fn set_pressure_code(&mut self, code: u64) {
        self.current.pressure_curve = PressureCurve::from_code(code);
    }

    pub fn pressure_map(&self) -> PressureCurve {
        self.current.pressure_curve
    }

    pub fn is_invalid_screen_map(&self) -> bool {
        !self.current.screen_map.is_valid()
    }

    /// Whether the pending screen map covers the whole display.
    pub fn is_full_screen_map(&self) -> bool {
        self.current.screen_map.is_default(&self.current.screen_size)
    }

    pub fn use_full_screen_map(&mut self) {
        self.current.screen_map = self.current.screen_size;
    }

    /// Replace an unset screen map with the full-screen default.
    ///
    /// Returns true if the map was replaced. Nothing changes while the
    /// display geometry is itself unknown.
    pub fn ensure_valid_screen_map(&mut self) -> bool {
        if !self.is_invalid_screen_map() {
            return false;
        }
        if !self.current.screen_size.is_valid() {
            log::warn!("Screen map is unset and display geometry is unknown");
            return false;
        }
        log::debug!(
            "Screen map {} is unset, falling back to full screen {}",
            self.current.screen_map,
            self.current.screen_size
        );
        self.use_full_screen_map();
        true
    }

    /// Fields with unapplied edits.
    pub fn pending(&self) -> FieldMask {
        self.current.diff(&self.baseline)
    }

    /// Write each masked field to `sink` and promote the ones that succeed.
    ///
    /// Fields are processed in [`FieldKind::ORDER`]. A failed field leaves
    /// its baseline untouched and does not stop the remaining fields.
    pub fn apply_config<S>(&mut self, mask: FieldMask, sink: &mut S) -> ApplyReport
    where
        S: DeviceSink + ?Sized,
    {
        let mut report = ApplyReport::default();

        for kind in mask.fields() {
            let value = self.current.field(kind);
            match sink.write(&value) {
                Ok(()) => {
                    self.baseline.set_field(value);
                    log::info!("Applied {}", kind);
                    report.committed.push(kind);
                }
                Err(e) => {
                    log::warn!("Failed to apply {}: {}", kind, e);
                    report.failures.push(FieldFailure {
                        kind,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Discard edits to the masked fields. Never touches the device.
    pub fn restore_config(&mut self, mask: FieldMask) {
        log::debug!("Restoring {}", mask);
        self.current.copy_fields(&self.baseline, mask);
    }
}
