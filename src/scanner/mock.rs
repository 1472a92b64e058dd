//! Mock scanner for tests and demos

use crate::scanner::{BeaconScanner, ProximityReading, ScanError, ScanResult, ScannerStatus};
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// Scripted scanner that replays prepared reading batches.
///
/// Failures are injected deterministically with [`fail_next`](Self::fail_next)
/// so tests never depend on chance.
pub struct MockScanner {
    batches: VecDeque<Vec<ProximityReading>>,
    status: ScannerStatus,
    connected: bool,
    pending_error: Option<ScanError>,
}

impl MockScanner {
    pub fn new() -> Self {
        let mut status = ScannerStatus::new();
        status.active = true;
        Self {
            batches: VecDeque::new(),
            status,
            connected: true,
            pending_error: None,
        }
    }

    /// Queue a batch for a later poll
    pub fn queue_batch(&mut self, readings: Vec<ProximityReading>) {
        self.batches.push_back(readings);
    }

    /// Make the next poll fail with `error`, once
    pub fn fail_next(&mut self, error: ScanError) {
        self.pending_error = Some(error);
    }

    /// Simulate losing the adapter
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.status.active = false;
    }

    /// Restore the adapter
    pub fn reconnect(&mut self) {
        self.connected = true;
        self.status.active = true;
    }

    /// Batches still waiting to be polled
    pub fn queued_batch_count(&self) -> usize {
        self.batches.len()
    }
}

impl Default for MockScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl BeaconScanner for MockScanner {
    fn poll_batch(&mut self) -> ScanResult<Option<Vec<ProximityReading>>> {
        if !self.connected {
            self.status.error_count += 1;
            return Err(ScanError::AdapterUnavailable {
                details: "mock adapter disconnected".to_string(),
            });
        }

        if let Some(error) = self.pending_error.take() {
            self.status.error_count += 1;
            return Err(error);
        }

        match self.batches.pop_front() {
            Some(batch) => {
                self.status.batches_received += 1;
                self.status.last_batch_time_ms = Some(
                    SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .unwrap_or_default()
                        .as_millis() as u64,
                );
                Ok(Some(batch))
            }
            None => Ok(None),
        }
    }

    fn status(&self) -> ScannerStatus {
        self.status.clone()
    }

    fn is_active(&self) -> bool {
        self.connected
    }

    fn reset(&mut self) -> ScanResult<()> {
        self.batches.clear();
        self.pending_error = None;
        self.connected = true;
        self.status = ScannerStatus {
            active: true,
            ..ScannerStatus::new()
        };
        Ok(())
    }
}
