use std::fmt;

/// Where in the per-row pipeline an address gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    /// Service answered but could not resolve the address
    Geocode,
    /// Request did not produce a usable answer
    Transport,
    Projection,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureStage::Geocode => "geocode",
            FailureStage::Transport => "transport",
            FailureStage::Projection => "projection",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    pub row: u32,
    pub address: String,
    pub stage: FailureStage,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub rows_scanned: usize,
    pub blank_rows: usize,
    /// Non-blank rows handed to the geocoder; bounded by the address limit
    pub attempted: usize,
    pub geocoded: usize,
    pub projected: usize,
    pub limit_reached: bool,
    pub failures: Vec<RowFailure>,
}

impl BatchReport {
    pub fn record_failure(
        &mut self,
        row: u32,
        address: &str,
        stage: FailureStage,
        reason: impl Into<String>,
    ) {
        self.failures.push(RowFailure {
            row,
            address: address.to_string(),
            stage,
            reason: reason.into(),
        });
    }

    pub fn failures_at(&self, stage: FailureStage) -> usize {
        self.failures.iter().filter(|f| f.stage == stage).count()
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Geocoding Report ===\n");
        summary.push_str(&format!("Rows Scanned: {}\n", self.rows_scanned));
        summary.push_str(&format!("Blank Rows Skipped: {}\n", self.blank_rows));
        summary.push_str(&format!("Addresses Attempted: {}\n", self.attempted));
        summary.push_str(&format!(
            "Geocoded: {} ({:.1}%)\n",
            self.geocoded,
            percentage(self.geocoded, self.attempted)
        ));
        summary.push_str(&format!(
            "Projected: {} ({:.1}%)\n",
            self.projected,
            percentage(self.projected, self.attempted)
        ));
        if self.limit_reached {
            summary.push_str("Address limit reached before the end of the sheet\n");
        }

        summary.push_str(&format!("\nFailures: {}\n", self.failures.len()));
        for failure in self.failures.iter().take(10) {
            summary.push_str(&format!(
                "  Row {} [{}] {}: {}\n",
                failure.row, failure.stage, failure.address, failure.reason
            ));
        }
        if self.failures.len() > 10 {
            summary.push_str(&format!("  ... and {} more\n", self.failures.len() - 10));
        }

        summary
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}
