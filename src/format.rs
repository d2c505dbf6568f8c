//! Capacity value formatting.

const BYTES_PER_TERABYTE: f64 = 1e12;

/// Format a byte quantity with binary-scaled unit suffixes, two decimal
/// places. Quantities below one byte print as `0`.
pub fn pretty_print_capacity(bytes: f64) -> String {
    const UNITS: [(i32, &str); 7] = [
        (6, "E"),
        (5, "P"),
        (4, "T"),
        (3, "G"),
        (2, "M"),
        (1, "K"),
        (0, "b"),
    ];
    for (exponent, unit) in UNITS {
        let scale = 1024f64.powi(exponent);
        if bytes >= scale {
            return format!("{:.2}{}", bytes / scale, unit);
        }
    }
    "0".to_string()
}

/// Scales sample counts to estimated bytes against the known total capacity
/// and formats them, either as a capacity or as a monthly dollar cost.
#[derive(Debug, Clone)]
pub struct CapacityFormatter {
    total_capacity: u64,
    total_samples: u64,
    dollars_per_terabyte: Option<f64>,
}

impl CapacityFormatter {
    pub fn new(total_capacity: u64, total_samples: u64, dollars_per_terabyte: Option<f64>) -> Self {
        Self {
            total_capacity,
            total_samples,
            dollars_per_terabyte,
        }
    }

    /// Format the capacity share represented by `samples` samples.
    pub fn format(&self, samples: u64) -> String {
        let bytes = if self.total_samples == 0 {
            0.0
        } else {
            samples as f64 * self.total_capacity as f64 / self.total_samples as f64
        };
        match self.dollars_per_terabyte {
            Some(rate) => format!("${:.2}/month", bytes / BYTES_PER_TERABYTE * rate),
            None => pretty_print_capacity(bytes),
        }
    }
}
