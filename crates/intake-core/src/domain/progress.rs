//! Form completion model
//!
//! Every tracked signal carries an equal share of the 0-100 score. The submit
//! action opens once the score reaches the gate threshold.

use serde::{Deserialize, Serialize};

/// Tracked completion signals, one flag each
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSignals {
    pub construction_type: bool,
    pub name: bool,
    pub email: bool,
    pub phone: bool,
    pub address: bool,
    pub postal_code: bool,
    pub city: bool,
    pub date: bool,
    pub attachment: bool,
}

impl CompletionSignals {
    pub const COUNT: usize = 9;

    pub fn as_array(&self) -> [bool; Self::COUNT] {
        [
            self.construction_type,
            self.name,
            self.email,
            self.phone,
            self.address,
            self.postal_code,
            self.city,
            self.date,
            self.attachment,
        ]
    }

    pub fn progress(&self) -> u8 {
        compute_progress(&self.as_array())
    }
}

/// Share of filled signals, rounded to the nearest percent
pub fn compute_progress(signals: &[bool]) -> u8 {
    if signals.is_empty() {
        return 0;
    }
    let filled = signals.iter().filter(|s| **s).count();
    let percent = (filled as f64 * 100.0 / signals.len() as f64).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Progress threshold for submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitGate {
    pub threshold: u8,
}

impl Default for SubmitGate {
    fn default() -> Self {
        Self { threshold: 50 }
    }
}

impl SubmitGate {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn is_open(&self, progress: u8) -> bool {
        progress >= self.threshold
    }

    /// Submit button label for the given progress
    pub fn label(&self, progress: u8) -> String {
        if self.is_open(progress) {
            "Wyślij zapytanie".to_string()
        } else {
            format!("Wypełnij formularz ({}%)", progress)
        }
    }
}
