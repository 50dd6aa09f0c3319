//! Score counter shared by kills (credit) and abilities (debit).

/// Minimum score an ability demands before it may be bought.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    AtLeast(u32),
    Above(u32),
}

impl Threshold {
    pub fn admits(self, value: u32) -> bool {
        match self {
            Threshold::AtLeast(min) => value >= min,
            Threshold::Above(min) => value > min,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn credit(&mut self, amount: u32) {
        self.value = self.value.saturating_add(amount);
    }

    pub fn debit(&mut self, amount: u32) {
        self.value = self.value.saturating_sub(amount);
    }

    /// Check-then-deduct. Returns `false` and leaves the score untouched when
    /// `threshold` is not met.
    pub fn try_spend(&mut self, cost: u32, threshold: Threshold) -> bool {
        if !threshold.admits(self.value) {
            return false;
        }
        self.debit(cost);
        true
    }
}
