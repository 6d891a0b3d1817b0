//! Interest rates and extra-interest thresholds

/// Annual interest rates and the extra-interest caps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterestRates {
    pub oa: f64,
    pub sa: f64,
    pub ma: f64,
    /// Retirement account rate (no retirement account is projected)
    pub ra: f64,
    /// Extra rate on the first combined balances
    pub extra: f64,
    /// Portion of OA eligible for extra interest
    pub extra_oa_cap: f64,
    /// Combined balance eligible for extra interest
    pub extra_total_cap: f64,
}

impl Default for InterestRates {
    fn default() -> Self {
        Self {
            oa: 0.025,
            sa: 0.04,
            ma: 0.04,
            ra: 0.04,
            extra: 0.01,
            extra_oa_cap: 20_000.0,
            extra_total_cap: 60_000.0,
        }
    }
}
