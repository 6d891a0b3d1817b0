//! Irregular cash flows: top-ups and withdrawals
//!
//! Recurring instructions are expanded into one event per period before a
//! projection runs. Each month's events are then netted into per-account deltas.

use serde::{Deserialize, Serialize};

use crate::period::{Period, YearMonth};
use crate::rates::AccountSplit;

/// What a cash-flow event does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowKind {
    OaTopup,
    OaWithdrawal,
    SaTopup,
    SaWithdrawal,
    MaTopup,
    MaWithdrawal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Annually,
}

/// Repeat an event `duration` times, one `frequency` step apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub frequency: Frequency,
    pub duration: u32,
}

/// A single top-up or withdrawal instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEvent {
    #[serde(alias = "type")]
    pub kind: CashFlowKind,

    pub period: Period,

    pub amount: f64,

    /// Whether an SA top-up is funded from the OA (ignored for other kinds)
    #[serde(default, alias = "is_sa_topup_from_oa")]
    pub is_from_oa: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

impl CashFlowEvent {
    pub fn new(kind: CashFlowKind, period: Period, amount: f64) -> Self {
        Self {
            kind,
            period,
            amount,
            is_from_oa: false,
            recurrence: None,
        }
    }

    /// SA top-up transferred out of the OA
    pub fn sa_topup_from_oa(period: Period, amount: f64) -> Self {
        Self {
            is_from_oa: true,
            ..Self::new(CashFlowKind::SaTopup, period, amount)
        }
    }

    pub fn recurring(mut self, frequency: Frequency, duration: u32) -> Self {
        self.recurrence = Some(Recurrence { frequency, duration });
        self
    }

    /// Change to each account caused by this event
    pub fn deltas(&self) -> AccountSplit {
        let amount = self.amount;
        match self.kind {
            CashFlowKind::OaTopup => AccountSplit::new(amount, 0.0, 0.0),
            CashFlowKind::OaWithdrawal => AccountSplit::new(-amount, 0.0, 0.0),
            CashFlowKind::SaTopup if self.is_from_oa => AccountSplit::new(-amount, amount, 0.0),
            CashFlowKind::SaTopup => AccountSplit::new(0.0, amount, 0.0),
            CashFlowKind::SaWithdrawal => AccountSplit::new(0.0, -amount, 0.0),
            CashFlowKind::MaTopup => AccountSplit::new(0.0, 0.0, amount),
            CashFlowKind::MaWithdrawal => AccountSplit::new(0.0, 0.0, -amount),
        }
    }
}

/// Expand recurring events into one event per period
///
/// Generated events carry no recurrence. A monthly recurrence on a year-only
/// period steps from January of that year.
pub fn decompress(events: &[CashFlowEvent]) -> Vec<CashFlowEvent> {
    let mut expanded = Vec::with_capacity(events.len());

    for event in events {
        let recurrence = match event.recurrence {
            Some(recurrence) => recurrence,
            None => {
                expanded.push(event.clone());
                continue;
            }
        };

        for step in 0..recurrence.duration {
            let period = match (recurrence.frequency, event.period.month) {
                (Frequency::Annually, _) => event.period.add_years(step),
                (Frequency::Monthly, month) => {
                    let seed = YearMonth {
                        year: event.period.year,
                        month: month.unwrap_or(1),
                    };
                    Period::month_of(seed.add_months(step))
                }
            };

            expanded.push(CashFlowEvent {
                period,
                recurrence: None,
                ..event.clone()
            });
        }
    }

    expanded
}

/// Events whose period falls in a calendar year
pub fn events_in_year(events: &[CashFlowEvent], year: i32) -> Vec<CashFlowEvent> {
    events.iter().filter(|e| e.period.year == year).cloned().collect()
}

/// Net change to each account from the events landing in `month`
///
/// Events are assumed to be already restricted to one year. Events without a
/// month are applied in January.
pub fn monthly_deltas(events: &[CashFlowEvent], month: u32) -> AccountSplit {
    events
        .iter()
        .filter(|e| e.period.falls_in_month(month))
        .fold(AccountSplit::default(), |mut acc, e| {
            let d = e.deltas();
            acc.oa += d.oa;
            acc.sa += d.sa;
            acc.ma += d.ma;
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(s: &str) -> Period {
        s.parse().unwrap()
    }

    #[test]
    fn test_decompress_annually() {
        let events = vec![CashFlowEvent::new(CashFlowKind::OaTopup, period("202006"), 10_000.0)
            .recurring(Frequency::Annually, 5)];

        let expanded = decompress(&events);
        let periods: Vec<String> = expanded.iter().map(|e| e.period.to_string()).collect();
        assert_eq!(periods, vec!["202006", "202106", "202206", "202306", "202406"]);
        assert!(expanded.iter().all(|e| e.recurrence.is_none() && e.amount == 10_000.0));
    }

    #[test]
    fn test_decompress_monthly() {
        let events = vec![CashFlowEvent::new(CashFlowKind::OaWithdrawal, period("202111"), 5000.0)
            .recurring(Frequency::Monthly, 4)];

        let periods: Vec<String> = decompress(&events).iter().map(|e| e.period.to_string()).collect();
        assert_eq!(periods, vec!["202111", "202112", "202201", "202202"]);
    }

    #[test]
    fn test_decompress_keeps_funding_source() {
        let events = vec![CashFlowEvent::sa_topup_from_oa(period("202201"), 10_000.0)
            .recurring(Frequency::Annually, 3)];

        let expanded = decompress(&events);
        assert_eq!(expanded.len(), 3);
        assert!(expanded.iter().all(|e| e.is_from_oa && e.kind == CashFlowKind::SaTopup));
        assert_eq!(expanded[2].period, period("202401"));
    }

    #[test]
    fn test_decompress_single_duration_is_the_original_event() {
        let original = CashFlowEvent::new(CashFlowKind::MaTopup, period("202305"), 750.0);
        let events = vec![original.clone().recurring(Frequency::Monthly, 1)];

        assert_eq!(decompress(&events), vec![original]);
    }

    #[test]
    fn test_decompress_year_only_period() {
        let annual = vec![CashFlowEvent::new(CashFlowKind::OaTopup, period("2022"), 1.0)
            .recurring(Frequency::Annually, 2)];
        let periods: Vec<String> = decompress(&annual).iter().map(|e| e.period.to_string()).collect();
        assert_eq!(periods, vec!["2022", "2023"]);

        let monthly = vec![CashFlowEvent::new(CashFlowKind::OaTopup, period("2022"), 1.0)
            .recurring(Frequency::Monthly, 2)];
        let periods: Vec<String> = decompress(&monthly).iter().map(|e| e.period.to_string()).collect();
        assert_eq!(periods, vec!["202201", "202202"]);
    }

    #[test]
    fn test_zero_duration_drops_the_event() {
        let events = vec![CashFlowEvent::new(CashFlowKind::OaTopup, period("202201"), 1.0)
            .recurring(Frequency::Monthly, 0)];
        assert!(decompress(&events).is_empty());
    }

    #[test]
    fn test_monthly_deltas_by_kind() {
        let events = vec![CashFlowEvent::new(CashFlowKind::OaWithdrawal, period("202201"), 3000.0)];
        assert_eq!(monthly_deltas(&events, 1), AccountSplit::new(-3000.0, 0.0, 0.0));

        let events = vec![
            CashFlowEvent::new(CashFlowKind::OaWithdrawal, period("202201"), 3000.0),
            CashFlowEvent::new(CashFlowKind::MaWithdrawal, period("202201"), 1000.0),
        ];
        assert_eq!(monthly_deltas(&events, 1), AccountSplit::new(-3000.0, 0.0, -1000.0));

        let events = vec![CashFlowEvent::sa_topup_from_oa(period("202201"), 8000.0)];
        assert_eq!(monthly_deltas(&events, 1), AccountSplit::new(-8000.0, 8000.0, 0.0));

        let events = vec![CashFlowEvent::new(CashFlowKind::SaTopup, period("202201"), 8000.0)];
        assert_eq!(monthly_deltas(&events, 1), AccountSplit::new(0.0, 8000.0, 0.0));
    }

    #[test]
    fn test_monthly_deltas_filters_and_accumulates() {
        let events = vec![
            CashFlowEvent::new(CashFlowKind::OaTopup, period("202205"), 1000.0),
            CashFlowEvent::new(CashFlowKind::OaTopup, period("202205"), 500.0),
            CashFlowEvent::new(CashFlowKind::SaWithdrawal, period("202206"), 200.0),
            CashFlowEvent::new(CashFlowKind::MaTopup, period("2022"), 300.0),
        ];

        assert_eq!(monthly_deltas(&events, 5), AccountSplit::new(1500.0, 0.0, 0.0));
        assert_eq!(monthly_deltas(&events, 6), AccountSplit::new(0.0, -200.0, 0.0));
        // year-only events fold into January only
        assert_eq!(monthly_deltas(&events, 1), AccountSplit::new(0.0, 0.0, 300.0));
        assert_eq!(monthly_deltas(&events, 2), AccountSplit::default());
    }

    #[test]
    fn test_events_in_year() {
        let events = decompress(&[CashFlowEvent::new(CashFlowKind::OaTopup, period("202211"), 1.0)
            .recurring(Frequency::Monthly, 3)]);

        assert_eq!(events_in_year(&events, 2022).len(), 2);
        assert_eq!(events_in_year(&events, 2023).len(), 1);
        assert!(events_in_year(&events, 2024).is_empty());
    }

    #[test]
    fn test_deserialize_event() {
        let json = r#"{
            "type": "sa_topup",
            "period": "202201",
            "amount": 10000,
            "is_sa_topup_from_oa": true,
            "recurrence": {"frequency": "annually", "duration": 3}
        }"#;
        let event: CashFlowEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.kind, CashFlowKind::SaTopup);
        assert!(event.is_from_oa);
        assert_eq!(event.recurrence, Some(Recurrence { frequency: Frequency::Annually, duration: 3 }));
    }
}
