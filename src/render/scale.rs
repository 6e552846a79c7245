use chrono::{Datelike, NaiveDate};

/// Linear map from a numeric domain onto a pixel range.
/// The domain may be reversed (e.g. `[50, 0]`) to flip an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self { Self { domain, range } }

    /// Project `value`. A degenerate domain maps everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 { return (r0 + r1) / 2.0 }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Roughly `count` evenly spaced round values covering the domain, ascending.
    /// Returns the values with the step between them.
    pub fn ticks(&self, count: usize) -> (Vec<f64>, f64) {
        let lo = self.domain.0.min(self.domain.1);
        let hi = self.domain.0.max(self.domain.1);
        if !lo.is_finite() || !hi.is_finite() { return (Vec::new(), 0.0) }
        if hi <= lo || count == 0 { return (vec![lo], 0.0) }

        let step = tick_step(lo, hi, count);
        let start = (lo / step).ceil() as i64;
        let stop = (hi / step).floor() as i64;
        ((start..=stop).map(|i| i as f64 * step).collect(), step)
    }
}

/// A "nice" step (1, 2 or 5 times a power of ten) giving about `count` intervals.
fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let base = 10f64.powi(raw.log10().floor() as i32);
    let error = raw / base;

    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    factor * base
}

/// Map from calendar dates onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub domain: (NaiveDate, NaiveDate),
    pub range: (f64, f64),
}

/// Upper bound on labelled month ticks before thinning.
const MAX_MONTH_TICKS: usize = 12;

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self { Self { domain, range } }

    /// Domain spanning `dates`, or `None` if empty.
    pub fn extent(dates: impl IntoIterator<Item = NaiveDate>, range: (f64, f64)) -> Option<Self> {
        let mut iter = dates.into_iter();
        let first = iter.next()?;
        let (lo, hi) = iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self::new((lo, hi), range))
    }

    pub fn apply(&self, date: NaiveDate) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = (d1 - d0).num_days();
        if span == 0 { return (r0 + r1) / 2.0 }
        let offset = (date - d0).num_days() as f64;
        r0 + offset / span as f64 * (r1 - r0)
    }

    /// First-of-month dates inside the domain, thinned to at most a dozen.
    pub fn month_ticks(&self) -> Vec<NaiveDate> {
        let (lo, hi) = self.domain;
        let mut ticks = Vec::new();

        let mut month = NaiveDate::from_ymd_opt(lo.year(), lo.month(), 1);
        while let Some(m) = month {
            if m > hi { break }
            if m >= lo { ticks.push(m) }
            month = next_month(m);
        }

        if ticks.len() > MAX_MONTH_TICKS {
            let stride = ticks.len().div_ceil(MAX_MONTH_TICKS);
            ticks = ticks.into_iter().step_by(stride).collect();
        }
        ticks
    }
}

fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}
