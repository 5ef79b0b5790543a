use std::time::Duration;

/// Index of the position closest to `offset`. Ties go to the lowest index.
pub fn nearest_index(positions: &[f64], offset: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, position) in positions.iter().enumerate() {
        let distance = (position - offset).abs();
        if !distance.is_finite() {
            continue;
        }
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Manual eased scroll used when native smooth scrolling is unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    pub from: f64,
    pub to: f64,
    pub started: Duration,
    pub duration: Duration,
}

impl ScrollAnimation {
    /// Offset at `now`, and whether the animation has finished.
    pub fn sample(&self, now: Duration) -> (f64, bool) {
        if self.duration.is_zero() {
            return (self.to, true);
        }
        let elapsed = now.saturating_sub(self.started).as_secs_f64();
        let progress = elapsed / self.duration.as_secs_f64();
        if progress >= 1.0 {
            return (self.to, true);
        }
        let offset = self.from + (self.to - self.from) * ease_out_cubic(progress);
        (offset, false)
    }
}
