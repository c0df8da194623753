//! Cosmetic animations layered on top of navigation: KPI counters,
//! staggered reveals, ripples and short highlights.

use std::time::Duration;

use shared::domain::SectionKind;

pub const COUNTER_STEPS: u32 = 30;
pub const COUNTER_TICK: Duration = Duration::from_millis(50);
pub const REVEAL_DURATION: Duration = Duration::from_millis(400);
pub const RIPPLE_DURATION: Duration = Duration::from_millis(800);
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(1000);

/// Leading integer of `text` the way a browser's `parseInt` reads it:
/// optional whitespace and sign, then digits; anything after is ignored.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

/// Count-up animation for a headline statistic such as `15+` or `40%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCounter {
    original: String,
    target: Option<i64>,
    percent: bool,
}

impl KpiCounter {
    pub fn new(text: impl Into<String>) -> Self {
        let original = text.into();
        let target = parse_leading_int(&original).filter(|value| *value > 0);
        let percent = original.contains('%');
        Self {
            original,
            target,
            percent,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.target.is_some()
    }

    pub fn total_duration(&self) -> Duration {
        if self.is_animated() {
            COUNTER_TICK * COUNTER_STEPS
        } else {
            Duration::ZERO
        }
    }

    pub fn display_at(&self, elapsed: Duration) -> String {
        let Some(target) = self.target else {
            return self.original.clone();
        };
        let ticks = (elapsed.as_millis() / COUNTER_TICK.as_millis())
            .min(u128::from(COUNTER_STEPS)) as i64;
        if ticks == i64::from(COUNTER_STEPS) {
            return self.original.clone();
        }
        let value = target * ticks / i64::from(COUNTER_STEPS);
        if self.percent {
            format!("{value}%")
        } else {
            value.to_string()
        }
    }
}

/// Delays used when the items of a section appear one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    /// Delay between consecutive items.
    pub stagger: Duration,
    /// Delay between an item appearing and its secondary detail (bar
    /// fill, testimonial, icon settle).
    pub detail_delay: Duration,
}

pub fn reveal_timing(kind: SectionKind) -> RevealTiming {
    let (stagger, detail) = match kind {
        SectionKind::Home => (0, 0),
        SectionKind::Timeline => (200, 300),
        SectionKind::ProblemsSolutions => (150, 300),
        SectionKind::SkillsResults => (150, 200),
        SectionKind::CulturalFit => (100, 200),
    };
    RevealTiming {
        stagger: Duration::from_millis(stagger),
        detail_delay: Duration::from_millis(detail),
    }
}

/// Staggered reveal of a section's items. A hidden reveal keeps every item
/// at zero until it is replaced by a started one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    timing: RevealTiming,
    started: Option<Duration>,
}

impl Reveal {
    pub fn start(kind: SectionKind, now: Duration) -> Self {
        Self {
            timing: reveal_timing(kind),
            started: Some(now),
        }
    }

    /// Reveal already at its end state.
    pub fn completed(kind: SectionKind) -> Self {
        Self::start(kind, Duration::ZERO)
    }

    pub fn hidden(kind: SectionKind) -> Self {
        Self {
            timing: reveal_timing(kind),
            started: None,
        }
    }

    pub fn item(&self, index: usize, now: Duration) -> f32 {
        self.progress(index, Duration::ZERO, now)
    }

    pub fn detail(&self, index: usize, now: Duration) -> f32 {
        self.progress(index, self.timing.detail_delay, now)
    }

    pub fn finished(&self, items: usize, now: Duration) -> bool {
        let last = items.saturating_sub(1);
        self.detail(last, now) >= 1.0
    }

    fn progress(&self, index: usize, delay: Duration, now: Duration) -> f32 {
        let Some(started) = self.started else {
            return 0.0;
        };
        let begin = started + self.timing.stagger * index as u32 + delay;
        if now < begin {
            return 0.0;
        }
        let t = ((now - begin).as_secs_f32() / REVEAL_DURATION.as_secs_f32()).clamp(0.0, 1.0);
        1.0 - (1.0 - t).powi(3)
    }
}

/// Expanding circle drawn over a clicked navigation button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub clip: egui::Rect,
    pub center: egui::Pos2,
    pub started: Duration,
}

impl Ripple {
    pub fn new(clip: egui::Rect, center: egui::Pos2, now: Duration) -> Self {
        Self {
            clip,
            center,
            started: now,
        }
    }

    pub fn progress(&self, now: Duration) -> f32 {
        (now.saturating_sub(self.started).as_secs_f32() / RIPPLE_DURATION.as_secs_f32())
            .clamp(0.0, 1.0)
    }

    /// Radius and alpha multiplier at `now`: the circle grows to twice the
    /// larger button side while fading out.
    pub fn shape(&self, now: Duration) -> (f32, f32) {
        let p = self.progress(now);
        let size = self.clip.width().max(self.clip.height());
        (size * p, 1.0 - p)
    }

    pub fn is_done(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Highlight that fades out over [`HIGHLIGHT_DURATION`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    started: Duration,
}

impl Flash {
    pub fn new(now: Duration) -> Self {
        Self { started: now }
    }

    pub fn strength(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.started).as_secs_f32();
        (1.0 - elapsed / HIGHLIGHT_DURATION.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_done(&self, now: Duration) -> bool {
        self.strength(now) <= 0.0
    }
}
