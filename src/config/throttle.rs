use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How often a component's per-tick callback is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThrottleClass {
    /// Particle effects, every 2nd tick.
    Particle,
    /// Blinking lights and indicators, every 4th tick.
    Light,
    /// Slow mechanical motion, every 3rd tick.
    SlowAnimation,
    /// Every 2nd tick.
    MediumAnimation,
    /// Every tick; never guarded.
    Smooth,
}

impl ThrottleClass {
    pub const ALL: [ThrottleClass; 5] = [
        ThrottleClass::Particle,
        ThrottleClass::Light,
        ThrottleClass::SlowAnimation,
        ThrottleClass::MediumAnimation,
        ThrottleClass::Smooth,
    ];

    pub fn default_divisor(self) -> u32 {
        match self {
            ThrottleClass::Particle => 2,
            ThrottleClass::Light => 4,
            ThrottleClass::SlowAnimation => 3,
            ThrottleClass::MediumAnimation => 2,
            ThrottleClass::Smooth => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThrottleClass::Particle => "particle",
            ThrottleClass::Light => "light",
            ThrottleClass::SlowAnimation => "slowAnimation",
            ThrottleClass::MediumAnimation => "mediumAnimation",
            ThrottleClass::Smooth => "smooth",
        }
    }
}

impl fmt::Display for ThrottleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Throttle class → tick divisor, with configured overrides on top of the
/// built-in values.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrottleTable {
    divisors: BTreeMap<ThrottleClass, u32>,
}

impl ThrottleTable {
    pub fn with_overrides(overrides: &BTreeMap<ThrottleClass, u32>) -> Self {
        let mut divisors: BTreeMap<_, _> = ThrottleClass::ALL
            .iter()
            .map(|c| (*c, c.default_divisor()))
            .collect();
        divisors.extend(overrides.iter().map(|(c, d)| (*c, *d)));
        Self { divisors }
    }

    pub fn divisor(&self, class: ThrottleClass) -> u32 {
        self.divisors
            .get(&class)
            .copied()
            .unwrap_or_else(|| class.default_divisor())
    }
}

impl Default for ThrottleTable {
    fn default() -> Self {
        Self::with_overrides(&BTreeMap::new())
    }
}

/// Model of the shared tick clock behind the emitted helpers.
///
/// The rewriter never runs it; it states what the inserted code does at
/// runtime. `incrementGlobalFrame()` in the orchestrator is [`advance`],
/// and `shouldRunThisFrame(n)` in a guard is [`should_run`]: the callback
/// runs on every `n`th tick. Each counter is an independent value; nothing
/// here is global.
///
/// [`advance`]: TickCounter::advance
/// [`should_run`]: TickCounter::should_run
#[derive(Debug, Default, Clone)]
pub struct TickCounter {
    tick: u64,
}

impl TickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    pub fn current(&self) -> u64 {
        self.tick
    }

    pub fn should_run(&self, divisor: u32) -> bool {
        divisor <= 1 || self.tick % u64::from(divisor) == 0
    }
}
