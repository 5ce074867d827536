//! Age-triggered life events that permanently raise household expenses

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeEventKind {
    Marriage,
    ChildBirth,
}

impl LifeEventKind {
    /// Typical monthly expense increase, in trigger-year dollars
    pub fn default_monthly_bump(&self) -> f64 {
        match self {
            LifeEventKind::Marriage => 3_500.0,
            LifeEventKind::ChildBirth => 2_600.0,
        }
    }
}

/// A recurring expense increase that switches on at `trigger_age` and never expires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub kind: LifeEventKind,
    pub trigger_age: u32,
    /// Monthly bump in trigger-year dollars
    pub monthly_bump: f64,
}

impl LifeEvent {
    pub fn new(kind: LifeEventKind, trigger_age: u32, monthly_bump: f64) -> Self {
        Self { kind, trigger_age, monthly_bump }
    }

    pub fn marriage(trigger_age: u32) -> Self {
        let kind = LifeEventKind::Marriage;
        Self::new(kind, trigger_age, kind.default_monthly_bump())
    }

    pub fn child_birth(trigger_age: u32) -> Self {
        let kind = LifeEventKind::ChildBirth;
        Self::new(kind, trigger_age, kind.default_monthly_bump())
    }

    pub fn is_active_at(&self, age: u32) -> bool {
        age >= self.trigger_age
    }

    /// Annual bump at `age`, inflated from the trigger year
    ///
    /// Zero before the trigger age.
    pub fn annual_bump_at(&self, age: u32, inflation_rate: f64) -> f64 {
        if !self.is_active_at(age) {
            return 0.0;
        }
        let years_since_event = age - self.trigger_age;
        self.monthly_bump * 12.0 * (1.0 + inflation_rate).powi(years_since_event as i32)
    }
}

/// An event contributing to a year's expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveLifeEvent {
    pub kind: LifeEventKind,
    pub trigger_age: u32,
    pub monthly_bump: f64,
    pub inflated_bump: f64,
    pub years_since_event: u32,
}

/// Combined bump of every event active at one age
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifeEventBump {
    pub total: f64,
    pub active: Vec<ActiveLifeEvent>,
}

/// Sum the inflation-adjusted annual bumps of all events triggered by `age`
pub fn bump_for(age: u32, events: &[LifeEvent], inflation_rate: f64) -> LifeEventBump {
    let active: Vec<ActiveLifeEvent> = events
        .iter()
        .filter(|event| event.is_active_at(age))
        .map(|event| ActiveLifeEvent {
            kind: event.kind,
            trigger_age: event.trigger_age,
            monthly_bump: event.monthly_bump,
            inflated_bump: event.annual_bump_at(age, inflation_rate),
            years_since_event: age - event.trigger_age,
        })
        .collect();

    LifeEventBump {
        total: active.iter().map(|e| e.inflated_bump).sum(),
        active,
    }
}
