use crate::core::SpecializationSignal;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    Dormant,
    Active,
}

/// One-way switch: Dormant until the lifecycle milestone, then Active for good.
pub struct ActivationGate {
    active: AtomicBool,
    signal: Option<Box<dyn SpecializationSignal>>,
}

impl ActivationGate {
    pub fn dormant() -> Self {
        Self {
            active: AtomicBool::new(false),
            signal: None,
        }
    }

    pub fn active() -> Self {
        Self {
            active: AtomicBool::new(true),
            signal: None,
        }
    }

    /// Dormant gate that also latches open the first time `signal` reports true.
    pub fn with_signal(signal: impl SpecializationSignal + 'static) -> Self {
        Self {
            active: AtomicBool::new(false),
            signal: Some(Box::new(signal)),
        }
    }

    /// Open the gate. Returns true only for the call that made the transition.
    pub fn activate(&self) -> bool {
        let transitioned = !self.active.swap(true, Ordering::AcqRel);
        if transitioned {
            tracing::info!("Service resolution logging activated");
        }
        transitioned
    }

    /// 檢查閘門；尚未開啟時才會詢問外部訊號
    pub fn is_open(&self) -> bool {
        if self.active.load(Ordering::Acquire) {
            return true;
        }

        match &self.signal {
            Some(signal) if signal.has_specialized() => {
                self.activate();
                true
            }
            _ => false,
        }
    }

    /// Current state, without consulting the signal.
    pub fn state(&self) -> GateState {
        if self.active.load(Ordering::Acquire) {
            GateState::Active
        } else {
            GateState::Dormant
        }
    }
}

impl Default for ActivationGate {
    fn default() -> Self {
        Self::dormant()
    }
}

impl std::fmt::Debug for ActivationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationGate")
            .field("state", &self.state())
            .field("has_signal", &self.signal.is_some())
            .finish()
    }
}
