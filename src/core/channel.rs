use crate::config::env::EnvActivationSignal;
use crate::config::ResolutionLogConfig;
use crate::core::filter::PrefixAllowList;
use crate::core::gate::{ActivationGate, GateState};
use crate::core::{ResolutionLogSink, ServiceResolutionEvent, SpecializationSignal};
use std::sync::{Arc, OnceLock};
use tokio::sync::{mpsc, Mutex};

static GLOBAL_CHANNEL: OnceLock<ServiceResolutionLogChannel> = OnceLock::new();

/// Gated, filtered, unbounded queue of service resolution events.
///
/// Producers call [`send`](Self::send) from any thread; it never blocks and
/// never fails. Events sent while the gate is dormant, or whose name is not on
/// the allow-list, are dropped for good. A single logical consumer drains the
/// queue through [`log_stream`](Self::log_stream).
pub struct ServiceResolutionLogChannel {
    sender: mpsc::UnboundedSender<ServiceResolutionEvent>,
    stream: LogStream,
    gate: ActivationGate,
    allow_list: PrefixAllowList,
}

impl ServiceResolutionLogChannel {
    pub fn new(config: &ResolutionLogConfig) -> Self {
        let gate = if config.enabled {
            ActivationGate::active()
        } else {
            ActivationGate::dormant()
        };
        Self::from_parts(gate, config.allow_list())
    }

    /// Like [`new`](Self::new), but a dormant gate also opens once `signal` reports true.
    pub fn with_signal(
        config: &ResolutionLogConfig,
        signal: impl SpecializationSignal + 'static,
    ) -> Self {
        let gate = if config.enabled {
            ActivationGate::active()
        } else {
            ActivationGate::with_signal(signal)
        };
        Self::from_parts(gate, config.allow_list())
    }

    pub fn from_parts(gate: ActivationGate, allow_list: PrefixAllowList) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            stream: LogStream {
                receiver: Arc::new(Mutex::new(receiver)),
            },
            gate,
            allow_list,
        }
    }

    /// Process-wide instance, built from the environment on first access.
    pub fn global() -> &'static Self {
        GLOBAL_CHANNEL.get_or_init(|| {
            let config = ResolutionLogConfig::from_env();
            tracing::debug!(
                "Creating global service resolution log channel (enabled: {}, prefixes: {:?})",
                config.enabled,
                config.allowed_prefixes
            );
            Self::with_signal(&config, EnvActivationSignal::default())
        })
    }

    /// Lifecycle milestone reached; from now on events are recorded.
    pub fn activate(&self) -> bool {
        self.gate.activate()
    }

    pub fn is_active(&self) -> bool {
        self.gate.state() == GateState::Active
    }

    pub fn allow_list(&self) -> &PrefixAllowList {
        &self.allow_list
    }

    pub fn send(&self, event: ServiceResolutionEvent) {
        if !self.gate.is_open() {
            tracing::trace!("Dropping '{}': logging not active yet", event.name);
            return;
        }

        if !self.allow_list.allows(&event.name) {
            tracing::trace!("Dropping '{}': not on the allow-list", event.name);
            return;
        }

        // 接收端由本結構持有，寫入不會失敗；即使失敗也不回報給呼叫者
        if let Err(e) = self.sender.send(event) {
            tracing::trace!("Dropping '{}': queue closed", e.0.name);
        }
    }

    /// Read handle over the queue. All handles share one receiver.
    pub fn log_stream(&self) -> LogStream {
        self.stream.clone()
    }
}

impl ResolutionLogSink for ServiceResolutionLogChannel {
    fn send(&self, event: ServiceResolutionEvent) {
        ServiceResolutionLogChannel::send(self, event);
    }
}

impl std::fmt::Debug for ServiceResolutionLogChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceResolutionLogChannel")
            .field("gate", &self.gate)
            .field("allow_list", &self.allow_list)
            .finish()
    }
}

/// Consumer handle. Only one `recv` runs at a time across all clones.
#[derive(Clone)]
pub struct LogStream {
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<ServiceResolutionEvent>>>,
}

impl LogStream {
    /// Waits until an event is available.
    ///
    /// Returns `None` only once the owning channel is gone and the queue is empty.
    pub async fn recv(&self) -> Option<ServiceResolutionEvent> {
        let mut receiver = self.receiver.lock().await;
        receiver.recv().await
    }

    /// Next queued event without waiting. `None` if empty or another reader holds the queue.
    pub fn try_recv(&self) -> Option<ServiceResolutionEvent> {
        let mut receiver = self.receiver.try_lock().ok()?;
        receiver.try_recv().ok()
    }

    /// 取出目前所有排隊中的事件
    pub fn drain_pending(&self) -> Vec<ServiceResolutionEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
