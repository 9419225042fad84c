use startup_diag::{
    ActivationGate, PrefixAllowList, ResolutionLogConfig, ResolutionLogSink,
    ServiceResolutionEvent, ServiceResolutionLogChannel,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn active_channel(prefixes: &[&str]) -> ServiceResolutionLogChannel {
    ServiceResolutionLogChannel::from_parts(ActivationGate::active(), PrefixAllowList::new(prefixes))
}

fn names(events: Vec<ServiceResolutionEvent>) -> Vec<String> {
    events.into_iter().map(|e| e.name).collect()
}

#[tokio::test]
async fn test_gate_closed_drops_all() {
    let channel = ServiceResolutionLogChannel::new(&ResolutionLogConfig::default());
    for i in 0..100 {
        channel.send(ServiceResolutionEvent::new(format!("IService{}", i)));
    }

    let stream = channel.log_stream();
    assert!(stream.try_recv().is_none());
    let waited = tokio::time::timeout(Duration::from_millis(50), stream.recv()).await;
    assert!(waited.is_err(), "nothing should be readable before activation");
}

#[tokio::test]
async fn test_gate_latches_when_signal_later_reports_false() {
    let specialized = Arc::new(AtomicBool::new(false));
    let channel = {
        let specialized = specialized.clone();
        ServiceResolutionLogChannel::with_signal(&ResolutionLogConfig::default(), move || {
            specialized.load(Ordering::SeqCst)
        })
    };

    channel.send(ServiceResolutionEvent::new("Placeholder"));
    specialized.store(true, Ordering::SeqCst);
    channel.send(ServiceResolutionEvent::new("OnActivation"));
    specialized.store(false, Ordering::SeqCst);
    channel.send(ServiceResolutionEvent::new("AfterSignalDropped"));

    let stream = channel.log_stream();
    assert_eq!(stream.recv().await.unwrap().name, "OnActivation");
    assert_eq!(stream.recv().await.unwrap().name, "AfterSignalDropped");
    assert!(stream.try_recv().is_none());
}

#[tokio::test]
async fn test_allow_list_case_insensitive() {
    let channel = active_channel(&["Foo", "Bar"]);
    for name in ["FooService", "barHandler", "Baz"] {
        channel.send(ServiceResolutionEvent::new(name));
    }

    assert_eq!(
        names(channel.log_stream().drain_pending()),
        vec!["FooService", "barHandler"]
    );
}

#[tokio::test]
async fn test_no_allow_list_logs_all_in_order() {
    let channel = active_channel(&[]);
    let sent: Vec<String> = (0..50).map(|i| format!("IService{}", i)).collect();
    for name in &sent {
        channel.send(ServiceResolutionEvent::new(name.as_str()));
    }

    let stream = channel.log_stream();
    let mut received = Vec::new();
    for _ in 0..sent.len() {
        received.push(stream.recv().await.unwrap().name);
    }
    assert_eq!(received, sent);
}

#[tokio::test]
async fn test_consumer_waits_for_next_event() {
    let channel = Arc::new(active_channel(&[]));
    let stream = channel.log_stream();

    let reader = tokio::spawn(async move { stream.recv().await.map(|e| e.name) });
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!reader.is_finished());

    channel.send(ServiceResolutionEvent::new("ILateService"));
    let name = tokio::time::timeout(Duration::from_secs(1), reader)
        .await
        .expect("reader should wake up")
        .unwrap();
    assert_eq!(name.as_deref(), Some("ILateService"));
}

#[test]
fn test_send_never_waits_for_consumer() {
    let channel = Arc::new(active_channel(&[]));
    let producers = 4;
    let per_producer = 10_000;

    std::thread::scope(|scope| {
        for p in 0..producers {
            let sink: Arc<dyn ResolutionLogSink> = channel.clone();
            scope.spawn(move || {
                for i in 0..per_producer {
                    sink.send(ServiceResolutionEvent::new(format!("P{}-{}", p, i)));
                }
            });
        }
    });

    // every producer finished with no consumer running
    assert_eq!(channel.log_stream().drain_pending().len(), producers * per_producer);
}

#[tokio::test]
async fn test_explicit_activation() {
    let channel = ServiceResolutionLogChannel::new(&ResolutionLogConfig {
        enabled: false,
        allowed_prefixes: vec!["Microsoft.".into()],
    });
    assert!(!channel.is_active());

    channel.send(ServiceResolutionEvent::new("Microsoft.Extensions.Logging.ILogger"));
    assert!(channel.activate());
    assert!(!channel.activate());
    channel.send(ServiceResolutionEvent::new("Microsoft.Extensions.Options.IOptions"));
    channel.send(ServiceResolutionEvent::new("Contoso.IWidget"));

    assert_eq!(
        names(channel.log_stream().drain_pending()),
        vec!["Microsoft.Extensions.Options.IOptions"]
    );
}

#[tokio::test]
async fn test_enabled_config_records_before_activate() {
    let channel = ServiceResolutionLogChannel::new(&ResolutionLogConfig {
        enabled: true,
        allowed_prefixes: vec![],
    });

    channel.send(ServiceResolutionEvent::new("IEarly"));
    assert!(!channel.activate());
    channel.send(ServiceResolutionEvent::new("ILate"));

    assert_eq!(names(channel.log_stream().drain_pending()), vec!["IEarly", "ILate"]);
}
