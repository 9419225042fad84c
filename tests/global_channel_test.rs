use startup_diag::config::env::{LOG_ENABLED_VAR, WHITELIST_PREFIX_VAR};
use startup_diag::{ServiceResolutionEvent, ServiceResolutionLogChannel};

// The global instance is process-wide, so this binary holds a single test.
#[test]
fn test_global_channel_lifecycle() {
    std::env::remove_var(LOG_ENABLED_VAR);
    std::env::set_var(WHITELIST_PREFIX_VAR, "Foo,Bar");

    let addresses: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| ServiceResolutionLogChannel::global() as *const _ as usize)
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));

    let channel = ServiceResolutionLogChannel::global();
    let stream = channel.log_stream();

    channel.send(ServiceResolutionEvent::new("FooBeforeSpecialization"));
    assert!(!channel.is_active());
    assert!(stream.try_recv().is_none());

    std::env::set_var(LOG_ENABLED_VAR, "1");
    channel.send(ServiceResolutionEvent::new("FooService"));
    channel.send(ServiceResolutionEvent::new("Baz"));
    std::env::remove_var(LOG_ENABLED_VAR);
    channel.send(ServiceResolutionEvent::new("barHandler"));

    // allow-list was read once at construction and stays put
    std::env::set_var(WHITELIST_PREFIX_VAR, "Baz");
    channel.send(ServiceResolutionEvent::new("BazAgain"));

    assert!(channel.is_active());
    let names: Vec<String> = stream.drain_pending().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["FooService", "barHandler"]);

    std::env::remove_var(WHITELIST_PREFIX_VAR);
}
