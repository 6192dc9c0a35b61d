use super::*;

// =============================================================
// Interval
// =============================================================

#[test]
fn stopped_interval_never_fires() {
    let mut iv = Interval::new(1000.0);
    assert!(!iv.is_running());
    assert!(!iv.poll(1_000_000.0));
}

#[test]
fn interval_fires_each_period() {
    let mut iv = Interval::new(1000.0);
    iv.start(0.0);
    assert!(!iv.poll(999.0));
    assert!(iv.poll(1000.0));
    assert!(!iv.poll(1500.0));
    assert!(iv.poll(2000.0));
}

#[test]
fn late_poll_fires_once() {
    let mut iv = Interval::new(1000.0);
    iv.start(0.0);
    assert!(iv.poll(5500.0));
    assert!(!iv.poll(6000.0));
    assert!(iv.poll(6500.0));
}

#[test]
fn stop_cancels_interval() {
    let mut iv = Interval::new(10.0);
    iv.start(0.0);
    iv.stop();
    assert!(!iv.poll(100.0));
}

// =============================================================
// Debounce
// =============================================================

#[test]
fn debounce_waits_for_quiet_period() {
    let mut d = Debounce::new(100.0);
    d.trigger(0.0);
    d.trigger(50.0);
    d.trigger(120.0);
    assert!(!d.poll(200.0));
    assert!(d.poll(220.0));
    assert!(!d.is_pending());
    assert!(!d.poll(400.0));
}

#[test]
fn cancelled_debounce_never_fires() {
    let mut d = Debounce::new(100.0);
    d.trigger(0.0);
    d.cancel();
    assert!(!d.poll(1000.0));
}
