//! Notification queue with timed expiry

mod common;

use std::time::{Duration, Instant};

use codecanvas::messages::{Msg, ToastMsg};
use codecanvas::model::{AppModel, ToastKind, TOAST_DURATION};
use codecanvas::scheduler::TimerKey;
use common::{far_future, mounted_runtime, FakeRasterizer};

fn messages(runtime: &codecanvas::Runtime) -> Vec<String> {
    runtime
        .model()
        .ui
        .toasts
        .items()
        .iter()
        .map(|t| t.message.clone())
        .collect()
}

#[test]
fn test_two_toasts_in_push_order() {
    let (mut runtime, _) = mounted_runtime(AppModel::default(), FakeRasterizer::succeeding());
    runtime.dispatch(Msg::toast("first", ToastKind::Info));
    runtime.dispatch(Msg::toast("second", ToastKind::Error));

    assert_eq!(messages(&runtime), vec!["first", "second"]);
    let ids: Vec<u64> = runtime.model().ui.toasts.items().iter().map(|t| t.id).collect();
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn test_identical_messages_not_merged() {
    let (mut runtime, _) = mounted_runtime(AppModel::default(), FakeRasterizer::succeeding());
    runtime.dispatch(Msg::toast("same", ToastKind::Info));
    runtime.dispatch(Msg::toast("same", ToastKind::Info));
    assert_eq!(runtime.model().ui.toasts.len(), 2);
}

#[test]
fn test_each_toast_expires_on_its_own_timer() {
    let (mut runtime, _) = mounted_runtime(AppModel::default(), FakeRasterizer::succeeding());
    let start = Instant::now();
    runtime.dispatch(Msg::toast("first", ToastKind::Info));
    let first_pushed = Instant::now();
    std::thread::sleep(Duration::from_millis(200));
    runtime.dispatch(Msg::toast("second", ToastKind::Info));
    let second_pushed = Instant::now();

    // Not yet due
    runtime.pump(start);
    assert_eq!(runtime.model().ui.toasts.len(), 2);

    // Past the first deadline, still 200ms short of the second
    runtime.pump(first_pushed + TOAST_DURATION + Duration::from_millis(1));
    assert_eq!(messages(&runtime), vec!["second".to_string()]);
    assert!(!runtime.scheduler().is_empty());

    runtime.pump(second_pushed + TOAST_DURATION + Duration::from_millis(1));
    assert!(runtime.model().ui.toasts.is_empty());
    assert!(runtime.scheduler().is_empty());
}

#[test]
fn test_dismiss_before_expiry() {
    let (mut runtime, _) = mounted_runtime(AppModel::default(), FakeRasterizer::succeeding());
    runtime.dispatch(Msg::toast("keep", ToastKind::Info));
    runtime.dispatch(Msg::toast("close me", ToastKind::Success));
    let id = runtime.model().ui.toasts.items()[1].id;

    runtime.dispatch(Msg::Toast(ToastMsg::Dismiss(id)));
    assert_eq!(messages(&runtime), vec!["keep"]);
    assert!(!runtime.scheduler().is_scheduled(TimerKey::ToastExpiry(id)));

    // A late expiry for the dismissed id is harmless
    runtime.dispatch(Msg::Toast(ToastMsg::Expire(id)));
    runtime.pump(far_future());
    assert!(runtime.model().ui.toasts.is_empty());
}

#[test]
fn test_dismiss_unknown_id_is_noop() {
    let (mut runtime, _) = mounted_runtime(AppModel::default(), FakeRasterizer::succeeding());
    runtime.dispatch(Msg::toast("stay", ToastKind::Info));
    runtime.dispatch(Msg::Toast(ToastMsg::Dismiss(1)));
    assert_eq!(messages(&runtime), vec!["stay"]);
}

#[test]
fn test_toast_timers_do_not_block_settling() {
    let (mut runtime, _) = mounted_runtime(AppModel::default(), FakeRasterizer::succeeding());
    runtime.dispatch(Msg::toast("lingering", ToastKind::Info));

    let started = Instant::now();
    runtime.run_until_settled(common::SETTLE).unwrap();
    assert!(started.elapsed() < TOAST_DURATION);
    assert_eq!(runtime.model().ui.toasts.len(), 1);
}
