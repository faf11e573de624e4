//! Export procedure: single-flight, frame delay, flag reset on every outcome

mod common;

use std::time::{Duration, Instant};

use codecanvas::messages::{EditorMsg, ExportMsg, Msg};
use codecanvas::model::{AppModel, ToastKind};
use codecanvas::raster::{PngRasterizer, RasterOptions};
use codecanvas::runtime::Runtime;
use codecanvas::update::{EXPORT_FAILED_MESSAGE, EXPORT_FRAME_DELAY, SAVE_FAILED_MESSAGE};
use common::{
    model_with_output, mounted_runtime, FakeClipboard, FakeRasterizer, RasterBehavior, SETTLE,
};
use tempfile::TempDir;

#[test]
fn test_export_writes_png_and_resets_flag() {
    let dir = TempDir::new().unwrap();
    let rasterizer = FakeRasterizer::succeeding();
    let (mut runtime, _) = mounted_runtime(model_with_output(dir.path().to_path_buf()), rasterizer.clone());

    runtime.dispatch(Msg::export());
    assert!(runtime.model().ui.is_exporting);
    assert!(!runtime.model().can_export());

    runtime.run_until_settled(SETTLE).unwrap();

    assert!(!runtime.model().ui.is_exporting);
    assert_eq!(rasterizer.calls(), 1);
    let path = runtime.model().ui.last_export.clone().unwrap();
    assert!(path.starts_with(dir.path()));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("code-canvas-") && name.ends_with(".png"), "{}", name);
    assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG fake");
    assert!(runtime.model().ui.toasts.is_empty());
}

#[test]
fn test_capture_uses_export_options() {
    let dir = TempDir::new().unwrap();
    let rasterizer = FakeRasterizer::succeeding();
    let (mut runtime, _) = mounted_runtime(model_with_output(dir.path().to_path_buf()), rasterizer.clone());

    runtime.dispatch(Msg::Editor(EditorMsg::SetPadding(32)));
    runtime.dispatch(Msg::export());
    runtime.run_until_settled(SETTLE).unwrap();

    let (scene, options) = rasterizer.last_scene.lock().unwrap().clone().unwrap();
    assert_eq!(options, RasterOptions::export());
    assert_eq!(options.pixel_ratio, 3.0);
    assert_eq!(options.corner_radius, Some(0.0));
    assert_eq!(scene.state.padding, 32);
    assert_eq!(scene.theme.name, "custom-night-owl");
}

#[test]
fn test_second_request_while_exporting_is_noop() {
    let dir = TempDir::new().unwrap();
    let rasterizer = FakeRasterizer::slow(
        RasterBehavior::Succeed(b"png".to_vec()),
        Duration::from_millis(150),
    );
    let (mut runtime, _) = mounted_runtime(model_with_output(dir.path().to_path_buf()), rasterizer.clone());

    runtime.dispatch(Msg::export());
    runtime.dispatch(Msg::export());
    // Past the frame delay: rasterization is running
    runtime.pump(Instant::now() + EXPORT_FRAME_DELAY + Duration::from_millis(10));
    runtime.dispatch(Msg::export());
    assert!(runtime.model().ui.is_exporting);

    runtime.run_until_settled(SETTLE).unwrap();
    assert_eq!(rasterizer.calls(), 1);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_rasterizer_error_reports_and_resets() {
    let rasterizer = FakeRasterizer::new(RasterBehavior::Fail("tainted canvas".to_string()));
    let (mut runtime, _) = mounted_runtime(AppModel::default(), rasterizer);

    runtime.dispatch(Msg::export());
    runtime.run_until_settled(SETTLE).unwrap();

    assert!(!runtime.model().ui.is_exporting);
    assert!(runtime.model().ui.last_export.is_none());
    let toast = &runtime.model().ui.toasts.items()[0];
    assert_eq!(toast.message, EXPORT_FAILED_MESSAGE);
    assert_eq!(toast.kind, ToastKind::Error);
}

#[test]
fn test_rasterizer_panic_reports_and_resets() {
    let rasterizer = FakeRasterizer::new(RasterBehavior::Panic);
    let (mut runtime, _) = mounted_runtime(AppModel::default(), rasterizer);

    runtime.dispatch(Msg::export());
    runtime.run_until_settled(SETTLE).unwrap();

    assert!(!runtime.model().ui.is_exporting);
    assert_eq!(runtime.model().ui.toasts.items()[0].message, EXPORT_FAILED_MESSAGE);

    // The control works again afterwards
    assert!(runtime.model().can_export());
}

#[test]
fn test_save_failure_reports_and_resets() {
    let dir = TempDir::new().unwrap();
    // Output "directory" is a regular file
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();
    let (mut runtime, _) = mounted_runtime(model_with_output(blocker), FakeRasterizer::succeeding());

    runtime.dispatch(Msg::export());
    runtime.run_until_settled(SETTLE).unwrap();

    assert!(!runtime.model().ui.is_exporting);
    assert_eq!(runtime.model().ui.toasts.items()[0].message, SAVE_FAILED_MESSAGE);
}

#[test]
fn test_no_canvas_no_export() {
    let rasterizer = FakeRasterizer::succeeding();
    let mut runtime = Runtime::new(
        AppModel::default(),
        rasterizer.clone(),
        Box::new(FakeClipboard::default()),
    );

    runtime.dispatch(Msg::export());
    assert!(!runtime.model().ui.is_exporting);
    runtime.run_until_settled(SETTLE).unwrap();
    assert_eq!(rasterizer.calls(), 0);
}

#[test]
fn test_blank_code_no_export() {
    let rasterizer = FakeRasterizer::succeeding();
    let (mut runtime, _) = mounted_runtime(common::test_model("  \n\t", codecanvas::language::Language::Go), rasterizer.clone());

    assert!(!runtime.model().can_export());
    runtime.dispatch(Msg::export());
    runtime.run_until_settled(SETTLE).unwrap();
    assert_eq!(rasterizer.calls(), 0);
}

#[test]
fn test_canvas_unmounted_during_frame_delay() {
    let rasterizer = FakeRasterizer::succeeding();
    let (mut runtime, _) = mounted_runtime(AppModel::default(), rasterizer.clone());

    runtime.dispatch(Msg::export());
    runtime.unmount_canvas();
    runtime.run_until_settled(SETTLE).unwrap();

    assert_eq!(rasterizer.calls(), 0);
    assert!(!runtime.model().ui.is_exporting);
    assert_eq!(runtime.model().ui.toasts.items()[0].message, EXPORT_FAILED_MESSAGE);
}

#[test]
fn test_stale_frame_ready_ignored() {
    let rasterizer = FakeRasterizer::succeeding();
    let (mut runtime, _) = mounted_runtime(AppModel::default(), rasterizer.clone());

    runtime.dispatch(Msg::Export(ExportMsg::FrameReady));
    runtime.run_until_settled(SETTLE).unwrap();
    assert_eq!(rasterizer.calls(), 0);
}

#[test]
fn test_real_rasterizer_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut runtime = Runtime::new(
        model_with_output(dir.path().to_path_buf()),
        std::sync::Arc::new(PngRasterizer::new()),
        Box::new(FakeClipboard::default()),
    );
    runtime.mount_canvas();

    runtime.dispatch(Msg::export());
    runtime.run_until_settled(SETTLE).unwrap();

    let path = runtime.model().ui.last_export.clone().unwrap();
    let img = image::open(&path).unwrap();
    // 3x of a 896 x 642 canvas
    assert_eq!((img.width(), img.height()), (2688, 1926));
}

#[test]
fn test_oversized_canvas_reports_and_resets() {
    let dir = TempDir::new().unwrap();
    let mut runtime = Runtime::new(
        model_with_output(dir.path().to_path_buf()),
        std::sync::Arc::new(PngRasterizer::new()),
        Box::new(FakeClipboard::default()),
    );
    runtime.mount_canvas();

    runtime.dispatch(Msg::Editor(EditorMsg::SetPadding(40_000)));
    runtime.dispatch(Msg::export());
    runtime.run_until_settled(SETTLE).unwrap();

    let ui = &runtime.model().ui;
    assert!(!ui.is_exporting);
    assert!(ui.last_export.is_none());
    let toast = &ui.toasts.items()[0];
    assert_eq!(toast.message, EXPORT_FAILED_MESSAGE);
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
