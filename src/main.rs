//! codecanvas - render source code into a shareable PNG
//!
//! Runs a headless canvas session: loads FILE through the upload path,
//! applies settings, exports, and prints the saved path on stdout.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use codecanvas::cli::CliArgs;
use codecanvas::clipboard::SystemClipboard;
use codecanvas::config::AppConfig;
use codecanvas::config_paths;
use codecanvas::messages::{AppMsg, Msg};
use codecanvas::model::{AppModel, ToastKind};
use codecanvas::raster::PngRasterizer;
use codecanvas::runtime::Runtime;
use codecanvas::theme::ThemeTable;
use codecanvas::widget::BufferWidget;

/// Upper bound for a file read or an export to finish
const SETTLE_TIMEOUT: Duration = Duration::from_secs(60);

fn main() -> Result<()> {
    codecanvas::tracing::init();

    let args = CliArgs::parse();

    let mut config = AppConfig::load();
    args.apply_to_config(&mut config);
    if args.save_config {
        config.save().map_err(|e| anyhow!(e)).context("saving config")?;
    }

    let rasterizer = match &config.font_path {
        Some(path) => PngRasterizer::from_font_file(path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("loading font {}", path.display()))?,
        None => {
            tracing::warn!("No font configured; code glyphs will not be drawn");
            PngRasterizer::new()
        }
    };

    let themes = ThemeTable::load(config_paths::themes_dir().as_deref());
    let model = AppModel::new(config, themes);
    let mut runtime = Runtime::new(model, Arc::new(rasterizer), Box::new(SystemClipboard));

    runtime.mount_canvas();
    let code = runtime.model().state().code.clone();
    runtime.mount_widget(Box::new(BufferWidget::mounted(code)));

    if let Some(file) = &args.file {
        runtime.dispatch(Msg::App(AppMsg::UploadFile(file.clone())));
        runtime
            .run_until_settled(SETTLE_TIMEOUT)
            .map_err(|e| anyhow!(e))
            .context("reading input file")?;
        if has_error_toast(&runtime) {
            report_toasts(&runtime);
            std::process::exit(1);
        }
    }

    for msg in args.overrides() {
        runtime.dispatch(msg);
    }

    if args.copy {
        runtime.dispatch(Msg::App(AppMsg::CopyCode));
    }

    if args.dump_state {
        runtime
            .run_until_settled(SETTLE_TIMEOUT)
            .map_err(|e| anyhow!(e))?;
        let json = serde_json::to_string_pretty(runtime.model().state())
            .context("serializing state")?;
        println!("{}", json);
        report_toasts(&runtime);
        return Ok(());
    }

    runtime.dispatch(Msg::export());
    runtime
        .run_until_settled(SETTLE_TIMEOUT)
        .map_err(|e| anyhow!(e))
        .context("exporting image")?;

    report_toasts(&runtime);

    match &runtime.model().ui.last_export {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => {
            if !has_error_toast(&runtime) {
                eprintln!("Nothing to export: code is empty");
            }
            std::process::exit(1);
        }
    }
}

fn has_error_toast(runtime: &Runtime) -> bool {
    runtime
        .model()
        .ui
        .toasts
        .items()
        .iter()
        .any(|t| t.kind == ToastKind::Error)
}

/// Print pending notifications to stderr
fn report_toasts(runtime: &Runtime) {
    for toast in runtime.model().ui.toasts.items() {
        eprintln!("[{}] {}", toast.kind.title(), toast.message);
    }
}
