use backtrace::Backtrace;
use std::{cell::RefCell, io, path::Path};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{Layer, writer::MakeWriterExt},
    prelude::*,
};

thread_local! {
    pub static BACKTRACE: RefCell<Option<Backtrace>> = const { RefCell::new(None) };
}
/// Logs go to stderr and, if a folder is passed, to daily rolling files. The returned guard
/// flushes the file logs when dropped.
///
/// # Panics
/// In case tracing cannot be setup properly, e.g., when called twice.
pub fn tracing_setup(level: Level, log_folder: Option<&Path>) -> Option<WorkerGuard> {
    let (file_layer, guard_flush_file) = match log_folder {
        Some(log_folder) => {
            let file_appender = tracing_appender::rolling::daily(log_folder, "log");
            let (file_appender, guard) = tracing_appender::non_blocking(file_appender);
            let layer = Layer::new()
                .with_writer(file_appender.with_max_level(level))
                .with_line_number(true)
                .compact()
                .with_ansi(false)
                .with_file(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    let stderr = Layer::new()
        .with_writer(io::stderr.with_max_level(level))
        .with_file(true)
        .with_line_number(true);
    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr)
        .init();
    std::panic::set_hook(Box::new(|_| {
        let trace = Backtrace::new();
        BACKTRACE.with(move |b| b.borrow_mut().replace(trace));
    }));
    guard_flush_file
}

use std::sync::Once;
static INIT: Once = Once::new();

pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .init();
    });
}
