use crate::error::{CliError, Result};
use crate::utils::progress::ConsoleWriter;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
};

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber: compact lines on stderr, plus a plain-text copy with
/// thread names when `log_file` is given. Fold workers are named, so the file log shows
/// which worker ran each RNAfold invocation.
///
/// Stderr lines go through the progress console, which hides the bars while a line is
/// written and redraws them below it.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(ConsoleWriter::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr_layer);

    match log_file {
        Some(path) => {
            let file = File::create(&path).map_err(|source| CliError::LogFile {
                path: path.clone(),
                source,
            })?;
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_thread_names(true)
                .with_target(true);
            subscriber.with(file_layer).init();
        }
        None => subscriber.init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing::{debug, info, warn};

    #[test]
    fn verbosity_maps_to_increasing_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_silences_logging() {
        assert_eq!(level_filter(0, true), LevelFilter::OFF);
        assert_eq!(level_filter(3, true), LevelFilter::OFF);
    }

    #[test]
    #[serial]
    fn file_layer_records_thread_names() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("aptafold.log");

        let file = File::create(&log_path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_names(true);
        let subscriber = tracing_subscriber::registry().with(file_layer);

        std::thread::Builder::new()
            .name("aptafold-fold-0".to_string())
            .spawn(move || {
                tracing::subscriber::with_default(subscriber, || {
                    debug!("folding apt-1");
                    info!("folded apt-1");
                    warn!("apt-2 timed out");
                });
            })
            .unwrap()
            .join()
            .unwrap();

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("aptafold-fold-0"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("apt-2 timed out"));
    }

    #[test]
    fn stderr_layer_lines_are_written_whole_through_the_console() {
        use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let console = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let bar = console.add(ProgressBar::new(10));
        bar.inc(3);

        let captured = Captured::default();
        let sink = captured.clone();
        let layer = fmt::layer()
            .with_writer(move || ConsoleWriter::new(console.clone(), sink.clone()))
            .with_ansi(false)
            .with_target(false)
            .compact();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            warn!("apt-2 timed out");
        });

        let content = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(content.contains("WARN"));
        assert!(content.ends_with("apt-2 timed out\n"));
        assert_eq!(bar.position(), 3);
    }

    #[test]
    #[serial]
    fn unwritable_log_path_is_reported_with_path() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(invalid_path));
            assert!(matches!(result, Err(CliError::LogFile { .. })));
        }
    }
}
