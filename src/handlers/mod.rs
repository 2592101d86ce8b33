//! Handler implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
#[cfg(feature = "syslog")]
pub mod syslog;

#[cfg(feature = "console")]
pub use console::{ConsoleHandler, ConsoleStream};
#[cfg(feature = "file")]
pub use file::FileHandler;
#[cfg(feature = "syslog")]
pub use syslog::{SyslogClient, SyslogHandler};
#[cfg(all(feature = "syslog", unix))]
pub use syslog::UnixSyslogClient;

// Re-export traits for convenience
pub use crate::core::{ConstructHandler, Handler};

use crate::core::{HandlerOptions, LoggerError, Result, SharedHandler};
use std::io::Write;

/// Writable destination owned by a single handler
pub type BoxedWriter = Box<dyn Write + Send>;

/// Whether `name` resolves to a handler compiled into this build
pub fn is_builtin(name: &str) -> bool {
    match name {
        #[cfg(feature = "console")]
        "console" | "stdout" => true,
        #[cfg(feature = "file")]
        "file" => true,
        #[cfg(feature = "syslog")]
        "syslog" => true,
        _ => false,
    }
}

/// Construct the built-in handler called `name`
pub fn construct_builtin(name: &str, options: HandlerOptions) -> Result<SharedHandler> {
    match name {
        #[cfg(feature = "console")]
        "console" => Ok(std::sync::Arc::new(ConsoleHandler::construct(options)?) as SharedHandler),
        #[cfg(feature = "console")]
        "stdout" => Ok(std::sync::Arc::new(ConsoleHandler::stdout(options)) as SharedHandler),
        #[cfg(feature = "file")]
        "file" => Ok(std::sync::Arc::new(FileHandler::construct(options)?) as SharedHandler),
        #[cfg(feature = "syslog")]
        "syslog" => Ok(std::sync::Arc::new(SyslogHandler::construct(options)?) as SharedHandler),
        _ => {
            drop(options);
            Err(LoggerError::unknown_handler(name))
        }
    }
}

/// Write one rendered line and flush it, mapping IO failures to sink errors
pub(crate) fn write_line(handler: &str, dest: &mut dyn Write, line: &str) -> Result<()> {
    dest.write_all(line.as_bytes())
        .and_then(|()| dest.flush())
        .map_err(|e| LoggerError::sink_write(handler, e.to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;

    /// In-memory writer whose contents stay readable after it is boxed
    #[derive(Clone, Default)]
    pub struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Writer that always fails
    pub struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        assert!(is_builtin("console"));
        assert!(is_builtin("stdout"));
        assert!(is_builtin("file"));
        assert!(is_builtin("syslog"));
        assert!(!is_builtin("Console"));
        assert!(!is_builtin("carrier-pigeon"));
    }

    #[test]
    fn test_construct_unknown() {
        let err = construct_builtin("carrier-pigeon", HandlerOptions::default()).err();
        assert!(matches!(err, Some(LoggerError::UnknownHandler { .. })));
    }

    #[test]
    fn test_file_requires_path() {
        let err = construct_builtin("file", HandlerOptions::default()).err();
        assert!(matches!(err, Some(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_write_line_maps_errors() {
        let mut dest = testing::BrokenPipe;
        let err = write_line("file", &mut dest, "x\n").unwrap_err();
        assert!(matches!(err, LoggerError::SinkWrite { .. }));
        assert!(err.to_string().contains("pipe closed"));
    }
}
