//! Syslog handler implementation
//!
//! Renders entries with the handler's message format and hands them to a
//! [`SyslogClient`] together with the entry severity. The default client sends
//! RFC 3164 datagrams to the local syslog socket.

use crate::core::{
    ConstructHandler, Entry, Formats, Handler, HandlerOptions, LoggerError, Renderer, Result,
    Severity,
};
use parking_lot::Mutex;

#[cfg(unix)]
use crate::core::Facility;
#[cfg(unix)]
use chrono::{DateTime, Local};
#[cfg(unix)]
use std::os::unix::net::UnixDatagram;
#[cfg(unix)]
use std::path::{Path, PathBuf};

/// Default local syslog socket
pub const DEFAULT_SOCKET: &str = "/dev/log";

/// Transport used by [`SyslogHandler`]
pub trait SyslogClient: Send {
    fn log(&mut self, severity: Severity, text: &str) -> Result<()>;
}

pub struct SyslogHandler {
    renderer: Renderer,
    client: Mutex<Box<dyn SyslogClient>>,
}

impl SyslogHandler {
    /// Message `{module}: {message}`, timestamp `HH:mm:ss.SSS`
    pub fn default_formats() -> Formats {
        Formats::new("{module}: {message}", "HH:mm:ss.SSS")
    }

    pub fn with_client<C>(options: HandlerOptions, client: C) -> Self
    where
        C: SyslogClient + 'static,
    {
        Self {
            renderer: Renderer::new(&Self::default_formats(), &options),
            client: Mutex::new(Box::new(client)),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

impl ConstructHandler for SyslogHandler {
    #[cfg(unix)]
    fn construct(options: HandlerOptions) -> Result<Self> {
        let socket = options
            .syslog
            .socket
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOCKET));
        let tag = options
            .application
            .clone()
            .unwrap_or_else(|| crate::core::DEFAULT_APPLICATION.to_string());

        let client = UnixSyslogClient::connect(socket, tag, options.syslog.facility)?;
        Ok(Self::with_client(options, client))
    }

    #[cfg(not(unix))]
    fn construct(_options: HandlerOptions) -> Result<Self> {
        Err(LoggerError::config(
            "SyslogHandler",
            "no local syslog socket on this platform; use SyslogHandler::with_client",
        ))
    }
}

impl Handler for SyslogHandler {
    fn log(&self, entry: &Entry) -> Result<()> {
        let text = self.renderer.render(entry);
        self.client.lock().log(entry.level, &text)
    }

    fn name(&self) -> &str {
        "syslog"
    }

    fn formats(&self) -> &Formats {
        self.renderer.formats()
    }

    fn application(&self) -> Option<&str> {
        self.renderer.application()
    }
}

/// Sends entries to a local syslog daemon over a unix datagram socket
#[cfg(unix)]
pub struct UnixSyslogClient {
    socket: Option<UnixDatagram>,
    path: PathBuf,
    tag: String,
    facility: Facility,
    pid: u32,
}

#[cfg(unix)]
impl UnixSyslogClient {
    pub fn connect(
        path: impl Into<PathBuf>,
        tag: impl Into<String>,
        facility: Facility,
    ) -> Result<Self> {
        let path = path.into();
        let socket = open_socket(&path)?;

        Ok(Self {
            socket: Some(socket),
            path,
            tag: tag.into(),
            facility,
            pid: std::process::id(),
        })
    }

    /// Attempt to reconnect to the syslog socket
    fn reconnect(&mut self) -> Result<()> {
        self.socket = Some(open_socket(&self.path)?);
        Ok(())
    }
}

#[cfg(unix)]
fn open_socket(path: &Path) -> Result<UnixDatagram> {
    let socket = UnixDatagram::unbound()?;
    socket.connect(path).map_err(|e| {
        LoggerError::io_operation(
            "connecting to syslog",
            format!("cannot connect to '{}'", path.display()),
            e,
        )
    })?;
    Ok(socket)
}

/// Format an RFC 3164 message: `<PRI>Mmm dd hh:mm:ss TAG[PID]: TEXT`
#[cfg(unix)]
pub fn format_message(
    facility: Facility,
    severity: Severity,
    tag: &str,
    pid: u32,
    timestamp: &DateTime<Local>,
    text: &str,
) -> String {
    let priority = u16::from(facility.code()) * 8 + u16::from(severity.rank());
    format!(
        "<{}>{} {}[{}]: {}",
        priority,
        timestamp.format("%b %e %H:%M:%S"),
        tag,
        pid,
        text
    )
}

#[cfg(unix)]
impl SyslogClient for UnixSyslogClient {
    fn log(&mut self, severity: Severity, text: &str) -> Result<()> {
        let packet = format_message(
            self.facility,
            severity,
            &self.tag,
            self.pid,
            &Local::now(),
            text,
        );

        let sent = match self.socket {
            Some(ref socket) => socket.send(packet.as_bytes()),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "syslog socket not connected",
            )),
        };

        if sent.is_ok() {
            return Ok(());
        }

        // The daemon may have restarted; reconnect once and resend
        self.socket = None;
        self.reconnect()?;
        if let Some(ref socket) = self.socket {
            socket
                .send(packet.as_bytes())
                .map_err(|e| LoggerError::sink_write("syslog", e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Origin;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Recorded(Arc<Mutex<Vec<(Severity, String)>>>);

    impl SyslogClient for Recorded {
        fn log(&mut self, severity: Severity, text: &str) -> Result<()> {
            self.0.lock().push((severity, text.to_string()));
            Ok(())
        }
    }

    struct Unreachable;

    impl SyslogClient for Unreachable {
        fn log(&mut self, _severity: Severity, _text: &str) -> Result<()> {
            Err(LoggerError::sink_write("syslog", "daemon unreachable"))
        }
    }

    #[test]
    fn test_default_formats() {
        let handler = SyslogHandler::with_client(HandlerOptions::default(), Recorded::default());
        assert_eq!(handler.formats().message, "{module}: {message}");
        assert_eq!(handler.name(), "syslog");
    }

    #[test]
    fn test_sends_level_and_text() {
        let recorded = Recorded::default();
        let handler = SyslogHandler::with_client(HandlerOptions::default(), recorded.clone());

        let entry = Entry::new(Severity::Crit, "db down", Origin::new("svc", Some("store")));
        handler.log(&entry).unwrap();

        assert_eq!(
            *recorded.0.lock(),
            vec![(Severity::Crit, "store: db down".to_string())]
        );
    }

    #[test]
    fn test_client_failure_propagates() {
        let handler = SyslogHandler::with_client(HandlerOptions::default(), Unreachable);
        let entry = Entry::new(Severity::Info, "x", Origin::new("svc", None));
        assert!(matches!(
            handler.log(&entry),
            Err(LoggerError::SinkWrite { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_format_message() {
        use chrono::TimeZone;

        let timestamp = Local
            .with_ymd_and_hms(2025, 1, 8, 9, 5, 7)
            .single()
            .expect("valid datetime");
        let message = format_message(Facility::User, Severity::Warn, "svc", 42, &timestamp, "http: slow");

        assert_eq!(message, "<12>Jan  8 09:05:07 svc[42]: http: slow");
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_datagram_delivery() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("log.sock");
        let server = UnixDatagram::bind(&path).expect("bind syslog socket");

        let options = HandlerOptions::new()
            .with_application("svc")
            .with_syslog(crate::core::SyslogOptions {
                socket: Some(path.clone()),
                facility: Facility::Local0,
            });
        let handler = SyslogHandler::construct(options).unwrap();

        let entry = Entry::new(Severity::Error, "disk full", Origin::new("svc", Some("io")));
        handler.log(&entry).unwrap();

        let mut buf = [0u8; 512];
        let len = server.recv(&mut buf).expect("datagram received");
        let packet = String::from_utf8_lossy(&buf[..len]);

        assert!(packet.starts_with("<131>"), "packet was {}", packet);
        assert!(packet.ends_with(&format!("svc[{}]: io: disk full", std::process::id())));
    }

    #[cfg(unix)]
    #[test]
    fn test_connect_failure() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let err = UnixSyslogClient::connect(temp_dir.path().join("absent.sock"), "svc", Facility::User)
            .err()
            .expect("connect should fail");
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }
}
