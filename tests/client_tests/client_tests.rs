//! Tests for SnarlClient
//!
//! These tests drive the client over in-memory transports and verify:
//! - Argument validation happens before any I/O
//! - Exact request lines for register / add_class / notify / unregister
//! - Non-zero reply codes map to the matching error kind
//! - Events are queued and never returned as replies
//! - Explicit close and best-effort unregister on drop

use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;

use snarl::{Config, Result, SnarlClient, SnarlError};

// =============================================================================
// Helper Functions
// =============================================================================

/// Writer whose contents stay readable after the client is dropped
#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.borrow().clone())
            .unwrap()
            .split_terminator("\r\n")
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

type TestClient = SnarlClient<Cursor<Vec<u8>>, SharedBuf>;

fn config(app: &str) -> Config {
    Config::builder().app_name(app).build()
}

fn register(app: &str, replies: &str) -> (Result<TestClient>, SharedBuf) {
    let out = SharedBuf::default();
    let client = SnarlClient::register_over(
        &config(app),
        Cursor::new(replies.as_bytes().to_vec()),
        out.clone(),
    );
    (client, out)
}

fn expect_err<T>(result: Result<T>) -> SnarlError {
    match result {
        Ok(_) => panic!("Expected an error"),
        Err(e) => e,
    }
}

// =============================================================================
// Register Tests
// =============================================================================

#[test]
fn test_register_sends_register_line() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\r\n");
    let client = client.unwrap();

    assert_eq!(client.app_name(), "MyApp");
    assert_eq!(
        out.lines(),
        vec!["type=SNP#?version=1.0#?action=register#?app=MyApp"]
    );
}

#[test]
fn test_register_rejected() {
    let (client, _out) = register("MyApp", "SNP/1.0/200/Already registered\r\n");

    match expect_err(client) {
        SnarlError::Registration(description) => {
            assert!(description.contains("Already registered"))
        }
        other => panic!("Expected registration error, got {:?}", other),
    }
}

#[test]
fn test_rejected_register_does_not_unregister() {
    let (client, out) = register("MyApp", "SNP/1.0/200/Already registered\r\n");
    drop(client);

    assert_eq!(out.lines().len(), 1);
}

#[test]
fn test_register_empty_app_writes_nothing() {
    let (client, out) = register("", "SNP/1.0/0/OK\r\n");

    assert!(matches!(expect_err(client), SnarlError::Validation(_)));
    assert!(out.lines().is_empty());
}

#[test]
fn test_register_empty_app_opens_no_socket() {
    // Nothing listens on port 1; a connection attempt would fail differently
    let config = Config::builder().app_name("").host("127.0.0.1").port(1).build();

    let result = SnarlClient::register_with_config(&config);

    assert!(matches!(expect_err(result), SnarlError::Validation(_)));
}

#[test]
fn test_register_garbage_reply() {
    let (client, _out) = register("MyApp", "garbage\r\n");

    assert!(matches!(expect_err(client), SnarlError::Protocol(ref raw) if raw == "garbage"));
}

#[test]
fn test_register_skips_event() {
    let (client, _out) = register("MyApp", "SNP/1.0/301/ACTION CLICKED\r\nSNP/1.0/0/OK\r\n");
    let client = client.unwrap();

    assert_eq!(client.pending_event_count(), 1);
    let event = client.pending_events().next().unwrap();
    assert_eq!(event.code, 301);
    assert_eq!(event.description, "ACTION CLICKED");
}

#[test]
fn test_register_custom_protocol_version() {
    let out = SharedBuf::default();
    let config = Config::builder().app_name("MyApp").protocol_version("1.1").build();
    let _client = SnarlClient::register_over(
        &config,
        Cursor::new(b"SNP/1.1/0/OK\n".to_vec()),
        out.clone(),
    )
    .unwrap();

    assert!(out.lines()[0].starts_with("type=SNP#?version=1.1#?"));
}

// =============================================================================
// Add Class Tests
// =============================================================================

#[test]
fn test_add_class_title_defaults_to_class() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\nSNP/1.0/0/OK\nSNP/1.0/0/OK\n");
    let mut client = client.unwrap();

    client.add_class("Test", None).unwrap();
    client.add_class("Build", Some("")).unwrap();

    let lines = out.lines();
    assert_eq!(
        lines[1],
        "type=SNP#?version=1.0#?action=add_class#?app=MyApp#?class=Test#?title=Test"
    );
    assert!(lines[2].ends_with("#?class=Build#?title=Build"));
}

#[test]
fn test_add_class_with_title() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\nSNP/1.0/0/OK\n");
    let mut client = client.unwrap();

    client.add_class("Test", Some("Test Messages")).unwrap();

    assert!(out.lines()[1].ends_with("#?class=Test#?title=Test Messages"));
}

#[test]
fn test_add_class_rejected() {
    let (client, _out) = register("MyApp", "SNP/1.0/0/OK\nSNP/1.0/203/Class already exists\n");
    let mut client = client.unwrap();

    match client.add_class("Test", None) {
        Err(SnarlError::ClassRegistration(description)) => {
            assert_eq!(description, "Class already exists")
        }
        other => panic!("Expected class registration error, got {:?}", other),
    }
}

#[test]
fn test_add_class_empty_class() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\n");
    let mut client = client.unwrap();

    assert!(matches!(client.add_class("", Some("Title")), Err(SnarlError::Validation(_))));
    assert_eq!(out.lines().len(), 1);
}

// =============================================================================
// Notify Tests
// =============================================================================

#[test]
fn test_notify_default_timeout_is_zero() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\nSNP/1.0/0/OK\n");
    let mut client = client.unwrap();

    client.notify("Test", "Hello", "World", None).unwrap();

    assert_eq!(
        out.lines()[1],
        "type=SNP#?version=1.0#?action=notification#?app=MyApp#?class=Test\
         #?title=Hello#?text=World#?timeout=0"
    );
}

#[test]
fn test_notify_with_timeout() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\nSNP/1.0/0/OK\n");
    let mut client = client.unwrap();

    client.notify("Test", "Hello", "World", Some(10)).unwrap();

    assert!(out.lines()[1].ends_with("#?timeout=10"));
}

#[test]
fn test_notify_rejected() {
    let (client, _out) = register("MyApp", "SNP/1.0/0/OK\nSNP/1.0/101/Failed\n");
    let mut client = client.unwrap();

    let result = client.notify("Test", "Hello", "World", None);

    assert!(matches!(result, Err(SnarlError::Notification(ref d)) if d == "Failed"));
}

#[test]
fn test_notify_requires_all_fields() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\n");
    let mut client = client.unwrap();

    for (class, title, text) in [("", "t", "x"), ("c", "", "x"), ("c", "t", "")] {
        let result = client.notify(class, title, text, None);
        assert!(matches!(result, Err(SnarlError::Validation(_))));
    }
    assert_eq!(out.lines().len(), 1);
}

#[test]
fn test_notify_rejects_framing_characters() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\n");
    let mut client = client.unwrap();

    let result = client.notify("Test", "Hello", "two\r\nlines", None);

    assert!(matches!(result, Err(SnarlError::Validation(_))));
    assert_eq!(out.lines().len(), 1);
}

#[test]
fn test_notify_reply_after_events() {
    let (client, _out) = register(
        "MyApp",
        "SNP/1.0/0/OK\n\
         SNP/1.0/301/ACTION CLICKED\n\
         SNP/1.0/302/NOTIFICATION CLOSED/7\n\
         SNP/1.0/0/OK\n",
    );
    let mut client = client.unwrap();

    client.notify("Test", "Hello", "World", None).unwrap();

    let codes: Vec<u32> = client.pending_events().map(|e| e.code).collect();
    assert_eq!(codes, vec![301, 302]);
}

// =============================================================================
// Teardown Tests
// =============================================================================

#[test]
fn test_close_sends_unregister_once() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\nSNP/1.0/0/OK\n");

    client.unwrap().close().unwrap();

    let lines = out.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "type=SNP#?version=1.0#?action=unregister#?app=MyApp");
}

#[test]
fn test_close_rejected() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\nSNP/1.0/205/Not registered\n");

    let result = client.unwrap().close();

    assert!(matches!(result, Err(SnarlError::Unregistration(ref d)) if d == "Not registered"));
    assert_eq!(out.lines().len(), 2);
}

#[test]
fn test_close_without_reply_still_sends_once() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\n");

    let result = client.unwrap().close();

    assert!(matches!(result, Err(SnarlError::Protocol(_))));
    assert_eq!(out.lines().len(), 2);
}

#[test]
fn test_drop_sends_unregister() {
    let (client, out) = register("MyApp", "SNP/1.0/0/OK\n");
    drop(client);

    let lines = out.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "type=SNP#?version=1.0#?action=unregister#?app=MyApp");
}

#[test]
fn test_drop_after_error_sends_unregister() {
    fn send_and_fail(client: &mut TestClient) -> Result<()> {
        client.notify("Test", "Hello", "World", None)?;
        Ok(())
    }

    let (client, out) = register("MyApp", "SNP/1.0/0/OK\nSNP/1.0/101/Failed\n");
    let mut client = client.unwrap();

    assert!(send_and_fail(&mut client).is_err());
    drop(client);

    assert!(out.lines().last().unwrap().contains("action=unregister"));
}

#[test]
fn test_drop_ignores_write_failure() {
    /// Accepts the register line, then behaves like a closed socket
    struct HangUpAfterFirst {
        inner: SharedBuf,
        writes: usize,
    }

    impl Write for HangUpAfterFirst {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            if self.writes > 1 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.inner.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let out = SharedBuf::default();
    let writer = HangUpAfterFirst {
        inner: out.clone(),
        writes: 0,
    };
    let client = SnarlClient::register_over(
        &config("MyApp"),
        Cursor::new(b"SNP/1.0/0/OK\n".to_vec()),
        writer,
    )
    .unwrap();

    drop(client);

    assert_eq!(out.lines().len(), 1);
}

#[test]
fn test_register_write_failure_is_io_error() {
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let result = SnarlClient::register_over(
        &config("MyApp"),
        Cursor::new(b"SNP/1.0/0/OK\n".to_vec()),
        BrokenPipe,
    );

    assert!(matches!(expect_err(result), SnarlError::Io(_)));
}
