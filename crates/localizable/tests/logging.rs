//! Log output checks using a `tracing-subscriber` fmt layer writing into a
//! shared buffer.

use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use localizable::{ChangeKind, ChangeListener, DictionarySet, LanguageTable, Localizer};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("capture lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("capture lock")).into_owned()
    }
}

fn with_captured_logs(run: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    captured.text()
}

struct Exploding;

impl ChangeListener for Exploding {
    fn on_change(&self, _kind: ChangeKind) {
        panic!("exploding listener");
    }
}

#[test]
fn absent_active_language_is_warned() {
    let logs = with_captured_logs(|| {
        let localizer = Localizer::new(DictionarySet::new(), "fi-FI");
        let mut set = DictionarySet::new();
        set.insert_language("en-US", LanguageTable::from_iter([("k", "v")]));
        assert!(localizer.set_dictionaries(set).is_none());
    });
    assert!(logs.contains("WARN"), "logs: {logs}");
    assert!(logs.contains("active language is absent"), "logs: {logs}");
}

#[test]
fn panicking_listener_is_logged_and_isolated() {
    let delivered = Rc::new(std::cell::Cell::new(false));
    let logs = with_captured_logs(|| {
        let localizer = Localizer::new(DictionarySet::new(), "en-US");
        localizer.subscribe(Rc::new(Exploding));
        let flag = Rc::clone(&delivered);
        localizer.subscribe_fn(move |_| flag.set(true));
        localizer.set_language("sv-SE");
    });
    assert!(delivered.get());
    assert!(logs.contains("ERROR"), "logs: {logs}");
    assert!(logs.contains("change listener panicked"), "logs: {logs}");
    assert!(logs.contains("exploding listener"), "logs: {logs}");
}

#[test]
fn language_change_is_logged_at_debug() {
    let logs = with_captured_logs(|| {
        let localizer = Localizer::new(DictionarySet::new(), "en-US");
        localizer.set_language("sv-SE");
    });
    assert!(logs.contains("language changed"), "logs: {logs}");
}
