use std::fmt;
use std::sync::Arc;
use yansi::Paint;

/// A named value attached to a message, e.g. one field of a counterexample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLabel {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Error,
    Warning,
    Note,
}

/// If you just want to build a simple message, see the builders below.
///
/// A Message names the law it is about (if any), carries a top-level note,
/// and lists labelled values. Here's an example message:
///
/// error: law violated: testBit_bitwise             // note (String)
///   --> testBit_bitwise                            // law
///    = x: 12                                       // labels (name, value)
///    = y: 10
///    = i: 3
#[derive(Debug, Clone)]
pub struct MessageX {
    pub level: MessageLevel,
    pub note: String,
    pub law: Option<String>,
    pub labels: Vec<MessageLabel>,
}
pub type Message = Arc<MessageX>;

pub trait Diagnostics {
    /// Display the corresponding message
    fn report(&self, msg: &Message) {
        self.report_as(msg, msg.level)
    }

    /// Override the msg's reporting level
    fn report_as(&self, msg: &Message, msg_as: MessageLevel);
}

/// Forwards messages to `tracing` at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report_as(&self, msg: &Message, msg_as: MessageLevel) {
        let law = msg.law.as_deref().unwrap_or("");
        let labels = msg
            .labels
            .iter()
            .map(|l| format!("{}={}", l.name, l.value))
            .collect::<Vec<_>>()
            .join(" ");
        match msg_as {
            MessageLevel::Error => tracing::error!(law, %labels, "{}", msg.note),
            MessageLevel::Warning => tracing::warn!(law, %labels, "{}", msg.note),
            MessageLevel::Note => tracing::info!(law, %labels, "{}", msg.note),
        }
    }
}

/// Keeps every reported message; handy for tests and for callers that render
/// a report themselves.
#[derive(Debug, Default)]
pub struct CollectDiagnostics {
    msgs: std::sync::Mutex<Vec<(Message, MessageLevel)>>,
}

impl CollectDiagnostics {
    pub fn take(&self) -> Vec<(Message, MessageLevel)> {
        match self.msgs.lock() {
            Ok(mut m) => std::mem::take(&mut *m),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Diagnostics for CollectDiagnostics {
    fn report_as(&self, msg: &Message, msg_as: MessageLevel) {
        match self.msgs.lock() {
            Ok(mut m) => m.push((msg.clone(), msg_as)),
            Err(poisoned) => poisoned.into_inner().push((msg.clone(), msg_as)),
        }
    }
}

// Basic Message constructors

/// Basic message, with a note about a single law
pub fn message<S: Into<String>, L: Into<String>>(level: MessageLevel, note: S, law: L) -> Message {
    Arc::new(MessageX { level, note: note.into(), law: Some(law.into()), labels: Vec::new() })
}

/// Bare message without any law
pub fn message_bare<S: Into<String>>(level: MessageLevel, note: S) -> Message {
    Arc::new(MessageX { level, note: note.into(), law: None, labels: Vec::new() })
}

// Convenience functions

/// Bare note without any law
pub fn note_bare<S: Into<String>>(note: S) -> Message {
    message_bare(MessageLevel::Note, note)
}

pub fn warning<S: Into<String>, L: Into<String>>(note: S, law: L) -> Message {
    message(MessageLevel::Warning, note, law)
}

pub fn error<S: Into<String>, L: Into<String>>(note: S, law: L) -> Message {
    message(MessageLevel::Error, note, law)
}

// Add additional stuff with the "builders" below.

impl MessageX {
    /// Add a labelled value
    pub fn label<N: Into<String>, V: ToString>(&self, name: N, value: V) -> Message {
        let mut e = self.clone();
        e.labels.push(MessageLabel { name: name.into(), value: value.to_string() });
        Arc::new(e)
    }
}

impl fmt::Display for MessageX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            MessageLevel::Error => Paint::red("error").bold(),
            MessageLevel::Warning => Paint::yellow("warning").bold(),
            MessageLevel::Note => Paint::cyan("note").bold(),
        };
        write!(f, "{}: {}", level, self.note)?;
        if let Some(law) = &self.law {
            write!(f, "\n  {} {}", Paint::blue("-->"), law)?;
        }
        for l in &self.labels {
            write!(f, "\n   {} {}: {}", Paint::blue("="), l.name, l.value)?;
        }
        Ok(())
    }
}
