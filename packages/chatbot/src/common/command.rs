//! Platform-neutral command replies
//!
//! Command handlers return a [`CommandReply`]; the bot layer renders it as an
//! ephemeral embed and deletes it once `expires_after` has elapsed.

use std::borrow::Cow;
use std::time::Duration;

/// Expiry for confirmations, warnings and errors
pub const SHORT_EXPIRY: Duration = Duration::from_secs(20);
/// Expiry for listings and help
pub const LONG_EXPIRY: Duration = Duration::from_secs(60);

/// Embed limits of the chat platform. Lengths are counted in bytes, which
/// never undercounts the platform's character count.
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const EMBED_TEXT_LIMIT: usize = 6000;
pub const EMBED_FIELD_LIMIT: usize = 25;

/// Room kept at the end of a listing for the "not shown" note
const NOTE_RESERVE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Success,
    Warning,
    Error,
    Help,
}

impl ReplyKind {
    /// Field title used for single-message replies
    pub fn field_title(self) -> &'static str {
        match self {
            ReplyKind::Success => "✅ SUCCESS",
            ReplyKind::Warning => "⚠️ WARNING",
            ReplyKind::Error => "❌ ERROR",
            ReplyKind::Help => "HELP 🤖",
        }
    }

    pub fn colour(self) -> u32 {
        match self {
            ReplyKind::Success => 0x2ECC71,
            ReplyKind::Warning => 0xF1C40F,
            ReplyKind::Error => 0xE74C3C,
            ReplyKind::Help => 0x9B59B6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    pub kind: ReplyKind,
    pub title: Option<String>,
    pub fields: Vec<ReplyField>,
    pub expires_after: Duration,
}

impl CommandReply {
    fn single(kind: ReplyKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            fields: vec![ReplyField {
                name: kind.field_title().to_string(),
                value: message.into(),
            }],
            expires_after: SHORT_EXPIRY,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::single(ReplyKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::single(ReplyKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::single(ReplyKind::Error, message)
    }

    pub fn expiring_after(mut self, duration: Duration) -> Self {
        self.expires_after = duration;
        self
    }

    /// Success reply made of titled link sections.
    ///
    /// Each section becomes one or more fields of at most [`FIELD_VALUE_LIMIT`]
    /// bytes. Once the embed would exceed [`EMBED_TEXT_LIMIT`] or
    /// [`EMBED_FIELD_LIMIT`], the remaining lines are counted in a final note.
    pub fn listing<I>(sections: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let title = ReplyKind::Success.field_title().to_string();
        let mut used = title.len();
        let mut fields = Vec::new();
        let mut hidden = 0;

        for (heading, lines) in sections {
            for (i, chunk) in chunk_lines(&lines, FIELD_VALUE_LIMIT).into_iter().enumerate() {
                let name = if i == 0 {
                    heading.clone()
                } else {
                    format!("{} (cont.)", heading)
                };
                let size = name.len() + chunk.value.len();
                let fits = fields.len() + 1 < EMBED_FIELD_LIMIT
                    && used + size + NOTE_RESERVE <= EMBED_TEXT_LIMIT;

                if hidden == 0 && fits {
                    used += size;
                    fields.push(ReplyField {
                        name,
                        value: chunk.value,
                    });
                } else {
                    hidden += chunk.lines;
                }
            }
        }

        if hidden > 0 {
            fields.push(ReplyField {
                name: "…".to_string(),
                value: format!("{} more links not shown.", hidden),
            });
        }

        Self {
            kind: ReplyKind::Success,
            title: Some(title),
            fields,
            expires_after: LONG_EXPIRY,
        }
    }

    /// Text of the first field, which is the whole message for single-message replies
    pub fn message(&self) -> &str {
        self.fields.first().map(|f| f.value.as_str()).unwrap_or_default()
    }

    /// Bytes counted toward the embed text limit: title, field names and values
    pub fn text_len(&self) -> usize {
        self.title.as_ref().map_or(0, String::len)
            + self
                .fields
                .iter()
                .map(|f| f.name.len() + f.value.len())
                .sum::<usize>()
    }
}

#[derive(Debug, Default)]
struct Chunk {
    value: String,
    lines: usize,
}

/// Join lines with newlines into chunks of at most `limit` bytes
fn chunk_lines(lines: &[String], limit: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = Chunk::default();

    for line in lines {
        let line = clip(line, limit);
        if current.lines > 0 && current.value.len() + 1 + line.len() > limit {
            chunks.push(std::mem::take(&mut current));
        }
        if current.lines > 0 {
            current.value.push('\n');
        }
        current.value.push_str(&line);
        current.lines += 1;
    }

    if current.lines > 0 {
        chunks.push(current);
    }
    chunks
}

/// Cut a single line that is longer than `limit` bytes, marking the cut with `…`
fn clip(line: &str, limit: usize) -> Cow<'_, str> {
    if line.len() <= limit {
        return Cow::Borrowed(line);
    }
    let mut end = limit - '…'.len_utf8();
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}…", &line[..end]))
}

/// Who ran which command, for the debug log and audit lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub user_name: String,
    pub command: String,
}

impl Invocation {
    pub fn new(user_name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            command: command.into(),
        }
    }

    /// `User '<name>' used command '<command>'.`
    pub fn describe(&self) -> String {
        format!("User '{}' used command '{}'.", self.user_name, self.command)
    }
}
