//! # Shortcut Registry
//!
//! Named snippets that any front-end can print by keyword. Typing `time`
//! or `!time` (any case) prints the current time; `cat` prints ASCII art.
//!
//! An entry is one of three kinds:
//!
//! | Kind | Printed as |
//! |------|------------|
//! | [`ShortcutEntry::Literal`] | word-wrapped text |
//! | [`ShortcutEntry::Annotated`] | text with an explicit raw flag (ASCII art) |
//! | [`ShortcutEntry::Computed`] | whatever the closure returns at resolve time |
//!
//! The registry is built once at startup and never mutated, so it is shared
//! as a plain `Arc<ShortcutRegistry>` without locking.
//!
//! ```
//! use thermal_typer::shortcuts::ShortcutRegistry;
//!
//! let registry = ShortcutRegistry::builder()
//!     .literal("hello", "Hello there")
//!     .art("box", "+--+\n|  |\n+--+")
//!     .computed("answer", || format!("{}", 6 * 7))
//!     .build();
//!
//! assert_eq!(registry.resolve("!HELLO").unwrap().text, "Hello there");
//! assert!(registry.resolve("box").unwrap().raw);
//! assert_eq!(registry.resolve("answer").unwrap().text, "42");
//! assert_eq!(registry.list_shortcuts(), vec!["answer", "box", "hello"]);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

/// Source of "now" for computed shortcuts.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Closure behind a computed shortcut.
pub type ComputeFn = Box<dyn Fn() -> String + Send + Sync>;

/// What a keyword prints.
pub enum ShortcutEntry {
    /// Plain text, word-wrapped.
    Literal(String),
    /// Text with explicit print options.
    Annotated { text: String, raw: bool },
    /// Evaluated on every resolve.
    Computed(ComputeFn),
}

impl ShortcutEntry {
    fn resolve(&self) -> Resolved {
        match self {
            Self::Literal(text) => Resolved {
                text: text.clone(),
                raw: false,
            },
            Self::Annotated { text, raw } => Resolved {
                text: text.clone(),
                raw: *raw,
            },
            Self::Computed(compute) => Resolved {
                text: compute(),
                raw: false,
            },
        }
    }
}

impl std::fmt::Debug for ShortcutEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Annotated { text, raw } => f
                .debug_struct("Annotated")
                .field("text", text)
                .field("raw", raw)
                .finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A shortcut ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    /// Print without word-wrapping.
    pub raw: bool,
}

/// Read-only keyword → entry map.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    entries: BTreeMap<String, ShortcutEntry>,
}

impl ShortcutRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The stock shortcuts, with dynamic ones reading time from `clock`.
    pub fn builtin(clock: Arc<dyn Clock>) -> Self {
        builtin_entries(clock).build()
    }

    /// The stock shortcuts plus literal extras (e.g. from the config file).
    /// Extras replace built-ins of the same name.
    pub fn builtin_with_extras(clock: Arc<dyn Clock>, extras: &BTreeMap<String, String>) -> Self {
        extras
            .iter()
            .fold(builtin_entries(clock), |builder, (name, text)| {
                builder.literal(name, text)
            })
            .build()
    }

    /// Look up a keyword. Leading `!`, surrounding whitespace and case are ignored.
    pub fn resolve(&self, keyword: &str) -> Option<Resolved> {
        self.entries.get(&normalize(keyword)).map(ShortcutEntry::resolve)
    }

    /// All keywords, sorted.
    pub fn list_shortcuts(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.entries.contains_key(&normalize(keyword))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical form of a keyword: no leading `!`, trimmed, lowercase.
pub fn normalize(keyword: &str) -> String {
    keyword
        .trim()
        .trim_start_matches('!')
        .trim()
        .to_lowercase()
}

/// Fluent builder for [`ShortcutRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<String, ShortcutEntry>,
}

impl RegistryBuilder {
    pub fn entry(mut self, name: &str, entry: ShortcutEntry) -> Self {
        self.entries.insert(normalize(name), entry);
        self
    }

    pub fn literal(self, name: &str, text: &str) -> Self {
        self.entry(name, ShortcutEntry::Literal(text.to_string()))
    }

    pub fn annotated(self, name: &str, text: &str, raw: bool) -> Self {
        self.entry(
            name,
            ShortcutEntry::Annotated {
                text: text.to_string(),
                raw,
            },
        )
    }

    /// Pre-formatted text, printed raw.
    pub fn art(self, name: &str, text: &str) -> Self {
        self.annotated(name, text, true)
    }

    pub fn computed<F>(self, name: &str, compute: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.entry(name, ShortcutEntry::Computed(Box::new(compute)))
    }

    pub fn build(self) -> ShortcutRegistry {
        ShortcutRegistry {
            entries: self.entries,
        }
    }
}

// ============================================================================
// BUILT-IN SHORTCUTS
// ============================================================================

const FOCUS: &str = "Salvation must grow out of understanding; total understanding \
    can follow only from total experience, and experience must be won by the \
    laborious discipline of shaping one's absolute attention.";

// Trailing space on the last row is part of the drawing
const CAT: &str = "\n /\\_/\\\n( o.o )\n > ^ \n";

const ROBOT: &str = r#"
 [o_o]
 /|_|\
  / \
"#;

const COFFEE: &str = r#"
 ( (
  ) )
........
|      |]
\      /
 `----'
"#;

const HEART: &str = r#"
  ****  ****
 ****** ******
 *************
  ***********
   *********
    *******
     *****
      ***
       *
"#;

fn builtin_entries(clock: Arc<dyn Clock>) -> RegistryBuilder {
    let time_clock = Arc::clone(&clock);
    let date_clock = Arc::clone(&clock);
    let now_clock = clock;

    RegistryBuilder::default()
        // Dynamic
        .computed("time", move || {
            format!("Time: {}", time_clock.now().format("%H:%M:%S"))
        })
        .computed("date", move || {
            format!("Date: {}", date_clock.now().format("%A, %B %-d %Y"))
        })
        .computed("now", move || {
            now_clock.now().format("%A, %B %-d %Y  %H:%M:%S").to_string()
        })
        // Utility
        .literal("test", ">>> This is a test message <<<")
        .literal("wifi", "WiFi: my-network\nPass: super-secret")
        // Quotes
        .literal("focus", FOCUS)
        // ASCII art
        .art("cat", CAT)
        .art("robot", ROBOT)
        .art("coffee", COFFEE)
        .art("heart", HEART)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct FixedClock(Mutex<NaiveDateTime>);

    impl FixedClock {
        fn at(h: u32, m: u32, s: u32) -> Arc<Self> {
            let t = NaiveDate::from_ymd_opt(2026, 1, 27)
                .and_then(|d| d.and_hms_opt(h, m, s))
                .unwrap();
            Arc::new(Self(Mutex::new(t)))
        }

        fn set(&self, h: u32, m: u32, s: u32) {
            let mut t = self.0.lock().unwrap();
            *t = t.date().and_hms_opt(h, m, s).unwrap();
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().unwrap()
        }
    }

    fn registry() -> ShortcutRegistry {
        ShortcutRegistry::builtin(FixedClock::at(9, 30, 0))
    }

    #[test]
    fn test_list_is_sorted() {
        let registry = registry();
        let names = registry.list_shortcuts();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(
            names,
            vec![
                "cat", "coffee", "date", "focus", "heart", "now", "robot", "test", "time",
                "wifi"
            ]
        );
    }

    #[test]
    fn test_bang_and_case_insensitive() {
        let registry = registry();
        for name in registry.list_shortcuts() {
            let plain = registry.resolve(name);
            assert!(plain.is_some(), "{name} did not resolve");
            assert_eq!(registry.resolve(&format!("!{name}")), plain);
            assert_eq!(registry.resolve(&name.to_uppercase()), plain);
            assert_eq!(registry.resolve(&format!("  !{} ", name.to_uppercase())), plain);
        }
    }

    #[test]
    fn test_unknown_is_none() {
        let registry = registry();
        assert_eq!(registry.resolve("nope"), None);
        assert_eq!(registry.resolve("!"), None);
        assert_eq!(registry.resolve(""), None);
        assert!(!registry.contains("hello world"));
    }

    #[test]
    fn test_literal_is_wrapped() {
        let resolved = registry().resolve("test").unwrap();
        assert_eq!(resolved.text, ">>> This is a test message <<<");
        assert!(!resolved.raw);
    }

    #[test]
    fn test_art_is_raw() {
        let registry = registry();
        for name in ["cat", "robot", "coffee", "heart"] {
            assert!(registry.resolve(name).unwrap().raw, "{name} should be raw");
        }
    }

    #[test]
    fn test_builtin_wifi_and_cat() {
        let registry = registry();
        assert_eq!(
            registry.resolve("wifi").unwrap().text,
            "WiFi: my-network\nPass: super-secret"
        );

        let cat = registry.resolve("cat").unwrap().text;
        assert_eq!(cat.lines().collect::<Vec<_>>(), vec!["", " /\\_/\\", "( o.o )", " > ^ "]);
    }

    #[test]
    fn test_computed_reads_clock_at_resolve_time() {
        let clock = FixedClock::at(9, 30, 0);
        let registry = ShortcutRegistry::builtin(clock.clone());

        assert_eq!(registry.resolve("time").unwrap().text, "Time: 09:30:00");

        clock.set(17, 5, 42);
        assert_eq!(registry.resolve("time").unwrap().text, "Time: 17:05:42");
        assert_eq!(registry.resolve("date").unwrap().text, "Date: Tuesday, January 27 2026");
        assert_eq!(registry.resolve("now").unwrap().text, "Tuesday, January 27 2026  17:05:42");
    }

    #[test]
    fn test_extras_override_builtins() {
        let mut extras = BTreeMap::new();
        extras.insert("WiFi".to_string(), "WiFi: home\nPass: hunter2".to_string());
        extras.insert("test".to_string(), "custom test".to_string());

        let registry = ShortcutRegistry::builtin_with_extras(FixedClock::at(0, 0, 0), &extras);

        assert_eq!(registry.resolve("wifi").unwrap().text, "WiFi: home\nPass: hunter2");
        assert_eq!(registry.resolve("test").unwrap().text, "custom test");
        assert_eq!(registry.len(), 10);
    }
}
