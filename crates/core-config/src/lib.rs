//! Configuration loading for the line editor host.
//!
//! Parses `oxline.toml` (or an override path supplied by the binary). Three
//! tables are recognized:
//! * `[editor]`: `prompt` and `insert_mode`.
//! * `[history]`: `max_entries`, the persistence cap applied by the host.
//! * `[bindings]`: chord string to operation name, or `"none"` to unbind.
//!
//! A missing file or a parse failure falls back to defaults so a broken
//! config never prevents the editor from starting. Unknown fields are ignored.

use std::collections::BTreeMap;
use std::{fs, path::PathBuf};

use anyhow::Result;
use core_keymap::{InputOperation, KeyBindingSet, default_bindings, parse_chord};
use serde::Deserialize;
use tracing::{info, warn};

const FILE_NAME: &str = "oxline.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_prompt")]
    pub prompt: String,
    #[serde(default = "EditorConfig::default_insert_mode")]
    pub insert_mode: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            prompt: Self::default_prompt(),
            insert_mode: Self::default_insert_mode(),
        }
    }
}

impl EditorConfig {
    fn default_prompt() -> String {
        "> ".to_string()
    }
    const fn default_insert_mode() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: Self::default_max_entries(),
        }
    }
}

impl HistoryConfig {
    const fn default_max_entries() -> usize {
        500
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    /// Chord string to operation name; ordered so overrides apply deterministically.
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File the settings came from; `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub file: ConfigFile,
}

/// Working directory `oxline.toml` first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxline").join(FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), bindings = file.bindings.len(), "config_loaded");
            Ok(Config {
                source: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    pub fn prompt(&self) -> &str {
        &self.file.editor.prompt
    }

    pub fn insert_mode(&self) -> bool {
        self.file.editor.insert_mode
    }

    pub fn history_max_entries(&self) -> usize {
        self.file.history.max_entries
    }

    /// Default table with `[bindings]` overrides applied. Malformed chords or
    /// operation names are skipped with a warning.
    pub fn key_bindings(&self) -> KeyBindingSet {
        let mut set = default_bindings().clone();
        for (chord_text, op_name) in &self.file.bindings {
            let chord = match parse_chord(chord_text) {
                Ok(chord) => chord,
                Err(e) => {
                    warn!(target: "config", chord = %chord_text, error = %e, "binding_chord_invalid");
                    continue;
                }
            };
            let operation = if op_name.eq_ignore_ascii_case("none") {
                None
            } else {
                match InputOperation::from_name(op_name) {
                    Some(op) => Some(op),
                    None => {
                        warn!(target: "config", chord = %chord_text, operation = %op_name, "binding_operation_unknown");
                        continue;
                    }
                }
            };
            set.bind_chord(chord, operation);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::KeyModifiers;
    use core_keymap::KeyChord;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), text).unwrap();
        tmp
    }

    #[test]
    fn defaults_when_file_missing() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_oxline__.toml"))).unwrap();
        assert_eq!(cfg.prompt(), "> ");
        assert!(cfg.insert_mode());
        assert_eq!(cfg.history_max_entries(), 500);
        assert_eq!(cfg.source, None);
    }

    #[test]
    fn parses_editor_and_history_tables() {
        let tmp = write_config("[editor]\nprompt = \"$ \"\ninsert_mode = false\n[history]\nmax_entries = 20\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.prompt(), "$ ");
        assert!(!cfg.insert_mode());
        assert_eq!(cfg.history_max_entries(), 20);
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let tmp = write_config("[editor\nprompt = ");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.prompt(), "> ");
        assert_eq!(cfg.source, None);
    }

    #[test]
    fn binding_overrides_apply_on_a_copy() {
        let tmp = write_config("[bindings]\n\"C-t\" = \"BackwardChar\"\n\"C-a\" = \"none\"\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let set = cfg.key_bindings();
        assert_eq!(
            set.lookup(&KeyChord::char('t', KeyModifiers::CTRL)),
            Some(InputOperation::BackwardChar)
        );
        assert_eq!(set.lookup(&KeyChord::char('a', KeyModifiers::CTRL)), None);
        assert_eq!(
            default_bindings().lookup(&KeyChord::char('a', KeyModifiers::CTRL)),
            Some(InputOperation::BeginningOfLine)
        );
    }

    #[test]
    fn malformed_bindings_are_skipped_with_warning() {
        let tmp = write_config("[bindings]\n\"C-\" = \"BackwardChar\"\n\"C-t\" = \"Teleport\"\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(BufferWriter {
                inner: buffer.clone(),
            })
            .finish();

        let set = with_default(subscriber, || cfg.key_bindings());

        assert_eq!(set, default_bindings().clone());
        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("binding_chord_invalid"));
        assert!(log_output.contains("binding_operation_unknown"));
    }
}
