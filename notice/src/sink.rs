//! Delivery sinks — trait-based dispatch for where the notice goes.
//!
//! A sink reads the session's notice at the moment it delivers; it never
//! holds on to an earlier rendering.

use anyhow::{anyhow, Context, Result};
use notice_core::Session;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait Sink {
    fn deliver(&self, session: &Session) -> Result<()>;
    fn success_message(&self) -> &str;
    fn failure_message(&self) -> &str;
}

/// Writes the notice verbatim to standard output, ready to paste elsewhere.
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn deliver(&self, session: &Session) -> Result<()> {
        let notice = session.notice();
        let mut out = io::stdout().lock();
        out.write_all(notice.as_bytes())
            .and_then(|_| out.flush())
            .context("failed to write notice to stdout")
    }

    fn success_message(&self) -> &str {
        "Notice écrite sur la sortie standard."
    }

    fn failure_message(&self) -> &str {
        "Impossible d'écrire la notice. Copiez manuellement le contenu."
    }
}

/// Saves the notice as a `.txt` file named after the project.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    /// Where `session`'s notice would be written.
    pub fn target(&self, session: &Session) -> PathBuf {
        self.dir.join(session.export_file_name())
    }
}

impl Sink for FileSink {
    fn deliver(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create output directory: {}", self.dir.display()))?;
        let path = self.target(session);
        fs::write(&path, session.notice())
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "notice written");
        Ok(())
    }

    fn success_message(&self) -> &str {
        "Notice téléchargée au format .txt."
    }

    fn failure_message(&self) -> &str {
        "Le téléchargement a échoué. Réessayez ou copiez le texte."
    }
}

/// Create a sink by name. `file` needs an output directory.
pub fn create_sink(name: &str, dir: Option<&Path>) -> Result<Box<dyn Sink>> {
    match name {
        "stdout" | "copy" => Ok(Box::new(StdoutSink)),
        "file" | "txt" => {
            let dir = dir.context("--output is required for the file sink")?;
            Ok(Box::new(FileSink::new(dir)))
        }
        _ => Err(anyhow!("unknown sink: {}. Use stdout or file", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_writes_the_current_notice() {
        let dir = tempfile::TempDir::new().unwrap();
        let sink = FileSink::new(dir.path());
        let mut session = Session::new();
        session.set_text("general.project_name", "Centre Culturel").unwrap();

        sink.deliver(&session).unwrap();
        let written = fs::read_to_string(
            dir.path().join("centre_culturel_notice_incendie_accessibilite.txt"),
        )
        .unwrap();
        assert_eq!(written, session.notice());
    }

    #[test]
    fn unknown_sink_is_rejected() {
        assert!(create_sink("pdf", None).is_err());
        assert!(create_sink("file", None).is_err());
        assert!(create_sink("stdout", None).is_ok());
    }
}
