use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ArtifactLabel;
use crate::error::BookingError;
use crate::qr;
use crate::ticket::Ticket;

#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub path: PathBuf,
    pub mime: &'static str,
    pub bytes: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportedFiles {
    pub text: Option<Artifact>,
    pub image: Option<Artifact>,
    pub audio: Option<Artifact>,
}

impl ExportedFiles {
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        [&self.text, &self.image, &self.audio]
            .into_iter()
            .flatten()
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub label: ArtifactLabel,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            label: ArtifactLabel::default(),
        }
    }
}

fn write_artifact(path: PathBuf, mime: &'static str, data: &[u8]) -> Result<Artifact, BookingError> {
    fs::write(&path, data)
        .map_err(|e| BookingError::Io(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), mime, bytes = data.len(), "wrote artifact");
    Ok(Artifact {
        path,
        mime,
        bytes: data.len(),
    })
}

fn ensure_dir(dir: &Path) -> Result<(), BookingError> {
    fs::create_dir_all(dir).map_err(|e| BookingError::Io(format!("{}: {e}", dir.display())))
}

/// Writes the ticket text and its QR image. Audio is added separately by
/// [`export_audio`] since it needs the speech collaborator.
pub fn export(ticket: &Ticket, options: &ExportOptions) -> Result<ExportedFiles, BookingError> {
    ensure_dir(&options.out_dir)?;

    let text = write_artifact(
        options.out_dir.join(ticket.file_name(options.label, "txt")),
        "text/plain",
        ticket.text.as_bytes(),
    )?;

    let png = qr::encode_png(&ticket.text)?;
    let image = write_artifact(
        options.out_dir.join(ticket.file_name(options.label, "png")),
        "image/png",
        &png,
    )?;

    Ok(ExportedFiles {
        text: Some(text),
        image: Some(image),
        audio: None,
    })
}

pub fn export_audio(
    ticket: &Ticket,
    audio: &[u8],
    options: &ExportOptions,
) -> Result<Artifact, BookingError> {
    ensure_dir(&options.out_dir)?;
    write_artifact(
        options.out_dir.join(ticket.file_name(options.label, "mp3")),
        "audio/mpeg",
        audio,
    )
}

/// Opens an artifact in the system viewer. Failure is logged, not fatal.
pub fn open_artifact(artifact: &Artifact) {
    if let Err(e) = open::that(&artifact.path) {
        tracing::warn!(path = %artifact.path.display(), error = %e, "failed to open artifact");
    }
}
