use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};
use crate::types::FileAttachment;

/// A file the user picked for upload.
///
/// The read yields a `data:` URL, the way a browser file reader does; the
/// base64 payload is recovered with [`base64_payload`].
#[async_trait::async_trait]
pub trait FileSource: Send + Sync {
    /// The file name shown to the user and sent to the server.
    fn name(&self) -> &str;

    /// The MIME type of the file.
    fn mime_type(&self) -> &str;

    /// Size of the file in bytes.
    fn size(&self) -> u64;

    /// Read the complete file as a `data:<mime>;base64,<payload>` URL.
    async fn read_data_url(&self) -> Result<String>;
}

/// Returns everything after the first comma of a data URL.
pub fn base64_payload(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, payload)| payload)
}

/// Encode bytes as a base64 data URL.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Read `source` and package it for a [`crate::types::ChatRequest`].
pub async fn read_attachment(source: &dyn FileSource) -> Result<FileAttachment> {
    let data_url = source.read_data_url().await?;
    let content = base64_payload(&data_url).ok_or_else(|| {
        Error::encoding(
            format!("{} did not read as a data URL", source.name()),
            None,
        )
    })?;
    Ok(FileAttachment {
        name: source.name().to_string(),
        mime_type: source.mime_type().to_string(),
        content: content.to_string(),
    })
}

/// A file on the local file system.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    mime_type: String,
    size: u64,
}

impl LocalFile {
    /// Stat `path` and guess its MIME type from the extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .map_err(|err| Error::io(format!("cannot stat {}", path.display()), err))?;
        if !metadata.is_file() {
            return Err(Error::validation(
                format!("{} is not a regular file", path.display()),
                Some("path".to_string()),
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        Ok(Self {
            path: path.to_path_buf(),
            name,
            mime_type,
            size: metadata.len(),
        })
    }

    /// The path this file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl FileSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn read_data_url(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|err| Error::io(format!("cannot read {}", self.path.display()), err))?;
        Ok(to_data_url(&self.mime_type, &bytes))
    }
}
