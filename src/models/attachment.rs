//! Supporting documents attached to a return request
//!
//! Limits: at most 10 files and 10 MiB in total. Accepted types are images,
//! PDF, Word and Excel documents, recognised by file extension.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

use crate::error::{ReturnsError, ReturnsResult, ValidationError};

pub const MAX_ATTACHMENTS: usize = 10;
pub const MAX_TOTAL_BYTES: u64 = 10 * 1024 * 1024;

/// A file carried alongside a delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    /// Raw file contents, base64 encoded when serialized
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Build an attachment from in-memory contents
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name)
            .ok_or_else(|| ValidationError::UnsupportedFileType(file_name.clone()))?;
        Ok(Self {
            size_bytes: bytes.len() as u64,
            content_type: content_type.to_string(),
            file_name,
            bytes,
        })
    }

    /// Human readable size in megabytes, e.g. "0.25 MB"
    pub fn size_display(&self) -> String {
        format_megabytes(self.size_bytes)
    }
}

/// Infer the MIME type of an accepted file from its extension
pub fn content_type_for(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => return None,
    };
    Some(mime)
}

pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// The files selected for one return request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    files: Vec<Attachment>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[Attachment] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }

    /// Whether another file could still be accepted
    pub fn has_room(&self) -> bool {
        self.files.len() < MAX_ATTACHMENTS && self.total_bytes() < MAX_TOTAL_BYTES
    }

    /// Add an attachment, enforcing the count and size limits
    pub fn add(&mut self, attachment: Attachment) -> Result<(), ValidationError> {
        self.check_room(attachment.size_bytes)?;
        self.files.push(attachment);
        Ok(())
    }

    /// Read a file from disk and attach it
    ///
    /// Type and size are checked before the contents are read.
    pub fn add_path(&mut self, path: &Path) -> ReturnsResult<&Attachment> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ReturnsError::Io(format!("Not a file: {}", path.display())))?
            .to_string();

        if content_type_for(&file_name).is_none() {
            return Err(ValidationError::UnsupportedFileType(file_name).into());
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| ReturnsError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        self.check_room(metadata.len())?;

        let bytes = std::fs::read(path)
            .map_err(|e| ReturnsError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let attachment = Attachment::from_bytes(file_name, bytes)?;
        self.add(attachment)?;

        let last = self.files.len() - 1;
        Ok(&self.files[last])
    }

    /// Remove the attachment at `index`, returning it if present
    pub fn remove(&mut self, index: usize) -> Option<Attachment> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn into_vec(self) -> Vec<Attachment> {
        self.files
    }

    fn check_room(&self, incoming: u64) -> Result<(), ValidationError> {
        if self.files.len() >= MAX_ATTACHMENTS {
            return Err(ValidationError::TooManyFiles {
                max: MAX_ATTACHMENTS,
            });
        }
        if self.total_bytes() + incoming > MAX_TOTAL_BYTES {
            return Err(ValidationError::AttachmentsTooLarge {
                limit_mb: MAX_TOTAL_BYTES / 1024 / 1024,
            });
        }
        Ok(())
    }
}

mod base64_bytes {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("receipt.PDF"), Some("application/pdf"));
        assert_eq!(content_type_for("photo.jpeg"), Some("image/jpeg"));
        assert_eq!(content_type_for("sheet.xlsx").map(|m| m.contains("spreadsheet")), Some(true));
        assert_eq!(content_type_for("letter.doc"), Some("application/msword"));
        assert_eq!(content_type_for("script.sh"), None);
        assert_eq!(content_type_for("noextension"), None);
    }

    #[test]
    fn test_rejects_eleventh_file() {
        let mut set = AttachmentSet::new();
        for i in 0..MAX_ATTACHMENTS {
            set.add(Attachment::from_bytes(format!("p{i}.png"), vec![0; 4]).unwrap())
                .unwrap();
        }
        assert!(!set.has_room());
        let err = set
            .add(Attachment::from_bytes("extra.png", vec![0; 4]).unwrap())
            .unwrap_err();
        assert_eq!(err, ValidationError::TooManyFiles { max: 10 });
        assert_eq!(set.len(), MAX_ATTACHMENTS);
    }

    #[test]
    fn test_rejects_over_total_size() {
        let mut set = AttachmentSet::new();
        let big = vec![0u8; (MAX_TOTAL_BYTES - 10) as usize];
        set.add(Attachment::from_bytes("big.pdf", big).unwrap()).unwrap();
        let err = set
            .add(Attachment::from_bytes("small.pdf", vec![0; 11]).unwrap())
            .unwrap_err();
        assert!(matches!(err, ValidationError::AttachmentsTooLarge { .. }));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_add_path_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("receipt.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let mut set = AttachmentSet::new();
        let added = set.add_path(&path).unwrap();
        assert_eq!(added.file_name, "receipt.pdf");
        assert_eq!(added.size_bytes, 8);
        assert_eq!(set.total_bytes(), 8);

        assert!(set.remove(5).is_none());
        assert!(set.remove(0).is_some());
        assert!(set.is_empty());
    }

    #[test]
    fn test_add_path_rejects_unsupported_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.exe");
        std::fs::write(&path, b"MZ").unwrap();

        let mut set = AttachmentSet::new();
        let err = set.add_path(&path).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_bytes_serialize_as_base64() {
        let attachment = Attachment::from_bytes("a.png", b"hi".to_vec()).unwrap();
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["bytes"], "aGk=");
        let back: Attachment = serde_json::from_value(json).unwrap();
        assert_eq!(back.bytes, b"hi");
    }
}
