//! Multipart Form Support
//!
//! Collects a multipart request body into named text fields and files so
//! handlers can validate required fields up front. Uploads (avatars,
//! logos, resumes) arrive alongside regular form fields.

use std::collections::HashMap;

use axum::extract::Multipart;
use jg_media::UploadFile;

use crate::error::{PlatformError, Result};

#[derive(Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadFile>,
}

impl FormData {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| PlatformError::validation(format!("Malformed multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name.is_empty() {
                continue;
            }

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| PlatformError::validation(format!("Unreadable upload: {}", e)))?
                    .to_vec();
                form.files.insert(name, UploadFile::new(file_name, content_type, bytes));
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| PlatformError::validation(format!("Unreadable field: {}", e)))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    pub fn require_text(&self, name: &str) -> Result<&str> {
        self.text(name)
            .ok_or_else(|| PlatformError::validation(format!("{} is required", name)))
    }

    /// A named upload, ignoring empty file parts browsers send for
    /// untouched file inputs.
    pub fn file(&self, name: &str) -> Option<&UploadFile> {
        self.files.get(name).filter(|f| !f.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(fields: &[(&str, &str)]) -> FormData {
        let mut form = FormData::default();
        for (name, value) in fields {
            form.fields.insert(name.to_string(), value.to_string());
        }
        form
    }

    #[test]
    fn test_require_text() {
        let form = form_with(&[("email", "asha@example.com"), ("bio", "  ")]);

        assert_eq!(form.require_text("email").unwrap(), "asha@example.com");
        // whitespace-only counts as missing
        assert!(matches!(
            form.require_text("bio").unwrap_err(),
            PlatformError::Validation { .. }
        ));
        assert!(form.require_text("fullName").is_err());
    }

    #[test]
    fn test_empty_file_parts_are_ignored() {
        let mut form = FormData::default();
        form.files.insert(
            "photo".to_string(),
            UploadFile::new("", "application/octet-stream", vec![]),
        );
        assert!(form.file("photo").is_none());
    }
}
