// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use base64::prelude::*;

use crate::graphql::Context;
use crate::uploads::{AttachmentError, AttachmentField, AttachmentMode, FileUpload};

#[derive(juniper::GraphQLInputObject)]
pub struct FileInput {
    pub name: String,
    pub content_type: String,
    /// File contents, standard base64.
    pub data_base64: String,
}

#[derive(juniper::GraphQLObject)]
pub struct FailedUpload {
    pub filename: String,
    pub reason: String,
}

#[derive(juniper::GraphQLObject)]
pub struct AttachmentOutcome {
    /// Resolved URLs in selection order, including any seed URLs kept.
    pub urls: Vec<String>,
    /// The serialized field value the enclosing form submits.
    pub value: String,
    /// Set when an upload failed; earlier uploads are retained, later files
    /// were never attempted and must be re-selected.
    pub failed: Option<FailedUpload>,
}

/// One attachment session: seed the field from its current value, upload
/// the selected files sequentially, and hand back the new field value. The
/// response is atomic, so the form never sees a half-uploaded list.
pub async fn attach_images(
    ctx: &Context,
    mode: AttachmentMode,
    existing: Option<String>,
    files: Vec<FileInput>,
) -> juniper::FieldResult<AttachmentOutcome> {
    ctx.require_admin()?;

    let Some(store) = ctx.blob_store() else {
        return Err(juniper::FieldError::new(
            "Image storage is not configured on this deployment",
            juniper::Value::null(),
        ));
    };

    let mut decoded = Vec::with_capacity(files.len());
    for file in files {
        let bytes = BASE64_STANDARD.decode(&file.data_base64).map_err(|_| {
            juniper::FieldError::new(
                format!("File {} is not valid base64", file.name),
                juniper::Value::null(),
            )
        })?;
        decoded.push(FileUpload {
            name: file.name,
            content_type: file.content_type,
            bytes,
        });
    }

    let mut field = AttachmentField::seeded(mode, existing.as_deref().unwrap_or(""));
    let failed = match field.attach(decoded, store).await {
        Ok(_) => None,
        Err(AttachmentError::Upload { filename, source }) => Some(FailedUpload {
            filename,
            reason: source.to_string(),
        }),
    };

    Ok(AttachmentOutcome {
        urls: field.urls().to_vec(),
        value: field.submitted_value(),
        failed,
    })
}
