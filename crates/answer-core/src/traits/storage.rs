// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage capability trait for file upload backends (S3, OSS, local disk).

use async_trait::async_trait;

use crate::error::AnswerError;
use crate::traits::base::Base;
use crate::types::{UploadFile, UploadedFile};

/// Plugin that persists uploaded files and returns their public URL.
#[async_trait]
pub trait Storage: Base {
    async fn upload_file(&self, file: UploadFile) -> Result<UploadedFile, AnswerError>;
}
