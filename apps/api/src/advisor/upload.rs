//! Multipart resume upload: pulls the `resume` file and `job` field out of the
//! form and turns the file into plain text.

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

const PDF_MIME: &str = "application/pdf";

#[derive(Debug)]
pub struct ResumeUpload {
    pub resume_text: String,
    pub job: String,
}

/// Reads the upload form. Unknown fields are skipped.
///
/// Both fields are validated before the resume is converted, so a rejected
/// form never pays for PDF extraction.
pub async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut resume: Option<(Bytes, bool)> = None;
    let mut job: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                if resume.is_some() {
                    return Err(AppError::Validation(
                        "Only one resume file may be uploaded".to_string(),
                    ));
                }
                let pdf = is_pdf(field.content_type(), field.file_name());
                let data = field.bytes().await?;
                debug!("Received resume upload: {} bytes, pdf={pdf}", data.len());
                resume = Some((data, pdf));
            }
            "job" => {
                if job.is_some() {
                    return Err(AppError::Validation(
                        "Only one job field may be sent".to_string(),
                    ));
                }
                job = Some(field.text().await?);
            }
            other => debug!("Ignoring unexpected upload field '{other}'"),
        }
    }

    let (data, pdf) =
        resume.ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;
    let job = job.ok_or_else(|| AppError::Validation("Missing job field".to_string()))?;
    let resume_text = extract_resume_text(data, pdf).await?;

    Ok(ResumeUpload { resume_text, job })
}

fn is_pdf(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.eq_ignore_ascii_case(PDF_MIME))
        || file_name.is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"))
}

/// PDFs go through `pdf-extract` on the blocking pool; anything else is read as UTF-8.
pub async fn extract_resume_text(data: Bytes, pdf: bool) -> Result<String, AppError> {
    if !pdf {
        return Ok(String::from_utf8_lossy(&data).into_owned());
    }

    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            warn!("PDF extraction task failed: {e}");
            AppError::UnprocessableEntity("Could not read PDF resume".to_string())
        })?;

    extracted.map_err(|e| {
        warn!("PDF extraction failed: {e}");
        AppError::UnprocessableEntity(format!("Could not read PDF resume: {e}"))
    })
}
