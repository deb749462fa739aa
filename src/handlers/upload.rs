use std::path::{Path, PathBuf};

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures_util::TryStreamExt;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;

const MAX_FILES: usize = 5;

/// Where uploaded images land on disk. The directory is served by
/// `actix-files` under `/uploads`.
#[derive(Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
}

impl UploadConfig {
    pub fn from_env() -> Self {
        let dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());
        Self { dir: dir.into() }
    }
}

fn bad_multipart(e: actix_multipart::MultipartError) -> ApiError {
    ApiError::Validation(format!("Invalid multipart payload: {e}"))
}

/// Keep the original extension if it is a plain alphanumeric suffix,
/// otherwise drop it; the name itself is always a fresh UUID so uploads
/// never collide.
fn unique_filename(original: &str) -> String {
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));

    match ext {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase()),
        None => Uuid::new_v4().to_string(),
    }
}

/// Stream one multipart file field to disk; returns the stored filename.
async fn save_field(field: &mut Field, dir: &Path) -> Result<String, ApiError> {
    let original = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .to_string();
    let filename = unique_filename(&original);

    tokio::fs::create_dir_all(dir).await?;
    let mut file = tokio::fs::File::create(dir.join(&filename)).await?;

    while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(filename)
}

/// POST /api/upload/single — store one image, return its public path.
pub async fn upload_single(
    _user: AuthenticatedUser,
    config: web::Data<UploadConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let dir = config.dir.join("gigs");

    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        // Skip non-file fields.
        if field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .is_none()
        {
            continue;
        }

        let filename = save_field(&mut field, &dir).await?;
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Image uploaded successfully",
            "imagePath": format!("/uploads/gigs/{filename}"),
            "filename": filename,
        })));
    }

    Err(ApiError::Validation("No image file provided".to_string()))
}

/// POST /api/upload/multiple — store up to five images, return their public
/// paths. Files past the cap are ignored rather than failing the request,
/// which would leave the already-written files orphaned on disk.
pub async fn upload_multiple(
    _user: AuthenticatedUser,
    config: web::Data<UploadConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let dir = config.dir.join("gigs");
    let mut filenames = Vec::new();

    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        if field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .is_none()
        {
            continue;
        }

        filenames.push(save_field(&mut field, &dir).await?);
        if filenames.len() == MAX_FILES {
            break;
        }
    }

    if filenames.is_empty() {
        return Err(ApiError::Validation("No image files provided".to_string()));
    }

    let paths: Vec<String> = filenames
        .iter()
        .map(|f| format!("/uploads/gigs/{f}"))
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Images uploaded successfully",
        "imagePaths": paths,
        "filenames": filenames,
    })))
}

#[cfg(test)]
mod tests {
    use super::unique_filename;

    #[test]
    fn keeps_simple_extensions() {
        let name = unique_filename("photo.PNG");
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn drops_suspicious_extensions() {
        let name = unique_filename("evil.sh%00");
        assert!(!name.contains('.'));

        let name = unique_filename("noext");
        assert!(!name.contains('.'));
    }
}
