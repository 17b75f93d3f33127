use chrono::Utc;
use qureplus_common::models::ImageUpload;
use reqwest::Method;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::Error;
use crate::repositories::supabase::client::SupabaseClient;

pub const IMAGE_PREFIX: &str = "analysis-images";
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Where an uploaded analysis image ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub name: String,
    pub path: String,
    pub public_url: String,
}

/// `analysis-images/{user_id}/{name}`
pub fn object_path(user_id: Uuid, image_name: &str) -> String {
    format!("{IMAGE_PREFIX}/{user_id}/{image_name}")
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl SupabaseClient {
    pub fn public_url(&self, path: &str) -> String {
        self.storage_url(&format!(
            "object/public/{}/{}",
            self.config().bucket,
            encode_path(path)
        ))
    }

    /// Uploads the image under a millisecond-stamped name. Never overwrites.
    pub async fn upload_analysis_image(
        &self,
        user_id: Uuid,
        image: &ImageUpload,
    ) -> Result<StoredImage, Error> {
        let name = format!("{}-{}", Utc::now().timestamp_millis(), image.file_name);
        let path = object_path(user_id, &name);
        let url = self.storage_url(&format!(
            "object/{}/{}",
            self.config().bucket,
            encode_path(&path)
        ));

        info!("Uploading image to storage: {}", path);
        let request = self
            .request(Method::POST, url)
            .header("Content-Type", &image.content_type)
            .header("cache-control", "max-age=3600")
            .header("x-upsert", "false")
            .body(image.bytes.clone());
        self.send(request).await?;

        let public_url = self.public_url(&path);
        Ok(StoredImage {
            name,
            path,
            public_url,
        })
    }

    /// Creates the private image bucket. Returns `false` when it already exists.
    pub async fn ensure_bucket(&self) -> Result<bool, Error> {
        let bucket = self.config().bucket.clone();
        let request = self
            .request(Method::POST, self.storage_url("bucket"))
            .json(&json!({
                "id": bucket,
                "name": bucket,
                "public": false,
                "allowed_mime_types": ALLOWED_IMAGE_TYPES,
                "file_size_limit": MAX_IMAGE_BYTES,
            }));

        match self.send(request).await {
            Ok(_) => {
                info!("Created storage bucket '{}'", bucket);
                Ok(true)
            }
            Err(Error::Backend(msg)) if msg.to_ascii_lowercase().contains("already exists") => {
                warn!("Storage bucket '{}' already exists", bucket);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
