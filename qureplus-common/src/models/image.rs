use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

/// An image selected by the visitor, held in memory for the lifetime of the intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// True when the declared content type is `image/*`.
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:<content-type>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_image_content_types() {
        assert!(ImageUpload::new("leg.png", "image/png", vec![1u8]).is_image());
        assert!(ImageUpload::new("leg.JPG", "Image/JPEG", vec![1u8]).is_image());
        assert!(!ImageUpload::new("notes.pdf", "application/pdf", vec![1u8]).is_image());
        assert!(!ImageUpload::new("blank", "", vec![1u8]).is_image());
    }

    #[test]
    fn data_url_carries_type_and_base64_payload() {
        let image = ImageUpload::new("leg.png", "image/png", b"hi".to_vec());
        assert_eq!(image.to_data_url(), "data:image/png;base64,aGk=");
    }
}
