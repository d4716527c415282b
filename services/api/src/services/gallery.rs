//! Image-field normalization shared by both listing kinds

use media::{MediaUploader, is_inline, resolve, resolve_in_order};

use crate::models::{ImageInput, ImageRow, ImageSet, MAX_GALLERY_IMAGES};

/// Resolve submitted image fields into stored columns.
///
/// A non-empty gallery wins and its first resolved entry becomes the primary
/// image. Otherwise the legacy single image is resolved on its own and the
/// stored gallery is empty.
pub async fn normalize_images(uploader: &dyn MediaUploader, input: &ImageInput) -> ImageSet {
    let gallery = match input.images.as_deref() {
        Some(entries) if !entries.is_empty() => {
            resolve_in_order(uploader, entries, MAX_GALLERY_IMAGES).await
        }
        _ => Vec::new(),
    };

    if !gallery.is_empty() {
        return ImageSet::from_gallery(gallery);
    }

    let image = match input.image.as_deref() {
        Some(entry) if !entry.is_empty() => resolve(uploader, entry).await,
        _ => None,
    };

    ImageSet {
        image,
        images: Vec::new(),
    }
}

/// Upload the inline payloads still stored in a row.
///
/// Returns `None` when the row holds no inline payload. Hosted entries are
/// kept as they are, failed gallery uploads are dropped, the rewritten
/// gallery stops at the size limit, and the primary image is realigned to
/// the first gallery entry.
pub async fn migrate_row(uploader: &dyn MediaUploader, row: &ImageRow) -> Option<ImageSet> {
    let inline_primary = row.image.as_deref().filter(|image| is_inline(image));
    let inline_gallery = row.images.iter().any(|entry| is_inline(entry));
    if inline_primary.is_none() && !inline_gallery {
        return None;
    }

    let mut gallery = Vec::with_capacity(row.images.len().min(MAX_GALLERY_IMAGES));
    for entry in &row.images {
        if gallery.len() == MAX_GALLERY_IMAGES {
            break;
        }
        if is_inline(entry) {
            if let Some(url) = resolve(uploader, entry).await {
                gallery.push(url);
            }
        } else {
            gallery.push(entry.clone());
        }
    }

    if !gallery.is_empty() {
        return Some(ImageSet::from_gallery(gallery));
    }

    let image = match inline_primary {
        Some(payload) => resolve(uploader, payload).await,
        None => row.image.clone(),
    };

    Some(ImageSet {
        image,
        images: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use media::testing::{FakeUploader, inline_png};

    fn hosted(n: usize) -> String {
        format!("https://cdn.example.com/{}.jpg", n)
    }

    #[tokio::test]
    async fn test_hosted_gallery_is_kept_as_is() {
        let uploader = FakeUploader::new();
        let images: Vec<String> = (0..4).map(hosted).collect();
        let input = ImageInput {
            image: Some("https://cdn.example.com/ignored.jpg".to_string()),
            images: Some(images.clone()),
        };

        let set = normalize_images(&uploader, &input).await;

        assert_eq!(set.images, images);
        assert_eq!(set.image, Some(hosted(0)));
        assert_eq!(uploader.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_gallery_is_truncated_to_first_ten() {
        let uploader = FakeUploader::new();
        let images: Vec<String> = (0..13).map(hosted).collect();
        let input = ImageInput {
            image: None,
            images: Some(images.clone()),
        };

        let set = normalize_images(&uploader, &input).await;

        assert_eq!(set.images, images[..10].to_vec());
        assert_eq!(set.image, Some(hosted(0)));
    }

    #[tokio::test]
    async fn test_inline_entries_are_uploaded_in_order() {
        let uploader = FakeUploader::failing_on(b"bad");
        let input = ImageInput {
            image: None,
            images: Some(vec![
                inline_png("bad"),
                hosted(1),
                inline_png("good"),
                "ftp://old.example.com/x.jpg".to_string(),
            ]),
        };

        let set = normalize_images(&uploader, &input).await;

        assert_eq!(
            set.images,
            vec![hosted(1), "https://media.test/2.png".to_string()]
        );
        assert_eq!(set.image, Some(hosted(1)));
    }

    #[tokio::test]
    async fn test_falls_back_to_single_image() {
        let uploader = FakeUploader::new();
        let input = ImageInput {
            image: Some(inline_png("cover")),
            images: Some(Vec::new()),
        };

        let set = normalize_images(&uploader, &input).await;

        assert_eq!(set.image.as_deref(), Some("https://media.test/1.png"));
        assert!(set.images.is_empty());
    }

    #[tokio::test]
    async fn test_unusable_entries_yield_no_images() {
        let uploader = FakeUploader::failing_on(b"bad");
        let input = ImageInput {
            image: Some("/local/path.jpg".to_string()),
            images: Some(vec![inline_png("bad")]),
        };

        assert_eq!(normalize_images(&uploader, &input).await, ImageSet::default());
        assert_eq!(
            normalize_images(&uploader, &ImageInput::default()).await,
            ImageSet::default()
        );
    }

    #[tokio::test]
    async fn test_migrate_row_skips_hosted_rows() {
        let uploader = FakeUploader::new();
        let row = ImageRow {
            id: 1,
            image: Some(hosted(0)),
            images: vec![hosted(0), hosted(1)],
        };

        assert!(migrate_row(&uploader, &row).await.is_none());
        assert_eq!(uploader.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_migrate_row_uploads_and_realigns_primary() {
        let uploader = FakeUploader::failing_on(b"bad");
        let row = ImageRow {
            id: 1,
            image: Some(inline_png("a")),
            images: vec![inline_png("a"), inline_png("bad"), hosted(9)],
        };

        let set = migrate_row(&uploader, &row).await.unwrap();

        assert_eq!(
            set.images,
            vec!["https://media.test/1.png".to_string(), hosted(9)]
        );
        assert_eq!(set.image.as_deref(), Some("https://media.test/1.png"));
        // The primary duplicates gallery[0] and is not uploaded again
        assert_eq!(uploader.upload_count(), 2);
    }

    #[tokio::test]
    async fn test_migrate_row_caps_oversized_gallery() {
        let uploader = FakeUploader::new();
        let mut images: Vec<String> = (0..11).map(hosted).collect();
        images.push(inline_png("late"));
        let row = ImageRow {
            id: 1,
            image: None,
            images,
        };

        let set = migrate_row(&uploader, &row).await.unwrap();

        assert_eq!(set.images.len(), MAX_GALLERY_IMAGES);
        assert_eq!(set.images[9], hosted(9));
        assert_eq!(set.image, Some(hosted(0)));
        assert_eq!(uploader.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_migrate_row_failed_primary_is_cleared() {
        let uploader = FakeUploader::failing_on(b"bad");
        let row = ImageRow {
            id: 1,
            image: Some(inline_png("bad")),
            images: Vec::new(),
        };

        let set = migrate_row(&uploader, &row).await.unwrap();
        assert_eq!(set, ImageSet::default());
    }
}
