use beep_api::handlers::upload::{
    MAX_PHOTO_BYTES, PhotoUpload, photo_extension, photo_file_name, photo_url, store_photo,
    validate_photo,
};
use beep_core::errors::BeepError;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn validation_message(result: Result<(), BeepError>) -> String {
    match result {
        Err(BeepError::Validation(message)) => message,
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_accepts_images_within_limit() {
    assert!(validate_photo(Some("image/jpeg"), 1024).is_ok());
    assert!(validate_photo(Some("image/png"), MAX_PHOTO_BYTES).is_ok());
}

#[test]
fn test_rejects_non_images() {
    assert_eq!(
        validation_message(validate_photo(Some("application/pdf"), 10)),
        "File must be an image"
    );
    assert_eq!(
        validation_message(validate_photo(None, 10)),
        "File must be an image"
    );
}

#[test]
fn test_rejects_empty_and_oversized_files() {
    assert_eq!(
        validation_message(validate_photo(Some("image/jpeg"), 0)),
        "File is empty"
    );
    assert_eq!(
        validation_message(validate_photo(Some("image/jpeg"), MAX_PHOTO_BYTES + 1)),
        "File size must not exceed 5MB"
    );
}

#[rstest]
#[case(Some("car.PNG"), "image/png", ".png")]
#[case(Some("front.jpeg"), "image/jpeg", ".jpeg")]
#[case(Some("no_extension"), "image/webp", ".webp")]
#[case(None, "image/gif", ".gif")]
#[case(None, "image/heic", ".jpg")]
#[case(Some("weird.ext<>"), "image/png", ".png")]
fn test_photo_extension(
    #[case] file_name: Option<&str>,
    #[case] content_type: &str,
    #[case] expected: &str,
) {
    assert_eq!(photo_extension(file_name, content_type), expected);
}

#[test]
fn test_file_name_layout() {
    let name = photo_file_name("master", 12, 1_700_000_000, ".jpg");

    let stem = name.strip_suffix(".jpg").unwrap();
    let parts: Vec<&str> = stem.split('_').collect();
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0], "master");
    assert_eq!(parts[1], "12");
    assert_eq!(parts[2], "1700000000");
    assert_eq!(parts[3].len(), 8);
    assert!(parts[3].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_same_second_uploads_do_not_collide() {
    let first = photo_file_name("user", 1, 1_700_000_000, ".png");
    let second = photo_file_name("user", 1, 1_700_000_000, ".png");
    assert_ne!(first, second);
}

#[test]
fn test_photo_url() {
    assert_eq!(photo_url("user_1_2_abcdef12.png"), "/static/uploads/user_1_2_abcdef12.png");
}

#[tokio::test]
async fn test_store_photo_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().join("uploads");
    let photo = PhotoUpload {
        content_type: "image/png".to_string(),
        extension: ".png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    };

    let url = store_photo(&upload_dir, "work", 5, &photo).await.unwrap();

    let file_name = url.strip_prefix("/static/uploads/").unwrap();
    assert!(file_name.starts_with("work_5_"));
    assert!(file_name.ends_with(".png"));

    let stored = std::fs::read(upload_dir.join(file_name)).unwrap();
    assert_eq!(stored, photo.bytes);
}
