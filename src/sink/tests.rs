use super::*;
use crate::playlist::ResourceHandle;
use std::path::Path;

#[test]
fn create_hands_out_distinct_live_urls() {
    let mut urls = ObjectUrls::new();
    let a = urls.create(&ResourceHandle::new("/tmp/a.mp3"));
    let b = urls.create(&ResourceHandle::new("/tmp/a.mp3"));

    assert_ne!(a.id(), b.id());
    assert_eq!(a.path(), Path::new("/tmp/a.mp3"));
    assert_eq!(urls.live(), 2);
    assert!(urls.is_live(&a));
    assert!(urls.is_live(&b));
}

#[test]
fn revoke_releases_once() {
    let mut urls = ObjectUrls::new();
    let handle = ResourceHandle::new("/tmp/a.mp3");
    let a = urls.create(&handle);
    let id = a.id();

    assert!(urls.revoke(a));
    assert_eq!(urls.live(), 0);

    // A second URL never reuses a revoked id.
    let b = urls.create(&handle);
    assert!(b.id() > id);
    assert_eq!(urls.live(), 1);
}

#[test]
fn media_url_displays_as_blob_url() {
    let mut urls = ObjectUrls::new();
    let a = urls.create(&ResourceHandle::new("/tmp/a.mp3"));
    assert_eq!(a.to_string(), format!("blob:cadenza/{}", a.id()));
}

#[test]
fn load_error_messages_name_the_file() {
    let err = LoadError::Open {
        path: "/tmp/missing.mp3".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    };
    let msg = err.to_string();
    assert!(msg.contains("/tmp/missing.mp3"));
    assert!(msg.contains("no such file"));
}

#[test]
fn unavailable_output_is_a_load_error() {
    let err = LoadError::OutputUnavailable;
    assert_eq!(err.to_string(), "audio output is unavailable");
}
