use std::collections::HashMap;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use overlay_demo::data::ImageGallery;

#[test]
fn selection_is_roughly_uniform() {
    let entries: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("img_{i}.jpg"))).collect();
    let gallery = ImageGallery::new(entries.clone()).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let trials = 5000u32;
    let mut counts: HashMap<PathBuf, u32> = HashMap::new();
    for _ in 0..trials {
        *counts.entry(gallery.pick(&mut rng).clone()).or_default() += 1;
    }

    assert_eq!(counts.len(), entries.len(), "every entry must be reachable");
    let expected = trials as f64 / entries.len() as f64;
    for (path, n) in &counts {
        let deviation = (*n as f64 - expected).abs() / expected;
        assert!(
            deviation < 0.15,
            "{} drawn {} times, expected around {}",
            path.display(),
            n,
            expected
        );
    }
}

#[test]
fn empty_gallery_is_rejected() {
    assert!(ImageGallery::new(vec![]).is_err());
}

#[test]
fn from_dir_collects_only_image_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.jpg"), b"fake").unwrap();
    std::fs::write(dir.path().join("a.png"), b"fake").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();

    let gallery = ImageGallery::from_dir(dir.path()).unwrap();
    let names: Vec<_> = gallery
        .entries()
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["a.png", "b.jpg"]);
}

#[test]
fn dir_without_images_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();
    assert!(ImageGallery::from_dir(dir.path()).is_err());
}
