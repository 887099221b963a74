use rt_render::{
    config::RendererConfig,
    resources::texture::{
        TextureData, TextureKind, texture_from_dir, texture_from_file, texture_to_file,
    },
};

fn gradient(width: u32, height: u32, components: u8) -> Vec<u8> {
    (0..width * height * components as u32)
        .map(|i| (i * 7 % 256) as u8)
        .collect()
}

#[test]
fn should_round_trip_rgb_png() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("rgb.png");
    let original = TextureData::new(gradient(5, 3, 3), 5, 3, 3, TextureKind::Diffuse)
        .expect("valid texture");

    texture_to_file(&path, &original).expect("failed to write texture");
    let loaded = texture_from_file(&path, TextureKind::Specular).expect("failed to read texture");

    assert_eq!((loaded.width, loaded.height), (5, 3));
    assert_eq!(loaded.num_components, 3);
    assert_eq!(loaded.kind, TextureKind::Specular);
    assert_eq!(loaded.path, path);
    assert_eq!(loaded.tightly_packed(), original.tightly_packed());
}

#[test]
fn should_keep_single_channel_images() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let original = TextureData::new(gradient(4, 4, 1), 4, 4, 1, TextureKind::Height)
        .expect("valid texture");

    texture_to_file(dir.path().join("height.png"), &original).expect("failed to write texture");
    let loaded = texture_from_dir("height.png", dir.path(), TextureKind::Height)
        .expect("failed to read texture");

    assert_eq!(loaded.num_components, 1);
    assert_eq!(loaded.pixels, original.pixels);
}

#[test]
fn should_honour_row_stride_when_writing() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("strided.png");
    // Two RGBA rows of two pixels, each row padded to 12 bytes.
    let mut pixels = vec![0xEE; 24];
    pixels[..8].copy_from_slice(&[1, 2, 3, 255, 4, 5, 6, 255]);
    pixels[12..20].copy_from_slice(&[7, 8, 9, 255, 10, 11, 12, 255]);
    let strided = TextureData::with_stride(pixels, 2, 2, 4, 12, TextureKind::Diffuse)
        .expect("valid texture");
    assert_eq!(strided.row(1), &[7, 8, 9, 255, 10, 11, 12, 255]);

    texture_to_file(&path, &strided).expect("failed to write texture");
    let loaded = texture_from_file(&path, TextureKind::Diffuse).expect("failed to read texture");
    assert_eq!(
        loaded.pixels,
        vec![1, 2, 3, 255, 4, 5, 6, 255, 7, 8, 9, 255, 10, 11, 12, 255]
    );
}

#[test]
fn should_name_missing_file_in_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let err = texture_from_file(dir.path().join("missing.png"), TextureKind::Diffuse)
        .expect_err("missing file must fail");
    assert!(format!("{err:#}").contains("missing.png"));
}

#[test]
fn should_reject_undecodable_bytes() {
    let err = TextureData::from_bytes(b"not an image", "garbage.png", TextureKind::Diffuse)
        .expect_err("garbage must fail");
    assert!(format!("{err:#}").contains("garbage.png"));
}

#[test]
fn should_only_expand_supported_channel_counts() {
    let grey = TextureData::new(vec![10, 20], 2, 1, 1, TextureKind::Diffuse).expect("valid");
    assert_eq!(grey.to_rgba8().expect("grey"), vec![10, 0, 0, 255, 20, 0, 0, 255]);

    let rgb = TextureData::new(vec![1, 2, 3], 1, 1, 3, TextureKind::Diffuse).expect("valid");
    assert_eq!(rgb.to_rgba8().expect("rgb"), vec![1, 2, 3, 255]);

    let grey_alpha = TextureData::new(vec![1, 2], 1, 1, 2, TextureKind::Diffuse).expect("valid");
    assert!(grey_alpha.to_rgba8().is_err());
}

#[test]
fn should_validate_buffer_shape() {
    assert!(TextureData::new(vec![0; 3], 2, 2, 1, TextureKind::Diffuse).is_err());
    assert!(TextureData::new(vec![0; 4], 1, 1, 5, TextureKind::Diffuse).is_err());
    assert!(TextureData::with_stride(vec![0; 8], 2, 1, 4, 4, TextureKind::Diffuse).is_err());
}

#[test]
fn should_generate_checkerboard() {
    let board = TextureData::checkerboard(8, 2, [255; 4], [0, 0, 0, 255]);
    assert_eq!(board.pixels.len(), 8 * 8 * 4);
    assert_eq!(&board.row(0)[..4], &[255; 4]);
    assert_eq!(&board.row(0)[16..20], &[0, 0, 0, 255]);
    assert_eq!(&board.row(4)[..4], &[0, 0, 0, 255]);
}

#[test]
fn should_resolve_relative_asset_paths() {
    let mut config = RendererConfig::model_viewer();
    config.assets_dir = "/srv/assets".into();
    assert_eq!(
        config.asset_path("objects/backpack.obj"),
        std::path::PathBuf::from("/srv/assets/objects/backpack.obj")
    );
    let absolute = std::env::temp_dir().join("model.obj");
    assert_eq!(config.asset_path(&absolute), absolute);
}
