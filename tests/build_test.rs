use std::fs;
use std::path::Path;
use tempfile::TempDir;

use mtp::BuildConfig;

fn write_sources(root: &Path, slides: &str) -> BuildConfig {
    let assets = root.join("assets");
    fs::create_dir_all(&assets).expect("Failed to create assets dir");
    fs::write(root.join("slides.md"), slides).expect("Failed to write slides");
    fs::write(
        assets.join("_theme.scss"),
        "$accent: blue;\nh1 { color: $accent; }\n",
    )
    .expect("Failed to write theme");
    fs::write(assets.join("_app.scss"), "body { margin: 0; }\n").expect("Failed to write app scss");

    BuildConfig {
        slides_path: root.join("slides.md"),
        assets_dir: assets,
        build_dir: root.join("build"),
        redirect_path: root.join("index.htm"),
        asset_pattern: "*".to_string(),
    }
}

#[test]
fn test_run_build_produces_full_artifact() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let config = write_sources(
        root,
        "# A\n\n***\n\n# B\n\n```rawhtml\n<b>x</b>\n```\n",
    );
    fs::write(config.assets_dir.join("logo.svg"), "<svg/>").expect("Failed to write asset");

    mtp::run_build(&config).expect("Build failed");

    let index = fs::read_to_string(config.build_dir.join("index.htm")).unwrap();
    assert_eq!(index.matches("<section>").count(), 2);
    assert!(index.contains("<h1>A</h1>"));
    assert!(index.contains("<h1>B</h1>"));
    assert!(index.contains("<b>x</b>"), "raw html must pass unescaped");
    assert!(index.contains(r#"href="presentation.css""#));

    let css = fs::read_to_string(config.build_dir.join("presentation.css")).unwrap();
    assert!(css.contains("blue"));
    assert!(css.contains("margin"));

    assert!(config.build_dir.join("logo.svg").exists());
    assert!(!config.build_dir.join("_theme.scss").exists());

    let redirect = fs::read_to_string(&config.redirect_path).unwrap();
    assert!(redirect.contains("url=build/index.htm"));
}

#[test]
fn test_run_build_with_no_assets_still_succeeds() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_sources(temp_dir.path(), "# Only\n");

    mtp::run_build(&config).expect("Build failed");

    let mut names: Vec<String> = fs::read_dir(&config.build_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["index.htm", "presentation.css"]);
}

#[test]
fn test_run_build_clears_stale_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_sources(temp_dir.path(), "# Only\n");

    fs::create_dir_all(&config.build_dir).unwrap();
    fs::write(config.build_dir.join("stale.txt"), "old").unwrap();

    mtp::run_build(&config).expect("Build failed");
    assert!(!config.build_dir.join("stale.txt").exists());
}

#[test]
fn test_run_build_missing_slides_is_fatal_before_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = write_sources(temp_dir.path(), "# Only\n");
    config.slides_path = temp_dir.path().join("no-such-slides.md");

    let result = mtp::run_build(&config);
    assert!(matches!(result, Err(mtp::MtpError::MissingInput(_))));
    assert!(!config.build_dir.exists());
    assert!(!config.redirect_path.exists());
}

#[test]
fn test_failed_rebuild_preserves_previous_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_sources(temp_dir.path(), "# First\n");

    mtp::run_build(&config).expect("Build failed");
    let before = fs::read_to_string(config.build_dir.join("index.htm")).unwrap();

    // Break the stylesheet sources and change the slides.
    fs::remove_file(config.assets_dir.join("_app.scss")).unwrap();
    fs::write(&config.slides_path, "# Second\n").unwrap();

    let result = mtp::run_build(&config);
    assert!(result.is_err());

    let after = fs::read_to_string(config.build_dir.join("index.htm")).unwrap();
    assert_eq!(before, after, "failed build must not disturb prior output");
}

#[test]
fn test_run_build_is_idempotent_for_identical_inputs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_sources(temp_dir.path(), "# A\n\n***\n\n# B\n");

    mtp::run_build(&config).expect("Build failed");
    let first = fs::read_to_string(config.build_dir.join("index.htm")).unwrap();

    mtp::run_build(&config).expect("Rebuild failed");
    let second = fs::read_to_string(config.build_dir.join("index.htm")).unwrap();
    assert_eq!(first, second);
}
