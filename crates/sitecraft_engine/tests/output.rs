use std::fs;

use pretty_assertions::assert_eq;
use sitecraft_engine::{
    decode_site_source, ensure_site_dir, site_output_filename, site_slug, site_title,
    write_site_file, SiteWriter,
};
use tempfile::TempDir;

#[test]
fn creates_missing_site_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("sites");
    ensure_site_dir(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn writer_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = SiteWriter::new(temp.path().to_path_buf());

    let first = writer.write("index.html", "<p>one</p>").unwrap();
    let second = writer.write("index.html", "<p>two</p>").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "<p>two</p>");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn writer_into_a_file_path_fails_without_leftovers() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let result = SiteWriter::new(blocker.clone()).write("index.html", "<p/>");

    assert!(result.is_err());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn explicit_path_is_written() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("out").join("refined.html");

    let written = write_site_file(&target, "<h1>Done</h1>").unwrap();

    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "<h1>Done</h1>");
}

#[test]
fn output_name_comes_from_title_and_content() {
    let html = "<html><head><title>  Café   Luna \n</title></head><body><h1>Menu</h1></body></html>";
    let title = site_title(html);
    assert_eq!(title.as_deref(), Some("Café Luna"));

    let name = site_output_filename(title.as_deref(), html);
    assert!(name.starts_with("caf-luna--"));
    assert!(name.ends_with(".html"));
    assert_eq!(name.len(), "caf-luna--".len() + 8 + ".html".len());
    assert_eq!(name, site_output_filename(title.as_deref(), html));
    assert_ne!(name, site_output_filename(title.as_deref(), "<p>other</p>"));
}

#[test]
fn heading_stands_in_for_missing_title() {
    assert_eq!(
        site_title("<body><h1>Bakery <em>Luna</em></h1></body>").as_deref(),
        Some("Bakery Luna")
    );
    assert_eq!(site_title("<p>nothing</p>"), None);
}

#[test]
fn slug_falls_back_and_is_bounded() {
    assert_eq!(site_slug(None), "site");
    assert_eq!(site_slug(Some("!!!")), "site");
    assert_eq!(site_slug(Some("Hello, World!")), "hello-world");
    assert!(site_slug(Some("word ".repeat(40).as_str())).len() <= 63);
}

#[test]
fn decoded_source_feeds_title_extraction() {
    let bytes = b"<html><head><meta charset=\"windows-1252\"><title>Caf\xe9</title></head></html>";
    let decoded = decode_site_source(bytes).unwrap();
    assert_eq!(site_title(&decoded.html).as_deref(), Some("Café"));
}
