//! End-to-end conversions against a template package built on the fly.

mod common;

use common::{ENGLISH_STYLES, build_template, paragraphs, part_names, read_part, write_input};
use md2docx_engine::{ConvertError, ConvertOptions, IoError, convert_file};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn texts(xml: &str) -> Vec<String> {
    paragraphs(xml).into_iter().map(|(_, text)| text).collect()
}

#[test]
fn converts_the_basic_example() {
    let dir = TempDir::new().unwrap();
    let template = build_template(dir.path(), ENGLISH_STYLES);
    let input = write_input(dir.path(), "doc.md", "# Title\n\nSome **bold** text.\n");
    let output = dir.path().join("doc.docx");

    let report = convert_file(&input, &template, &output, &ConvertOptions::default()).unwrap();

    assert_eq!(report.output, output);
    assert_eq!(report.summary.blocks, 2);
    assert_eq!(report.summary.fallbacks, 0);

    let xml = read_part(&output, "word/document.xml");
    assert_eq!(
        paragraphs(&xml),
        vec![
            (Some("Heading1".to_string()), "Title".to_string()),
            (Some("Normal".to_string()), "Some bold text.".to_string()),
        ]
    );
    assert!(xml.contains("<w:b/>"));
}

#[test]
fn template_body_is_replaced_and_section_kept() {
    let dir = TempDir::new().unwrap();
    let template = build_template(dir.path(), ENGLISH_STYLES);
    let input = write_input(dir.path(), "doc.md", "Hello\n");
    let output = dir.path().join("out.docx");

    convert_file(&input, &template, &output, &ConvertOptions::default()).unwrap();

    let xml = read_part(&output, "word/document.xml");
    assert!(!xml.contains("Template placeholder"));
    assert!(xml.contains(r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:body>"#));
    assert_eq!(texts(&xml), vec!["Hello"]);
}

#[test]
fn template_parts_are_carried_over() {
    let dir = TempDir::new().unwrap();
    let template = build_template(dir.path(), ENGLISH_STYLES);
    let input = write_input(dir.path(), "doc.md", "Hello\n");
    let output = dir.path().join("out.docx");

    convert_file(&input, &template, &output, &ConvertOptions::default()).unwrap();

    let names = part_names(&output);
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
        "word/settings.xml",
    ] {
        assert!(names.iter().any(|n| n == part), "missing {part} in {names:?}");
    }
    assert_eq!(read_part(&output, "word/settings.xml"), "<w:settings/>");
}

#[test]
fn missing_image_becomes_placeholder_text() {
    let dir = TempDir::new().unwrap();
    let template = build_template(dir.path(), ENGLISH_STYLES);
    let input = write_input(dir.path(), "doc.md", "![diagram](images/gone.png)\n");
    let output = dir.path().join("out.docx");

    let report = convert_file(&input, &template, &output, &ConvertOptions::default()).unwrap();

    assert_eq!(report.summary.placeholders, 1);
    let expected = format!(
        "[Image not found: {}]",
        dir.path().join("images/gone.png").display()
    );
    assert_eq!(texts(&read_part(&output, "word/document.xml")), vec![expected]);
    assert!(!part_names(&output).iter().any(|n| n.starts_with("word/media/")));
}

#[test]
fn embeds_a_relative_image() {
    let dir = TempDir::new().unwrap();
    let template = build_template(dir.path(), ENGLISH_STYLES);
    std::fs::create_dir(dir.path().join("images")).unwrap();
    image::RgbImage::new(20, 10)
        .save(dir.path().join("images/chart.png"))
        .unwrap();
    let input = write_input(dir.path(), "doc.md", "![图1-1 Chart](images/chart.png)\n");
    let output = dir.path().join("out.docx");

    let report = convert_file(&input, &template, &output, &ConvertOptions::default()).unwrap();

    assert_eq!(report.summary.images, 1);
    assert!(part_names(&output).iter().any(|n| n == "word/media/image1.png"));

    let xml = read_part(&output, "word/document.xml");
    assert!(xml.contains(r#"r:embed="rIdImage1""#));
    assert!(xml.contains(r#"cx="5486400" cy="2743200""#));
    assert_eq!(
        paragraphs(&xml).last().unwrap(),
        &(Some("Caption".to_string()), "图1-1 Chart".to_string())
    );

    let rels = read_part(&output, "word/_rels/document.xml.rels");
    assert!(rels.contains(r#"Id="rId1""#));
    assert!(rels.contains(r#"Id="rIdImage1""#));
    assert!(rels.contains(r#"Target="media/image1.png""#));

    let content_types = read_part(&output, "[Content_Types].xml");
    assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
}

#[test]
fn table_and_note_become_word_tables() {
    let dir = TempDir::new().unwrap();
    let template = build_template(dir.path(), ENGLISH_STYLES);
    let text = "| Name | Size |\n|------|------|\n| a | 1 |\n\n注意\nKeep **backups**.\n";
    let input = write_input(dir.path(), "doc.md", text);
    let output = dir.path().join("out.docx");

    convert_file(&input, &template, &output, &ConvertOptions::default()).unwrap();

    let xml = read_part(&output, "word/document.xml");
    assert_eq!(xml.matches("<w:tbl>").count(), 2);
    assert!(xml.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
    assert_eq!(
        texts(&xml),
        vec!["Name", "Size", "a", "1", "注意", "Keep backups."]
    );
}

#[test]
fn missing_styles_fall_back_without_failing() {
    let dir = TempDir::new().unwrap();
    let template = build_template(dir.path(), &[("paragraph", "Normal", "Normal")]);
    let input = write_input(dir.path(), "doc.md", "- item\n\n```\ncode\n```\n");
    let output = dir.path().join("out.docx");

    let report = convert_file(&input, &template, &output, &ConvertOptions::default()).unwrap();

    // The list has no Normal fallback; the code line borrows Normal.
    assert_eq!(report.summary.fallbacks, 1);
    let xml = read_part(&output, "word/document.xml");
    assert!(xml.contains(r#"<w:ind w:left="720" w:hanging="360"/>"#));
    assert!(xml.contains(r#"<w:shd w:val="clear" w:color="auto" w:fill="F5F5F5"/>"#));
    assert_eq!(
        paragraphs(&xml),
        vec![
            (None, "item".to_string()),
            (Some("Normal".to_string()), "code".to_string()),
        ]
    );
}

#[test]
fn missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let template = build_template(dir.path(), ENGLISH_STYLES);
    let input = dir.path().join("absent.md");

    let err = convert_file(
        &input,
        &template,
        &dir.path().join("out.docx"),
        &ConvertOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ConvertError::Io(IoError::NotFound(path)) if path == input));
}

#[test]
fn missing_template_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "doc.md", "Hello\n");
    let output = dir.path().join("out.docx");

    let err = convert_file(
        &input,
        &dir.path().join("none.docx"),
        &output,
        &ConvertOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ConvertError::TemplateOpen { .. }));
    assert!(!output.exists());
}
