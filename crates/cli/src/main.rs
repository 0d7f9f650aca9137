//! Demo binary: runs the sample German page through glossary-aware mock
//! translation and the fit loop, printing the resulting `TypesetPage` as
//! JSON. Not a production entry point — real deployments wire their own
//! OCR ingestion, translation backend, and config in front of this core.

use interface::{Block, BlockType, BoundingBox, FitLoopConfig, Glossary, GlossaryTerm, Page};
use layout_driver::PageLayoutDriver;
use measurement::ReferenceMeasurementOracle;
use mock_backend::MockBackend;
use translator::ParagraphTranslator;

fn sample_page() -> Page {
    let blocks = vec![
        Block::new(
            "block_1",
            BlockType::Heading,
            BoundingBox::new(120.0, 80.0, 980.0, 60.0),
            10,
            "Die Entwicklung der modernen Typografie",
        ),
        Block::new(
            "block_2",
            BlockType::Paragraph,
            BoundingBox::new(120.0, 180.0, 980.0, 120.0),
            20,
            "Die Geschichte der Typografie ist eng mit der Entwicklung der Drucktechnik \
             verbunden. Johannes Gutenberg revolutionierte im 15. Jahrhundert den Buchdruck \
             durch die Erfindung der beweglichen Lettern.",
        ),
        Block::new(
            "block_3",
            BlockType::Paragraph,
            BoundingBox::new(120.0, 320.0, 980.0, 100.0),
            30,
            "In der Renaissance entstanden die ersten standardisierten Schriftformen. Die \
             humanistische Minuskel bildete die Grundlage für viele moderne Schriftarten.",
        ),
        Block::new(
            "block_4",
            BlockType::Caption,
            BoundingBox::new(120.0, 450.0, 400.0, 40.0),
            40,
            "Abbildung 1: Beispiel einer Gutenberg-Bible",
        ),
        Block::new(
            "block_5",
            BlockType::Footnote,
            BoundingBox::new(120.0, 620.0, 800.0, 40.0),
            50,
            "Gutenberg, Johannes: \"42-zeilige Bibel\", Mainz 1454.",
        ),
    ];

    Page { id: "page_1".into(), width: 1240, height: 1754, dpi: 150, blocks }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let page = sample_page();
    let glossary = Glossary::new(vec![GlossaryTerm::new("Gutenberg", "古腾堡", true)]);

    let backend = MockBackend::new();
    let translator = ParagraphTranslator::new(backend, "de", "zh-CN");
    let oracle = ReferenceMeasurementOracle::new();
    let driver = PageLayoutDriver::new(FitLoopConfig::default(), &oracle);

    let typeset_page = driver
        .layout_page(&page, Some(&translator), Some(&translator), "de", "zh-CN", &glossary)
        .await;

    println!("{}", serde_json::to_string_pretty(&typeset_page)?);

    log::info!(
        "typeset {} frame(s) for page {}",
        typeset_page.frames.len(),
        typeset_page.page_id
    );

    Ok(())
}
