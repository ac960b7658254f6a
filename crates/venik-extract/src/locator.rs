//! Semantic field lookup over a parsed product page.
//!
//! All CSS selectors and tree walking live here, behind [`FieldLocator`], so
//! the orchestrator in [`crate::extract`] never touches the document model.
//! Every lookup is independent: a missing container for one field has no
//! effect on any other, and a nested lookup stops at the first missing
//! ancestor and reports absence.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

/// The fixed set of fields a product page can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Product display title.
    Title,
    /// Screen-reader text of the price container, e.g. `"Prijs: €2,19"`.
    PriceContainer,
    /// Package quantity subtitle, e.g. `"190 g"`.
    UnitSubtitle,
    /// Reference unit of the price-per-unit block, e.g. `"kilo"`.
    PricePerUnit,
    /// Description paragraphs and list items, newline separated. Empty when the
    /// body holds no text.
    DescriptionBody,
    /// First paragraph of the origin panel.
    OriginBlock,
    /// `href` of `<link rel="canonical">`.
    CanonicalLink,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Title,
        Field::PriceContainer,
        Field::UnitSubtitle,
        Field::PricePerUnit,
        Field::DescriptionBody,
        Field::OriginBlock,
        Field::CanonicalLink,
    ];

    /// Stable name used in diagnostics and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::PriceContainer => "price-container",
            Field::UnitSubtitle => "unit-subtitle",
            Field::PricePerUnit => "price-per-unit",
            Field::DescriptionBody => "description-body",
            Field::OriginBlock => "origin-block",
            Field::CanonicalLink => "canonical-link",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Yields the content of a named field, or `None` when the document does not
/// carry it. Absence is never an error.
pub trait FieldLocator {
    fn lookup(&self, field: Field) -> Option<String>;
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector(r#"h1[data-testid="product-title"]"#));
static PRICE_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[data-testid="product-price"]"#));
static SCREENREADER_TEXT: LazyLock<Selector> = LazyLock::new(|| selector("div.screenreader-only"));
static SUBTITLE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"span[data-testid="product-subtitle"]"#));
static PRICE_PER_UNIT: LazyLock<Selector> = LazyLock::new(|| selector("div.price-per-unit"));
static HIDDEN_SPAN: LazyLock<Selector> = LazyLock::new(|| selector(r#"span[aria-hidden="true"]"#));
static DESCRIPTION_BODY: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[data-testid="product-description-text-body"]"#));
static DESCRIPTION_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("p, li"));
static ORIGIN_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[data-testid="origin-collapsible"]"#));
static DIV: LazyLock<Selector> = LazyLock::new(|| selector("div"));
static CONTENT_DIV: LazyLock<Selector> = LazyLock::new(|| selector("div.content"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static CANONICAL_LINK: LazyLock<Selector> = LazyLock::new(|| selector(r#"link[rel="canonical"]"#));

/// The price-per-unit block reads `[amount, "/", unit]`; fewer spans means the
/// layout is not the one we know how to read.
const PRICE_PER_UNIT_MIN_SPANS: usize = 3;

/// A product page parsed with the HTML5 tree builder.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses `text` as an HTML document. The tree builder recovers from
    /// malformed markup, so this never fails.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    fn first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    fn title(&self) -> Option<String> {
        self.first(&TITLE).map(element_text)
    }

    fn price_text(&self) -> Option<String> {
        let container = self.first(&PRICE_CONTAINER)?;
        let screenreader = container.select(&SCREENREADER_TEXT).next()?;
        Some(element_text(screenreader))
    }

    fn subtitle(&self) -> Option<String> {
        self.first(&SUBTITLE).map(element_text)
    }

    fn price_per_unit(&self) -> Option<String> {
        let block = self.first(&PRICE_PER_UNIT)?;
        let spans: Vec<ElementRef<'_>> = block.select(&HIDDEN_SPAN).collect();
        if spans.len() < PRICE_PER_UNIT_MIN_SPANS {
            return None;
        }
        spans.last().copied().map(element_text)
    }

    fn description(&self) -> Option<String> {
        let body = self.first(&DESCRIPTION_BODY)?;
        let parts: Vec<String> = body
            .select(&DESCRIPTION_ITEM)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();
        Some(parts.join("\n"))
    }

    fn origin(&self) -> Option<String> {
        let block = self.first(&ORIGIN_BLOCK)?;
        let inner = block.select(&DIV).next()?;
        let content = inner.select(&CONTENT_DIV).next()?;
        let paragraph = content.select(&PARAGRAPH).next()?;
        Some(element_text(paragraph))
    }

    fn canonical_link(&self) -> Option<String> {
        self.html
            .select(&CANONICAL_LINK)
            .find_map(|link| link.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_owned)
    }
}

impl FieldLocator for HtmlDocument {
    fn lookup(&self, field: Field) -> Option<String> {
        match field {
            Field::Title => self.title(),
            Field::PriceContainer => self.price_text(),
            Field::UnitSubtitle => self.subtitle(),
            Field::PricePerUnit => self.price_per_unit(),
            Field::DescriptionBody => self.description(),
            Field::OriginBlock => self.origin(),
            Field::CanonicalLink => self.canonical_link(),
        }
    }
}

/// All text beneath `element` with runs of whitespace collapsed to one space.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
