use playreviews_core::dom::parse_html;
use playreviews_core::scrape::extract::{
    extract_all, extract_from_page, extract_review, ExtractError, RATING_ATTR, RATING_SELECTOR,
};
use playreviews_core::scrape::REVIEW_SELECTOR;
use pretty_assertions::assert_eq;

const FULL_PAGE: &str = r#"
<html><body>
  <h1>Some App</h1>
  <div class="d15Mdf">
    <span class="X43Kjb">Carla</span>
    <span class="p2TkOb">03 de outubro de 2020</span>
    <div class="pf5lIe"><div aria-label="Avaliado com 3 de 5 estrelas"></div></div>
    <span jsname="fbQN7e">Razoável.</span>
    <span jsname="bN97Pc">Razoável.</span>
  </div>
  <div class="unrelated">not a review</div>
  <div class="d15Mdf">
    <span class="X43Kjb">Diego</span>
    <span class="p2TkOb">21 de abril de 2019</span>
    <div class="pf5lIe"><div aria-label="Avaliado com 1 de 5 estrelas"></div></div>
    <span jsname="bN97Pc">Não abre.</span>
  </div>
</body></html>
"#;

#[test]
fn extract_from_page_skips_non_review_elements() {
    let page = parse_html(FULL_PAGE);
    let raws = extract_from_page(&page, REVIEW_SELECTOR).unwrap();
    assert_eq!(raws.len(), 2);
    assert_eq!(raws[0].name, "Carla");
    assert_eq!(raws[1].name, "Diego");
}

#[test]
fn absent_long_form_span_falls_back_to_the_preview() {
    let page = parse_html(FULL_PAGE);
    let raws = extract_from_page(&page, REVIEW_SELECTOR).unwrap();
    // The second element has no fbQN7e span at all.
    assert_eq!(raws[1].review, "Não abre.");
}

#[test]
fn extract_all_parses_fragments_independently() {
    let fragments = vec![
        r#"<div class="d15Mdf">
            <span class="X43Kjb">Eva</span>
            <span class="p2TkOb">30 de agosto de 2021</span>
            <div class="pf5lIe"><div aria-label="Avaliado com 5 de 5 estrelas"></div></div>
            <span jsname="fbQN7e">Perfeito!</span>
        </div>"#
            .to_string(),
    ];
    let raws = extract_all(&fragments).unwrap();
    assert_eq!(raws.len(), 1);
    assert_eq!(raws[0].raw_rating, "Avaliado com 5 de 5 estrelas");
    assert_eq!(raws[0].review, "Perfeito!");
}

#[test]
fn missing_rating_attribute_is_reported_with_selector_and_attribute() {
    let html = r#"<div class="d15Mdf">
        <span class="X43Kjb">Eva</span>
        <span class="p2TkOb">30 de agosto de 2021</span>
        <div class="pf5lIe"><div></div></div>
        <span jsname="fbQN7e">texto</span>
    </div>"#;
    let err = extract_review(&parse_html(html)).unwrap_err();
    assert_eq!(
        err,
        ExtractError::MissingAttribute {
            selector: RATING_SELECTOR,
            attribute: RATING_ATTR,
        }
    );
}

#[test]
fn missing_name_element_names_the_selector() {
    let html = r#"<div class="d15Mdf"><span class="p2TkOb">01 de maio de 2021</span></div>"#;
    let err = extract_review(&parse_html(html)).unwrap_err();
    assert_eq!(err, ExtractError::MissingElement("span.X43Kjb"));
}
