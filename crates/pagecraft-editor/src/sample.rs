#![forbid(unsafe_code)]

//! A ready-made demo layout: a small agency landing page with a hero
//! section, a three-column services grid, and a testimonial row. Useful
//! as a seed document and as a realistic fixture in tests.

use pagecraft_core::{Element, ElementId, ElementKind};

use crate::render::ParamBag;

/// Parameter bag matching the tokens used in [`sample_layout`].
#[must_use]
pub fn sample_params() -> ParamBag {
    ParamBag::from([("name".to_string(), "Stefan Simic".to_string())])
}

/// Build the demo landing page.
#[must_use]
pub fn sample_layout() -> Vec<Element> {
    vec![
        Element::new(ElementId(1), ElementKind::Heading)
            .with_content("CodeCraft Solutions")
            .with_style("fontSize", "3rem")
            .with_style("fontWeight", "700")
            .with_style("color", "#1a202c")
            .with_style("textAlign", "center")
            .with_style("marginTop", "2rem")
            .with_style("textTransform", "uppercase"),
        Element::new(ElementId(2), ElementKind::Text)
            .with_content(
                "Building cutting-edge software solutions with passion and precision. \
                 From web apps to enterprise systems, we craft code that powers your success.",
            )
            .with_style("fontSize", "1.25rem")
            .with_style("color", "#4a5568")
            .with_style("textAlign", "center")
            .with_style("maxWidth", "700px")
            .with_style("lineHeight", "1.8"),
        Element::new(ElementId(3), ElementKind::Button)
            .with_content("Get a Free Quote")
            .with_style("backgroundColor", "#2b6cb0")
            .with_style("color", "#ffffff")
            .with_style("borderRadius", "8px")
            .with_style("fontSize", "1.2rem"),
        Element::new(ElementId(4), ElementKind::Grid)
            .with_style("gridTemplateColumns", "repeat(3, 1fr)")
            .with_style("gap", "2rem")
            .with_style("backgroundColor", "#f7fafc")
            .child(service_card(
                ElementId(5),
                "Web Development\nCustom websites built with modern tech stacks.",
            ))
            .child(service_card(
                ElementId(6),
                "Mobile Apps\nNative and cross-platform app solutions.",
            ))
            .child(service_card(
                ElementId(7),
                "Cloud Solutions\nScalable infrastructure for your business.",
            )),
        Element::new(ElementId(8), ElementKind::Row)
            .with_style("gap", "2rem")
            .with_style("backgroundColor", "#edf2f7")
            .child(testimonial(
                ElementId(9),
                "\"CodeCraft delivered an amazing app on time and exceeded our expectations!\" - TechCorp",
            ))
            .child(testimonial(
                ElementId(10),
                "\"Their team transformed our vision into a robust cloud platform.\" - InnovateLabs",
            )),
        Element::new(ElementId(11), ElementKind::Text)
            .with_content("Crafted by {{params.name}}")
            .with_style("fontSize", "0.9rem")
            .with_style("color", "#718096")
            .with_style("textAlign", "center"),
    ]
}

fn service_card(id: ElementId, content: &str) -> Element {
    Element::new(id, ElementKind::Text)
        .with_content(content)
        .with_style("backgroundColor", "#ffffff")
        .with_style("borderRadius", "12px")
        .with_style("textAlign", "center")
        .with_style("whiteSpace", "pre-line")
}

fn testimonial(id: ElementId, content: &str) -> Element {
    Element::new(id, ElementKind::Text)
        .with_content(content)
        .with_style("fontStyle", "italic")
        .with_style("backgroundColor", "#ffffff")
        .with_style("borderRadius", "10px")
        .with_style("flex", "1")
}
