//! The canonical product-update template used as initial editor state and
//! as the serialization regression fixture.

use crate::nodes::{
    Button, ButtonAttrs, Column, ColumnAttrs, Container, ContainerAttrs, ContainerStyle, Element,
    Heading, HeadingAttrs, Image, ImageAttrs, Row, RowAttrs, Text, TextAttrs,
};
use crate::style::{Align, BorderStyle, HeadingLevel, ImageShape, TextAlign};
use crate::template::{Font, Template};

const FONT_FAMILY: &str = "Inter, Helvetica, sans-serif";

pub fn default_template() -> Template {
    Template {
        title: "Resend Product Updates".to_string(),
        preview: "Latest features and improvements from Resend".to_string(),
        font: Font {
            family: "Inter".to_string(),
            fallback: vec!["Helvetica".to_string(), "sans-serif".to_string()],
            weight: vec![400, 500, 600, 700],
        },
        container: Container {
            id: "container-1".into(),
            attrs: ContainerAttrs {
                style: ContainerStyle {
                    background_color: "#ffffff".to_string(),
                    max_width: "600px".to_string(),
                    padding_top: "32px".to_string(),
                    padding_right: "32px".to_string(),
                    padding_bottom: "32px".to_string(),
                    padding_left: "32px".to_string(),
                    border_radius: "0px".to_string(),
                    border_color: "#e5e7eb".to_string(),
                    border_width: "1px".to_string(),
                    border_style: BorderStyle::Solid,
                },
            },
            children: vec![
                section(
                    "row-logo",
                    "Logo",
                    ("transparent", 0.0, 0.0),
                    "col-logo",
                    "Logo Column",
                    vec![image(
                        "logo",
                        "https://resend.com/static/logo-dark.svg",
                        "Resend Logo",
                        "120px",
                        ImageShape::Square,
                        0.0,
                    )],
                ),
                section(
                    "row-intro",
                    "Intro Section",
                    ("transparent", 0.0, 48.0),
                    "col-intro",
                    "Intro Column",
                    vec![heading(
                        "intro-heading",
                        HeadingLevel::H1,
                        "Latest from Resend",
                        1.2,
                    )],
                ),
                update(
                    1,
                    "https://resend.com/static/posts/react-email-v2.png",
                    "React Email 2.0",
                    "React Email 2.0",
                    "We're excited to announce React Email 2.0. Build and send emails using React components with improved performance, better developer experience, and new features.",
                ),
                update(
                    2,
                    "https://resend.com/static/posts/email-analytics.png",
                    "Email Analytics",
                    "Introducing Email Analytics",
                    "Track email performance with comprehensive analytics. Monitor opens, clicks, and deliverability in real-time with our new analytics dashboard.",
                ),
                update(
                    3,
                    "https://resend.com/static/posts/api-reference.png",
                    "API Improvements",
                    "New API Reference",
                    "We've revamped our API documentation with improved navigation, better examples, and comprehensive guides to help you integrate Resend faster.",
                ),
                section(
                    "row-cta",
                    "CTA Section",
                    ("#f9fafb", 24.0, 24.0),
                    "col-cta",
                    "CTA Column",
                    vec![
                        text("cta-text", "Try Resend today", 1.5, "500", "16px", "#000000"),
                        Element::Button(Button {
                            id: "cta-button".into(),
                            attrs: ButtonAttrs {
                                text: "Get started".to_string(),
                                font_family: FONT_FAMILY.to_string(),
                                href: "https://resend.com".to_string(),
                                align: Align::Left,
                                width: "120px".to_string(),
                                height: 10.0,
                                horizontal_margin: 16.0,
                                vertical_margin: 16.0,
                                background_color: "#000000".to_string(),
                                color: "#ffffff".to_string(),
                                font_size: "14px".to_string(),
                                border_radius: 6.0,
                            },
                        }),
                    ],
                ),
                section(
                    "row-footer",
                    "Footer",
                    ("transparent", 0.0, 32.0),
                    "col-footer",
                    "Footer Column",
                    vec![text(
                        "footer-text",
                        "© 2024 Resend. All rights reserved.<br><a href='#' style='color: #6b7280; text-decoration: underline;'>Unsubscribe</a>",
                        1.6,
                        "400",
                        "14px",
                        "#6b7280",
                    )],
                ),
            ],
        },
    }
}

/// Full-width row holding a single transparent column
fn section(
    row_id: &str,
    title: &str,
    (background, horizontal, vertical): (&str, f64, f64),
    column_id: &str,
    column_title: &str,
    children: Vec<Element>,
) -> Row {
    Row {
        id: row_id.into(),
        attrs: RowAttrs {
            title: title.to_string(),
            columns: "100".to_string(),
            gap: 0.0,
            background_color: background.to_string(),
            horizontal_padding: horizontal,
            vertical_padding: vertical,
        },
        children: vec![Column {
            id: column_id.into(),
            attrs: ColumnAttrs {
                title: column_title.to_string(),
                width: "100%".to_string(),
                background_color: "transparent".to_string(),
                horizontal_padding: 0.0,
                vertical_padding: 0.0,
                border_radius: "0px".to_string(),
            },
            children,
        }],
    }
}

/// Image, heading and body copy for one product update
fn update(n: usize, src: &str, alt: &str, title: &str, body: &str) -> Row {
    section(
        &format!("row-update-{}", n),
        &format!("Update {}", n),
        ("transparent", 0.0, 24.0),
        &format!("col-update-{}", n),
        &format!("Update {} Column", n),
        vec![
            image(
                &format!("update-{}-image", n),
                src,
                alt,
                "100%",
                ImageShape::Rounded,
                24.0,
            ),
            heading(&format!("update-{}-heading", n), HeadingLevel::H2, title, 1.4),
            text(&format!("update-{}-text", n), body, 1.6, "400", "15px", "#4b5563"),
        ],
    )
}

fn image(id: &str, src: &str, title: &str, width: &str, shape: ImageShape, spacing: f64) -> Element {
    Element::Image(Image {
        id: id.into(),
        attrs: ImageAttrs {
            src: src.to_string(),
            title: title.to_string(),
            width: width.to_string(),
            height: "auto".to_string(),
            align: Align::Left,
            shape,
            spacing,
        },
    })
}

fn heading(id: &str, level: HeadingLevel, text: &str, line_height: f64) -> Element {
    Element::Heading(Heading {
        id: id.into(),
        attrs: HeadingAttrs {
            level,
            text: text.to_string(),
            color: "#000000".to_string(),
            horizontal_padding: 0.0,
            vertical_padding: 0.0,
            horizontal_margin: 0.0,
            vertical_margin: 16.0,
            line_height,
            font_weight: "600".to_string(),
            font_family: FONT_FAMILY.to_string(),
            text_align: TextAlign::Left,
        },
    })
}

fn text(
    id: &str,
    html: &str,
    line_height: f64,
    font_weight: &str,
    font_size: &str,
    color: &str,
) -> Element {
    Element::Text(Text {
        id: id.into(),
        attrs: TextAttrs {
            html: html.to_string(),
            horizontal_padding: 0.0,
            vertical_padding: 0.0,
            line_height,
            font_weight: font_weight.to_string(),
            font_family: FONT_FAMILY.to_string(),
            text_align: TextAlign::Left,
            font_size: font_size.to_string(),
            color: color.to_string(),
        },
    })
}
