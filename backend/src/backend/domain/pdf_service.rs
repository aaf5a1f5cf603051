//! Consent document rendering.
//!
//! Turns one submission into a single-page PDF with a fixed layout: colored
//! banner, labeled sections, checkbox glyphs for the three permissions, the
//! embedded signature image, and a footer with the generation timestamp.
//!
//! A signature that cannot be decoded never fails the export; the renderer
//! substitutes a textual placeholder and completes. Long free text is clamped
//! to the space remaining above the signature section so the document stays a
//! single page by construction.

use std::io::BufWriter;

use ::image::DynamicImage;
use chrono::{DateTime, Utc};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::backend::domain::commands::export::PdfExportResult;
use crate::backend::domain::models::submission::Submission;
use crate::backend::domain::signature::decode_signature;

// ============================================================================
// Constants
// ============================================================================

/// US Letter dimensions in mm
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;

const MARGIN_MM: f32 = 15.0;

/// Banner across the top of the page
const BANNER_HEIGHT_MM: f32 = 35.0;

/// Signature box dimensions
const SIGNATURE_BOX_WIDTH_MM: f32 = 90.0;
const SIGNATURE_BOX_HEIGHT_MM: f32 = 35.0;

/// Vertical space that must stay free below the medical section for the
/// permissions, signature, and footer blocks
const RESERVED_BELOW_MEDICAL_MM: f32 = 129.0;

/// Font sizes in points
const TITLE_FONT_SIZE: f32 = 24.0;
const SUBTITLE_FONT_SIZE: f32 = 11.0;
const SECTION_FONT_SIZE: f32 = 13.0;
const FIELD_FONT_SIZE: f32 = 10.0;
const SMALL_FONT_SIZE: f32 = 9.0;
const FOOTER_FONT_SIZE: f32 = 8.0;

/// Line advance for wrapped field values
const FIELD_LINE_HEIGHT_MM: f32 = 6.0;

/// Point-to-mm conversion for the rough text measuring below
const PT_TO_MM: f32 = 0.352778;

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create PDF: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Service
// ============================================================================

/// Renders one submission into a downloadable consent document
#[derive(Clone, Default)]
pub struct DocumentRenderService {}

impl DocumentRenderService {
    pub fn new() -> Self {
        Self {}
    }

    /// Render the consent PDF for a single submission.
    pub fn render_consent_pdf(
        &self,
        submission: &Submission,
    ) -> Result<PdfExportResult, RenderError> {
        let (doc, page1, layer1) = PdfDocument::new(
            "Consent Form",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let layer = doc.get_page(page1).get_layer(layer1);

        let font_regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let font_italic = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        let fonts = Fonts {
            regular: font_regular,
            bold: font_bold,
            italic: font_italic,
        };

        let mut y_pos = draw_banner(&layer, &fonts);

        // Child Information
        y_pos = draw_section_header(&layer, &fonts, "CHILD INFORMATION", y_pos);
        y_pos = draw_inline_field(
            &layer,
            &fonts,
            "Child's Full Name:",
            &submission.child_full_name,
            y_pos,
        );
        y_pos = draw_inline_field(
            &layer,
            &fonts,
            "Date of Birth:",
            &format_date_of_birth(&submission.child_date_of_birth),
            y_pos,
        );
        y_pos -= 4.0;

        // Parent/Guardian Information
        y_pos = draw_section_header(&layer, &fonts, "PARENT/GUARDIAN INFORMATION", y_pos);
        y_pos = draw_inline_field(
            &layer,
            &fonts,
            "Full Name:",
            &submission.parent_full_name,
            y_pos,
        );
        y_pos = draw_inline_field(
            &layer,
            &fonts,
            "Phone Number:",
            &submission.parent_phone_number,
            y_pos,
        );
        y_pos = draw_inline_field(
            &layer,
            &fonts,
            "Emergency Contact:",
            &submission.emergency_contact_info,
            y_pos,
        );
        y_pos -= 4.0;

        // Medical Information
        y_pos = draw_section_header(&layer, &fonts, "MEDICAL INFORMATION", y_pos);
        let allergies = if submission.allergies_medical_conditions.trim().is_empty() {
            "None reported"
        } else {
            submission.allergies_medical_conditions.as_str()
        };
        y_pos = draw_wrapped_field(
            &layer,
            &fonts,
            "Allergies & Medical Conditions:",
            allergies,
            y_pos,
        );
        y_pos -= 4.0;

        // Permissions & Authorizations
        y_pos = draw_section_header(&layer, &fonts, "PERMISSIONS & AUTHORIZATIONS", y_pos);
        y_pos = draw_permission_checkbox(
            &layer,
            &fonts,
            "Permission to Participate in Activities",
            submission.permission_to_participate,
            y_pos,
        );
        y_pos = draw_permission_checkbox(
            &layer,
            &fonts,
            "Emergency Medical Treatment Authorization",
            submission.emergency_medical_auth,
            y_pos,
        );
        y_pos = draw_permission_checkbox(
            &layer,
            &fonts,
            "Photo/Video Release Consent",
            submission.photo_video_release,
            y_pos,
        );
        y_pos -= 4.0;

        // Signature
        y_pos = draw_section_header(&layer, &fonts, "PARENT/GUARDIAN SIGNATURE", y_pos);
        y_pos = draw_signature_box(&layer, &fonts, submission, y_pos);

        // Signing metadata
        set_fill(&layer, GRAY_TEXT);
        layer.use_text(
            format!(
                "Electronically signed on: {}",
                format_signed_timestamp(&submission.created_at)
            ),
            SMALL_FONT_SIZE,
            Mm(MARGIN_MM + 5.0),
            Mm(y_pos),
            &fonts.regular,
        );
        y_pos -= 5.0;
        layer.use_text(
            format!("Document ID: {}", submission.id),
            SMALL_FONT_SIZE,
            Mm(MARGIN_MM + 5.0),
            Mm(y_pos),
            &fonts.regular,
        );

        draw_footer(&layer, &fonts);

        let mut writer = BufWriter::new(Vec::new());
        doc.save(&mut writer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let bytes = writer
            .into_inner()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        let filename = consent_filename(&submission.child_full_name);
        info!(
            "Rendered consent PDF ({} bytes) with filename: {}",
            bytes.len(),
            filename
        );

        Ok(PdfExportResult { bytes, filename })
    }
}

/// Output filename: child name with whitespace collapsed to underscores,
/// plus the current date.
fn consent_filename(child_full_name: &str) -> String {
    let name = child_full_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Consent_{}_{}.pdf", name, Utc::now().format("%Y-%m-%d"))
}

// ============================================================================
// Colors
// ============================================================================

const INDIGO: (f32, f32, f32) = (0.310, 0.275, 0.898);
const SECTION_BG: (f32, f32, f32) = (0.898, 0.906, 0.922);
const GRAY_TEXT: (f32, f32, f32) = (0.420, 0.447, 0.502);
const GREEN: (f32, f32, f32) = (0.133, 0.773, 0.369);
const RED: (f32, f32, f32) = (0.863, 0.149, 0.149);
const BORDER_GRAY: (f32, f32, f32) = (0.784, 0.784, 0.784);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const WHITE: (f32, f32, f32) = (1.0, 1.0, 1.0);

fn set_fill(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}

fn set_outline(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32), thickness: f32) {
    layer.set_outline_color(Color::Rgb(Rgb::new(r, g, b, None)));
    layer.set_outline_thickness(thickness);
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

// ============================================================================
// Layout Sections
// ============================================================================

/// Fixed-height colored banner across the top. Returns the cursor position
/// below it.
fn draw_banner(layer: &PdfLayerReference, fonts: &Fonts) -> f32 {
    set_fill(layer, INDIGO);
    fill_rect(
        layer,
        0.0,
        PAGE_HEIGHT_MM - BANNER_HEIGHT_MM,
        PAGE_WIDTH_MM,
        BANNER_HEIGHT_MM,
    );

    set_fill(layer, WHITE);
    draw_centered_text(
        layer,
        "DAYCARE CONSENT FORM",
        TITLE_FONT_SIZE,
        PAGE_HEIGHT_MM - 15.0,
        &fonts.bold,
    );
    draw_centered_text(
        layer,
        "Official Parent/Guardian Authorization Document",
        SUBTITLE_FONT_SIZE,
        PAGE_HEIGHT_MM - 25.0,
        &fonts.regular,
    );

    PAGE_HEIGHT_MM - BANNER_HEIGHT_MM - 10.0
}

/// Shaded section header bar with indigo title text.
fn draw_section_header(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    title: &str,
    y_pos: f32,
) -> f32 {
    set_fill(layer, SECTION_BG);
    fill_rect(
        layer,
        MARGIN_MM,
        y_pos - 4.0,
        PAGE_WIDTH_MM - 2.0 * MARGIN_MM,
        10.0,
    );

    set_fill(layer, INDIGO);
    layer.use_text(
        title,
        SECTION_FONT_SIZE,
        Mm(MARGIN_MM + 5.0),
        Mm(y_pos - 1.0),
        &fonts.bold,
    );

    y_pos - 10.0
}

/// Bold gray label followed by its value on the same line.
fn draw_inline_field(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    label: &str,
    value: &str,
    y_pos: f32,
) -> f32 {
    set_fill(layer, GRAY_TEXT);
    layer.use_text(
        label,
        FIELD_FONT_SIZE,
        Mm(MARGIN_MM + 5.0),
        Mm(y_pos),
        &fonts.bold,
    );

    set_fill(layer, BLACK);
    layer.use_text(
        value,
        FIELD_FONT_SIZE,
        Mm(75.0),
        Mm(y_pos),
        &fonts.regular,
    );

    y_pos - 7.0
}

/// Label on its own line, then the value wrapped to the content width. The
/// cursor advances by the wrapped line count; lines that would collide with
/// the sections below are dropped and the last kept line gains an ellipsis.
fn draw_wrapped_field(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    label: &str,
    value: &str,
    y_pos: f32,
) -> f32 {
    set_fill(layer, GRAY_TEXT);
    layer.use_text(
        label,
        FIELD_FONT_SIZE,
        Mm(MARGIN_MM + 5.0),
        Mm(y_pos),
        &fonts.bold,
    );
    let mut y_pos = y_pos - FIELD_LINE_HEIGHT_MM;

    let wrap_width = PAGE_WIDTH_MM - 45.0;
    let max_chars = max_chars_for_width(wrap_width, FIELD_FONT_SIZE);
    let lines = wrap_text(value, max_chars);

    // Single page by construction: clamp to the space this field may use
    let available = ((y_pos - RESERVED_BELOW_MEDICAL_MM) / FIELD_LINE_HEIGHT_MM).max(1.0) as usize;
    let lines = clamp_lines(lines, available);

    set_fill(layer, BLACK);
    for line in &lines {
        layer.use_text(
            line.as_str(),
            FIELD_FONT_SIZE,
            Mm(MARGIN_MM + 10.0),
            Mm(y_pos),
            &fonts.regular,
        );
        y_pos -= FIELD_LINE_HEIGHT_MM;
    }

    y_pos - 3.0
}

/// A checkbox glyph (filled with a check when granted, outlined when not)
/// followed by its label.
fn draw_permission_checkbox(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    label: &str,
    checked: bool,
    y_pos: f32,
) -> f32 {
    let box_size = 5.0;
    let box_x = MARGIN_MM + 5.0;
    let box_y = y_pos - 1.0;

    if checked {
        set_fill(layer, GREEN);
        fill_rect(layer, box_x, box_y, box_size, box_size);

        // Check mark drawn as two strokes over the filled box
        set_outline(layer, WHITE, 0.6);
        draw_line(layer, box_x + 1.0, box_y + 2.5, box_x + 2.0, box_y + 1.2);
        draw_line(layer, box_x + 2.0, box_y + 1.2, box_x + 4.0, box_y + 3.8);
    } else {
        set_outline(layer, RED, 0.5);
        stroke_rect(layer, box_x, box_y, box_size, box_size);
    }

    set_fill(layer, BLACK);
    layer.use_text(
        label,
        FIELD_FONT_SIZE,
        Mm(box_x + box_size + 5.0),
        Mm(y_pos),
        &fonts.regular,
    );

    y_pos - 8.0
}

/// Bordered signature box with the embedded drawing, or the textual
/// placeholder when the data URI cannot be decoded.
fn draw_signature_box(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    submission: &Submission,
    y_pos: f32,
) -> f32 {
    let box_x = MARGIN_MM + 5.0;
    let box_y = y_pos - SIGNATURE_BOX_HEIGHT_MM;

    set_outline(layer, BORDER_GRAY, 0.5);
    stroke_rect(
        layer,
        box_x,
        box_y,
        SIGNATURE_BOX_WIDTH_MM,
        SIGNATURE_BOX_HEIGHT_MM,
    );

    match decode_signature(&submission.signature) {
        Some(image) => {
            embed_signature_image(
                layer,
                &image,
                box_x + 2.0,
                box_y + 2.0,
                SIGNATURE_BOX_WIDTH_MM - 4.0,
                SIGNATURE_BOX_HEIGHT_MM - 4.0,
            );
        }
        None => {
            warn!("Signature image could not be decoded, using placeholder");
            set_fill(layer, GRAY_TEXT);
            layer.use_text(
                "(Signature captured)",
                FIELD_FONT_SIZE,
                Mm(box_x + 5.0),
                Mm(box_y + SIGNATURE_BOX_HEIGHT_MM / 2.0),
                &fonts.italic,
            );
        }
    }

    y_pos - SIGNATURE_BOX_HEIGHT_MM - 8.0
}

/// Fit the signature drawing inside the box, preserving aspect ratio.
fn embed_signature_image(
    layer: &PdfLayerReference,
    signature_image: &DynamicImage,
    x: f32,
    y: f32,
    max_width_mm: f32,
    max_height_mm: f32,
) {
    let rgb_image = signature_image.to_rgb8();
    let (width_px, height_px) = rgb_image.dimensions();

    // Aspect ratio is preserved, so fixing the width also fixes the height
    let aspect_ratio = width_px as f32 / height_px as f32;
    let final_width_mm = if max_width_mm / max_height_mm > aspect_ratio {
        max_height_mm * aspect_ratio
    } else {
        max_width_mm
    };

    let image = Image::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb_image.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI chosen so the pixel dimensions land on the desired physical size
    let dpi = (width_px as f32) / (final_width_mm / 25.4);

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}

/// Footer rule, closing statement, and generation timestamp.
fn draw_footer(layer: &PdfLayerReference, fonts: &Fonts) {
    set_outline(layer, INDIGO, 0.8);
    draw_line(
        layer,
        MARGIN_MM,
        25.0,
        PAGE_WIDTH_MM - MARGIN_MM,
        25.0,
    );

    set_fill(layer, GRAY_TEXT);
    draw_centered_text(
        layer,
        "This is an official daycare consent document.",
        FOOTER_FONT_SIZE,
        18.0,
        &fonts.italic,
    );
    draw_centered_text(
        layer,
        &format!("Generated on {}", Utc::now().format("%B %-d, %Y")),
        FOOTER_FONT_SIZE,
        12.0,
        &fonts.italic,
    );
}

// ============================================================================
// Text Helpers
// ============================================================================

/// Display form of the stored YYYY-MM-DD date of birth.
fn format_date_of_birth(date_of_birth: &str) -> String {
    match chrono::NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => date_of_birth.to_string(),
    }
}

/// Display form of the RFC 3339 creation timestamp.
fn format_signed_timestamp(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(timestamp) => timestamp.format("%B %-d, %Y at %H:%M").to_string(),
        Err(_) => created_at.to_string(),
    }
}

/// Rough character budget for a given width. Helvetica averages about half
/// the font size per glyph, which is close enough for wrapping labels.
fn max_chars_for_width(width_mm: f32, font_size: f32) -> usize {
    let char_width_mm = font_size * PT_TO_MM * 0.5;
    (width_mm / char_width_mm).max(1.0) as usize
}

/// Greedy word wrap. Words longer than the budget are hard-broken.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }

        while current.len() > max_chars {
            let head: String = current.chars().take(max_chars).collect();
            let tail: String = current.chars().skip(max_chars).collect();
            lines.push(head);
            current = tail;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Keep at most `max_lines` lines, marking truncation with an ellipsis.
fn clamp_lines(mut lines: Vec<String>, max_lines: usize) -> Vec<String> {
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push_str("...");
        }
    }
    lines
}

fn draw_centered_text(
    layer: &PdfLayerReference,
    text: &str,
    font_size: f32,
    y: f32,
    font: &IndirectFontRef,
) {
    let text_width_mm = text.chars().count() as f32 * font_size * PT_TO_MM * 0.5;
    let x = (PAGE_WIDTH_MM - text_width_mm) / 2.0;
    layer.use_text(text, font_size, Mm(x.max(MARGIN_MM)), Mm(y), font);
}

// ============================================================================
// Drawing Utilities
// ============================================================================

fn draw_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let points = vec![
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x2), Mm(y2)), false),
    ];
    let line = Line {
        points,
        is_closed: false,
    };
    layer.add_line(line);
}

fn rect_points(x: f32, y: f32, width: f32, height: f32) -> Vec<(Point, bool)> {
    vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y + height)), false),
        (Point::new(Mm(x), Mm(y + height)), false),
    ]
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32) {
    let polygon = Polygon {
        rings: vec![rect_points(x, y, width, height)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    };
    layer.add_polygon(polygon);
}

fn stroke_rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32) {
    let line = Line {
        points: rect_points(x, y, width, height),
        is_closed: true,
    };
    layer.add_line(line);
}
