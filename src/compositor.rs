//! Label content compositor: turns placed labels into draw commands.
//!
//! One layout path serves every backend. A packed page becomes a
//! [`PageRender`] whose transform is the sheet calibration and whose commands
//! are the labels' geometry; a single-label print uses the template's own
//! calibration instead. The two calibrations never stack: sheet rendering
//! zeroes the per-label correction.

use std::borrow::Cow;

use crate::barcode;
use crate::bottom_layout::{self, BottomLayout, META_FONT_PT, META_LINE_HEIGHT_MM};
use crate::calibration::Transform2d;
use crate::format;
use crate::ir::{BarcodeCommand, DrawCommand, LineCommand, RectCommand, TextCommand};
use crate::model::{
    LabelContent, LabelTemplate, PackedPage, SheetSettings, StyleSettings, TextAlign, TextStyle,
};
use crate::retail::{classify_width, WidthClass};
use crate::text_fit::{fit_title, truncate_line, FontSpec, TextMeasurer};
use crate::units::{clamp_f64, RectMm};

/// Gap (mm) between the title block and the variant line.
const TITLE_LINE_GAP_MM: f64 = 2.0;
/// Share of the main content height the title may occupy (two lines max).
const TITLE_HEIGHT_RATIO: f64 = 0.5;
/// Narrow labels give the title more height; everything else is smaller.
const NARROW_TITLE_HEIGHT_RATIO: f64 = 0.62;
/// Narrow labels refuse to shrink the title below this size.
const NARROW_TITLE_MIN_PT: f64 = 9.0;
/// Pack rows keep a small inset from their band's top edge.
const SECTION_TOP_INSET_MM: f64 = 0.3;
/// Columns never get thinner than this (mm), whatever the split says.
const MIN_COLUMN_MM: f64 = 10.0;
const CROP_MARK_LEN_MM: f64 = 3.0;
const CROP_MARK_STROKE_MM: f64 = 0.2;
const DEBUG_STROKE_MM: f64 = 0.2;
const DEBUG_ITEM_STROKE_MM: f64 = 0.15;
const DEBUG_FONT_PT: f64 = 7.0;

/// One page ready for a drawing backend: apply `transform`, then interpret
/// `commands` in millimeter coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PageRender {
    pub transform: Transform2d,
    pub commands: Vec<DrawCommand>,
}

/// Resolved geometry of one label: every region the compositor draws into.
/// Depends only on template, content flags, and style, never on text
/// measurement, so it is cheap to recompute and easy to assert on.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelRegions {
    /// Border outline, inset so the stroke stays inside the allocated rect.
    pub border: RectMm,
    /// Title and variant area, padded, above the bottom reserve.
    pub left_column: RectMm,
    /// Price column spanning all three bands.
    pub right_column: RectMm,
    pub right_top: RectMm,
    pub right_middle: RectMm,
    pub right_bottom: RectMm,
    /// Barcode image rect, centered inside its quiet zones. `None` when the
    /// bottom solver dropped the barcode.
    pub barcode: Option<RectMm>,
    /// Metadata row rect. `None` when the bottom solver dropped the row.
    pub meta: Option<RectMm>,
    /// The vertical split behind the regions above.
    pub bottom: BottomLayout,
}

/// Resolve the draw regions for one label at `(origin_x_mm, origin_y_mm)`.
pub fn label_regions(
    content: &LabelContent,
    template: &LabelTemplate,
    style: &StyleSettings,
    origin_x_mm: f64,
    origin_y_mm: f64,
) -> LabelRegions {
    let t = template.normalized();
    let (ox, oy) = (origin_x_mm, origin_y_mm);
    let w = t.width_mm;
    let h = t.height_mm;
    let pad = t.padding_mm;
    let class = classify_width(w);
    let props = class.proportions();

    // Column split: style override for standard/wide stock, retail table for
    // narrow stock (and as the fallback when no override is configured).
    let mut right_w = if class != WidthClass::Narrow && style.right_column_width_mm > 0.0 {
        style.right_column_width_mm
    } else {
        w - props.left_column_mm(w)
    };
    right_w = clamp_f64(right_w, MIN_COLUMN_MM, (w - MIN_COLUMN_MM).max(MIN_COLUMN_MM));
    let left_w = w - right_w;

    let stroke = style.border_thickness_mm.max(0.0);
    let half = stroke / 2.0;
    let border = RectMm::new(ox + half, oy + half, w - stroke, h - stroke);

    let bottom = bottom_layout::compute(w, h, pad, content.has_barcode(), content.has_meta());
    let bottom_reserve = bottom.barcode_area_mm + bottom.meta_area_mm;

    let left_column = RectMm::new(ox + pad, oy + pad, left_w - 2.0 * pad, bottom.main_content_mm);
    let right_column = RectMm::new(ox + left_w, oy, right_w - pad, h - bottom_reserve);

    let mut top = style.right_top_height_mm;
    let mut mid = style.right_middle_height_mm;
    let mut bot = style.right_bottom_height_mm;
    let total = top + mid + bot;
    if total <= 0.0 {
        top = right_column.height / 3.0;
        mid = top;
        bot = top;
    } else {
        let scale = right_column.height / total;
        top *= scale;
        mid *= scale;
        bot *= scale;
    }
    let right_top = RectMm::new(right_column.x, right_column.y, right_column.width, top);
    let right_middle = RectMm::new(right_column.x, right_column.y + top, right_column.width, mid);
    let right_bottom = RectMm::new(
        right_column.x,
        right_column.y + top + mid,
        right_column.width,
        bot,
    );

    let mut bottom_y = oy + h - pad - bottom_reserve;
    let barcode_rect = if bottom.show_barcode {
        let quiet_zone = bottom.quiet_zone_mm;
        let content_w = (w - 2.0 * pad - 2.0 * quiet_zone).max(0.0);
        let (table_w, _) = props.barcode_size_mm(w, h);
        let bc_w = content_w.min(table_w);
        let bc_x = ox + pad + quiet_zone + ((content_w - bc_w) / 2.0).max(0.0);
        let rect = RectMm::new(bc_x, bottom_y, bc_w, bottom.barcode_height_mm);
        bottom_y += bottom.barcode_area_mm;
        Some(rect)
    } else {
        None
    };
    let meta_rect = if bottom.show_meta {
        Some(RectMm::new(
            ox + pad,
            bottom_y,
            w - 2.0 * pad,
            bottom.meta_area_mm,
        ))
    } else {
        None
    };

    LabelRegions {
        border,
        left_column,
        right_column,
        right_top,
        right_middle,
        right_bottom,
        barcode: barcode_rect,
        meta: meta_rect,
        bottom,
    }
}

/// Compose a packed sheet. Per-label calibration is zeroed; only the sheet
/// transform corrects drift.
pub fn compose_page(
    page: &PackedPage,
    settings: &SheetSettings,
    style: &StyleSettings,
    measurer: &dyn TextMeasurer,
) -> PageRender {
    let s = settings.normalized();
    let mut commands = Vec::new();
    if s.debug_overlay {
        push_debug_overlay(&mut commands, page, &s);
    }
    for item in &page.items {
        let mut template = item.template.normalized();
        template.offset_x_mm = 0.0;
        template.offset_y_mm = 0.0;
        template.scale_x = 1.0;
        template.scale_y = 1.0;
        compose_label_into(
            &mut commands,
            &item.content,
            &template,
            style,
            measurer,
            item.x_mm,
            item.y_mm,
        );
    }
    PageRender {
        transform: Transform2d::sheet(&s),
        commands,
    }
}

/// Compose one label at the origin with its own calibration transform.
/// This is the direct label-stock print/preview path.
pub fn compose_single(
    content: &LabelContent,
    template: &LabelTemplate,
    style: &StyleSettings,
    measurer: &dyn TextMeasurer,
) -> PageRender {
    let t = template.normalized();
    let mut commands = Vec::new();
    compose_label_into(&mut commands, content, &t, style, measurer, 0.0, 0.0);
    PageRender {
        transform: Transform2d::label(&t, 0.0, 0.0),
        commands,
    }
}

/// Compose one label's draw commands at `(origin_x_mm, origin_y_mm)`,
/// without any calibration applied.
pub fn compose_label(
    content: &LabelContent,
    template: &LabelTemplate,
    style: &StyleSettings,
    measurer: &dyn TextMeasurer,
    origin_x_mm: f64,
    origin_y_mm: f64,
) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    compose_label_into(
        &mut commands,
        content,
        &template.normalized(),
        style,
        measurer,
        origin_x_mm,
        origin_y_mm,
    );
    commands
}

fn font_of(style: &TextStyle) -> FontSpec {
    FontSpec::new(&style.family, style.size_pt, style.bold)
}

fn compose_label_into(
    commands: &mut Vec<DrawCommand>,
    content: &LabelContent,
    template: &LabelTemplate,
    style: &StyleSettings,
    measurer: &dyn TextMeasurer,
    ox: f64,
    oy: f64,
) {
    let regions = label_regions(content, template, style, ox, oy);
    let narrow = classify_width(template.width_mm) == WidthClass::Narrow;
    let stroke = style.border_thickness_mm.max(0.0);
    let pad = template.padding_mm;

    commands.push(DrawCommand::Rect(RectCommand {
        rect: regions.border,
        stroke_mm: stroke,
    }));

    compose_left_column(commands, content, style, measurer, &regions.left_column, narrow);
    compose_right_column(commands, content, style, measurer, &regions, pad, stroke);

    if let Some(rect) = regions.barcode {
        if let Some(value) = content.barcode_value.as_deref() {
            commands.push(DrawCommand::Barcode(BarcodeCommand {
                value: barcode::normalize(value, content.barcode_format),
                format: content.barcode_format,
                rect,
                show_text: content.barcode_show_text,
            }));
        }
    }
    if let Some(meta) = regions.meta {
        compose_meta_row(commands, content, style, measurer, meta.x, meta.y, meta.width);
    }
    if style.crop_marks_enabled {
        push_crop_marks(commands, ox, oy, template.width_mm, template.height_mm);
    }
}

fn compose_left_column(
    commands: &mut Vec<DrawCommand>,
    content: &LabelContent,
    style: &StyleSettings,
    measurer: &dyn TextMeasurer,
    rect: &RectMm,
    narrow: bool,
) {
    let mut y = rect.y;

    if !content.name.trim().is_empty() {
        let ratio = if narrow {
            NARROW_TITLE_HEIGHT_RATIO
        } else {
            TITLE_HEIGHT_RATIO
        };
        let title_box_h = rect.height * ratio;
        let min_pt = if narrow {
            style.product_name_min_pt.max(NARROW_TITLE_MIN_PT)
        } else {
            style.product_name_min_pt
        };
        let fit = fit_title(
            measurer,
            &content.name,
            &style.product_name.family,
            style.product_name.size_pt,
            min_pt,
            style.product_name.bold,
            rect.width,
            title_box_h,
        );
        let title_font = FontSpec::new(&style.product_name.family, fit.size_pt, style.product_name.bold);
        let title_h = measurer
            .wrapped_height_mm(&content.name, &title_font, rect.width)
            .min(title_box_h);
        commands.push(DrawCommand::Text(TextCommand {
            x_mm: rect.x,
            y_mm: y,
            text: content.name.clone(),
            font: title_font,
            align: style.product_name.align,
            max_width_mm: Some(rect.width),
            max_height_mm: Some(title_box_h),
        }));
        y += title_h + TITLE_LINE_GAP_MM;
    }

    if !content.variant_text.trim().is_empty() {
        let variant_font = font_of(&style.variant_text);
        let variant = truncate_line(measurer, &content.variant_text, &variant_font, rect.width);
        commands.push(DrawCommand::Text(TextCommand {
            x_mm: rect.x,
            y_mm: y,
            text: variant.into_owned(),
            font: variant_font,
            align: style.variant_text.align,
            max_width_mm: Some(rect.width),
            max_height_mm: None,
        }));
    }
}

fn compose_right_column(
    commands: &mut Vec<DrawCommand>,
    content: &LabelContent,
    style: &StyleSettings,
    measurer: &dyn TextMeasurer,
    regions: &LabelRegions,
    pad: f64,
    stroke: f64,
) {
    let column = &regions.right_column;
    if style.show_separator_between_packs {
        commands.push(DrawCommand::Line(LineCommand {
            x1_mm: column.x,
            y1_mm: regions.right_top.bottom(),
            x2_mm: column.right(),
            y2_mm: regions.right_top.bottom(),
            stroke_mm: stroke,
        }));
    }
    if style.show_bottom_separator {
        commands.push(DrawCommand::Line(LineCommand {
            x1_mm: column.x,
            y1_mm: regions.right_middle.bottom(),
            x2_mm: column.right(),
            y2_mm: regions.right_middle.bottom(),
            stroke_mm: stroke,
        }));
    }

    compose_pack_section(
        commands,
        style,
        measurer,
        &content.small_pack.label,
        format::format_price(content.small_pack.price),
        &regions.right_top,
        pad,
    );
    compose_pack_section(
        commands,
        style,
        measurer,
        &content.large_pack.label,
        format::format_price(content.large_pack.price),
        &regions.right_middle,
        pad,
    );

    // Store-specific wording wins over the computed per-kg price.
    let unit_text = match content.unit_price_text.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => format::format_unit_price(content.unit_price_per_kg()),
    };
    if !unit_text.is_empty() {
        let band = &regions.right_bottom;
        let font = font_of(&style.unit_price_small);
        let line_h = measurer.line_height_mm(&font);
        commands.push(DrawCommand::Text(TextCommand {
            x_mm: band.x + pad,
            y_mm: band.y + ((band.height - line_h) / 2.0).max(0.0),
            text: unit_text,
            font,
            align: style.unit_price_small.align,
            max_width_mm: Some((band.width - 2.0 * pad).max(0.0)),
            max_height_mm: None,
        }));
    }
}

fn compose_pack_section(
    commands: &mut Vec<DrawCommand>,
    style: &StyleSettings,
    measurer: &dyn TextMeasurer,
    label: &str,
    price: String,
    band: &RectMm,
    pad: f64,
) {
    let label_font = font_of(&style.pack_label_small);
    let band_width = (band.width - 2.0 * pad).max(0.0);
    if !label.trim().is_empty() {
        commands.push(DrawCommand::Text(TextCommand {
            x_mm: band.x + pad,
            y_mm: band.y + SECTION_TOP_INSET_MM,
            text: label.to_string(),
            font: label_font.clone(),
            align: style.pack_label_small.align,
            max_width_mm: Some(band_width),
            max_height_mm: None,
        }));
    }
    if !price.is_empty() {
        commands.push(DrawCommand::Text(TextCommand {
            x_mm: band.x + pad,
            y_mm: band.y + SECTION_TOP_INSET_MM + measurer.line_height_mm(&label_font),
            text: price,
            font: font_of(&style.price_big),
            align: style.price_big.align,
            max_width_mm: Some(band_width),
            max_height_mm: None,
        }));
    }
}

fn compose_meta_row(
    commands: &mut Vec<DrawCommand>,
    content: &LabelContent,
    style: &StyleSettings,
    measurer: &dyn TextMeasurer,
    x: f64,
    y: f64,
    width: f64,
) {
    let font = FontSpec::new(&style.meta_font_family, META_FONT_PT, false);

    let mut parts: Vec<String> = Vec::new();
    if content.show_ean {
        if let Some(ean) = content.ean.as_deref().filter(|v| !v.trim().is_empty()) {
            parts.push(format!("EAN: {}", ean.trim()));
        }
    }
    if content.show_sku {
        if let Some(sku) = content.sku.as_deref().filter(|v| !v.trim().is_empty()) {
            parts.push(format!("SKU: {}", sku.trim()));
        }
    }
    let line1 = parts.join("  |  ");
    let line2 = if content.show_expiry {
        match content.expiry_date.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(date) => format!("SP: {}", format::format_expiry(date)),
            None => String::new(),
        }
    } else {
        String::new()
    };

    let mut line_y = y;
    for line in [line1, line2] {
        if line.is_empty() {
            continue;
        }
        let text = match truncate_line(measurer, &line, &font, width) {
            Cow::Borrowed(_) => line,
            Cow::Owned(truncated) => truncated,
        };
        commands.push(DrawCommand::Text(TextCommand {
            x_mm: x,
            y_mm: line_y,
            text,
            font: font.clone(),
            align: TextAlign::Left,
            max_width_mm: Some(width),
            max_height_mm: None,
        }));
        line_y += META_LINE_HEIGHT_MM;
    }
}

fn push_crop_marks(commands: &mut Vec<DrawCommand>, ox: f64, oy: f64, w: f64, h: f64) {
    let len = CROP_MARK_LEN_MM;
    let corners = [
        // (corner x, corner y, x direction, y direction)
        (ox, oy, 1.0, 1.0),
        (ox + w, oy, -1.0, 1.0),
        (ox, oy + h, 1.0, -1.0),
        (ox + w, oy + h, -1.0, -1.0),
    ];
    for (cx, cy, dx, dy) in corners {
        commands.push(DrawCommand::Line(LineCommand {
            x1_mm: cx,
            y1_mm: cy,
            x2_mm: cx + dx * len,
            y2_mm: cy,
            stroke_mm: CROP_MARK_STROKE_MM,
        }));
        commands.push(DrawCommand::Line(LineCommand {
            x1_mm: cx,
            y1_mm: cy,
            x2_mm: cx,
            y2_mm: cy + dy * len,
            stroke_mm: CROP_MARK_STROKE_MM,
        }));
    }
}

fn push_debug_overlay(commands: &mut Vec<DrawCommand>, page: &PackedPage, s: &SheetSettings) {
    commands.push(DrawCommand::Rect(RectCommand {
        rect: RectMm::new(
            s.margin_mm,
            s.margin_mm,
            s.printable_width_mm(),
            s.printable_height_mm(),
        ),
        stroke_mm: DEBUG_STROKE_MM,
    }));
    let font = FontSpec::new("Arial", DEBUG_FONT_PT, false);
    for (i, item) in page.items.iter().enumerate() {
        let t = item.template.normalized();
        commands.push(DrawCommand::Rect(RectCommand {
            rect: RectMm::new(item.x_mm, item.y_mm, t.width_mm, t.height_mm),
            stroke_mm: DEBUG_ITEM_STROKE_MM,
        }));
        commands.push(DrawCommand::Text(TextCommand {
            x_mm: item.x_mm + 2.0,
            y_mm: item.y_mm + 2.0,
            text: (i + 1).to_string(),
            font: font.clone(),
            align: TextAlign::Left,
            max_width_mm: None,
            max_height_mm: None,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::BarcodeFormat;
    use crate::model::PackRow;
    use crate::packer::pack;
    use crate::text_fit::HeuristicMeasurer;

    fn sample_content() -> LabelContent {
        LabelContent {
            name: "Salmon & Rice Adult".to_string(),
            variant_text: "for sensitive digestion".to_string(),
            small_pack: PackRow {
                label: "2 kg".to_string(),
                weight_kg: Some(2.0),
                price: Some(11.90),
            },
            large_pack: PackRow {
                label: "12 kg".to_string(),
                weight_kg: Some(12.0),
                price: Some(54.90),
            },
            ean: Some("4006381333931".to_string()),
            show_ean: true,
            sku: Some("DF-1042".to_string()),
            show_sku: true,
            expiry_date: Some("2026-05-01".to_string()),
            show_expiry: true,
            barcode_value: Some("4006381333931".to_string()),
            barcode_format: BarcodeFormat::Ean13,
            barcode_enabled: true,
            barcode_show_text: true,
            ..LabelContent::default()
        }
    }

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn full_label_emits_all_blocks() {
        let m = HeuristicMeasurer;
        let commands = compose_label(
            &sample_content(),
            &LabelTemplate::default(),
            &StyleSettings::default(),
            &m,
            0.0,
            0.0,
        );
        assert!(commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Barcode(_))));
        let texts = texts(&commands);
        assert!(texts.contains(&"Salmon & Rice Adult"));
        assert!(texts.contains(&"11,90 €"));
        assert!(texts.contains(&"54,90 €"));
        assert!(texts.iter().any(|t| t.starts_with("1 kg = ")));
        assert!(texts
            .iter()
            .any(|t| t.contains("EAN: 4006381333931") && t.contains("SKU: DF-1042")));
        assert!(texts.iter().any(|t| *t == "SP: 01.05.2026"));
    }

    #[test]
    fn regions_tile_the_label_without_overlap() {
        let regions = label_regions(
            &sample_content(),
            &LabelTemplate::default(),
            &StyleSettings::default(),
            0.0,
            0.0,
        );
        let label = RectMm::new(0.0, 0.0, 150.0, 38.0);
        assert!(label.contains_rect(&regions.border, 1e-9));
        assert!(label.contains_rect(&regions.left_column, 1e-9));
        assert!(label.contains_rect(&regions.right_column, 1e-9));
        // Left and right columns do not cross.
        assert!(regions.left_column.right() <= regions.right_column.x + 1e-9);
        // Bands tile the right column exactly.
        assert_eq!(regions.right_top.y, regions.right_column.y);
        assert!((regions.right_top.bottom() - regions.right_middle.y).abs() < 1e-9);
        assert!((regions.right_middle.bottom() - regions.right_bottom.y).abs() < 1e-9);
        assert!((regions.right_bottom.bottom() - regions.right_column.bottom()).abs() < 1e-9);
        // Barcode and meta sit below the main content.
        let bc = regions.barcode.unwrap();
        let meta = regions.meta.unwrap();
        assert!(bc.y >= regions.left_column.bottom() - 1e-9);
        assert!(meta.y >= bc.bottom() - 1e-9);
        assert!(label.contains_rect(&bc, 1e-9));
        assert!(label.contains_rect(&meta, 1e-9));
    }

    #[test]
    fn commands_stay_inside_label_bounds() {
        let m = HeuristicMeasurer;
        let template = LabelTemplate::default();
        let label = RectMm::new(10.0, 20.0, template.width_mm, template.height_mm);
        let commands = compose_label(
            &sample_content(),
            &template,
            &StyleSettings::default(),
            &m,
            10.0,
            20.0,
        );
        for command in &commands {
            match command {
                DrawCommand::Rect(rect) => assert!(label.contains_rect(&rect.rect, 0.5)),
                DrawCommand::Barcode(bc) => assert!(label.contains_rect(&bc.rect, 0.5)),
                DrawCommand::Line(line) => {
                    assert!(line.x1_mm >= label.x - 0.5 && line.x2_mm <= label.right() + 0.5);
                    assert!(line.y1_mm >= label.y - 0.5 && line.y2_mm <= label.bottom() + 0.5);
                }
                DrawCommand::Text(text) => {
                    assert!(text.x_mm >= label.x - 0.5 && text.x_mm <= label.right() + 0.5);
                    assert!(text.y_mm >= label.y - 0.5 && text.y_mm <= label.bottom() + 0.5);
                }
            }
        }
    }

    #[test]
    fn barcode_sits_inside_quiet_zones() {
        let m = HeuristicMeasurer;
        let template = LabelTemplate::default();
        let commands = compose_label(
            &sample_content(),
            &template,
            &StyleSettings::default(),
            &m,
            0.0,
            0.0,
        );
        let layout = bottom_layout::compute(150.0, 38.0, 2.0, true, true);
        let bc = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Barcode(bc) => Some(bc),
                _ => None,
            })
            .unwrap();
        assert!(bc.rect.x >= 2.0 + layout.quiet_zone_mm);
        assert!(bc.rect.right() <= 150.0 - 2.0 - layout.quiet_zone_mm);
        assert_eq!(bc.rect.height, layout.barcode_height_mm);
        assert_eq!(bc.value, "4006381333931");
    }

    #[test]
    fn invalid_barcode_degrades_to_no_barcode_command() {
        let m = HeuristicMeasurer;
        let mut content = sample_content();
        content.barcode_value = Some("12A456789012".to_string());
        let commands = compose_label(
            &content,
            &LabelTemplate::default(),
            &StyleSettings::default(),
            &m,
            0.0,
            0.0,
        );
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Barcode(_))));
        // The rest of the label still renders.
        assert!(texts(&commands).contains(&"Salmon & Rice Adult"));
    }

    #[test]
    fn sheet_page_uses_sheet_transform_only() {
        let m = HeuristicMeasurer;
        let template = LabelTemplate {
            offset_x_mm: 3.0,
            scale_x: 1.08,
            ..LabelTemplate::default()
        };
        let jobs = [crate::model::LabelJob::new(sample_content(), template, 1)];
        let settings = SheetSettings {
            offset_x_mm: 1.5,
            ..SheetSettings::default()
        };
        let pages = pack(&jobs, &settings);
        let render = compose_page(&pages[0], &settings, &StyleSettings::default(), &m);
        assert_eq!(render.transform.translate_x_mm, 1.5);
        assert_eq!(render.transform.center_x_mm, 105.0);
        // Label-level calibration must not shift commands: the border starts
        // at the placed origin regardless of template offsets.
        let border = render
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Rect(r) => Some(r),
                _ => None,
            })
            .unwrap();
        assert!((border.rect.x - (8.0 + 0.125)).abs() < 1e-9);
    }

    #[test]
    fn single_label_render_uses_label_transform() {
        let m = HeuristicMeasurer;
        let template = LabelTemplate {
            offset_y_mm: -2.0,
            scale_y: 0.95,
            ..LabelTemplate::default()
        };
        let render = compose_single(
            &sample_content(),
            &template,
            &StyleSettings::default(),
            &m,
        );
        assert_eq!(render.transform.translate_y_mm, -2.0);
        assert_eq!(render.transform.scale_y, 0.95);
        assert_eq!(render.transform.center_x_mm, 75.0);
    }

    #[test]
    fn debug_overlay_tags_items_in_order() {
        let m = HeuristicMeasurer;
        let jobs = [crate::model::LabelJob::new(
            sample_content(),
            LabelTemplate {
                width_mm: 60.0,
                height_mm: 30.0,
                ..LabelTemplate::default()
            },
            3,
        )];
        let settings = SheetSettings {
            debug_overlay: true,
            ..SheetSettings::default()
        };
        let pages = pack(&jobs, &settings);
        let render = compose_page(&pages[0], &settings, &StyleSettings::default(), &m);
        let tags: Vec<&str> = texts(&render.commands)
            .into_iter()
            .filter(|t| t.len() == 1)
            .collect();
        assert_eq!(tags, vec!["1", "2", "3"]);
    }

    #[test]
    fn crop_marks_add_eight_corner_lines() {
        let m = HeuristicMeasurer;
        let style = StyleSettings {
            crop_marks_enabled: true,
            show_separator_between_packs: false,
            show_bottom_separator: false,
            ..StyleSettings::default()
        };
        let commands = compose_label(
            &LabelContent::default(),
            &LabelTemplate::default(),
            &style,
            &m,
            0.0,
            0.0,
        );
        let lines = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line(_)))
            .count();
        assert_eq!(lines, 8);
    }

    #[test]
    fn narrow_label_gets_retail_column_split() {
        let m = HeuristicMeasurer;
        let template = LabelTemplate {
            width_mm: 60.0,
            height_mm: 30.0,
            ..LabelTemplate::default()
        };
        let style = StyleSettings {
            show_bottom_separator: false,
            ..StyleSettings::default()
        };
        let commands = compose_label(&sample_content(), &template, &style, &m, 0.0, 0.0);
        let separator = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Line(l) => Some(l),
                _ => None,
            })
            .unwrap();
        // Right column starts at the narrow-table split (0.62 x 60 = 37.2).
        assert!((separator.x1_mm - 37.2).abs() < 1e-9);
    }
}
