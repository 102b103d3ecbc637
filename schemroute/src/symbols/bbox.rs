//! Symbol extent computed from its drawing.

use super::{Primitive, SymbolDef};
use crate::geometry::BBox;

/// Stroke allowance around every primitive.
const STROKE_PADDING: f64 = 2.0;
/// Clearance kept around every pin.
const PIN_PADDING: f64 = 5.0;
const DEFAULT_TEXT_SIZE: f64 = 6.0;
/// Box used for symbols with nothing to measure.
const EMPTY_SYMBOL_BBOX: BBox = BBox::new(-10.0, -10.0, 20.0, 20.0);

fn padded(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BBox {
    BBox::new(
        min_x - STROKE_PADDING,
        min_y - STROKE_PADDING,
        max_x - min_x + 2.0 * STROKE_PADDING,
        max_y - min_y + 2.0 * STROKE_PADDING,
    )
}

/// Extent of a single primitive, stroke padding included.
pub fn primitive_bbox(p: &Primitive) -> BBox {
    match p {
        Primitive::Line { a, b } => padded(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y)),
        Primitive::Rect { x, y, w, h } => padded(*x, *y, x + w, y + h),
        // arcs are measured as the full circle
        Primitive::Circle { cx, cy, r } | Primitive::Arc { cx, cy, r, .. } => {
            padded(cx - r, cy - r, cx + r, cy + r)
        }
        Primitive::Polyline { points } => {
            let Some(first) = points.first() else {
                return BBox::new(0.0, 0.0, 0.0, 0.0);
            };
            let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
            for pt in points {
                min_x = min_x.min(pt.x);
                min_y = min_y.min(pt.y);
                max_x = max_x.max(pt.x);
                max_y = max_y.max(pt.y);
            }
            padded(min_x, min_y, max_x, max_y)
        }
        Primitive::Text { x, y, text, size } => {
            // rough glyph width estimate
            let size = size.unwrap_or(DEFAULT_TEXT_SIZE);
            let width = text.chars().count() as f64 * size * 0.6;
            padded(*x, y - size / 2.0, x + width, y + size / 2.0)
        }
    }
}

/// Bounding box of all primitives and pins of a symbol.
pub fn compute_symbol_bbox(symbol: &SymbolDef) -> BBox {
    let mut bbox: Option<BBox> = None;

    for prim in &symbol.primitives {
        let pb = primitive_bbox(prim);
        bbox = Some(match bbox {
            Some(b) => b.union(&pb),
            None => pb,
        });
    }

    for pin in &symbol.pins {
        let pin_box = BBox::new(
            pin.position.x - PIN_PADDING,
            pin.position.y - PIN_PADDING,
            2.0 * PIN_PADDING,
            2.0 * PIN_PADDING,
        );
        bbox = Some(match bbox {
            Some(b) => b.union(&pin_box),
            None => pin_box,
        });
    }

    match bbox {
        Some(b) if !b.is_degenerate() => b,
        _ => EMPTY_SYMBOL_BBOX,
    }
}
