//! Drawing-surface abstraction and the retained SVG implementation.

use crate::geom::{ScreenPoint, ScreenSize, point};
use crate::svg::{escape_xml_into, fmt_number, push_attr, push_num_attr};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// SVG path data (`M..L..Z`).
    Path(String),
    Circle { center: ScreenPoint, radius: f64 },
    Line { from: ScreenPoint, to: ScreenPoint },
    Rect { origin: ScreenPoint, size: ScreenSize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    /// `None` draws no fill.
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub stroke_opacity: Option<f64>,
    pub cursor: Option<&'static str>,
    /// Native hover text.
    pub title: Option<String>,
    /// Caller-defined key identifying what the shape represents (a node id, a region code).
    pub key: Option<String>,
}

impl Style {
    pub fn filled(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn stroked(color: impl Into<String>, width: f64) -> Self {
        Self {
            stroke: Some(color.into()),
            stroke_width: width,
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(color.into());
        self.stroke_width = width;
        self
    }

    pub fn with_stroke_opacity(mut self, opacity: f64) -> Self {
        self.stroke_opacity = Some(opacity);
        self
    }

    pub fn with_cursor(mut self, cursor: &'static str) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub position: ScreenPoint,
    /// Vertical offset from `position`.
    pub dy: f64,
    pub font_size: f64,
    pub bold: bool,
    pub fill: String,
    pub anchor: TextAnchor,
}

impl Text {
    pub fn new(content: impl Into<String>, position: ScreenPoint) -> Self {
        Self {
            content: content.into(),
            position,
            dy: 0.0,
            font_size: 12.0,
            bold: false,
            fill: "#000".to_string(),
            anchor: TextAnchor::Middle,
        }
    }

    pub fn with_dy(mut self, dy: f64) -> Self {
        self.dy = dy;
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: ScreenPoint,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: point(x, y),
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    pub fn leave() -> Self {
        Self::new(PointerKind::Leave, 0.0, 0.0)
    }
}

/// Where renderers draw. Renderers always `clear` before drawing a frame.
pub trait DrawSurface {
    fn size(&self) -> ScreenSize;
    fn clear(&mut self);
    fn draw_shape(&mut self, shape: Shape, style: &Style);
    fn draw_text(&mut self, text: Text);
    /// Drains pointer input gathered since the previous call.
    fn take_pointer_events(&mut self) -> Vec<PointerEvent>;
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn size(&self) -> ScreenSize {
        (**self).size()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn draw_shape(&mut self, shape: Shape, style: &Style) {
        (**self).draw_shape(shape, style);
    }

    fn draw_text(&mut self, text: Text) {
        (**self).draw_text(text);
    }

    fn take_pointer_events(&mut self) -> Vec<PointerEvent> {
        (**self).take_pointer_events()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Shape { shape: Shape, style: Style },
    Text(Text),
}

impl Element {
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Shape { style, .. } => style.key.as_deref(),
            Self::Text(_) => None,
        }
    }
}

/// Retained-mode surface that serializes to a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: ScreenSize,
    elements: Vec<Element>,
    pending: VecDeque<PointerEvent>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: crate::geom::size(width, height),
            elements: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_blank(&self) -> bool {
        self.elements.is_empty()
    }

    /// Shapes whose style carries `key`.
    pub fn shapes_with_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = (&'a Shape, &'a Style)> {
        self.elements.iter().filter_map(move |e| match e {
            Element::Shape { shape, style } if style.key.as_deref() == Some(key) => {
                Some((shape, style))
            }
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            Element::Shape { .. } => None,
        })
    }

    pub fn push_pointer_event(&mut self, event: PointerEvent) {
        self.pending.push_back(event);
    }

    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        push_num_attr(&mut out, "width", self.size.width);
        push_num_attr(&mut out, "height", self.size.height);
        push_attr(
            &mut out,
            "viewBox",
            &format!(
                "0 0 {} {}",
                fmt_number(self.size.width),
                fmt_number(self.size.height)
            ),
        );
        out.push('>');
        for e in &self.elements {
            match e {
                Element::Shape { shape, style } => write_shape(&mut out, shape, style),
                Element::Text(t) => write_text(&mut out, t),
            }
        }
        out.push_str("</svg>\n");
        out
    }
}

impl DrawSurface for SvgSurface {
    fn size(&self) -> ScreenSize {
        self.size
    }

    fn clear(&mut self) {
        self.elements.clear();
    }

    fn draw_shape(&mut self, shape: Shape, style: &Style) {
        self.elements.push(Element::Shape {
            shape,
            style: style.clone(),
        });
    }

    fn draw_text(&mut self, text: Text) {
        self.elements.push(Element::Text(text));
    }

    fn take_pointer_events(&mut self) -> Vec<PointerEvent> {
        self.pending.drain(..).collect()
    }
}

fn write_shape(out: &mut String, shape: &Shape, style: &Style) {
    let tag = match shape {
        Shape::Path(d) => {
            out.push_str("<path");
            push_attr(out, "d", d);
            "path"
        }
        Shape::Circle { center, radius } => {
            out.push_str("<circle");
            push_num_attr(out, "cx", center.x);
            push_num_attr(out, "cy", center.y);
            push_num_attr(out, "r", *radius);
            "circle"
        }
        Shape::Line { from, to } => {
            out.push_str("<line");
            push_num_attr(out, "x1", from.x);
            push_num_attr(out, "y1", from.y);
            push_num_attr(out, "x2", to.x);
            push_num_attr(out, "y2", to.y);
            "line"
        }
        Shape::Rect { origin, size } => {
            out.push_str("<rect");
            push_num_attr(out, "x", origin.x);
            push_num_attr(out, "y", origin.y);
            push_num_attr(out, "width", size.width);
            push_num_attr(out, "height", size.height);
            "rect"
        }
    };

    push_attr(out, "fill", style.fill.as_deref().unwrap_or("none"));
    if let Some(stroke) = &style.stroke {
        push_attr(out, "stroke", stroke);
        push_num_attr(out, "stroke-width", style.stroke_width);
    }
    if let Some(opacity) = style.stroke_opacity {
        push_num_attr(out, "stroke-opacity", opacity);
    }
    if let Some(cursor) = style.cursor {
        push_attr(out, "cursor", cursor);
    }
    if let Some(key) = &style.key {
        push_attr(out, "data-key", key);
    }

    match &style.title {
        Some(title) => {
            out.push_str("><title>");
            escape_xml_into(out, title);
            out.push_str("</title></");
            out.push_str(tag);
            out.push('>');
        }
        None => out.push_str("/>"),
    }
}

fn write_text(out: &mut String, t: &Text) {
    out.push_str("<text");
    push_num_attr(out, "x", t.position.x);
    push_num_attr(out, "y", t.position.y);
    if t.dy != 0.0 {
        push_num_attr(out, "dy", t.dy);
    }
    push_attr(out, "text-anchor", t.anchor.as_svg());
    push_num_attr(out, "font-size", t.font_size);
    if t.bold {
        push_attr(out, "font-weight", "bold");
    }
    push_attr(out, "fill", &t.fill);
    out.push('>');
    escape_xml_into(out, &t.content);
    out.push_str("</text>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_serializes_shapes_and_text() {
        let mut s = SvgSurface::new(100.0, 50.0);
        s.draw_shape(
            Shape::Circle {
                center: point(10.0, 20.0),
                radius: 5.5,
            },
            &Style::filled("#fff").with_title("a & b"),
        );
        s.draw_text(Text::new("x<y", point(1.0, 2.0)).bold());
        let svg = s.to_svg_string();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50""#));
        assert!(svg.contains(r##"<circle cx="10" cy="20" r="5.5" fill="#fff"><title>a &amp; b</title></circle>"##));
        assert!(svg.contains(">x&lt;y</text>"));
    }

    #[test]
    fn pointer_events_are_drained_in_order() {
        let mut s = SvgSurface::new(10.0, 10.0);
        s.push_pointer_event(PointerEvent::down(1.0, 1.0));
        s.push_pointer_event(PointerEvent::up(1.0, 1.0));
        let events = s.take_pointer_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, PointerKind::Down);
        assert!(s.take_pointer_events().is_empty());
    }
}
