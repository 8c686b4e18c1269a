use std::fmt::Write;

use super::{Scene, SeatNode};

/// Сериализовать сцену в SVG. Разметка одинакова для любого числа мест.
pub fn to_svg(scene: &Scene) -> String {
    // ~200 байт на место, чтобы не перевыделять буфер на больших залах
    let seat_count: usize = scene.sections.iter().map(|s| s.seats.len()).sum();
    let mut out = String::with_capacity(1024 + seat_count * 200);

    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid meet" aria-label="Seating map for {}">"#,
        scene.width,
        scene.height,
        escape(&scene.name)
    );

    let stage = &scene.stage;
    let _ = write!(
        out,
        r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#1f2937" rx="4"/>"##,
        stage.x, stage.y, stage.width, stage.height
    );
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" fill="white" font-size="20" font-weight="bold">{}</text>"#,
        scene.width / 2.0,
        stage.y + 25.0,
        stage.label
    );

    for section in &scene.sections {
        let t = &section.transform;
        let _ = write!(
            out,
            r#"<g data-section="{}" transform="translate({}, {}) scale({})">"#,
            escape(&section.id),
            t.x,
            t.y,
            t.scale
        );
        let _ = write!(
            out,
            r##"<text x="{}" y="{}" fill="#374151" font-size="16" font-weight="600">{}</text>"##,
            section.label_x,
            section.label_y,
            escape(&section.label)
        );
        for seat in &section.seats {
            write_seat(&mut out, seat);
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>");
    out
}

fn write_seat(out: &mut String, seat: &SeatNode) {
    let style = seat.style;
    let _ = write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" class="{}" fill="{}" opacity="{}""#,
        seat.cx,
        seat.cy,
        seat.r,
        style.class(),
        style.fill(),
        style.opacity()
    );
    if let Some((color, width)) = style.stroke() {
        let _ = write!(out, r#" stroke="{}" stroke-width="{}""#, color, width);
    }
    let _ = write!(
        out,
        r#" data-seat-id="{}" role="button" tabindex="{}" aria-label="{}" aria-pressed="{}" aria-disabled="{}"/>"#,
        escape(&seat.id),
        if seat.interactive { 0 } else { -1 },
        escape(&seat.label),
        seat.selected,
        !seat.interactive
    );
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
