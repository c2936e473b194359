use tiny_skia::Pixmap;
use usvg::Tree;

use crate::display::DisplayState;
use crate::errors::{Result, render_error};

const WIDTH: u32 = 1600;
const HEIGHT: u32 = 900;
const BAR_WIDTH: f64 = 1400.0;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn detail_item(x: u32, title: &str, value: &str, color: &str) -> String {
    format!(
        r#"<g transform='translate({x}, 0)'>
      <text x='0' y='0' font-family='sans-serif' font-size='36' text-anchor='middle' fill='#FFFFFF' fill-opacity='0.6'>{title}</text>
      <text x='0' y='70' font-family='sans-serif' font-size='56' text-anchor='middle' fill='{color}' font-weight='bold'>{value}</text>
    </g>"#,
        x = x,
        title = title,
        value = escape(value),
        color = color
    )
}

fn progress_section(state: &DisplayState) -> String {
    if state.show_progress_bar {
        let fill = BAR_WIDTH * state.progress.clamp(0.0, 1.0);
        format!(
            r#"<text x='100' y='0' font-family='sans-serif' font-size='36' fill='#FFFFFF' fill-opacity='0.8'>Progress</text>
    <text x='1500' y='0' font-family='sans-serif' font-size='36' text-anchor='end' fill='#FFFFFF' font-weight='bold'>{percent}%</text>
    <rect x='100' y='30' width='{bar}' height='24' rx='12' fill='#2D3B5E' />
    <rect x='100' y='30' width='{fill:.1}' height='24' rx='12' fill='#00D4AA' />
    <text x='100' y='100' font-family='sans-serif' font-size='30' fill='#FFFFFF' fill-opacity='0.6'>{flown}</text>
    <text x='1500' y='100' font-family='sans-serif' font-size='30' text-anchor='end' fill='#FFFFFF' fill-opacity='0.6'>{remaining}</text>"#,
            percent = state.progress_percent,
            bar = BAR_WIDTH,
            fill = fill,
            flown = state.distance_flown_text(),
            remaining = state.distance_remaining_text()
        )
    } else {
        format!(
            r#"<text x='800' y='40' font-family='sans-serif' font-size='40' text-anchor='middle' fill='#FFFFFF' fill-opacity='0.8'>Flight {}</text>"#,
            escape(&state.status_label.to_lowercase())
        )
    }
}

pub fn render_panel_svg(state: &DisplayState) -> String {
    let details = [
        detail_item(250, "Altitude", state.altitude(), "#00D4AA"),
        detail_item(617, "Speed", state.speed(), "#4CC9F0"),
        detail_item(983, "ETA", state.eta(), "#9B59B6"),
        detail_item(1350, "Distance", &state.distance_text(), "#E74C3C"),
    ]
    .join("\n    ");

    format!(
        r#"<svg width='{width}' height='{height}' viewBox='0 0 {width} {height}' xmlns='http://www.w3.org/2000/svg'>
  <rect width='{width}' height='{height}' fill='#0A192F' />
  <rect x='40' y='40' width='1520' height='820' rx='40' fill='#1E2A47' />

  <!-- Header -->
  <g transform='translate(100, 150)'>
    <text x='0' y='0' font-family='sans-serif' font-size='60' fill='#FFFFFF' font-weight='bold'>{airline} {number}</text>
    <text x='0' y='80' font-family='sans-serif' font-size='48' fill='#FFFFFF' fill-opacity='0.8'>{origin} → {destination}</text>
  </g>

  <!-- Status badge -->
  <g transform='translate(1500, 110)'>
    <rect x='-360' y='0' width='360' height='80' rx='40' fill='{status_color}' />
    <text x='-180' y='54' font-family='sans-serif' font-size='40' text-anchor='middle' fill='#FFFFFF'>{status}</text>
  </g>

  <!-- Details -->
  <g transform='translate(0, 420)'>
    {details}
  </g>

  <!-- Progress -->
  <g transform='translate(0, 650)'>
    {progress}
  </g>
</svg>"#,
        width = WIDTH,
        height = HEIGHT,
        airline = escape(&state.airline),
        number = escape(&state.flight_number),
        origin = escape(&state.origin_code),
        destination = escape(&state.destination_code),
        status_color = state.status_color,
        status = escape(&state.status_label),
        details = details,
        progress = progress_section(state)
    )
}

pub fn svg_to_png(svg: &str, opt: &usvg::Options) -> Result<Vec<u8>> {
    let tree = Tree::from_str(svg, opt).map_err(render_error)?;

    let size = tree.size();
    let mut pixmap = Pixmap::new(size.width() as u32, size.height() as u32)
        .ok_or_else(|| render_error(format!("cannot allocate {}x{} pixmap", size.width(), size.height())))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(render_error)
}
