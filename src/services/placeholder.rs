pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 300;
pub const DEFAULT_TEXT: &str = "صورة";
pub const MAX_DIMENSION: u32 = 4000;

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders a neutral gradient placeholder image with centered text.
pub fn render_svg(width: Option<u32>, height: Option<u32>, text: Option<&str>) -> String {
    let width = width.unwrap_or(DEFAULT_WIDTH).clamp(1, MAX_DIMENSION);
    let height = height.unwrap_or(DEFAULT_HEIGHT).clamp(1, MAX_DIMENSION);
    let text = escape_xml(text.filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TEXT));

    format!(
        r##"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#0284c7;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#0ea5e9;stop-opacity:1" />
    </linearGradient>
  </defs>
  <rect width="100%" height="100%" fill="#f3f4f6"/>
  <rect x="0" y="0" width="100%" height="100%" fill="url(#grad)" opacity="0.1"/>
  <text x="50%" y="50%" font-family="Cairo, Arial, sans-serif" font-size="16" fill="#6b7280" text-anchor="middle" dominant-baseline="middle">{text}</text>
</svg>
"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let svg = render_svg(None, None, None);
        assert!(svg.starts_with(r#"<svg width="400" height="300""#));
        assert!(svg.contains(">صورة</text>"));
    }

    #[test]
    fn dimensions_are_clamped() {
        let svg = render_svg(Some(0), Some(100_000), Some("x"));
        assert!(svg.starts_with(r#"<svg width="1" height="4000""#));
    }

    #[test]
    fn text_is_escaped() {
        let svg = render_svg(Some(10), Some(10), Some("<script>&\"'"));
        assert!(svg.contains(">&lt;script&gt;&amp;&quot;&apos;</text>"));
        assert!(!svg.contains("<script>"));
    }
}
