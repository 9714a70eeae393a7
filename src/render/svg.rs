//! SVG Module
//!
//! Markup for stats and error cards. Every interpolated value is XML-escaped.

use super::languages::LanguageCount;
use super::theme::Colors;
use super::i18n::Labels;

const PADDING: u32 = 20;
pub const AVATAR_SIZE: u32 = 60;
const FONT: &str = "'Segoe UI', Ubuntu, Sans-Serif";

/// Escapes text for use in SVG element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything drawn on a stats card.
#[derive(Debug, Clone)]
pub struct StatsCard<'a> {
    pub login: &'a str,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
    /// `data:` URI of the avatar, when one is shown
    pub avatar: Option<&'a str>,
    pub languages: &'a [LanguageCount],
    pub width: u32,
    pub height: u32,
    pub colors: &'a Colors,
    pub labels: &'a Labels,
}

fn count_or_na(value: Option<u64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

fn style_block(colors: &Colors) -> String {
    let text = escape(&colors.text);
    format!(
        "<style>\
.bg {{ fill: {bg}; stroke: {border}; stroke-width: 1.5; }}\
.header {{ font: 600 18px {FONT}; fill: {text}; }}\
.stat-label {{ font: 500 14px {FONT}; fill: {text}; }}\
.stat-value {{ font: 700 14px {FONT}; fill: {text}; }}\
.lang-label {{ font: 400 12px {FONT}; fill: {text}; }}\
.error-title {{ font: 600 18px {FONT}; fill: {text}; }}\
.error-message {{ font: 400 14px {FONT}; fill: {text}; }}\
</style>",
        bg = escape(&colors.background),
        border = escape(&colors.border),
    )
}

fn background(width: u32, height: u32) -> String {
    format!(
        r#"<rect data-testid="card-bg" class="bg" x="0.5" y="0.5" rx="4.5" height="{}" width="{}"/>"#,
        height.saturating_sub(1),
        width.saturating_sub(1)
    )
}

// == Stats Card ==
pub fn stats_svg(card: &StatsCard<'_>) -> String {
    let mut svg = format!(
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">"#,
        w = card.width,
        h = card.height
    );
    svg.push('\n');
    svg.push_str(&format!(
        "<title>{}: {}</title>\n",
        escape(card.labels.title),
        escape(card.login)
    ));
    svg.push_str(&style_block(card.colors));
    svg.push('\n');
    svg.push_str(&background(card.width, card.height));
    svg.push('\n');

    if let Some(avatar) = card.avatar {
        let x = card.width.saturating_sub(PADDING + AVATAR_SIZE);
        let radius = AVATAR_SIZE / 2;
        let (cx, cy) = (x + radius, PADDING + radius);
        svg.push_str(&format!(
            r#"<defs><clipPath id="avatarClip"><circle cx="{cx}" cy="{cy}" r="{radius}"/></clipPath></defs>"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<image xlink:href="{href}" x="{x}" y="{PADDING}" height="{AVATAR_SIZE}" width="{AVATAR_SIZE}" clip-path="url(#avatarClip)"/>"#,
            href = escape(avatar)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{radius}" fill="none" stroke="{stroke}" stroke-width="2"/>"#,
            stroke = escape(&card.colors.avatar_border)
        ));
        svg.push('\n');
    }

    svg.push_str(&format!(
        r#"<text x="{PADDING}" y="{}" class="header">{}</text>"#,
        PADDING + 20,
        escape(card.login)
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="{PADDING}" y="{}" class="stat-label">{}: <tspan class="stat-value">{}</tspan></text>"#,
        PADDING + 45,
        escape(card.labels.repos),
        count_or_na(card.public_repos)
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="{PADDING}" y="{}" class="stat-label">{}: <tspan class="stat-value">{}</tspan></text>"#,
        PADDING + 70,
        escape(card.labels.followers),
        count_or_na(card.followers)
    ));
    svg.push('\n');

    if !card.languages.is_empty() {
        let top = PADDING + 105;
        svg.push_str(&format!(
            r#"<text x="{PADDING}" y="{top}" class="stat-label">{}:</text>"#,
            escape(card.labels.languages)
        ));
        svg.push('\n');
        for (i, lang) in card.languages.iter().enumerate() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" class="lang-label">- {} ({})</text>"#,
                PADDING + 10,
                top + (i as u32 + 1) * 20,
                escape(&lang.name),
                lang.count
            ));
            svg.push('\n');
        }
    }

    svg.push_str("</svg>");
    svg
}

// == Error Card ==
/// Card shown instead of stats when the profile cannot be loaded.
pub fn error_svg(title: &str, message: &str, colors: &Colors, width: u32, height: u32) -> String {
    let mut svg = format!(
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
        w = width,
        h = height
    );
    svg.push('\n');
    svg.push_str(&style_block(colors));
    svg.push('\n');
    svg.push_str(&background(width, height));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="25" y="45" class="error-title">{}</text>"#,
        escape(title)
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="25" y="75" class="error-message">{}</text>"#,
        escape(message)
    ));
    svg.push('\n');
    svg.push_str("</svg>");
    svg
}
