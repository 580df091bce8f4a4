//! Server-rendered HTML page.

use std::fmt::Write;

use crate::analysis_service::AnalysisReport;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// What to show on the page.
#[derive(Debug, Default, Clone, Copy)]
pub struct PageView<'a> {
    /// Text to keep in the textarea.
    pub text: &'a str,
    pub show_source: bool,
    pub warning: Option<&'a str>,
    pub error: Option<&'a str>,
    pub report: Option<&'a AnalysisReport>,
}

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
textarea{width:100%;min-height:12rem}\
.warning{background:#fff4ce;padding:.75rem}\
.error{background:#fde7e9;padding:.75rem}\
.metric{font-size:2rem;font-weight:bold}\
blockquote{white-space:pre-wrap;border-left:3px solid #ccc;margin:0;padding-left:1rem}";

/// Render the full page.
pub fn render(view: &PageView<'_>) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"utf-8\">\
         <title>Detector de Fake News</title><style>{STYLE}</style></head><body>\
         <h1>📰 Detector de Fake News</h1>\
         <p>Pega el texto de una noticia para estimar la probabilidad de que sea falsa \
         y obtener un resumen.</p>\
         <form method=\"post\" action=\"/analyze\">\
         <textarea name=\"text\" placeholder=\"Texto de la noticia\">{}</textarea>\
         <p><label><input type=\"checkbox\" name=\"show_source\" value=\"on\"{}> \
         Mostrar texto original</label></p>\
         <button type=\"submit\">Analizar</button></form>",
        escape_html(view.text),
        if view.show_source { " checked" } else { "" },
    );

    if let Some(warning) = view.warning {
        let _ = write!(html, "<p class=\"warning\">{}</p>", escape_html(warning));
    }
    if let Some(error) = view.error {
        let _ = write!(html, "<p class=\"error\">{}</p>", escape_html(error));
    }

    if let Some(report) = view.report {
        let _ = write!(
            html,
            "<section><h2>Resultado</h2>\
             <p>Probabilidad de Fake News</p><p class=\"metric\">{:.1}%</p>\
             <h3>{}</h3>\
             <h2>Resumen y análisis</h2><p>{}</p>",
            report.probability_percent,
            escape_html(&report.label_text),
            escape_html(&report.summary),
        );
        if let Some(source) = &report.source_text {
            let _ = write!(
                html,
                "<h2>Texto original</h2><blockquote>{}</blockquote>",
                escape_html(source)
            );
        }
        html.push_str("</section>");
    }

    html.push_str("</body></html>");
    html
}
