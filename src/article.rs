use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use unicode_normalization::UnicodeNormalization;

use crate::dates;

pub const DEFAULT_TITLE: &str = "Sem título";
pub const DEFAULT_CATEGORY: &str = "Geral";
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1504711434969-e33886168f5c?auto=format&fit=crop&w=800&q=80";

// Summaries longer than this are cut to 157 chars plus "...".
const SUMMARY_MAX: usize = 160;

// Article pages were authored at different times against drifting
// templates, so most fields carry a chain of selectors tried in order.
static SEL_TITLE: Lazy<Vec<Selector>> = Lazy::new(|| chain(&["h1"]));
static SEL_CATEGORY: Lazy<Vec<Selector>> = Lazy::new(|| {
    chain(&[
        "nav .text-g1-orange",
        "nav span#article-category",
        ".badge-category",
    ])
});
static SEL_DATE: Lazy<Vec<Selector>> = Lazy::new(|| {
    chain(&[
        "#article-date",
        ".flex.items-center.gap-4.text-sm.text-gray-500 span:last-child",
    ])
});
static SEL_SUMMARY: Lazy<Vec<Selector>> = Lazy::new(|| {
    chain(&["#article-content p", ".text-lg.text-gray-800 p", "article > p"])
});
static SEL_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article figure img").unwrap());

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn chain(selectors: &[&str]) -> Vec<Selector> {
    selectors.iter().map(|s| Selector::parse(s).unwrap()).collect()
}

/// One discovered article page. Built once per file, held in memory for a
/// single generator run.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub title: String,
    pub category: String,
    pub image: String,
    /// Path relative to the site root, always `/`-separated.
    pub link: String,
    /// Raw date string as found in the page; may be empty.
    pub date_text: String,
    pub summary: String,
    /// Epoch milliseconds; parsed from `date_text`, else the file mtime.
    pub sort_timestamp: i64,
}

/// Extract one record from an article page. Pure function of its inputs;
/// reading and stat-ing the file is the walker's job. Every field has a
/// default, so malformed pages never fail.
pub fn extract(
    markup: &str,
    file_path: &Path,
    mod_time_ms: i64,
    site_root: &Path,
) -> ArticleRecord {
    let doc = Html::parse_document(markup);

    let title = first_text(&doc, &SEL_TITLE).unwrap_or_else(|| DEFAULT_TITLE.into());
    let category = first_text(&doc, &SEL_CATEGORY).unwrap_or_else(|| DEFAULT_CATEGORY.into());
    let date_text = first_text(&doc, &SEL_DATE).unwrap_or_default();
    let summary = first_text(&doc, &SEL_SUMMARY)
        .map(truncate_summary)
        .unwrap_or_default();

    let image = doc
        .select(&SEL_IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE.into());

    let parsed = dates::parse_timestamp(&date_text);
    let sort_timestamp = if parsed != 0 { parsed } else { mod_time_ms };

    ArticleRecord {
        title,
        category,
        image,
        link: relative_link(file_path, site_root),
        date_text,
        summary,
        sort_timestamp,
    }
}

// First selector yielding non-empty cleaned text wins; an element match
// with empty text falls through to the next selector.
fn first_text(doc: &Html, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|sel| {
        doc.select(sel)
            .next()
            .map(|el| clean_text(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty())
    })
}

// NFKC-normalize, then collapse runs of whitespace and trim.
fn clean_text(s: &str) -> String {
    let mut out = s.nfkc().collect::<String>();
    out = out.replace('\u{00A0}', " ");
    out = RE_WHITESPACE.replace_all(&out, " ").to_string();
    out.trim().to_string()
}

fn truncate_summary(s: String) -> String {
    if s.chars().count() > SUMMARY_MAX {
        let mut out: String = s.chars().take(SUMMARY_MAX - 3).collect();
        out.push_str("...");
        out
    } else {
        s
    }
}

fn relative_link(file_path: &Path, site_root: &Path) -> String {
    let rel = file_path.strip_prefix(site_root).unwrap_or(file_path);
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head><title>Mídia Informal</title></head>
<body>
    <nav>
        <a href="index.html">Home</a>
        <span id="article-category" class="text-g1-orange">Rio</span>
    </nav>
    <article>
        <h1>
            Chuva forte alaga ruas
            da zona norte
        </h1>
        <div class="flex items-center gap-4 text-sm text-gray-500">
            <span>Por Redação</span>
            <span id="article-date">10/05/2025 14h30</span>
        </div>
        <figure><img src="img/chuva.jpg" alt=""></figure>
        <div id="article-content">
            <p>  Um temporal atingiu a cidade na madrugada desta quinta.  </p>
            <p>Segundo parágrafo que não entra no resumo.</p>
        </div>
    </article>
</body>
</html>"#;

    fn record(markup: &str) -> ArticleRecord {
        extract(
            markup,
            Path::new("/site/materias/rio/a.html"),
            1_000,
            Path::new("/site"),
        )
    }

    #[test]
    fn extracts_all_fields() {
        let art = record(PAGE);
        assert_eq!(art.title, "Chuva forte alaga ruas da zona norte");
        assert_eq!(art.category, "Rio");
        assert_eq!(art.image, "img/chuva.jpg");
        assert_eq!(art.link, "materias/rio/a.html");
        assert_eq!(art.date_text, "10/05/2025 14h30");
        assert_eq!(
            art.summary,
            "Um temporal atingiu a cidade na madrugada desta quinta."
        );
        let expected = Local
            .with_ymd_and_hms(2025, 5, 10, 14, 30, 0)
            .earliest()
            .unwrap()
            .timestamp_millis();
        assert_eq!(art.sort_timestamp, expected);
    }

    #[test]
    fn empty_page_gets_every_default() {
        let art = record("<html><body></body></html>");
        assert_eq!(art.title, DEFAULT_TITLE);
        assert_eq!(art.category, DEFAULT_CATEGORY);
        assert_eq!(art.image, DEFAULT_IMAGE);
        assert_eq!(art.date_text, "");
        assert_eq!(art.summary, "");
        assert_eq!(art.sort_timestamp, 1_000);
    }

    #[test]
    fn missing_date_and_category_fall_back() {
        let markup = r#"<html><body>
            <article>
                <h1>Festival de cinema abre inscrições</h1>
                <p>Parágrafo direto no corpo do artigo.</p>
            </article>
        </body></html>"#;
        let art = record(markup);
        assert_eq!(art.category, DEFAULT_CATEGORY);
        assert_eq!(art.date_text, "");
        // mtime fallback when there is nothing to parse
        assert_eq!(art.sort_timestamp, 1_000);
        // third summary selector ("article > p") catches the paragraph
        assert_eq!(art.summary, "Parágrafo direto no corpo do artigo.");
    }

    #[test]
    fn category_badge_variant_is_recognized() {
        let markup = r#"<html><body>
            <article>
                <h1>Título</h1>
                <span class="badge-category">Cultura</span>
            </article>
        </body></html>"#;
        assert_eq!(record(markup).category, "Cultura");
    }

    #[test]
    fn date_span_variant_is_recognized() {
        let markup = r#"<html><body>
            <article>
                <h1>Título</h1>
                <div class="flex items-center gap-4 text-sm text-gray-500">
                    <span>Por Redação</span>
                    <span>01/03/2025 08:00</span>
                </div>
            </article>
        </body></html>"#;
        let art = record(markup);
        assert_eq!(art.date_text, "01/03/2025 08:00");
        let expected = Local
            .with_ymd_and_hms(2025, 3, 1, 8, 0, 0)
            .earliest()
            .unwrap()
            .timestamp_millis();
        assert_eq!(art.sort_timestamp, expected);
    }

    #[test]
    fn unparseable_date_text_keeps_mtime() {
        let markup = r#"<html><body>
            <article>
                <h1>Título</h1>
                <span id="article-date">ontem à noite</span>
            </article>
        </body></html>"#;
        let art = record(markup);
        assert_eq!(art.date_text, "ontem à noite");
        assert_eq!(art.sort_timestamp, 1_000);
    }

    #[test]
    fn long_summary_is_truncated_with_ellipsis() {
        let body: String = "a".repeat(200);
        let markup = format!(
            r#"<html><body><article><h1>T</h1><div id="article-content"><p>{}</p></div></article></body></html>"#,
            body
        );
        let art = record(&markup);
        assert!(art.summary.chars().count() <= 160);
        assert!(art.summary.ends_with("..."));
        assert_eq!(art.summary.chars().count(), 160);
    }

    #[test]
    fn short_summary_is_unchanged() {
        let body: String = "b".repeat(100);
        let markup = format!(
            r#"<html><body><article><h1>T</h1><div id="article-content"><p>{}</p></div></article></body></html>"#,
            body
        );
        assert_eq!(record(&markup).summary, body);
    }

    #[test]
    fn empty_heading_falls_through_to_default() {
        let markup = "<html><body><article><h1>   </h1></article></body></html>";
        assert_eq!(record(markup).title, DEFAULT_TITLE);
    }
}
