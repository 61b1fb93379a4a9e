use std::error::Error;
use std::fs;
use std::path::Path;

use html_escape::{encode_double_quoted_attribute, encode_text};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::article::ArticleRecord;

pub const START_MARKER: &str = "<!-- LATEST-NEWS-START -->";
pub const END_MARKER: &str = "<!-- LATEST-NEWS-END -->";

static SEL_FEATURED_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#destaques a").unwrap());

/// Rewrite the homepage's latest-news region in place. A missing homepage
/// is only a warning so the archive can still be produced; missing
/// markers abort the run.
pub fn update_index(
    index_file: &Path,
    articles: &[ArticleRecord],
    latest_max: usize,
) -> Result<(), Box<dyn Error>> {
    if !index_file.exists() {
        warn!("{} not found, skipping homepage update", index_file.display());
        return Ok(());
    }
    let markup = fs::read_to_string(index_file)?;
    let patched = patch(&markup, articles, latest_max)?;
    fs::write(index_file, patched)?;
    info!("{} updated with the latest news", index_file.display());
    Ok(())
}

/// Replace everything between the two latest-news markers (markers
/// included) with a freshly rendered feed, leaving every other byte of
/// the document untouched. `articles` must already be sorted newest-first.
pub fn patch(
    markup: &str,
    articles: &[ArticleRecord],
    latest_max: usize,
) -> Result<String, Box<dyn Error>> {
    let featured = featured_links(markup);
    info!("featured links detected: {:?}", featured);

    let feed: Vec<&ArticleRecord> = articles
        .iter()
        .filter(|a| !featured.contains(&a.link))
        .take(latest_max)
        .collect();

    let fragment = feed
        .iter()
        .enumerate()
        .map(|(i, art)| item_card(i, art, i + 1 == feed.len()))
        .collect::<Vec<_>>()
        .join("\n\n");

    let start = markup
        .find(START_MARKER)
        .ok_or("marker <!-- LATEST-NEWS-START --> not found in homepage")?;
    let end = markup[start..]
        .find(END_MARKER)
        .map(|i| start + i)
        .ok_or("marker <!-- LATEST-NEWS-END --> not found in homepage")?;

    let mut out = String::with_capacity(markup.len() + fragment.len());
    out.push_str(&markup[..start]);
    out.push_str(START_MARKER);
    out.push('\n');
    out.push_str(&fragment);
    out.push_str("\n                    ");
    out.push_str(END_MARKER);
    out.push_str(&markup[end + END_MARKER.len()..]);
    Ok(out)
}

// Anchors inside the #destaques container are already visible as featured
// content and stay out of the feed. Hrefs are compared verbatim against
// record links (both site-root-relative).
fn featured_links(markup: &str) -> Vec<String> {
    let doc = Html::parse_document(markup);
    doc.select(&SEL_FEATURED_ANCHORS)
        .filter_map(|a| a.value().attr("href"))
        .map(|h| h.to_string())
        .collect()
}

fn item_card(index: usize, art: &ArticleRecord, is_last: bool) -> String {
    let border_class = if is_last { "" } else { "border-b border-slate-100 pb-8" };
    let accent = if art.category.to_lowercase().contains("rio") {
        "bg-brand-orange"
    } else {
        "bg-brand-blue"
    };
    let short_title: String = art.title.chars().take(20).collect();

    let title = encode_text(&art.title);
    let title_attr = encode_double_quoted_attribute(&art.title);
    let link = encode_double_quoted_attribute(&art.link);
    let image = encode_double_quoted_attribute(&art.image);
    let category = encode_text(&art.category);
    let summary = encode_text(&art.summary);
    let date_raw = if art.date_text.is_empty() { "Recente" } else { art.date_text.as_str() };
    let date = encode_text(date_raw);

    format!(
        r##"                    <!-- Item {n} - {short_title}... -->
                    <a href="{link}"
                        class="flex flex-col md:group md:flex-row gap-6 group cursor-pointer {border_class}">
                        <div class="md:w-5/12 overflow-hidden rounded-xl">
                            <img src="{image}"
                                alt="{title_attr}"
                                class="w-full h-48 md:h-full object-cover group-hover:scale-105 transition-transform duration-500">
                        </div>
                        <div class="md:w-7/12 flex flex-col justify-center">
                            <span class="badge-category {accent} text-white mb-2">{category}</span>
                            <h3
                                class="text-xl font-extrabold text-[#0f172a] leading-tight mb-2 group-hover:text-brand-blue transition-colors uppercase">
                                {title}
                            </h3>
                            <p class="text-slate-500 text-sm line-clamp-2 font-medium">{summary}</p>
                            <span class="text-slate-400 text-[10px] font-bold mt-4 uppercase tracking-widest">{date}</span>
                        </div>
                    </a>"##,
        n = index + 1,
        short_title = encode_text(&short_title),
        link = link,
        border_class = border_class,
        image = image,
        title_attr = title_attr,
        accent = accent,
        category = category,
        title = title,
        summary = summary,
        date = date,
    )
}
