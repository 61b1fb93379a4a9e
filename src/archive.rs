use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::article::ArticleRecord;

/// Render the complete archive document. `articles` must already be
/// sorted newest-first; the driver owns the sort so that the archive and
/// the homepage feed agree on ordering.
pub fn render(articles: &[ArticleRecord]) -> String {
    let cards: String = articles.iter().map(card).collect::<Vec<_>>().join("\n");

    format!(
        r##"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Arquivo de Notícias - MÍDIA INFORMAL</title>
    <link rel="stylesheet" href="styles.css">
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-[#f8fafc] text-[#0f172a] font-sans antialiased">
    <!-- Top Bar -->
    <div class="bg-slate-50 border-b border-slate-200 text-[10px] py-1.5 text-slate-500 font-medium">
        <div class="container mx-auto px-6 flex justify-between items-center uppercase tracking-wider">
            <span id="current-date">Sexta-feira, 27 de fevereiro de 2026</span>
            <div class="flex gap-6">
                <span>Rio de Janeiro 26°C</span>
                <span>Dólar R$ 5,12</span>
            </div>
        </div>
    </div>

    <!-- Header -->
    <header class="glass-header sticky top-0 z-50">
        <div class="container mx-auto px-6 py-4 flex justify-between items-center">
            <a href="index.html" class="flex items-center gap-2 group">
                <div class="bg-slate-900 text-white px-3 py-1.5 rounded-lg font-black text-xl">MÍDIA</div>
                <div class="text-[#0f172a] font-black text-xl tracking-tighter">INFORMAL</div>
            </a>
            <nav class="hidden md:flex items-center gap-8 text-[11px] font-black tracking-[0.1em] text-slate-600 uppercase">
                <a href="index.html" class="hover:text-brand-blue transition-colors">Home</a>
                <a href="materias.html" class="text-brand-blue border-b-2 border-brand-blue pb-1">Arquivo</a>
            </nav>
        </div>
    </header>

    <main class="container mx-auto px-6 py-12 max-w-7xl animate-fade-in">
        <div class="flex items-center gap-3 mb-12">
            <span class="w-10 h-1 bg-brand-blue rounded-full"></span>
            <h1 class="text-3xl font-black text-slate-900 uppercase">Arquivo de Notícias</h1>
        </div>

        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">
{cards}
        </div>
    </main>

    <footer class="bg-white border-t border-slate-200 pt-20 pb-12 mt-20">
        <div class="container mx-auto px-6 text-center">
            <div class="flex items-center justify-center gap-2 mb-8">
                <div class="bg-slate-900 text-white px-3 py-1.5 rounded-lg font-black text-xl">MÍDIA</div>
                <div class="text-slate-900 font-black text-xl tracking-tighter">INFORMAL</div>
            </div>
            <p class="text-slate-400 text-[10px] font-medium uppercase tracking-[0.25em]">© 2026 Mídia Informal • Transparência e Verdade</p>
        </div>
    </footer>
    <script src="script.js"></script>
</body>
</html>"##,
        cards = cards
    )
}

fn card(art: &ArticleRecord) -> String {
    let title = encode_text(&art.title);
    let title_attr = encode_double_quoted_attribute(&art.title);
    let link = encode_double_quoted_attribute(&art.link);
    let image = encode_double_quoted_attribute(&art.image);
    let category = encode_text(&art.category);
    let date_raw = if art.date_text.is_empty() { "Recente" } else { art.date_text.as_str() };
    let date = encode_text(date_raw);

    format!(
        r##"
            <!-- {title} -->
            <a href="{link}" class="stitch-card group flex flex-col">
                <div class="aspect-video overflow-hidden">
                    <img src="{image}" alt="{title_attr}" class="w-full h-full object-cover group-hover:scale-105 transition-transform duration-500">
                </div>
                <div class="p-6 flex flex-col flex-grow">
                    <span class="badge-category bg-brand-blue text-white mb-3 self-start">{category}</span>
                    <h2 class="text-xl font-extrabold text-slate-900 group-hover:text-brand-blue transition-colors uppercase leading-tight">{title}</h2>
                    <div class="mt-auto pt-6 flex items-center justify-between">
                        <span class="text-slate-400 text-[10px] font-bold uppercase tracking-widest">{date}</span>
                        <span class="text-brand-blue font-black text-[10px] uppercase tracking-tighter group-hover:translate-x-1 transition-transform">Ler mais →</span>
                    </div>
                </div>
            </a>"##,
        title = title,
        title_attr = title_attr,
        link = link,
        image = image,
        category = category,
        date = date,
    )
}
