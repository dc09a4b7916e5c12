//! # Page Chrome
//!
//! The single HTML page served at `/`: the question form, example queries and
//! catalog statistics. Answers are fetched from `/ask` and inserted as returned.

use filmqa::CatalogStats;

/// Placeholders: `{stats}`.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<title>Тим Бёртон Ассистент</title>
<style>
body { background-color: #1a1a1a; color: #e0e0e0; font-family: Georgia, serif; margin: 0; display: flex; }
main { flex: 1; padding: 32px; }
aside { width: 320px; padding: 24px; background-color: #222; border-left: 1px solid #333; }
h1 { color: #f0e68c; }
input[type=text] { width: 100%; padding: 12px; font-size: 1.1em; background: #2b2b2b; color: #e0e0e0; border: 1px solid #555; border-radius: 5px; box-sizing: border-box; }
button { width: 100%; margin-top: 12px; padding: 12px; font-weight: bold; background: #f0e68c; color: #1a1a1a; border: none; border-radius: 5px; cursor: pointer; }
.spinner-text { color: #f0e68c; font-style: italic; margin-top: 16px; }
.error-message, .warning-message { padding: 16px; border-radius: 8px; margin-top: 16px; background: #3b1f1f; }
.warning-message { background: #3b351f; }
.answer-text, .reasoning-section, .final-answer-section { margin-top: 16px; line-height: 1.6; }
</style>
</head>
<body>
<main>
<h1>🦇 Тим Бёртон Ассистент</h1>
<hr>
<form id="ask-form">
<input type="text" id="question" placeholder="Спросите меня о фильмах, персонажах, стиле Тима Бёртона..." autocomplete="off">
<button type="submit">НАЙТИ ОТВЕТ</button>
</form>
<div id="answer"></div>
</main>
<aside>
<h3>💡 Примеры запросов:</h3>
<ul>
<li><b>Фильмы с рейтингом 18+</b></li>
<li><b>Самые дорогие фильмы</b></li>
<li><b>Фильмы 90-х годов</b></li>
<li><b>Фильмы с Джонни Деппом</b></li>
<li><b>Фильмы ужасов</b></li>
<li><b>Фильмы с самым высоким бюджетом</b></li>
<li><b>Фильмы выпущенные после 2000 года</b></li>
</ul>
<h3>📊 О базе данных:</h3>
{stats}
<hr>
<h3>🦇 О Тиме Бёртоне</h3>
<p>Тим Бёртон - американский режиссёр, продюсер и мультипликатор, известный своим уникальным готическим стилем и сюрреалистичными произведениями.</p>
</aside>
<script>
document.getElementById("ask-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const answer = document.getElementById("answer");
  const question = document.getElementById("question").value;
  answer.innerHTML = "<div class='spinner-text'>✨ Погружаюсь в атмосферу Бёртона...</div>";
  try {
    const response = await fetch("/ask", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ question }),
    });
    const body = await response.json();
    answer.innerHTML = body.result ? body.result.html : "<div class='error-message'>🎃 Произошла ошибка: " + body.error + "</div>";
  } catch (e) {
    answer.innerHTML = "<div class='error-message'>🎃 Произошла ошибка: " + e + "</div>";
  }
});
</script>
</body>
</html>
"#;

/// Renders the statistics block of the sidebar.
pub fn render_stats(stats: &CatalogStats) -> String {
    let mut html = format!(
        "<p>Всего произведений: <b>{}</b></p>",
        stats.total_works
    );
    if let (Some(min), Some(max)) = (&stats.min_release_year, &stats.max_release_year) {
        html.push_str(&format!("\n<p>Годы: <b>{min} - {max}</b></p>"));
    }
    html
}

/// Renders the full page.
pub fn render_page(stats: &CatalogStats) -> String {
    PAGE_TEMPLATE.replace("{stats}", &render_stats(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_stats_with_and_without_years() {
        let mut stats = CatalogStats {
            total_works: 2,
            min_release_year: Some("1988".to_string()),
            max_release_year: Some("2005".to_string()),
        };
        assert_eq!(
            render_stats(&stats),
            "<p>Всего произведений: <b>2</b></p>\n<p>Годы: <b>1988 - 2005</b></p>"
        );

        stats.min_release_year = None;
        stats.max_release_year = None;
        assert_eq!(render_stats(&stats), "<p>Всего произведений: <b>2</b></p>");
    }
}
