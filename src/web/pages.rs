//! # HTML Pages
//!
//! Server-rendered tabs. Charts are drawn in the browser from JSON the
//! server embeds in each page.

use super::assets::Animations;
use crate::dashboard::{BatchReport, DashboardReport, LabelBar};
use crate::models::ScoreResult;
use crate::utils::TeamMember;
use serde::Serialize;
use std::fmt::Write;

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";
const WORDCLOUD_JS: &str = "https://cdn.jsdelivr.net/npm/wordcloud@1.2.2/src/wordcloud2.js";
const LOTTIE_JS: &str = "https://cdn.jsdelivr.net/npm/lottie-web@5.12.2/build/player/lottie.min.js";
const FONT_AWESOME: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0.0/css/all.min.css";

/// Olympic ring colors, one per tab
const RING_COLORS: [&str; 6] = ["blue", "yellow", "black", "green", "red", "purple"];

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 1100px; margin: 0 auto; padding: 1rem; }
nav.tabs { display: flex; justify-content: space-evenly; margin: 1rem 0 2rem; }
nav.tabs a { width: 100px; height: 100px; border-radius: 50%; border: 5px solid transparent;
  display: flex; align-items: center; justify-content: center; text-align: center;
  font-weight: bold; text-decoration: none; color: inherit; transition: transform 0.3s ease; }
nav.tabs a:hover, nav.tabs a.active { transform: scale(1.1); }
.notice { padding: 0.75rem 1rem; border-radius: 6px; margin: 1rem 0; }
.notice.success { background: #e6f4ea; color: #1e4620; }
.notice.warning { background: #fff4e5; color: #663c00; }
.result { text-align: center; }
.result .glyph { font-size: 100px; }
.result .label { font-size: 24px; }
.result .score { font-size: 18px; }
table.results { border-collapse: collapse; width: 100%; }
table.results td, table.results th { border: 1px solid #ddd; padding: 4px 8px; }
.charts { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.team-member { background-color: #f0f0f0; padding: 20px; border-radius: 15px;
  border: 1px solid #ddd; box-shadow: 0px 4px 8px rgba(0, 0, 0, 0.2); margin-bottom: 20px;
  display: flex; gap: 20px; }
.member-name { font-size: 20px; font-weight: bold; margin-bottom: 5px; }
.member-title { font-size: 16px; color: blue; margin-bottom: 10px; font-style: italic; }
.member-contact a { margin-right: 10px; color: #007bff; text-decoration: none; }
footer { margin-top: 3rem; border-top: 1px solid #ddd; padding-top: 1rem; }
"#;

/// Navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Analyzer,
    Dashboard,
    Team,
    Info,
    Feedback,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Home,
        Tab::Analyzer,
        Tab::Dashboard,
        Tab::Team,
        Tab::Info,
        Tab::Feedback,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Tab::Home => "/",
            Tab::Analyzer => "/analyzer",
            Tab::Dashboard => "/dashboard",
            Tab::Team => "/team",
            Tab::Info => "/info",
            Tab::Feedback => "/feedback",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Tab::Home => "🏠 Home",
            Tab::Analyzer => "📊 Analyzer",
            Tab::Dashboard => "📈 Dashboard",
            Tab::Team => "👥 The Team",
            Tab::Info => "ℹ️ Info",
            Tab::Feedback => "💬 Feedback",
        }
    }

    /// Key of the tab's animation in [`Animations`]
    fn animation_key(&self) -> Option<&'static str> {
        match self {
            Tab::Home => Some("home"),
            Tab::Analyzer => Some("analyzer"),
            Tab::Dashboard => Some("dashboard"),
            Tab::Team => Some("team"),
            Tab::Info => Some("info"),
            Tab::Feedback => None,
        }
    }
}

/// Message box shown above a tab's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
}

impl Notice {
    fn render(&self) -> String {
        let (class, text) = match self {
            Notice::Success(text) => ("success", text),
            Notice::Warning(text) => ("warning", text),
        };
        format!(r#"<div class="notice {}">{}</div>"#, class, escape_html(text))
    }
}

/// What the analyzer tab shows below its forms
#[derive(Debug, Clone, Default)]
pub enum AnalyzerView {
    #[default]
    Empty,
    Single(ScoreResult),
    Batch(BatchReport),
    /// CSV uploaded without a usable text column
    ColumnPicker {
        headers: Vec<String>,
        content: String,
    },
}

/// What the dashboard tab shows below its upload form
#[derive(Debug, Clone, Default)]
pub enum DashboardView {
    #[default]
    Empty,
    Report(DashboardReport),
    /// CSV uploaded without the configured text column
    ColumnPicker {
        headers: Vec<String>,
        content: String,
    },
}

/// Shared page chrome
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub title: &'a str,
    pub animations: &'a Animations,
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
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

/// JSON safe to inline in a `<script>` element
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn layout(chrome: Chrome<'_>, active: Tab, body: &str) -> String {
    let mut nav = String::new();
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let class = if *tab == active { " class=\"active\"" } else { "" };
        let _ = write!(
            nav,
            r#"<a href="{}"{} style="border-color: {}">{}</a>"#,
            tab.path(),
            class,
            RING_COLORS[i],
            tab.caption()
        );
    }

    let animation = active
        .animation_key()
        .and_then(|key| chrome.animations.get(key))
        .map(|json| {
            format!(
                r#"<div id="animation" style="height: 200px"></div>
<script src="{}"></script>
<script>lottie.loadAnimation({{ container: document.getElementById("animation"), renderer: "svg", loop: true, autoplay: true, animationData: {} }});</script>"#,
                LOTTIE_JS,
                json.replace("</", "<\\/")
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{font_awesome}">
<style>{style}</style>
</head>
<body>
<hr>
<nav class="tabs">{nav}</nav>
{animation}
{body}
<footer>© 2024 {title}. All rights reserved.</footer>
</body>
</html>"#,
        title = escape_html(chrome.title),
        font_awesome = FONT_AWESOME,
        style = STYLE,
        nav = nav,
        animation = animation,
        body = body,
    )
}

fn notices(notice: Option<&Notice>) -> String {
    notice.map(Notice::render).unwrap_or_default()
}

pub fn home(chrome: Chrome<'_>) -> String {
    let body = format!(
        "<h1>Welcome to the {}</h1>\n<p>Analyze sentiments of the 2024 Paris Olympics with our advanced tool.</p>",
        escape_html(chrome.title)
    );
    layout(chrome, Tab::Home, &body)
}

const ANALYZER_FORMS: &str = r#"
<h2>Manual Input</h2>
<form method="post" action="/analyzer/text">
  <label for="text">Enter a tweet to analyze sentiment:</label><br>
  <textarea id="text" name="text" rows="4" cols="80"></textarea><br>
  <button type="submit">Analyze</button>
</form>
<h2>File Upload</h2>
<form method="post" action="/analyzer/file" enctype="multipart/form-data">
  <label for="file">Upload a CSV or TXT file</label>
  <input id="file" type="file" name="file" accept=".csv,.txt">
  <input type="text" name="column" placeholder="Text column (CSV)">
  <button type="submit">Analyze File</button>
</form>
"#;

pub fn analyzer(chrome: Chrome<'_>, notice: Option<&Notice>, view: &AnalyzerView) -> String {
    let mut body = String::from("<h1>Olympic Sentiment Analyzer</h1>");
    body.push_str(&notices(notice));
    body.push_str(ANALYZER_FORMS);

    match view {
        AnalyzerView::Empty => {}
        AnalyzerView::Single(result) => body.push_str(&result_card(result)),
        AnalyzerView::Batch(report) => body.push_str(&batch_results(report)),
        AnalyzerView::ColumnPicker { headers, content } => {
            body.push_str(&column_picker("/analyzer/file", headers, content, false))
        }
    }
    body.push_str("\n<hr>");
    layout(chrome, Tab::Analyzer, &body)
}

fn result_card(result: &ScoreResult) -> String {
    format!(
        r#"<div class="result">
  <span class="glyph">{}</span>
  <div class="label">Sentiment: {}</div>
  <div class="score">Confidence Score: {:.2}</div>
</div>"#,
        result.glyph, result.label, result.compound_score
    )
}

fn batch_results(report: &BatchReport) -> String {
    let mut html = String::from(
        "<table class=\"results\"><tr><th>Text</th><th>Sentiment</th><th>Score</th><th>Emoticon</th></tr>",
    );
    for record in &report.records {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.4}</td><td>{}</td></tr>",
            escape_html(&record.text),
            record.result.label,
            record.result.compound_score,
            record.result.glyph
        );
    }
    html.push_str("</table>\n<h2>Summary</h2>\n<canvas id=\"labels\"></canvas>");
    html.push_str(&chart_scripts(&[("labels", &report.label_bars)], None));
    html
}

fn column_options(headers: &[String]) -> String {
    let mut options = String::new();
    for header in headers {
        let escaped = escape_html(header);
        let _ = write!(options, r#"<option value="{0}">{0}</option>"#, escaped);
    }
    options
}

/// Form re-posting the carried CSV text with the chosen column(s)
fn column_picker(action: &str, headers: &[String], content: &str, with_timestamp: bool) -> String {
    let options = column_options(headers);
    let timestamp = if with_timestamp {
        format!(
            r#"
  <label for="timestamp_column">Timestamp column:</label>
  <select id="timestamp_column" name="timestamp_column"><option value="">(none)</option>{}</select>"#,
            options
        )
    } else {
        String::new()
    };
    format!(
        r#"<form method="post" action="{}" enctype="multipart/form-data">
  <label for="column">Select the column containing the text to analyze:</label>
  <select id="column" name="column">{}</select>{}
  <input type="hidden" name="content" value="{}">
  <button type="submit">Analyze File</button>
</form>"#,
        action,
        options,
        timestamp,
        escape_html(content)
    )
}

const DASHBOARD_FORM: &str = r#"
<form method="post" action="/dashboard" enctype="multipart/form-data">
  <label for="file">Upload a CSV file with tweets</label>
  <input id="file" type="file" name="file" accept=".csv,.txt">
  <button type="submit">Build Dashboard</button>
</form>
"#;

const DASHBOARD_CHARTS: &str = r#"
<h2>Word Cloud of Tweets</h2>
<canvas id="wordcloud" width="800" height="400"></canvas>
<div class="charts">
  <div><h2>Sentiment Distribution</h2><canvas id="labels"></canvas></div>
  <div><h2>Sentiment Over Time</h2><canvas id="over-time"></canvas></div>
  <div><h2>Top Hashtags</h2><canvas id="hashtags"></canvas></div>
  <div><h2>Tweet Volume Over Time</h2><canvas id="volume"></canvas></div>
  <div><h2>Most Common Words</h2><canvas id="words"></canvas></div>
</div>
"#;

const DASHBOARD_JS: &str = r##"
<script>
(function () {
  const r = REPORT;
  const palette = ["#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666"];
  const dark2 = (n) => Array.from({ length: n }, (_, i) => palette[i % palette.length]);
  const line = (id, points, key, label, color) => new Chart(document.getElementById(id), {
    type: "line",
    data: { labels: points.map(p => p.date), datasets: [{ label, data: points.map(p => p[key]), borderColor: color, pointRadius: 3 }] },
  });
  const bars = (id, terms, label, horizontal) => new Chart(document.getElementById(id), {
    type: "bar",
    data: { labels: terms.map(t => t.term), datasets: [{ label, data: terms.map(t => t.count), backgroundColor: dark2(terms.length) }] },
    options: { indexAxis: horizontal ? "y" : "x" },
  });
  line("over-time", r.sentiment_over_time, "mean_score", "Average Sentiment Score", "#1b9e77");
  line("volume", r.volume_over_time, "count", "Tweet Count", "purple");
  bars("hashtags", r.top_hashtags, "Count", false);
  bars("words", r.top_words, "Count", true);
  if (window.WordCloud && r.word_cloud.length) {
    WordCloud(document.getElementById("wordcloud"), {
      list: r.word_cloud.map(e => [e.word, 8 + e.weight * 64]),
      backgroundColor: "white",
      color: () => palette[Math.floor(Math.random() * palette.length)],
    });
  }
})();
</script>
"##;

const LABEL_CHART_JS: &str = r#"
<script>
for (const [id, bars] of LABEL_CHARTS) {
  new Chart(document.getElementById(id), {
    type: "bar",
    data: { labels: bars.map(b => b.label), datasets: [{ label: "Count", data: bars.map(b => b.count), backgroundColor: bars.map(b => b.color) }] },
    options: { plugins: { legend: { display: false } } },
  });
}
</script>
"#;

/// Chart.js include plus label bar charts, optionally followed by the
/// dashboard charts
fn chart_scripts(label_charts: &[(&str, &Vec<LabelBar>)], report: Option<&DashboardReport>) -> String {
    let mut html = format!("\n<script src=\"{}\"></script>", CHART_JS);
    let _ = write!(html, "\n<script>const LABEL_CHARTS = {};</script>", script_json(label_charts));
    html.push_str(LABEL_CHART_JS);
    if let Some(report) = report {
        let _ = write!(
            html,
            "\n<script src=\"{}\"></script>\n<script>const REPORT = {};</script>",
            WORDCLOUD_JS,
            script_json(report)
        );
        html.push_str(DASHBOARD_JS);
    }
    html
}

pub fn dashboard(chrome: Chrome<'_>, notice: Option<&Notice>, view: &DashboardView) -> String {
    let mut body = String::from("<h1>Olympics Twitter Sentiment Stats</h1>");
    body.push_str(&notices(notice));
    body.push_str(DASHBOARD_FORM);

    if let DashboardView::ColumnPicker { headers, content } = view {
        body.push_str(&column_picker("/dashboard", headers, content, true));
    }
    if let DashboardView::Report(report) = view {
        let _ = write!(
            body,
            "<p>{} tweets analyzed: {} positive, {} neutral, {} negative.</p>",
            report.total_records,
            report.label_counts.positive,
            report.label_counts.neutral,
            report.label_counts.negative
        );
        if report.untimed_records > 0 {
            let _ = write!(
                body,
                "<p>{} tweets without a timestamp are left out of the time series.</p>",
                report.untimed_records
            );
        }
        body.push_str(DASHBOARD_CHARTS);
        body.push_str(&chart_scripts(&[("labels", &report.label_bars)], Some(report)));
    }
    layout(chrome, Tab::Dashboard, &body)
}

pub fn team(chrome: Chrome<'_>, members: &[TeamMember]) -> String {
    let mut body = String::from("<h1>The Data Sentinels</h1>");
    if members.is_empty() {
        body.push_str("<p>No team members configured.</p>");
    }
    for (index, member) in members.iter().enumerate() {
        let _ = write!(
            body,
            r#"<div class="team-member">
  <img src="/team/{index}/photo" alt="{name}" width="150">
  <div>
    <div class="member-name">{name}</div>
    <div class="member-title">{title}</div>
    <div class="member-bio">{bio}</div>
    <div class="member-contact">{contact}</div>
  </div>
</div>"#,
            index = index,
            name = escape_html(&member.name),
            title = escape_html(&member.title),
            bio = escape_html(&member.bio),
            contact = contact_links(member),
        );
    }
    layout(chrome, Tab::Team, &body)
}

fn contact_links(member: &TeamMember) -> String {
    let mut links = String::new();
    if let Some(github) = &member.github {
        let _ = write!(
            links,
            r#"<a href="https://github.com/{}" target="_blank"><i class="fab fa-github"></i></a>"#,
            escape_html(github)
        );
    }
    if let Some(email) = &member.email {
        let _ = write!(
            links,
            r#"<a href="mailto:{}"><i class="far fa-envelope"></i></a>"#,
            escape_html(email)
        );
    }
    if let Some(linkedin) = &member.linkedin {
        let _ = write!(
            links,
            r#"<a href="https://www.linkedin.com/in/{}" target="_blank"><i class="fab fa-linkedin"></i></a>"#,
            escape_html(linkedin)
        );
    }
    links
}

const INFO_BODY: &str = r#"<h1>About The App</h1>
<p>The Olympic Sentiment Analyzer measures public sentiment around the 2024 Paris Olympic Games
in tweets and user-submitted text.</p>
<p>Key features:</p>
<ul>
  <li>⭐️ Sentiment analysis of Olympic-related tweets</li>
  <li>⭐️ Single tweets or batch uploads (CSV or TXT)</li>
  <li>⭐️ Dashboard with sentiment trends, word clouds and key statistics</li>
  <li>⭐️ Sentiment changes over time and emerging hashtags</li>
</ul>
<p>Your feedback helps us improve the tool, so please share your thoughts on the Feedback tab.</p>"#;

pub fn info(chrome: Chrome<'_>) -> String {
    layout(chrome, Tab::Info, INFO_BODY)
}

pub fn feedback(chrome: Chrome<'_>, notice: Option<&Notice>) -> String {
    let mut body = String::from("<h1>We Value Your Feedback</h1>");
    body.push_str(&notices(notice));
    body.push_str(
        r#"<h2>Share Your Thoughts</h2>
<form method="post" action="/feedback">
  <label for="feedback">What do you think about our Olympic Sentiment Analyzer?</label><br>
  <textarea id="feedback" name="feedback" rows="4" cols="80"></textarea><br>
  <button type="submit">Submit Feedback</button>
</form>
<hr>
<h2>Rate Our App</h2>
<form method="post" action="/feedback/rating">
  <p>Select your rating:</p>"#,
    );
    for stars in 1..=5 {
        let checked = if stars == 3 { " checked" } else { "" };
        let _ = write!(
            body,
            r#"<label><input type="radio" name="rating" value="{0}"{1}> {0}</label> "#,
            stars, checked
        );
    }
    body.push_str("\n  <button type=\"submit\">Submit Rating</button>\n</form>");
    layout(chrome, Tab::Feedback, &body)
}
