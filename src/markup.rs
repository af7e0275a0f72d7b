//! HTMLテンプレートのマークアップ検査
//!
//! ブラウザ側が前提とする要素（プログレスバー、ページ内リンクの飛び先、
//! ツールチップ対象）が揃っているかを正規表現で調べる。
//! Djangoテンプレートタグを含む属性値は実行時まで決まらないため対象外。

use crate::error::{ShipTrackError, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;
use shiptrack_ui_common::{fragment_id, UiConfig};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TEMPLATE_EXTENSIONS: &[&str] = &["html", "htm"];

lazy_static! {
    static ref NON_MARKUP_RE: Regex = Regex::new(
        r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|\{#.*?#\}"
    )
    .unwrap();
    static ref ID_RE: Regex =
        Regex::new(r#"(?i)\sid\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#).unwrap();
    static ref ANCHOR_HREF_RE: Regex = Regex::new(
        r#"(?is)<a(?:\s[^>]*?)?\shref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#
    )
    .unwrap();
    static ref ATTR_SELECTOR_RE: Regex = Regex::new(
        r#"^\[\s*([\w-]+)\s*(?:=\s*(?:"([^"]*)"|'([^']*)'|([\w-]+)))?\s*\]$"#
    )
    .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub line: usize,
    pub message: String,
}

/// 1ファイル分の検査結果
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupAudit {
    pub has_progress_bar: bool,
    pub fragment_links: usize,
    pub empty_fragments: usize,
    pub tooltip_triggers: usize,
    pub findings: Vec<Finding>,
}

impl MarkupAudit {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// 失敗扱いの件数（`strict` では警告も含む）
    pub fn problems(&self, strict: bool) -> usize {
        if strict {
            self.findings.len()
        } else {
            self.count(Severity::Error)
        }
    }

    fn push(&mut self, severity: Severity, line: usize, message: String) {
        self.findings.push(Finding {
            severity,
            line,
            message,
        });
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub audit: MarkupAudit,
}

/// 属性値の出現位置
#[derive(Debug, Clone)]
struct AttrValue<'a> {
    value: &'a str,
    offset: usize,
}

impl AttrValue<'_> {
    fn is_dynamic(&self) -> bool {
        self.value.contains("{{") || self.value.contains("{%")
    }
}

fn captured_values<'a>(re: &Regex, html: &'a str) -> Vec<AttrValue<'a>> {
    re.captures_iter(html)
        .filter_map(|caps| {
            let value = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
            Some(AttrValue {
                value: value.as_str(),
                offset: value.start(),
            })
        })
        .collect()
}

/// コメント・スクリプト・スタイル・`{# #}` を改行だけ残して消す（行番号は変えない）
fn mask_non_markup(html: &str) -> Cow<'_, str> {
    NON_MARKUP_RE.replace_all(html, |caps: &Captures| {
        caps[0].chars().filter(|&c| c == '\n').collect::<String>()
    })
}

fn line_of(html: &str, offset: usize) -> usize {
    html[..offset].matches('\n').count() + 1
}

/// `[name]` / `[name="value"]` 形式のセレクタを出現数を数える正規表現に変換する
fn attribute_selector_regex(selector: &str) -> Option<Regex> {
    let caps = ATTR_SELECTOR_RE.captures(selector.trim())?;
    let name = regex::escape(caps.get(1)?.as_str());
    let value = caps
        .get(2)
        .or_else(|| caps.get(3))
        .or_else(|| caps.get(4))
        .map(|m| regex::escape(m.as_str()));

    let pattern = match value {
        Some(v) => format!(r#"(?i)\s{name}\s*=\s*(?:"{v}"|'{v}'|{v}[\s/>])"#),
        None => format!(r#"(?i)\s{name}[\s=/>]"#),
    };
    Regex::new(&pattern).ok()
}

/// HTML文字列を検査する
pub fn audit_markup(html: &str, config: &UiConfig) -> MarkupAudit {
    let mut audit = MarkupAudit::default();
    let html = mask_non_markup(html);
    let html = html.as_ref();

    let ids = captured_values(&ID_RE, html);
    let mut static_ids: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for id in ids.iter().filter(|id| !id.is_dynamic()) {
        static_ids.entry(id.value).or_default().push(id.offset);
    }

    // ID重複
    for (id, offsets) in &static_ids {
        if offsets.len() > 1 {
            let severity = if *id == config.bar_id || *id == config.container_id {
                Severity::Error
            } else {
                Severity::Warning
            };
            audit.push(
                severity,
                line_of(html, offsets[1]),
                format!("ID \"{}\" が{}回定義されています", id, offsets.len()),
            );
        }
    }

    // プログレスバー
    let bar = static_ids.get(config.bar_id.as_str()).map(|o| o[0]);
    let container = static_ids.get(config.container_id.as_str()).map(|o| o[0]);
    match (bar, container) {
        (Some(bar), Some(container)) => {
            audit.has_progress_bar = true;
            if bar < container {
                audit.push(
                    Severity::Warning,
                    line_of(html, bar),
                    format!("#{} が #{} より前にあります", config.bar_id, config.container_id),
                );
            }
        }
        (Some(offset), None) => audit.push(
            Severity::Error,
            line_of(html, offset),
            format!("#{} に対応する #{} がありません", config.bar_id, config.container_id),
        ),
        (None, Some(offset)) => audit.push(
            Severity::Error,
            line_of(html, offset),
            format!("#{} の中に #{} がありません", config.container_id, config.bar_id),
        ),
        (None, None) => {}
    }

    // ページ内リンク
    let known: HashSet<&str> = static_ids.keys().copied().collect();
    for href in captured_values(&ANCHOR_HREF_RE, html) {
        if href.is_dynamic() || !href.value.starts_with('#') {
            continue;
        }
        match fragment_id(href.value) {
            None => audit.empty_fragments += 1,
            Some(id) => {
                audit.fragment_links += 1;
                if !known.contains(id) {
                    audit.push(
                        Severity::Warning,
                        line_of(html, href.offset),
                        format!("リンク先 #{} が見つかりません（クリックしてもスクロールしません）", id),
                    );
                }
            }
        }
    }

    // ツールチップ
    match attribute_selector_regex(&config.tooltip_selector) {
        Some(re) => audit.tooltip_triggers = re.find_iter(html).count(),
        None => audit.push(
            Severity::Warning,
            0,
            format!("ツールチップのセレクタを解析できません: {}", config.tooltip_selector),
        ),
    }

    audit
}

pub fn audit_file(path: &Path, config: &UiConfig) -> Result<AuditReport> {
    let html = std::fs::read_to_string(path)?;
    Ok(AuditReport {
        path: path.to_path_buf(),
        audit: audit_markup(&html, config),
    })
}

fn is_template(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            TEMPLATE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}

/// 検査対象のテンプレートを集める（フォルダは再帰的に走査）
pub fn collect_templates(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut templates = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(ShipTrackError::FileNotFound(path.display().to_string()));
        }

        if path.is_file() {
            templates.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && is_template(entry.path()) {
                templates.push(entry.path().to_path_buf());
            }
        }
    }

    if templates.is_empty() {
        let joined: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        return Err(ShipTrackError::NoTemplatesFound(joined.join(", ")));
    }

    templates.sort();
    templates.dedup();
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audit(html: &str) -> MarkupAudit {
        audit_markup(html, &UiConfig::default())
    }

    const PAGE: &str = r##"
<nav>
  <a href="#tracking" class="nav-link">追跡</a>
  <a class="nav-link" href='#history'>履歴</a>
  <a href="#" data-bs-toggle="dropdown">メニュー</a>
</nav>
<section id="tracking">
  <span data-bs-toggle="tooltip" title="追跡番号">?</span>
</section>
<div id="progressBarContainer" style="display: none">
  <div id="progressBar" class="progress-bar"></div>
</div>
<section id="history"></section>
"##;

    #[test]
    fn test_complete_page_has_no_findings() {
        let result = audit(PAGE);
        assert!(result.has_progress_bar);
        assert_eq!(result.fragment_links, 2);
        assert_eq!(result.empty_fragments, 1);
        assert_eq!(result.tooltip_triggers, 1);
        assert!(result.findings.is_empty(), "{:?}", result.findings);
    }

    #[test]
    fn test_bar_without_container_is_error() {
        let result = audit(r#"<div id="progressBar"></div>"#);
        assert!(!result.has_progress_bar);
        assert_eq!(result.count(Severity::Error), 1);
        assert!(result.findings[0].message.contains("progressBarContainer"));
    }

    #[test]
    fn test_container_without_bar_is_error() {
        let result = audit("<p>x</p>\n<div id=\"progressBarContainer\"></div>");
        assert_eq!(result.count(Severity::Error), 1);
        assert_eq!(result.findings[0].line, 2);
    }

    #[test]
    fn test_page_without_progress_bar_is_fine() {
        let result = audit(r#"<main id="content"></main>"#);
        assert!(!result.has_progress_bar);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_duplicate_ids() {
        let html = r#"
<div id="progressBarContainer"><div id="progressBar"></div></div>
<div id="progressBar"></div>
<p id="note"></p><p id="note"></p>
"#;
        let result = audit(html);
        assert_eq!(result.count(Severity::Error), 1);
        assert_eq!(result.count(Severity::Warning), 1);
        let bar_dup = result
            .findings
            .iter()
            .find(|f| f.severity == Severity::Error)
            .unwrap();
        assert_eq!(bar_dup.line, 3);
    }

    #[test]
    fn test_dangling_fragment_link_is_warning() {
        let result = audit(r##"<a href="#missing">x</a><div id="section1"></div>"##);
        assert_eq!(result.count(Severity::Warning), 1);
        assert_eq!(result.problems(false), 0);
        assert_eq!(result.problems(true), 1);
        assert!(result.findings[0].message.contains("#missing"));
    }

    #[test]
    fn test_template_tags_are_skipped() {
        let html = r##"
<div id="shipment-{{ shipment.id }}"></div>
<a href="#shipment-{{ shipment.id }}">詳細</a>
<a href="{% url 'shipment_list' %}">一覧</a>
"##;
        let result = audit(html);
        assert_eq!(result.fragment_links, 0);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_data_id_is_not_an_id() {
        let result = audit(r#"<tr data-id="progressBar"></tr>"#);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_non_anchor_href_is_ignored() {
        let result = audit(r##"<link rel="stylesheet" href="#missing">"##);
        assert_eq!(result.fragment_links, 0);
    }

    #[test]
    fn test_bar_before_container_is_warning() {
        let result = audit(r#"<div id="progressBar"></div><div id="progressBarContainer"></div>"#);
        assert!(result.has_progress_bar);
        assert_eq!(result.count(Severity::Warning), 1);
    }

    #[test]
    fn test_custom_tooltip_selector() {
        let config = UiConfig {
            tooltip_selector: "[data-tip]".to_string(),
            ..UiConfig::default()
        };
        let result = audit_markup(r#"<b data-tip="a">1</b><i data-tip>2</i><u data-tips="x"></u>"#, &config);
        assert_eq!(result.tooltip_triggers, 2);
    }

    #[test]
    fn test_unsupported_tooltip_selector_is_warning() {
        let config = UiConfig {
            tooltip_selector: ".has-tooltip".to_string(),
            ..UiConfig::default()
        };
        let result = audit_markup("<p></p>", &config);
        assert_eq!(result.count(Severity::Warning), 1);
    }

    #[test]
    fn test_commented_out_markup_is_ignored() {
        let html = "<!--\n<div id=\"progressBar\"></div>\n-->\n<div id=\"progressBar\"></div>";
        let result = audit(html);
        assert_eq!(result.count(Severity::Error), 1);
        assert!(!result.findings[0].message.contains("回定義"));
        assert_eq!(result.findings[0].line, 4);
    }

    #[test]
    fn test_script_and_style_bodies_are_ignored() {
        let html = r##"<style>
#progressBar { width: 0; }
</style>
<script>
  el.innerHTML = '<div id="progressBar"></div><a href="#nowhere">x</a>';
</script>
{# <div id="progressBarContainer"></div> #}
<main id="content"></main>"##;
        let result = audit(html);
        assert!(!result.has_progress_bar);
        assert_eq!(result.fragment_links, 0);
        assert!(result.findings.is_empty(), "{:?}", result.findings);
    }

    #[test]
    fn test_template_extension_is_case_insensitive() {
        assert!(is_template(Path::new("templates/base.html")));
        assert!(is_template(Path::new("templates/Base.Html")));
        assert!(is_template(Path::new("templates/LEGACY.HTM")));
        assert!(!is_template(Path::new("static/js/main.js")));
        assert!(!is_template(Path::new("templates/README")));
    }
}
